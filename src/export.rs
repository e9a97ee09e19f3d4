use std::path::Path;

use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook};

use crate::data::model::Catalog;
use crate::error::ExportError;

// ---------------------------------------------------------------------------
// Export rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Column headers of an export, in order. `issn` is appended when present.
pub const HEADERS: [&str; 10] = [
    "№",
    "Авторы",
    "title",
    "year",
    "source",
    "quartile",
    "percentile_2024",
    "cited_by",
    "doi_link",
    "url",
];
pub const ISSN_HEADER: &str = "issn";

/// One exported line, numbered from 1 in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub number: usize,
    pub authors: String,
    pub title: String,
    pub year: Option<i32>,
    pub source: String,
    pub quartile: Option<String>,
    pub percentile: Option<f64>,
    pub cited_by: u32,
    pub doi_link: Option<String>,
    pub url: Option<String>,
    pub issn: Option<String>,
}

/// Rows for the given display order.
pub fn export_rows(catalog: &Catalog, indices: &[usize]) -> Vec<ExportRow> {
    indices
        .iter()
        .filter_map(|&i| catalog.get(i))
        .enumerate()
        .map(|(pos, p)| ExportRow {
            number: pos + 1,
            authors: p.authors_display(),
            title: p.title.clone(),
            year: p.year,
            source: p.source.clone(),
            quartile: p.quartile.map(|q| q.to_string()),
            percentile: p.percentile_2024,
            cited_by: p.cited_by,
            doi_link: p.doi_link(),
            url: p.url.clone(),
            issn: p.issn.clone(),
        })
        .collect()
}

fn header_row(with_issn: bool) -> Vec<&'static str> {
    let mut headers = HEADERS.to_vec();
    if with_issn {
        headers.push(ISSN_HEADER);
    }
    headers
}

impl ExportRow {
    fn text_fields(&self, with_issn: bool) -> Vec<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        let mut fields = vec![
            self.number.to_string(),
            self.authors.clone(),
            self.title.clone(),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.source.clone(),
            opt(&self.quartile),
            self.percentile.map(|p| p.to_string()).unwrap_or_default(),
            self.cited_by.to_string(),
            opt(&self.doi_link),
            opt(&self.url),
        ];
        if with_issn {
            fields.push(opt(&self.issn));
        }
        fields
    }
}

// ---------------------------------------------------------------------------
// Encoders
// ---------------------------------------------------------------------------

/// UTF-8 CSV with a byte-order mark so spreadsheet apps pick the encoding.
pub fn to_csv(rows: &[ExportRow], with_issn: bool) -> Result<Vec<u8>, ExportError> {
    let mut buffer = "\u{feff}".as_bytes().to_vec();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(header_row(with_issn))?;
        for row in rows {
            writer.write_record(row.text_fields(with_issn))?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

/// Single-sheet workbook named `Export`.
pub fn to_xlsx(rows: &[ExportRow], with_issn: bool) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Export")?;

    let bold = Format::new().set_bold();
    let wrap = Format::new().set_text_wrap();

    for (col, header) in header_row(with_issn).into_iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &bold)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_number(r, 0, row.number as f64)?;
        sheet.write_string_with_format(r, 1, &row.authors, &wrap)?;
        sheet.write_string(r, 2, &row.title)?;
        if let Some(year) = row.year {
            sheet.write_number(r, 3, f64::from(year))?;
        }
        sheet.write_string(r, 4, &row.source)?;
        if let Some(q) = &row.quartile {
            sheet.write_string(r, 5, q)?;
        }
        if let Some(p) = row.percentile {
            sheet.write_number(r, 6, p)?;
        }
        sheet.write_number(r, 7, f64::from(row.cited_by))?;
        if let Some(link) = &row.doi_link {
            sheet.write_string(r, 8, link)?;
        }
        if let Some(url) = &row.url {
            sheet.write_string(r, 9, url)?;
        }
        if with_issn {
            if let Some(issn) = &row.issn {
                sheet.write_string(r, 10, issn)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// `zh_scopus_export_YYYYmmdd_HHMMSS.<ext>`
pub fn export_file_name(format: ExportFormat, generated_at: NaiveDateTime) -> String {
    format!(
        "zh_scopus_export_{}.{}",
        generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Encode the visible rows and write them to `path`.
pub fn write_export(
    path: &Path,
    format: ExportFormat,
    catalog: &Catalog,
    indices: &[usize],
) -> Result<usize, ExportError> {
    let rows = export_rows(catalog, indices);
    let bytes = match format {
        ExportFormat::Csv => to_csv(&rows, catalog.has_issn)?,
        ExportFormat::Xlsx => to_xlsx(&rows, catalog.has_issn)?,
    };
    std::fs::write(path, bytes)?;
    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}
