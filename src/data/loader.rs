use std::collections::BTreeMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::model::{Catalog, Publication};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the publication table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – the named sheet is read
/// * `.csv` – same headers, `sheet` is ignored
///
/// Malformed cells and missing optional columns never fail the load;
/// a missing file or sheet does.
pub fn load_file(path: &Path, sheet: &str) -> Result<Catalog, LoadError> {
    if !path.is_file() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_workbook(path, sheet)?,
        "csv" => read_csv(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let catalog = build_catalog(table);
    log::info!(
        "Loaded {} publications from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

// ---------------------------------------------------------------------------
// Raw table – header row plus untyped cells
// ---------------------------------------------------------------------------

/// A spreadsheet cell before coercion.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

fn read_workbook(path: &Path, sheet: &str) -> Result<RawTable, LoadError> {
    let mut workbook = open_workbook_auto(path)?;

    let available = workbook.sheet_names();
    if !available.iter().any(|s| s == sheet) {
        return Err(LoadError::MissingSheet {
            sheet: sheet.to_string(),
            available,
        });
    }

    let range = workbook.worksheet_range(sheet)?;
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|c| cell_text(&from_data(c))).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<Cell>> = rows.map(|row| row.iter().map(from_data).collect()).collect();

    Ok(RawTable { headers, rows })
}

fn from_data(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

fn read_csv(path: &Path) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|v| {
                    if v.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(v.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// Header mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Field {
    Authors,
    Title,
    Year,
    Source,
    CitedBy,
    Doi,
    Url,
    Issn,
    Quartile,
    Percentile,
}

impl Field {
    const ALL: [Field; 10] = [
        Field::Authors,
        Field::Title,
        Field::Year,
        Field::Source,
        Field::CitedBy,
        Field::Doi,
        Field::Url,
        Field::Issn,
        Field::Quartile,
        Field::Percentile,
    ];

    /// Header used by the Scopus export, and the internal name also accepted.
    fn headers(self) -> [&'static str; 2] {
        match self {
            Field::Authors => ["Автор (ы)", "authors_raw"],
            Field::Title => ["Название документа", "title"],
            Field::Year => ["Год", "year"],
            Field::Source => ["Название источника", "source"],
            Field::CitedBy => ["Цитирования", "cited_by"],
            Field::Doi => ["DOI", "doi"],
            Field::Url => ["Ссылка", "url"],
            Field::Issn => ["ISSN", "issn"],
            Field::Quartile => ["Квартиль", "quartile"],
            Field::Percentile => ["Процентиль 2024", "percentile_2024"],
        }
    }

    fn from_header(header: &str) -> Option<Field> {
        let header = header.trim();
        Field::ALL
            .into_iter()
            .find(|f| f.headers().contains(&header))
    }
}

/// Field → column position; the first matching header wins.
fn map_columns(headers: &[String]) -> BTreeMap<Field, usize> {
    let mut columns = BTreeMap::new();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(field) = Field::from_header(header) {
            columns.entry(field).or_insert(idx);
        }
    }
    columns
}

fn build_catalog(table: RawTable) -> Catalog {
    let columns = map_columns(&table.headers);

    let missing: Vec<&str> = Field::ALL
        .into_iter()
        .filter(|f| !columns.contains_key(f))
        .map(|f| f.headers()[0])
        .collect();
    if !missing.is_empty() {
        log::warn!("Input is missing columns {missing:?}; using defaults");
    }

    let publications = table
        .rows
        .iter()
        .filter(|row| row.iter().any(|c| *c != Cell::Empty))
        .map(|row| {
            let cell = |field: Field| cell_at(row, &columns, field);
            Publication {
                authors_raw: cell_text(cell(Field::Authors)),
                title: cell_text(cell(Field::Title)),
                year: coerce_year(cell(Field::Year)),
                source: cell_text(cell(Field::Source)),
                cited_by: coerce_count(cell(Field::CitedBy)),
                doi: cell_opt_text(cell(Field::Doi)),
                url: cell_opt_text(cell(Field::Url)),
                issn: cell_opt_text(cell(Field::Issn)),
                quartile: cell_text(cell(Field::Quartile)).parse().ok(),
                percentile_2024: cell_number(cell(Field::Percentile)),
            }
        })
        .collect();

    Catalog::from_publications(publications, columns.contains_key(&Field::Issn))
}

static EMPTY_CELL: Cell = Cell::Empty;

fn cell_at<'a>(row: &'a [Cell], columns: &BTreeMap<Field, usize>, field: Field) -> &'a Cell {
    columns
        .get(&field)
        .and_then(|&idx| row.get(idx))
        .unwrap_or(&EMPTY_CELL)
}

// ---------------------------------------------------------------------------
// Cell coercion – never fails, falls back to defaults
// ---------------------------------------------------------------------------

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.clone(),
        Cell::Number(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Cell::Number(f) => f.to_string(),
    }
}

fn cell_opt_text(cell: &Cell) -> Option<String> {
    let text = cell_text(cell);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn cell_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Empty => None,
        Cell::Number(f) => Some(*f),
        Cell::Text(s) => s.trim().parse::<f64>().ok(),
    }
    .filter(|f| f.is_finite())
}

fn coerce_year(cell: &Cell) -> Option<i32> {
    cell_number(cell)
        .filter(|f| f.fract() == 0.0 && *f >= f64::from(i32::MIN) && *f <= f64::from(i32::MAX))
        .map(|f| f as i32)
}

/// Citation count: truncated, negatives and garbage become 0.
fn coerce_count(cell: &Cell) -> u32 {
    cell_number(cell).map_or(0, |f| f.max(0.0) as u32)
}
