//! Writes `data/zhubanov_scopus_issn.xlsx`: a deterministic demo export in the
//! layout the viewer expects (sheet `ARTICLE`, Scopus column headers).

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

const HEADERS: [&str; 11] = [
    "Автор (ы)",
    "Author full names",
    "Название документа",
    "Год",
    "Название источника",
    "Цитирования",
    "DOI",
    "Ссылка",
    "ISSN",
    "Квартиль",
    "Процентиль 2024",
];

const AUTHORS: [&str; 12] = [
    "Abenov B.",
    "Zhakupova A.",
    "Smagulov K.",
    "Lee K.",
    "Tulegenova D.",
    "Ivanov S.",
    "Bekova G.",
    "Nurlanov A.",
    "Smith J.",
    "Orazbayev T.",
    "Doe A.",
    "Sadykova M.",
];

const VENUES: [(&str, &str, Option<&str>); 8] = [
    ("Eurasian Chemico-Technological Journal", "1562-3920", Some("Q3")),
    ("Journal of Mathematical Physics", "0022-2488", Some("Q2")),
    ("Physical Review B", "2469-9950", Some("Q1")),
    ("Bulletin of the Karaganda University", "2518-7198", Some("Q4")),
    ("Sustainability", "2071-1050", Some("Q2")),
    ("Applied Sciences", "2076-3417", Some("Q1")),
    ("AIP Conference Proceedings", "0094-243X", None),
    ("Journal of Physics: Conference Series", "1742-6588", None),
];

const TOPICS: [&str; 10] = [
    "spectral analysis",
    "boundary value problems",
    "thin film growth",
    "regional water management",
    "graph neural networks",
    "soil salinity mapping",
    "fractional differential equations",
    "catalytic oxidation",
    "higher education outcomes",
    "wind energy forecasting",
];

/// Minimal deterministic PRNG (splitmix64).
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

fn main() -> Result<()> {
    let mut rng = SampleRng(42);
    let path = Path::new("data/zhubanov_scopus_issn.xlsx");
    std::fs::create_dir_all("data").context("creating data directory")?;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("ARTICLE")?;
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    let n_rows = 240;
    for i in 0..n_rows {
        let row = (i + 1) as u32;

        let n_authors = 1 + rng.below(4);
        let mut names: Vec<&str> = Vec::with_capacity(n_authors);
        while names.len() < n_authors {
            let name = AUTHORS[rng.below(AUTHORS.len())];
            if !names.contains(&name) {
                names.push(name);
            }
        }
        let (venue, issn, quartile) = VENUES[rng.below(VENUES.len())];
        let topic = TOPICS[rng.below(TOPICS.len())];

        sheet.write_string(row, 0, names.join("; "))?;
        sheet.write_string(row, 2, format!("On {topic}: study {}", i + 1))?;
        // Roughly one row in forty has no year.
        if rng.below(40) != 0 {
            sheet.write_number(row, 3, (2010 + rng.below(16)) as f64)?;
        }
        sheet.write_string(row, 4, venue)?;
        sheet.write_number(row, 5, (rng.below(60) * rng.below(3)) as f64)?;
        if rng.below(5) != 0 {
            sheet.write_string(row, 6, format!("10.5555/zh.{}", 1000 + i))?;
        }
        let eid = 85_000_000_000u64 + i as u64;
        sheet.write_string(
            row,
            7,
            format!("https://www.scopus.com/record/display.uri?eid=2-s2.0-{eid}"),
        )?;
        sheet.write_string(row, 8, issn)?;
        if let Some(q) = quartile {
            sheet.write_string(row, 9, q)?;
            let base = match q {
                "Q1" => 75,
                "Q2" => 50,
                "Q3" => 25,
                _ => 0,
            };
            sheet.write_number(row, 10, (base + rng.below(25)) as f64)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {n_rows} publications to {}", path.display());
    Ok(())
}
