use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Quartile – journal ranking tier
// ---------------------------------------------------------------------------

/// Journal ranking tier. `Q1` is the best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quartile {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quartile {
    pub const ALL: [Quartile; 4] = [Quartile::Q1, Quartile::Q2, Quartile::Q3, Quartile::Q4];

    pub fn as_str(self) -> &'static str {
        match self {
            Quartile::Q1 => "Q1",
            Quartile::Q2 => "Q2",
            Quartile::Q3 => "Q3",
            Quartile::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quartile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quartile {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Q1" => Ok(Quartile::Q1),
            "Q2" => Ok(Quartile::Q2),
            "Q3" => Ok(Quartile::Q3),
            "Q4" => Ok(Quartile::Q4),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Publication – one row of the export
// ---------------------------------------------------------------------------

/// A single publication record (one spreadsheet row).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Publication {
    /// Semicolon-delimited author list, in byline order.
    pub authors_raw: String,
    pub title: String,
    pub year: Option<i32>,
    /// Venue (journal / conference) name.
    pub source: String,
    pub cited_by: u32,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub issn: Option<String>,
    pub quartile: Option<Quartile>,
    pub percentile_2024: Option<f64>,
}

impl Publication {
    /// Author list formatted for display: one author per line.
    pub fn authors_display(&self) -> String {
        self.authors_raw.replace(';', "\n")
    }

    /// Resolver link for the DOI, if there is one.
    pub fn doi_link(&self) -> Option<String> {
        self.doi
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| format!("https://doi.org/{d}"))
    }

    /// Individual author names: split on `;`, trimmed, empty fragments dropped.
    pub fn author_names(&self) -> impl Iterator<Item = &str> {
        self.authors_raw
            .split(';')
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }

    /// Percentile with the "missing" sentinel used for range checks.
    pub fn percentile_or_sentinel(&self) -> f64 {
        self.percentile_2024.unwrap_or(-1.0)
    }
}

/// Lowercased copies of the searchable text fields.
#[derive(Debug, Clone)]
pub(crate) struct SearchKeys {
    pub title: String,
    pub authors: String,
    pub source: String,
}

impl SearchKeys {
    fn of(p: &Publication) -> Self {
        Self {
            title: p.title.to_lowercase(),
            authors: p.authors_raw.to_lowercase(),
            source: p.source.to_lowercase(),
        }
    }

    /// `needle` must already be lowercase.
    pub fn contains(&self, needle: &str) -> bool {
        self.title.contains(needle) || self.authors.contains(needle) || self.source.contains(needle)
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full, immutable set of publications with pre-computed lookups.
#[derive(Debug, Clone)]
pub struct Catalog {
    publications: Vec<Publication>,
    search_keys: Vec<SearchKeys>,
    year_bounds: Option<(i32, i32)>,
    source_options: Vec<(String, usize)>,
    author_options: Vec<(String, usize)>,
    /// Whether the input carried an ISSN column.
    pub has_issn: bool,
}

impl Catalog {
    /// Build lookups from the loaded records.
    pub fn from_publications(publications: Vec<Publication>, has_issn: bool) -> Self {
        let search_keys = publications.iter().map(SearchKeys::of).collect();

        let year_bounds = publications
            .iter()
            .filter_map(|p| p.year)
            .fold(None, |acc: Option<(i32, i32)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            });

        let mut sources: BTreeMap<String, usize> = BTreeMap::new();
        let mut authors: BTreeMap<String, usize> = BTreeMap::new();
        for p in &publications {
            *sources.entry(p.source.clone()).or_default() += 1;
            for a in p.author_names() {
                *authors.entry(a.to_string()).or_default() += 1;
            }
        }

        Catalog {
            publications,
            search_keys,
            year_bounds,
            source_options: by_count_desc(sources),
            author_options: by_count_desc(authors),
            has_issn,
        }
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    pub fn get(&self, index: usize) -> Option<&Publication> {
        self.publications.get(index)
    }

    pub(crate) fn search_keys(&self, index: usize) -> Option<&SearchKeys> {
        self.search_keys.get(index)
    }

    /// Smallest and largest year present, if any record has a year.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.year_bounds
    }

    pub fn max_year(&self) -> Option<i32> {
        self.year_bounds.map(|(_, hi)| hi)
    }

    /// Venues with their row counts, most frequent first.
    pub fn source_options(&self) -> &[(String, usize)] {
        &self.source_options
    }

    /// Author names with their publication counts, most frequent first.
    pub fn author_options(&self) -> &[(String, usize)] {
        &self.author_options
    }

    pub fn len(&self) -> usize {
        self.publications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }
}

fn by_count_desc(counts: BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut v: Vec<(String, usize)> = counts.into_iter().collect();
    // BTreeMap order gives name ascending; stable sort keeps it for ties.
    v.sort_by(|a, b| b.1.cmp(&a.1));
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{publication, scenario_catalog};

    #[test]
    fn doi_link_requires_non_blank_doi() {
        let mut p = publication("A", 2020, "V", 0, None, "X");
        assert_eq!(p.doi_link(), None);

        p.doi = Some("   ".into());
        assert_eq!(p.doi_link(), None);

        p.doi = Some(" 10.1000/xyz ".into());
        assert_eq!(p.doi_link().as_deref(), Some("https://doi.org/10.1000/xyz"));
    }

    #[test]
    fn author_names_drop_empty_fragments() {
        let p = publication("T", 2020, "V", 0, None, " Smith J.; ;Doe A.;");
        let names: Vec<&str> = p.author_names().collect();
        assert_eq!(names, vec!["Smith J.", "Doe A."]);
        assert_eq!(p.authors_display(), " Smith J.\n \nDoe A.\n");
    }

    #[test]
    fn quartile_parses_only_known_tiers() {
        assert_eq!(" Q3 ".parse::<Quartile>(), Ok(Quartile::Q3));
        assert!("Q5".parse::<Quartile>().is_err());
        assert!("q1".parse::<Quartile>().is_err());
    }

    #[test]
    fn catalog_options_sorted_by_count_then_name() {
        let catalog = scenario_catalog();
        assert_eq!(catalog.year_bounds(), Some((2019, 2021)));
        assert_eq!(
            catalog.source_options(),
            &[("A".to_string(), 2), ("B".to_string(), 1)]
        );
        assert_eq!(
            catalog.author_options(),
            &[
                ("Doe A.".to_string(), 2),
                ("Lee K.".to_string(), 1),
                ("Smith J.".to_string(), 1),
            ]
        );
    }

    #[test]
    fn empty_catalog_has_no_year_bounds() {
        let catalog = Catalog::from_publications(Vec::new(), false);
        assert!(catalog.is_empty());
        assert_eq!(catalog.year_bounds(), None);
        assert_eq!(catalog.max_year(), None);
    }
}
