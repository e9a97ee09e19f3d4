use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::model::{Catalog, Publication, Quartile};

// ---------------------------------------------------------------------------
// Criteria – what the user asked to see
// ---------------------------------------------------------------------------

/// Quick year window. Anything other than `All` overrides the year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YearPreset {
    #[default]
    All,
    Last5,
    Last10,
}

impl YearPreset {
    pub const ALL: [YearPreset; 3] = [YearPreset::All, YearPreset::Last5, YearPreset::Last10];

    /// Years subtracted from the newest year to get the lower bound.
    fn span(self) -> Option<i32> {
        match self {
            YearPreset::All => None,
            YearPreset::Last5 => Some(4),
            YearPreset::Last10 => Some(9),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            YearPreset::All => "All years",
            YearPreset::Last5 => "Last 5 years",
            YearPreset::Last10 => "Last 10 years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    YearDesc,
    YearAsc,
    CitedDesc,
    CitedAsc,
    PercentileDesc,
    AuthorAz,
    AuthorZa,
    SourceAz,
    SourceZa,
    TitleAz,
}

impl SortMode {
    pub const ALL: [SortMode; 10] = [
        SortMode::YearDesc,
        SortMode::YearAsc,
        SortMode::CitedDesc,
        SortMode::CitedAsc,
        SortMode::PercentileDesc,
        SortMode::AuthorAz,
        SortMode::AuthorZa,
        SortMode::SourceAz,
        SortMode::SourceZa,
        SortMode::TitleAz,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortMode::YearDesc => "Year (newest first)",
            SortMode::YearAsc => "Year (oldest first)",
            SortMode::CitedDesc => "Citations (most first)",
            SortMode::CitedAsc => "Citations (fewest first)",
            SortMode::PercentileDesc => "Percentile (highest first)",
            SortMode::AuthorAz => "Author (A–Z)",
            SortMode::AuthorZa => "Author (Z–A)",
            SortMode::SourceAz => "Source (A–Z)",
            SortMode::SourceZa => "Source (Z–A)",
            SortMode::TitleAz => "Title (A–Z)",
        }
    }
}

/// Filter and sort settings. All predicates are conjunctive.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    /// Case-insensitive substring over title, authors and source. Blank = off.
    pub search: String,
    pub year_preset: YearPreset,
    /// Inclusive; only used when `year_preset` is `All`. `None` = off.
    pub year_range: Option<(i32, i32)>,
    /// Accepted quartiles. An empty set accepts nothing.
    pub quartiles: BTreeSet<Quartile>,
    /// Inclusive; a missing percentile counts as -1. `None` = off.
    pub percentile_range: Option<(f64, f64)>,
    /// Accepted venues. Empty = off.
    pub sources: BTreeSet<String>,
    /// Author fragments, any of which must occur in the author list. Empty = off.
    pub authors: BTreeSet<String>,
    pub sort: SortMode,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            year_preset: YearPreset::All,
            year_range: None,
            quartiles: Quartile::ALL.into_iter().collect(),
            percentile_range: None,
            sources: BTreeSet::new(),
            authors: BTreeSet::new(),
            sort: SortMode::YearDesc,
        }
    }
}

impl Criteria {
    /// The initial dashboard state: full year span, percentile 0–100, every quartile.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            year_range: Some(default_year_range(catalog)),
            percentile_range: Some((0.0, 100.0)),
            ..Self::default()
        }
    }
}

/// Catalog year span, or 2000..current year when no record has a year.
pub fn default_year_range(catalog: &Catalog) -> (i32, i32) {
    catalog
        .year_bounds()
        .unwrap_or_else(|| (2000, current_year()))
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Return the indices of publications passing `criteria`, in display order.
pub fn filtered_indices(catalog: &Catalog, criteria: &Criteria) -> Vec<usize> {
    let year_floor = criteria
        .year_preset
        .span()
        .map(|span| preset_reference_year(catalog, criteria).saturating_sub(span));
    let needle = (!criteria.search.trim().is_empty()).then(|| criteria.search.to_lowercase());

    let mut indices: Vec<usize> = catalog
        .publications()
        .iter()
        .enumerate()
        .filter(|(i, p)| {
            if !year_passes(p, year_floor, criteria.year_range) {
                return false;
            }
            if !p.quartile.is_some_and(|q| criteria.quartiles.contains(&q)) {
                return false;
            }
            if let Some((lo, hi)) = criteria.percentile_range {
                let pct = p.percentile_or_sentinel();
                if pct < lo || pct > hi {
                    return false;
                }
            }
            if !criteria.sources.is_empty() && !criteria.sources.contains(&p.source) {
                return false;
            }
            if !criteria.authors.is_empty()
                && !criteria
                    .authors
                    .iter()
                    .any(|a| p.authors_raw.contains(a.trim()))
            {
                return false;
            }
            match (&needle, catalog.search_keys(*i)) {
                (Some(n), Some(keys)) => keys.contains(n),
                _ => true,
            }
        })
        .map(|(i, _)| i)
        .collect();

    sort_indices(catalog, &mut indices, criteria.sort);
    indices
}

/// Newest year of the whole catalog; falls back to the range's upper bound.
fn preset_reference_year(catalog: &Catalog, criteria: &Criteria) -> i32 {
    catalog
        .max_year()
        .or(criteria.year_range.map(|(_, hi)| hi))
        .unwrap_or_else(current_year)
}

fn year_passes(p: &Publication, floor: Option<i32>, range: Option<(i32, i32)>) -> bool {
    match (floor, range) {
        (Some(floor), _) => p.year.unwrap_or(0) >= floor,
        (None, Some((lo, hi))) => p.year.is_some_and(|y| lo <= y && y <= hi),
        (None, None) => true,
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Stable in-place sort of row indices by `mode`.
pub fn sort_indices(catalog: &Catalog, indices: &mut [usize], mode: SortMode) {
    let pubs = catalog.publications();
    indices.sort_by(|&a, &b| compare(&pubs[a], &pubs[b], mode));
}

fn compare(a: &Publication, b: &Publication, mode: SortMode) -> Ordering {
    match mode {
        SortMode::YearDesc => missing_last(a.year, b.year, |x, y| y.cmp(x)),
        SortMode::YearAsc => missing_last(a.year, b.year, |x, y| x.cmp(y)),
        SortMode::CitedDesc => b.cited_by.cmp(&a.cited_by),
        SortMode::CitedAsc => a.cited_by.cmp(&b.cited_by),
        SortMode::PercentileDesc => {
            missing_last(a.percentile_2024, b.percentile_2024, |x, y| y.total_cmp(x))
        }
        SortMode::AuthorAz => a.authors_raw.cmp(&b.authors_raw),
        SortMode::AuthorZa => b.authors_raw.cmp(&a.authors_raw),
        SortMode::SourceAz => a.source.cmp(&b.source),
        SortMode::SourceZa => b.source.cmp(&a.source),
        SortMode::TitleAz => a.title.cmp(&b.title),
    }
}

/// Missing values go after present ones regardless of direction.
fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{publication, scenario_catalog, scenario_records};

    fn open() -> Criteria {
        Criteria::default()
    }

    fn titles(catalog: &Catalog, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| catalog.publications()[i].title.clone())
            .collect()
    }

    #[test]
    fn quartile_q1_keeps_first_and_third() {
        let catalog = scenario_catalog();
        let criteria = Criteria {
            quartiles: [Quartile::Q1].into_iter().collect(),
            sort: SortMode::YearAsc,
            ..open()
        };
        let rows = filtered_indices(&catalog, &criteria);
        assert_eq!(titles(&catalog, &rows), vec!["Third paper", "First paper"]);

        let mut by_cites = rows.clone();
        sort_indices(&catalog, &mut by_cites, SortMode::CitedDesc);
        assert_eq!(by_cites, vec![2, 0]);
    }

    #[test]
    fn empty_quartile_set_excludes_everything() {
        let catalog = scenario_catalog();
        let criteria = Criteria {
            quartiles: BTreeSet::new(),
            ..open()
        };
        assert!(filtered_indices(&catalog, &criteria).is_empty());
    }

    #[test]
    fn records_without_quartile_never_match() {
        let mut records = scenario_records();
        records[1].quartile = None;
        let catalog = Catalog::from_publications(records, false);
        let rows = filtered_indices(&catalog, &open());
        assert_eq!(rows.len(), 2);
        assert!(!rows.contains(&1));
    }

    #[test]
    fn missing_percentile_fails_non_negative_lower_bound() {
        let mut records = scenario_records();
        records[0].percentile_2024 = None;
        let catalog = Catalog::from_publications(records, false);

        let criteria = Criteria {
            percentile_range: Some((50.0, 100.0)),
            ..open()
        };
        let rows = filtered_indices(&catalog, &criteria);
        assert!(!rows.contains(&0));
        assert_eq!(rows.len(), 2);

        // -1 sentinel is inside a range that reaches below zero.
        let criteria = Criteria {
            percentile_range: Some((-5.0, 100.0)),
            ..open()
        };
        assert!(filtered_indices(&catalog, &criteria).contains(&0));
    }

    #[test]
    fn search_is_case_insensitive_over_title_authors_and_source() {
        let catalog = scenario_catalog();
        let by = |q: &str| {
            let criteria = Criteria {
                search: q.to_string(),
                sort: SortMode::TitleAz,
                ..open()
            };
            titles(&catalog, &filtered_indices(&catalog, &criteria))
        };

        assert_eq!(by("THIRD"), vec!["Third paper"]);
        assert_eq!(by("doe a"), vec!["First paper", "Second paper"]);
        assert_eq!(by("b"), vec!["Third paper"]);
        assert_eq!(by("   ").len(), 3);
        assert!(by("nothing like this").is_empty());
    }

    #[test]
    fn author_selection_uses_substring_containment() {
        let catalog = scenario_catalog();
        let criteria = Criteria {
            authors: ["Doe".to_string()].into_iter().collect(),
            ..open()
        };
        assert_eq!(filtered_indices(&catalog, &criteria), vec![1, 0]);

        let criteria = Criteria {
            authors: [" Lee K. ".to_string(), "Smith J.".to_string()]
                .into_iter()
                .collect(),
            ..open()
        };
        assert_eq!(filtered_indices(&catalog, &criteria), vec![0, 2]);
    }

    #[test]
    fn source_selection_is_exact_membership() {
        let catalog = scenario_catalog();
        let criteria = Criteria {
            sources: ["B".to_string()].into_iter().collect(),
            ..open()
        };
        assert_eq!(filtered_indices(&catalog, &criteria), vec![2]);

        let criteria = Criteria {
            sources: ["a".to_string()].into_iter().collect(),
            ..open()
        };
        assert!(filtered_indices(&catalog, &criteria).is_empty());
    }

    #[test]
    fn year_range_excludes_missing_years() {
        let mut records = scenario_records();
        records[2].year = None;
        let catalog = Catalog::from_publications(records, false);

        let criteria = Criteria {
            year_range: Some((2000, 2030)),
            ..open()
        };
        assert_eq!(filtered_indices(&catalog, &criteria), vec![1, 0]);

        // No range at all keeps the undated record, sorted last.
        assert_eq!(filtered_indices(&catalog, &open()), vec![1, 0, 2]);
    }

    #[test]
    fn preset_matches_explicit_range_from_unfiltered_max_year() {
        let mut records = Vec::new();
        for (i, year) in [2008, 2010, 2012, 2014, 2015, 2016, 2018].into_iter().enumerate() {
            records.push(publication(&format!("p{i}"), year, "V", 0, Some(Quartile::Q1), "X"));
        }
        let mut undated = publication("undated", 0, "V", 0, Some(Quartile::Q1), "X");
        undated.year = None;
        records.push(undated);
        let catalog = Catalog::from_publications(records, false);

        for (preset, span) in [(YearPreset::Last5, 4), (YearPreset::Last10, 9)] {
            let with_preset = Criteria {
                year_preset: preset,
                // Ignored while a preset is active.
                year_range: Some((1900, 1901)),
                ..open()
            };
            let explicit = Criteria {
                year_range: Some((2018 - span, 2018)),
                ..open()
            };
            assert_eq!(
                filtered_indices(&catalog, &with_preset),
                filtered_indices(&catalog, &explicit),
                "{preset:?}"
            );
        }

        let last5 = Criteria {
            year_preset: YearPreset::Last5,
            ..open()
        };
        assert_eq!(
            titles(&catalog, &filtered_indices(&catalog, &last5)),
            vec!["p6", "p5", "p4", "p3"]
        );
    }

    #[test]
    fn preset_uses_full_catalog_even_when_other_filters_narrow() {
        let mut records = scenario_records();
        records.push(publication("Older paper", 2016, "C", 1, Some(Quartile::Q1), "Kim H."));
        let catalog = Catalog::from_publications(records, false);
        // The newest year (2021) belongs to a Q2 record, so the window is 2017..=2021
        // even though the newest Q1 record is from 2020.
        let criteria = Criteria {
            year_preset: YearPreset::Last5,
            quartiles: [Quartile::Q1].into_iter().collect(),
            ..open()
        };
        assert_eq!(filtered_indices(&catalog, &criteria), vec![0, 2]);
    }

    #[test]
    fn preset_without_any_years_falls_back_to_range_bound() {
        let mut records = scenario_records();
        for r in &mut records {
            r.year = None;
        }
        let catalog = Catalog::from_publications(records, false);
        let criteria = Criteria {
            year_preset: YearPreset::Last10,
            year_range: Some((2000, 2024)),
            ..open()
        };
        assert!(filtered_indices(&catalog, &criteria).is_empty());
    }

    #[test]
    fn preset_without_years_or_range_uses_current_year() {
        let mut records = scenario_records();
        for r in &mut records {
            r.year = None;
        }
        let catalog = Catalog::from_publications(records, false);
        let criteria = Criteria {
            year_preset: YearPreset::Last5,
            ..open()
        };
        assert_eq!(
            preset_reference_year(&catalog, &criteria),
            chrono::Local::now().year()
        );
        // Missing years count as 0, which is always before the window.
        assert!(filtered_indices(&catalog, &criteria).is_empty());
    }

    #[test]
    fn preset_window_saturates_at_extreme_years() {
        let mut ancient = publication("Ancient", 0, "V", 0, Some(Quartile::Q1), "X");
        ancient.year = Some(i32::MIN + 3);
        let catalog = Catalog::from_publications(vec![ancient], false);
        let criteria = Criteria {
            year_preset: YearPreset::Last10,
            ..open()
        };
        assert_eq!(filtered_indices(&catalog, &criteria), vec![0]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let catalog = scenario_catalog();
        let criteria_set = [
            Criteria::for_catalog(&catalog),
            Criteria {
                quartiles: [Quartile::Q1].into_iter().collect(),
                sort: SortMode::CitedDesc,
                ..open()
            },
            Criteria {
                year_preset: YearPreset::Last5,
                search: "paper".into(),
                sort: SortMode::AuthorZa,
                ..open()
            },
            Criteria {
                authors: ["Doe A.".to_string()].into_iter().collect(),
                percentile_range: Some((50.0, 90.0)),
                ..open()
            },
        ];

        for criteria in &criteria_set {
            let first = filtered_indices(&catalog, criteria);
            let subset: Vec<Publication> = first
                .iter()
                .map(|&i| catalog.publications()[i].clone())
                .collect();
            let sub_catalog = Catalog::from_publications(subset.clone(), false);
            let second = filtered_indices(&sub_catalog, criteria);
            let again: Vec<Publication> = second
                .iter()
                .map(|&i| sub_catalog.publications()[i].clone())
                .collect();
            assert_eq!(again, subset, "{criteria:?}");
        }
    }

    #[test]
    fn sorting_is_stable_for_ties() {
        let records = vec![
            publication("a", 2020, "Same", 3, Some(Quartile::Q1), "Z"),
            publication("b", 2020, "Same", 3, Some(Quartile::Q1), "Z"),
            publication("c", 2020, "Same", 3, Some(Quartile::Q1), "Z"),
        ];
        let catalog = Catalog::from_publications(records, false);
        for mode in SortMode::ALL {
            if mode == SortMode::TitleAz {
                continue;
            }
            let criteria = Criteria { sort: mode, ..open() };
            assert_eq!(filtered_indices(&catalog, &criteria), vec![0, 1, 2], "{mode:?}");
        }

        let same_title = vec![
            publication("Same", 2021, "B", 1, Some(Quartile::Q2), "Lee K."),
            publication("Same", 2019, "A", 9, Some(Quartile::Q1), "Doe A."),
            publication("Same", 2020, "C", 4, Some(Quartile::Q3), "Smith J."),
        ];
        let catalog = Catalog::from_publications(same_title, false);
        let criteria = Criteria {
            sort: SortMode::TitleAz,
            ..open()
        };
        assert_eq!(filtered_indices(&catalog, &criteria), vec![0, 1, 2]);
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let mut records = scenario_records();
        records[0].year = None;
        records[0].percentile_2024 = None;
        let catalog = Catalog::from_publications(records, false);

        let sorted = |mode| filtered_indices(&catalog, &Criteria { sort: mode, ..open() });
        assert_eq!(sorted(SortMode::YearDesc), vec![1, 2, 0]);
        assert_eq!(sorted(SortMode::YearAsc), vec![2, 1, 0]);
        assert_eq!(sorted(SortMode::PercentileDesc), vec![2, 1, 0]);
    }

    #[test]
    fn lexicographic_modes() {
        let catalog = scenario_catalog();
        let sorted = |mode| filtered_indices(&catalog, &Criteria { sort: mode, ..open() });
        assert_eq!(sorted(SortMode::AuthorAz), vec![1, 2, 0]);
        assert_eq!(sorted(SortMode::AuthorZa), vec![0, 2, 1]);
        assert_eq!(sorted(SortMode::SourceAz), vec![0, 1, 2]);
        assert_eq!(sorted(SortMode::SourceZa), vec![2, 0, 1]);
        assert_eq!(sorted(SortMode::TitleAz), vec![0, 1, 2]);
        assert_eq!(sorted(SortMode::CitedAsc), vec![1, 0, 2]);
    }

    #[test]
    fn dashboard_defaults_hide_rows_without_percentile() {
        let mut records = scenario_records();
        records[1].percentile_2024 = None;
        let catalog = Catalog::from_publications(records, false);
        let criteria = Criteria::for_catalog(&catalog);
        assert_eq!(criteria.year_range, Some((2019, 2021)));
        assert_eq!(filtered_indices(&catalog, &criteria), vec![0, 2]);
    }
}
