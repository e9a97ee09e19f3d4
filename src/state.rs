use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::data::aggregate::{by_author, by_venue, GroupStat};
use crate::data::filter::{filtered_indices, Criteria};
use crate::data::model::Catalog;
use crate::export::{self, ExportFormat};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which view the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Table,
    Cards,
    TopVenues,
    TopAuthors,
}

impl View {
    pub const ALL: [View; 4] = [View::Table, View::Cards, View::TopVenues, View::TopAuthors];

    pub fn label(self) -> &'static str {
        match self {
            View::Table => "Table",
            View::Cards => "Cards",
            View::TopVenues => "Top sources",
            View::TopAuthors => "Top authors",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub catalog: Arc<Catalog>,

    pub settings: Settings,

    /// Criteria being edited in the side panel.
    pub draft: Criteria,

    /// Criteria behind the current results.
    pub applied: Criteria,

    /// Indices of publications passing `applied`, in display order (cached).
    pub visible: Vec<usize>,

    /// Venue and author aggregates of `visible` (cached).
    pub venues: Vec<GroupStat>,
    pub authors: Vec<GroupStat>,

    pub view: View,

    /// Zero-based page of the table view.
    pub page: usize,

    /// Text narrowing the venue / author pick lists in the side panel.
    pub source_query: String,
    pub author_query: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and run the initial query with default criteria.
    pub fn new(catalog: Arc<Catalog>, settings: Settings) -> Self {
        let criteria = Criteria {
            sort: settings.default_sort,
            ..Criteria::for_catalog(&catalog)
        };
        let mut state = Self {
            catalog,
            settings,
            draft: criteria.clone(),
            applied: criteria,
            visible: Vec::new(),
            venues: Vec::new(),
            authors: Vec::new(),
            view: View::default(),
            page: 0,
            source_query: String::new(),
            author_query: String::new(),
            status_message: None,
        };
        state.refresh();
        state
    }

    /// Commit the draft criteria and recompute results.
    pub fn apply(&mut self) {
        self.applied = self.draft.clone();
        self.refresh();
        log::info!(
            "Applied filters: {} of {} publications visible",
            self.visible.len(),
            self.catalog.len()
        );
    }

    /// Restore default criteria and recompute.
    pub fn reset(&mut self) {
        self.draft = Criteria {
            sort: self.settings.default_sort,
            ..Criteria::for_catalog(&self.catalog)
        };
        self.apply();
    }

    /// Whether the side panel holds edits not yet applied.
    pub fn has_pending_changes(&self) -> bool {
        self.draft != self.applied
    }

    fn refresh(&mut self) {
        self.visible = filtered_indices(&self.catalog, &self.applied);
        self.venues = by_venue(&self.catalog, &self.visible);
        self.authors = by_author(&self.catalog, &self.visible);
        self.page = 0;
    }

    pub fn page_count(&self) -> usize {
        self.visible.len().div_ceil(self.settings.page_size).max(1)
    }

    /// Visible indices on the current page with their 1-based display numbers.
    pub fn page_rows(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let start = self.page * self.settings.page_size;
        self.visible
            .iter()
            .copied()
            .enumerate()
            .skip(start)
            .take(self.settings.page_size)
            .map(|(pos, idx)| (pos + 1, idx))
    }

    /// Write the current results to `path` and report the outcome in the status line.
    pub fn export_to(&mut self, path: PathBuf, format: ExportFormat) {
        match export::write_export(&path, format, &self.catalog, &self.visible) {
            Ok(n) => {
                self.status_message = Some(format!("Exported {n} rows to {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
