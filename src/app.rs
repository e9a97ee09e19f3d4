use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{cards, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ScopusLensApp {
    pub state: AppState,
}

impl ScopusLensApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ScopusLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and view switcher ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let top_n = self.state.settings.top_n;
            match self.state.view {
                View::Table => table::results_table(ui, &mut self.state),
                View::Cards => cards::card_list(ui, &self.state),
                View::TopVenues => {
                    plot::ranking_view(ui, "Top sources", "Source", &self.state.venues, top_n);
                }
                View::TopAuthors => {
                    plot::ranking_view(ui, "Top authors", "Author", &self.state.authors, top_n);
                }
            }
        });
    }
}
