use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::color::quartile_color;
use crate::data::model::Publication;
use crate::state::AppState;
use crate::ui::{or_dash, percentile_text, year_text};

/// Scopus-style list: one card per visible publication.
pub fn card_list(ui: &mut Ui, state: &AppState) {
    if state.visible.is_empty() {
        ui.label("No publications match the current filters.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (pos, &idx) in state.visible.iter().enumerate() {
                if let Some(p) = state.catalog.get(idx) {
                    card(ui, pos + 1, p);
                }
            }
        });
}

fn card(ui: &mut Ui, number: usize, p: &Publication) {
    let title = if p.title.trim().is_empty() {
        "Untitled"
    } else {
        p.title.as_str()
    };
    ui.add_space(4.0);
    ui.label(RichText::new(format!("{number}. {title}")).heading());
    ui.label(RichText::new(format!("Authors:\n{}", or_dash(&p.authors_display()))).monospace());

    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label(format!("Source: {}", or_dash(&p.source)));
        ui.add_space(12.0);
        ui.label(format!("Year: {}", year_text(p.year)));
        ui.add_space(12.0);
        let quartile = p.quartile.map_or("—", |q| q.as_str());
        ui.label(RichText::new(format!("Quartile: {quartile}")).color(quartile_color(p.quartile)));
        ui.add_space(12.0);
        ui.label(format!("Percentile: {}", percentile_text(p.percentile_2024)));
    });
    ui.label(format!("Citations: {}", p.cited_by));

    ui.horizontal(|ui: &mut Ui| {
        if let Some(url) = &p.url {
            ui.hyperlink_to("Scopus", url);
        }
        if let Some(link) = p.doi_link() {
            ui.hyperlink_to("DOI", link);
        }
    });
    ui.add(egui::Separator::default().spacing(12.0));
}
