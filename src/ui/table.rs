use std::sync::Arc;

use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::quartile_color;
use crate::state::AppState;
use crate::ui::{or_dash, percentile_text, year_text};

const HEADERS: [&str; 10] = [
    "№",
    "Authors",
    "Title",
    "Year",
    "Source",
    "Quartile",
    "Percentile 2024",
    "Citations",
    "DOI",
    "Scopus",
];

/// Paged results table (central panel, `View::Table`).
pub fn results_table(ui: &mut Ui, state: &mut AppState) {
    ui.heading(format!("Results — {}", state.visible.len()));
    pager(ui, state);
    ui.separator();

    let catalog = Arc::clone(&state.catalog);
    let rows: Vec<(usize, usize)> = state.page_rows().collect();
    let line_height = ui.text_style_height(&egui::TextStyle::Body);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Min))
        .column(Column::auto().at_least(30.0)) // №
        .column(Column::initial(180.0).at_least(100.0)) // Authors
        .column(Column::initial(320.0).at_least(120.0)) // Title
        .column(Column::auto().at_least(40.0)) // Year
        .column(Column::initial(200.0).at_least(100.0)) // Source
        .column(Column::auto().at_least(40.0)) // Quartile
        .column(Column::auto().at_least(60.0)) // Percentile
        .column(Column::auto().at_least(60.0)) // Citations
        .column(Column::auto().at_least(40.0)) // DOI
        .column(Column::remainder()) // Scopus
        .min_scrolled_height(0.0)
        .header(24.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (number, idx) in rows {
                let Some(p) = catalog.get(idx) else {
                    continue;
                };
                let authors = p.authors_display();
                let lines = authors.lines().count().max(1) as f32;

                body.row(lines * line_height + 8.0, |mut row| {
                    row.col(|ui| {
                        ui.label(number.to_string());
                    });
                    row.col(|ui| {
                        ui.label(or_dash(&authors));
                    });
                    row.col(|ui| {
                        ui.add(egui::Label::new(or_dash(&p.title)).wrap());
                    });
                    row.col(|ui| {
                        ui.label(year_text(p.year));
                    });
                    row.col(|ui| {
                        ui.add(egui::Label::new(or_dash(&p.source)).wrap());
                    });
                    row.col(|ui| {
                        let text = p.quartile.map_or("—", |q| q.as_str());
                        ui.label(RichText::new(text).color(quartile_color(p.quartile)).strong());
                    });
                    row.col(|ui| {
                        ui.label(percentile_text(p.percentile_2024));
                    });
                    row.col(|ui| {
                        ui.label(p.cited_by.to_string());
                    });
                    row.col(|ui| {
                        if let Some(link) = p.doi_link() {
                            ui.hyperlink_to("DOI", link);
                        }
                    });
                    row.col(|ui| {
                        if let Some(url) = &p.url {
                            ui.hyperlink_to("Scopus", url);
                        }
                    });
                });
            }
        });
}

fn pager(ui: &mut Ui, state: &mut AppState) {
    let pages = state.page_count();
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(state.page > 0, egui::Button::new("◀"))
            .clicked()
        {
            state.page -= 1;
        }
        ui.label(format!("Page {} / {pages}", state.page + 1));
        if ui
            .add_enabled(state.page + 1 < pages, egui::Button::new("▶"))
            .clicked()
        {
            state.page += 1;
        }
    });
}
