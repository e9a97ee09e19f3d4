use std::collections::BTreeSet;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::quartile_color;
use crate::data::filter::{default_year_range, SortMode, YearPreset};
use crate::data::model::Quartile;
use crate::export::{self, ExportFormat};
use crate::state::{AppState, View};
use crate::ui::or_dash;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let catalog = Arc::clone(&state.catalog);
    let mut apply_now = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Search ----
            let search = ui.add(
                egui::TextEdit::singleline(&mut state.draft.search)
                    .hint_text("Search (author / title / source)")
                    .desired_width(f32::INFINITY),
            );
            if search.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                apply_now = true;
            }
            ui.add_space(6.0);

            // ---- Years ----
            ui.strong("Quick interval");
            for preset in YearPreset::ALL {
                ui.radio_value(&mut state.draft.year_preset, preset, preset.label());
            }
            ui.add_space(4.0);

            ui.strong("Year range");
            let bounds = default_year_range(&catalog);
            let (mut lo, mut hi) = state.draft.year_range.unwrap_or(bounds);
            ui.add_enabled_ui(state.draft.year_preset == YearPreset::All, |ui: &mut Ui| {
                ui.add(egui::Slider::new(&mut lo, bounds.0..=bounds.1).text("from"));
                ui.add(egui::Slider::new(&mut hi, bounds.0..=bounds.1).text("to"));
            });
            state.draft.year_range = Some((lo, hi.max(lo)));
            ui.separator();

            // ---- Sources / authors ----
            pick_list(
                ui,
                "Sources",
                catalog.source_options(),
                &mut state.source_query,
                &mut state.draft.sources,
            );
            pick_list(
                ui,
                "Authors",
                catalog.author_options(),
                &mut state.author_query,
                &mut state.draft.authors,
            );
            ui.separator();

            // ---- Quartile ----
            ui.strong("Quartile");
            ui.horizontal(|ui: &mut Ui| {
                for q in Quartile::ALL {
                    let mut checked = state.draft.quartiles.contains(&q);
                    let text = RichText::new(q.as_str()).color(quartile_color(Some(q)));
                    if ui.checkbox(&mut checked, text).changed() {
                        if checked {
                            state.draft.quartiles.insert(q);
                        } else {
                            state.draft.quartiles.remove(&q);
                        }
                    }
                }
            });
            if state.draft.quartiles.is_empty() {
                ui.label(RichText::new("No quartile selected: nothing will match.").weak());
            }
            ui.add_space(4.0);

            // ---- Percentile ----
            ui.strong("Percentile 2024");
            let (mut p_lo, mut p_hi) = state.draft.percentile_range.unwrap_or((0.0, 100.0));
            ui.add(egui::Slider::new(&mut p_lo, 0.0..=100.0).step_by(1.0).text("from"));
            ui.add(egui::Slider::new(&mut p_hi, 0.0..=100.0).step_by(1.0).text("to"));
            state.draft.percentile_range = Some((p_lo, p_hi.max(p_lo)));
            ui.separator();

            // ---- Sorting ----
            ui.strong("Sort by");
            egui::ComboBox::from_id_salt("sort_by")
                .selected_text(state.draft.sort.label())
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for mode in SortMode::ALL {
                        ui.selectable_value(&mut state.draft.sort, mode, mode.label());
                    }
                });
            ui.add_space(8.0);

            // ---- Actions ----
            let apply_text = if state.has_pending_changes() {
                RichText::new("Apply / Refresh ●").strong()
            } else {
                RichText::new("Apply / Refresh")
            };
            ui.horizontal(|ui: &mut Ui| {
                if ui.button(apply_text).clicked() {
                    apply_now = true;
                }
                if ui.button("Reset").clicked() {
                    state.reset();
                }
            });
            ui.add_space(4.0);
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Export CSV").clicked() {
                    export_dialog(state, ExportFormat::Csv);
                }
                if ui.button("Export Excel").clicked() {
                    export_dialog(state, ExportFormat::Xlsx);
                }
            });
        });

    if apply_now {
        state.apply();
    }
}

/// Checkbox list over `(name, count)` options with a narrowing text box.
fn pick_list(
    ui: &mut Ui,
    title: &str,
    options: &[(String, usize)],
    query: &mut String,
    selected: &mut BTreeSet<String>,
) {
    let header = format!("{title}  ({}/{})", selected.len(), options.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.add(
                    egui::TextEdit::singleline(query)
                        .hint_text("Narrow list")
                        .desired_width(140.0),
                );
                if ui.small_button("Clear").clicked() {
                    selected.clear();
                }
            });

            let needle = query.trim().to_lowercase();
            ScrollArea::vertical()
                .id_salt(title)
                .max_height(180.0)
                .show(ui, |ui: &mut Ui| {
                    for (name, count) in options {
                        if !needle.is_empty() && !name.to_lowercase().contains(&needle) {
                            continue;
                        }
                        let mut checked = selected.contains(name);
                        let label = format!("{} ({count})", or_dash(name));
                        if ui.checkbox(&mut checked, label).changed() {
                            if checked {
                                selected.insert(name.clone());
                            } else {
                                selected.remove(name);
                            }
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / view switcher.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export CSV…").clicked() {
                export_dialog(state, ExportFormat::Csv);
                ui.close_menu();
            }
            if ui.button("Export Excel…").clicked() {
                export_dialog(state, ExportFormat::Xlsx);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        for view in View::ALL {
            ui.selectable_value(&mut state.view, view, view.label());
        }

        ui.separator();

        ui.label(format!(
            "{} publications loaded, {} visible",
            state.catalog.len(),
            state.visible.len()
        ));

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::DARK_GREEN
            };
            ui.separator();
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState, format: ExportFormat) {
    let file_name = export::export_file_name(format, chrono::Local::now().naive_local());
    let mut dialog = rfd::FileDialog::new()
        .set_title("Export results")
        .set_file_name(&file_name);
    dialog = match format {
        ExportFormat::Csv => dialog.add_filter("CSV", &["csv"]),
        ExportFormat::Xlsx => dialog.add_filter("Excel", &["xlsx"]),
    };
    if let Some(dir) = &state.settings.export_dir {
        dialog = dialog.set_directory(dir);
    }

    if let Some(path) = dialog.save_file() {
        state.export_to(path, format);
    }
}
