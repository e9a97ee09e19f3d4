use eframe::egui::{self, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::ranked_palette;
use crate::data::aggregate::{top_n, GroupStat};
use crate::ui::or_dash;

// ---------------------------------------------------------------------------
// Top-N ranking (central panel, venue / author views)
// ---------------------------------------------------------------------------

/// Horizontal bar chart of the top groups by publication count plus a summary table.
pub fn ranking_view(ui: &mut Ui, heading: &str, key_header: &str, stats: &[GroupStat], n: usize) {
    ui.heading(heading);

    let top = top_n(stats, n);
    if top.is_empty() {
        ui.label("No publications match the current filters.");
        return;
    }

    let labels: Vec<String> = top.iter().map(|s| or_dash(&s.key).to_string()).collect();
    let colors = ranked_palette(top.len());
    let count = top.len();

    // Largest group at the top of the chart.
    let bars: Vec<Bar> = top
        .iter()
        .zip(&colors)
        .enumerate()
        .map(|(i, (stat, color))| {
            Bar::new((count - 1 - i) as f64, stat.count as f64)
                .name(&labels[i])
                .fill(*color)
        })
        .collect();
    let chart = BarChart::new(bars).horizontal().name("Publications");

    let axis_labels = labels.clone();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            Plot::new(("ranking_plot", heading))
                .height(28.0 * count as f32 + 60.0)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .x_axis_label("Publications")
                .y_axis_formatter(move |mark, _range| {
                    let v = mark.value;
                    if v < 0.0 || v.fract() != 0.0 {
                        return String::new();
                    }
                    let rank = v as usize;
                    if rank < count {
                        axis_labels[count - 1 - rank].clone()
                    } else {
                        String::new()
                    }
                })
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(chart);
                });

            ui.add_space(8.0);
            ui.strong("Table");
            egui::Grid::new(("ranking_table", heading))
                .striped(true)
                .num_columns(3)
                .spacing([24.0, 4.0])
                .show(ui, |ui: &mut Ui| {
                    ui.strong(key_header);
                    ui.strong("Publications");
                    ui.strong("Citations");
                    ui.end_row();
                    for (label, stat) in labels.iter().zip(top) {
                        ui.label(label);
                        ui.label(stat.count.to_string());
                        ui.label(stat.cite_sum.to_string());
                        ui.end_row();
                    }
                });
        });
}
