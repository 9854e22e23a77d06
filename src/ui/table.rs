use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::chart::{bubble_series, bubble_x_bound, capacity_series};
use crate::data::filter::{selected_indices, Selection};
use crate::data::table::{cycle_life_line, doi_url, SummaryRow, SUMMARY_HEADERS};
use crate::state::AppState;
use crate::ui::plot;

const DOI_COLUMN: usize = 6;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the central panel for the current selection.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a spreadsheet to view anode data  (File → Open…)");
        });
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match &state.selection {
            Selection::All => all_materials(ui, state),
            Selection::Material(label) => material_details(ui, state, label),
        });
}

// ---------------------------------------------------------------------------
// "All" view: summary table + aggregate charts
// ---------------------------------------------------------------------------

fn all_materials(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let color_map = state.color_map.as_ref();

    ui.heading("All Anode Materials Performance Data");
    if dataset.is_empty() {
        ui.label("No rows with a usable title were found in this source.");
        return;
    }
    summary_table(ui, &state.summary);
    ui.add_space(12.0);

    let series = capacity_series(dataset, &Selection::All);
    ui.heading("Aggregate Specific Capacity vs. Current Density");
    plot::capacity_plot(ui, "capacity_all", &series, color_map);
    ui.add_space(12.0);

    let bubbles = bubble_series(dataset);
    ui.heading("Aggregate Cycle Life Performance Data (Bubble Size = Cycle Number)");
    plot::bubble_plot(ui, "cycle_bubbles", &bubbles, bubble_x_bound(&series, &bubbles), color_map);
}

/// The flattened per-record table.
pub fn summary_table(ui: &mut Ui, rows: &[SummaryRow]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(90.0).clip(true), SUMMARY_HEADERS.len())
        .max_scroll_height(320.0)
        .header(22.0, |mut header| {
            for title in SUMMARY_HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                for (i, cell) in r.cells().into_iter().enumerate() {
                    row.col(|ui| {
                        if i == DOI_COLUMN && !cell.is_empty() {
                            ui.hyperlink_to(cell, doi_url(cell));
                        } else {
                            ui.label(cell);
                        }
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Single-material view
// ---------------------------------------------------------------------------

fn material_details(ui: &mut Ui, state: &AppState, label: &str) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let Some(record) = selected_indices(dataset, &state.selection)
        .first()
        .map(|&i| &dataset.records[i])
    else {
        ui.label("No data available for this selection.");
        return;
    };

    ui.heading(format!("Performance Analysis for {label}"));
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("DOI:");
        match record.record.doi.as_deref() {
            Some(doi) if !doi.trim().is_empty() => {
                ui.hyperlink_to(doi, doi_url(doi));
            }
            _ => {
                ui.label("N/A");
            }
        }
    });
    ui.add_space(8.0);

    let series = capacity_series(dataset, &state.selection);
    if series.is_empty() {
        ui.label("No specific capacity data available for this anode material.");
    } else {
        ui.heading("Specific Capacity vs. Current Density");
        plot::capacity_plot(ui, "capacity_material", &series, state.color_map.as_ref());
    }
    ui.add_space(12.0);

    ui.heading("Cycle Life Data");
    if record.cycle_life.is_empty() {
        ui.label("No cycle life data available for this anode material.");
    } else {
        ui.label("Cycle-specific Capacity and Current Density data:");
        for point in &record.cycle_life {
            ui.label(cycle_life_line(point));
        }
    }
}
