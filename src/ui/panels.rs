use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{selection_options, Selection};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – material selector
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Select Anode Type");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let options = selection_options(dataset);
    let mut picked: Option<Selection> = None;

    egui::ComboBox::from_id_salt("anode_type")
        .selected_text(state.selection.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &options {
                if ui
                    .selectable_label(state.selection == *opt, opt.to_string())
                    .clicked()
                {
                    picked = Some(opt.clone());
                }
            }
        });
    ui.separator();

    // Quick-pick list with colour swatches, same entries as the combo box.
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for opt in &options {
                let mut text = RichText::new(opt.to_string());
                if let (Selection::Material(label), Some(cm)) = (opt, &state.color_map) {
                    text = text.color(cm.color_for(label));
                }
                if ui.selectable_label(state.selection == *opt, text).clicked() {
                    picked = Some(opt.clone());
                }
            }
        });

    if let Some(sel) = picked {
        log::debug!("selected {sel}");
        state.select(sel);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        if !state.sheet_names.is_empty() {
            ui.separator();
            let mut picked: Option<String> = None;
            egui::ComboBox::from_id_salt("sheet")
                .selected_text(format!("Sheet: {}", state.config.sheet))
                .show_ui(ui, |ui: &mut Ui| {
                    for name in &state.sheet_names {
                        if ui
                            .selectable_label(state.config.sheet == *name, name.as_str())
                            .clicked()
                        {
                            picked = Some(name.clone());
                        }
                    }
                });
            if let Some(sheet) = picked {
                state.select_sheet(&sheet);
            }
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            let source = match &ds.source.sheet {
                Some(sheet) => format!("{} [{sheet}]", ds.source.path.display()),
                None => ds.source.path.display().to_string(),
            };
            ui.label(format!(
                "{source}: {} records, {} materials",
                ds.len(),
                ds.labels.len()
            ));
            let unmatched = ds.unmatched_fields();
            if unmatched > 0 {
                ui.separator();
                ui.label(RichText::new(format!("{unmatched} text fields without metrics")).weak())
                    .on_hover_text("Non-empty cells whose text matched no capacity or cycle-life pattern");
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open anode literature data")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Spreadsheets", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        let sheet = state.config.sheet.clone();
        state.load_source(&path, &sheet);
    }
}
