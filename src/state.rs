use std::path::Path;

use crate::color::ColorMap;
use crate::config::SourceConfig;
use crate::data::filter::{revalidate, Selection};
use crate::data::loader;
use crate::data::model::AnodeDataset;
use crate::data::table::{summary_rows, SummaryRow};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Startup source; updated when the user opens another file or sheet.
    pub config: SourceConfig,

    /// Loaded dataset (None until a source loads successfully).
    pub dataset: Option<AnodeDataset>,

    /// "All" or one material.
    pub selection: Selection,

    /// Flattened table rows for the "All" view (cached per dataset).
    pub summary: Vec<SummaryRow>,

    /// Label colours.
    pub color_map: Option<ColorMap>,

    /// Sheets of the current workbook; empty for single-table formats.
    pub sheet_names: Vec<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            dataset: None,
            selection: Selection::All,
            summary: Vec::new(),
            color_map: None,
            sheet_names: Vec::new(),
            status_message: None,
        }
    }

    /// Load the configured source if it exists; otherwise wait for File → Open.
    pub fn load_configured(&mut self) {
        if self.config.path.exists() {
            let cfg = self.config.clone();
            self.load_source(&cfg.path, &cfg.sheet);
        } else {
            log::info!(
                "Configured source {} not found; waiting for a file to be opened",
                self.config.path.display()
            );
        }
    }

    /// Load `path` (and `sheet` for workbooks). On failure the previous
    /// dataset stays in place and the error is shown in the status bar.
    pub fn load_source(&mut self, path: &Path, sheet: &str) {
        match loader::load_file(path, sheet) {
            Ok(dataset) => {
                self.config.path = path.to_path_buf();
                self.config.sheet = sheet.to_string();
                self.sheet_names = match loader::sheet_names(path) {
                    Ok(names) => names,
                    Err(e) => {
                        log::warn!("Could not list sheets: {e:#}");
                        Vec::new()
                    }
                };
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Switch to another sheet of the current workbook.
    pub fn select_sheet(&mut self, sheet: &str) {
        if sheet == self.config.sheet {
            return;
        }
        let path = self.config.path.clone();
        self.load_source(&path, sheet);
    }

    /// Ingest a newly loaded dataset, rebuild colours and the summary table.
    pub fn set_dataset(&mut self, dataset: AnodeDataset) {
        self.summary = summary_rows(&dataset);
        self.color_map = Some(ColorMap::new(&dataset.labels));
        self.selection = revalidate(&dataset, std::mem::take(&mut self.selection));
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = selection;
    }
}
