use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Optional override file, looked up in the working directory.
pub const CONFIG_FILE: &str = "tin_dashboard.json";

/// Where the dashboard reads its literature table from at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub sheet: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Scopus search break down.xlsx"),
            sheet: "Masterdoc".to_string(),
        }
    }
}

impl SourceConfig {
    /// Read a JSON config file. Missing keys fall back to the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// [`CONFIG_FILE`] if present and valid, otherwise the defaults.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(cfg) => {
                log::info!("Using source {} (sheet '{}')", cfg.path.display(), cfg.sheet);
                cfg
            }
            Err(e) => {
                log::error!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_default_sheet() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"path": "data/anodes.csv"}}"#).unwrap();
        file.flush().unwrap();

        let cfg = SourceConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.path, PathBuf::from("data/anodes.csv"));
        assert_eq!(cfg.sheet, "Masterdoc");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        file.flush().unwrap();
        assert!(SourceConfig::from_file(file.path()).is_err());
    }
}
