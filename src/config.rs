use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::data::aggregate::TOP_N;
use crate::data::filter::SortMode;

/// Settings file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "scopus-lens.json";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Parser)]
#[command(name = "scopus-lens", version, about = "Browse and export a Scopus publication list")]
pub struct Cli {
    /// Spreadsheet (.xlsx) or CSV export to load
    #[arg(long, env = "SCOPUS_LENS_DATA")]
    pub data: Option<PathBuf>,

    /// Worksheet holding the publications
    #[arg(long)]
    pub sheet: Option<String>,

    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Default directory for exported files
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_path: PathBuf,
    pub sheet: String,
    /// Rows per table page.
    pub page_size: usize,
    /// Groups shown in the venue / author charts.
    pub top_n: usize,
    pub export_dir: Option<PathBuf>,
    /// Sort order used at startup and after a reset.
    pub default_sort: SortMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/zhubanov_scopus_issn.xlsx"),
            sheet: "ARTICLE".to_string(),
            page_size: 20,
            top_n: TOP_N,
            export_dir: None,
            default_sort: SortMode::YearDesc,
        }
    }
}

impl Settings {
    /// Read a JSON settings file. Absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        Ok(settings.sanitized())
    }

    /// Settings file (explicit, or the default one if present) overlaid with CLI flags.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        if let Some(data) = &cli.data {
            settings.data_path = data.clone();
        }
        if let Some(sheet) = &cli.sheet {
            settings.sheet = sheet.clone();
        }
        if let Some(dir) = &cli.export_dir {
            settings.export_dir = Some(dir.clone());
        }
        log::debug!("Effective settings: {settings:?}");
        Ok(settings)
    }

    fn sanitized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self.top_n = self.top_n.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "sheet": "Publications", "page_size": 0 }"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.sheet, "Publications");
        assert_eq!(settings.page_size, 1);
        assert_eq!(settings.top_n, TOP_N);
        assert_eq!(settings.data_path, Settings::default().data_path);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing settings file"));
    }

    #[test]
    fn cli_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "sheet": "FromFile", "top_n": 5, "default_sort": "CitedDesc" }"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "scopus-lens",
            "--config",
            path.to_str().unwrap(),
            "--data",
            "other.csv",
            "--sheet",
            "FromCli",
        ]);
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.data_path, PathBuf::from("other.csv"));
        assert_eq!(settings.sheet, "FromCli");
        assert_eq!(settings.top_n, 5);
        assert_eq!(settings.default_sort, SortMode::CitedDesc);
        assert_eq!(settings.export_dir, None);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/definitely/not/here.json")),
            ..Cli::default()
        };
        assert!(Settings::resolve(&cli).is_err());
    }
}
