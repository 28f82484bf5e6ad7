//! Run configuration.
//!
//! Values are layered: the `SOURCE_URL` environment variable and command-line
//! overrides first, then an optional `pricebase.toml` in the working
//! directory, then built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PipelineError;
use pricebase_core::DEFAULT_SCAN_LIMIT;

/// Environment variable holding the source URL.
pub const SOURCE_URL_ENV: &str = "SOURCE_URL";

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "pricebase.toml";

/// Placeholder left in freshly generated config files. Treated as unset.
pub const URL_PLACEHOLDER: &str = "PUT_XLS_OR_XLSX_URL_HERE";

/// Secondary catalog file names, tried in order.
pub const CATALOG_CANDIDATES: &[&str] = &["products.xlsx", "product.xlsx", "products.xls", "product.xls"];

/// Document listing file names, tried in order.
pub const DOCUMENTS_CSV_CANDIDATES: &[&str] = &["products_files.csv", "products.csv", "product.csv"];

/// Everything a run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Price list location (`.xls` or `.xlsx`).
    pub source_url: Option<String>,
    /// Zero-based sheet index in the downloaded workbook.
    pub sheet_index: usize,
    /// File stem of the temporary download; the extension follows the URL.
    pub temp_basename: String,
    /// Explicit catalog file name, checked before [`CATALOG_CANDIDATES`].
    pub catalog_filename_override: Option<String>,
    /// Directory holding the optional inputs, the download and the output.
    pub work_dir: PathBuf,
    /// Output spreadsheet file name.
    pub output_name: String,
    /// Rows scanned for the header.
    pub header_scan_limit: usize,
    /// Also write `<output stem>.search.json`.
    pub search_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: None,
            sheet_index: 0,
            temp_basename: "_source_download".to_string(),
            catalog_filename_override: None,
            work_dir: PathBuf::from("."),
            output_name: "base.xlsx".to_string(),
            header_scan_limit: DEFAULT_SCAN_LIMIT,
            search_json: false,
        }
    }
}

/// Shape of `pricebase.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub source_url: Option<String>,
    pub sheet_index: Option<usize>,
    pub temp_basename: Option<String>,
    pub catalog_file: Option<String>,
    pub output_name: Option<String>,
    pub header_scan_limit: Option<usize>,
    pub search_json: Option<bool>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source_url: Option<String>,
    pub work_dir: Option<PathBuf>,
    pub sheet_index: Option<usize>,
    pub catalog_file: Option<String>,
    pub output_name: Option<String>,
    pub search_json: bool,
    /// Explicit config file; when unset `pricebase.toml` in the work dir is
    /// used if it exists.
    pub config_file: Option<PathBuf>,
}

/// Treat empty strings and the placeholder as "not set".
fn usable(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != URL_PLACEHOLDER)
}

impl FileConfig {
    /// Parse a config file. A missing file is an error here; callers decide
    /// whether the file is optional.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::config(format!("{}: {e}", path.display())))?;
        Self::parse(&contents)
            .map_err(|e| PipelineError::config(format!("{}: {e}", path.display())))
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

impl Config {
    /// Resolve the configuration using the process environment.
    pub fn resolve(overrides: Overrides) -> Result<Self, PipelineError> {
        let env_url = std::env::var(SOURCE_URL_ENV).ok();
        Self::resolve_with_env(overrides, env_url)
    }

    /// Resolve the configuration with an explicit `SOURCE_URL` value.
    ///
    /// URL priority: environment, then the command line, then the config
    /// file. Other values: command line, then config file, then defaults.
    pub fn resolve_with_env(
        overrides: Overrides,
        env_url: Option<String>,
    ) -> Result<Self, PipelineError> {
        let defaults = Config::default();
        let work_dir = overrides.work_dir.unwrap_or(defaults.work_dir);

        let file = match overrides.config_file {
            Some(path) => FileConfig::load(&path)?,
            None => {
                let implicit = work_dir.join(CONFIG_FILE_NAME);
                if implicit.is_file() {
                    log::debug!("Using config file {}", implicit.display());
                    FileConfig::load(&implicit)?
                } else {
                    FileConfig::default()
                }
            }
        };

        let source_url = usable(env_url)
            .or_else(|| usable(overrides.source_url))
            .or_else(|| usable(file.source_url));

        let header_scan_limit = file.header_scan_limit.unwrap_or(defaults.header_scan_limit);
        if header_scan_limit == 0 {
            return Err(PipelineError::config("header_scan_limit must be at least 1"));
        }

        Ok(Self {
            source_url,
            sheet_index: overrides
                .sheet_index
                .or(file.sheet_index)
                .unwrap_or(defaults.sheet_index),
            temp_basename: file.temp_basename.unwrap_or(defaults.temp_basename),
            catalog_filename_override: overrides.catalog_file.or(file.catalog_file),
            work_dir,
            output_name: overrides
                .output_name
                .or(file.output_name)
                .unwrap_or(defaults.output_name),
            header_scan_limit,
            search_json: overrides.search_json || file.search_json.unwrap_or(false),
        })
    }

    /// Where the output spreadsheet is written.
    pub fn output_path(&self) -> PathBuf {
        self.work_dir.join(&self.output_name)
    }

    /// Where the JSON search base is written: `base.xlsx` → `base.search.json`.
    pub fn search_json_path(&self) -> PathBuf {
        let stem = Path::new(&self.output_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("base");
        self.work_dir.join(format!("{stem}.search.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_dir(dir: &Path) -> Overrides {
        Overrides {
            work_dir: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::resolve_with_env(in_dir(dir.path()), None).unwrap();
        assert_eq!(cfg.source_url, None);
        assert_eq!(cfg.sheet_index, 0);
        assert_eq!(cfg.temp_basename, "_source_download");
        assert_eq!(cfg.output_path(), dir.path().join("base.xlsx"));
        assert_eq!(cfg.search_json_path(), dir.path().join("base.search.json"));
        assert_eq!(cfg.header_scan_limit, 120);
    }

    #[test]
    fn test_environment_url_wins() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            source_url: Some("https://cli/list.xls".into()),
            ..in_dir(dir.path())
        };
        let cfg =
            Config::resolve_with_env(overrides.clone(), Some("https://env/list.xlsx".into()))
                .unwrap();
        assert_eq!(cfg.source_url.as_deref(), Some("https://env/list.xlsx"));

        let cfg = Config::resolve_with_env(overrides, Some("  ".into())).unwrap();
        assert_eq!(cfg.source_url.as_deref(), Some("https://cli/list.xls"));
    }

    #[test]
    fn test_file_values_fill_gaps() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
source_url = "https://file/list.xls"
sheet_index = 2
catalog_file = "catalog.xlsx"
output_name = "out.xlsx"
search_json = true
unknown_key = 1
"#,
        )
        .unwrap();

        let overrides = Overrides {
            sheet_index: Some(1),
            ..in_dir(dir.path())
        };
        let cfg = Config::resolve_with_env(overrides, None).unwrap();
        assert_eq!(cfg.source_url.as_deref(), Some("https://file/list.xls"));
        assert_eq!(cfg.sheet_index, 1);
        assert_eq!(cfg.catalog_filename_override.as_deref(), Some("catalog.xlsx"));
        assert_eq!(cfg.search_json_path(), dir.path().join("out.search.json"));
        assert!(cfg.search_json);
    }

    #[test]
    fn test_placeholder_is_unset() {
        let dir = tempfile::tempdir().unwrap();
        let cfg =
            Config::resolve_with_env(in_dir(dir.path()), Some(URL_PLACEHOLDER.into())).unwrap();
        assert_eq!(cfg.source_url, None);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "sheet_index = \"two\"").unwrap();
        let err = Config::resolve_with_env(in_dir(dir.path()), None).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }
}
