//! User configuration (`config.toml`).
//!
//! A broken or missing config never stops startup: every problem becomes a
//! warning and the affected setting keeps its default.

use directories::ProjectDirs;
use gridcalc_engine::engine::{DEFAULT_COLS, DEFAULT_ROWS};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const GRID_DIM_RANGE: RangeInclusive<usize> = 1..=1000;
const COLUMN_WIDTH_RANGE: RangeInclusive<usize> = 4..=80;
pub const DEFAULT_COLUMN_WIDTH: usize = 18;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    grid: Option<GridSection>,
    keys: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridSection {
    rows: Option<usize>,
    cols: Option<usize>,
    column_width: Option<usize>,
}

/// Settings for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub column_width: usize,
    /// Raw `key combo -> action name` overrides, parsed by the keymap.
    pub keys: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            column_width: DEFAULT_COLUMN_WIDTH,
            keys: BTreeMap::new(),
        }
    }
}

/// Load the config from `config_file`, or from the user config dir.
///
/// Returns the config and any warnings to show before the UI starts.
pub fn load_config(config_file: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut config = Config::default();
    let config_path = config_file.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = config_path else {
        return (config, warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (config, warnings);
    }

    let file = match read_config_file(&path) {
        Ok(file) => file,
        Err(warning) => {
            warnings.push(warning);
            return (config, warnings);
        }
    };

    if let Some(grid) = file.grid {
        if let Some(rows) = grid.rows {
            config.rows = clamp_setting("grid.rows", rows, GRID_DIM_RANGE, &mut warnings);
        }
        if let Some(cols) = grid.cols {
            config.cols = clamp_setting("grid.cols", cols, GRID_DIM_RANGE, &mut warnings);
        }
        if let Some(width) = grid.column_width {
            config.column_width =
                clamp_setting("grid.column_width", width, COLUMN_WIDTH_RANGE, &mut warnings);
        }
    }
    config.keys = file.keys.unwrap_or_default();

    (config, warnings)
}

fn read_config_file(path: &Path) -> Result<ConfigFile, String> {
    let meta = std::fs::metadata(path)
        .map_err(|err| format!("Failed to read metadata for {}: {}", path.display(), err))?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        ));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    toml::from_str(&content).map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn clamp_setting(
    name: &str,
    value: usize,
    range: RangeInclusive<usize>,
    warnings: &mut Vec<String>,
) -> usize {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        warnings.push(format!(
            "{} = {} is outside {}..={}; using {}",
            name,
            value,
            range.start(),
            range.end(),
            clamped
        ));
    }
    clamped
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).expect("write config");
        (dir, path)
    }

    #[test]
    fn load_config_reads_grid_and_keys() {
        let (_dir, path) = write_config(
            r#"
[grid]
rows = 30
cols = 6
column_width = 12

[keys]
"C-s" = "save"
"x" = "edit"
"#,
        );
        let (config, warnings) = load_config(Some(&path));
        assert!(warnings.is_empty(), "{:?}", warnings);
        assert_eq!(config.rows, 30);
        assert_eq!(config.cols, 6);
        assert_eq!(config.column_width, 12);
        assert_eq!(config.keys.get("C-s").map(String::as_str), Some("save"));
        assert_eq!(config.keys.len(), 2);
    }

    #[test]
    fn load_config_partial_keeps_defaults() {
        let (_dir, path) = write_config("[grid]\ncols = 8\n");
        let (config, warnings) = load_config(Some(&path));
        assert!(warnings.is_empty());
        assert_eq!(config.rows, DEFAULT_ROWS);
        assert_eq!(config.cols, 8);
        assert_eq!(config.column_width, DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn load_config_clamps_with_warning() {
        let (_dir, path) = write_config("[grid]\nrows = 0\ncolumn_width = 500\n");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config.rows, 1);
        assert_eq!(config.column_width, 80);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("grid.rows"));
    }

    #[test]
    fn load_config_rejects_unknown_fields() {
        let (_dir, path) = write_config("[grid]\nrows = 5\nextra = 1\n");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert!(warnings.iter().any(|w| w.contains("Failed to parse")));
    }

    #[test]
    fn load_config_rejects_oversized_file() {
        let oversized = "#".repeat(MAX_CONFIG_FILE_BYTES as usize + 1);
        let (_dir, path) = write_config(&oversized);
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert!(
            warnings
                .iter()
                .any(|w| w.contains("file too large") && w.contains("Refusing to read"))
        );
    }

    #[test]
    fn load_config_warns_on_missing_explicit_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope.toml");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert!(warnings[0].starts_with("Config file not found"));
    }
}
