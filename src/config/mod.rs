mod settings;

pub use settings::{Business, Config, PrintSettings, ReceiptSettings, StatementSettings};

use crate::error::{Result, StatementError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, else ~/.statement/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "statement") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        StatementError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".statement"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the configured output dir; relative paths live under the config dir
pub fn resolve_output_dir(output_dir: &str, config_dir: &Path) -> PathBuf {
    let path = expand_path(output_dir);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}

/// Default location of the service history export
pub fn default_records_path(config_dir: &Path) -> PathBuf {
    config_dir.join("history.json")
}

/// Load config.toml. A missing file yields the built-in defaults.
pub fn load_config(config_dir: &Path) -> Result<Config> {
    if !config_dir.exists() {
        return Err(StatementError::ConfigNotFound(config_dir.to_path_buf()));
    }
    let path = config_dir.join("config.toml");
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config.toml, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| StatementError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[business]
name = "Your Business Name"
address = "1-2-3 Example-cho, Chiyoda-ku, Tokyo"
phone = "03-0000-0000"

[statement]
title = "御請求書"
currency_symbol = "¥"
bank_notice = [
  "お振込先",
  "○○銀行 ○○支店 普通 0000000",
  "振込手数料はご負担くださいますようお願い申し上げます。",
]

[receipt]
title = "領収書"
honorific = "様"
item_format = "但し {menu}代として"   # {menu} is replaced with the service
attestation = "上記正に領収いたしました"

[print]
delay_ms = 150          # pause between switching template and printing
output_dir = "output"   # relative to this directory, or absolute / ~/...
"#;

/// Template content for history.json
pub const HISTORY_TEMPLATE: &str = "[]\n";
