// ⚙️ Settings - Presentation and runtime configuration
//
// Resolution order: defaults → TOML file → environment.

use crate::format::check_date_format;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "expense-tracker.toml";
pub const CONFIG_PATH_ENV: &str = "EXPENSE_TRACKER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Prefix for every rendered amount
    pub currency_symbol: String,
    /// chrono format string for rendered dates
    pub date_format: String,
    /// Address the web server binds to
    pub server_bind: String,
    /// tracing EnvFilter directive
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
            date_format: "%d %b %Y".into(),
            server_bind: "127.0.0.1:3000".into(),
            log_filter: "info".into(),
        }
    }
}

/// Keys accepted in the TOML file; all optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    currency_symbol: Option<String>,
    date_format: Option<String>,
    server_bind: Option<String>,
    log_filter: Option<String>,
}

impl Settings {
    fn apply_file(&mut self, file: FileSettings) {
        if let Some(v) = file.currency_symbol {
            self.currency_symbol = v;
        }
        if let Some(v) = file.date_format {
            self.date_format = v;
        }
        if let Some(v) = file.server_bind {
            self.server_bind = v;
        }
        if let Some(v) = file.log_filter {
            self.log_filter = v;
        }
    }

    fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("EXPENSE_TRACKER__CURRENCY_SYMBOL") {
            self.currency_symbol = v;
        }
        if let Some(v) = var("EXPENSE_TRACKER__DATE_FORMAT") {
            self.date_format = v;
        }
        if let Some(v) = var("EXPENSE_TRACKER__SERVER_BIND") {
            self.server_bind = v;
        }
        if let Some(v) = var("RUST_LOG") {
            self.log_filter = v;
        }
    }
}

/// Load settings from the config file (if any) and the process environment
pub fn load_settings() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

    load_settings_from(&path, |key| std::env::var(key).ok())
}

fn load_settings_from<F>(path: &Path, var: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let file: FileSettings = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        settings.apply_file(file);
    }

    settings.apply_env(var);

    check_date_format(&settings.date_format)?;
    Ok(settings)
}

// ============================================================================
// TESTS
// ============================================================================
