//! Service settings loaded from TOML.
//!
//! Defaults are embedded via `include_str!("default_settings.toml")` and
//! validated field by field on parse. The parsed value is loaded once at
//! startup and passed explicitly to whatever needs it; there is no
//! process-global settings state.

use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub store: StoreSettings,
    pub suggest: SuggestSettings,
    pub session: SessionSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestSettings {
    pub threshold: f64,
    pub limit: usize,
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub page_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

impl Settings {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self, SettingsError> {
        let s: Settings =
            toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
        validate(&s)?;
        Ok(s)
    }

    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The embedded defaults. The build script and a test both verify the
    /// embedded document, so parsing it cannot fail in a shipped binary.
    pub fn embedded_defaults() -> Self {
        Self::from_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::embedded_defaults()
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.store.path.as_os_str().is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "store.path".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&s.suggest.threshold) {
        return Err(SettingsError::InvalidValue {
            field: "suggest.threshold".to_string(),
            reason: "must be between 0.0 and 1.0".to_string(),
        });
    }
    if s.suggest.limit == 0 {
        return Err(SettingsError::InvalidValue {
            field: "suggest.limit".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if s.session.page_size == 0 {
        return Err(SettingsError::InvalidValue {
            field: "session.page_size".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = Settings::from_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.store.path, PathBuf::from("data/translations.csv"));
        assert!((s.suggest.threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(s.suggest.limit, 5);
        assert_eq!(s.suggest.debounce_ms, 300);
        assert_eq!(s.session.page_size, 10);
        assert_eq!(s.server.addr, "127.0.0.1:8787".parse().unwrap());
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[store]
path = "/var/lib/fanyi/translations.csv"

[suggest]
threshold = 0.4
limit = 8
debounce_ms = 0

[session]
page_size = 25

[server]
addr = "0.0.0.0:9000"
"#;
        let s = Settings::from_toml(toml).unwrap();
        assert_eq!(s.suggest.limit, 8);
        assert_eq!(s.suggest.debounce_ms, 0);
        assert_eq!(s.session.page_size, 25);
    }

    #[test]
    fn error_threshold_out_of_range() {
        let toml = r#"
[store]
path = "data/translations.csv"

[suggest]
threshold = 1.5
limit = 5
debounce_ms = 300

[session]
page_size = 10

[server]
addr = "127.0.0.1:8787"
"#;
        let err = Settings::from_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("suggest.threshold"));
    }

    #[test]
    fn error_zero_limit() {
        let toml = r#"
[store]
path = "data/translations.csv"

[suggest]
threshold = 0.5
limit = 0
debounce_ms = 300

[session]
page_size = 10

[server]
addr = "127.0.0.1:8787"
"#;
        let err = Settings::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("suggest.limit"));
    }

    #[test]
    fn error_zero_page_size() {
        let toml = r#"
[store]
path = "data/translations.csv"

[suggest]
threshold = 0.5
limit = 5
debounce_ms = 300

[session]
page_size = 0

[server]
addr = "127.0.0.1:8787"
"#;
        let err = Settings::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("session.page_size"));
    }

    #[test]
    fn error_empty_store_path() {
        let toml = r#"
[store]
path = ""

[suggest]
threshold = 0.5
limit = 5
debounce_ms = 300

[session]
page_size = 10

[server]
addr = "127.0.0.1:8787"
"#;
        let err = Settings::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("store.path"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = Settings::from_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let err = Settings::from_toml("[store]\npath = \"x.csv\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
