//! Deployment configuration: where the journal lives and what the secret is.
//!
//! Loaded from an optional TOML file, then overridden from the environment:
//!
//! | variable               | overrides              |
//! |------------------------|------------------------|
//! | `TRADELOG_FILE`        | `journal.path`         |
//! | `TRADELOG_SECRET`      | `access.secret`        |
//! | `TRADELOG_SECRET_HASH` | `access.secret_hash`   |
//! | `TRADELOG_SALT`        | `access.salt`          |
//! | `TRADELOG_LOG`         | `logging.level`        |
//!
//! Nothing here is editable at runtime.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::error::JournalError;
use crate::gate::{Gatekeeper, Secret};
use crate::logging::LoggingConfig;
use crate::store::TradeStore;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "tradelog.toml";
pub const DEFAULT_JOURNAL_FILE: &str = "trades.csv";
pub const DEFAULT_SECRET: &str = "trader123";
pub const DEFAULT_CURRENCY: &str = "₹";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub path: PathBuf,
    /// Prefix for money amounts on the dashboard.
    pub currency: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_JOURNAL_FILE),
            currency: DEFAULT_CURRENCY.into(),
        }
    }
}

/// Either `secret`, or `secret_hash` + `salt`. The hash wins when both are set.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub secret: Option<String>,
    pub secret_hash: Option<String>,
    pub salt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub journal: JournalConfig,
    pub access: AccessConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load from an explicit file, or from `tradelog.toml` in the working
    /// directory if present, or fall back to defaults; then apply
    /// environment overrides and validate.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file without overrides or validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Apply `TRADELOG_*` overrides. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get("TRADELOG_FILE") {
            self.journal.path = PathBuf::from(path);
        }
        if let Some(secret) = get("TRADELOG_SECRET") {
            self.access.secret = Some(secret);
        }
        if let Some(hash) = get("TRADELOG_SECRET_HASH") {
            self.access.secret_hash = Some(hash);
        }
        if let Some(salt) = get("TRADELOG_SALT") {
            self.access.salt = Some(salt);
        }
        if let Some(level) = get("TRADELOG_LOG") {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.journal.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "journal.path",
            });
        }
        if matches!(&self.access.secret, Some(s) if s.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "access.secret",
                reason: "must not be empty".into(),
            });
        }
        self.secret().map(|_| ())
    }

    /// The configured secret, defaulting to the built-in one.
    pub fn secret(&self) -> Result<Secret, ConfigError> {
        if let Some(hex) = &self.access.secret_hash {
            let digest =
                blake3::Hash::from_hex(hex.trim()).map_err(|e| ConfigError::InvalidValue {
                    field: "access.secret_hash",
                    reason: e.to_string(),
                })?;
            return Ok(Secret::Hashed {
                salt: self.access.salt.clone().unwrap_or_default(),
                digest,
            });
        }
        let secret = self
            .access
            .secret
            .clone()
            .unwrap_or_else(|| DEFAULT_SECRET.to_string());
        Ok(Secret::Plain(secret))
    }

    pub fn uses_default_secret(&self) -> bool {
        self.access.secret_hash.is_none() && self.access.secret.is_none()
    }

    /// The gate for the configured secret. A secret that fails to parse is
    /// a `JournalError::Config`.
    pub fn gatekeeper(&self) -> Result<Gatekeeper, JournalError> {
        Ok(Gatekeeper::new(self.secret()?))
    }

    pub fn store(&self) -> TradeStore {
        TradeStore::new(&self.journal.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_the_stock_deployment() {
        let config = Config::default();
        assert_eq!(config.journal.path, PathBuf::from("trades.csv"));
        assert_eq!(config.journal.currency, "₹");
        assert!(config.uses_default_secret());
        assert!(config.gatekeeper().unwrap().check_access("trader123"));
    }

    #[test]
    fn parse_partial_toml() {
        let config = Config::parse_toml(
            r#"
            [journal]
            path = "/var/lib/tradelog/trades.csv"

            [access]
            secret = "hunter2"
            "#,
        )
        .unwrap();
        assert_eq!(config.journal.path, PathBuf::from("/var/lib/tradelog/trades.csv"));
        assert_eq!(config.journal.currency, "₹");
        assert_eq!(config.logging.level, "info");
        let gate = config.gatekeeper().unwrap();
        assert!(gate.check_access("hunter2"));
        assert!(!gate.check_access("trader123"));
    }

    #[test]
    fn parse_error_is_reported() {
        assert!(matches!(
            Config::parse_toml("[journal\npath = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = Config::parse_toml("[access]\nsecret = \"from-file\"").unwrap();
        let env: HashMap<&str, &str> = [
            ("TRADELOG_FILE", "journal.csv"),
            ("TRADELOG_SECRET", "from-env"),
            ("TRADELOG_LOG", "debug"),
            ("TRADELOG_SALT", ""),
        ]
        .into_iter()
        .collect();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.journal.path, PathBuf::from("journal.csv"));
        assert_eq!(config.access.secret.as_deref(), Some("from-env"));
        assert_eq!(config.logging.level, "debug");
        assert!(config.access.salt.is_none());
    }

    #[test]
    fn hashed_secret_takes_precedence() {
        let digest = crate::gate::salted_digest("s4lt", "hunter2");
        let mut config = Config::default();
        config.access.secret = Some("plain".into());
        config.access.secret_hash = Some(digest.to_hex().to_string());
        config.access.salt = Some("s4lt".into());

        let gate = config.gatekeeper().unwrap();
        assert!(gate.check_access("hunter2"));
        assert!(!gate.check_access("plain"));
    }

    #[test]
    fn malformed_hash_fails_validation() {
        let mut config = Config::default();
        config.access.secret_hash = Some("not-hex".into());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "access.secret_hash",
                ..
            })
        ));
    }

    #[test]
    fn unvalidated_bad_hash_surfaces_as_config_error() {
        let mut config = Config::default();
        config.access.secret_hash = Some("zz".into());
        let err = config.gatekeeper().unwrap_err();
        assert_eq!(err.label(), "CONFIG");
        assert!(matches!(
            err,
            JournalError::Config(ConfigError::InvalidValue {
                field: "access.secret_hash",
                ..
            })
        ));
    }

    #[test]
    fn empty_values_fail_validation() {
        let mut config = Config::default();
        config.access.secret = Some(String::new());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.journal.path = PathBuf::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::resolve(Some(Path::new("/nonexistent/tradelog.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
