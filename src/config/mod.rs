//! Application configuration
//!
//! Three-layer merge, highest layer wins:
//! 1. Built-in defaults
//! 2. Config file (`.clinicdesk/config.toml`, or `--config <path>`)
//! 3. CLI flags

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use clinicdesk_status::{ActorRole, StatusError};

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".clinicdesk/config.toml";

/// Errors for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file names a role outside the known set.
    #[error(transparent)]
    Status(#[from] StatusError),
}

/// Effective application configuration after the merge.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Role assumed when a command is run without `--role`.
    /// None means unauthenticated, which is denied every transition.
    pub default_role: Option<ActorRole>,

    /// Emit JSON instead of human-readable output by default.
    pub json_output: bool,

    /// Log filter directive passed to the subscriber.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_role: None,
            json_output: false,
            log_filter: "info".to_string(),
        }
    }
}

/// Raw shape of the TOML config file; every field optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    default_role: Option<String>,
    json_output: Option<bool>,
    log_filter: Option<String>,
}

impl AppConfig {
    /// Load defaults merged with the config file, if one exists.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = Self::default();
        if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let file: ConfigFile = toml::from_str(&raw)?;
            config.merge_file(file)?;
        }
        Ok(config)
    }

    fn merge_file(&mut self, file: ConfigFile) -> Result<(), ConfigError> {
        if let Some(role) = file.default_role {
            self.default_role = Some(role.parse()?);
        }
        if let Some(json_output) = file.json_output {
            self.json_output = json_output;
        }
        if let Some(log_filter) = file.log_filter {
            self.log_filter = log_filter;
        }
        Ok(())
    }

    /// Apply CLI-level overrides on top of the merged config.
    pub fn apply_cli(&mut self, role: Option<ActorRole>, json: bool) {
        if role.is_some() {
            self.default_role = role;
        }
        if json {
            self.json_output = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_no_file() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "default_role = \"DOCTOR\"\njson_output = true\nlog_filter = \"debug\""
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.default_role, Some(ActorRole::Doctor));
        assert!(config.json_output);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_unknown_role_in_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_role = \"RECEPTIONIST\"").unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Status(StatusError::InvalidRole(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_role = [not toml").unwrap();

        assert!(matches!(
            AppConfig::load(Some(file.path())),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_role = \"PATIENT\"").unwrap();

        let mut config = AppConfig::load(Some(file.path())).unwrap();
        config.apply_cli(Some(ActorRole::ClinicAdmin), true);

        assert_eq!(config.default_role, Some(ActorRole::ClinicAdmin));
        assert!(config.json_output);
    }

    #[test]
    fn test_cli_absent_keeps_file_values() {
        let mut config = AppConfig {
            default_role: Some(ActorRole::Patient),
            json_output: false,
            log_filter: "info".to_string(),
        };
        config.apply_cli(None, false);
        assert_eq!(config.default_role, Some(ActorRole::Patient));
        assert!(!config.json_output);
    }
}
