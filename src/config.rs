//! Process-level configuration for tinyjib
//!
//! Loaded from environment variables with defaults. Values set here take
//! precedence over the `jib` block of the project manifest, the same way a
//! system property wins over the build script DSL.
//!
//! # Environment Variables
//!
//! - `TINYJIB_LOG_LEVEL`: Logging level - default: "info"
//! - `TINYJIB_LOG_JSON`: JSON log output (true|false) - default: "false"
//! - `TINYJIB_CONTAINERIZING_MODE`: Overrides `containerizingMode` (exploded|packaged)
//! - `TINYJIB_CONFIGURATION_NAME`: Overrides `configurationName`
//! - `TINYJIB_OFFLINE`: Build without registry access (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use tinyjib::TinyJibConfig;
//! use tinyjib::params::JibExtension;
//!
//! let config = TinyJibConfig::default();
//! config.validate().expect("Invalid configuration");
//!
//! let mut extension = JibExtension::default();
//! config.apply_to(&mut extension);
//! ```

use crate::params::JibExtension;
use crate::resolver::PACKAGED_MODE;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use thiserror::Error;
use tracing::debug;

const DEFAULT_LOG_LEVEL: &str = "info";
const EXPLODED_MODE: &str = "exploded";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TinyJibConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    pub log_json: bool,

    /// Replaces the manifest's `containerizingMode` when set
    pub containerizing_mode: Option<String>,

    /// Replaces the manifest's `configurationName` when set
    pub configuration_name: Option<String>,

    /// Passed through to the image pipeline; planning itself never goes online
    pub offline: bool,
}

fn env_flag(key: &str) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(value) => value.parse::<bool>().map_err(|e| ConfigError::ParseError {
            field: key.to_string(),
            error: e.to_string(),
        }),
        Err(_) => Ok(false),
    }
}

fn env_non_blank(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for TinyJibConfig {
    /// Reads `TINYJIB_*` variables; malformed booleans fall back to `false`.
    /// Use [`TinyJibConfig::from_env`] to surface them as errors instead.
    fn default() -> Self {
        Self {
            log_level: env::var("TINYJIB_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
            log_json: env_flag("TINYJIB_LOG_JSON").unwrap_or(false),
            containerizing_mode: env_non_blank("TINYJIB_CONTAINERIZING_MODE"),
            configuration_name: env_non_blank("TINYJIB_CONFIGURATION_NAME"),
            offline: env_flag("TINYJIB_OFFLINE").unwrap_or(false),
        }
    }
}

impl TinyJibConfig {
    /// Like `default()`, but rejects boolean variables that do not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            log_json: env_flag("TINYJIB_LOG_JSON")?,
            offline: env_flag("TINYJIB_OFFLINE")?,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if let Some(mode) = &self.containerizing_mode {
            if mode != EXPLODED_MODE && mode != PACKAGED_MODE {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid containerizing mode: {}. Valid options: exploded, packaged",
                    mode
                )));
            }
        }

        Ok(())
    }

    /// Overlays the environment overrides onto a manifest extension.
    pub fn apply_to(&self, extension: &mut JibExtension) {
        if let Some(mode) = &self.containerizing_mode {
            debug!(mode = %mode, "Containerizing mode overridden from environment");
            extension.containerizing_mode = mode.clone();
        }
        if let Some(name) = &self.configuration_name {
            debug!(configuration = %name, "Configuration name overridden from environment");
            extension.configuration_name = name.clone();
        }
    }

    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("log_json".to_string(), self.log_json.to_string());
        if let Some(mode) = &self.containerizing_mode {
            map.insert("containerizing_mode".to_string(), mode.clone());
        }
        if let Some(name) = &self.configuration_name {
            map.insert("configuration_name".to_string(), name.clone());
        }
        map.insert("offline".to_string(), self.offline.to_string());
        map
    }
}

impl fmt::Display for TinyJibConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TinyJib Configuration:")?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  JSON Logs: {}", self.log_json)?;
        if let Some(mode) = &self.containerizing_mode {
            writeln!(f, "  Containerizing Mode: {}", mode)?;
        }
        if let Some(name) = &self.configuration_name {
            writeln!(f, "  Configuration Name: {}", name)?;
        }
        writeln!(f, "  Offline: {}", self.offline)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Sets (or clears) an environment variable for the lifetime of the guard
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn clear_all() -> Vec<EnvGuard> {
        [
            "TINYJIB_LOG_LEVEL",
            "TINYJIB_LOG_JSON",
            "TINYJIB_CONTAINERIZING_MODE",
            "TINYJIB_CONFIGURATION_NAME",
            "TINYJIB_OFFLINE",
        ]
        .iter()
        .map(|key| EnvGuard::unset(key))
        .collect()
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = clear_all();

        let config = TinyJibConfig::default();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(!config.log_json);
        assert!(config.containerizing_mode.is_none());
        assert!(config.configuration_name.is_none());
        assert!(!config.offline);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _cleared = clear_all();
        let _guards = vec![
            EnvGuard::set("TINYJIB_LOG_LEVEL", "DEBUG"),
            EnvGuard::set("TINYJIB_LOG_JSON", "true"),
            EnvGuard::set("TINYJIB_CONTAINERIZING_MODE", "packaged"),
            EnvGuard::set("TINYJIB_CONFIGURATION_NAME", "  prodRuntimeClasspath "),
            EnvGuard::set("TINYJIB_OFFLINE", "true"),
        ];

        let config = TinyJibConfig::from_env().unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert_eq!(config.containerizing_mode.as_deref(), Some("packaged"));
        assert_eq!(
            config.configuration_name.as_deref(),
            Some("prodRuntimeClasspath")
        );
        assert!(config.offline);
    }

    #[test]
    #[serial]
    fn test_malformed_flag_is_a_parse_error() {
        let _cleared = clear_all();
        let _guard = EnvGuard::set("TINYJIB_OFFLINE", "yes");

        assert!(!TinyJibConfig::default().offline);
        assert!(matches!(
            TinyJibConfig::from_env(),
            Err(ConfigError::ParseError { field, .. }) if field == "TINYJIB_OFFLINE"
        ));
    }

    #[test]
    #[serial]
    fn test_blank_override_is_ignored() {
        let _cleared = clear_all();
        let _guard = EnvGuard::set("TINYJIB_CONFIGURATION_NAME", "   ");
        assert!(TinyJibConfig::default().configuration_name.is_none());
    }

    #[test]
    #[serial]
    fn test_validation_rejects_unknown_values() {
        let _cleared = clear_all();

        let mut config = TinyJibConfig::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = TinyJibConfig::default();
        config.containerizing_mode = Some("fat".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(msg)) if msg.contains("fat")
        ));
    }

    #[test]
    #[serial]
    fn test_apply_to_extension() {
        let _cleared = clear_all();
        let config = TinyJibConfig {
            containerizing_mode: Some("packaged".to_string()),
            configuration_name: Some("custom".to_string()),
            ..TinyJibConfig::default()
        };

        let mut extension = JibExtension::default();
        config.apply_to(&mut extension);
        assert_eq!(extension.containerizing_mode, "packaged");
        assert_eq!(extension.configuration_name, "custom");
        assert_eq!(extension.source_set_name, "main");
    }

    #[test]
    #[serial]
    fn test_config_display() {
        let _cleared = clear_all();
        let display = TinyJibConfig::default().to_string();
        assert!(display.contains("TinyJib Configuration:"));
        assert!(display.contains("Offline: false"));
        assert!(!display.contains("Containerizing Mode"));
        assert_eq!(TinyJibConfig::default().to_display_map()["log_level"], "info");
    }
}
