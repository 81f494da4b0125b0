//! Configuration file loading.
//!
//! Resolution order, later entries winning:
//! 1. Built-in defaults
//! 2. `inquest.toml` in the given directory, when present
//! 3. Environment overrides (`INQUEST_REPORTS_DIR`, `INQUEST_LOGS_DIR`,
//!    `INQUEST_EXECUTOR_CMD`, `INQUEST_MODEL`)

use std::path::{Path, PathBuf};

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::models::AppConfig;

/// Name of the configuration file looked up in the base directory.
pub const CONFIG_FILE: &str = "inquest.toml";

/// Load the application configuration from `base_dir`.
///
/// A missing config file is not an error; defaults apply. A present but
/// unreadable or malformed file is.
pub fn load_config(base_dir: &Path) -> ConfigResult<AppConfig> {
    let path = base_dir.join(CONFIG_FILE);

    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::FileRead {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::TomlParse {
            path: path.clone(),
            source,
        })?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut config);
    validate(&config, &path)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(dir) = std::env::var("INQUEST_REPORTS_DIR") {
        config.reports_dir = PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("INQUEST_LOGS_DIR") {
        config.logs_dir = PathBuf::from(dir);
    }
    if let Ok(cmd) = std::env::var("INQUEST_EXECUTOR_CMD") {
        config.executor.command = cmd;
    }
    if let Ok(model) = std::env::var("INQUEST_MODEL") {
        config.executor.model = model;
    }
}

fn validate(config: &AppConfig, path: &Path) -> ConfigResult<()> {
    if config.transition_excerpt_limit == 0 {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "transition_excerpt_limit must be greater than zero".to_string(),
        });
    }
    if config.report_stem_limit == 0 {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "report_stem_limit must be greater than zero".to_string(),
        });
    }
    if config.max_concurrent_runs == 0 {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "max_concurrent_runs must be greater than zero".to_string(),
        });
    }
    if config.executor.command.trim().is_empty() {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "executor.command must not be empty".to_string(),
        });
    }
    Ok(())
}
