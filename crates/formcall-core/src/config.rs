//! Shared configuration for formcall.
//!
//! Provides functions to locate the state directory and the runtime
//! settings shared by the TUI and the headless commands.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.formcall/
//! ├── logs/         # TUI log output
//! └── .env.local    # Optional environment overrides
//! ```
//!
//! # Environment Variables
//!
//! - `FORMCALL_STATE_DIR`: Override the base state directory
//! - `FORMCALL_LOG_DIR`: Override the log directory
//! - `FORMCALL_COMMAND_DELAY_MS`: Simulated latency applied to every command

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "FORMCALL_STATE_DIR";

/// Environment variable for custom log directory.
pub const LOG_DIR_ENV: &str = "FORMCALL_LOG_DIR";

/// Environment variable for the simulated command latency.
pub const COMMAND_DELAY_ENV: &str = "FORMCALL_COMMAND_DELAY_MS";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".formcall";

const LOGS_SUBDIR: &str = "logs";
const LOG_FILE_NAME: &str = "formcall.log";
const ENV_FILE_NAME: &str = ".env.local";

/// Get the formcall state directory.
///
/// The state directory is determined by:
/// 1. `FORMCALL_STATE_DIR` environment variable if set
/// 2. `~/.formcall` if home directory is available
/// 3. `.formcall` in current directory as fallback
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_state_dir())
}

fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_STATE_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
}

/// Get the .env.local file path inside the state directory.
pub fn env_file() -> PathBuf {
    state_dir().join(ENV_FILE_NAME)
}

/// Load `.env.local` from the working directory, then from the state directory.
///
/// Values already present in the environment win. Missing files are ignored.
/// Returns the files that were loaded, in order.
pub fn load_env_files() -> Vec<PathBuf> {
    let mut loaded = Vec::new();
    loaded.extend(load_env_file(Path::new(".")));
    loaded.extend(load_env_file(&state_dir()));
    loaded
}

/// Load `<dir>/.env.local` if it exists, returning its path when loaded.
pub fn load_env_file(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(ENV_FILE_NAME);
    dotenvy::from_path(&path).ok().map(|_| path)
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormcallConfig {
    /// Base directory for logs and env files.
    pub state_dir: PathBuf,
    /// Log directory (defaults to `<state_dir>/logs`).
    pub log_dir: Option<PathBuf>,
    /// Latency added before every command settles.
    pub command_delay: Duration,
}

impl Default for FormcallConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            log_dir: None,
            command_delay: Duration::ZERO,
        }
    }
}

impl FormcallConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config from the process environment.
    ///
    /// # Errors
    /// Returns an error if `FORMCALL_COMMAND_DELAY_MS` is not a whole number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(STATE_DIR_ENV) {
            config.state_dir = PathBuf::from(dir);
        }

        if let Some(dir) = lookup(LOG_DIR_ENV) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup(COMMAND_DELAY_ENV) {
            let millis = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                key: COMMAND_DELAY_ENV.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            config.command_delay = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Sets the state directory.
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    /// Sets the log directory.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Sets the simulated command latency.
    pub fn with_command_delay(mut self, delay: Duration) -> Self {
        self.command_delay = delay;
        self
    }

    /// Directory that receives log files.
    pub fn logs_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.state_dir.join(LOGS_SUBDIR))
    }

    /// Path of the TUI log file.
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE_NAME)
    }

    /// Ensure the log directory exists, creating it if necessary.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn ensure_logs_dir(&self) -> Result<PathBuf> {
        let dir = self.logs_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = FormcallConfig::default();
        assert!(config.state_dir.ends_with(".formcall"));
        assert_eq!(config.command_delay, Duration::ZERO);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_from_lookup_empty() {
        let config = FormcallConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, FormcallConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = FormcallConfig::from_lookup(lookup(&[
            (STATE_DIR_ENV, "/tmp/fc"),
            (LOG_DIR_ENV, "/tmp/fc-logs"),
            (COMMAND_DELAY_ENV, " 250 "),
        ]))
        .unwrap();

        assert_eq!(config.state_dir, PathBuf::from("/tmp/fc"));
        assert_eq!(config.logs_dir(), PathBuf::from("/tmp/fc-logs"));
        assert_eq!(config.command_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_from_lookup_invalid_delay() {
        let result = FormcallConfig::from_lookup(lookup(&[(COMMAND_DELAY_ENV, "soon")]));
        match result {
            Err(ConfigError::InvalidValue { key, value, .. }) => {
                assert_eq!(key, COMMAND_DELAY_ENV);
                assert_eq!(value, "soon");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_builder() {
        let config = FormcallConfig::new()
            .with_state_dir("/var/fc")
            .with_command_delay(Duration::from_millis(40));

        assert_eq!(config.logs_dir(), PathBuf::from("/var/fc/logs"));
        assert!(config.log_file().ends_with("logs/formcall.log"));
        assert_eq!(config.command_delay, Duration::from_millis(40));
    }

    #[test]
    fn test_ensure_logs_dir_creates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = FormcallConfig::new().with_state_dir(temp_dir.path());

        let dir = config.ensure_logs_dir().unwrap();
        assert!(dir.is_dir());
        assert_eq!(dir, temp_dir.path().join("logs"));

        // Second call is a no-op
        assert!(config.ensure_logs_dir().is_ok());
    }

    #[test]
    fn test_env_file_name() {
        assert!(env_file().ends_with(".env.local"));
    }

    #[test]
    fn test_load_env_file_from_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(load_env_file(temp_dir.path()).is_none());

        std::fs::write(
            temp_dir.path().join(".env.local"),
            "FORMCALL_TEST_ENV_FILE_VALUE=from-state-dir\n",
        )
        .unwrap();

        let loaded = load_env_file(temp_dir.path()).unwrap();
        assert_eq!(loaded, temp_dir.path().join(".env.local"));
        assert_eq!(
            std::env::var("FORMCALL_TEST_ENV_FILE_VALUE").unwrap(),
            "from-state-dir"
        );
    }
}
