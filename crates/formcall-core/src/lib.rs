//! formcall core - shared configuration for every formcall interface.
//!
//! - **config**: state directory, env files and runtime settings
//! - **error**: configuration errors

pub mod config;
pub mod error;

pub use config::{
    env_file, load_env_file, load_env_files, state_dir, FormcallConfig, COMMAND_DELAY_ENV, LOG_DIR_ENV,
    STATE_DIR_ENV,
};
pub use error::{ConfigError, Result};
