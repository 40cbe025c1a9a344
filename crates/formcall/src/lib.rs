//! formcall library.
//!
//! This crate provides the command-line interface, the headless
//! subcommands and the interactive TUI for formcall.

pub mod cli;
pub mod commands;
pub mod tui;

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use formcall_core::FormcallConfig;

/// Initialize tracing.
///
/// `RUST_LOG` wins over `level`. In TUI mode output goes to the log file so
/// it does not tear the screen; if the file cannot be opened logging is
/// discarded.
pub fn init_tracing(level: tracing::Level, config: &FormcallConfig, tui: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    if !tui {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let file = config.ensure_logs_dir().ok().and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_file())
            .ok()
    });

    match file {
        Some(file) => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        None => fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }
}
