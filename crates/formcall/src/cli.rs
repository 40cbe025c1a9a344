//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use formcall_commands::CommandArgs;
use formcall_core::FormcallConfig;

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "0.1.0 (abc1234, 2026-01-29)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// formcall - form screens that call named backend commands
#[derive(Parser, Debug)]
#[command(name = "formcall")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = "FORMCALL_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Simulated latency for every command, in milliseconds
    #[arg(long, env = "FORMCALL_COMMAND_DELAY_MS")]
    pub delay_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive screens (default)
    Tui {
        /// Screen to open first (calculator, commands, user)
        #[arg(long)]
        screen: Option<String>,
    },

    /// Invoke a command directly
    Call {
        /// Command name
        #[arg(required = true)]
        command: String,

        /// Argument as key=value (repeatable; values may be JSON)
        #[arg(short, long = "arg", value_parser = parse_arg)]
        args: Vec<(String, Value)>,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "brief")]
        format: OutputFormat,
    },

    /// Fill a screen's fields and press one of its buttons
    Submit {
        /// Screen id (calculator, commands, user)
        #[arg(required = true)]
        screen: String,

        /// Field values in order (repeatable)
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Button index on the screen
        #[arg(short, long, default_value_t = 0)]
        action: usize,
    },

    /// List available commands
    Commands {
        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

/// Output format for command results and listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Brief,
}

fn parse_arg(raw: &str) -> Result<(String, Value), String> {
    CommandArgs::parse_pair(raw)
}

impl Cli {
    /// Builds the runtime config: environment first, then flags.
    pub fn config(&self) -> formcall_core::Result<FormcallConfig> {
        let mut config = FormcallConfig::from_env()?;
        if let Some(dir) = &self.state_dir {
            config = config.with_state_dir(dir);
        }
        if let Some(ms) = self.delay_ms {
            config = config.with_command_delay(Duration::from_millis(ms));
        }
        Ok(config)
    }

    /// Loads `.env.local` from a `--state-dir` that differs from the env one.
    ///
    /// Call before [`Cli::config`] so the file's values reach the config.
    pub fn load_state_dir_env(&self) -> Option<PathBuf> {
        let dir = self.state_dir.as_ref()?;
        if *dir == formcall_core::state_dir() {
            return None;
        }
        formcall_core::load_env_file(dir)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// True when the interactive screens should run.
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["formcall"]);
        assert!(cli.command.is_none());
        assert!(cli.is_tui());
    }

    #[test]
    fn test_cli_parse_call() {
        let cli = Cli::parse_from([
            "formcall",
            "call",
            "calculate_sum",
            "--arg",
            r#"args=["2","3"]"#,
        ]);
        match cli.command {
            Some(Commands::Call { command, args, format }) => {
                assert_eq!(command, "calculate_sum");
                assert_eq!(args, vec![("args".to_string(), json!(["2", "3"]))]);
                assert_eq!(format, OutputFormat::Brief);
            }
            _ => panic!("Expected Call command"),
        }
        assert!(!Cli::parse_from(["formcall", "call", "add"]).is_tui());
    }

    #[test]
    fn test_cli_rejects_bad_arg() {
        let result = Cli::try_parse_from(["formcall", "call", "add", "-a", "oops"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_submit() {
        let cli = Cli::parse_from(["formcall", "submit", "calculator", "-f", "2", "-f", "3"]);
        match cli.command {
            Some(Commands::Submit { screen, fields, action }) => {
                assert_eq!(screen, "calculator");
                assert_eq!(fields, vec!["2", "3"]);
                assert_eq!(action, 0);
            }
            _ => panic!("Expected Submit command"),
        }
    }

    #[test]
    fn test_cli_tui_screen() {
        let cli = Cli::parse_from(["formcall", "tui", "--screen", "user"]);
        assert!(cli.is_tui());
        match cli.command {
            Some(Commands::Tui { screen }) => assert_eq!(screen.as_deref(), Some("user")),
            _ => panic!("Expected Tui command"),
        }
    }

    #[test]
    fn test_cli_config_flags_override() {
        let cli = Cli::parse_from(["formcall", "--state-dir", "/tmp/fc", "--delay-ms", "300"]);
        let config = cli.config().unwrap();
        assert_eq!(config.state_dir, PathBuf::from("/tmp/fc"));
        assert_eq!(config.command_delay, Duration::from_millis(300));
    }

    #[test]
    fn test_cli_loads_env_file_from_state_dir_flag() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join(".env.local"),
            "FORMCALL_TEST_FLAG_DIR_VALUE=loaded\n",
        )
        .unwrap();

        let dir = temp_dir.path().to_str().unwrap();
        let cli = Cli::parse_from(["formcall", "--state-dir", dir, "commands"]);

        assert_eq!(cli.load_state_dir_env(), Some(temp_dir.path().join(".env.local")));
        assert_eq!(std::env::var("FORMCALL_TEST_FLAG_DIR_VALUE").unwrap(), "loaded");

        let cli = Cli::parse_from(["formcall", "commands"]);
        if cli.state_dir.is_none() {
            assert!(cli.load_state_dir_env().is_none());
        }
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["formcall", "-vvv"]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_string_carries_build_metadata() {
        let version = version_string();
        assert!(version.starts_with(env!("CARGO_PKG_VERSION")));

        let meta = version
            .split_once('(')
            .and_then(|(_, rest)| rest.strip_suffix(')'))
            .unwrap();
        let (hash, date) = meta.split_once(", ").unwrap();
        assert!(!hash.is_empty());
        assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
    }
}
