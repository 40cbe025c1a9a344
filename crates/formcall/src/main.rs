//! formcall entry point.

use std::sync::Arc;

use clap::Parser;
use tracing::debug;

use formcall::cli::{Cli, Commands};
use formcall::{commands, init_tracing, tui};
use formcall_commands::CommandRegistry;

fn main() {
    // Load .env.local before parsing so clap sees FORMCALL_* values
    let mut env_files = formcall_core::load_env_files();

    let cli = Cli::parse();
    env_files.extend(cli.load_state_dir_env());

    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(cli.log_level(), &config, cli.is_tui());
    for path in &env_files {
        debug!(path = %path.display(), "loaded env file");
    }

    let registry = CommandRegistry::from_config(&config);

    let result = match cli.command {
        Some(Commands::Tui { screen }) => run_tui(registry, screen.as_deref()),
        Some(cmd) => commands::execute(cmd, registry),
        None => run_tui(registry, None),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_tui(registry: CommandRegistry, screen: Option<&str>) -> commands::Result<()> {
    tui::run(Arc::new(registry), screen)?;
    Ok(())
}
