//! Handlers for the headless subcommands.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use formcall_commands::{display_text, CommandArgs, CommandRegistry, Invoker};
use formcall_form::{screens, FormView, Submission};

use crate::cli::{Commands, OutputFormat};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a headless CLI command.
///
/// `Tui` is handled by the caller.
pub fn execute(command: Commands, registry: CommandRegistry) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    match command {
        Commands::Call { command, args, format } => {
            let args = args_from_pairs(args);
            let output = runtime.block_on(cmd_call(&registry, &command, args, format))?;
            println!("{}", output);
            Ok(())
        }
        Commands::Submit { screen, fields, action } => {
            let view = runtime.block_on(cmd_submit(&registry, &screen, &fields, action))?;
            let output = view_output(&view)?;
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }
        Commands::Commands { format } => {
            println!("{}", cmd_commands(&registry, format)?);
            Ok(())
        }
        Commands::Tui { .. } => Ok(()),
    }
}

/// Invokes one command and formats its value.
pub async fn cmd_call(
    invoker: &dyn Invoker,
    command: &str,
    args: CommandArgs,
    format: OutputFormat,
) -> Result<String> {
    info!(command = %command, "direct call");
    let value = invoker.invoke(command, args).await?;

    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(&value)?,
        OutputFormat::Table | OutputFormat::Brief => display_text(&value),
    })
}

/// Fills a screen and presses one button, returning the settled view.
pub async fn cmd_submit(
    invoker: &dyn Invoker,
    screen: &str,
    fields: &[String],
    action: usize,
) -> Result<FormView> {
    let mut view = screens::by_id(screen).ok_or_else(|| {
        format!(
            "Unknown screen: {} (expected one of: {})",
            screen,
            screens::SCREEN_IDS.join(", ")
        )
    })?;

    if fields.len() > view.fields().len() {
        return Err(format!(
            "Screen '{}' has {} field(s), got {} value(s)",
            screen,
            view.fields().len(),
            fields.len()
        )
        .into());
    }

    for (index, value) in fields.iter().enumerate() {
        view.set_field(index, value.as_str());
    }

    if let Submission::NoSuchAction(index) = view.submit(action, invoker).await {
        return Err(format!(
            "Screen '{}' has no button {} ({} available)",
            screen,
            index,
            view.actions().len()
        )
        .into());
    }

    Ok(view)
}

#[derive(Serialize)]
struct CommandRow<'a> {
    name: &'a str,
    description: &'a str,
    params: &'a [String],
}

/// Formats the registry's command list.
pub fn cmd_commands(registry: &CommandRegistry, format: OutputFormat) -> Result<String> {
    let rows: Vec<CommandRow> = registry
        .list()
        .into_iter()
        .map(|info| CommandRow {
            name: &info.name,
            description: &info.description,
            params: &info.params,
        })
        .collect();

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&rows)?,
        OutputFormat::Brief => rows.iter().map(|r| r.name).collect::<Vec<_>>().join("\n"),
        OutputFormat::Table => {
            let mut lines = vec![format!("{:<16} {:<12} {}", "NAME", "ARGS", "DESCRIPTION")];
            for row in &rows {
                let params = if row.params.is_empty() {
                    "-".to_string()
                } else {
                    row.params.join(",")
                };
                lines.push(format!("{:<16} {:<12} {}", row.name, params, row.description));
            }
            lines.join("\n")
        }
    };

    Ok(output)
}

/// Returns a settled view's result text, or its error panel as an error.
pub fn view_output(view: &FormView) -> Result<String> {
    if !view.error().is_empty() {
        return Err(view.error().into());
    }
    Ok(view.result().to_string())
}

/// Converts CLI pairs into command arguments.
pub fn args_from_pairs(pairs: Vec<(String, Value)>) -> CommandArgs {
    pairs.into_iter().collect()
}
