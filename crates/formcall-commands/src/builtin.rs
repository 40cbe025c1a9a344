//! Built-in backend commands.

use serde_json::Value;
use tracing::info;

use crate::args::CommandArgs;
use crate::error::{CommandError, Result};
use crate::traits::{CommandHandler, CommandInfo};

/// Name of the two-number addition command.
pub const CALCULATE_SUM: &str = "calculate_sum";
/// Name of the fixed addition command.
pub const ADD: &str = "add";
/// Name of the named greeting command.
pub const ADD_WITH_NAME: &str = "add_with_name";
/// Name of the user lookup command.
pub const GET_USER: &str = "get_user";

/// Adds the two numbers in `args`.
pub struct CalculateSum {
    info: CommandInfo,
}

impl CalculateSum {
    /// Creates the command.
    pub fn new() -> Self {
        Self {
            info: CommandInfo::new(CALCULATE_SUM, "Add two numbers").with_param("args"),
        }
    }
}

impl Default for CalculateSum {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler for CalculateSum {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn call(&self, args: &CommandArgs) -> Result<Value> {
        let values = args.require_array("args")?;
        if values.len() != 2 {
            return Err(CommandError::invalid(
                "args",
                format!("expected 2 values, got {}", values.len()),
            ));
        }

        let a = parse_number(&values[0])?;
        let b = parse_number(&values[1])?;
        let sum = a + b;

        if !sum.is_finite() {
            return Err(CommandError::Failed(format!("{} + {} overflows", a, b)));
        }

        Ok(Value::String(format_number(sum)))
    }
}

fn parse_number(value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| CommandError::invalid("args", format!("not a number: {}", value)))
}

/// Formats a sum; whole numbers print without a fractional part.
fn format_number(n: f64) -> String {
    // -0 prints as "-0"
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}

/// Returns a fixed addition message.
pub struct Add {
    info: CommandInfo,
}

impl Add {
    /// Creates the command.
    pub fn new() -> Self {
        Self {
            info: CommandInfo::new(ADD, "Return a fixed addition"),
        }
    }
}

impl Default for Add {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler for Add {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn call(&self, _args: &CommandArgs) -> Result<Value> {
        Ok(Value::String("Addition: 5 + 3 = 8".to_string()))
    }
}

/// Echoes the `name` argument.
pub struct AddWithName {
    info: CommandInfo,
}

impl AddWithName {
    /// Creates the command.
    pub fn new() -> Self {
        Self {
            info: CommandInfo::new(ADD_WITH_NAME, "Echo a name").with_param("name"),
        }
    }
}

impl Default for AddWithName {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler for AddWithName {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn call(&self, args: &CommandArgs) -> Result<Value> {
        let name = args.require_str("name")?;
        Ok(Value::String(format!("Name: {}", name)))
    }
}

/// Reports that the user command ran.
pub struct GetUser {
    info: CommandInfo,
}

impl GetUser {
    /// Creates the command.
    pub fn new() -> Self {
        Self {
            info: CommandInfo::new(GET_USER, "Run the user command"),
        }
    }
}

impl Default for GetUser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler for GetUser {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn call(&self, _args: &CommandArgs) -> Result<Value> {
        info!("user command called");
        Ok(Value::String("User command executed!".to_string()))
    }
}
