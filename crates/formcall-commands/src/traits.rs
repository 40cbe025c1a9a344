//! Core traits for command dispatch.
//!
//! A form view only ever sees [`Invoker`]: a name plus arguments in, a
//! value or error out, settled asynchronously. [`CommandHandler`] is the
//! seam for the individual commands a registry serves.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::args::CommandArgs;
use crate::error::Result;

/// Information about a command.
#[derive(Debug, Clone)]
pub struct CommandInfo {
    /// Name the command is invoked by.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Argument keys the command reads.
    pub params: Vec<String>,
}

impl CommandInfo {
    /// Creates command info with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Adds a parameter key.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }
}

/// A single named command.
pub trait CommandHandler: Send + Sync {
    /// Returns information about this command.
    fn info(&self) -> &CommandInfo;

    /// Runs the command.
    fn call(&self, args: &CommandArgs) -> Result<Value>;
}

/// Asynchronous command invocation primitive.
///
/// # Example
///
/// ```ignore
/// use formcall_commands::{CommandArgs, CommandRegistry, Invoker};
///
/// let registry = CommandRegistry::new();
/// let value = registry
///     .invoke("add_with_name", CommandArgs::new().with("name", "Ada"))
///     .await?;
/// ```
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Invokes `command` with `args`, settling with its value or error.
    async fn invoke(&self, command: &str, args: CommandArgs) -> Result<Value>;
}

#[async_trait]
impl<T: Invoker + ?Sized> Invoker for Arc<T> {
    async fn invoke(&self, command: &str, args: CommandArgs) -> Result<Value> {
        (**self).invoke(command, args).await
    }
}
