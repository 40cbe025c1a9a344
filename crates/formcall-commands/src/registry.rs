//! Command registry: the dispatcher form views invoke through.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use formcall_core::FormcallConfig;

use crate::args::CommandArgs;
use crate::builtin::{Add, AddWithName, CalculateSum, GetUser};
use crate::error::{CommandError, Result};
use crate::traits::{CommandHandler, CommandInfo, Invoker};

/// Registry of named commands.
///
/// Handlers are stored as `Arc<dyn CommandHandler>` so the registry can be
/// shared with spawned tasks.
///
/// # Example
///
/// ```
/// use formcall_commands::CommandRegistry;
///
/// let registry = CommandRegistry::new();
/// for info in registry.list() {
///     println!("{} - {}", info.name, info.description);
/// }
/// ```
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
    delay: Duration,
}

impl CommandRegistry {
    /// Creates a registry with all built-in commands.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(CalculateSum::new()));
        registry.register(Arc::new(Add::new()));
        registry.register(Arc::new(AddWithName::new()));
        registry.register(Arc::new(GetUser::new()));
        registry
    }

    /// Creates a registry with built-ins and the configured latency.
    pub fn from_config(config: &FormcallConfig) -> Self {
        Self::new().with_delay(config.command_delay)
    }

    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
            delay: Duration::ZERO,
        }
    }

    /// Sets the latency applied before each command runs.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the configured latency.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Registers a command, replacing any with the same name.
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        let name = handler.info().name.clone();
        self.handlers.insert(name, handler);
    }

    /// Gets a command by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Lists command info sorted by name.
    pub fn list(&self) -> Vec<&CommandInfo> {
        let mut infos: Vec<&CommandInfo> = self.handlers.values().map(|h| h.info()).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Invoker for CommandRegistry {
    async fn invoke(&self, command: &str, args: CommandArgs) -> Result<Value> {
        debug!(command = %command, args = args.len(), "invoking command");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let handler = self
            .get(command)
            .ok_or_else(|| CommandError::UnknownCommand(command.to_string()))
            .inspect_err(|e| warn!(command = %command, error = %e, "command rejected"))?;

        match handler.call(&args) {
            Ok(value) => {
                info!(command = %command, "command resolved");
                Ok(value)
            }
            Err(e) => {
                warn!(command = %command, error = %e, "command rejected");
                Err(e)
            }
        }
    }
}
