//! Named command dispatch for formcall.
//!
//! This crate provides the host side of every form screen:
//! - [`Invoker`] - the asynchronous `invoke(name, args)` primitive views call
//! - [`CommandRegistry`] - name to handler map implementing `Invoker`
//! - [`builtin`] - the backend commands the screens use

pub mod args;
pub mod builtin;
pub mod error;
pub mod registry;
pub mod traits;

pub use args::{display_text, CommandArgs};
pub use builtin::{ADD, ADD_WITH_NAME, CALCULATE_SUM, GET_USER};
pub use error::{CommandError, Result};
pub use registry::CommandRegistry;
pub use traits::{CommandHandler, CommandInfo, Invoker};
