//! Terminal User Interface for formcall.
//!
//! Provides a tabbed TUI with:
//! - Tabs for each form screen
//! - Field inputs, buttons and result / error panels
//! - Activity log of issued calls and settlements
//! - Status bar with working indicator
//! - Footer with keybindings

mod app;
mod events;
mod ui;

pub use app::{App, Message, MessageDirection};
pub use events::run;
