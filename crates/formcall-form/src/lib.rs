//! Interactive form views for formcall.
//!
//! A [`FormView`] owns its fields, a busy flag and the result / error text
//! of the last call. Submitting validates the fields, issues one call
//! through an [`formcall_commands::Invoker`] and renders the settlement.
//!
//! # Example
//!
//! ```ignore
//! use formcall_commands::CommandRegistry;
//! use formcall_form::screens;
//!
//! let registry = CommandRegistry::new();
//! let mut view = screens::calculator();
//! view.set_field(0, "2");
//! view.set_field(1, "3");
//! view.submit(0, &registry).await;
//! assert_eq!(view.result(), "5");
//! ```

pub mod action;
pub mod field;
pub mod screens;
pub mod view;

pub use action::{Action, ActionKind, ErrorChannel, BOTH_NUMBERS_REQUIRED, NAME_REQUIRED};
pub use field::{Field, FieldKind};
pub use view::{CallRequest, FormView, Submission, ViewState};
