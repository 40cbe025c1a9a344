//! The built-in screens.
//!
//! Three independent instances of the same form pattern. They share the
//! command dispatcher and nothing else.

use formcall_commands::{ADD, ADD_WITH_NAME, CALCULATE_SUM, GET_USER};

use crate::action::{Action, ActionKind};
use crate::field::Field;
use crate::view::FormView;

/// Screen ids in tab order.
pub const SCREEN_IDS: [&str; 3] = ["calculator", "commands", "user"];

/// Two numbers in, their sum out.
pub fn calculator() -> FormView {
    FormView::new("calculator", "Python Addition Calculator")
        .with_subtitle("Using Python as Backend")
        .with_field(Field::number("First number").with_placeholder("Enter first number"))
        .with_field(Field::number("Second number").with_placeholder("Enter second number"))
        .with_action(
            Action::new(
                "Calculate Sum",
                CALCULATE_SUM,
                ActionKind::NumericPair { first: 0, second: 1 },
            )
            .with_busy_label("Calculating..."),
        )
}

/// A fixed command and a named one sharing a name field.
pub fn commands() -> FormView {
    FormView::new("commands", "Backend Commands")
        .with_field(Field::text("Name").with_placeholder("Enter a name"))
        .with_action(Action::new("Add", ADD, ActionKind::NoArgument).with_busy_label("Running..."))
        .with_action(
            Action::new(
                "Add with name",
                ADD_WITH_NAME,
                ActionKind::NamedArgument {
                    field: 0,
                    key: "name".to_string(),
                },
            )
            .with_busy_label("Running..."),
        )
}

/// A single no-argument command.
pub fn user() -> FormView {
    FormView::new("user", "User")
        .with_action(Action::new("Get user", GET_USER, ActionKind::NoArgument).with_busy_label("Loading..."))
}

/// All screens in tab order.
pub fn all() -> Vec<FormView> {
    vec![calculator(), commands(), user()]
}

/// Looks up a screen by id.
pub fn by_id(id: &str) -> Option<FormView> {
    match id {
        "calculator" => Some(calculator()),
        "commands" => Some(commands()),
        "user" => Some(user()),
        _ => None,
    }
}
