//! Trigger buttons and the argument shape each one sends.

/// Message shown when a numeric pair is incomplete.
pub const BOTH_NUMBERS_REQUIRED: &str = "Please enter both numbers";

/// Message shown when a name is blank.
pub const NAME_REQUIRED: &str = "Please enter a name";

/// How an action builds its call from the form's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Two required fields sent as `args: [first, second]`.
    NumericPair {
        /// Index of the first field.
        first: usize,
        /// Index of the second field.
        second: usize,
    },
    /// No arguments.
    NoArgument,
    /// One trimmed, non-blank field sent under `key`.
    NamedArgument {
        /// Index of the field.
        field: usize,
        /// Argument key.
        key: String,
    },
}

impl ActionKind {
    /// Where a rejected call's text is shown.
    pub fn error_channel(&self) -> ErrorChannel {
        match self {
            ActionKind::NumericPair { .. } => ErrorChannel::Separate,
            ActionKind::NoArgument | ActionKind::NamedArgument { .. } => ErrorChannel::Result,
        }
    }
}

/// Display channel for rejected calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorChannel {
    /// The error panel, distinct from the result.
    Separate,
    /// The result panel, indistinguishable from success.
    Result,
}

/// A trigger button on a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Button label while idle.
    pub label: String,
    /// Button label while the call is pending.
    pub busy_label: String,
    /// Command invoked.
    pub command: String,
    /// Argument shape.
    pub kind: ActionKind,
}

impl Action {
    /// Creates an action; the busy label defaults to "Working...".
    pub fn new(label: impl Into<String>, command: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            label: label.into(),
            busy_label: "Working...".to_string(),
            command: command.into(),
            kind,
        }
    }

    /// Sets the busy label.
    pub fn with_busy_label(mut self, label: impl Into<String>) -> Self {
        self.busy_label = label.into();
        self
    }

    /// Label for the current busy state.
    pub fn label_for(&self, busy: bool) -> &str {
        if busy {
            &self.busy_label
        } else {
            &self.label
        }
    }
}
