//! Form view state and the submit / settle cycle.
//!
//! A view is Idle or Pending. A validated submit moves it to Pending and
//! yields a [`CallRequest`]; settling the call moves it back to Idle no
//! matter the outcome. Result and error text are cleared before every
//! attempt so the two never show at once.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use formcall_commands::{display_text, CommandArgs, CommandError, Invoker};

use crate::action::{Action, ActionKind, ErrorChannel, BOTH_NUMBERS_REQUIRED, NAME_REQUIRED};
use crate::field::Field;

/// Call state of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// No call outstanding.
    #[default]
    Idle,
    /// A call has been issued and has not settled.
    Pending,
}

/// A call the view wants issued.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    /// Index of the action that produced the call.
    pub action: usize,
    /// Command name.
    pub command: String,
    /// Command arguments.
    pub args: CommandArgs,
}

/// What a submit attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Validation passed; the view is Pending until this call settles.
    Call(CallRequest),
    /// Validation failed; the message is already on display.
    Rejected(String),
    /// A call is already outstanding; nothing was issued.
    Busy,
    /// The action index does not exist.
    NoSuchAction(usize),
}

impl Submission {
    /// True if a call was issued.
    pub fn is_call(&self) -> bool {
        matches!(self, Submission::Call(_))
    }
}

/// State of one interactive form.
#[derive(Debug, Clone)]
pub struct FormView {
    id: String,
    title: String,
    subtitle: String,
    fields: Vec<Field>,
    actions: Vec<Action>,
    result: String,
    error: String,
    state: ViewState,
    pending: Option<ErrorChannel>,
    settled_at: Option<DateTime<Utc>>,
}

impl FormView {
    /// Creates an empty view.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: String::new(),
            fields: Vec::new(),
            actions: Vec::new(),
            result: String::new(),
            error: String::new(),
            state: ViewState::Idle,
            pending: None,
            settled_at: None,
        }
    }

    /// Sets the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Appends a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends an action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Result text (empty when nothing to show).
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Error text (empty when nothing to show).
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// True while a call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.state == ViewState::Pending
    }

    /// When the last call settled.
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }

    /// Overwrites a field value. Returns false if the index is out of range.
    pub fn set_field(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.fields.get_mut(index) {
            Some(field) => {
                field.set(value.into());
                true
            }
            None => false,
        }
    }

    /// Clears every field and any displayed text. The call state is untouched.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.set(String::new());
        }
        self.result.clear();
        self.error.clear();
    }

    /// Validates the action and, if it passes, moves to Pending.
    pub fn begin_submit(&mut self, index: usize) -> Submission {
        if self.is_busy() {
            debug!(view = %self.id, "submit ignored while pending");
            return Submission::Busy;
        }

        let Some(action) = self.actions.get(index) else {
            return Submission::NoSuchAction(index);
        };

        let args = match &action.kind {
            ActionKind::NumericPair { first, second } => {
                let a = self.value_of(*first);
                let b = self.value_of(*second);
                if a.is_empty() || b.is_empty() {
                    self.result.clear();
                    self.error = BOTH_NUMBERS_REQUIRED.to_string();
                    return Submission::Rejected(BOTH_NUMBERS_REQUIRED.to_string());
                }
                CommandArgs::new().with("args", json!([a, b]))
            }
            ActionKind::NoArgument => CommandArgs::new(),
            ActionKind::NamedArgument { field, key } => {
                let name = self.value_of(*field).trim();
                if name.is_empty() {
                    self.error.clear();
                    self.result = NAME_REQUIRED.to_string();
                    return Submission::Rejected(NAME_REQUIRED.to_string());
                }
                CommandArgs::new().with(key.clone(), name)
            }
        };

        let channel = action.kind.error_channel();
        let request = CallRequest {
            action: index,
            command: action.command.clone(),
            args,
        };

        self.pending = Some(channel);
        self.result.clear();
        self.error.clear();
        self.state = ViewState::Pending;

        info!(view = %self.id, command = %request.command, "call issued");
        Submission::Call(request)
    }

    /// Records a call's outcome and returns to Idle.
    ///
    /// Ignored (with a warning) if no call is outstanding.
    pub fn settle(&mut self, outcome: Result<Value, CommandError>) {
        let Some(channel) = self.pending.take() else {
            warn!(view = %self.id, "settlement without a pending call");
            return;
        };

        match (outcome, channel) {
            (Ok(value), _) => {
                self.result = display_text(&value);
                debug!(view = %self.id, "call resolved");
            }
            (Err(e), ErrorChannel::Separate) => {
                self.error = e.to_string();
                debug!(view = %self.id, error = %e, "call rejected");
            }
            (Err(e), ErrorChannel::Result) => {
                self.result = e.to_string();
                debug!(view = %self.id, error = %e, "call rejected");
            }
        }

        self.state = ViewState::Idle;
        self.settled_at = Some(Utc::now());
    }

    /// Submits an action and awaits its settlement through `invoker`.
    ///
    /// Busy is cleared on every exit path, including the returned future
    /// being dropped before the call settles.
    pub async fn submit(&mut self, index: usize, invoker: &dyn Invoker) -> Submission {
        let submission = self.begin_submit(index);
        let request = match &submission {
            Submission::Call(request) => request.clone(),
            _ => return submission,
        };

        let guard = PendingGuard { view: self };
        let outcome = invoker.invoke(&request.command, request.args.clone()).await;
        guard.view.settle(outcome);

        submission
    }

    fn value_of(&self, index: usize) -> &str {
        self.fields.get(index).map(Field::value).unwrap_or("")
    }

    fn abandon(&mut self) {
        if self.pending.take().is_some() {
            warn!(view = %self.id, "pending call dropped before settling");
        }
        self.state = ViewState::Idle;
    }
}

/// Returns the view to Idle if a submit is dropped mid-call.
struct PendingGuard<'a> {
    view: &'a mut FormView,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.view.is_busy() {
            self.view.abandon();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use crate::screens;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records calls and answers with a canned outcome.
    struct MockInvoker {
        outcome: Result<Value, CommandError>,
        calls: Mutex<Vec<(String, CommandArgs)>>,
    }

    impl MockInvoker {
        fn resolving(value: Value) -> Self {
            Self {
                outcome: Ok(value),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn rejecting(error: CommandError) -> Self {
            Self {
                outcome: Err(error),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, CommandArgs)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Invoker for MockInvoker {
        async fn invoke(&self, command: &str, args: CommandArgs) -> formcall_commands::Result<Value> {
            self.calls.lock().unwrap().push((command.to_string(), args));
            self.outcome.clone()
        }
    }

    /// Never settles.
    struct HangingInvoker;

    #[async_trait]
    impl Invoker for HangingInvoker {
        async fn invoke(&self, _command: &str, _args: CommandArgs) -> formcall_commands::Result<Value> {
            std::future::pending().await
        }
    }

    fn calculator(a: &str, b: &str) -> FormView {
        let mut view = screens::calculator();
        view.set_field(0, a);
        view.set_field(1, b);
        view
    }

    #[tokio::test]
    async fn test_numeric_pair_resolves() {
        let invoker = MockInvoker::resolving(json!("5"));
        let mut view = calculator("2", "3");

        let submission = view.submit(0, &invoker).await;

        assert!(submission.is_call());
        assert_eq!(view.result(), "5");
        assert_eq!(view.error(), "");
        assert!(!view.is_busy());
        assert!(view.settled_at().is_some());

        let calls = invoker.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "calculate_sum");
        assert_eq!(calls[0].1.get("args"), Some(&json!(["2", "3"])));
    }

    #[tokio::test]
    async fn test_numeric_pair_requires_both() {
        let invoker = MockInvoker::resolving(json!("never"));

        for (a, b) in [("", "3"), ("2", ""), ("", "")] {
            let mut view = calculator(a, b);
            let submission = view.submit(0, &invoker).await;

            assert_eq!(submission, Submission::Rejected(BOTH_NUMBERS_REQUIRED.into()));
            assert_eq!(view.error(), "Please enter both numbers");
            assert_eq!(view.result(), "");
            assert!(!view.is_busy());
        }
        assert!(invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_numeric_pair_rejection_uses_error_panel() {
        let invoker = MockInvoker::rejecting(CommandError::Failed("backend down".into()));
        let mut view = calculator("2", "3");

        view.submit(0, &invoker).await;

        assert_eq!(view.error(), "Command failed: backend down");
        assert_eq!(view.result(), "");
        assert!(!view.is_busy());
    }

    #[tokio::test]
    async fn test_named_argument_blank_name() {
        let invoker = MockInvoker::resolving(json!("never"));
        let mut view = screens::commands();
        view.set_field(0, "  ");

        let submission = view.submit(1, &invoker).await;

        assert_eq!(submission, Submission::Rejected(NAME_REQUIRED.into()));
        assert_eq!(view.result(), "Please enter a name");
        assert_eq!(view.error(), "");
        assert!(invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_named_argument_sends_trimmed_name() {
        let invoker = MockInvoker::resolving(json!("Name: Ada"));
        let mut view = screens::commands();
        view.set_field(0, "  Ada ");

        view.submit(1, &invoker).await;

        assert_eq!(view.result(), "Name: Ada");
        let calls = invoker.calls();
        assert_eq!(calls[0].0, "add_with_name");
        assert_eq!(calls[0].1.require_str("name").unwrap(), "Ada");
    }

    #[tokio::test]
    async fn test_no_argument_rejection_shares_result_panel() {
        let invoker = MockInvoker::rejecting(CommandError::UnknownCommand("get_user".into()));
        let mut view = screens::user();

        view.submit(0, &invoker).await;

        assert_eq!(view.result(), "Unknown command: get_user");
        assert_eq!(view.error(), "");
        assert!(invoker.calls()[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_non_string_value_renders_as_json() {
        let invoker = MockInvoker::resolving(json!({"user": "ada"}));
        let mut view = screens::user();

        view.submit(0, &invoker).await;

        assert_eq!(view.result(), r#"{"user":"ada"}"#);
    }

    #[test]
    fn test_busy_between_issue_and_settle() {
        let mut view = calculator("2", "3");
        assert_eq!(view.state(), ViewState::Idle);

        let submission = view.begin_submit(0);
        assert!(submission.is_call());
        assert!(view.is_busy());
        assert_eq!(view.result(), "");
        assert_eq!(view.error(), "");

        view.settle(Ok(json!("5")));
        assert!(!view.is_busy());
        assert_eq!(view.result(), "5");

        view.begin_submit(0);
        assert!(view.is_busy());
        view.settle(Err(CommandError::Failed("x".into())));
        assert!(!view.is_busy());
        assert_eq!(view.result(), "");
        assert_eq!(view.error(), "Command failed: x");
    }

    #[test]
    fn test_new_attempt_clears_previous_text() {
        let mut view = calculator("2", "3");
        view.begin_submit(0);
        view.settle(Err(CommandError::Failed("x".into())));
        assert!(!view.error().is_empty());

        view.begin_submit(0);
        assert_eq!(view.error(), "");
        assert_eq!(view.result(), "");

        view.settle(Ok(json!("5")));
        view.set_field(1, "");
        view.begin_submit(0);
        // Validation failure must not leave the old result beside the error
        assert_eq!(view.result(), "");
        assert_eq!(view.error(), BOTH_NUMBERS_REQUIRED);
    }

    #[test]
    fn test_submit_while_pending_is_refused() {
        let mut view = calculator("2", "3");
        assert!(view.begin_submit(0).is_call());
        assert_eq!(view.begin_submit(0), Submission::Busy);
        assert!(view.is_busy());
    }

    #[test]
    fn test_settle_without_pending_is_ignored() {
        let mut view = screens::user();
        view.settle(Ok(json!("late")));
        assert_eq!(view.result(), "");
        assert!(view.settled_at().is_none());
    }

    #[test]
    fn test_no_such_action() {
        let mut view = screens::user();
        assert_eq!(view.begin_submit(3), Submission::NoSuchAction(3));
        assert!(!view.is_busy());
    }

    #[test]
    fn test_set_field_and_reset() {
        let mut view = calculator("2", "3");
        assert!(!view.set_field(9, "x"));

        view.begin_submit(0);
        view.reset();
        assert!(view.fields().iter().all(Field::is_empty));
        // Reset leaves an outstanding call alone
        assert!(view.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_submit_clears_busy() {
        let mut view = calculator("2", "3");

        let timed_out = tokio::time::timeout(Duration::from_secs(1), view.submit(0, &HangingInvoker))
            .await
            .is_err();

        assert!(timed_out);
        assert!(!view.is_busy());
        assert!(view.begin_submit(0).is_call());
    }

    #[test]
    fn test_custom_named_key() {
        let mut view = FormView::new("greet", "Greet")
            .with_field(Field::text("Who"))
            .with_action(Action::new(
                "Go",
                "greet",
                ActionKind::NamedArgument { field: 0, key: "who".into() },
            ));
        view.set_field(0, "Bo");

        match view.begin_submit(0) {
            Submission::Call(request) => {
                assert_eq!(request.command, "greet");
                assert_eq!(request.args.require_str("who").unwrap(), "Bo");
            }
            other => panic!("expected call, got {:?}", other),
        }
    }
}
