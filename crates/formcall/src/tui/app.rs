//! TUI application state and logic.

use std::sync::mpsc;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use formcall_commands::{display_text, CommandError, Invoker};
use formcall_form::{screens, CallRequest, FormView, Submission};

/// Direction of a message in the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageDirection {
    /// Call issued to the backend
    Sent,
    /// Settlement received from the backend
    Received,
    /// Validation and status messages
    System,
}

/// A line in the activity log.
#[derive(Debug, Clone)]
pub struct Message {
    /// When the message was created
    pub timestamp: DateTime<Utc>,
    /// Direction (sent, received, system)
    pub direction: MessageDirection,
    /// Screen id (or "system")
    pub screen: String,
    /// Message content
    pub content: String,
}

impl Message {
    /// Create a new message.
    pub fn new(direction: MessageDirection, screen: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            direction,
            screen: screen.into(),
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageDirection::System, "system", content)
    }

    /// Create a sent message.
    pub fn sent(screen: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageDirection::Sent, screen, content)
    }

    /// Create a received message.
    pub fn received(screen: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageDirection::Received, screen, content)
    }
}

/// Outcome of a call, tagged with the screen that issued it.
#[derive(Debug)]
pub(super) struct Settlement {
    screen: usize,
    outcome: Result<Value, CommandError>,
}

/// TUI application state.
pub struct App {
    /// One view per tab
    pub screens: Vec<FormView>,
    /// Index of the visible screen
    pub current: usize,
    /// Focused field on the visible screen
    pub focused_field: usize,
    /// Selected button on the visible screen
    pub selected_action: usize,
    /// Activity log
    pub messages: Vec<Message>,
    /// Progress indicator (0.0 - 1.0)
    pub progress: f64,
    /// Whether the app should quit
    pub should_quit: bool,

    invoker: Arc<dyn Invoker>,
    runtime: Handle,
    settle_tx: mpsc::Sender<Settlement>,
    settle_rx: mpsc::Receiver<Settlement>,
}

impl App {
    /// Create a new App with the built-in screens.
    pub fn new(invoker: Arc<dyn Invoker>, runtime: Handle) -> Self {
        let (settle_tx, settle_rx) = mpsc::channel();

        let mut app = Self {
            screens: screens::all(),
            current: 0,
            focused_field: 0,
            selected_action: 0,
            messages: Vec::new(),
            progress: 0.0,
            should_quit: false,
            invoker,
            runtime,
            settle_tx,
            settle_rx,
        };

        app.messages.push(Message::system("Welcome to formcall"));
        app.messages.push(Message::system("Tab switches screens, Enter presses the button"));
        app
    }

    /// The visible screen.
    pub fn view(&self) -> &FormView {
        &self.screens[self.current]
    }

    fn view_mut(&mut self) -> &mut FormView {
        &mut self.screens[self.current]
    }

    /// True if any screen has a call outstanding.
    pub fn any_busy(&self) -> bool {
        self.screens.iter().any(FormView::is_busy)
    }

    // ==================== Navigation ====================

    /// Switch to the next screen.
    pub fn next_screen(&mut self) {
        self.current = (self.current + 1) % self.screens.len();
        self.reset_focus();
    }

    /// Switch to the previous screen.
    pub fn previous_screen(&mut self) {
        self.current = (self.current + self.screens.len() - 1) % self.screens.len();
        self.reset_focus();
    }

    /// Switch to a screen by id. Returns false if no such screen.
    pub fn select_screen(&mut self, id: &str) -> bool {
        match self.screens.iter().position(|v| v.id() == id) {
            Some(index) => {
                self.current = index;
                self.reset_focus();
                true
            }
            None => false,
        }
    }

    fn reset_focus(&mut self) {
        self.focused_field = 0;
        self.selected_action = 0;
    }

    /// Move focus to the next field.
    pub fn focus_next_field(&mut self) {
        let count = self.view().fields().len();
        if count > 0 {
            self.focused_field = (self.focused_field + 1) % count;
        }
    }

    /// Move focus to the previous field.
    pub fn focus_previous_field(&mut self) {
        let count = self.view().fields().len();
        if count > 0 {
            self.focused_field = (self.focused_field + count - 1) % count;
        }
    }

    /// Select the button to the right.
    pub fn select_next_action(&mut self) {
        if self.selected_action + 1 < self.view().actions().len() {
            self.selected_action += 1;
        }
    }

    /// Select the button to the left.
    pub fn select_previous_action(&mut self) {
        self.selected_action = self.selected_action.saturating_sub(1);
    }

    /// Select a button by index, ignoring out-of-range indexes.
    pub fn select_action(&mut self, index: usize) {
        if index < self.view().actions().len() {
            self.selected_action = index;
        }
    }

    // ==================== Editing ====================

    /// Handle character input into the focused field.
    pub fn enter_char(&mut self, c: char) {
        let index = self.focused_field;
        let Some(field) = self.view().field(index) else { return };
        if !field.kind.accepts(c) {
            return;
        }
        let mut value = field.value().to_string();
        value.push(c);
        self.view_mut().set_field(index, value);
    }

    /// Delete the last character of the focused field.
    pub fn delete_char(&mut self) {
        let index = self.focused_field;
        let Some(field) = self.view().field(index) else { return };
        let mut value = field.value().to_string();
        if value.pop().is_some() {
            self.view_mut().set_field(index, value);
        }
    }

    /// Clear the visible screen's fields and text.
    pub fn reset_view(&mut self) {
        self.view_mut().reset();
    }

    // ==================== Calls ====================

    /// Press the selected button on the visible screen.
    pub fn submit(&mut self) {
        let screen = self.current;
        let action = self.selected_action;
        let id = self.view().id().to_string();

        match self.screens[screen].begin_submit(action) {
            Submission::Call(request) => {
                self.messages.push(Message::sent(id, describe(&request)));
                self.progress = 0.0;
                self.dispatch(screen, request);
            }
            Submission::Rejected(message) => {
                self.messages.push(Message::system(message));
            }
            Submission::Busy => {
                debug!(screen = %id, "button disabled while pending");
            }
            Submission::NoSuchAction(index) => {
                warn!(screen = %id, action = index, "no such button");
            }
        }
    }

    /// Run the call on the runtime; the settlement comes back over the channel.
    fn dispatch(&self, screen: usize, request: CallRequest) {
        let invoker = Arc::clone(&self.invoker);
        let tx = self.settle_tx.clone();

        self.runtime.spawn(async move {
            // A panicking handler must still settle
            let call = tokio::spawn(async move { invoker.invoke(&request.command, request.args).await });
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(e) => Err(CommandError::Aborted(e.to_string())),
            };
            let _ = tx.send(Settlement { screen, outcome });
        });
    }

    /// Apply any settlements that have arrived and advance the progress bar.
    pub fn poll_settlements(&mut self) {
        while let Ok(settlement) = self.settle_rx.try_recv() {
            let Some(view) = self.screens.get_mut(settlement.screen) else {
                continue;
            };

            let text = match &settlement.outcome {
                Ok(value) => display_text(value),
                Err(e) => format!("Error: {}", e),
            };
            view.settle(settlement.outcome);

            let id = view.id().to_string();
            self.messages.push(Message::received(id, text));
        }

        if self.any_busy() {
            self.progress = (self.progress + 0.05) % 1.0;
        } else {
            self.progress = 0.0;
        }
    }
}

fn describe(request: &CallRequest) -> String {
    if request.args.is_empty() {
        request.command.clone()
    } else {
        let args = serde_json::to_string(&request.args).unwrap_or_default();
        format!("{} {}", request.command, args)
    }
}
