//! UI notifications and navigation signals emitted by the views.
//!
//! Views never render or route on their own; they push [`UiEvent`]s onto an
//! [`EventBus`] and whoever hosts them (the CLI, a test) drains the receiver.

use tokio::sync::mpsc;

/// Route of the book list.
pub const LIST_ROUTE: &str = "/";

/// Route of the detail view for `book_id`.
pub fn detail_route(book_id: &str) -> String {
    format!("/books/{book_id}")
}

/// A user-visible toast or alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(message) | Notification::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }
}

/// Side effects a view asks its host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Notify(Notification),
    /// Navigate the external router to this path.
    Navigate(String),
}

/// Sending half of the UI event channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl EventBus {
    /// Create a bus and the receiver its host drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: UiEvent) {
        tracing::debug!(target: "bookshelf-events", ?event, "ui event");
        if self.tx.send(event).is_err() {
            tracing::debug!(target: "bookshelf-events", "ui event dropped; no receiver");
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(UiEvent::Notify(Notification::Success(message.into())));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(UiEvent::Notify(Notification::Error(message.into())));
    }

    pub fn navigate(&self, path: impl Into<String>) {
        self.emit(UiEvent::Navigate(path.into()));
    }
}

/// Drain everything currently queued on `rx` without waiting.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
