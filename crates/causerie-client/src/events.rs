//! View events pushed at the rendering layer.
//!
//! Rendering itself is out of scope; payloads are serializable so a UI shell
//! can forward them untouched.

use causerie_shared::{ConversationId, UserId};
use causerie_store::MessageBody;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

/// One entry of the conversation list, labelled for a given viewer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConversationSummary {
    pub id: ConversationId,
    /// Group title, or the other participant for direct conversations.
    pub label: String,
    pub is_group: bool,
}

/// Whether the viewer sent a message or received it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

/// One message prepared for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MessageView {
    pub sender: UserId,
    #[serde(flatten)]
    pub body: MessageBody,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub direction: Direction,
}

/// A conversation's full log prepared for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConversationView {
    pub id: ConversationId,
    pub label: String,
    pub is_group: bool,
    pub messages: Vec<MessageView>,
}

/// Events the sync bridge pushes when another context changes shared state.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ViewEvent {
    /// The conversation list changed under this context.
    ConversationListChanged {
        conversations: Vec<ConversationSummary>,
    },
    /// The open conversation's log changed under this context.
    OpenConversationChanged { view: ConversationView },
}

/// Sender half of a context's view-event channel.
pub type ViewEventSender = mpsc::UnboundedSender<ViewEvent>;

/// Push an event toward the rendering layer. A gone receiver is logged, not
/// an error; the view may simply have closed.
pub fn emit_event(tx: &ViewEventSender, event: ViewEvent) {
    if let Err(e) = tx.send(event) {
        tracing::error!(error = %e, "Failed to emit view event");
    }
}
