//! Domain records persisted as JSON in the shared origin store.
//!
//! Field names and value shapes here *are* the persisted wire format: the
//! conversation collection is one JSON object mapping conversation id to
//! record, written whole under a single key.

use std::collections::BTreeMap;

use causerie_shared::{ConversationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted collection: conversation id to conversation record.
pub type Collection = BTreeMap<ConversationId, Conversation>;

/// One conversation thread, direct or group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique conversation identifier. Immutable once created.
    pub id: ConversationId,
    /// Whether this is a group conversation.
    pub is_group: bool,
    /// Group display title. Absent on direct conversations, whose label is
    /// derived at render time from the other participant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Participant identifiers, fixed at creation.
    pub participants: Vec<UserId>,
    /// Message log in append order.
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Build a direct conversation between `me` and `other` with an empty
    /// log. The id is derived from the pair, so both sides converge on it.
    pub fn direct(me: UserId, other: UserId) -> Self {
        let id = ConversationId::direct(&me, &other);
        Self {
            id,
            is_group: false,
            title: None,
            participants: vec![me, other],
            messages: Vec::new(),
        }
    }

    /// Build a titled group conversation with an empty log.
    pub fn group(id: ConversationId, title: impl Into<String>, participants: Vec<UserId>) -> Self {
        Self {
            id,
            is_group: true,
            title: Some(title.into()),
            participants,
            messages: Vec::new(),
        }
    }

    /// Whether `user` belongs to this conversation.
    pub fn has_participant(&self, user: &UserId) -> bool {
        self.participants.contains(user)
    }
}

/// A single message inside a conversation's log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Identifier of the sending participant.
    pub sender: UserId,
    /// Typed payload, persisted as the `type`/`content` field pair.
    #[serde(flatten)]
    pub body: MessageBody,
    /// Creation time, persisted as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a text message stamped `at`.
    pub fn text(sender: UserId, content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            sender,
            body: MessageBody::Text(content.into()),
            timestamp: at,
        }
    }

    /// Build an image message stamped `at`. `content` carries the whole
    /// encoded payload (a data URL), never an external reference.
    pub fn image(sender: UserId, content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            sender,
            body: MessageBody::Image(content.into()),
            timestamp: at,
        }
    }
}

/// Message payload, tagged on the wire as `"type"` with the payload itself
/// under `"content"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum MessageBody {
    /// Plain text.
    Text(String),
    /// Self-contained encoded image payload.
    Image(String),
}
