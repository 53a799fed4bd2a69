//! Messaging commands: sending into the open conversation and rendering
//! logs for display.

use std::sync::Mutex;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use causerie_shared::{ConversationId, UserId};
use causerie_store::{Message, StoreError};
use chrono::Utc;
use tracing::info;

use crate::error::ClientError;
use crate::events::{ConversationView, Direction, MessageView};
use crate::state::AppState;

/// Append a text message to the open conversation.
pub fn send_text(state: &Mutex<AppState>, text: &str) -> Result<Message, ClientError> {
    let guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    let me = guard.auth.current_user().ok_or(ClientError::NoActiveSession)?;
    let open = guard
        .open_conversation
        .clone()
        .ok_or(ClientError::NoOpenConversation)?;

    let text = text.trim();
    if text.is_empty() {
        return Err(ClientError::EmptyMessage);
    }

    let message = Message::text(me, text, Utc::now());
    guard.store.append_message(&open, message.clone())?;
    info!(conversation = %open, "text message sent");
    Ok(message)
}

/// Append an image message to the open conversation.
///
/// The bytes are embedded whole as a base64 data URL; the record never
/// references anything outside the store.
pub fn send_image(
    state: &Mutex<AppState>,
    bytes: &[u8],
    mime: &str,
) -> Result<Message, ClientError> {
    let guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    let me = guard.auth.current_user().ok_or(ClientError::NoActiveSession)?;
    let open = guard
        .open_conversation
        .clone()
        .ok_or(ClientError::NoOpenConversation)?;

    if bytes.is_empty() {
        return Err(ClientError::EmptyMessage);
    }

    let payload = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));
    let message = Message::image(me, payload, Utc::now());
    guard.store.append_message(&open, message.clone())?;
    info!(conversation = %open, size = bytes.len(), "image message sent");
    Ok(message)
}

/// Render the log of `id` for the caller without changing the selection.
pub fn conversation_view(
    state: &Mutex<AppState>,
    id: &ConversationId,
) -> Result<ConversationView, ClientError> {
    let guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    let me = guard.auth.current_user().ok_or(ClientError::NoActiveSession)?;
    view_of(&guard, &me, id)
}

/// Render `id`'s log for `viewer`, message direction included. Callers hold
/// the state lock already.
pub(crate) fn view_of(
    state: &AppState,
    viewer: &UserId,
    id: &ConversationId,
) -> Result<ConversationView, ClientError> {
    let conversation = state
        .store
        .get_conversation(id)?
        .ok_or_else(|| ClientError::Store(StoreError::ConversationNotFound(id.clone())))?;

    let label = super::chats::label_for(&conversation, viewer);
    let messages = conversation
        .messages
        .iter()
        .map(|m| MessageView {
            sender: m.sender.clone(),
            body: m.body.clone(),
            timestamp: m.timestamp,
            direction: if &m.sender == viewer {
                Direction::Sent
            } else {
                Direction::Received
            },
        })
        .collect();

    Ok(ConversationView {
        id: conversation.id,
        label,
        is_group: conversation.is_group,
        messages,
    })
}
