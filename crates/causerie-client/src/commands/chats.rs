//! Conversation commands: creation, selection, and the list projection.

use std::sync::Mutex;

use causerie_shared::{ConversationId, UserId};
use causerie_store::Conversation;
use chrono::Utc;
use tracing::info;

use crate::error::ClientError;
use crate::events::{ConversationSummary, ConversationView};
use crate::state::AppState;

/// Open (creating it first if needed) the direct conversation with `target`.
///
/// An empty or self target is rejected before the directory is consulted; an
/// unregistered target is rejected before anything is written. Both sides of
/// a pair derive the same id, so whoever initiates second just re-opens the
/// existing record.
pub fn start_direct_chat(
    state: &Mutex<AppState>,
    target: &str,
) -> Result<ConversationId, ClientError> {
    let mut guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    let me = guard.auth.current_user().ok_or(ClientError::NoActiveSession)?;

    let target = target.trim();
    if target.is_empty() || target == me.as_str() {
        return Err(ClientError::InvalidTarget);
    }
    let target = UserId::from(target);
    if !guard.store.is_registered(&target)? {
        return Err(ClientError::UnknownTarget(target));
    }

    let conversation = Conversation::direct(me, target);
    let id = conversation.id.clone();
    if guard.store.upsert_conversation(conversation)? {
        info!(conversation = %id, "direct conversation created");
    }

    guard.open_conversation = Some(id.clone());
    Ok(id)
}

/// Create a group conversation titled `title` with `members` plus the caller,
/// then open it.
///
/// Members are trimmed; empty names, the caller, duplicates, and
/// unregistered identifiers are dropped. At least one member must survive.
pub fn start_group_chat(
    state: &Mutex<AppState>,
    title: &str,
    members: &[&str],
) -> Result<ConversationId, ClientError> {
    let mut guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    let me = guard.auth.current_user().ok_or(ClientError::NoActiveSession)?;

    let title = title.trim();
    if title.is_empty() {
        return Err(ClientError::EmptyTitle);
    }

    let mut participants: Vec<UserId> = Vec::new();
    for raw in members {
        let name = raw.trim();
        if name.is_empty() || name == me.as_str() {
            continue;
        }
        let user = UserId::from(name);
        if participants.contains(&user) || !guard.store.is_registered(&user)? {
            continue;
        }
        participants.push(user);
    }
    if participants.is_empty() {
        return Err(ClientError::NoValidMembers);
    }
    participants.push(me);

    let id = ConversationId::group_at(Utc::now());
    guard
        .store
        .upsert_conversation(Conversation::group(id.clone(), title, participants))?;
    info!(conversation = %id, title = %title, "group conversation created");

    guard.open_conversation = Some(id.clone());
    Ok(id)
}

/// Select `id` as the open conversation and return its rendered log.
pub fn open_conversation(
    state: &Mutex<AppState>,
    id: &ConversationId,
) -> Result<ConversationView, ClientError> {
    let mut guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    let me = guard.auth.current_user().ok_or(ClientError::NoActiveSession)?;

    let view = super::messaging::view_of(&guard, &me, id)?;
    guard.open_conversation = Some(id.clone());
    Ok(view)
}

/// The caller's conversation list, labelled for display.
pub fn conversation_list(
    state: &Mutex<AppState>,
) -> Result<Vec<ConversationSummary>, ClientError> {
    let guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    let me = guard.auth.current_user().ok_or(ClientError::NoActiveSession)?;
    summaries_for(&guard, &me)
}

/// Project the collection into list entries for `viewer`. Callers hold the
/// state lock already.
pub(crate) fn summaries_for(
    state: &AppState,
    viewer: &UserId,
) -> Result<Vec<ConversationSummary>, ClientError> {
    Ok(state
        .store
        .conversations_for(viewer)?
        .into_iter()
        .map(|c| {
            let label = label_for(&c, viewer);
            ConversationSummary {
                id: c.id,
                label,
                is_group: c.is_group,
            }
        })
        .collect())
}

/// Group title, or the other participant of a direct conversation.
pub(crate) fn label_for(conversation: &Conversation, viewer: &UserId) -> String {
    if conversation.is_group {
        conversation.title.clone().unwrap_or_default()
    } else {
        conversation
            .participants
            .iter()
            .find(|p| *p != viewer)
            .map(|p| p.to_string())
            .unwrap_or_default()
    }
}
