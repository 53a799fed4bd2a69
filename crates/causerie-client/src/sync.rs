//! Cross-context sync bridge.
//!
//! Subscribes to the origin store's change notices and mirrors writes made
//! by *other* contexts into this context's view: the conversation list is
//! re-projected, and when a conversation is open its log is reloaded from
//! the freshly persisted state. The bridge is strictly read-side; it never
//! writes back to the store, so bridges cannot feed each other.

use std::sync::{Arc, Mutex};

use causerie_shared::constants::CONVERSATIONS_KEY;
use causerie_store::StoreNotification;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::events::{emit_event, ViewEvent, ViewEventSender};
use crate::state::AppState;

/// Subscribe this context to store change notices and spawn the loop that
/// forwards refreshed views to the rendering layer. Must be called from
/// within a tokio runtime.
pub fn start_sync_bridge(
    state: Arc<Mutex<AppState>>,
    view_tx: ViewEventSender,
) -> Result<JoinHandle<()>, ClientError> {
    let notices = {
        let guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
        guard.store.context().subscribe()
    };

    info!("sync bridge started");

    Ok(tokio::spawn(async move {
        notice_loop(state, view_tx, notices).await;
    }))
}

/// Main loop: one view refresh per change notice from another context.
async fn notice_loop(
    state: Arc<Mutex<AppState>>,
    view_tx: ViewEventSender,
    mut notices: mpsc::UnboundedReceiver<StoreNotification>,
) {
    while let Some(notice) = notices.recv().await {
        handle_store_change(&state, &view_tx, &notice);
    }

    warn!("sync bridge loop ended");
}

/// React to one change notice. Only the conversation collection drives the
/// view; writes to any other key are ignored.
fn handle_store_change(
    state: &Mutex<AppState>,
    view_tx: &ViewEventSender,
    notice: &StoreNotification,
) {
    if notice.key != CONVERSATIONS_KEY {
        debug!(key = %notice.key, "ignoring change notice for unrelated key");
        return;
    }

    let guard = match state.lock() {
        Ok(g) => g,
        Err(_) => return,
    };

    // A notice can land while this context is signed out; there is nothing
    // to render for it then.
    let viewer = match guard.auth.current_user() {
        Some(v) => v,
        None => {
            debug!("change notice with no active session; skipping refresh");
            return;
        }
    };

    match crate::commands::chats::summaries_for(&guard, &viewer) {
        Ok(conversations) => {
            emit_event(view_tx, ViewEvent::ConversationListChanged { conversations });
        }
        Err(e) => {
            warn!(error = %e, "failed to re-project conversation list");
            return;
        }
    }

    if let Some(open) = guard.open_conversation.clone() {
        match crate::commands::messaging::view_of(&guard, &viewer, &open) {
            Ok(view) => emit_event(view_tx, ViewEvent::OpenConversationChanged { view }),
            Err(e) => {
                debug!(conversation = %open, error = %e, "open conversation not reloadable")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Authenticator, IdentityProvider};
    use crate::commands;
    use crate::events::Direction;
    use causerie_shared::UserId;
    use causerie_store::{ChatStore, MessageBody, Origin};

    fn context_on(origin: &Origin, provider: &Arc<IdentityProvider>) -> Arc<Mutex<AppState>> {
        let auth = Authenticator::new(provider.clone());
        let store = ChatStore::new(origin.context());
        Arc::new(Mutex::new(AppState::new(auth, store)))
    }

    #[tokio::test]
    async fn peer_context_sees_a_new_message_without_reloading() {
        let origin = Origin::in_memory();
        let provider = IdentityProvider::new();
        let alice = context_on(&origin, &provider);
        let bob = context_on(&origin, &provider);

        commands::auth::sign_up(&alice, "alice", "a").unwrap();
        commands::auth::sign_up(&bob, "bob", "b").unwrap();

        // Either side may initiate; both land on the same conversation.
        let id = commands::chats::start_direct_chat(&alice, "bob").unwrap();
        let same = commands::chats::start_direct_chat(&bob, "alice").unwrap();
        assert_eq!(id, same);

        let (view_tx, mut view_rx) = mpsc::unbounded_channel();
        let bridge = start_sync_bridge(bob.clone(), view_tx).unwrap();

        commands::messaging::send_text(&alice, "salut bob").unwrap();

        match view_rx.recv().await.unwrap() {
            ViewEvent::ConversationListChanged { conversations } => {
                assert_eq!(conversations.len(), 1);
                assert_eq!(conversations[0].label, "alice");
            }
            other => panic!("expected a list refresh first, got {other:?}"),
        }

        match view_rx.recv().await.unwrap() {
            ViewEvent::OpenConversationChanged { view } => {
                assert_eq!(view.id, id);
                assert_eq!(view.messages.len(), 1);
                assert_eq!(view.messages[0].body, MessageBody::Text("salut bob".into()));
                assert_eq!(view.messages[0].direction, Direction::Received);
            }
            other => panic!("expected the open log to refresh, got {other:?}"),
        }

        bridge.abort();
    }

    #[tokio::test]
    async fn own_writes_do_not_echo_back() {
        let origin = Origin::in_memory();
        let provider = IdentityProvider::new();
        let alice = context_on(&origin, &provider);
        let bob = context_on(&origin, &provider);

        commands::auth::sign_up(&alice, "alice", "a").unwrap();
        commands::auth::sign_up(&bob, "bob", "b").unwrap();
        commands::chats::start_direct_chat(&alice, "bob").unwrap();

        let (view_tx, mut view_rx) = mpsc::unbounded_channel();
        let bridge = start_sync_bridge(alice.clone(), view_tx).unwrap();

        commands::messaging::send_text(&alice, "a moi-meme").unwrap();

        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        assert!(view_rx.try_recv().is_err());

        bridge.abort();
    }

    #[tokio::test]
    async fn unrelated_keys_do_not_refresh_the_view() {
        let origin = Origin::in_memory();
        let provider = IdentityProvider::new();
        let alice = context_on(&origin, &provider);
        let bob = context_on(&origin, &provider);

        commands::auth::sign_up(&bob, "bob", "b").unwrap();

        let (view_tx, mut view_rx) = mpsc::unbounded_channel();
        let bridge = start_sync_bridge(bob.clone(), view_tx).unwrap();

        // Registration writes the user directory, not the collection.
        commands::auth::sign_up(&alice, "alice", "a").unwrap();

        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        assert!(view_rx.try_recv().is_err());

        bridge.abort();
    }

    #[tokio::test]
    async fn group_sends_fan_out_to_every_member_context() {
        let origin = Origin::in_memory();
        let provider = IdentityProvider::new();
        let alice = context_on(&origin, &provider);
        let bob = context_on(&origin, &provider);
        let carol = context_on(&origin, &provider);

        commands::auth::sign_up(&alice, "alice", "a").unwrap();
        commands::auth::sign_up(&bob, "bob", "b").unwrap();
        commands::auth::sign_up(&carol, "carol", "c").unwrap();

        let id = commands::chats::start_group_chat(&alice, "Trio", &["bob", "carol"]).unwrap();
        commands::chats::open_conversation(&bob, &id).unwrap();
        commands::chats::open_conversation(&carol, &id).unwrap();

        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        let (carol_tx, mut carol_rx) = mpsc::unbounded_channel();
        let bridges = [
            start_sync_bridge(bob.clone(), bob_tx).unwrap(),
            start_sync_bridge(carol.clone(), carol_tx).unwrap(),
        ];

        commands::messaging::send_text(&alice, "bonjour le groupe").unwrap();

        for rx in [&mut bob_rx, &mut carol_rx] {
            match rx.recv().await.unwrap() {
                ViewEvent::ConversationListChanged { conversations } => {
                    assert_eq!(conversations[0].label, "Trio");
                    assert!(conversations[0].is_group);
                }
                other => panic!("expected a list refresh first, got {other:?}"),
            }

            match rx.recv().await.unwrap() {
                ViewEvent::OpenConversationChanged { view } => {
                    assert_eq!(view.messages.len(), 1);
                    assert_eq!(view.messages[0].sender, UserId::from("alice"));
                    assert_eq!(view.messages[0].direction, Direction::Received);
                }
                other => panic!("expected the open log to refresh, got {other:?}"),
            }
        }

        for bridge in bridges {
            bridge.abort();
        }
    }

    #[tokio::test]
    async fn signed_out_contexts_ignore_notices() {
        let origin = Origin::in_memory();
        let provider = IdentityProvider::new();
        let alice = context_on(&origin, &provider);
        let bob = context_on(&origin, &provider);

        commands::auth::sign_up(&alice, "alice", "a").unwrap();
        commands::auth::sign_up(&bob, "bob", "b").unwrap();
        commands::chats::start_direct_chat(&alice, "bob").unwrap();
        commands::auth::sign_out(&bob).unwrap();

        let (view_tx, mut view_rx) = mpsc::unbounded_channel();
        let bridge = start_sync_bridge(bob.clone(), view_tx).unwrap();

        commands::messaging::send_text(&alice, "personne n'ecoute").unwrap();

        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        assert!(view_rx.try_recv().is_err());

        bridge.abort();
    }
}
