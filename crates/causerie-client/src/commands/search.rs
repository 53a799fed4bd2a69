//! User search over the registered directory.

use std::sync::Mutex;

use causerie_shared::UserId;

use crate::error::ClientError;
use crate::state::AppState;

/// Registered identifiers matching `query` case-insensitively, excluding the
/// caller. An empty query matches everyone else; a hit can be handed
/// straight to [`super::chats::start_direct_chat`].
pub fn search_users(state: &Mutex<AppState>, query: &str) -> Result<Vec<UserId>, ClientError> {
    let guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    let me = guard.auth.current_user().ok_or(ClientError::NoActiveSession)?;
    Ok(guard.store.search_users(query, &me)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Authenticator, IdentityProvider};
    use crate::commands;
    use causerie_store::{ChatStore, Origin};

    #[test]
    fn search_result_feeds_direct_chat_creation() {
        let origin = Origin::in_memory();
        let provider = IdentityProvider::new();

        let alice = {
            let auth = Authenticator::new(provider.clone());
            Mutex::new(AppState::new(auth, ChatStore::new(origin.context())))
        };
        let bob = {
            let auth = Authenticator::new(provider.clone());
            Mutex::new(AppState::new(auth, ChatStore::new(origin.context())))
        };
        commands::auth::sign_up(&alice, "alice", "a").unwrap();
        commands::auth::sign_up(&bob, "bob", "b").unwrap();

        let hits = search_users(&alice, "BO").unwrap();
        assert_eq!(hits, vec![UserId::from("bob")]);

        let id = commands::chats::start_direct_chat(&alice, hits[0].as_str()).unwrap();
        assert_eq!(alice.lock().unwrap().open_conversation, Some(id));
    }

    #[test]
    fn search_requires_a_session() {
        let origin = Origin::in_memory();
        let auth = Authenticator::new(IdentityProvider::new());
        let state = Mutex::new(AppState::new(auth, ChatStore::new(origin.context())));

        assert!(matches!(
            search_users(&state, "x").unwrap_err(),
            ClientError::NoActiveSession
        ));
    }
}
