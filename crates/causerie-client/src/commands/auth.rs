//! Session commands: account creation, sign-in, sign-out.
//!
//! Every successful authentication, by whatever method, registers the
//! resulting identifier in the shared directory. That write is what makes
//! the user discoverable by others.

use std::sync::Mutex;

use causerie_shared::{SocialProvider, UserId};
use tracing::info;

use crate::error::ClientError;
use crate::state::AppState;

/// Create an account, open its session, and register the identifier.
pub fn sign_up(state: &Mutex<AppState>, id: &str, secret: &str) -> Result<UserId, ClientError> {
    let guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    let user = guard.auth.sign_up(id, secret)?;
    guard.store.register_user(&user)?;
    info!(user = %user, "signed up");
    Ok(user)
}

/// Sign in to an existing account; the identifier is re-registered
/// (write-through, idempotent).
pub fn sign_in(state: &Mutex<AppState>, id: &str, secret: &str) -> Result<UserId, ClientError> {
    let guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    let user = guard.auth.sign_in(id, secret)?;
    guard.store.register_user(&user)?;
    info!(user = %user, "signed in");
    Ok(user)
}

/// Sign in through a federated provider (closed set; phone is rejected).
pub fn sign_in_with(
    state: &Mutex<AppState>,
    provider: SocialProvider,
) -> Result<UserId, ClientError> {
    let guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    let user = guard.auth.sign_in_with(provider)?;
    guard.store.register_user(&user)?;
    info!(user = %user, provider = %provider, "signed in via provider");
    Ok(user)
}

/// Close the session and drop the open-conversation selection.
pub fn sign_out(state: &Mutex<AppState>) -> Result<(), ClientError> {
    let mut guard = state.lock().map_err(|_| ClientError::StatePoisoned)?;
    guard.auth.sign_out();
    guard.open_conversation = None;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Authenticator, IdentityProvider};
    use causerie_store::{ChatStore, Origin};

    fn fresh_state() -> Mutex<AppState> {
        let auth = Authenticator::new(IdentityProvider::new());
        let store = ChatStore::new(Origin::in_memory().context());
        Mutex::new(AppState::new(auth, store))
    }

    #[test]
    fn sign_up_registers_the_identifier() {
        let state = fresh_state();
        let user = sign_up(&state, "alice", "pw").unwrap();

        let guard = state.lock().unwrap();
        assert!(guard.store.is_registered(&user).unwrap());
        assert_eq!(guard.auth.current_user(), Some(user));
    }

    #[test]
    fn federated_sign_in_registers_the_minted_identifier() {
        let state = fresh_state();
        let user = sign_in_with(&state, SocialProvider::Twitter).unwrap();
        assert!(user.as_str().starts_with("twitter:"));

        let guard = state.lock().unwrap();
        assert!(guard.store.is_registered(&user).unwrap());
    }

    #[test]
    fn phone_sign_in_surfaces_the_provider_error() {
        let state = fresh_state();
        let err = sign_in_with(&state, SocialProvider::Phone).unwrap_err();
        assert!(matches!(err, ClientError::Auth(_)));
    }

    #[test]
    fn sign_out_clears_session_and_selection() {
        let state = fresh_state();
        sign_up(&state, "alice", "pw").unwrap();
        state.lock().unwrap().open_conversation =
            Some(causerie_shared::ConversationId::direct(
                &UserId::from("alice"),
                &UserId::from("bob"),
            ));

        sign_out(&state).unwrap();

        let guard = state.lock().unwrap();
        assert_eq!(guard.auth.current_user(), None);
        assert_eq!(guard.open_conversation, None);
    }
}
