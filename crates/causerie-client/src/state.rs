//! Application state for one browsing context.
//!
//! One [`AppState`] lives in an `Arc<Mutex<_>>` per context, shared between
//! the user-intent commands and that context's sync bridge. Contexts never
//! share in-memory state; everything they exchange goes through the origin
//! store.

use causerie_shared::ConversationId;
use causerie_store::ChatStore;

use crate::auth::Authenticator;

/// Central state of one context.
pub struct AppState {
    /// Session handle onto the identity provider.
    pub auth: Authenticator,

    /// Typed store access through this context's handle.
    pub store: ChatStore,

    /// Conversation currently open in the view, if any.
    pub open_conversation: Option<ConversationId>,
}

impl AppState {
    /// Assemble the state of a fresh, signed-out context.
    pub fn new(auth: Authenticator, store: ChatStore) -> Self {
        Self {
            auth,
            store,
            open_conversation: None,
        }
    }
}
