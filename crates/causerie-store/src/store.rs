//! Typed chat data access over one browsing context's store handle.
//!
//! The [`ChatStore`] struct wraps a [`StoreContext`] and exposes the two
//! persisted documents as domain operations: the conversation collection
//! (see [`crate::conversations`]) and the registered-user set (see
//! [`crate::users`]). Every operation reads fresh from the shared store, so
//! a `ChatStore` carries no cached state of its own.

use crate::origin::StoreContext;

/// Wrapper around a [`StoreContext`].
pub struct ChatStore {
    ctx: StoreContext,
}

impl ChatStore {
    /// Bind chat data access to one context's handle.
    pub fn new(ctx: StoreContext) -> Self {
        Self { ctx }
    }

    /// Return a reference to the underlying store context.
    ///
    /// Callers should prefer the typed helpers, but direct access is needed
    /// to subscribe to change notices.
    pub fn context(&self) -> &StoreContext {
        &self.ctx
    }
}
