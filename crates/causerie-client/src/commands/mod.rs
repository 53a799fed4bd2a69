//! User-intent command handlers.
//!
//! Each sub-module groups related intents by domain. Every public function
//! locks the context's shared [`AppState`](crate::state::AppState), resolves
//! the active session where one is required, and maps the intent onto store
//! and authentication operations.

pub mod auth;
pub mod chats;
pub mod messaging;
pub mod search;
