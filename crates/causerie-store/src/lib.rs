//! # causerie-store
//!
//! Local persistence for causerie clients: a simulation of the browser's
//! per-origin key-value store (shared state, cross-context change notices,
//! optional SQLite durability) and the typed chat data access built on top
//! of it. The two persisted documents are the conversation collection and
//! the registered-user set, each stored whole as JSON under a fixed key.

pub mod conversations;
pub mod migrations;
pub mod models;
pub mod origin;
pub mod store;
pub mod users;

mod error;

pub use error::StoreError;
pub use models::*;
pub use origin::{ContextId, Origin, StoreContext, StoreNotification};
pub use store::ChatStore;
