//! # causerie-shared
//!
//! Types shared by every causerie crate: user and conversation identifiers,
//! the conversation-id derivation rules, the closed set of federated login
//! providers, and the authentication error taxonomy.

pub mod constants;
pub mod error;
pub mod types;

pub use error::AuthError;
pub use types::{ConversationId, SocialProvider, UserId};
