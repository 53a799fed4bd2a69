use causerie_shared::{AuthError, UserId};
use causerie_store::StoreError;
use thiserror::Error;

/// Failures surfaced by the client commands and the sync bridge.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A command that needs a signed-in user ran without one.
    #[error("No active session")]
    NoActiveSession,

    /// Direct-chat target is empty or the caller themself.
    #[error("Invalid chat target")]
    InvalidTarget,

    /// Direct-chat target is not in the registered-user directory.
    #[error("Unknown user: {0}")]
    UnknownTarget(UserId),

    /// Group title was empty after trimming.
    #[error("Group title is empty")]
    EmptyTitle,

    /// No listed group member survived validation.
    #[error("No valid members for the group")]
    NoValidMembers,

    /// A send was attempted with no conversation open.
    #[error("No conversation is open")]
    NoOpenConversation,

    /// Message content was empty after trimming.
    #[error("Message is empty")]
    EmptyMessage,

    /// The shared application state lock was poisoned.
    #[error("Application state lock poisoned")]
    StatePoisoned,

    /// Authentication failure, surfaced verbatim.
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Store layer failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
