use causerie_shared::ConversationId;
use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite failure from a disk-backed origin.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No platform data directory could be determined.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Filesystem failure while preparing the store location.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An append targeted a conversation id that is not in the collection.
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// A document could not be serialized for persistence.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Schema migration failure on a disk-backed origin.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A store lock was poisoned by a panic in another thread.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Convenience alias used throughout the store crate.
pub type Result<T> = std::result::Result<T, StoreError>;
