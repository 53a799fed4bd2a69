use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DIRECT_CHAT_DELIMITER, DIRECT_CHAT_PREFIX, GROUP_CHAT_PREFIX};

// User identity = the identifier handed out by the identity provider
// (an email address or a provider-assigned uid). Opaque and compared as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConversationId(pub String);

impl ConversationId {
    /// Derive the id of the direct conversation between two users.
    ///
    /// Order-independent: the pair is sorted lexicographically before being
    /// joined, so both participants always compute the same id.
    pub fn direct(a: &UserId, b: &UserId) -> Self {
        let (lo, hi) = if a.as_str() <= b.as_str() { (a, b) } else { (b, a) };
        Self(format!(
            "{}{}{}{}",
            DIRECT_CHAT_PREFIX, lo, DIRECT_CHAT_DELIMITER, hi
        ))
    }

    /// Derive a group conversation id from its creation instant.
    ///
    /// Not deterministic across creations: the id is the creation clock in
    /// milliseconds, so two creations within the same millisecond collide and
    /// merge into one record instead of duplicating.
    pub fn group_at(created_at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}{}",
            GROUP_CHAT_PREFIX,
            created_at.timestamp_millis()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of federated login providers offered by the auth surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialProvider {
    Google,
    Facebook,
    Twitter,
    /// Listed in the sign-in surface but rejected as unsupported.
    Phone,
}

impl SocialProvider {
    /// Stable lowercase slug, used when minting provider-scoped identifiers.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
            Self::Phone => "phone",
        }
    }
}

impl std::fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}
