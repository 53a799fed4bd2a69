/// Application name
pub const APP_NAME: &str = "Causerie";

/// Store key holding the registered-user set (JSON array of identifiers)
pub const REGISTERED_USERS_KEY: &str = "registeredUsers";

/// Store key holding the conversation collection (JSON object keyed by
/// conversation id)
pub const CONVERSATIONS_KEY: &str = "conversations";

/// Prefix of direct-conversation ids
pub const DIRECT_CHAT_PREFIX: &str = "chat_";

/// Delimiter joining the sorted participant pair inside a direct id
pub const DIRECT_CHAT_DELIMITER: &str = "_";

/// Prefix of group-conversation ids
pub const GROUP_CHAT_PREFIX: &str = "group_";
