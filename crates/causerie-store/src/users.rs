//! Registered-user directory operations.
//!
//! Every identifier that ever completed an authentication is recorded in a
//! JSON array under one store key, in registration order. The directory is
//! what makes a user discoverable as a chat target.

use causerie_shared::constants::REGISTERED_USERS_KEY;
use causerie_shared::UserId;
use tracing::{debug, warn};

use crate::error::Result;
use crate::store::ChatStore;

impl ChatStore {
    /// Load the registered-user set, in registration order.
    ///
    /// Missing or unparseable state loads as empty, matching the
    /// conversation collection's self-heal behaviour.
    pub fn registered_users(&self) -> Result<Vec<UserId>> {
        let raw = match self.context().get_item(REGISTERED_USERS_KEY)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str(&raw) {
            Ok(users) => Ok(users),
            Err(e) => {
                warn!(error = %e, "registered-user set failed to parse; starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Add `user` to the registered set if absent, persisting immediately.
    /// Duplicate registrations are silent no-ops.
    pub fn register_user(&self, user: &UserId) -> Result<()> {
        let mut users = self.registered_users()?;
        if users.contains(user) {
            debug!(user = %user, "already registered");
            return Ok(());
        }

        users.push(user.clone());
        let raw = serde_json::to_string(&users)?;
        self.context().set_item(REGISTERED_USERS_KEY, &raw)
    }

    /// Whether `user` has completed an authentication before.
    pub fn is_registered(&self, user: &UserId) -> Result<bool> {
        Ok(self.registered_users()?.contains(user))
    }

    /// Registered identifiers containing `query` case-insensitively, always
    /// excluding `caller`. An empty query matches everyone else.
    pub fn search_users(&self, query: &str, caller: &UserId) -> Result<Vec<UserId>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .registered_users()?
            .into_iter()
            .filter(|u| u != caller)
            .filter(|u| u.as_str().to_lowercase().contains(&needle))
            .collect())
    }
}
