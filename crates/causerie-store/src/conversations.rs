//! Conversation collection operations.
//!
//! The whole collection lives as one JSON document under a single store key.
//! Every mutation is read-modify-write over that document: load it all,
//! change it in memory, write it all back. Granularity and its consequences
//! (notably last-write-wins between contexts) are inherited from the store.

use std::collections::btree_map::Entry;

use causerie_shared::constants::CONVERSATIONS_KEY;
use causerie_shared::{ConversationId, UserId};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::models::{Collection, Conversation, Message};
use crate::store::ChatStore;

impl ChatStore {
    /// Load the whole conversation collection.
    ///
    /// A missing key loads as the empty collection. So does a document that
    /// fails to parse: corrupt state self-heals to empty instead of wedging
    /// the client, at the cost of dropping whatever the document held.
    pub fn load_conversations(&self) -> Result<Collection> {
        let raw = match self.context().get_item(CONVERSATIONS_KEY)? {
            Some(raw) => raw,
            None => return Ok(Collection::new()),
        };

        match serde_json::from_str(&raw) {
            Ok(collection) => Ok(collection),
            Err(e) => {
                warn!(error = %e, "conversation collection failed to parse; starting empty");
                Ok(Collection::new())
            }
        }
    }

    /// Serialize and rewrite the whole collection.
    ///
    /// The write replaces the entire persisted document. If another context
    /// wrote after this context's last load, that write is overwritten
    /// wholesale: last write wins. Other contexts are notified by the store.
    pub fn save_conversations(&self, collection: &Collection) -> Result<()> {
        let raw = serde_json::to_string(collection)?;
        self.context().set_item(CONVERSATIONS_KEY, &raw)
    }

    /// Fetch a single conversation by id, freshly loaded.
    pub fn get_conversation(&self, id: &ConversationId) -> Result<Option<Conversation>> {
        Ok(self.load_conversations()?.remove(id))
    }

    /// Insert `conversation` if its id is absent, otherwise fold its messages
    /// into the existing record. Returns whether anything was written.
    ///
    /// Existing `participants` and `title` are never touched, so re-creating
    /// a conversation that already exists is a no-op and skips the write
    /// (other contexts see no spurious notice).
    pub fn upsert_conversation(&self, conversation: Conversation) -> Result<bool> {
        let mut collection = self.load_conversations()?;

        match collection.entry(conversation.id.clone()) {
            Entry::Vacant(slot) => {
                debug!(conversation = %conversation.id, "inserting conversation");
                slot.insert(conversation);
            }
            Entry::Occupied(mut slot) => {
                if conversation.messages.is_empty() {
                    return Ok(false);
                }
                slot.get_mut().messages.extend(conversation.messages);
            }
        }

        self.save_conversations(&collection)?;
        Ok(true)
    }

    /// Append one message to a conversation's log and persist.
    ///
    /// The collection is reloaded first; in-memory copies are never trusted,
    /// since another context may have written since the last read.
    pub fn append_message(&self, id: &ConversationId, message: Message) -> Result<()> {
        let mut collection = self.load_conversations()?;

        let conversation = collection
            .get_mut(id)
            .ok_or_else(|| StoreError::ConversationNotFound(id.clone()))?;
        conversation.messages.push(message);

        self.save_conversations(&collection)
    }

    /// All conversations `user` participates in, in collection order.
    pub fn conversations_for(&self, user: &UserId) -> Result<Vec<Conversation>> {
        Ok(self
            .load_conversations()?
            .into_values()
            .filter(|c| c.has_participant(user))
            .collect())
    }
}
