//! The shared per-origin key-value store and its browsing-context handles.
//!
//! An [`Origin`] plays the role the browser's per-origin storage plays for a
//! web client: one synchronous, string-keyed store shared by every context of
//! the same origin. A [`StoreContext`] stands for one such context (one tab).
//! Writing through any context delivers a [`StoreNotification`] to the
//! subscribers of every *other* context of the origin, never to the writer's
//! own. Notices do not cross OS processes; one `Origin` value is the
//! boundary of the simulation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::migrations;

/// Change notice delivered to the other contexts of an origin after a write,
/// carrying the name of the key that changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreNotification {
    pub key: String,
}

/// Identity of one browsing context within an origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(Uuid);

enum Backing {
    Memory(HashMap<String, String>),
    Disk(Connection),
}

struct Subscriber {
    context: ContextId,
    tx: mpsc::UnboundedSender<StoreNotification>,
}

struct OriginInner {
    backing: Mutex<Backing>,
    subscribers: Mutex<Vec<Subscriber>>,
}

/// The key-value store shared by all contexts of one application origin.
#[derive(Clone)]
pub struct Origin {
    inner: Arc<OriginInner>,
}

impl Origin {
    /// Create an ephemeral origin backed by process memory.
    pub fn in_memory() -> Self {
        Self::from_backing(Backing::Memory(HashMap::new()))
    }

    /// Open (or create) an origin persisted at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening origin store");

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        migrations::run_migrations(&conn)?;

        Ok(Self::from_backing(Backing::Disk(conn)))
    }

    /// Open (or create) the origin at the platform's default data directory.
    pub fn open_default() -> Result<Self> {
        let dirs =
            ProjectDirs::from("com", "causerie", "causerie").ok_or(StoreError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;
        Self::open_at(&data_dir.join("causerie.db"))
    }

    fn from_backing(backing: Backing) -> Self {
        Self {
            inner: Arc::new(OriginInner {
                backing: Mutex::new(backing),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Mint a fresh browsing context of this origin.
    pub fn context(&self) -> StoreContext {
        StoreContext {
            inner: self.inner.clone(),
            id: ContextId(Uuid::new_v4()),
        }
    }
}

/// Handle held by one browsing context onto its origin's store.
///
/// Cloning keeps the same context identity; only [`Origin::context`] mints a
/// new one.
#[derive(Clone)]
pub struct StoreContext {
    inner: Arc<OriginInner>,
    id: ContextId,
}

impl StoreContext {
    /// This context's identity within the origin.
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Read the value stored under `key`, if any.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let backing = self.inner.backing.lock().map_err(|_| StoreError::Poisoned)?;
        match &*backing {
            Backing::Memory(map) => Ok(map.get(key).cloned()),
            Backing::Disk(conn) => {
                let value = conn
                    .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                        row.get(0)
                    })
                    .optional()?;
                Ok(value)
            }
        }
    }

    /// Write `value` under `key`, then notify every other context.
    ///
    /// A `get_item` + `set_item` sequence is not atomic across contexts: two
    /// contexts interleaving read-modify-write cycles over the same key leave
    /// the later write as the whole value (last write wins).
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        {
            let mut backing = self.inner.backing.lock().map_err(|_| StoreError::Poisoned)?;
            match &mut *backing {
                Backing::Memory(map) => {
                    map.insert(key.to_string(), value.to_string());
                }
                Backing::Disk(conn) => {
                    conn.execute(
                        "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                        params![key, value],
                    )?;
                }
            }
        }

        self.notify_others(key);
        Ok(())
    }

    /// Subscribe to change notices for writes made by *other* contexts.
    ///
    /// Writes made through this context (or any clone of it) are never
    /// delivered here. Closed receivers are pruned on the next write.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<StoreNotification> {
        let (tx, rx) = mpsc::unbounded_channel();
        match self.inner.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(Subscriber {
                context: self.id,
                tx,
            }),
            Err(_) => warn!("subscriber registry poisoned; subscription is inert"),
        }
        rx
    }

    fn notify_others(&self, key: &str) {
        let mut subscribers = match self.inner.subscribers.lock() {
            Ok(subscribers) => subscribers,
            Err(_) => {
                warn!(key, "subscriber registry poisoned; dropping change notice");
                return;
            }
        };

        subscribers.retain(|sub| {
            if sub.context == self.id {
                return true;
            }
            sub.tx
                .send(StoreNotification {
                    key: key.to_string(),
                })
                .is_ok()
        });
    }
}
