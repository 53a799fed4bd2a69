pub mod auth;
pub mod commands;
pub mod error;
pub mod events;
pub mod state;
pub mod sync;

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing_subscriber::{fmt, EnvFilter};

use causerie_store::{ChatStore, Origin};

use crate::auth::{Authenticator, IdentityProvider};
use crate::events::ViewEventSender;
use crate::state::AppState;

pub use error::ClientError;

/// Install the process-wide tracing subscriber.
///
/// Honors `RUST_LOG` when set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("causerie_client=debug,causerie_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Assemble a fresh browsing context of `origin`: signed-out state bound to
/// a new store handle, plus a running sync bridge feeding `view_tx`.
///
/// Every call stands for one more open tab of the same deployment. Must be
/// called from within a tokio runtime.
pub fn open_context(
    origin: &Origin,
    provider: Arc<IdentityProvider>,
    view_tx: ViewEventSender,
) -> Result<(Arc<Mutex<AppState>>, JoinHandle<()>), ClientError> {
    let state = Arc::new(Mutex::new(AppState::new(
        Authenticator::new(provider),
        ChatStore::new(origin.context()),
    )));

    let bridge = sync::start_sync_bridge(state.clone(), view_tx)?;
    Ok((state, bridge))
}
