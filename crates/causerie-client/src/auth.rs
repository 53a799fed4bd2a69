//! The identity-provider boundary, simulated in-process.
//!
//! [`IdentityProvider`] stands in for the external authentication backend:
//! one shared account directory per deployment, keeping only a hash of each
//! secret. [`Authenticator`] is a single context's session onto it, with a
//! watchable session state in place of the provider's auth-state callback.
//!
//! The client trusts whatever identifier a completed authentication yields;
//! it never checks secrets itself.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use causerie_shared::{AuthError, SocialProvider, UserId};
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

/// Shared account directory of the simulated provider.
///
/// Secrets are never stored; only their BLAKE3 hashes are kept for the
/// password check.
#[derive(Default)]
pub struct IdentityProvider {
    accounts: Mutex<HashMap<UserId, blake3::Hash>>,
}

impl IdentityProvider {
    /// Create an empty shared directory.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn create_account(&self, id: &UserId, secret: &str) -> Result<(), AuthError> {
        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        if accounts.contains_key(id) {
            return Err(AuthError::AccountExists);
        }
        accounts.insert(id.clone(), blake3::hash(secret.as_bytes()));
        Ok(())
    }

    fn verify(&self, id: &UserId, secret: &str) -> Result<(), AuthError> {
        let accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        match accounts.get(id) {
            Some(hash) if *hash == blake3::hash(secret.as_bytes()) => Ok(()),
            // Unknown account and wrong secret answer identically.
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

/// One browsing context's session with the identity provider.
pub struct Authenticator {
    provider: Arc<IdentityProvider>,
    session: watch::Sender<Option<UserId>>,
}

impl Authenticator {
    /// Attach a fresh, signed-out session handle to `provider`.
    pub fn new(provider: Arc<IdentityProvider>) -> Self {
        let (session, _) = watch::channel(None);
        Self { provider, session }
    }

    /// Create a password account and open a session for it.
    pub fn sign_up(&self, id: &str, secret: &str) -> Result<UserId, AuthError> {
        let (id, secret) = normalize(id, secret)?;
        self.provider.create_account(&id, &secret)?;
        self.open_session(id.clone());
        Ok(id)
    }

    /// Open a session for an existing password account.
    pub fn sign_in(&self, id: &str, secret: &str) -> Result<UserId, AuthError> {
        let (id, secret) = normalize(id, secret)?;
        self.provider.verify(&id, &secret)?;
        self.open_session(id.clone());
        Ok(id)
    }

    /// Open a session through a federated provider.
    ///
    /// The simulation mints a provider-scoped identifier in place of the uid
    /// a real popup flow would hand back. Phone sign-in has no flow at all
    /// and is rejected.
    pub fn sign_in_with(&self, provider: SocialProvider) -> Result<UserId, AuthError> {
        if provider == SocialProvider::Phone {
            return Err(AuthError::UnsupportedProvider(provider));
        }

        let id = UserId::new(format!("{}:{}", provider.slug(), Uuid::new_v4()));
        self.open_session(id.clone());
        Ok(id)
    }

    /// Close the active session, if any.
    pub fn sign_out(&self) {
        if self.session.send_replace(None).is_some() {
            info!("session closed");
        }
    }

    /// Identifier of the active session, if one is open.
    pub fn current_user(&self) -> Option<UserId> {
        self.session.borrow().clone()
    }

    /// Watch session changes. The receiver always holds the latest state;
    /// it sees sign-ins and sign-outs made after subscription.
    pub fn session_changes(&self) -> watch::Receiver<Option<UserId>> {
        self.session.subscribe()
    }

    fn open_session(&self, id: UserId) {
        info!(user = %id, "session opened");
        self.session.send_replace(Some(id));
    }
}

/// Trim credentials and reject empty ones before they reach the directory.
fn normalize(id: &str, secret: &str) -> Result<(UserId, String), AuthError> {
    let id = id.trim();
    let secret = secret.trim();
    if id.is_empty() || secret.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }
    Ok((UserId::from(id), secret.to_string()))
}
