use thiserror::Error;

use crate::types::SocialProvider;

/// Failures raised by the identity-provider boundary.
///
/// These surface to the user verbatim via `Display`; the session is left
/// unchanged by any of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("An account already exists for this identifier")]
    AccountExists,

    #[error("Sign-in with {0} is not supported")]
    UnsupportedProvider(SocialProvider),
}
