//! Session-level error taxonomy.
//!
//! Every variant is recoverable by user action (re-enter the credential,
//! resend the message); nothing here tears down the process.

use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum SolaceError {
    /// Connect was attempted with an empty credential
    #[error("an API key is required to connect")]
    CredentialMissing,

    /// The credential probe failed during connect
    #[error("health check failed: {message}")]
    HealthCheckFailed { message: String },

    /// A send was attempted before the session was connected
    #[error("not connected: enter your API key and connect first")]
    NotConnected,

    /// A completion call failed; the session stays connected
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
