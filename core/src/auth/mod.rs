//! Token precondition for every network-capable operation.
//!
//! Credential presence is an explicit input here, not an ambient flag: a
//! caller wraps each remote operation in [`AuthGate::with_auth`], which
//! either supplies the stored bearer token or short-circuits locally with
//! `Unauthenticated` before any request is built.

mod store;

use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;

pub use store::TokenStore;

/// Errors from credential storage itself.
#[derive(Debug, Error)]
pub enum AuthError {
    /// IO error reading or writing the auth file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed auth file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a gated operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError<E> {
    /// No token stored; the operation was never invoked. Local and
    /// synchronous, recoverable by logging in again.
    #[error("not authenticated")]
    Unauthenticated,
    /// The operation ran and failed with its own error.
    #[error(transparent)]
    Op(E),
}

/// Wraps network operations with the bearer-token precondition.
#[derive(Debug, Clone)]
pub struct AuthGate {
    home: PathBuf,
}

impl AuthGate {
    pub fn new(home: PathBuf) -> Self {
        Self { home }
    }

    /// Reads the current token without invoking anything.
    ///
    /// An unreadable store is reported and treated as no token; the
    /// caller's remedy is the same either way (log in again).
    pub fn current_token(&self) -> Option<String> {
        match TokenStore::load(&self.home) {
            Ok(store) => store.token().map(str::to_string),
            Err(e) => {
                tracing::warn!("unreadable token store: {e}");
                None
            }
        }
    }

    /// Runs `op` with the stored token, or short-circuits.
    ///
    /// When no token is stored, returns `GateError::Unauthenticated`
    /// without invoking `op`, so no request is ever built. When a token is
    /// present it is handed to `op` and the outcome passes through
    /// unchanged. The gate never writes or refreshes the token.
    pub async fn with_auth<T, E, F, Fut>(&self, op: F) -> Result<T, GateError<E>>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let Some(token) = self.current_token() else {
            tracing::debug!("no stored token; skipping network operation");
            return Err(GateError::Unauthenticated);
        };
        op(token).await.map_err(GateError::Op)
    }
}
