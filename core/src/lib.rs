//! Core logic for the alerta incident-report client.
//!
//! Everything with behavior lives here: the mode-keyed field validator,
//! the draft lifecycle state machine, the bearer-token auth gate, the
//! sync client against the remote `/denuncias` collection, and the list
//! reconciler that owns the locally visible snapshot.
//!
//! Control flow: a frontend collects raw input → [`validation::validate`]
//! → [`auth::AuthGate`] supplies the token → [`SyncClient`] issues the
//! request → on success [`ListReconciler`] refreshes the snapshot the
//! frontend renders from.

pub mod api_client;
pub mod auth;
pub mod config;
pub mod lifecycle;
pub mod reconciler;
pub mod validation;

pub use api_client::{ApiError, ApiResult, SyncClient};
pub use auth::{AuthError, AuthGate, GateError, TokenStore};
pub use config::Config;
pub use lifecycle::{DraftAlert, LifecycleError, RecordState, SubmitError};
pub use reconciler::{AlertSource, ListReconciler};
pub use validation::{ValidationErrorSet, ValidationMode, validate};
