//! Draft lifecycle: per-record state machine and field-by-field mutation.
//!
//! States as observed through the frontend, never persisted:
//! `Draft → Submitting → Synced` on success, back to `Draft` on failure
//! (fields retained, errors surfaced); `Synced → Submitting` on an edit
//! submit; `Synced → Deleted` once a delete is confirmed.

use alerta_protocol::{AlertField, AlertRecord, mask_cep, mask_cep_edit};
use thiserror::Error;

use crate::validation::{ValidationErrorSet, ValidationMode, validate};

/// Lifecycle state of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Not yet confirmed by the server (or a failed submit rolled back).
    Draft,
    /// A create/update is in flight; no second mutation may start.
    Submitting,
    /// Confirmed by the server.
    Synced,
    /// Removed; will be absent from the next snapshot.
    Deleted,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("invalid transition: {from:?} -> {attempted}")]
    InvalidTransition {
        from: RecordState,
        attempted: &'static str,
    },
}

impl RecordState {
    /// `Draft | Synced → Submitting`.
    pub fn submit(self) -> Result<RecordState, LifecycleError> {
        match self {
            RecordState::Draft | RecordState::Synced => Ok(RecordState::Submitting),
            from => Err(LifecycleError::InvalidTransition {
                from,
                attempted: "submit",
            }),
        }
    }

    /// `Submitting → Synced`.
    pub fn resolve_success(self) -> Result<RecordState, LifecycleError> {
        match self {
            RecordState::Submitting => Ok(RecordState::Synced),
            from => Err(LifecycleError::InvalidTransition {
                from,
                attempted: "resolve_success",
            }),
        }
    }

    /// `Submitting → Draft` (fields retained, errors surfaced).
    pub fn resolve_failure(self) -> Result<RecordState, LifecycleError> {
        match self {
            RecordState::Submitting => Ok(RecordState::Draft),
            from => Err(LifecycleError::InvalidTransition {
                from,
                attempted: "resolve_failure",
            }),
        }
    }

    /// `Synced → Deleted`.
    pub fn delete_confirmed(self) -> Result<RecordState, LifecycleError> {
        match self {
            RecordState::Synced => Ok(RecordState::Deleted),
            from => Err(LifecycleError::InvalidTransition {
                from,
                attempted: "delete_confirmed",
            }),
        }
    }
}

/// Submit was blocked before any network activity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The error set is non-empty; read it via [`DraftAlert::errors`].
    #[error("record failed validation")]
    Invalid,
    #[error(transparent)]
    Lifecycle(LifecycleError),
}

/// An alert record being edited, with its error set and lifecycle state.
///
/// Every write clears that field's error entry; the set is only
/// recomputed wholesale by [`DraftAlert::submit`]. CEP writes pass
/// through the mask transform of the draft's mode.
#[derive(Debug, Clone)]
pub struct DraftAlert {
    record: AlertRecord,
    errors: ValidationErrorSet,
    state: RecordState,
    mode: ValidationMode,
}

impl DraftAlert {
    /// An empty draft for the report flow.
    pub fn new() -> Self {
        Self {
            record: AlertRecord::default(),
            errors: ValidationErrorSet::new(),
            state: RecordState::Draft,
            mode: ValidationMode::Create,
        }
    }

    /// A draft seeded from a server-confirmed record, for the edit flow.
    pub fn edit(record: AlertRecord) -> Self {
        let state = if record.is_draft() {
            RecordState::Draft
        } else {
            RecordState::Synced
        };
        Self {
            record,
            errors: ValidationErrorSet::new(),
            state,
            mode: ValidationMode::Edit,
        }
    }

    pub fn record(&self) -> &AlertRecord {
        &self.record
    }

    pub fn errors(&self) -> &ValidationErrorSet {
        &self.errors
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Applies one keystroke's worth of input to a field.
    pub fn set(&mut self, field: AlertField, value: &str) {
        let value = if field == AlertField::Cep {
            match self.mode {
                ValidationMode::Create => mask_cep(value),
                ValidationMode::Edit => mask_cep_edit(value),
            }
        } else {
            value.to_string()
        };
        self.record.set_field(field, value);
        self.errors.clear(field);
    }

    /// Recomputes the error set wholesale; when it comes back empty,
    /// moves the record into `Submitting` and hands back the payload to
    /// send. Validation errors never reach the network layer.
    pub fn submit(&mut self) -> Result<AlertRecord, SubmitError> {
        self.errors = validate(&self.record, self.mode);
        if !self.errors.is_empty() {
            tracing::debug!(failures = self.errors.len(), "submit blocked by validation");
            return Err(SubmitError::Invalid);
        }
        self.state = self.state.submit().map_err(SubmitError::Lifecycle)?;
        Ok(self.record.clone())
    }

    /// The in-flight request succeeded; `confirmed` carries the server's
    /// view (notably the assigned id on first creation).
    pub fn resolve_success(&mut self, confirmed: AlertRecord) -> Result<(), LifecycleError> {
        self.state = self.state.resolve_success()?;
        self.record = confirmed;
        Ok(())
    }

    /// The in-flight request failed; fields are retained for retry.
    pub fn resolve_failure(&mut self) -> Result<(), LifecycleError> {
        self.state = self.state.resolve_failure()?;
        Ok(())
    }
}

impl Default for DraftAlert {
    fn default() -> Self {
        Self::new()
    }
}
