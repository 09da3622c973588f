//! Owner of the locally visible alert collection.
//!
//! The reconciler holds the one snapshot the presentation layer renders
//! from and replaces it wholesale after each successful `list()`. It
//! never patches items in place after an update or delete; those flows
//! trade a round-trip for correctness by refreshing instead.
//!
//! Overlapping refreshes are coalesced by issue order: each call is
//! tagged with a monotonically increasing sequence number and a response
//! is discarded when a later-issued one has already been applied. A slow
//! stale response can therefore never clobber a fresher snapshot,
//! regardless of completion order.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicU64, Ordering};

use alerta_protocol::AlertRecord;
use async_trait::async_trait;

use crate::api_client::{ApiResult, SyncClient};

/// Anything that can produce the authoritative alert collection.
///
/// Implemented by [`SyncClient`]; tests substitute fakes with
/// controllable completion order.
#[async_trait]
pub trait AlertSource: Send + Sync {
    async fn list_alerts(&self) -> ApiResult<Vec<AlertRecord>>;
}

#[async_trait]
impl AlertSource for SyncClient {
    async fn list_alerts(&self) -> ApiResult<Vec<AlertRecord>> {
        self.list().await
    }
}

struct Inner {
    snapshot: Arc<Vec<AlertRecord>>,
    last_applied: u64,
}

/// Owns the in-memory collection shown to the user.
pub struct ListReconciler {
    source: Arc<dyn AlertSource>,
    issued: AtomicU64,
    inner: Mutex<Inner>,
}

impl ListReconciler {
    pub fn new(source: Arc<dyn AlertSource>) -> Self {
        Self {
            source,
            issued: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                snapshot: Arc::new(Vec::new()),
                last_applied: 0,
            }),
        }
    }

    /// Read-only view of the current collection. Always either the prior
    /// snapshot or a fully new one, never a partially applied mix.
    pub fn snapshot(&self) -> Arc<Vec<AlertRecord>> {
        Arc::clone(&self.lock().snapshot)
    }

    /// Atomically swaps the visible collection.
    ///
    /// Counts as the freshest state: any refresh issued earlier that is
    /// still in flight will be discarded when it resolves.
    pub fn replace(&self, records: Vec<AlertRecord>) {
        let issued = self.issued.load(Ordering::SeqCst);
        let mut inner = self.lock();
        inner.last_applied = inner.last_applied.max(issued);
        inner.snapshot = Arc::new(records);
    }

    /// Fetches a fresh collection and applies it unless a later-issued
    /// refresh already won. Returns whether this response was applied.
    ///
    /// Errors propagate to the caller; the previous snapshot is retained
    /// and the failed sequence number claims nothing.
    pub async fn request_refresh(&self) -> ApiResult<bool> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(seq, "refresh issued");

        let records = self.source.list_alerts().await?;

        let mut inner = self.lock();
        if seq > inner.last_applied {
            inner.last_applied = seq;
            inner.snapshot = Arc::new(records);
            tracing::debug!(seq, "refresh applied");
            Ok(true)
        } else {
            tracing::warn!(
                seq,
                last_applied = inner.last_applied,
                "discarding superseded refresh response"
            );
            Ok(false)
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
