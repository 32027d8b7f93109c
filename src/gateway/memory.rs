//! In-process record store.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use tracing::debug;

use crate::error::StoreError;
use crate::types::{Record, RecordId, RecordPayload};

use super::RecordGateway;

/// Keeps records in memory and assigns ids like a remote store would.
///
/// Useful for offline sessions and demos. It can be switched offline to
/// exercise the failure paths of callers.
pub struct MemoryGateway {
    records: Mutex<Vec<Record>>,
    next_id: AtomicU64,
    offline: AtomicBool,
    requests: AtomicUsize,
}

impl MemoryGateway {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a store seeded with `records`. New ids continue after the
    /// largest seeded id.
    pub fn with_records(records: Vec<Record>) -> Self {
        let next_id = records.iter().map(|r| r.id.0).max().unwrap_or(0).saturating_add(1);
        Self {
            records: Mutex::new(records),
            next_id: AtomicU64::new(next_id),
            offline: AtomicBool::new(false),
            requests: AtomicUsize::new(0),
        }
    }

    /// While offline every call fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of calls received, including failed ones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Current contents of the store.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    fn begin_request(&self) -> Result<(), StoreError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn record_from_payload(id: RecordId, payload: &RecordPayload) -> Record {
    let mut images = payload.images.clone();
    if images.is_empty() {
        images.push(payload.image.clone());
    }
    Record {
        id,
        title: payload.title.clone(),
        price: payload.price,
        category: payload.category.clone(),
        description: payload.description.clone(),
        images,
    }
}

#[async_trait]
impl RecordGateway for MemoryGateway {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        self.begin_request()?;
        Ok(self.snapshot())
    }

    async fn create(&self, payload: &RecordPayload) -> Result<Record, StoreError> {
        self.begin_request()?;
        let id = self
            .next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map(RecordId)
            .map_err(|_| StoreError::Unavailable("record ids exhausted".to_string()))?;
        let record = record_from_payload(id, payload);
        self.records.lock().push(record.clone());
        debug!(%id, "memory store created record");
        Ok(record)
    }

    async fn update(&self, id: RecordId, payload: &RecordPayload) -> Result<Record, StoreError> {
        self.begin_request()?;
        let mut records = self.records.lock();
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::Status {
                status: 404,
                url: format!("memory://records/{}", id),
            })?;
        *slot = record_from_payload(id, payload);
        Ok(slot.clone())
    }
}
