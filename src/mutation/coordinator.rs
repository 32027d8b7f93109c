//! Create/update submission and reconciliation.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{DashboardError, Result};
use crate::gateway::RecordGateway;
use crate::types::{Draft, Record, RecordId};
use crate::view::ViewEngine;

use super::validation::{prepare, validate, ValidationReport};

/// A record the store accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct SavedRecord {
    pub record: Record,
    /// True for a create, false for an update.
    pub created: bool,
}

/// Validates drafts, writes them through the gateway, and reconciles the
/// canonical set with what the store returned.
///
/// Only one submission may be in flight at a time; a second one while the
/// first is awaiting the store fails fast with
/// [`DashboardError::SubmitInProgress`].
pub struct MutationCoordinator {
    gateway: Arc<dyn RecordGateway>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the submission ends, including when the
/// future is dropped mid-request.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl MutationCoordinator {
    pub fn new(gateway: Arc<dyn RecordGateway>) -> Self {
        Self {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Field-scoped check of a draft. Never touches the network.
    pub fn validate(&self, draft: &Draft) -> ValidationReport {
        validate(draft)
    }

    /// Whether a submission is awaiting the store.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Submit a draft: update `editing` if given, create otherwise.
    ///
    /// On success the returned record is upserted into the canonical set and
    /// the view is re-derived with the last search term. On any failure the
    /// canonical set is untouched and the draft is left with the caller.
    pub async fn submit(
        &self,
        draft: &Draft,
        editing: Option<RecordId>,
        view: &RwLock<ViewEngine>,
    ) -> Result<SavedRecord> {
        let payload = prepare(draft).map_err(DashboardError::Validation)?;

        if let Some(id) = editing {
            if !view.read().records().contains(id) {
                return Err(DashboardError::NotFound(id));
            }
        }

        let _guard = self.begin()?;

        let result = match editing {
            Some(id) => self.gateway.update(id, &payload).await,
            None => self.gateway.create(&payload).await,
        };

        let record = result.map_err(|e| {
            warn!(gateway = self.gateway.name(), error = %e, "save failed");
            DashboardError::Store(e)
        })?;

        {
            let mut engine = view.write();
            engine.upsert(record.clone());
            engine.reapply_search();
        }

        let created = editing.is_none();
        info!(id = %record.id, created, "record saved");
        Ok(SavedRecord { record, created })
    }

    fn begin(&self) -> Result<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| DashboardError::SubmitInProgress)?;
        Ok(InFlight(&self.in_flight))
    }
}
