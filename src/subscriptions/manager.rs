//! Subscription manager for broadcasting dashboard events.

use crossbeam_channel::{bounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::types::RecordId;

use super::types::{
    DashboardEvent, DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, ViewSummary,
};

/// Internal subscription state.
struct Subscription {
    filter: SubscriptionFilter,
    sender: Sender<DashboardEvent>,
}

impl Subscription {
    /// Try to send an event. Returns false if buffer is full (subscriber will be dropped).
    fn try_send(&self, event: DashboardEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }
}

/// Manages subscriptions and broadcasts events.
pub struct SubscriptionManager {
    /// Active subscriptions by ID.
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new subscription.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(config.buffer_size.max(1));

        self.subscriptions.write().insert(
            id,
            Subscription {
                filter: config.filter,
                sender,
            },
        );

        SubscriptionHandle { id, receiver }
    }

    /// Unsubscribe and clean up.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self.subscriptions.write();
        if let Some(sub) = subs.remove(&id) {
            // Send dropped event (best effort)
            let _ = sub.sender.try_send(DashboardEvent::Dropped {
                reason: DropReason::Unsubscribed,
            });
        }
    }

    /// Get subscription count.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    // --- Broadcasting ---

    /// Broadcast a re-derived view.
    pub fn broadcast_view(&self, view: ViewSummary) {
        self.broadcast(
            |filter| filter.include_view,
            DashboardEvent::ViewChanged { view },
        );
    }

    /// Broadcast a load failure.
    pub fn broadcast_load_failed(&self, message: &str) {
        self.broadcast(
            |filter| filter.include_view,
            DashboardEvent::LoadFailed {
                message: message.to_string(),
            },
        );
    }

    /// Broadcast an accepted save.
    pub fn broadcast_saved(&self, id: RecordId, created: bool) {
        let message = if created {
            "Product created successfully!"
        } else {
            "Product updated successfully!"
        };
        self.broadcast(
            |filter| filter.include_mutations,
            DashboardEvent::RecordSaved {
                id,
                created,
                message: message.to_string(),
            },
        );
    }

    /// Broadcast a finished export.
    pub fn broadcast_exported(&self, filename: &str, rows: usize) {
        self.broadcast(
            |filter| filter.include_exports,
            DashboardEvent::Exported {
                filename: filename.to_string(),
                rows,
            },
        );
    }

    /// Internal broadcast helper. Drops subscribers that fail to receive.
    fn broadcast<F>(&self, wants: F, event: DashboardEvent)
    where
        F: Fn(&SubscriptionFilter) -> bool,
    {
        let mut to_remove = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if wants(&sub.filter) && !sub.try_send(event.clone()) {
                    to_remove.push(*id);
                }
            }
        }

        // Remove dropped subscriptions
        if !to_remove.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in to_remove {
                if let Some(sub) = subs.remove(&id) {
                    debug!(subscription = id.0, "dropping slow subscriber");
                    // Try to notify about the drop (might fail, that's ok)
                    let _ = sub.sender.try_send(DashboardEvent::Dropped {
                        reason: DropReason::BufferOverflow,
                    });
                }
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}
