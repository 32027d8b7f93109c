//! Event types delivered to rendering sinks.

use crate::types::{RecordId, SortField, SortOrder};
use crate::view::{QueryState, ViewPage};
use serde::{Deserialize, Serialize};

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before dropping subscriber.
    /// Default: 256
    pub buffer_size: usize,

    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 256,
            filter: SubscriptionFilter::all(),
        }
    }
}

/// Which events a subscriber wants.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionFilter {
    /// View re-derivations and load failures.
    pub include_view: bool,

    /// Successful creates and updates.
    pub include_mutations: bool,

    /// Finished exports.
    pub include_exports: bool,
}

impl SubscriptionFilter {
    /// Only what changes the table.
    pub fn view() -> Self {
        Self {
            include_view: true,
            ..Default::default()
        }
    }

    /// Only save notifications.
    pub fn mutations() -> Self {
        Self {
            include_mutations: true,
            ..Default::default()
        }
    }

    /// Subscribe to everything.
    pub fn all() -> Self {
        Self {
            include_view: true,
            include_mutations: true,
            include_exports: true,
        }
    }
}

/// Events emitted to subscribers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// The derived view changed and should be redrawn.
    ViewChanged { view: ViewSummary },

    /// Loading failed; show the error state instead of a table.
    LoadFailed { message: String },

    /// A create or update was accepted by the store.
    RecordSaved {
        id: RecordId,
        created: bool,
        message: String,
    },

    /// An export is ready for download.
    Exported { filename: String, rows: usize },

    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// What a sink needs to redraw, without the record bodies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewSummary {
    /// Ids on the active page, in view order.
    pub ids: Vec<RecordId>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub search_term: String,
    pub sort_field: Option<SortField>,
    pub sort_order: SortOrder,
}

impl ViewSummary {
    pub fn from_view(view: &ViewPage, query: &QueryState) -> Self {
        Self {
            ids: view.ids(),
            page: view.page,
            page_size: view.page_size,
            total_items: view.total_items,
            total_pages: view.total_pages,
            search_term: query.search_term().to_string(),
            sort_field: query.sort_field(),
            sort_order: query.sort_order(),
        }
    }
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to manage a subscription.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<DashboardEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<DashboardEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<DashboardEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<DashboardEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything currently buffered.
    pub fn drain(&self) -> Vec<DashboardEvent> {
        self.receiver.try_iter().collect()
    }
}
