//! Event subscriptions for rendering sinks.
//!
//! The dashboard never draws anything itself. Sinks subscribe and redraw
//! when told the view changed, a load failed, a save succeeded or an export
//! is ready. Each subscriber gets a bounded buffer and is dropped when it
//! falls behind.
//!
//! # Example
//!
//! ```ignore
//! let handle = dashboard.subscribe(SubscriptionConfig {
//!     filter: SubscriptionFilter::view(),
//!     ..Default::default()
//! });
//!
//! while let Ok(event) = handle.recv() {
//!     match event {
//!         DashboardEvent::ViewChanged { view } => redraw(&view),
//!         DashboardEvent::LoadFailed { message } => show_error(&message),
//!         DashboardEvent::Dropped { .. } => break,
//!         _ => {}
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    DashboardEvent, DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, ViewSummary,
};
