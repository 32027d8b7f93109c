//! # Catalog View
//!
//! An in-memory data view over a remote product catalog. The full record set
//! is fetched once and kept as the canonical set; everything the user sees is
//! derived from it on demand.
//!
//! ## Core Concepts
//!
//! - **Canonical set**: every record last known from the store, in store order
//! - **View**: filter by title → sort by title or price → slice the page
//! - **Mutations**: validated drafts written through the gateway, then
//!   upserted and re-derived
//! - **Export**: the whole filtered view as CSV, paging ignored
//! - **Events**: rendering sinks subscribe and redraw on change
//!
//! ## Example
//!
//! ```ignore
//! use catalog_view::{Dashboard, DashboardConfig, Draft, SortField};
//!
//! let dashboard = Dashboard::connect(DashboardConfig::default())?;
//! dashboard.load().await?;
//!
//! dashboard.set_search("apple");
//! dashboard.toggle_sort(SortField::Price);
//! let view = dashboard.current_view();
//!
//! // Edit the first visible record
//! let id = view.items[0].id;
//! let mut draft = dashboard.draft_for(id).unwrap();
//! draft.price = "9.99".into();
//! dashboard.submit(&draft, Some(id)).await?;
//!
//! let export = dashboard.export_csv()?;
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod gateway;
pub mod mutation;
pub mod records;
pub mod subscriptions;
pub mod types;
pub mod view;

// Re-exports
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, LoadState};
pub use error::{DashboardError, Result, StoreError};
pub use export::{export_csv, export_filename, Clock, ExportFile, FixedClock, SystemClock};
pub use gateway::{HttpGateway, MemoryGateway, RecordGateway};
pub use mutation::{validate, DraftField, MutationCoordinator, SavedRecord, ValidationReport};
pub use records::CanonicalSet;
pub use subscriptions::{
    DashboardEvent, DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, SubscriptionManager, ViewSummary,
};
pub use types::*;
pub use view::{Navigation, PageLink, PageWindow, QueryState, ViewEngine, ViewPage};
