//! Canonical record set.
//!
//! Holds the full working set of records as last known from the store,
//! with an id index for O(1) upserts during save reconciliation.

mod set;

pub use set::CanonicalSet;
