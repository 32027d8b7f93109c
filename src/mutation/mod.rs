//! Mutation coordination: draft validation, submission through the gateway,
//! and reconciliation of the canonical set.
//!
//! Validation errors are field-scoped and never leave this module as
//! anything but a [`ValidationReport`]. Store errors surface as a single
//! message and are not retried.

mod coordinator;
mod validation;

pub use coordinator::{MutationCoordinator, SavedRecord};
pub use validation::{
    prepare, validate, DraftField, ValidationReport, MIN_DESCRIPTION_CHARS, MIN_TITLE_CHARS,
};
