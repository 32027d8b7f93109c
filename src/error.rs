//! Error types for the catalog view.

use crate::mutation::ValidationReport;
use crate::types::RecordId;
use thiserror::Error;

/// Failure talking to the remote record store.
///
/// Every transport problem and every non-2xx response collapses into one of
/// these; callers never see a partially applied result.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Store responded with status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Could not decode store response: {0}")]
    Decode(String),

    #[error("Malformed record {id}: {reason}")]
    Malformed { id: RecordId, reason: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}

/// Main error type for dashboard operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to load records: {0}")]
    Load(#[source] StoreError),

    #[error("Draft has {} invalid field(s)", .0.len())]
    Validation(ValidationReport),

    #[error("Failed to save record: {0}")]
    Store(#[source] StoreError),

    #[error("A save is already in progress")]
    SubmitInProgress,

    #[error("Record not found: {0}")]
    NotFound(RecordId),

    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Export failed: {0}")]
    Export(String),
}

impl DashboardError {
    /// Single message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Load(_) => "Could not load data from the API".to_string(),
            DashboardError::Store(e) => format!("Error: {}", e),
            other => other.to_string(),
        }
    }
}

impl From<csv::Error> for DashboardError {
    fn from(e: csv::Error) -> Self {
        DashboardError::Export(e.to_string())
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(e: toml::de::Error) -> Self {
        DashboardError::Config(e.to_string())
    }
}

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
