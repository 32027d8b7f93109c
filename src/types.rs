//! Core types for the catalog view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a record (assigned by the remote store).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default();
        Timestamp(millis)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// A product record in its normalized shape.
///
/// Whatever shape the store returns, `category` is a plain string and
/// `images` holds at least one URL by the time a record reaches the
/// canonical set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier (assigned by store).
    pub id: RecordId,

    pub title: String,

    /// Non-negative decimal price.
    pub price: f64,

    pub category: String,

    pub description: String,

    /// Image URLs, never empty.
    pub images: Vec<String>,
}

impl Record {
    /// First image URL, used for thumbnails and edit forms.
    pub fn primary_image(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or_default()
    }
}

/// Unvalidated form input for creating or editing a record.
///
/// Every field is kept as typed by the user; `validate` decides whether
/// it can become a [`RecordPayload`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub images: Vec<String>,
}

impl Draft {
    /// Pre-fill a draft from an existing record (edit form).
    ///
    /// Only the primary image is carried over, matching the single image
    /// field of the form.
    pub fn from_record(record: &Record) -> Self {
        Self {
            title: record.title.clone(),
            price: record.price.to_string(),
            category: record.category.clone(),
            description: record.description.clone(),
            images: vec![record.primary_image().to_string()],
        }
    }

    /// Set the single image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images = vec![url.into()];
        self
    }
}

/// Validated body sent to the store on create and update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub title: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    /// Primary image, duplicated for stores that only read a scalar.
    pub image: String,
    pub images: Vec<String>,
}

/// Column a view can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Price,
}

/// Direction of the active sort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}
