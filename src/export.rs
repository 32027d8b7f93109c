//! CSV export of the filtered view.

use crate::error::{DashboardError, Result};
use crate::types::{Record, Timestamp};

/// Fixed header row.
pub const CSV_HEADER: [&str; 5] = ["id", "title", "price", "category", "description"];

/// Source of export timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Always returns the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// A ready-to-download export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    /// `<prefix>_<unix-ms>.csv`
    pub filename: String,
    /// UTF-8 CSV text.
    pub contents: String,
    /// Data rows, header excluded.
    pub rows: usize,
}

/// Download name for an export taken at `at`.
pub fn export_filename(prefix: &str, at: Timestamp) -> String {
    format!("{}_{}.csv", prefix, at.0)
}

/// Serialize records as comma-separated text, one row per record.
///
/// Fields holding a comma, a quote or a line break are quoted, and embedded
/// quotes are doubled.
pub fn export_csv<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.title.clone(),
            record.price.to_string(),
            record.category.clone(),
            record.description.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DashboardError::Export(e.to_string()))
}
