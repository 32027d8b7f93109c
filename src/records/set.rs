//! The canonical record set.

use crate::types::{Record, RecordId};
use std::collections::HashMap;

/// Every record last known from the store, in store order.
///
/// Mutated only by a full replace (load) or a single-record upsert
/// (save reconciliation). Records are never removed individually.
#[derive(Clone, Debug, Default)]
pub struct CanonicalSet {
    /// Records in the order the store returned them; created records
    /// are appended.
    records: Vec<Record>,

    /// Record ID to position in `records`.
    positions: HashMap<RecordId, usize>,
}

impl CanonicalSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a store listing.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut set = Self::new();
        set.replace_all(records);
        set
    }

    /// Replace the whole set with a fresh listing.
    ///
    /// A duplicated id keeps its first position and the last occurrence's
    /// contents.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records.clear();
        self.positions.clear();
        self.records.reserve(records.len());

        for record in records {
            self.upsert(record);
        }
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.positions.clear();
    }

    /// Insert or replace a record by id. Returns true if the id was new.
    pub fn upsert(&mut self, record: Record) -> bool {
        match self.positions.get(&record.id) {
            Some(&position) => {
                self.records[position] = record;
                false
            }
            None => {
                self.positions.insert(record.id, self.records.len());
                self.records.push(record);
                true
            }
        }
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.positions.get(&id).map(|&position| &self.records[position])
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Records in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
