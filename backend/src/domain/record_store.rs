//! Ordered in-memory collection of records of one kind.
//!
//! Order is insertion order. The store never deduplicates: appending a record
//! whose identifier is already present keeps both, and key-based operations
//! act on the first match.

use std::collections::HashSet;

use super::record::{Record, RecordId};

/// Insertion-ordered record collection.
///
/// # Examples
/// ```
/// use userbank::domain::{BankRecord, RecordId, RecordStore};
///
/// let bank = |id: &str| BankRecord {
///     id: RecordId::new(id).expect("valid id"),
///     bank_name: format!("Bank {id}"),
///     routing_number: "011000015".to_owned(),
///     swift_bic: "BANKUS33".to_owned(),
/// };
///
/// let mut store = RecordStore::new();
/// store.append([bank("1"), bank("2"), bank("3")]);
/// store.remove(&RecordId::new("2").expect("valid id"));
///
/// let ids: Vec<_> = store.all().iter().map(|b| b.id.as_str()).collect();
/// assert_eq!(ids, ["1", "3"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore<R> {
    records: Vec<R>,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> RecordStore<R> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch at the end, preserving its relative order.
    pub fn append<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = R>,
    {
        self.records.extend(batch);
    }

    /// Replace the first record whose identifier matches `record`, in place.
    ///
    /// Returns `false` and leaves the store untouched when nothing matches.
    pub fn replace(&mut self, record: R) -> bool {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Remove the first record with identifier `id`.
    ///
    /// Returns the removed record, or `None` when nothing matches.
    pub fn remove(&mut self, id: &RecordId) -> Option<R> {
        let position = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(position))
    }

    /// Read-only view of the records in order.
    #[must_use]
    pub fn all(&self) -> &[R] {
        &self.records
    }

    /// First record with identifier `id`.
    #[must_use]
    pub fn find(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Whether any record has identifier `id`.
    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.find(id).is_some()
    }

    /// Number of records, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifiers that occur more than once, in first-occurrence order.
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<RecordId> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for record in &self.records {
            let id = record.id();
            if !seen.insert(id) && reported.insert(id) {
                duplicates.push(id.clone());
            }
        }
        duplicates
    }
}
