/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Data-access layer: lookup of person records by id.
//!
//! The service talks to storage only through [`PersonStore`].  The one
//! implementation here keeps records in memory; nothing is persisted.

pub mod error;

pub use error::DataError;

use std::collections::BTreeMap;

use tracing::debug;

/// Id reported when a lookup fails and the caller asked for a fallback.
pub const DEFAULT_PERSON_ID: u64 = 0;

/// A stored person record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: u64,
    pub name: String,
}

impl Person {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Read access to person records.
pub trait PersonStore: Send + Sync {
    /// The record with `id`, or [`DataError::NotFound`].
    fn find_by_id(&self, id: u64) -> Result<Person, DataError>;
}

/// The id of `result`, or [`DEFAULT_PERSON_ID`] if the lookup failed.
pub fn id_or_default(result: &Result<Person, DataError>) -> u64 {
    result.as_ref().map(|p| p.id).unwrap_or(DEFAULT_PERSON_ID)
}

// ── InMemoryPersonStore ───────────────────────────────────────────────────────

/// `PersonStore` over a `BTreeMap` fixed at construction.
#[derive(Debug, Default)]
pub struct InMemoryPersonStore {
    people: BTreeMap<u64, Person>,
}

impl InMemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `people`; later duplicates replace earlier ones.
    pub fn with_people(people: impl IntoIterator<Item = Person>) -> Self {
        let people: BTreeMap<_, _> = people.into_iter().map(|p| (p.id, p)).collect();
        debug!(count = people.len(), "person store seeded");
        Self { people }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

impl PersonStore for InMemoryPersonStore {
    fn find_by_id(&self, id: u64) -> Result<Person, DataError> {
        self.people.get(&id).cloned().ok_or(DataError::NotFound { id })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryPersonStore {
        InMemoryPersonStore::with_people([Person::new(1, "ada"), Person::new(7, "grace")])
    }

    #[test]
    fn find_existing() {
        let s = store();
        assert_eq!(s.find_by_id(7).unwrap(), Person::new(7, "grace"));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn find_missing_is_not_found() {
        let s = store();
        assert_eq!(s.find_by_id(42), Err(DataError::NotFound { id: 42 }));
    }

    #[test]
    fn id_or_default_falls_back_on_error() {
        let s = store();
        assert_eq!(id_or_default(&s.find_by_id(1)), 1);
        assert_eq!(id_or_default(&s.find_by_id(99)), DEFAULT_PERSON_ID);
    }

    #[test]
    fn later_seed_entry_wins() {
        let s = InMemoryPersonStore::with_people([Person::new(3, "linus"), Person::new(3, "ken")]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.find_by_id(3).unwrap().name, "ken");
        assert!(InMemoryPersonStore::new().is_empty());
    }

    #[test]
    fn usable_as_trait_object() {
        let s: Box<dyn PersonStore> = Box::new(store());
        assert!(s.find_by_id(1).is_ok());
    }
}
