//! Participant and prize pools
//!
//! Both pools share the same rules: names are trimmed, blank names are
//! ignored, and a name can only appear once. Insertion order is kept so the
//! presentation layer can list entries the way the operator typed them.

pub mod participant;
pub mod prize;

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

pub use participant::Participant;
pub use prize::{Prize, PrizeTemplate};

/// Anything stored in a [`Pool`] is identified by its display name
pub trait Named {
    fn name(&self) -> &str;
}

/// An ordered collection with unique names
#[derive(Debug, Clone, PartialEq)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Named> Pool<T> {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from stored entries, dropping any repeated names
    pub fn from_items(items: Vec<T>) -> Self {
        let mut seen = HashSet::new();
        let total = items.len();
        let items: Vec<T> = items
            .into_iter()
            .filter(|item| seen.insert(item.name().to_string()))
            .collect();

        if items.len() < total {
            log::warn!(
                "Dropped {} duplicate entries while restoring pool",
                total - items.len()
            );
        }

        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name().to_string()).collect()
    }

    /// Exact, case-sensitive lookup
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name() == name)
    }

    /// Add a single entry built by `make`
    ///
    /// Returns the new entry, or `None` when the trimmed name is blank or
    /// already present.
    pub fn insert_with<F>(&mut self, raw_name: &str, make: F) -> Option<&T>
    where
        F: FnOnce(String) -> T,
    {
        let name = normalize_name(raw_name)?;
        if self.contains(&name) {
            return None;
        }

        self.items.push(make(name));
        self.items.last()
    }

    /// Add many entries, skipping blanks and names already seen either in
    /// the pool or earlier in `names`
    ///
    /// Returns the names that were actually added, in input order.
    pub fn extend_with<I, S, F>(&mut self, names: I, mut make: F) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(String) -> T,
    {
        let mut seen: HashSet<String> = self.names().into_iter().collect();
        let mut added = Vec::new();

        for raw in names {
            let Some(name) = normalize_name(raw.as_ref()) else {
                continue;
            };
            if !seen.insert(name.clone()) {
                continue;
            }
            self.items.push(make(name.clone()));
            added.push(name);
        }

        added
    }

    /// Remove every entry whose name is in `names`, returning how many went
    pub fn remove_names(&mut self, names: &HashSet<&str>) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !names.contains(item.name()));
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Owned copy of the entries, for snapshots
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Trim a raw name, rejecting blanks
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split a pasted roster into names
///
/// Accepts newlines, ASCII and full-width commas and semicolons as
/// separators. Blank entries are dropped and repeats keep their first
/// position.
pub fn parse_names(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    text.split(['\n', '\r', ',', '，', ';', '；'])
        .filter_map(normalize_name)
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Read a stored id, minting a fresh one when the stored text is not a UUID
///
/// Older saves fell back to millisecond timestamps as ids.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(Uuid::parse_str(&raw).unwrap_or_else(|_| {
        log::debug!("Replacing non-UUID id {:?}", raw);
        Uuid::new_v4()
    }))
}
