use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_RATING, DEFAULT_ROUNDS};
use crate::error::{EloError, Result};

/// Rating state of a single catalog entry. The name lives in the table key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Current Elo estimate. Unbounded in practice.
    pub rating: f64,
    /// Number of comparisons this item took part in. Never decreases.
    pub rounds: u32,
}

impl Default for Item {
    fn default() -> Self {
        Item {
            rating: DEFAULT_RATING,
            rounds: DEFAULT_ROUNDS,
        }
    }
}

/// Trim and lowercase a raw name so that "Pikachu " and "pikachu" collide.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Mapping from item name to its rating state.
///
/// Backed by a `BTreeMap`: iteration is always in name order, which keeps
/// seeded pair selection reproducible across runs. Serializes as a plain JSON
/// object, `{"name": {"rating": 1000.0, "rounds": 0}, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingTable {
    items: BTreeMap<String, Item>,
}

impl RatingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh table with one `template` entry per distinct normalized name.
    /// Blank names are skipped.
    pub fn from_names<I, S>(names: I, template: Item) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = RatingTable::new();
        for name in names {
            let name = normalize_name(name.as_ref());
            if name.is_empty() {
                continue;
            }
            table.items.entry(name).or_insert(template);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Like `get`, but a missing name is an `UnknownItem` error.
    pub fn item(&self, name: &str) -> Result<&Item> {
        self.items
            .get(name)
            .ok_or_else(|| EloError::UnknownItem(name.to_string()))
    }

    /// Overwrite two entries in one step. Callers have already checked both names.
    pub(crate) fn commit_pair(&mut self, a: (&str, Item), b: (&str, Item)) {
        self.items.insert(a.0.to_string(), a.1);
        self.items.insert(b.0.to_string(), b.1);
    }

    /// Insert `item` under `name` unless the name is already present.
    /// Returns true when a new entry was created.
    pub fn insert_if_absent(&mut self, name: &str, item: Item) -> bool {
        match self.items.entry(name.to_string()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(item);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Item> {
        self.items.remove(name)
    }

    /// Item names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.items.iter().map(|(name, item)| (name.as_str(), item))
    }

    /// Sum of all `rounds`; twice the number of recorded comparisons.
    pub fn total_rounds(&self) -> u64 {
        self.items.values().map(|item| u64::from(item.rounds)).sum()
    }
}
