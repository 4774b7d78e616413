//! Flatten the nested output of a BUFR decoder into an ordered record of scalar leaves.
//!
//! The decoder emits one mapping per message field, e.g.
//! `{"key": "airTemperature", "value": 288.3, "units": "K"}`, nested inside sequences that
//! follow the order of the message. Flattening assigns every element of a sequence an occurrence
//! counter, so the leaves of one field share a counter and can be found again as a group:
//! `0000042_key`, `0000042_value` and `0000042_units`.

use serde_json::Value;
use std::{collections::BTreeMap, fmt};

/// Key of a leaf in a `FlatRecord`, ordered by occurrence first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlatKey {
    counter: u64,
    name: String,
}

impl FlatKey {
    /// Create a new key.
    pub fn new<S: Into<String>>(counter: u64, name: S) -> Self {
        FlatKey {
            counter,
            name: name.into(),
        }
    }

    /// The occurrence counter.
    #[inline]
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// The name of the field this leaf was stored under, empty for sequence elements.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FlatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:07}_{}", self.counter, self.name)
    }
}

/// An ordered mapping from synthetic keys to scalar leaf values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    entries: BTreeMap<FlatKey, Value>,
}

impl FlatRecord {
    /// Number of leaves.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no leaves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the leaf stored under `name` for a given occurrence.
    #[inline]
    pub fn get(&self, counter: u64, name: &str) -> Option<&Value> {
        self.entries.get(&FlatKey::new(counter, name))
    }

    /// Iterate over all leaves in message order.
    pub fn iter(&self) -> impl Iterator<Item = (&FlatKey, &Value)> {
        self.entries.iter()
    }

    /// Occurrence counters of every field that carries a `key` leaf, ascending.
    pub fn key_prefixes<'a>(&'a self) -> impl Iterator<Item = u64> + 'a {
        self.entries
            .keys()
            .filter(|k| k.name == "key")
            .map(|k| k.counter)
    }
}

/// Flatten a nested structure of mappings, sequences and scalars.
///
/// Mappings are visited by key and sequences by position. The occurrence counter advances once
/// after every sequence element, so all scalars directly inside one mapping share a counter.
/// Empty sequences and mappings add nothing and leave the counter alone.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use sounding_bufr::flatten;
///
/// let flat = flatten(&json!([
///     {"key": "pressure", "value": 101_325.0, "units": "Pa"},
///     {"key": "airTemperature", "value": 288.15, "units": "K"},
/// ]));
///
/// assert_eq!(flat.len(), 6);
/// assert_eq!(flat.get(1, "key").unwrap(), "airTemperature");
/// assert_eq!(flat.key_prefixes().collect::<Vec<_>>(), vec![0, 1]);
/// ```
pub fn flatten(root: &Value) -> FlatRecord {
    let mut flattener = Flattener::default();
    flattener.visit(root, "");

    log::debug!(
        "flattened {} leaves over {} occurrences",
        flattener.entries.len(),
        flattener.counter
    );

    FlatRecord {
        entries: flattener.entries,
    }
}

#[derive(Default)]
struct Flattener {
    counter: u64,
    entries: BTreeMap<FlatKey, Value>,
}

impl Flattener {
    fn visit(&mut self, node: &Value, name: &str) {
        match node {
            Value::Object(map) => {
                for (key, child) in map {
                    self.visit(child, key);
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.visit(item, "");
                    self.counter += 1;
                }
            }
            leaf => {
                self.entries
                    .insert(FlatKey::new(self.counter, name), leaf.clone());
            }
        }
    }
}
