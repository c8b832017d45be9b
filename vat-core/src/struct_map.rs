use crate::Value;
use std::collections::BTreeMap;

/// Common contract of the named-field containers a [`Value`] can hold.
///
/// Keys are unique: `insert` never overwrites, it reports `false` and leaves
/// the existing entry untouched. Whether iteration follows key order or
/// insertion order is fixed by the implementing type, not per instance.
pub trait Entries: Default + Clone + PartialEq {
    /// True when iteration preserves insertion order.
    const ORDERED: bool;

    /// Inserts the pair if the key is absent. Returns whether it was inserted.
    fn insert(&mut self, key: String, value: Value) -> bool;
    fn get(&self, key: &str) -> Option<&Value>;
    fn get_mut(&mut self, key: &str) -> Option<&mut Value>;
    fn remove(&mut self, key: &str) -> Option<Value>;
    fn len(&self) -> usize;
    fn iter(&self) -> impl Iterator<Item = (&str, &Value)>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }
    fn values(&self) -> impl Iterator<Item = &Value> {
        self.iter().map(|(_, v)| v)
    }
}

/// Key-sorted named collection of values, the materialized form of a parsed
/// object.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Struct {
    entries: BTreeMap<String, Value>,
}

impl Entries for Struct {
    const ORDERED: bool = false;

    fn insert(&mut self, key: String, value: Value) -> bool {
        use std::collections::btree_map::Entry;
        match self.entries.entry(key) {
            Entry::Occupied(..) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }
    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
    fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }
    fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }
    fn len(&self) -> usize {
        self.entries.len()
    }
    fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<BTreeMap<String, Value>> for Struct {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, Value)> for Struct {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut result = Self::default();
        for (k, v) in iter {
            result.insert(k, v);
        }
        result
    }
}

/// Insertion-order-preserving named collection of values.
///
/// Lookup is a linear scan, which is the intended trade-off for the small
/// records this container represents.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct OrderedStruct {
    entries: Vec<(String, Value)>,
}

impl Entries for OrderedStruct {
    const ORDERED: bool = true;

    fn insert(&mut self, key: String, value: Value) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }
    fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
    fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
    fn remove(&mut self, key: &str) -> Option<Value> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(position).1)
    }
    fn len(&self) -> usize {
        self.entries.len()
    }
    fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for OrderedStruct {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut result = Self::default();
        for (k, v) in iter {
            result.insert(k, v);
        }
        result
    }
}
