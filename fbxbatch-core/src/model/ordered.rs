//! Insertion-ordered map used for batch files and per-file clips.
//!
//! Keys are unique and iteration follows insertion order, which is what the
//! encoder relies on to produce the same document for the same batch.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Returned by [`OrderedMap::insert`] when the key is already present.
///
/// Hands the rejected key and value back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateKey<K, V> {
    pub key: K,
    pub value: V,
}

impl<K: fmt::Debug, V> fmt::Display for DuplicateKey<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate key {:?}", self.key)
    }
}

/// A map with unique keys that iterates in insertion order.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `key` at the end. An existing key is left untouched and the
    /// new pair is returned in the error.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKey<K, V>> {
        if self.index.contains_key(&key) {
            return Err(DuplicateKey { key, value });
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        Ok(())
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(&pos) => Some(&mut self.entries[pos].1),
            None => None,
        }
    }

    /// Removes `key`, keeping the relative order of everything else.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let pos = self.index.remove(key)?;
        let (_, value) = self.entries.remove(pos);
        for (k, _) in &self.entries[pos..] {
            if let Some(slot) = self.index.get_mut::<K>(k) {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

// Order is part of the value: two maps with the same pairs in a different
// order produce different documents.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrderedMap<String, u32> {
        let mut map = OrderedMap::new();
        for (i, name) in ["walk", "run", "idle", "jump"].iter().enumerate() {
            map.insert(name.to_string(), i as u32).unwrap();
        }
        map
    }

    #[test]
    fn test_iterates_in_insertion_order() {
        let map = sample();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["walk", "run", "idle", "jump"]);
    }

    #[test]
    fn test_insert_rejects_existing_key() {
        let mut map = sample();
        let err = map.insert("run".to_string(), 99).unwrap_err();
        assert_eq!(err.key, "run");
        assert_eq!(err.value, 99);
        assert_eq!(map.get("run"), Some(&1));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_remove_keeps_order_and_index() {
        let mut map = sample();
        assert_eq!(map.remove("run"), Some(1));
        assert_eq!(map.remove("run"), None);

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["walk", "idle", "jump"]);
        assert_eq!(map.get("idle"), Some(&2));
        assert_eq!(map.get("jump"), Some(&3));

        *map.get_mut("jump").unwrap() = 7;
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![0, 2, 7]);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let mut a = OrderedMap::new();
        a.insert("x", 1).unwrap();
        a.insert("y", 2).unwrap();
        let mut b = OrderedMap::new();
        b.insert("y", 2).unwrap();
        b.insert("x", 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let map = sample();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"walk":0,"run":1,"idle":2,"jump":3}"#);
    }
}
