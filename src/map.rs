//! Ordered map type for SDN objects.
//!
//! This module provides [`SdnMap`], a wrapper around [`IndexMap`] that keeps
//! object entries in declaration order. Order is significant in SDN: it must
//! survive a parse, any number of edits, and a serialize.
//!
//! ## Duplicate keys
//!
//! Inserting a key that already exists replaces the value but keeps the
//! entry at the position of its first occurrence. The parser relies on this
//! for repeated keys in source text: `{a: 1, b: 2, a: 3}` yields keys
//! `["a", "b"]` with `a` bound to `3`.
//!
//! ## Examples
//!
//! ```rust
//! use serde_sdn::{SdnMap, Node};
//!
//! let mut map = SdnMap::new();
//! map.insert("name".to_string(), Node::from("Alice"));
//! map.insert("age".to_string(), Node::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|n| n.as_str()), Some("Alice"));
//! ```

use crate::Node;
use indexmap::IndexMap;

/// An ordered map of string keys to SDN nodes.
///
/// # Examples
///
/// ```rust
/// use serde_sdn::{SdnMap, Node};
///
/// let mut map = SdnMap::new();
/// map.insert("first".to_string(), Node::from(1));
/// map.insert("second".to_string(), Node::from(2));
/// map.insert("first".to_string(), Node::from(10));
///
/// // Re-inserting keeps the original position
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SdnMap(IndexMap<String, Node>);

impl SdnMap {
    #[must_use]
    pub fn new() -> Self {
        SdnMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SdnMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-node pair into the map.
    ///
    /// If the map already contained this key, the old node is returned and
    /// the entry keeps its position; otherwise the entry is appended.
    pub fn insert(&mut self, key: String, node: Node) -> Option<Node> {
        self.0.insert(key, node)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    /// Returns the entry at `index` in declaration order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&String, &Node)> {
        self.0.get_index(index)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, shifting later entries down so the order of the
    /// remaining ones is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sdn::{SdnMap, Node};
    ///
    /// let mut map: SdnMap = [("a", 1), ("b", 2), ("c", 3)]
    ///     .into_iter()
    ///     .map(|(k, v)| (k.to_string(), Node::from(v)))
    ///     .collect();
    /// map.remove("a");
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, vec!["b", "c"]);
    /// ```
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.0.keys()
    }

    /// Returns an iterator over the nodes of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.0.values()
    }

    /// Returns an iterator over the key-node pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Node> {
        self.0.iter_mut()
    }
}

impl IntoIterator for SdnMap {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SdnMap {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Node)> for SdnMap {
    fn from_iter<T: IntoIterator<Item = (String, Node)>>(iter: T) -> Self {
        SdnMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut map = SdnMap::new();
        for key in ["c", "a", "b"] {
            map.insert(key.to_string(), Node::from(1));
        }
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = SdnMap::new();
        map.insert("a".to_string(), Node::from(1));
        map.insert("b".to_string(), Node::from(2));
        let old = map.insert("a".to_string(), Node::from(3));
        assert_eq!(old.and_then(|n| n.as_i64()), Some(1));
        assert_eq!(map.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
        assert_eq!(map.get("a").and_then(|n| n.as_i64()), Some(3));
    }

    #[test]
    fn test_remove_shifts() {
        let mut map: SdnMap = (0..4)
            .map(|i| (format!("k{}", i), Node::from(i)))
            .collect();
        assert!(map.remove("k1").is_some());
        assert!(!map.contains_key("k1"));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["k0", "k2", "k3"]);
    }
}
