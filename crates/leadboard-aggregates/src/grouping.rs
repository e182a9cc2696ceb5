//! Insertion-ordered grouping shared by every aggregator.
//!
//! Groups remember the order in which their key was first seen, and ranking
//! uses a stable sort, so equal counts always keep first-encountered order.

use std::collections::HashMap;
use std::hash::Hash;

/// Ordered multimap from a key to the items grouped under it.
#[derive(Debug, Clone)]
pub struct Grouping<K, V> {
    index: HashMap<K, usize>,
    groups: Vec<(K, Vec<V>)>,
}

impl<K, V> Default for Grouping<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<K, V> Grouping<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` to the group for `key`, creating it at the end if new.
    pub fn insert(&mut self, key: K, item: V) {
        match self.index.get(&key) {
            Some(&position) => self.groups[position].1.push(item),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![item]));
            }
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    /// Group sizes in first-seen order.
    pub fn counts(&self) -> Vec<(K, usize)> {
        self.groups
            .iter()
            .map(|(key, items)| (key.clone(), items.len()))
            .collect()
    }

    /// Group sizes, largest first; ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(K, usize)> {
        let mut counts = self.counts();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

impl<K, V> FromIterator<(K, V)> for Grouping<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut grouping = Self::new();
        for (key, item) in iter {
            grouping.insert(key, item);
        }
        grouping
    }
}
