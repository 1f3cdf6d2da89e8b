// Aggregations behind each view: group -> reduce -> derive -> sort
pub mod customers;
pub mod keys;
pub mod payments;
pub mod products;
pub mod rankings;
pub mod revenue;
pub mod sales;

use std::collections::HashMap;
use std::hash::Hash;

/// Groups in first-seen key order, so stable sorts downstream break ties by
/// source order.
#[derive(Debug, Clone)]
pub struct Grouped<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K: Eq + Hash + Clone, V> Grouped<K, V> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Folds one more item into the group for `key`, creating it with `init`.
    pub fn add<I, U>(mut self, key: K, init: I, update: U) -> Self
    where
        I: FnOnce() -> V,
        U: FnOnce(&mut V),
    {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, init()));
                self.entries.len() - 1
            }
        };
        update(&mut self.entries[slot].1);
        self
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(K, V)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K: Eq + Hash + Clone, V> Default for Grouped<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Groups `items` by `key`, reducing each group with `update` from `V::default()`.
pub fn group_by<T, K, V, F, U>(items: &[T], key: F, update: U) -> Grouped<K, V>
where
    K: Eq + Hash + Clone,
    V: Default,
    F: Fn(&T) -> K,
    U: Fn(&mut V, &T),
{
    items.iter().fold(Grouped::new(), |groups, item| {
        groups.add(key(item), V::default, |acc| update(acc, item))
    })
}

/// Stable descending sort on an f64 field.
pub(crate) fn sort_desc_by<T, F>(items: &mut [T], value: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| value(b).total_cmp(&value(a)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_keeps_first_seen_order() {
        let items = [("b", 1.0), ("a", 2.0), ("b", 3.0)];
        let groups: Grouped<&str, f64> = group_by(&items, |i| i.0, |acc, i| *acc += i.1);
        assert_eq!(groups.into_entries(), vec![("b", 4.0), ("a", 2.0)]);
    }

    #[test]
    fn test_sort_desc_is_stable() {
        let mut items = vec![("x", 1.0), ("y", 2.0), ("z", 1.0)];
        sort_desc_by(&mut items, |i| i.1);
        assert_eq!(items, vec![("y", 2.0), ("x", 1.0), ("z", 1.0)]);
    }
}
