use indexmap::IndexMap;
use serde::Deserialize;
use std::hash::Hash;

/// Which entry a full cache discards to make room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Reads refresh an entry; the least recently used one is evicted
    #[default]
    Lru,
    /// Reads do not refresh; the oldest insertion is evicted
    Fifo,
}

impl std::fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvictionPolicy::Lru => write!(f, "lru"),
            EvictionPolicy::Fifo => write!(f, "fifo"),
        }
    }
}

/// Capacity-bounded map used to memoize upstream responses.
///
/// Entries are kept in eviction order: index 0 is always the next victim.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    entries: IndexMap<K, V>,
    capacity: usize,
    policy: EvictionPolicy,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq, V> BoundedCache<K, V> {
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity,
            policy,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(index) = self.entries.get_index_of(key) else {
            self.misses += 1;
            return None;
        };
        self.hits += 1;

        let index = match self.policy {
            EvictionPolicy::Lru => self.touch(index),
            EvictionPolicy::Fifo => index,
        };

        self.entries.get_index(index).map(|(_, v)| v)
    }

    /// Insert or replace a value, evicting one entry if the cache is full.
    /// Returns the evicted key, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<K> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(index) = self.entries.get_index_of(&key) {
            // insert on an existing key keeps its position
            self.entries.insert(key, value);
            if self.policy == EvictionPolicy::Lru {
                self.touch(index);
            }
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0).map(|(k, _)| k)
        } else {
            None
        };

        self.entries.insert(key, value);
        evicted
    }

    /// Move the entry at `index` to the most-recent end and return its new index.
    fn touch(&mut self, index: usize) -> usize {
        if let Some((k, v)) = self.entries.shift_remove_index(index) {
            self.entries.insert(k, v);
        }
        self.entries.len() - 1
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
