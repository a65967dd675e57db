//! Caller-keyed registry of live sessions.
//!
//! Hosts that show several editors at once (one per window, one per chat)
//! keep them here under a key of their choosing instead of in process-wide
//! lookup tables. Creation and disposal are explicit.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::EditError;

/// Registry of values keyed by a host identifier such as `(window_id, session_id)`.
#[derive(Debug, Clone)]
pub struct SessionArena<K, T> {
    entries: HashMap<K, T>,
}

impl<K, T> Default for SessionArena<K, T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, T> SessionArena<K, T>
where
    K: Eq + Hash + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `key`.
    ///
    /// Fails with [`EditError::SessionExists`] if the key is taken; the
    /// existing entry is left alone.
    pub fn create(&mut self, key: K, value: T) -> Result<&mut T, EditError> {
        use std::collections::hash_map::Entry;

        match self.entries.entry(key) {
            Entry::Occupied(entry) => Err(EditError::SessionExists(format!("{:?}", entry.key()))),
            Entry::Vacant(entry) => {
                log::debug!("Session created: {:?}", entry.key());
                Ok(entry.insert(value))
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    /// Fetch the entry for `key`, creating it with `make` on first use.
    pub fn get_or_create_with<F>(&mut self, key: K, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.entries.entry(key).or_insert_with(make)
    }

    /// Remove and return the entry for `key`.
    pub fn dispose(&mut self, key: &K) -> Option<T> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            log::debug!("Session disposed: {:?}", key);
        }
        removed
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

    /// Keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}
