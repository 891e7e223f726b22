use std::collections::HashMap;

use crate::query::QueryKey;

/// In-memory store of previously fetched content keyed by normalized query.
///
/// Entries are written only after a request for their key fully succeeded
/// and are never evicted; the cache is a cheap artifact of its fetcher's
/// lifetime, not persisted storage.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<QueryKey, String>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: QueryKey, content: String) {
        self.entries.insert(key, content);
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
