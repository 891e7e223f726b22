use std::fmt;

/// Normalized cache-lookup form of a raw search input.
///
/// Two raw queries that differ only in case or in leading, trailing or
/// repeated whitespace normalize to the same key, so trivially reformatted
/// searches share one cache entry and one network call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    /// Derive a key from raw user input: trim, lowercase and collapse
    /// internal whitespace runs to a single `-` separator.
    pub fn normalize(raw: &str) -> Self {
        let key = raw
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        QueryKey(key)
    }

    /// An empty key means there is nothing to search for.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
