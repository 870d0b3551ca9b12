//! Keyword table: the thing that turns a `NAME` token's text into "is
//! this actually the keyword `for`/`if`/`class`/...?" in O(bucket size)
//! rather than a linear scan of every keyword on every `NAME`.
//!
//! Keywords are bucketed by length because no grammar has so many
//! keywords that bucketing by length then scanning linearly within a
//! bucket loses to a hash map in practice, and this mirrors the
//! reference tokenizer's own keyword table shape closely enough that
//! `expect_keyword` can stay a two-line function.

use rustc_hash::FxHashMap;

/// Keywords grouped by byte length, each bucket searched linearly.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    buckets: FxHashMap<usize, Vec<String>>,
}

impl KeywordTable {
    /// Builds a table from a flat keyword list (typically the target
    /// grammar's full reserved-word set).
    #[must_use]
    pub fn new(keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut buckets: FxHashMap<usize, Vec<String>> = FxHashMap::default();

        for kw in keywords {
            let kw = kw.into();
            buckets.entry(kw.len()).or_default().push(kw);
        }

        Self { buckets }
    }

    /// Whether `text` is a known keyword.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.buckets.get(&text.len()).is_some_and(|bucket| bucket.iter().any(|kw| kw == text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_keyword_in_correct_bucket() {
        let table = KeywordTable::new(["if", "for", "class", "def"]);
        assert!(table.contains("if"));
        assert!(table.contains("class"));
        assert!(!table.contains("iffy"));
        assert!(!table.contains("classy"));
    }

    #[test]
    fn empty_table_matches_nothing() {
        let table = KeywordTable::new(Vec::<String>::new());
        assert!(!table.contains("if"));
    }
}
