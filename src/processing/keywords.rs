//! Noun / proper-noun keyword extraction

use crate::nlp::Annotator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Deduplicated, lower-cased keywords. Iteration is sorted, so display
/// order never depends on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains(keyword)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn intersection(&self, other: &KeywordSet) -> KeywordSet {
        KeywordSet(self.0.intersection(&other.0).cloned().collect())
    }

    /// Keywords in `self` that `other` lacks
    pub fn difference(&self, other: &KeywordSet) -> KeywordSet {
        KeywordSet(self.0.difference(&other.0).cloned().collect())
    }

    /// Sorted, at most `limit` entries
    pub fn top(&self, limit: usize) -> Vec<String> {
        self.0.iter().take(limit).cloned().collect()
    }
}

impl FromIterator<String> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        KeywordSet(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        KeywordSet(iter.into_iter().map(str::to_string).collect())
    }
}

/// Lower-cased surface forms of every NOUN and PROPN token.
///
/// Works on raw or normalized text; empty or whitespace-only input gives an
/// empty set.
pub fn extract_keywords(annotator: &dyn Annotator, text: &str) -> KeywordSet {
    if text.trim().is_empty() {
        return KeywordSet::new();
    }

    annotator
        .annotate(text)
        .tokens
        .iter()
        .filter(|token| token.pos.is_nominal())
        .map(|token| token.text.to_lowercase())
        .collect()
}
