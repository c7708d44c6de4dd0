use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flashcard {
    pub term: String,
    pub definition: String,
}

impl Flashcard {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

impl fmt::Display for Flashcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(\"{}\":\"{}\")", self.term, self.definition)
    }
}

/// Serialised form of a whole deck: term -> (definition, mistake count).
///
/// In JSON each value is a two element array, e.g. `{"France": ["Paris", 10]}`.
/// Entries keep the order they were inserted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(IndexMap<String, (String, u32)>);

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Definition and mistake count stored for `term`.
    pub fn get(&self, term: &str) -> Option<&(String, u32)> {
        self.0.get(term)
    }

    pub fn insert(
        &mut self,
        term: impl Into<String>,
        definition: impl Into<String>,
        mistakes: u32,
    ) {
        self.0.insert(term.into(), (definition.into(), mistakes));
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, (String, u32))> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, (String, u32))>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Snapshot {
    type Item = (String, (String, u32));
    type IntoIter = indexmap::map::IntoIter<String, (String, u32)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Result of checking one quiz answer.
///
/// `matched` echoes the answer when it was correct, or names the term whose
/// definition the wrong answer happens to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskResult {
    pub is_correct: bool,
    pub matched: Option<String>,
}
