//! The set of library paths discovered so far.

use std::collections::BTreeSet;

/// Library-relative paths already discovered by the closure walk.
///
/// The set only ever grows. Membership is the only deduplication mechanism:
/// a path is scanned at most once however many files include it. Iteration
/// is sorted, which keeps materialization order and logs stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet {
    paths: BTreeSet<String>,
}

impl VisitedSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path`. Returns `true` if it was not present before.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    /// Whether `path` has been discovered.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Number of distinct paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing has been discovered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a VisitedSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
