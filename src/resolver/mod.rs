//! Include-closure resolution.
//!
//! Starting from seed files, the resolver follows vendor include directives
//! until no new library paths turn up. The result is a [`VisitedSet`] holding
//! every header the seeds need, directly or transitively.
//!
//! # Algorithm
//!
//! The walk is an explicit worklist rather than recursion:
//!
//! 1. Scan the seed with [`scan_includes`]
//! 2. Every reference not yet in the set is inserted and queued
//! 3. Pop a queued path, read it from the source tree, scan it, go to 2
//!
//! The set only grows and there are finitely many paths, so the walk ends even
//! when headers include each other. References are normalized by the scanner,
//! so `boost/mpl/./if.hpp` and `boost/mpl/if.hpp` are one entry.
//!
//! The seed itself is scanned but not inserted: seeds are component sources,
//! and the set is the list of headers to vendor.
//!
//! # Failure
//!
//! Resolution is all-or-nothing. A malformed directive, an unreadable seed, or
//! a referenced path that is not in the tree ends it with an error; no partial
//! closure is handed out.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pothos_extract::resolver::{ClosureResolver, FsSourceTree, VisitedSet};
//!
//! # fn example() -> pothos_extract::core::Result<()> {
//! let tree = FsSourceTree::new("boost_1_55_0");
//! let resolver = ClosureResolver::new(&tree, "boost/");
//! let mut visited = VisitedSet::new();
//! resolver.resolve("libs/serialization/src/basic_archive.cpp", &mut visited)?;
//! println!("{} headers needed", visited.len());
//! # Ok(())
//! # }
//! ```

mod source_tree;
mod visited;

pub use source_tree::{FsSourceTree, SourceText, SourceTree, TextEncoding};
pub use visited::VisitedSet;

use tracing::{debug, trace};

use crate::core::{Result, VendorError};
use crate::scanner::scan_includes;

/// Walks include directives through a [`SourceTree`].
///
/// The resolver itself holds no state between calls; the caller owns the
/// [`VisitedSet`] and passes it to every [`resolve`](Self::resolve) so that
/// several seeds share one closure.
pub struct ClosureResolver<'a, T: SourceTree + ?Sized> {
    tree: &'a T,
    marker: String,
}

impl<'a, T: SourceTree + ?Sized> ClosureResolver<'a, T> {
    /// Create a resolver reading from `tree`.
    ///
    /// `marker` is the namespace path prefix that identifies vendor includes,
    /// e.g. `boost/`.
    pub fn new(tree: &'a T, marker: impl Into<String>) -> Self {
        Self {
            tree,
            marker: marker.into(),
        }
    }

    /// Extend `visited` with everything reachable from `seed`.
    ///
    /// Returns the number of paths this call added.
    ///
    /// # Errors
    ///
    /// - [`VendorError::FileSystemError`] if the seed cannot be read
    /// - [`VendorError::MissingDependency`] if a discovered path cannot be read
    /// - [`VendorError::MalformedDirective`] from the scanner
    pub fn resolve(&self, seed: &str, visited: &mut VisitedSet) -> Result<usize> {
        let seed_text = self.tree.read_text(seed).map_err(|e| VendorError::FileSystemError {
            operation: "read seed".to_string(),
            path: self.tree.locate(seed),
            reason: e.to_string(),
        })?;

        let before = visited.len();
        let mut pending: Vec<(String, String)> = Vec::new();
        self.enqueue(seed, &seed_text.text, visited, &mut pending)?;

        while let Some((path, referenced_from)) = pending.pop() {
            let source =
                self.tree.read_text(&path).map_err(|e| VendorError::MissingDependency {
                    path: path.clone(),
                    referenced_from: referenced_from.clone(),
                    reason: format!("{}: {e}", self.tree.locate(&path)),
                })?;
            self.enqueue(&path, &source.text, visited, &mut pending)?;
        }

        let added = visited.len() - before;
        debug!("Resolved {} new dependencies from {}", added, seed);
        Ok(added)
    }

    fn enqueue(
        &self,
        origin: &str,
        text: &str,
        visited: &mut VisitedSet,
        pending: &mut Vec<(String, String)>,
    ) -> Result<()> {
        for reference in scan_includes(text, origin, &self.marker) {
            let reference = reference?;
            if visited.insert(reference.as_str()) {
                trace!("{} -> {}", origin, reference);
                pending.push((reference.into_string(), origin.to_string()));
            }
        }
        Ok(())
    }
}
