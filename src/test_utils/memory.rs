//! In-memory source tree.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use crate::resolver::{SourceText, SourceTree};

/// A [`SourceTree`] holding its files in memory.
///
/// Records how often each path is read, so tests can check that the closure
/// walk reads every file once.
#[derive(Debug, Default)]
pub struct MemoryTree {
    files: HashMap<String, String>,
    reads: RefCell<HashMap<String, usize>>,
}

impl MemoryTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style.
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: &str, content: &str) {
        self.files.insert(path.to_string(), content.to_string());
    }

    /// Number of successful and failed reads of `path`.
    pub fn read_count(&self, path: &str) -> usize {
        self.reads.borrow().get(path).copied().unwrap_or(0)
    }
}

impl SourceTree for MemoryTree {
    fn read_text(&self, relative: &str) -> io::Result<SourceText> {
        *self.reads.borrow_mut().entry(relative.to_string()).or_default() += 1;
        self.files.get(relative).map(SourceText::utf8).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {relative}"))
        })
    }

    fn locate(&self, relative: &str) -> String {
        format!("memory:{relative}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_are_counted() {
        let tree = MemoryTree::new().with_file("boost/a.hpp", "// a\n");
        assert_eq!(tree.read_text("boost/a.hpp").unwrap().text, "// a\n");
        assert!(tree.read_text("boost/b.hpp").is_err());
        assert_eq!(tree.read_count("boost/a.hpp"), 1);
        assert_eq!(tree.read_count("boost/b.hpp"), 1);
        assert_eq!(tree.read_count("boost/c.hpp"), 0);
    }
}
