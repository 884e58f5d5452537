//! Read access to the library snapshot.
//!
//! The resolver and the materializer never touch the filesystem directly; they
//! read through [`SourceTree`]. Production runs use [`FsSourceTree`], tests use
//! the in-memory tree from `test_utils`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::join_relative;

/// How the bytes of a source file were turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Valid UTF-8 (includes plain ASCII)
    Utf8,
    /// Anything else, mapped byte-for-byte to `U+0000..=U+00FF`
    Latin1,
}

/// Text of one source file plus the encoding needed to write it back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// Decoded file content
    pub text: String,
    /// Encoding the content was decoded from
    pub encoding: TextEncoding,
}

impl SourceText {
    /// Text that was read as UTF-8.
    #[must_use]
    pub fn utf8(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            encoding: TextEncoding::Utf8,
        }
    }

    /// Decode raw file bytes.
    ///
    /// Files that are not valid UTF-8 (old headers with Latin-1 author names in
    /// comments) are decoded byte-for-byte so that [`SourceText::encode`]
    /// reproduces every byte the rewriter did not touch.
    #[must_use]
    pub fn decode(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::utf8(text),
            Err(err) => Self {
                text: err.as_bytes().iter().map(|&b| char::from(b)).collect(),
                encoding: TextEncoding::Latin1,
            },
        }
    }

    /// Encode `text` (typically a rewritten form of this file) the same way
    /// the original was encoded.
    #[must_use]
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self.encoding {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            // Rewriting only inserts ASCII, so every char still fits in a byte.
            TextEncoding::Latin1 => {
                text.chars().map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?')).collect()
            }
        }
    }
}

/// Read-only view of a library snapshot addressed by library-relative paths.
pub trait SourceTree {
    /// Read the file at `relative` (forward-slash separated).
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file is missing or unreadable.
    fn read_text(&self, relative: &str) -> io::Result<SourceText>;

    /// Human-readable location of `relative`, used in error messages.
    fn locate(&self, relative: &str) -> String {
        relative.to_string()
    }
}

/// [`SourceTree`] backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsSourceTree {
    root: PathBuf,
}

impl FsSourceTree {
    /// Create a tree rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a library-relative path.
    #[must_use]
    pub fn path_of(&self, relative: &str) -> PathBuf {
        join_relative(&self.root, relative)
    }
}

impl SourceTree for FsSourceTree {
    fn read_text(&self, relative: &str) -> io::Result<SourceText> {
        fs::read(self.path_of(relative)).map(SourceText::decode)
    }

    fn locate(&self, relative: &str) -> String {
        self.path_of(relative).display().to_string()
    }
}

impl<T: SourceTree + ?Sized> SourceTree for &T {
    fn read_text(&self, relative: &str) -> io::Result<SourceText> {
        (**self).read_text(relative)
    }

    fn locate(&self, relative: &str) -> String {
        (**self).locate(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fs_tree_reads_relative_paths() -> anyhow::Result<()> {
        let temp = tempdir()?;
        fs::create_dir_all(temp.path().join("boost/mpl"))?;
        fs::write(temp.path().join("boost/mpl/if.hpp"), "// if\n")?;

        let tree = FsSourceTree::new(temp.path());
        assert_eq!(tree.read_text("boost/mpl/if.hpp")?, SourceText::utf8("// if\n"));
        assert_eq!(
            tree.read_text("boost/mpl/missing.hpp").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
        assert!(tree.locate("boost/mpl/if.hpp").ends_with("if.hpp"));
        Ok(())
    }

    #[test]
    fn test_latin1_round_trips_bytes() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let original = b"// Copyright Fran\xe7ois\n#include <boost/x.hpp>\n".to_vec();
        fs::write(temp.path().join("latin1.hpp"), &original)?;

        let tree = FsSourceTree::new(temp.path());
        let source = tree.read_text("latin1.hpp")?;
        assert_eq!(source.encoding, TextEncoding::Latin1);
        assert!(source.text.contains("#include <boost/x.hpp>"));
        assert_eq!(source.encode(&source.text), original);
        Ok(())
    }
}
