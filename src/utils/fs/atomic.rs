//! Atomic file writes using a temp-and-rename strategy.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::{Result, VendorError};
use crate::utils::fs::dirs::ensure_parent_dir;

/// Atomically writes bytes to `path`, replacing any existing file.
///
/// The content goes to a temporary file in the target directory first, is
/// synced, then renamed over `path`. Readers see either the old file or the
/// complete new one. Missing parent directories are created.
///
/// # Errors
///
/// Returns [`VendorError::FileSystemError`] naming the step that failed.
///
/// # Examples
///
/// ```rust,no_run
/// use pothos_extract::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> pothos_extract::core::Result<()> {
/// atomic_write(Path::new("out/lib/basic_archive.cpp"), b"// vendored\n")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| VendorError::file_system("create temp file", dir, &e))?;
    temp.write_all(content)
        .map_err(|e| VendorError::file_system("write temp file", temp.path(), &e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| VendorError::file_system("sync temp file", temp.path(), &e))?;

    temp.persist(path).map_err(|e| VendorError::file_system("rename temp file", path, &e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_parents() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("include/Pothos/archive/a.hpp");
        atomic_write(&target, b"content").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"content");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("a.hpp");
        fs::write(&target, "old old old").unwrap();
        atomic_write(&target, b"new").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");

        // No temp files are left behind.
        let entries = fs::read_dir(temp.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_atomic_write_into_file_parent_fails() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("lib");
        fs::write(&blocker, "").unwrap();
        let err = atomic_write(&blocker.join("x.cpp"), b"x").unwrap_err();
        assert!(matches!(err, VendorError::FileSystemError { .. }));
    }
}
