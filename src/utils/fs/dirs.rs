//! Directory creation.

use std::fs;
use std::path::Path;

use crate::core::{Result, VendorError};

/// Ensures a directory exists, creating it and all missing parents.
///
/// # Errors
///
/// Returns [`VendorError::FileSystemError`] if the path exists but is not a
/// directory, or if creation fails.
///
/// # Examples
///
/// ```rust,no_run
/// use pothos_extract::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> pothos_extract::core::Result<()> {
/// ensure_dir(Path::new("out/include/Pothos/archive"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(VendorError::FileSystemError {
            operation: "create directory".to_string(),
            path: path.display().to_string(),
            reason: "path exists but is not a directory".to_string(),
        });
    }
    fs::create_dir_all(path).map_err(|e| VendorError::file_system("create directory", path, &e))
}

/// Ensures the parent directory of a file path exists.
///
/// Paths without a parent are accepted as-is.
///
/// # Errors
///
/// See [`ensure_dir`].
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}
