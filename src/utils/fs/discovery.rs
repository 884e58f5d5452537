//! File discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::{Result, VendorError};

/// Recursively finds regular files under `dir` whose file name matches
/// `pattern`.
///
/// Results are sorted by path so that runs over the same tree process files
/// in the same order. Symlinks are not followed.
///
/// # Errors
///
/// Returns [`VendorError::FileSystemError`] if `dir` or one of its
/// subdirectories cannot be read.
///
/// # Examples
///
/// ```rust,no_run
/// use pothos_extract::utils::fs::find_files;
/// use std::path::Path;
///
/// # fn example() -> pothos_extract::core::Result<()> {
/// let pattern = glob::Pattern::new("*.cpp").unwrap();
/// let sources = find_files(Path::new("libs/serialization/src"), &pattern)?;
/// # Ok(())
/// # }
/// ```
pub fn find_files(dir: &Path, pattern: &glob::Pattern) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            VendorError::FileSystemError {
                operation: "walk directory".to_string(),
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        if entry.file_type().is_file() && pattern.matches(&entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// `path` relative to `root`, with `/` separators.
///
/// Returns `None` if `path` is not under `root` or is not valid UTF-8.
#[must_use]
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> =
        relative.components().map(|component| component.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}
