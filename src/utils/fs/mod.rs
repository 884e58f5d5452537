//! File system helpers used by the pipeline.
//!
//! - [`dirs`] - directory creation
//! - [`atomic`] - temp-and-rename writes into the destination tree
//! - [`discovery`] - sorted, pattern-filtered directory walks
//!
//! All helpers report failures as [`VendorError::FileSystemError`] naming the
//! operation and the path involved.
//!
//! [`VendorError::FileSystemError`]: crate::core::VendorError::FileSystemError

pub mod atomic;
pub mod dirs;
pub mod discovery;

pub use atomic::atomic_write;
pub use dirs::{ensure_dir, ensure_parent_dir};
pub use discovery::{find_files, relative_slash_path};
