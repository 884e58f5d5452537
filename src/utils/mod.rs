//! Filesystem and terminal helpers.
//!
//! - [`fs`] - directory creation, atomic writes, file discovery
//! - [`progress`] - progress bar for the write phase
//!
//! # Example
//!
//! ```rust,no_run
//! use pothos_extract::utils::{ProgressBar, atomic_write, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> pothos_extract::core::Result<()> {
//! ensure_dir(Path::new("out/include"))?;
//! atomic_write(Path::new("out/include/x.hpp"), b"content")?;
//!
//! let progress = ProgressBar::new(1);
//! progress.inc(1);
//! progress.finish_and_clear();
//! # Ok(())
//! # }
//! ```

pub mod fs;
pub mod progress;

pub use fs::{atomic_write, ensure_dir, find_files, relative_slash_path};
pub use progress::ProgressBar;
