//! Test utilities for pothos-extract
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests.
//!
//! - [`MemoryTree`] - an in-memory [`SourceTree`](crate::resolver::SourceTree)
//!   that counts reads
//! - [`LibraryFixture`] - a synthetic library snapshot on disk, with a
//!   destination directory next to it
//! - [`init_test_logging`] - opt-in tracing output for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use pothos_extract::pipeline::{RunOptions, run};
//! use pothos_extract::test_utils::LibraryFixture;
//!
//! let fixture = LibraryFixture::standard().unwrap();
//! let report = run(&fixture.config(), &RunOptions::default()).unwrap();
//! assert!(fixture.output_exists("lib/basic_archive.cpp"));
//! ```

pub mod fixtures;
pub mod memory;

pub use fixtures::{LibraryFixture, STANDARD_DEPENDENCY_COUNT, STANDARD_FILE_COUNT};
pub use memory::MemoryTree;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. With `level` set, that level is used;
/// otherwise `RUST_LOG` is honored if present, and nothing is logged if not.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
