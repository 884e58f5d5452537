//! Integration test suite for pothos-extract
//!
//! These tests run the `pothos-extract` binary against the synthetic library
//! from `pothos_extract::test_utils::LibraryFixture` and check stdout, stderr,
//! exit status, and the tree written under the destination root.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **extract**: successful runs, output layout, and rewritten content
//! - **failures**: fatal errors and the guarantee that nothing is written
//! - **settings**: `--config` files with custom naming and layout rules

use assert_cmd::Command;

mod extract;
mod failures;
mod settings;

/// The binary under test, with a predictable environment.
pub fn pothos_extract() -> Command {
    let mut cmd = Command::cargo_bin("pothos-extract").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1").env("POTHOS_EXTRACT_NO_PROGRESS", "1");
    cmd
}
