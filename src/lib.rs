//! pothos-extract - vendor a Boost subset into Pothos
//!
//! Pothos ships an embedded copy of Boost.Serialization so that it can be built
//! and linked without Boost installed, and without clashing with a system Boost.
//! This crate produces that copy: it starts from the serialization library
//! sources, follows every `#include` into the rest of Boost, and writes the whole
//! closure out again with the namespace, macros, and include paths renamed.
//!
//! # Architecture Overview
//!
//! The run is a small pipeline over a worklist:
//!
//! - [`scanner`] - lazily extracts vendor include paths from one file's text
//! - [`resolver`] - walks include directives from seed files to a closed,
//!   deduplicated [`resolver::VisitedSet`]
//! - [`rewrite`] - the path rule (category-based destination layout) and the
//!   token rule (namespace, scoped names, macro prefixes), both pure
//! - [`materializer`] - reads, rewrites, and writes one file at its destination
//! - [`pipeline`] - plans a run from [`config::VendorConfig`] and drives the
//!   components, rendering everything before anything is written
//!
//! Supporting modules:
//!
//! - [`cli`] - command-line interface
//! - [`config`] - settings file loading and validation
//! - [`core`] - error types and user-facing error reports
//! - [`utils`] - filesystem helpers and progress reporting
//!
//! # Layout
//!
//! ```text
//! SOURCE_ROOT/                         DEST_ROOT/
//!   libs/serialization/src/*.cpp  -->    lib/*.cpp
//!   boost/archive/...             -->    include/Pothos/archive/...
//!   boost/serialization/...       -->    include/Pothos/serialization/...
//!   boost/mpl/...                 -->    include/Pothos/serialization/impl/mpl/...
//!   boost/<anything else>         -->    include/Pothos/serialization/impl/...
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use pothos_extract::config::VendorConfig;
//! use pothos_extract::pipeline::{RunOptions, run};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = VendorConfig::with_defaults("boost_1_55_0", "PothosSerialization");
//! let report = run(&config, &RunOptions::default())?;
//! println!("{}", report.dependencies);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod materializer;
pub mod pipeline;
pub mod resolver;
pub mod rewrite;
pub mod scanner;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
