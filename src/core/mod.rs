//! Core types for pothos-extract
//!
//! This module holds the error type shared by every component and the
//! conversion from arbitrary errors into the report the binary prints.
//!
//! - [`VendorError`] - Enumerated failure modes of a vendoring run
//! - [`ErrorContext`] - Error wrapper with details and a suggestion
//! - [`user_friendly_error`] - Convert any error to the user-facing format

pub mod error;

pub use error::{ErrorContext, Result, VendorError, join_relative, user_friendly_error};
