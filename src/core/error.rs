//! Error handling for pothos-extract
//!
//! Every failure in a vendoring run is fatal: the snapshot or the settings have
//! to be fixed and the run repeated. The error system therefore has two jobs:
//! 1. **Strongly-typed errors** ([`VendorError`]) returned up the call chain by
//!    the scanner, resolver, rewriter, and materializer
//! 2. **User-friendly reports** ([`ErrorContext`]) that the binary prints once,
//!    right before it exits
//!
//! # Error Categories
//!
//! - **Input data**: [`VendorError::MalformedDirective`],
//!   [`VendorError::MissingDependency`]
//! - **File system**: [`VendorError::FileSystemError`],
//!   [`VendorError::SourceRootNotFound`]
//! - **Configuration**: [`VendorError::ConfigError`]
//! - **Anything else**: [`VendorError::Other`]
//!
//! Use [`user_friendly_error`] to turn any [`anyhow::Error`] into an
//! [`ErrorContext`] with a suggestion attached.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pothos_extract::core::{ErrorContext, VendorError};
//!
//! let error = VendorError::MissingDependency {
//!     path: "boost/mpl/if.hpp".to_string(),
//!     referenced_from: "boost/mpl/bool.hpp".to_string(),
//!     reason: "No such file or directory".to_string(),
//! };
//! ErrorContext::new(error)
//!     .with_suggestion("Check that the library snapshot is complete")
//!     .display();
//! ```

use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used by the vendoring components.
pub type Result<T, E = VendorError> = std::result::Result<T, E>;

/// The main error type for vendoring operations.
///
/// All variants are fatal. None of them is retried or skipped: silently
/// producing a partial vendored tree is worse than stopping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VendorError {
    /// A directive references the vendor namespace but its path literal cannot
    /// be extracted.
    ///
    /// # Fields
    /// - `file`: Library-relative path of the file containing the directive
    /// - `line`: 1-based line number
    /// - `text`: The offending line, without its line ending
    /// - `reason`: Which delimiter was unbalanced or missing
    #[error("Malformed directive in {file}:{line}: {reason}")]
    MalformedDirective {
        /// Library-relative path of the file containing the directive
        file: String,
        /// 1-based line number
        line: usize,
        /// The offending line
        text: String,
        /// Which delimiter was unbalanced or missing
        reason: String,
    },

    /// A path reached through the include closure is not a readable file under
    /// the source root.
    #[error("Dependency '{path}' (included from {referenced_from}) cannot be read")]
    MissingDependency {
        /// Library-relative path that could not be read
        path: String,
        /// File whose directive referenced `path`
        referenced_from: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// File system operation failed
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g. "read", "write", "create directory")
        operation: String,
        /// Path that was being accessed
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// The source root is missing or is not a directory
    #[error("Source root not found: {path}")]
    SourceRootNotFound {
        /// The path that was given as the source root
        path: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Any other failure, reported with its top-level message
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl VendorError {
    /// Build a [`VendorError::FileSystemError`] from an I/O error.
    pub fn file_system(operation: impl Into<String>, path: &Path, source: &std::io::Error) -> Self {
        Self::FileSystemError {
            operation: operation.into(),
            path: path.display().to_string(),
            reason: source.to_string(),
        }
    }

    /// Build a [`VendorError::ConfigError`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

/// Error wrapper with a user-facing suggestion and extra details.
///
/// Suggestions are actionable steps and are shown in green; details explain
/// the failure and are shown in yellow.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: VendorError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: VendorError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion.
///
/// [`VendorError`]s anywhere in the chain get a suggestion specific to their
/// variant. Other errors are reported as [`VendorError::ConfigError`] when they
/// come from parsing the settings file, and otherwise keep their full cause
/// chain in the details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(vendor_error) = error.chain().find_map(|e| e.downcast_ref::<VendorError>()) {
        return create_error_context(vendor_error.clone());
    }

    if let Some(toml_error) = error.chain().find_map(|e| e.downcast_ref::<toml::de::Error>()) {
        return ErrorContext::new(VendorError::config(toml_error.to_string()))
            .with_details(error.to_string())
            .with_suggestion(
                "Check the TOML syntax of the settings file. Verify quotes, brackets, and key names",
            );
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let mut context = ErrorContext::new(VendorError::Other {
        message: error.to_string(),
    });
    if !chain.is_empty() {
        context = context.with_details(chain.join(": "));
    }
    context
}

fn create_error_context(error: VendorError) -> ErrorContext {
    match &error {
        VendorError::MalformedDirective { text, .. } => {
            let details = format!("Offending line: {}", text.trim_end());
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion(
                    "Fix the directive in the library snapshot; vendor paths must be quoted with <...> or \"...\"",
                )
        }
        VendorError::MissingDependency { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion(
                    "Make sure the source root is a complete library snapshot containing every included header",
                )
        }
        VendorError::FileSystemError { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check that the paths exist and that you have read/write permission")
        }
        VendorError::SourceRootNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass the root of an unpacked library release as the first argument"),
        VendorError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Review the settings file passed with --config"),
        VendorError::Other { .. } => ErrorContext::new(error),
    }
}

/// Join a library-relative path onto a root directory.
#[must_use]
pub fn join_relative(root: &Path, relative: &str) -> PathBuf {
    relative.split('/').filter(|s| !s.is_empty()).fold(root.to_path_buf(), |acc, seg| acc.join(seg))
}
