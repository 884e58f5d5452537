//! Rewriting of paths and source text.
//!
//! Two pure rules do the renaming:
//!
//! - the **path rule** ([`rewrite_path`]) maps a library-relative path to
//!   its place under the new namespace, by category
//! - the **token rule** ([`TokenRules`]) renames the namespace, scoped names,
//!   and macro prefixes in code
//!
//! [`Rewriter`] applies them to whole lines. Everything from the first `//` on
//! is copied verbatim, so comments keep mentioning the original library. On a
//! directive line the path rule rewrites the vendor path literal, and the
//! token rule only sees the text around it; the literal is never run through
//! the token rule, which would otherwise turn `boost/mpl/boost_x.hpp` into a
//! path that does not exist.
//!
//! # Example
//!
//! ```rust
//! use pothos_extract::config::VendorSettings;
//! use pothos_extract::rewrite::Rewriter;
//!
//! let rewriter = Rewriter::new(&VendorSettings::default()).unwrap();
//! assert_eq!(
//!     rewriter.rewrite_line("#include <boost/mpl/if.hpp> // keep boost:: here").unwrap(),
//!     "#include <Pothos/serialization/impl/mpl/if.hpp> // keep boost:: here"
//! );
//! ```

mod path;
mod tokens;

pub use path::rewrite_path;
pub use tokens::TokenRules;

use crate::config::{CategoryRules, NamespaceMapping, VendorSettings};
use crate::core::{Result, VendorError};
use crate::scanner::{DelimiterError, IncludeReference, find_vendor_literal, split_line_comment};

/// Applies the path and token rules to lines and whole files.
#[derive(Debug, Clone)]
pub struct Rewriter {
    namespace: NamespaceMapping,
    categories: CategoryRules,
    marker: String,
    tokens: TokenRules,
}

impl Rewriter {
    /// Build a rewriter from run settings.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::ConfigError`] if the token patterns cannot be
    /// compiled.
    pub fn new(settings: &VendorSettings) -> Result<Self> {
        Self::from_parts(settings.namespace.clone(), settings.categories.clone())
    }

    /// Build a rewriter from a namespace mapping and category rules.
    ///
    /// # Errors
    ///
    /// See [`Rewriter::new`].
    pub fn from_parts(namespace: NamespaceMapping, categories: CategoryRules) -> Result<Self> {
        Ok(Self {
            tokens: TokenRules::new(&namespace)?,
            marker: namespace.path_marker(),
            namespace,
            categories,
        })
    }

    /// Namespace path prefix identifying vendor includes, e.g. `boost/`.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Apply the path rule to a library-relative path.
    #[must_use]
    pub fn rewrite_path(&self, path: &str) -> String {
        rewrite_path(&self.namespace, &self.categories, path)
    }

    /// Rewrite one line (without its line ending).
    ///
    /// # Errors
    ///
    /// Returns a [`DelimiterError`] when the line is a vendor directive whose
    /// path literal cannot be delimited.
    pub fn rewrite_line(&self, line: &str) -> std::result::Result<String, DelimiterError> {
        let (code, comment) = split_line_comment(line);

        let mut out = match find_vendor_literal(code, &self.marker)? {
            Some(span) => {
                let literal = IncludeReference::new(span.text(code));
                let mut rewritten = self.tokens.apply(&code[..span.start]);
                rewritten.push_str(&self.rewrite_path(literal.as_str()));
                rewritten.push_str(&self.tokens.apply(&code[span.end..]));
                rewritten
            }
            None => self.tokens.apply(code),
        };

        out.push_str(comment);
        Ok(out)
    }

    /// Rewrite the full text of a file, keeping every line ending as it was.
    ///
    /// `origin` names the file in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::MalformedDirective`] for the first line that
    /// [`rewrite_line`](Self::rewrite_line) rejects.
    pub fn rewrite_text(&self, origin: &str, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len() + text.len() / 8);

        for (index, raw) in text.split_inclusive('\n').enumerate() {
            let (line, ending) = split_line_ending(raw);
            let rewritten =
                self.rewrite_line(line).map_err(|reason| VendorError::MalformedDirective {
                    file: origin.to_string(),
                    line: index + 1,
                    text: line.to_string(),
                    reason: reason.to_string(),
                })?;
            out.push_str(&rewritten);
            out.push_str(ending);
        }

        Ok(out)
    }
}

fn split_line_ending(raw: &str) -> (&str, &str) {
    if let Some(line) = raw.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = raw.strip_suffix('\n') {
        (line, "\n")
    } else {
        (raw, "")
    }
}
