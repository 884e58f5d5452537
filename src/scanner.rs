//! Include-directive scanning.
//!
//! The scanner finds every directive in a file that pulls in a header of the
//! vendored library. It works purely on directive syntax, one physical line at
//! a time:
//!
//! 1. Everything from the first `//` on is dropped
//! 2. The rest, trimmed, must start with `#`
//! 3. The word after `#` must start with `include` or `define`
//! 4. The line must mention the namespace marker (e.g. `boost/`)
//! 5. The path literal is taken from `<...>` when the line has both angle
//!    brackets, and from `"..."` otherwise
//!
//! Comment stripping is deliberately naive. A `//` inside a string literal
//! ends the code part of the line, and block comments are not recognised at
//! all, so a directive inside `/* ... */` is still reported. Which files count
//! as dependencies is defined by exactly this behavior.
//!
//! A vendor directive without a usable literal is an input error and ends the
//! scan; it is never skipped.
//!
//! # Examples
//!
//! ```rust
//! use pothos_extract::scanner::scan_includes;
//!
//! let text = "#include <boost/mpl/if.hpp>\n#include <vector>\n# include \"boost/config.hpp\"\n";
//! let paths: Vec<String> = scan_includes(text, "example.hpp", "boost/")
//!     .map(|r| r.map(|reference| reference.to_string()))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(paths, vec!["boost/mpl/if.hpp", "boost/config.hpp"]);
//! ```

use std::fmt;
use std::iter::Enumerate;
use std::str::Lines;

use thiserror::Error;

use crate::constants::{DIRECTIVE_MARKER, LINE_COMMENT, PATH_DIRECTIVES};
use crate::core::{Result, VendorError};

/// A library-relative path taken from one directive.
///
/// The path is normalized on construction so that the closure never holds two
/// spellings of the same file. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IncludeReference(String);

impl IncludeReference {
    /// Create a reference from a raw path literal.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(normalize_reference(raw))
    }

    /// The normalized path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the path climbs above the library root.
    #[must_use]
    pub fn escapes_root(&self) -> bool {
        self.0 == ".." || self.0.starts_with("../")
    }

    /// Consume the reference, returning the normalized path.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for IncludeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a library-relative path.
///
/// Backslashes become forward slashes, empty and `.` segments are dropped, and
/// `..` removes the preceding segment. A leading `..` that has nothing to
/// remove is kept.
///
/// ```rust
/// use pothos_extract::scanner::normalize_reference;
///
/// assert_eq!(normalize_reference("boost\\mpl\\if.hpp"), "boost/mpl/if.hpp");
/// assert_eq!(normalize_reference("boost/mpl/aux_/../if.hpp"), "boost/mpl/if.hpp");
/// assert_eq!(normalize_reference("./boost//config.hpp"), "boost/config.hpp");
/// ```
#[must_use]
pub fn normalize_reference(raw: &str) -> String {
    let unified = raw.trim().replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Split a line at the first `//`.
///
/// Returns the code part and the comment part; the comment part includes the
/// `//` and is empty when the line has no comment.
#[must_use]
pub fn split_line_comment(line: &str) -> (&str, &str) {
    match line.find(LINE_COMMENT) {
        Some(index) => line.split_at(index),
        None => (line, ""),
    }
}

/// Whether `code` (already stripped of its comment) is an include or define
/// directive.
#[must_use]
pub fn is_path_directive(code: &str) -> bool {
    let Some(rest) = code.trim().strip_prefix(DIRECTIVE_MARKER) else {
        return false;
    };
    let keyword = rest.trim_start();
    PATH_DIRECTIVES.iter().any(|directive| keyword.starts_with(directive))
}

/// Which pair of characters encloses a path literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `<path>`
    Angle,
    /// `"path"`
    Quote,
}

/// Byte range of a path literal inside a line, delimiters excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralSpan {
    /// First byte of the literal
    pub start: usize,
    /// One past the last byte of the literal
    pub end: usize,
    /// Delimiters around the literal
    pub delimiter: Delimiter,
}

impl LiteralSpan {
    /// The literal text inside `line`.
    #[must_use]
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end]
    }
}

/// Why a vendor directive has no usable path literal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterError {
    /// `<` without a `>` after it
    #[error("'<' without a closing '>'")]
    UnclosedAngle,
    /// A single `"`
    #[error("'\"' without a closing '\"'")]
    UnclosedQuote,
    /// Neither `<...>` nor `"..."`
    #[error("no <...> or \"...\" path literal")]
    NoDelimiters,
    /// The literal normalizes to a path above the library root
    #[error("path literal climbs above the library root")]
    EscapesRoot,
}

/// Locate the vendor path literal of a directive line.
///
/// `code` must already be stripped of its comment. Returns `Ok(None)` for
/// lines that are not include/define directives or that do not mention
/// `marker`.
///
/// # Errors
///
/// Returns a [`DelimiterError`] when the line is a vendor directive but the
/// literal cannot be delimited, or when it normalizes to a path above the
/// library root.
pub fn find_vendor_literal(
    code: &str,
    marker: &str,
) -> std::result::Result<Option<LiteralSpan>, DelimiterError> {
    if !is_path_directive(code) || !code.contains(marker) {
        return Ok(None);
    }

    let span = if code.contains('<') && code.contains('>') {
        delimited(code, '<', '>', Delimiter::Angle).ok_or(DelimiterError::UnclosedAngle)?
    } else if code.contains('"') {
        delimited(code, '"', '"', Delimiter::Quote).ok_or(DelimiterError::UnclosedQuote)?
    } else if code.contains('<') {
        return Err(DelimiterError::UnclosedAngle);
    } else {
        return Err(DelimiterError::NoDelimiters);
    };

    if IncludeReference::new(span.text(code)).escapes_root() {
        return Err(DelimiterError::EscapesRoot);
    }
    Ok(Some(span))
}

fn delimited(code: &str, open: char, close: char, delimiter: Delimiter) -> Option<LiteralSpan> {
    let start = code.find(open)? + open.len_utf8();
    let end = start + code[start..].find(close)?;
    Some(LiteralSpan {
        start,
        end,
        delimiter,
    })
}

/// Lazy iterator over the vendor include paths of one file.
///
/// Created by [`scan_includes`]. Yields paths in order of first occurrence
/// (duplicates within a file are yielded again; deduplication is the
/// resolver's job). After the first error the iterator is exhausted.
pub struct DirectiveScanner<'a> {
    origin: &'a str,
    marker: &'a str,
    lines: Enumerate<Lines<'a>>,
    failed: bool,
}

impl Iterator for DirectiveScanner<'_> {
    type Item = Result<IncludeReference>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for (index, line) in self.lines.by_ref() {
            let (code, _) = split_line_comment(line);
            match find_vendor_literal(code, self.marker) {
                Ok(None) => continue,
                Ok(Some(span)) => return Some(Ok(IncludeReference::new(span.text(code)))),
                Err(reason) => {
                    self.failed = true;
                    return Some(Err(VendorError::MalformedDirective {
                        file: self.origin.to_string(),
                        line: index + 1,
                        text: line.to_string(),
                        reason: reason.to_string(),
                    }));
                }
            }
        }

        None
    }
}

/// Scan the text of one file for vendor include paths.
///
/// `origin` names the file in error messages; `marker` is the namespace path
/// prefix, e.g. `boost/`.
#[must_use]
pub fn scan_includes<'a>(text: &'a str, origin: &'a str, marker: &'a str) -> DirectiveScanner<'a> {
    DirectiveScanner {
        origin,
        marker,
        lines: text.lines().enumerate(),
        failed: false,
    }
}
