//! Default names and layout used when no settings file overrides them.
//!
//! The defaults describe the Boost.Serialization snapshot that Pothos ships:
//! everything under `boost/` is moved below `Pothos/`, and headers that are not
//! part of the archive or serialization API are demoted to
//! `Pothos/serialization/impl/`.

/// Top-level namespace of the library being vendored.
pub const DEFAULT_VENDOR_NAMESPACE: &str = "boost";

/// Namespace the vendored copy is renamed to.
pub const DEFAULT_TARGET_NAMESPACE: &str = "Pothos";

/// Library component whose `libs/<component>/src/` tree seeds the closure.
pub const DEFAULT_COMPONENT: &str = "serialization";

/// Header trees under `<namespace>/` that are rewritten eagerly.
pub const DEFAULT_HEADER_CATEGORIES: &[&str] = &["serialization", "mpl", "archive"];

/// Categories that keep their sub-path under the new namespace, in precedence order.
pub const DEFAULT_PUBLIC_CATEGORIES: &[&str] = &["archive", "serialization"];

/// Segment inserted after the new namespace for every non-public header.
pub const DEFAULT_IMPL_PREFIX: &str = "serialization/impl";

/// File-name glob applied while walking source and header trees.
pub const DEFAULT_SOURCE_PATTERN: &str = "*.*";

/// Destination directory for rewritten component sources.
pub const DEFAULT_LIB_DIR: &str = "lib";

/// Destination directory for rewritten headers.
pub const DEFAULT_INCLUDE_DIR: &str = "include";

/// Start of a line comment. Everything from here on is copied verbatim.
pub const LINE_COMMENT: &str = "//";

/// Preprocessor directive marker.
pub const DIRECTIVE_MARKER: char = '#';

/// Directive keywords whose operands are treated as include paths.
pub const PATH_DIRECTIVES: &[&str] = &["include", "define"];

/// Keyword that enables bare namespace-token replacement on a line.
pub const NAMESPACE_KEYWORD: &str = "namespace";
