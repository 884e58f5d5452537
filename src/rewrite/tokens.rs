//! The token rule: renaming identifiers inside one line of code.

use regex::{NoExpand, Regex};

use crate::config::NamespaceMapping;
use crate::constants::NAMESPACE_KEYWORD;
use crate::core::{Result, VendorError};

/// Compiled substitutions for the token rule.
///
/// Applied to code only (the caller strips the comment first), in this order:
///
/// 1. on lines containing the `namespace` keyword, the bare library name
///    becomes the new name (`namespace boost {`)
/// 2. every `boost::` becomes `Pothos::`
/// 3. every `boost_` becomes `Pothos_`
/// 4. every `BOOST_` becomes `POTHOS_`
/// 5. a line consisting only of the library name (a namespace name on its own
///    line) is replaced, keeping its indentation
#[derive(Debug, Clone)]
pub struct TokenRules {
    from: String,
    to: String,
    scoped: (String, String),
    snake: (String, String),
    macros: (String, String),
    namespace_keyword: Regex,
    bare_name: Regex,
}

impl TokenRules {
    /// Compile the substitutions for `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::ConfigError`] if a pattern cannot be compiled.
    pub fn new(namespace: &NamespaceMapping) -> Result<Self> {
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| VendorError::config(format!("invalid pattern: {e}")))
        };

        Ok(Self {
            from: namespace.from.clone(),
            to: namespace.to.clone(),
            scoped: (format!("{}::", namespace.from), format!("{}::", namespace.to)),
            snake: (format!("{}_", namespace.from), format!("{}_", namespace.to)),
            macros: (
                format!("{}_", namespace.macro_prefix_from()),
                format!("{}_", namespace.macro_prefix_to()),
            ),
            namespace_keyword: compile(format!(r"\b{}\b", regex::escape(NAMESPACE_KEYWORD)))?,
            bare_name: compile(format!(r"\b{}\b", regex::escape(&namespace.from)))?,
        })
    }

    /// Apply the token rule to a piece of code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pothos_extract::config::NamespaceMapping;
    /// use pothos_extract::rewrite::TokenRules;
    ///
    /// let rules = TokenRules::new(&NamespaceMapping::default()).unwrap();
    /// assert_eq!(
    ///     rules.apply("namespace boost { namespace serialization {"),
    ///     "namespace Pothos { namespace serialization {"
    /// );
    /// assert_eq!(rules.apply("BOOST_STATIC_ASSERT(boost::is_pod<T>::value);"),
    ///     "POTHOS_STATIC_ASSERT(Pothos::is_pod<T>::value);");
    /// ```
    #[must_use]
    pub fn apply(&self, code: &str) -> String {
        let mut out = if self.namespace_keyword.is_match(code) {
            self.bare_name.replace_all(code, NoExpand(&self.to)).into_owned()
        } else {
            code.to_string()
        };

        for (from, to) in [&self.scoped, &self.snake, &self.macros] {
            if out.contains(from.as_str()) {
                out = out.replace(from.as_str(), to);
            }
        }

        if out.trim() == self.from {
            out = out.replacen(self.from.as_str(), &self.to, 1);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> TokenRules {
        TokenRules::new(&NamespaceMapping::default()).unwrap()
    }

    #[test]
    fn test_namespace_declaration() {
        assert_eq!(
            rules().apply("namespace boost { namespace serialization {"),
            "namespace Pothos { namespace serialization {"
        );
        assert_eq!(rules().apply("} // namespace"), "} // namespace");
        assert_eq!(
            rules().apply("namespace bs = boost::serialization;"),
            "namespace bs = Pothos::serialization;"
        );
    }

    #[test]
    fn test_bare_name_only_replaced_on_namespace_lines() {
        assert_eq!(rules().apply("int boost = 1;"), "int boost = 1;");
        assert_eq!(rules().apply("using namespace boost;"), "using namespace Pothos;");
        // Part of a longer identifier is not the bare name.
        assert_eq!(rules().apply("namespace boostrap {"), "namespace boostrap {");
    }

    #[test]
    fn test_scoped_snake_and_macro_prefixes() {
        assert_eq!(
            rules().apply("boost::archive::text_oarchive oa(os);"),
            "Pothos::archive::text_oarchive oa(os);"
        );
        assert_eq!(
            rules().apply("void boost_serialization_init();"),
            "void Pothos_serialization_init();"
        );
        assert_eq!(
            rules().apply("#ifndef BOOST_ARCHIVE_TEXT_OARCHIVE_HPP"),
            "#ifndef POTHOS_ARCHIVE_TEXT_OARCHIVE_HPP"
        );
        assert_eq!(
            rules().apply("BOOST_CLASS_EXPORT(boost::foo) BOOST_CLASS_EXPORT(boost::bar)"),
            "POTHOS_CLASS_EXPORT(Pothos::foo) POTHOS_CLASS_EXPORT(Pothos::bar)"
        );
    }

    #[test]
    fn test_bare_line_keeps_indentation() {
        assert_eq!(rules().apply("    boost"), "    Pothos");
        assert_eq!(rules().apply("boost"), "Pothos");
        assert_eq!(rules().apply("boost;"), "boost;");
    }

    #[test]
    fn test_replacement_text_is_literal() {
        let rules = TokenRules::new(&NamespaceMapping::new("boost", "_1")).unwrap();
        assert_eq!(rules.apply("namespace boost {"), "namespace _1 {");
    }

    #[test]
    fn test_custom_macro_prefix() {
        let mut ns = NamespaceMapping::new("boost", "Pothos");
        ns.macro_to = Some("POTHOS_SERIAL".to_string());
        let rules = TokenRules::new(&ns).unwrap();
        assert_eq!(rules.apply("BOOST_ASSERT(x)"), "POTHOS_SERIAL_ASSERT(x)");
    }
}
