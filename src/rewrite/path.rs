//! The path rule: where a vendored header lands under the new namespace.

use crate::config::{CategoryRules, NamespaceMapping};

/// Map a library-relative path to its destination-relative path.
///
/// Evaluated in order, first match wins:
///
/// 1. the segment after the namespace is a public category (by default
///    `archive`, then `serialization`): only the namespace segment changes
/// 2. anything else under the namespace (`mpl/`, root-level umbrella headers,
///    helper libraries): the namespace segment changes and the impl prefix is
///    inserted after it
///
/// Paths that do not start with the vendor namespace segment are returned
/// unchanged. In particular an already-rewritten path is never transformed a
/// second time.
///
/// # Examples
///
/// ```rust
/// use pothos_extract::config::{CategoryRules, NamespaceMapping};
/// use pothos_extract::rewrite::rewrite_path;
///
/// let ns = NamespaceMapping::default();
/// let rules = CategoryRules::default();
/// assert_eq!(rewrite_path(&ns, &rules, "boost/archive/foo.hpp"), "Pothos/archive/foo.hpp");
/// assert_eq!(
///     rewrite_path(&ns, &rules, "boost/mpl/baz.hpp"),
///     "Pothos/serialization/impl/mpl/baz.hpp"
/// );
/// ```
#[must_use]
pub fn rewrite_path(namespace: &NamespaceMapping, rules: &CategoryRules, path: &str) -> String {
    let Some(rest) = path
        .strip_prefix(namespace.from.as_str())
        .and_then(|rest| rest.strip_prefix('/'))
    else {
        return path.to_string();
    };

    let category = rest.split('/').next().unwrap_or_default();
    let is_public = rules.public.iter().any(|public| public == category);

    if is_public {
        format!("{}/{}", namespace.to, rest)
    } else {
        format!("{}/{}/{}", namespace.to, rules.impl_prefix, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(path: &str) -> String {
        rewrite_path(&NamespaceMapping::default(), &CategoryRules::default(), path)
    }

    #[test]
    fn test_category_precedence() {
        assert_eq!(rewrite("boost/archive/foo.hpp"), "Pothos/archive/foo.hpp");
        assert_eq!(rewrite("boost/serialization/bar.hpp"), "Pothos/serialization/bar.hpp");
        assert_eq!(rewrite("boost/mpl/baz.hpp"), "Pothos/serialization/impl/mpl/baz.hpp");
    }

    #[test]
    fn test_nested_public_paths_keep_shape() {
        assert_eq!(
            rewrite("boost/archive/detail/basic_oarchive.hpp"),
            "Pothos/archive/detail/basic_oarchive.hpp"
        );
        assert_eq!(
            rewrite("boost/serialization/detail/stack_constructor.hpp"),
            "Pothos/serialization/detail/stack_constructor.hpp"
        );
    }

    #[test]
    fn test_other_paths_demoted_to_impl() {
        assert_eq!(rewrite("boost/config.hpp"), "Pothos/serialization/impl/config.hpp");
        assert_eq!(
            rewrite("boost/type_traits/is_same.hpp"),
            "Pothos/serialization/impl/type_traits/is_same.hpp"
        );
        // A category name deeper in the path does not make it public.
        assert_eq!(
            rewrite("boost/detail/archive/x.hpp"),
            "Pothos/serialization/impl/detail/archive/x.hpp"
        );
    }

    #[test]
    fn test_bare_category_path_is_public() {
        assert_eq!(rewrite("boost/archive"), "Pothos/archive");
        assert_eq!(rewrite("boost/serialization"), "Pothos/serialization");
    }

    #[test]
    fn test_non_vendor_paths_unchanged() {
        assert_eq!(rewrite("vector"), "vector");
        assert_eq!(rewrite("boostrap/x.hpp"), "boostrap/x.hpp");
        assert_eq!(rewrite("local/boost/x.hpp"), "local/boost/x.hpp");
    }

    #[test]
    fn test_rule_is_pure_and_never_double_transforms() {
        for path in ["boost/archive/a.hpp", "boost/mpl/if.hpp", "boost/config.hpp"] {
            let once = rewrite(path);
            assert_eq!(rewrite(path), once);
            // Destination paths no longer start with the vendor segment.
            assert_eq!(rewrite(&once), once);
        }
    }

    #[test]
    fn test_custom_rules() {
        let ns = NamespaceMapping::new("boost", "Acme");
        let rules = CategoryRules {
            public: vec!["mpl".to_string()],
            impl_prefix: "detail/vendored".to_string(),
        };
        assert_eq!(rewrite_path(&ns, &rules, "boost/mpl/if.hpp"), "Acme/mpl/if.hpp");
        assert_eq!(
            rewrite_path(&ns, &rules, "boost/archive/a.hpp"),
            "Acme/detail/vendored/archive/a.hpp"
        );
    }
}
