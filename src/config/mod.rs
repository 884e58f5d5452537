//! Run configuration
//!
//! A vendoring run is fully described by a [`VendorConfig`]: the two roots given
//! on the command line plus [`VendorSettings`], which default to the Boost →
//! Pothos layout and can be overridden from a TOML file.
//!
//! # Settings File Format
//!
//! Every key is optional. Unknown keys are rejected so that typos do not
//! silently fall back to defaults.
//!
//! ```toml
//! component = "serialization"
//! header_categories = ["serialization", "mpl", "archive"]
//! source_pattern = "*.*"
//! lib_dir = "lib"
//! include_dir = "include"
//!
//! [namespace]
//! from = "boost"
//! to = "Pothos"
//! # macro_from = "BOOST"
//! # macro_to = "POTHOS"
//!
//! [categories]
//! public = ["archive", "serialization"]
//! impl_prefix = "serialization/impl"
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use pothos_extract::config::{VendorConfig, VendorSettings};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let settings = VendorSettings::load_from(Path::new("vendor.toml"))?;
//! let config = VendorConfig::new("boost_1_55_0", "out", settings)?;
//! assert_eq!(config.settings.namespace.to, "Pothos");
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_COMPONENT, DEFAULT_HEADER_CATEGORIES, DEFAULT_IMPL_PREFIX, DEFAULT_INCLUDE_DIR,
    DEFAULT_LIB_DIR, DEFAULT_PUBLIC_CATEGORIES, DEFAULT_SOURCE_PATTERN, DEFAULT_TARGET_NAMESPACE,
    DEFAULT_VENDOR_NAMESPACE,
};
use crate::core::VendorError;

/// Everything a run needs: where to read, where to write, and how to rename.
#[derive(Debug, Clone)]
pub struct VendorConfig {
    /// Root of the unpacked library release
    pub source_root: PathBuf,
    /// Root that receives `lib/` and `include/`
    pub dest_root: PathBuf,
    /// Naming and layout rules
    pub settings: VendorSettings,
}

impl VendorConfig {
    /// Create a configuration after validating `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::ConfigError`] when the settings are inconsistent.
    pub fn new(
        source_root: impl Into<PathBuf>,
        dest_root: impl Into<PathBuf>,
        settings: VendorSettings,
    ) -> Result<Self, VendorError> {
        settings.validate()?;
        Ok(Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            settings,
        })
    }

    /// Create a configuration with the default Boost → Pothos settings.
    #[must_use]
    pub fn with_defaults(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            settings: VendorSettings::default(),
        }
    }

    /// Directory holding the component's compiled sources.
    #[must_use]
    pub fn component_source_dir(&self) -> PathBuf {
        self.source_root.join("libs").join(&self.settings.component).join("src")
    }

    /// Directory holding one header category of the vendored library.
    #[must_use]
    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.source_root.join(&self.settings.namespace.from).join(category)
    }
}

/// Naming and layout rules of a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VendorSettings {
    /// Old and new namespace names
    pub namespace: NamespaceMapping,
    /// Component whose `libs/<component>/src/` files seed the closure
    pub component: String,
    /// Header trees under `<namespace.from>/` rewritten in full
    pub header_categories: Vec<String>,
    /// Destination layout rules for headers
    pub categories: CategoryRules,
    /// Glob matched against file names while walking trees
    pub source_pattern: String,
    /// Destination directory for component sources
    pub lib_dir: String,
    /// Destination directory for headers
    pub include_dir: String,
}

impl Default for VendorSettings {
    fn default() -> Self {
        Self {
            namespace: NamespaceMapping::default(),
            component: DEFAULT_COMPONENT.to_string(),
            header_categories: DEFAULT_HEADER_CATEGORIES.iter().map(ToString::to_string).collect(),
            categories: CategoryRules::default(),
            source_pattern: DEFAULT_SOURCE_PATTERN.to_string(),
            lib_dir: DEFAULT_LIB_DIR.to_string(),
            include_dir: DEFAULT_INCLUDE_DIR.to_string(),
        }
    }
}

impl VendorSettings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not valid TOML, contains unknown
    /// keys, or describes inconsistent settings.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path` if given, defaults otherwise.
    ///
    /// # Errors
    ///
    /// See [`VendorSettings::load_from`].
    pub fn load_with_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Check the settings for values the rewriter cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::ConfigError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), VendorError> {
        let ns = &self.namespace;
        let macro_from = ns.macro_prefix_from();
        let macro_to = ns.macro_prefix_to();
        for (key, value) in [
            ("namespace.from", ns.from.as_str()),
            ("namespace.to", ns.to.as_str()),
            ("namespace.macro_from", macro_from.as_ref()),
            ("namespace.macro_to", macro_to.as_ref()),
        ] {
            if !is_identifier(value) {
                return Err(VendorError::config(format!(
                    "{key} must be a C++ identifier, got '{value}'"
                )));
            }
        }

        if ns.from == ns.to {
            return Err(VendorError::config("namespace.from and namespace.to must differ"));
        }

        if self.component.is_empty() || self.component.contains(['/', '\\']) {
            return Err(VendorError::config(format!(
                "component must be a single directory name, got '{}'",
                self.component
            )));
        }

        for category in self.header_categories.iter().chain(&self.categories.public) {
            if category.is_empty() || category.contains(['/', '\\']) {
                return Err(VendorError::config(format!(
                    "categories must be single directory names, got '{category}'"
                )));
            }
        }

        let prefix = &self.categories.impl_prefix;
        if prefix.is_empty()
            || prefix.starts_with('/')
            || prefix.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
        {
            return Err(VendorError::config(format!(
                "categories.impl_prefix must be a relative path, got '{prefix}'"
            )));
        }

        self.source_glob()?;

        for (key, value) in [("lib_dir", &self.lib_dir), ("include_dir", &self.include_dir)] {
            if value.is_empty() || Path::new(value).is_absolute() {
                return Err(VendorError::config(format!(
                    "{key} must be a relative directory, got '{value}'"
                )));
            }
        }

        Ok(())
    }

    /// Compiled form of [`VendorSettings::source_pattern`].
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::ConfigError`] for an invalid glob.
    pub fn source_glob(&self) -> Result<glob::Pattern, VendorError> {
        glob::Pattern::new(&self.source_pattern).map_err(|e| {
            VendorError::config(format!("invalid source_pattern '{}': {e}", self.source_pattern))
        })
    }
}

/// Old and new names of the vendored namespace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamespaceMapping {
    /// Namespace and top-level directory of the original library
    pub from: String,
    /// Namespace and top-level directory of the vendored copy
    pub to: String,
    /// Macro prefix of the original library (defaults to `from` upper-cased)
    pub macro_from: Option<String>,
    /// Macro prefix of the vendored copy (defaults to `to` upper-cased)
    pub macro_to: Option<String>,
}

impl Default for NamespaceMapping {
    fn default() -> Self {
        Self::new(DEFAULT_VENDOR_NAMESPACE, DEFAULT_TARGET_NAMESPACE)
    }
}

impl NamespaceMapping {
    /// Mapping between two namespaces with upper-cased macro prefixes.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            macro_from: None,
            macro_to: None,
        }
    }

    /// Macro prefix being replaced, e.g. `BOOST`.
    #[must_use]
    pub fn macro_prefix_from(&self) -> Cow<'_, str> {
        match &self.macro_from {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(self.from.to_uppercase()),
        }
    }

    /// Macro prefix written instead, e.g. `POTHOS`.
    #[must_use]
    pub fn macro_prefix_to(&self) -> Cow<'_, str> {
        match &self.macro_to {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(self.to.to_uppercase()),
        }
    }

    /// Path prefix that marks a directive as referencing the vendored library.
    #[must_use]
    pub fn path_marker(&self) -> String {
        format!("{}/", self.from)
    }
}

/// Destination layout rules for headers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryRules {
    /// Categories that keep their sub-path, checked in order
    pub public: Vec<String>,
    /// Segment inserted after the new namespace for everything else
    pub impl_prefix: String,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            public: DEFAULT_PUBLIC_CATEGORIES.iter().map(ToString::to_string).collect(),
            impl_prefix: DEFAULT_IMPL_PREFIX.to_string(),
        }
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
