//! A synthetic library snapshot on disk.
//!
//! [`LibraryFixture::standard`] lays out a miniature Boost with the same
//! shape as the real one: two serialization sources, headers in each
//! category, a helper library outside the categories, an include cycle in
//! `mpl`, a category header nothing includes, and a file the default source
//! pattern filters out.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::config::VendorConfig;

/// Distinct dependency paths the standard library resolves to.
pub const STANDARD_DEPENDENCY_COUNT: usize = 8;

/// Files a full run over the standard library writes.
pub const STANDARD_FILE_COUNT: usize = 12;

const STANDARD_FILES: &[(&str, &str)] = &[
    (
        "libs/serialization/src/basic_archive.cpp",
        "// basic_archive.cpp: boost serialization\n\
         #include <boost/archive/basic_archive.hpp>\n\
         #include <boost/serialization/string.hpp> // boost::serialization string support\n\
         \n\
         namespace boost { namespace archive {\n\
         BOOST_ARCHIVE_DECL const char * BOOST_ARCHIVE_SIGNATURE() {\n    \
             return \"serialization::archive\";\n\
         }\n\
         } }\n",
    ),
    (
        "libs/serialization/src/extended_type_info.cpp",
        "#include \"boost/serialization/extended_type_info.hpp\"\r\n\
         #include <boost/config.hpp>\r\n\
         namespace boost {\r\n\
         namespace serialization {\r\n\
         void boost_extended_type_info_init() {}\r\n\
         }\r\n\
         }",
    ),
    ("libs/serialization/src/README", "Not a source file.\n"),
    (
        "boost/archive/basic_archive.hpp",
        "#ifndef BOOST_ARCHIVE_BASIC_ARCHIVE_HPP\n\
         #define BOOST_ARCHIVE_BASIC_ARCHIVE_HPP\n\
         #include <boost/config.hpp>\n\
         #include <boost/mpl/if.hpp>\n\
         #endif // BOOST_ARCHIVE_BASIC_ARCHIVE_HPP\n",
    ),
    (
        "boost/archive/text_oarchive.hpp",
        "#include <boost/archive/basic_archive.hpp>\n\
         namespace boost {\n\
         namespace archive { class text_oarchive; }\n\
         }\n",
    ),
    (
        "boost/serialization/string.hpp",
        "#include <string>\n\
         #include <boost/serialization/level.hpp>\n",
    ),
    (
        "boost/serialization/level.hpp",
        "#include <boost/mpl/int.hpp>\n\
         #include <boost/type_traits/is_fundamental.hpp>\n\
         namespace boost {\n\
         namespace serialization {\n\
         enum level_type { not_serializable = 0 };\n\
         }\n\
         }\n",
    ),
    (
        "boost/serialization/extended_type_info.hpp",
        "#include <boost/config.hpp>\n\
         // see boost/serialization/extended_type_info_typeid.hpp\n",
    ),
    (
        "boost/mpl/if.hpp",
        "#include <boost/mpl/int.hpp>\n\
         namespace boost { namespace mpl {\n\
         template<bool C, typename T1, typename T2> struct if_c;\n\
         }}\n",
    ),
    ("boost/mpl/int.hpp", "#include <boost/mpl/if.hpp>\n"),
    ("boost/mpl/vector.hpp", "#include <boost/mpl/aux_/na.hpp> // not vendored\n"),
    ("boost/config.hpp", "#define BOOST_CONFIG_HPP\n"),
    (
        "boost/type_traits/is_fundamental.hpp",
        "#include <boost/config.hpp>\n\
         namespace boost {\n\
         template <class T> struct is_fundamental;\n\
         }\n",
    ),
];

/// A library snapshot in a temporary directory, plus an output directory.
///
/// The source root is `<temp>/boost`; the destination root `<temp>/out` is
/// not created, so tests can check that nothing was written.
pub struct LibraryFixture {
    _temp: TempDir,
    source_root: PathBuf,
    dest_root: PathBuf,
}

impl LibraryFixture {
    /// An empty source root.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp dir")?;
        let source_root = temp.path().join("boost_src");
        let dest_root = temp.path().join("out");
        fs::create_dir_all(&source_root)?;
        Ok(Self {
            _temp: temp,
            source_root,
            dest_root,
        })
    }

    /// The miniature Boost described in the module docs.
    pub fn standard() -> Result<Self> {
        let fixture = Self::new()?;
        for (path, content) in STANDARD_FILES {
            fixture.add_file(path, content)?;
        }
        Ok(fixture)
    }

    /// Add or replace a library file.
    pub fn add_file(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.source_root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Add or replace a library file with raw bytes.
    pub fn add_bytes(&self, relative: &str, content: &[u8]) -> Result<()> {
        let path = self.source_root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Root of the library snapshot.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Where output goes.
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Default configuration over this fixture.
    pub fn config(&self) -> VendorConfig {
        VendorConfig::with_defaults(&self.source_root, &self.dest_root)
    }

    /// Whether `relative` was written under the destination root.
    pub fn output_exists(&self, relative: &str) -> bool {
        self.dest_root.join(relative).is_file()
    }

    /// Content of an output file.
    pub fn read_output(&self, relative: &str) -> Result<String> {
        let path = self.dest_root.join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Raw content of an output file.
    pub fn read_output_bytes(&self, relative: &str) -> Result<Vec<u8>> {
        let path = self.dest_root.join(relative);
        fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Every file under the destination root, relative and sorted.
    pub fn output_files(&self) -> Result<Vec<String>> {
        if !self.dest_root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dest_root) {
            let entry = entry?;
            if entry.file_type().is_file() {
                let relative = entry.path().strip_prefix(&self.dest_root)?;
                files.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        files.sort();
        Ok(files)
    }
}
