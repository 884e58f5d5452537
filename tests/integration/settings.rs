use predicates::prelude::*;
use std::fs;

use pothos_extract::test_utils::LibraryFixture;

use super::pothos_extract;

#[test]
fn test_custom_namespace_and_layout() {
    let fixture = LibraryFixture::standard().unwrap();
    let settings = fixture.source_root().join("vendor.toml");
    fs::write(
        &settings,
        r#"
lib_dir = "src"

[namespace]
from = "boost"
to = "Acme"
macro_to = "ACME_VENDORED"

[categories]
public = ["archive"]
impl_prefix = "detail"
"#,
    )
    .unwrap();

    pothos_extract()
        .arg("--config")
        .arg(&settings)
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .success()
        .stdout("8\n");

    assert!(fixture.output_exists("src/basic_archive.cpp"));
    assert!(fixture.output_exists("include/Acme/archive/text_oarchive.hpp"));
    assert!(fixture.output_exists("include/Acme/detail/serialization/level.hpp"));
    assert!(fixture.output_exists("include/Acme/detail/mpl/if.hpp"));

    let source = fixture.read_output("src/basic_archive.cpp").unwrap();
    assert!(source.contains("#include <Acme/detail/serialization/string.hpp>"));
    assert!(source.contains("namespace Acme { namespace archive {"));
    assert!(source.contains("ACME_VENDORED_ARCHIVE_DECL"));
}

#[test]
fn test_header_categories_subset() {
    let fixture = LibraryFixture::standard().unwrap();
    let settings = fixture.source_root().join("vendor.toml");
    fs::write(&settings, "header_categories = [\"archive\"]\n").unwrap();

    pothos_extract()
        .args(["--config"])
        .arg(&settings)
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .success()
        .stdout("8\n");

    // vector.hpp is neither in a listed category nor a dependency.
    assert!(!fixture.output_exists("include/Pothos/serialization/impl/mpl/vector.hpp"));
    assert!(fixture.output_exists("include/Pothos/archive/text_oarchive.hpp"));
    assert!(fixture.output_exists("include/Pothos/serialization/impl/mpl/if.hpp"));
}

#[test]
fn test_unknown_key_rejected() {
    let fixture = LibraryFixture::standard().unwrap();
    let settings = fixture.source_root().join("vendor.toml");
    fs::write(&settings, "componnet = \"serialization\"\n").unwrap();

    pothos_extract()
        .arg("-c")
        .arg(&settings)
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("componnet"));

    assert!(!fixture.dest_root().exists());
}

#[test]
fn test_invalid_namespace_rejected() {
    let fixture = LibraryFixture::standard().unwrap();
    let settings = fixture.source_root().join("vendor.toml");
    fs::write(&settings, "[namespace]\nfrom = \"boost\"\nto = \"Pothos Serial\"\n").unwrap();

    pothos_extract()
        .arg("-c")
        .arg(&settings)
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("namespace.to must be a C++ identifier"));
}

#[test]
fn test_missing_settings_file() {
    let fixture = LibraryFixture::standard().unwrap();

    pothos_extract()
        .arg("-c")
        .arg(fixture.source_root().join("nope.toml"))
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read settings from"))
        .stderr(predicate::str::contains("nope.toml"))
        .stderr(predicate::str::contains("File system error").not());
}
