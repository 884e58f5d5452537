use predicates::prelude::*;

use pothos_extract::test_utils::LibraryFixture;

use super::pothos_extract;

#[test]
fn test_missing_source_root() {
    let fixture = LibraryFixture::new().unwrap();
    let missing = fixture.source_root().join("absent");

    pothos_extract()
        .arg(&missing)
        .arg(fixture.dest_root())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Source root not found"));
}

#[test]
fn test_malformed_directive_writes_nothing() {
    let fixture = LibraryFixture::standard().unwrap();
    fixture
        .add_file("boost/archive/broken.hpp", "#pragma once\n#include <boost/archive/x.hpp\n")
        .unwrap();

    pothos_extract()
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Malformed directive in boost/archive/broken.hpp:2"))
        .stderr(predicate::str::contains("#include <boost/archive/x.hpp"));

    assert!(!fixture.dest_root().exists());
}

#[test]
fn test_malformed_directive_in_seed() {
    let fixture = LibraryFixture::standard().unwrap();
    fixture
        .add_file("libs/serialization/src/bad.cpp", "#include \"boost/serialization/nvp.hpp\n")
        .unwrap();

    pothos_extract()
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Malformed directive in libs/serialization/src/bad.cpp:1",
        ));

    assert!(!fixture.dest_root().exists());
}

#[test]
fn test_missing_dependency() {
    let fixture = LibraryFixture::standard().unwrap();
    fixture
        .add_file("boost/type_traits/is_fundamental.hpp", "#include <boost/type_traits/intrinsics.hpp>\n")
        .unwrap();

    pothos_extract()
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("boost/type_traits/intrinsics.hpp"))
        .stderr(predicate::str::contains("boost/type_traits/is_fundamental.hpp"));

    assert!(!fixture.dest_root().exists());
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let fixture = LibraryFixture::standard().unwrap();

    pothos_extract()
        .args(["--verbose", "--quiet"])
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_arguments() {
    pothos_extract().assert().failure().stderr(predicate::str::contains("SOURCE_ROOT"));
}

#[test]
#[cfg(unix)]
fn test_unwritable_destination() {
    let fixture = LibraryFixture::standard().unwrap();
    // A regular file where the destination directory should be.
    std::fs::write(fixture.dest_root(), "").unwrap();

    pothos_extract()
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File system error"));
}
