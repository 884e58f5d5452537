use predicates::prelude::*;

use pothos_extract::test_utils::{LibraryFixture, STANDARD_DEPENDENCY_COUNT, STANDARD_FILE_COUNT};

use super::pothos_extract;

#[test]
fn test_prints_dependency_count() {
    let fixture = LibraryFixture::standard().unwrap();

    pothos_extract()
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .success()
        .stdout(format!("{STANDARD_DEPENDENCY_COUNT}\n"));
}

#[test]
fn test_writes_category_layout() {
    let fixture = LibraryFixture::standard().unwrap();

    pothos_extract().arg(fixture.source_root()).arg(fixture.dest_root()).assert().success();

    let files = fixture.output_files().unwrap();
    assert_eq!(
        files,
        vec![
            "include/Pothos/archive/basic_archive.hpp",
            "include/Pothos/archive/text_oarchive.hpp",
            "include/Pothos/serialization/extended_type_info.hpp",
            "include/Pothos/serialization/impl/config.hpp",
            "include/Pothos/serialization/impl/mpl/if.hpp",
            "include/Pothos/serialization/impl/mpl/int.hpp",
            "include/Pothos/serialization/impl/mpl/vector.hpp",
            "include/Pothos/serialization/impl/type_traits/is_fundamental.hpp",
            "include/Pothos/serialization/level.hpp",
            "include/Pothos/serialization/string.hpp",
            "lib/basic_archive.cpp",
            "lib/extended_type_info.cpp",
        ]
    );
    assert_eq!(files.len(), STANDARD_FILE_COUNT);
}

#[test]
fn test_rewrites_sources_and_headers() {
    let fixture = LibraryFixture::standard().unwrap();

    pothos_extract().arg(fixture.source_root()).arg(fixture.dest_root()).assert().success();

    assert_eq!(
        fixture.read_output("lib/basic_archive.cpp").unwrap(),
        "// basic_archive.cpp: boost serialization\n\
         #include <Pothos/archive/basic_archive.hpp>\n\
         #include <Pothos/serialization/string.hpp> // boost::serialization string support\n\
         \n\
         namespace Pothos { namespace archive {\n\
         POTHOS_ARCHIVE_DECL const char * POTHOS_ARCHIVE_SIGNATURE() {\n    \
             return \"serialization::archive\";\n\
         }\n\
         } }\n"
    );

    assert_eq!(
        fixture.read_output("include/Pothos/archive/basic_archive.hpp").unwrap(),
        "#ifndef POTHOS_ARCHIVE_BASIC_ARCHIVE_HPP\n\
         #define POTHOS_ARCHIVE_BASIC_ARCHIVE_HPP\n\
         #include <Pothos/serialization/impl/config.hpp>\n\
         #include <Pothos/serialization/impl/mpl/if.hpp>\n\
         #endif // BOOST_ARCHIVE_BASIC_ARCHIVE_HPP\n"
    );

    assert_eq!(
        fixture.read_output("include/Pothos/serialization/impl/mpl/vector.hpp").unwrap(),
        "#include <Pothos/serialization/impl/mpl/aux_/na.hpp> // not vendored\n"
    );
}

#[test]
fn test_keeps_line_endings() {
    let fixture = LibraryFixture::standard().unwrap();

    pothos_extract().arg(fixture.source_root()).arg(fixture.dest_root()).assert().success();

    assert_eq!(
        fixture.read_output_bytes("lib/extended_type_info.cpp").unwrap(),
        b"#include \"Pothos/serialization/extended_type_info.hpp\"\r\n\
          #include <Pothos/serialization/impl/config.hpp>\r\n\
          namespace Pothos {\r\n\
          namespace serialization {\r\n\
          void Pothos_extended_type_info_init() {}\r\n\
          }\r\n\
          }"
    );
}

#[test]
fn test_keeps_non_utf8_bytes() {
    let fixture = LibraryFixture::standard().unwrap();
    fixture
        .add_bytes("boost/serialization/level.hpp", b"// (C) Fran\xe7ois\nnamespace boost {}\n")
        .unwrap();

    pothos_extract().arg(fixture.source_root()).arg(fixture.dest_root()).assert().success();

    assert_eq!(
        fixture.read_output_bytes("include/Pothos/serialization/level.hpp").unwrap(),
        b"// (C) Fran\xe7ois\nnamespace Pothos {}\n"
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let fixture = LibraryFixture::standard().unwrap();

    pothos_extract()
        .arg("--dry-run")
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .success()
        .stdout(format!("{STANDARD_DEPENDENCY_COUNT}\n"))
        .stderr(predicate::str::contains("Dry run"));

    assert!(!fixture.dest_root().exists());
}

#[test]
fn test_rerun_overwrites_in_place() {
    let fixture = LibraryFixture::standard().unwrap();

    for _ in 0..2 {
        pothos_extract()
            .arg(fixture.source_root())
            .arg(fixture.dest_root())
            .assert()
            .success()
            .stdout(format!("{STANDARD_DEPENDENCY_COUNT}\n"));
    }

    assert_eq!(fixture.output_files().unwrap().len(), STANDARD_FILE_COUNT);
}

#[test]
fn test_logging_levels() {
    let fixture = LibraryFixture::standard().unwrap();

    pothos_extract()
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .success()
        .stderr(predicate::str::contains("Resolved 8 dependencies"))
        .stderr(predicate::str::contains("Wrote libs/").not());

    pothos_extract()
        .arg("--verbose")
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote libs/serialization/src/basic_archive.cpp"));

    pothos_extract()
        .arg("--quiet")
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_rust_log_overrides_flags() {
    let fixture = LibraryFixture::standard().unwrap();

    pothos_extract()
        .env("RUST_LOG", "error")
        .arg("--verbose")
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_empty_library() {
    let fixture = LibraryFixture::new().unwrap();

    pothos_extract()
        .arg(fixture.source_root())
        .arg(fixture.dest_root())
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::contains("Skipping missing directory"));
}
