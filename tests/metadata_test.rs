// tests/metadata_test.rs
use std::fs;

use tempfile::TempDir;

use release_prep::metadata::MetadataFiles;

const SOURCE: &str = r#"using System;

namespace Extension
{
    static class Constants
    {
        public const string Name = "extension";
        public const string Version = "1.1.0";
    }
}
"#;

const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<PackageManifest Version="2.0.0" xmlns="http://schemas.example/2011">
    <Metadata>
        <Identity Id="extension.1f8c" Version="1.1.0" Language="en-US" Publisher="example" />
        <DisplayName>Extension</DisplayName>
    </Metadata>
</PackageManifest>
"#;

fn write_fixture(source: &str, manifest: &str) -> (TempDir, MetadataFiles) {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("source.extension.cs");
    let manifest_path = dir.path().join("source.extension.vsixmanifest");
    fs::write(&source_path, source).unwrap();
    fs::write(&manifest_path, manifest).unwrap();

    let files = MetadataFiles::new(&source_path, &manifest_path).unwrap();
    (dir, files)
}

#[test]
fn test_current_version_when_files_agree() {
    let (_dir, files) = write_fixture(SOURCE, MANIFEST);

    assert_eq!(files.current_version().unwrap(), "1.1.0");
}

#[test]
fn test_current_version_fails_on_disagreement() {
    let (_dir, files) = write_fixture(SOURCE, &MANIFEST.replace("1.1.0", "1.0.0"));

    let message = files.current_version().unwrap_err().to_string();
    assert!(message.contains("1.1.0"));
    assert!(message.contains("1.0.0"));
}

#[test]
fn test_current_version_fails_when_line_missing() {
    let (_dir, files) = write_fixture("using System;\n", MANIFEST);

    assert!(files.current_version().is_err());
}

#[test]
fn test_set_version_rewrites_both_files() {
    let (_dir, files) = write_fixture(SOURCE, MANIFEST);

    files.set_version("1.2.0").unwrap();

    assert_eq!(files.current_version().unwrap(), "1.2.0");
}

#[test]
fn test_set_version_preserves_surrounding_text() {
    let (_dir, files) = write_fixture(SOURCE, MANIFEST);

    files.set_version("1.2.0").unwrap();

    // Every byte outside the captured version is untouched
    let source = fs::read_to_string(files.source_path()).unwrap();
    assert_eq!(source, SOURCE.replace("1.1.0", "1.2.0"));
    let manifest = fs::read_to_string(files.manifest_path()).unwrap();
    assert_eq!(manifest, MANIFEST.replace("\"1.1.0\"", "\"1.2.0\""));
}

#[test]
fn test_set_version_leaves_unrelated_versions_alone() {
    let (_dir, files) = write_fixture(SOURCE, MANIFEST);

    files.set_version("1.2.0").unwrap();

    // The PackageManifest element's own Version attribute is not the
    // Identity version and must not be rewritten
    let manifest = fs::read_to_string(files.manifest_path()).unwrap();
    assert!(manifest.contains(r#"<PackageManifest Version="2.0.0""#));
    assert!(manifest.contains(r#"Version="1.2.0" Language="en-US""#));
}

#[test]
fn test_round_trip_through_both_versions() {
    let (_dir, files) = write_fixture(SOURCE, MANIFEST);

    files.set_version("3.7.0").unwrap();
    assert_eq!(files.current_version().unwrap(), "3.7.0");

    files.set_version("3.8.0").unwrap();
    assert_eq!(files.current_version().unwrap(), "3.8.0");
}
