use std::fs;
use std::path::Path;

use sheet_content::{AttributeSetLoader, LibraryScanner};
use sheet_core::AttributeDefs;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dir");
    }
    fs::write(path, content).expect("write file");
}

/// Library scan scenario
///
/// A library with good sets, bad sets, unrelated files and hidden
/// directories. Bad files are skipped and reported; nothing aborts the scan.
#[test]
fn scan_skips_bad_files_and_sorts_results() {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();

    AttributeSetLoader::save(&root.join("zeta.attr"), &AttributeDefs::standard()).expect("save");
    fs::create_dir_all(root.join("nested")).expect("create nested");
    AttributeSetLoader::save(&root.join("nested/alpha.attr"), &AttributeDefs::standard())
        .expect("save nested");
    write(
        &root.join("future.attr"),
        r#"{ "version": 42, "type": "attribute_settings", "attributes": [] }"#,
    );
    write(&root.join("broken.json"), "{ this is not json");
    write(
        &root.join("character.json"),
        r#"{ "version": 2, "type": "character", "settings": {}, "attributes": [] }"#,
    );
    write(&root.join("readme.txt"), "not a data file");
    write(
        &root.join(".hidden/secret.attr"),
        r#"{ "version": 2, "type": "attribute_settings", "attributes": [] }"#,
    );

    let scan = LibraryScanner::new(root).scan().expect("scan");

    let loaded: Vec<_> = scan
        .entries
        .iter()
        .map(|entry| entry.path.strip_prefix(root).expect("inside root").to_path_buf())
        .collect();
    assert_eq!(
        loaded,
        vec![Path::new("nested/alpha.attr"), Path::new("zeta.attr")]
    );
    assert_eq!(scan.entries[0].attributes.len(), 15);

    let skipped: Vec<_> = scan
        .failures
        .iter()
        .map(|failure| failure.path.file_name().expect("file name").to_owned())
        .collect();
    assert_eq!(skipped, vec!["broken.json", "character.json", "future.attr"]);
    assert!(scan.failures[2].reason.contains("too new"));
}

#[test]
fn missing_root_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let scanner = LibraryScanner::new(dir.path().join("absent"));
    assert!(scanner.scan().is_err());
}
