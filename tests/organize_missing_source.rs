use std::fs;
use tempfile::tempdir;

use filebucket::{Config, FileBucketError, validate_and_normalize};

#[test]
fn missing_source_yields_typed_error() {
    let td = tempdir().expect("tempdir");
    let source = td.path().join("nope");
    let output = td.path().join("out");

    let mut cfg = Config::new(&source, &output);
    let err = validate_and_normalize(&mut cfg).expect_err("missing source must be rejected");
    match err.downcast_ref::<FileBucketError>() {
        Some(FileBucketError::SourceNotFound(p)) => assert_eq!(p, &source),
        other => panic!("expected SourceNotFound, got {:?}", other),
    }
}

#[test]
fn missing_source_does_not_create_the_output_root() {
    let td = tempdir().expect("tempdir");
    let source = td.path().join("nope");
    let output = td.path().join("out");

    let mut cfg = Config::new(&source, &output);
    let _ = validate_and_normalize(&mut cfg).expect_err("missing source must be rejected");
    assert!(
        !output.exists(),
        "a failed source check must not leave an output directory behind"
    );
}

#[test]
fn source_file_is_rejected_as_not_a_directory() {
    let td = tempdir().expect("tempdir");
    let source = td.path().join("plain.txt");
    fs::write(&source, "not a dir").unwrap();
    let output = td.path().join("out");

    let mut cfg = Config::new(&source, &output);
    let err = validate_and_normalize(&mut cfg).expect_err("file source must be rejected");
    match err.downcast_ref::<FileBucketError>() {
        Some(FileBucketError::SourceNotADirectory(p)) => assert_eq!(p, &source),
        other => panic!("expected SourceNotADirectory, got {:?}", other),
    }
    assert!(!output.exists());
}
