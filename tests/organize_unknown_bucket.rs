use std::fs;
use tempfile::tempdir;

use filebucket::{Config, UNKNOWN_BUCKET, organize, validate_and_normalize};

fn run(source: &std::path::Path, output: &std::path::Path) -> filebucket::RunReport {
    let mut cfg = Config::new(source, output);
    validate_and_normalize(&mut cfg).expect("roots should validate");
    organize(&cfg).expect("organize should succeed")
}

#[test]
fn extensionless_names_go_to_the_unknown_bucket() {
    let td = tempdir().expect("tempdir");
    let source = td.path().join("in");
    let output = td.path().join("out");
    fs::create_dir_all(&source).unwrap();

    fs::write(source.join("README"), "r").unwrap();
    fs::write(source.join("Makefile"), "m").unwrap();

    let report = run(&source, &output);
    assert_eq!(report.copied, 2);
    assert_eq!(report.buckets, 1);
    let unknown = output.join(UNKNOWN_BUCKET);
    assert!(unknown.join("README").exists());
    assert!(unknown.join("Makefile").exists());
}

#[test]
fn dotfiles_go_to_the_unknown_bucket() {
    let td = tempdir().expect("tempdir");
    let source = td.path().join("in");
    let output = td.path().join("out");
    fs::create_dir_all(&source).unwrap();

    // A leading dot is a hidden-file marker, not an extension separator.
    fs::write(source.join(".env"), "SECRET=1").unwrap();
    fs::write(source.join(".gitignore"), "target").unwrap();

    let report = run(&source, &output);
    assert_eq!(report.copied, 2);
    assert!(output.join(UNKNOWN_BUCKET).join(".env").exists());
    assert!(output.join(UNKNOWN_BUCKET).join(".gitignore").exists());
}

#[test]
fn trailing_dot_goes_to_the_unknown_bucket() {
    let td = tempdir().expect("tempdir");
    let source = td.path().join("in");
    let output = td.path().join("out");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("file."), "x").unwrap();

    run(&source, &output);
    assert!(output.join(UNKNOWN_BUCKET).join("file.").exists());
}

#[test]
fn only_the_final_extension_names_the_bucket() {
    let td = tempdir().expect("tempdir");
    let source = td.path().join("in");
    let output = td.path().join("out");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("archive.tar.gz"), "z").unwrap();

    run(&source, &output);
    assert!(output.join("gz").join("archive.tar.gz").exists());
    assert!(!output.join("tar.gz").exists());
}

#[test]
fn unknown_bucket_mixes_with_named_buckets() {
    let td = tempdir().expect("tempdir");
    let source = td.path().join("in");
    let output = td.path().join("out");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("notes.txt"), "n").unwrap();
    fs::write(source.join("LICENSE"), "l").unwrap();

    let report = run(&source, &output);
    assert_eq!(report.buckets, 2);
    assert!(output.join("txt").join("notes.txt").exists());
    assert!(output.join(UNKNOWN_BUCKET).join("LICENSE").exists());
}
