use assert_fs::prelude::*;
use std::fs;

use filebucket::{Config, OnDuplicate, organize, validate_and_normalize};

/// Re-running over an unchanged source with the overwrite policy must
/// converge: same destination names, no suffix proliferation.
#[test]
fn second_run_overwrites_instead_of_multiplying() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("in");
    let output = temp.child("out");
    source.create_dir_all().unwrap();
    source.child("a.txt").write_str("one").unwrap();
    source.child("b.md").write_str("two").unwrap();

    let mut cfg = Config::new(source.path(), output.path());
    validate_and_normalize(&mut cfg).unwrap();

    let first = organize(&cfg).expect("first run");
    assert_eq!(first.copied, 2);

    let second = organize(&cfg).expect("second run");
    assert_eq!(second.copied, 2);

    assert_eq!(fs::read_dir(output.path().join("txt")).unwrap().count(), 1);
    assert_eq!(fs::read_dir(output.path().join("md")).unwrap().count(), 1);
    assert!(!output.path().join("txt").join("a (2).txt").exists());
}

#[test]
fn second_run_under_skip_copies_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("in");
    let output = temp.child("out");
    source.create_dir_all().unwrap();
    source.child("a.txt").write_str("one").unwrap();

    let mut cfg = Config::new(source.path(), output.path());
    cfg.on_duplicate = OnDuplicate::Skip;
    validate_and_normalize(&mut cfg).unwrap();

    let first = organize(&cfg).expect("first run");
    assert_eq!(first.copied, 1);

    let second = organize(&cfg).expect("second run");
    assert_eq!(second.copied, 0);
    assert_eq!(second.skipped, 1);
}

#[test]
fn second_run_under_rename_adds_suffixed_copies() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("in");
    let output = temp.child("out");
    source.create_dir_all().unwrap();
    source.child("a.txt").write_str("one").unwrap();

    let mut cfg = Config::new(source.path(), output.path());
    cfg.on_duplicate = OnDuplicate::RenameWithSuffix;
    validate_and_normalize(&mut cfg).unwrap();

    organize(&cfg).expect("first run");
    organize(&cfg).expect("second run");

    let bucket = output.path().join("txt");
    assert!(bucket.join("a.txt").exists());
    assert!(bucket.join("a (2).txt").exists());
    assert_eq!(fs::read_dir(&bucket).unwrap().count(), 2);
}
