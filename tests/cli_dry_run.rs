use assert_cmd::cargo::cargo_bin;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_min_config(dir: &Path) -> PathBuf {
    let cfg = dir.join("config.xml");
    fs::write(&cfg, "<config>\n  <log_level>normal</log_level>\n</config>\n").unwrap();
    cfg
}

#[test]
fn dry_run_reports_but_copies_nothing() {
    let td = tempdir().expect("tempdir");
    let base = fs::canonicalize(td.path()).expect("canonicalize tempdir");
    let source = base.join("in");
    let output = base.join("out");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("a.txt"), "a").unwrap();
    fs::write(source.join("b.jpg"), "b").unwrap();

    let me = cargo_bin!("filebucket");
    let out = Command::new(&me)
        .env("FILEBUCKET_CONFIG", write_min_config(&base))
        .arg("--dry-run")
        .arg(&source)
        .arg(&output)
        .output()
        .expect("spawn binary");

    eprintln!("=== STDOUT ===\n{}", String::from_utf8_lossy(&out.stdout));
    assert!(out.status.success(), "dry-run should exit cleanly");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Sorted 0 of 2 files"), "stdout: {stdout}");
    assert!(stdout.contains("2 skipped"), "stdout: {stdout}");

    // Sources untouched, no buckets created.
    assert!(source.join("a.txt").exists());
    assert!(source.join("b.jpg").exists());
    assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
}
