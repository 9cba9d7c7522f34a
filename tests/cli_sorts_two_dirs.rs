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
fn binary_sorts_files_and_prints_summary() {
    let td = tempdir().expect("tempdir");
    let base = fs::canonicalize(td.path()).expect("canonicalize tempdir");
    let source = base.join("in");
    let output = base.join("out");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("a.txt"), "alpha").unwrap();
    fs::write(source.join("b.txt"), "bravo").unwrap();
    fs::write(source.join("c.jpg"), "img").unwrap();

    let me = cargo_bin!("filebucket");
    let out = Command::new(&me)
        .env("FILEBUCKET_CONFIG", write_min_config(&base))
        .arg(&source)
        .arg(&output)
        .output()
        .expect("spawn binary");

    eprintln!("Exit status: {:?}", out.status);
    eprintln!("=== STDOUT ===\n{}", String::from_utf8_lossy(&out.stdout));
    eprintln!("=== STDERR ===\n{}", String::from_utf8_lossy(&out.stderr));

    assert!(out.status.success(), "binary should exit cleanly");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Sorted 3 of 3 files into 2 buckets"),
        "summary missing from stdout"
    );

    assert!(output.join("txt").join("a.txt").exists());
    assert!(output.join("txt").join("b.txt").exists());
    assert!(output.join("jpg").join("c.jpg").exists());
}

#[test]
fn binary_accepts_worker_count() {
    let td = tempdir().expect("tempdir");
    let base = fs::canonicalize(td.path()).expect("canonicalize tempdir");
    let source = base.join("in");
    let output = base.join("out");
    fs::create_dir_all(&source).unwrap();
    for i in 0..10 {
        fs::write(source.join(format!("f{i}.log")), "x").unwrap();
    }

    let me = cargo_bin!("filebucket");
    let out = Command::new(&me)
        .env("FILEBUCKET_CONFIG", write_min_config(&base))
        .arg("--workers")
        .arg("3")
        .arg(&source)
        .arg(&output)
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "binary should exit cleanly");
    assert_eq!(fs::read_dir(output.join("log")).unwrap().count(), 10);
}
