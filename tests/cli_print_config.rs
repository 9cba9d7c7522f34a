use assert_cmd::cargo;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn print_config_needs_no_positionals() {
    let me = cargo::cargo_bin!("filebucket");
    let out = Command::new(me)
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --print-config");
}

#[test]
fn print_config_reports_explicit_env_path() {
    let td = tempdir().expect("tempdir");
    let cfg = td.path().join("mine.xml");
    fs::write(&cfg, "<config>\n</config>\n").unwrap();

    let me = cargo::cargo_bin!("filebucket");
    let out = Command::new(me)
        .env("FILEBUCKET_CONFIG", &cfg)
        .arg("--print-config")
        .output()
        .expect("spawn binary");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("FILEBUCKET_CONFIG"), "stdout: {stdout}");
    assert!(stdout.contains("mine.xml"), "stdout: {stdout}");
}
