use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(format!("{}.cisto", name))
}

#[test]
fn renders_html_by_default() {
    let mut cmd = cargo_bin_cmd!("cisto");
    cmd.arg(sample_path("page"));

    cmd.assert().success().stdout(
        predicate::str::starts_with("<html>")
            .and(predicate::str::contains("<meta charset=\"utf-8\" />"))
            .and(predicate::str::contains("Hello , welcome back")),
    );
}

#[test]
fn data_file_feeds_the_context() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data.json");
    fs::write(&data, r#"{"user": "Ada", "logo": "/logo.svg"}"#).unwrap();

    let mut cmd = cargo_bin_cmd!("cisto");
    cmd.arg(sample_path("page")).arg("--data").arg(&data);

    cmd.assert().success().stdout(
        predicate::str::contains("Hello Ada, welcome back")
            .and(predicate::str::contains("src=\"/logo.svg\"")),
    );
}

#[test]
fn config_file_and_overrides_are_layered() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("cisto.toml");
    fs::write(&config, "[render]\nformat = \"json\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("cisto");
    cmd.arg(sample_path("comments")).arg("--config").arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"classes\": [\n"));

    let mut cmd = cargo_bin_cmd!("cisto");
    cmd.arg(sample_path("comments"))
        .arg("--config")
        .arg(&config)
        .arg("--set")
        .arg("render.format=treeviz");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("⧉ root\n"));
}

#[test]
fn format_flag_selects_output() {
    let mut cmd = cargo_bin_cmd!("cisto");
    cmd.arg(sample_path("siblings")).arg("--format").arg("tokens");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("indent@0 '\t'\ninstantClass@1 '.items'\n"));

    let mut cmd = cargo_bin_cmd!("cisto");
    cmd.arg(sample_path("siblings")).arg("-f").arg("yaml");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("- item-2"));
}

#[test]
fn reads_stdin() {
    let mut cmd = cargo_bin_cmd!("cisto");
    cmd.arg("-").write_stdin("p hi\n");
    cmd.assert()
        .success()
        .stdout("<p>\n  hi\n</p>\n");
}

#[test]
fn parse_errors_are_reported_with_a_caret() {
    let mut cmd = cargo_bin_cmd!("cisto");
    cmd.arg("-").write_stdin("div\n  span ?\n");
    cmd.assert().failure().code(1).stderr(
        predicate::str::contains("Parse error at 2:8")
            .and(predicate::str::contains("2 |   span ?"))
            .and(predicate::str::contains("Unknown input encountered")),
    );
}

#[test]
fn rejects_malformed_override() {
    let mut cmd = cargo_bin_cmd!("cisto");
    cmd.arg(sample_path("page")).arg("--set").arg("render.format");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --set value"));
}

#[test]
fn missing_file_fails() {
    let mut cmd = cargo_bin_cmd!("cisto");
    cmd.arg("does-not-exist.cisto");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading does-not-exist.cisto"));
}
