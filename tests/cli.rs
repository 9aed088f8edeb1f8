use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const SONG: &str = "# Blue Bossa\nauthor: K. Dorham\n| Cm7 | Fm7 |\nmystery line\n";

#[test]
fn compile_writes_html_output() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("song.grid");
    let output = dir.path().join("song.html");
    fs::write(&input, SONG).expect("write source");

    let mut cmd = cargo_bin_cmd!("musicgrid");
    cmd.current_dir(dir.path())
        .arg(&input)
        .arg("-o")
        .arg(&output);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("unrecognized line: mystery line"));

    let html = fs::read_to_string(&output).expect("output written");
    assert!(html.contains("<h1>Blue Bossa</h1>"));
    assert!(html.contains("<p class=\"author\">K. Dorham</p>"));
    assert!(!html.contains("server_address"));
}

#[test]
fn treeviz_format_prints_to_stdout() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("song.grid");
    fs::write(&input, SONG).expect("write source");

    let mut cmd = cargo_bin_cmd!("musicgrid");
    cmd.current_dir(dir.path())
        .arg(&input)
        .arg("--format")
        .arg("treeviz");
    cmd.assert().success().stdout(
        predicate::str::starts_with("⧉ Blue Bossa").and(predicate::str::contains("♪ Cm7")),
    );
    assert!(!dir.path().join("index.html").exists());
}

#[test]
fn unknown_format_fails() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("song.grid");
    fs::write(&input, SONG).expect("write source");

    let mut cmd = cargo_bin_cmd!("musicgrid");
    cmd.current_dir(dir.path()).arg(&input).arg("-f").arg("pdf");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown output format 'pdf'"));
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("musicgrid");
    cmd.current_dir(dir.path()).arg("nope.grid");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to read nope.grid"));
}

#[test]
fn config_file_sets_output_path() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("song.grid");
    fs::write(&input, SONG).expect("write source");
    fs::write(
        dir.path().join("musicgrid.toml"),
        "[output]\npath = \"build/page.html\"\n",
    )
    .expect("write config");

    let mut cmd = cargo_bin_cmd!("musicgrid");
    cmd.current_dir(dir.path()).arg("song.grid");
    cmd.assert().success();

    assert!(dir.path().join("build").join("page.html").exists());
}

#[test]
fn list_formats() {
    let mut cmd = cargo_bin_cmd!("musicgrid");
    cmd.arg("--list-formats");
    cmd.assert().success().stdout(
        predicate::str::contains("html")
            .and(predicate::str::contains("json"))
            .and(predicate::str::contains("treeviz")),
    );
}
