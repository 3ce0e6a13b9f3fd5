//! Integration tests for the eqsl-card command line

// assert_cmd::cargo_bin is deprecated but still works
#![allow(deprecated)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("dl1abc.json")
}

fn small_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(
        &path,
        "[canvas]\nwidth = 240\nheight = 160\n\n[fonts]\nsystem = false\n",
    )
    .unwrap();
    path
}

#[test]
fn test_intro_without_outputs() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("eqsl-card")?
        .assert()
        .success()
        .stdout(predicate::str::contains("QUICK START"));
    Ok(())
}

#[test]
fn test_edits_without_output_fail() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("eqsl-card")?
        .args(["--set", "callsign=DL1ABC"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to write"));
    Ok(())
}

#[test]
fn test_list_backgrounds() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("eqsl-card")?
        .arg("--list-backgrounds")
        .assert()
        .success()
        .stdout(predicate::str::contains("sunset").and(predicate::str::contains("night")));
    Ok(())
}

#[test]
fn test_list_fields() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("eqsl-card")?
        .arg("--list-fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("operator_name").and(predicate::str::contains("qso")));
    Ok(())
}

#[test]
fn test_edit_and_save_template() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let out = dir.path().join("card.json");

    Command::cargo_bin("eqsl-card")?
        .args(["--set", "callsign=DL1ABC", "--set", "band=40m"])
        .args(["--color", "contact=#00ff00", "--move", "qso=100,600"])
        .args(["--background", "ocean", "--save-template"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out)?)?;
    assert_eq!(json["fields"]["callsign"], "DL1ABC");
    assert_eq!(json["fields"]["band"], "40m");
    assert_eq!(json["styles"]["contact"]["color"], "#00ff00");
    assert_eq!(json["positions"]["qso"]["x"], 100.0);
    assert_eq!(json["background"]["name"], "ocean");
    Ok(())
}

#[test]
fn test_template_into_directory_uses_default_name() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    Command::cargo_bin("eqsl-card")?
        .arg("--save-template")
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("eqsl-template.json").exists());
    Ok(())
}

#[test]
fn test_png_export_from_template() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = small_config(dir.path());

    Command::cargo_bin("eqsl-card")?
        .arg("--config")
        .arg(&config)
        .arg("--template")
        .arg(fixture())
        .arg("--png")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("eqsl-DL1ABC.png"));

    let png = fs::read(dir.path().join("eqsl-DL1ABC.png"))?;
    assert_eq!(&png[..4], &[137, 80, 78, 71]);
    Ok(())
}

#[test]
fn test_data_url_on_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = small_config(dir.path());

    Command::cargo_bin("eqsl-card")?
        .arg("--config")
        .arg(&config)
        .args(["--scale", "0.5", "--data-url"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("data:image/png;base64,"));
    Ok(())
}

#[test]
fn test_svg_export() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let out = dir.path().join("card.svg");

    Command::cargo_bin("eqsl-card")?
        .args(["--set", "contact=W1AW", "--svg"])
        .arg(&out)
        .assert()
        .success();

    let svg = fs::read_to_string(&out)?;
    assert!(svg.contains("To Radio: W1AW"));
    Ok(())
}

#[test]
fn test_show_panel() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("eqsl-card")?
        .arg("--template")
        .arg(fixture())
        .args(["--drag", "callsign=20,0", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"DL1ABC\"").and(predicate::str::contains("at (100, 40)")));
    Ok(())
}

#[test]
fn test_out_of_range_size_fails() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("eqsl-card")?
        .args(["--size", "callsign=500", "--show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside 24..=160"));
    Ok(())
}

#[test]
fn test_broken_template_reports_location() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{\n  \"fields\": {\n    \"callsign\": 42\n  }\n}\n")?;

    Command::cargo_bin("eqsl-card")?
        .arg("--template")
        .arg(&broken)
        .arg("--show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json").and(predicate::str::contains("invalid template")));
    Ok(())
}

#[test]
fn test_unsupported_background_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let text = dir.path().join("notes.txt");
    fs::write(&text, "not an image")?;

    Command::cargo_bin("eqsl-card")?
        .arg("--background-file")
        .arg(&text)
        .arg("--show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported image format"));
    Ok(())
}
