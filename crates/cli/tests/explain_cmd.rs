//! CLI tests for the `cmdgram explain` subcommand.

use std::process::Command;

use assert_cmd::cargo;

fn cmdgram_cmd() -> Command {
    Command::new(cargo::cargo_bin!("cmdgram"))
}

#[test]
fn explain_known_key_json() {
    let output = cmdgram_cmd()
        .args(["explain", "commands.generic.syntax", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid explain json");
    assert_eq!(json["key"], "commands.generic.syntax");
    assert!(
        json["explanation"]
            .as_str()
            .is_some_and(|text| !text.is_empty()),
        "expected a non-empty explanation: {stdout}"
    );
}

#[test]
fn explain_unknown_key_json_has_null_explanation() {
    let output = cmdgram_cmd()
        .args(["explain", "commands.custom.whatever", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid explain json");
    assert_eq!(json["key"], "commands.custom.whatever");
    assert!(json["explanation"].is_null());
}

#[test]
fn explain_known_key_pretty_prints_key_and_text() {
    let output = cmdgram_cmd()
        .args(["explain", "commands.generic.unknown", "--output", "pretty"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("commands.generic.unknown"),
        "missing key in pretty explain output: {stdout}"
    );
}
