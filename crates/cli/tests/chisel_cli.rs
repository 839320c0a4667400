use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const GO_SOURCE: &str = "package main

// @ai add retries
func fetch() error {
\treturn nil
}

func store() {
\t// @ai batch the writes
\t// keep order stable
}
";

#[allow(deprecated)]
fn chisel() -> Command {
    Command::cargo_bin("chisel").expect("binary")
}

#[test]
fn text_output_lists_directives() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("main.go");
    fs::write(&file, GO_SOURCE).unwrap();

    chisel()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("main.go:4-6 fetch (doc_comment)"))
        .stdout(predicate::str::contains("main.go:8-11 store (inline)"))
        .stdout(predicate::str::contains(
            "    // @ai batch the writes\n    // keep order stable",
        ));
}

#[test]
fn prompt_flag_strips_markers() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("main.go");
    fs::write(&file, GO_SOURCE).unwrap();

    chisel()
        .arg(&file)
        .arg("--prompt")
        .assert()
        .success()
        .stdout(predicate::str::contains("    batch the writes\n    keep order stable"));
}

#[test]
fn json_output_is_machine_readable() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("main.go");
    fs::write(&file, GO_SOURCE).unwrap();

    let output = chisel()
        .arg(&file)
        .arg("--json")
        .arg("--prompt")
        .output()
        .expect("command run");
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let items = body.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["function_name"], "fetch");
    assert_eq!(items[0]["binding"], "doc_comment");
    assert_eq!(items[0]["prompt"], "add retries");
    assert_eq!(items[1]["function_name"], "store");
    assert_eq!(items[1]["function_start_line"], 8);
    assert_eq!(items[1]["tag_text"], "// @ai batch the writes\n// keep order stable");
}

#[test]
fn reports_when_nothing_found() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("plain.go");
    fs::write(&file, "package main\n\nfunc plain() {}\n").unwrap();

    chisel()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("No @ai directives found."));
}

#[test]
fn custom_sentinel_and_explicit_language() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("snippet.txt");
    fs::write(&file, "fn main() {\n    // @todo wire up args\n}\n").unwrap();

    chisel()
        .arg(&file)
        .args(["--language", "rust", "--sentinel", "@todo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snippet.txt:1-3 main (inline)"));
}

#[test]
fn config_file_supplies_settings() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("app.js");
    fs::write(&file, "function boot() {\n  // @agent start the server\n}\n").unwrap();
    let config = temp.path().join("chisel.toml");
    fs::write(&config, "language = \"javascript\"\nsentinel = \"@agent\"\n").unwrap();

    chisel()
        .arg(&file)
        .arg("--config")
        .arg(&config)
        .arg("--prompt")
        .assert()
        .success()
        .stdout(predicate::str::contains("app.js:1-3 boot (inline)"))
        .stdout(predicate::str::contains("    start the server"));
}

#[test]
fn config_without_language_detects_from_extension() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("app.js");
    fs::write(&file, "function boot() {\n  // @agent start the server\n}\n").unwrap();
    let config = temp.path().join("chisel.toml");
    fs::write(&config, "sentinel = \"@agent\"\n").unwrap();

    chisel()
        .arg(&file)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("app.js:1-3 boot (inline)"));
}

#[test]
fn unknown_extension_requires_language() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("notes.txt");
    fs::write(&file, "// @ai nothing to see\n").unwrap();

    chisel()
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --language"));
}

#[test]
fn missing_file_fails() {
    let temp = tempdir().unwrap();

    chisel()
        .arg(temp.path().join("absent.go"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("extracting directives from"));
}

#[test]
fn strict_mode_rejects_broken_source() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("broken.go");
    fs::write(&file, "package main\n\nfunc a() {\n\t// @ai fix\n\tx := \n}\n").unwrap();

    chisel().arg(&file).assert().success();
    chisel()
        .arg(&file)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("syntax error"));
}
