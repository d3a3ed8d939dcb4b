use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("context_statusline").unwrap();
    cmd.env_remove("CLAUDE_CONTEXT_LIMIT")
        .env_remove("CLAUDE_TRANSCRIPT_TAIL_LINES")
        .env_remove("CLAUDE_DEBUG")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn prints_one_line_for_full_payload() {
    let mut f = NamedTempFile::new().unwrap();
    writeln!(
        f,
        r#"{{"type":"assistant","message":{{"usage":{{"input_tokens":20001}}}}}}"#
    )
    .unwrap();
    let payload = serde_json::json!({
        "model": {"display_name": "Opus"},
        "workspace": {"current_dir": "/home/u/proj/crates/core", "project_dir": "/home/u/proj"},
        "transcript_path": f.path(),
        "cost": {
            "total_cost_usd": 1.25,
            "total_duration_ms": 1_800_000,
            "total_lines_added": 10,
            "total_lines_removed": 3
        }
    });

    let out = stdout_of(cmd().write_stdin(payload.to_string()));
    assert_eq!(
        out,
        "[Opus] │ 📁 crates/core │ ◉ ◉ ○ ○ ○ ○ ○ ○ ○ ○  20k/200k  │ $1.250 │ 30m │ +7\n"
    );
}

#[test]
fn colors_are_emitted_by_default() {
    let out = stdout_of(
        cmd()
            .env_remove("NO_COLOR")
            .write_stdin(r#"{"model":{"display_name":"Opus"}}"#),
    );
    assert!(out.contains("\u{1b}["));
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn malformed_stdin_prints_fallback_and_succeeds() {
    let out = stdout_of(cmd().write_stdin("this is not json"));
    assert!(out.starts_with("[Claude] 📁 "));
    assert!(out.contains("[Error: "));
    assert!(out.ends_with("]\n"));
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn empty_stdin_prints_fallback() {
    cmd()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Error: EOF while parsing a ]"));
}

#[test]
fn missing_transcript_omits_context_segment() {
    let out = stdout_of(cmd().write_stdin(
        r#"{"transcript_path":"/no/such/file.jsonl","workspace":{"current_dir":"/a/b"}}"#,
    ));
    assert_eq!(out, "[Claude] │ 📁 b\n");
}

#[test]
fn context_limit_from_env() {
    let mut f = NamedTempFile::new().unwrap();
    writeln!(
        f,
        r#"{{"type":"assistant","message":{{"usage":{{"input_tokens":100000}}}}}}"#
    )
    .unwrap();
    let payload = serde_json::json!({ "transcript_path": f.path() });
    let out = stdout_of(
        cmd()
            .env("CLAUDE_CONTEXT_LIMIT", "1000000")
            .write_stdin(payload.to_string()),
    );
    assert!(out.contains("◉ ○ ○ ○ ○ ○ ○ ○ ○ ○  100k/1000k"));
}

#[test]
fn json_mode_emits_single_json_line() {
    let out = stdout_of(
        cmd()
            .arg("--json")
            .write_stdin(r#"{"model":{"display_name":"Haiku"},"cost":{"total_lines_removed":2}}"#),
    );
    assert_eq!(out.lines().count(), 1);
    let v: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(v["model"], "Haiku");
    assert_eq!(v["directory"], "unknown");
    assert_eq!(v["cost"]["net_lines"], -2);
    assert!(v["context"].is_null());
}

#[test]
fn invalid_flag_still_renders() {
    cmd()
        .arg("--context-limit=0")
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("[Claude] │ 📁 unknown\n");
}

#[test]
fn debug_goes_to_stderr_only() {
    let assert = cmd()
        .arg("--debug")
        .write_stdin("{}")
        .assert()
        .success()
        .stderr(predicate::str::contains("=== Debug Information ==="))
        .stderr(predicate::str::contains("Context: no estimate"));
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(out, "[Claude] │ 📁 unknown\n");
}
