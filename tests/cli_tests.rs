//! CLI integration tests for stringer.

use std::io::Write;
use std::process::{Command, Stdio};

fn stringer_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stringer"))
}

fn fixture(content: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("temp file");
    f.write_all(content).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn test_cli_help() {
    let output = stringer_cmd()
        .arg("--help")
        .output()
        .expect("failed to execute stringer");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("stringer"));
    assert!(stdout.contains("--min-len"));
    assert!(stdout.contains("--enc"));
    assert!(stdout.contains("--null-only"));
    assert!(stdout.contains("--json"));
}

#[test]
fn test_cli_version() {
    for flag in ["-v", "--version"] {
        let output = stringer_cmd()
            .arg(flag)
            .output()
            .expect("failed to execute stringer");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_cli_unknown_flag_exits_2() {
    let output = stringer_cmd()
        .args(["--frobnicate", "x"])
        .output()
        .expect("failed to execute stringer");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_missing_operand_exits_2() {
    let output = stringer_cmd()
        .output()
        .expect("failed to execute stringer");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_min_len_too_small_exits_2() {
    let f = fixture(b"whatever");
    let output = stringer_cmd()
        .args(["--min-len", "1"])
        .arg(f.path())
        .output()
        .expect("failed to execute stringer");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 2"));
}

#[test]
fn test_cli_bad_encoding_exits_2() {
    let f = fixture(b"whatever");
    let output = stringer_cmd()
        .args(["--enc", "ascii,latin9"])
        .arg(f.path())
        .output()
        .expect("failed to execute stringer");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("latin9"));
}

#[test]
fn test_cli_bad_thread_count_exits_2() {
    let f = fixture(b"whatever");
    let output = stringer_cmd()
        .args(["--threads", "many"])
        .arg(f.path())
        .output()
        .expect("failed to execute stringer");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_nonexistent_file_fails() {
    let output = stringer_cmd()
        .arg("/no/such/stringer/input")
        .output()
        .expect("failed to execute stringer");
    assert!(!output.status.success());
    assert_ne!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot open"));
}

#[test]
fn test_cli_scans_file_text_mode() {
    let f = fixture(b"\x00\x01hello world\x00\x02\x03");
    let output = stringer_cmd()
        .arg(f.path())
        .output()
        .expect("failed to execute stringer");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ascii"));
    assert!(stdout.contains("\"hello world\""));
    assert!(stdout.contains("len=11"));
}

#[test]
fn test_cli_json_mode_emits_parseable_lines() {
    // Keep the wide run on an even offset; the detector does not resync.
    let mut content = Vec::from(&b"\x00plain\x00\x00"[..]);
    content.extend(b"wide!!".iter().flat_map(|&b| [b, 0]));
    content.push(0xFF);
    let f = fixture(&content);

    let output = stringer_cmd()
        .args(["--json", "--min-len", "5"])
        .arg(f.path())
        .output()
        .expect("failed to execute stringer");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut kinds = Vec::new();
    for line in stdout.lines() {
        let v: serde_json::Value = serde_json::from_str(line).expect("JSON line");
        kinds.push(v["kind"].as_str().unwrap().to_string());
    }
    kinds.sort();
    assert_eq!(kinds, ["ascii", "utf16le"]);
}

#[test]
fn test_cli_reads_stdin_with_dash() {
    let mut child = stringer_cmd()
        .args(["-", "--min-len", "4"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn stringer");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"\x00from-stdin\x00")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"from-stdin\""));
}

#[test]
fn test_cli_empty_file_no_output() {
    let f = fixture(b"");
    let output = stringer_cmd()
        .arg(f.path())
        .output()
        .expect("failed to execute stringer");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_null_only_filters() {
    let f = fixture(b"loose-run\x01anchored\x00");
    let output = stringer_cmd()
        .args(["--null-only", "--min-len", "4"])
        .arg(f.path())
        .output()
        .expect("failed to execute stringer");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"anchored\""));
    assert!(!stdout.contains("loose-run"));
}

#[test]
fn test_cli_explicit_thread_count() {
    let f = fixture(b"\x00threads-test\x00");
    let output = stringer_cmd()
        .args(["--threads", "3"])
        .arg(f.path())
        .output()
        .expect("failed to execute stringer");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"threads-test\""));
}
