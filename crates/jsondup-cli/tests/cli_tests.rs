//! CLI integration tests.
//!
//! Runs the `jsondup` binary as a subprocess against the files in `tests/fixtures`.

use std::path::PathBuf;
use std::process::Command;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_jsondup"))
        .arg("scan")
        .args(args)
        .current_dir(fixtures())
        .env("RUST_LOG", "off")
        .output()
        .unwrap_or_else(|e| panic!("Failed to spawn jsondup: {}", e));
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

// ============================================================================
// Text output
// ============================================================================

#[test]
fn cli_reports_duplicate_key() {
    let (code, stdout, _) = run(&["dup.json"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "Duplicate keys found in dup.json:\n - a\n");
}

#[test]
fn cli_reports_clean_document() {
    let (code, stdout, _) = run(&["clean.json"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "No duplicates found in clean.json\n");
}

#[test]
fn cli_reports_nested_duplicates_flattened() {
    let (_, stdout, _) = run(&["nested.json"]);
    assert_eq!(stdout, "Duplicate keys found in nested.json:\n - a\n - x\n");
}

#[test]
fn cli_path_scope_shows_pointers() {
    let (_, stdout, _) = run(&["--scope", "path", "nested.json"]);
    assert_eq!(stdout, "Duplicate keys found in nested.json:\n - a (at /)\n - x (at /a)\n");
}

#[test]
fn cli_parse_error_is_not_fatal() {
    let (code, stdout, _) = run(&["trailing_comma.json"]);
    assert_eq!(code, 0, "parse errors are reported, not signalled");
    assert!(stdout.starts_with("Error parsing trailing_comma.json: "), "{stdout}");
    assert!(stdout.contains("line 1"), "{stdout}");
}

#[test]
fn cli_batch_keeps_input_order() {
    let (code, stdout, _) = run(&["dup.json", "trailing_comma.json", "missing.json", "clean.json"]);
    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5, "{stdout}");
    assert_eq!(lines[0], "Duplicate keys found in dup.json:");
    assert_eq!(lines[1], " - a");
    assert!(lines[2].starts_with("Error parsing trailing_comma.json: "));
    assert!(lines[3].starts_with("Error parsing missing.json: "));
    assert_eq!(lines[4], "No duplicates found in clean.json");
}

#[test]
fn cli_no_locators_is_a_no_op() {
    let (code, stdout, _) = run(&[]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
}

#[test]
fn cli_expands_directories() {
    let (code, stdout, _) = run(&["dir"]);
    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "Duplicate keys found in dir/locale.json:\n - open\n\
         Duplicate keys found in dir/nested/more.json:\n - greeting\n"
    );
}

#[test]
fn cli_no_recursive_stays_at_top_level() {
    let (_, stdout, _) = run(&["--no-recursive", "dir"]);
    assert_eq!(stdout, "Duplicate keys found in dir/locale.json:\n - open\n");
}

// ============================================================================
// Exit status and JSON output
// ============================================================================

#[test]
fn cli_strict_exits_nonzero_on_failure() {
    let (code, stdout, _) = run(&["--strict", "dup.json", "trailing_comma.json"]);
    assert_eq!(code, 2);
    assert!(stdout.contains("Duplicate keys found in dup.json:"));

    let (code, _, _) = run(&["--strict", "dup.json", "clean.json"]);
    assert_eq!(code, 0, "duplicates alone do not fail a strict run");
}

#[test]
fn cli_json_output() {
    let (code, stdout, _) = run(&["--format", "json", "triple.json", "trailing_comma.json"]);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is a JSON array");
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["locator"], "triple.json");
    assert_eq!(arr[0]["status"], "ok");
    assert_eq!(arr[0]["findings"][0]["key"], "a");
    assert_eq!(arr[0]["findings"][0]["count"], 3);
    assert_eq!(arr[1]["status"], "error");
    assert_eq!(arr[1]["error"]["kind"], "syntax");
}

#[test]
fn cli_config_file_sets_defaults() {
    let dir = std::env::temp_dir().join(format!("jsondup-cli-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let cfg = dir.join("jsondup.toml");
    std::fs::write(&cfg, "scope = \"path\"\nstrict = true\n").unwrap();
    let cfg = cfg.to_string_lossy().to_string();

    let (code, stdout, _) = run(&["--config", &cfg, "nested.json", "trailing_comma.json"]);
    assert_eq!(code, 2);
    assert!(stdout.contains(" - x (at /a)"), "{stdout}");

    // command-line flags win over the file
    let (_, stdout, _) = run(&["--config", &cfg, "--scope", "flattened", "nested.json"]);
    assert_eq!(stdout, "Duplicate keys found in nested.json:\n - a\n - x\n");
}

#[test]
fn cli_bad_config_is_fatal() {
    let (code, stdout, stderr) = run(&["--config", "does-not-exist.toml", "dup.json"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("config"), "{stderr}");
}
