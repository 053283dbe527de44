use std::process::Command;

use serde_json::Value;

fn fontlist() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fontlist"));
    cmd.env("FONTLIST_LOG", "off");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let output = fontlist().arg("--help").output().expect("run fontlist");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("list"));
    assert!(stdout.contains("default"));
}

#[test]
fn unknown_flag_is_rejected() {
    let output = fontlist()
        .args(["list", "--bogus"])
        .output()
        .expect("run fontlist");

    assert!(!output.status.success());
}

#[cfg(any(target_os = "linux", target_os = "windows", target_os = "macos"))]
#[test]
fn list_json_is_an_array_of_families() {
    let output = fontlist()
        .args(["list", "--json"])
        .output()
        .expect("run fontlist");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("json");
    let families = parsed.as_array().expect("array");
    for family in families {
        assert!(family["name"].is_string());
        assert!(family["fonts"].is_array());
    }
}

#[test]
fn invalid_name_pattern_fails_with_message() {
    let output = fontlist()
        .args(["list", "-n", "("])
        .output()
        .expect("run fontlist");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: invalid regex"), "stderr: {stderr}");
}
