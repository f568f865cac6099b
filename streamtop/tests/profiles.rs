//! Tests for profile load/save and resolution logic (non-interactive paths
//! only), exercised through CLI invocations with --dry-run.

use std::fs;
use std::process::Command;

fn run_streamtop(args: &[&str], config_home: &std::path::Path) -> (bool, String) {
    let exe = env!("CARGO_BIN_EXE_streamtop");
    let output = Command::new(exe)
        .env("XDG_CONFIG_HOME", config_home)
        .args(args)
        .output()
        .expect("run streamtop");
    let ok = output.status.success();
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (ok, text)
}

fn profiles_path(config_home: &std::path::Path) -> std::path::PathBuf {
    config_home.join("streamtop").join("profiles.json")
}

#[test]
fn test_profile_created_on_first_use() {
    // Isolate config in a temp dir
    let td = tempfile::tempdir().unwrap();
    // Provide profile + url => should create profiles.json; --dry-run exits
    // after resolution without touching the network
    let (_ok, _out) = run_streamtop(
        &["--profile", "unittest", "http://example:1", "--dry-run"],
        td.path(),
    );
    let data = fs::read_to_string(profiles_path(td.path())).expect("profiles.json created");
    assert!(
        data.contains("unittest"),
        "profiles.json missing profile entry: {data}"
    );
}

#[test]
fn test_profile_overwrite_only_when_changed() {
    let td = tempfile::tempdir().unwrap();
    // Initial create
    let (_ok, _out) = run_streamtop(&["--profile", "prod", "http://one", "--dry-run"], td.path());
    let first = fs::read_to_string(profiles_path(td.path())).unwrap();
    // Re-run identical (should not duplicate or corrupt)
    let (_ok2, _out2) = run_streamtop(&["--profile", "prod", "http://one", "--dry-run"], td.path());
    let second = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert_eq!(first, second, "Profile file changed despite identical input");
    // Overwrite with different URL using --save (no prompt path)
    let (_ok3, _out3) = run_streamtop(
        &["--profile", "prod", "--save", "http://two", "--dry-run"],
        td.path(),
    );
    let third = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(third.contains("two"), "Updated URL not written: {third}");
}

#[test]
fn test_profile_tls_ca_and_secret_persisted() {
    let td = tempfile::tempdir().unwrap();
    let (_ok, _out) = run_streamtop(
        &[
            "--profile",
            "secureX",
            "--tls-ca",
            "/tmp/cert.pem",
            "--secret",
            "hunter2",
            "https://host:8443",
            "--dry-run",
        ],
        td.path(),
    );
    let data = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(data.contains("secureX"));
    assert!(data.contains("cert.pem"));
    assert!(data.contains("hunter2"));
}

#[test]
fn test_dry_run_resolves_loaded_profile() {
    let td = tempfile::tempdir().unwrap();
    let (_ok, _out) = run_streamtop(
        &["--profile", "reuse", "http://kept:9000", "--dry-run"],
        td.path(),
    );
    // Second run with only the profile name loads the stored url
    let (_ok2, out2) = run_streamtop(&["--profile", "reuse", "--dry-run"], td.path());
    assert!(
        out2.contains("http://kept:9000"),
        "dry-run did not resolve stored url: {out2}"
    );
}
