//! CLI arg parsing tests for streamtop (client)
use std::process::Command;

// We test the parsing by invoking the binary with --help and ensuring the
// help mentions short and long flags.

#[test]
fn test_help_mentions_short_and_long_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_streamtop"))
        .arg("--help")
        .output()
        .expect("run streamtop --help");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        text.contains("--tls-ca")
            && text.contains("-t")
            && text.contains("--profile")
            && text.contains("-P")
            && text.contains("--secret")
            && text.contains("-s"),
        "help text missing expected flags (--tls-ca/-t, --profile/-P, --secret/-s)\n{text}"
    );
}

#[test]
fn test_flags_accepted_with_help() {
    // Use --help combined with flags to avoid network and still exercise arg acceptance
    let exe = env!("CARGO_BIN_EXE_streamtop");
    let out = Command::new(exe)
        .args(["--tls-ca", "/tmp/cert.pem", "--help"])
        .output()
        .expect("run streamtop");
    assert!(
        out.status.success(),
        "streamtop --tls-ca … --help did not succeed"
    );
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(text.contains("Usage:"));

    let out2 = Command::new(exe)
        .args(["-s", "hunter2", "--help"])
        .output()
        .expect("run streamtop");
    assert!(out2.status.success(), "streamtop -s … --help did not succeed");
    let text2 = format!(
        "{}{}",
        String::from_utf8_lossy(&out2.stdout),
        String::from_utf8_lossy(&out2.stderr)
    );
    assert!(text2.contains("Usage:"));

    let out3 = Command::new(exe)
        .args(["--profile", "dev", "--help"])
        .output()
        .expect("run streamtop");
    assert!(
        out3.status.success(),
        "streamtop --profile dev --help did not succeed"
    );
    let text3 = format!(
        "{}{}",
        String::from_utf8_lossy(&out3.stdout),
        String::from_utf8_lossy(&out3.stderr)
    );
    assert!(text3.contains("Usage:"));
}

#[test]
fn test_unexpected_flag_reports_usage() {
    let out = Command::new(env!("CARGO_BIN_EXE_streamtop"))
        .args(["--bogus"])
        .output()
        .expect("run streamtop");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(text.contains("Usage:"), "expected usage on bad flag\n{text}");
}
