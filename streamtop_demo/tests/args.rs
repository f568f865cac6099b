//! Unit tests for demo server flag parsing.

use streamtop_demo::args::{parse_port, parse_secret};

fn argv(args: &[&str]) -> Vec<String> {
    std::iter::once("streamtop_demo")
        .chain(args.iter().copied())
        .map(String::from)
        .collect()
}

#[test]
fn port_long_short_and_assign() {
    assert_eq!(parse_port(argv(&["--port", "9001"]), 8290), 9001);
    assert_eq!(parse_port(argv(&["-p", "9002"]), 8290), 9002);
    assert_eq!(parse_port(argv(&["--port=9003"]), 8290), 9003);
    assert_eq!(parse_port(argv(&[]), 8290), 8290);
}

#[test]
fn port_garbage_falls_back_to_default() {
    assert_eq!(parse_port(argv(&["--port", "not-a-port"]), 8290), 8290);
}

#[test]
fn secret_long_short_and_assign() {
    assert_eq!(
        parse_secret(argv(&["--secret", "hunter2"])).as_deref(),
        Some("hunter2")
    );
    assert_eq!(parse_secret(argv(&["-s", "x"])).as_deref(), Some("x"));
    assert_eq!(
        parse_secret(argv(&["--secret=abc"])).as_deref(),
        Some("abc")
    );
}

#[test]
fn empty_secret_counts_as_absent() {
    assert_eq!(parse_secret(argv(&["--secret", ""])), None);
}
