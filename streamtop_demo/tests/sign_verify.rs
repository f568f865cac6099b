//! Cross-crate contract test: tokens minted by the console must verify here,
//! byte for byte, and expired or tampered ones must not.

use streamtop::sign::{sign, sign_with_ttl};
use streamtop_demo::sign::verify;

const NOW_MS: i64 = 1_722_000_000_000;
const SECRET: &str = "hunter2";
const PATH: &str = "/live/alpha";

fn sign_param(token: &streamtop::sign::ActionToken) -> String {
    // The value the server sees after query parsing
    token
        .query()
        .strip_prefix("sign=")
        .expect("query starts with sign=")
        .to_string()
}

#[test]
fn console_token_verifies_within_window() {
    let token = sign(PATH, SECRET, NOW_MS).unwrap();
    assert!(verify(PATH, SECRET, &sign_param(&token), NOW_MS));
    // Still valid just before expiry
    assert!(verify(PATH, SECRET, &sign_param(&token), token.expires_at));
}

#[test]
fn expired_token_is_rejected() {
    let token = sign(PATH, SECRET, NOW_MS).unwrap();
    assert!(!verify(PATH, SECRET, &sign_param(&token), token.expires_at + 1));

    let short = sign_with_ttl(PATH, SECRET, NOW_MS, 1_000).unwrap();
    assert!(!verify(PATH, SECRET, &sign_param(&short), NOW_MS + 2_000));
}

#[test]
fn wrong_path_or_secret_is_rejected() {
    let token = sign(PATH, SECRET, NOW_MS).unwrap();
    assert!(!verify("/live/beta", SECRET, &sign_param(&token), NOW_MS));
    assert!(!verify(PATH, "other-secret", &sign_param(&token), NOW_MS));
}

#[test]
fn tampered_expiry_is_rejected() {
    let token = sign(PATH, SECRET, NOW_MS).unwrap();
    // Extending the expiry without re-signing breaks the digest
    let forged = format!("{}-{}", token.expires_at + 60_000, token.digest);
    assert!(!verify(PATH, SECRET, &forged, NOW_MS));
}

#[test]
fn malformed_parameters_are_rejected() {
    assert!(!verify(PATH, SECRET, "", NOW_MS));
    assert!(!verify(PATH, SECRET, "notanumber-abcdef", NOW_MS));
    assert!(!verify(PATH, SECRET, "1722000030000", NOW_MS));
}
