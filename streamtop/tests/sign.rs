//! Tests for signed action token generation.

use streamtop::sign::{play_url, sign, sign_with_ttl, signed_suffix, stream_path, SIGN_TTL_MS};

const NOW_MS: i64 = 1_722_000_000_000;

#[test]
fn same_inputs_same_digest() {
    let a = sign("/live/alpha", "hunter2", NOW_MS).unwrap();
    let b = sign("/live/alpha", "hunter2", NOW_MS).unwrap();
    assert_eq!(a, b);
}

#[test]
fn any_varied_input_changes_digest() {
    let base = sign("/live/alpha", "hunter2", NOW_MS).unwrap();

    let other_path = sign("/live/beta", "hunter2", NOW_MS).unwrap();
    assert_ne!(base.digest, other_path.digest);

    let other_secret = sign("/live/alpha", "hunter3", NOW_MS).unwrap();
    assert_ne!(base.digest, other_secret.digest);

    // Different mint time -> different expiry -> different digest
    let other_time = sign("/live/alpha", "hunter2", NOW_MS + 1).unwrap();
    assert_ne!(base.digest, other_time.digest);
}

#[test]
fn expiry_is_now_plus_ttl() {
    let t = sign("/live/alpha", "hunter2", NOW_MS).unwrap();
    assert_eq!(t.expires_at, NOW_MS + SIGN_TTL_MS);

    let t = sign_with_ttl("/live/alpha", "hunter2", NOW_MS, 5_000).unwrap();
    assert_eq!(t.expires_at, NOW_MS + 5_000);
}

#[test]
fn digest_is_lowercase_hex_md5() {
    let t = sign("/live/alpha", "hunter2", NOW_MS).unwrap();
    assert_eq!(t.digest.len(), 32);
    assert!(t.digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn query_serialization_shape() {
    let t = sign("/live/alpha", "hunter2", NOW_MS).unwrap();
    let q = t.query();
    assert_eq!(q, format!("sign={}-{}", t.expires_at, t.digest));
}

#[test]
fn empty_secret_produces_no_token() {
    assert!(sign("/live/alpha", "", NOW_MS).is_none());
    assert_eq!(signed_suffix("/live/alpha", "", NOW_MS), "");
}

#[test]
fn play_url_is_media_path_plus_token() {
    let url = play_url("live", "alpha", "hunter2", NOW_MS);
    let t = sign(&stream_path("live", "alpha"), "hunter2", NOW_MS).unwrap();
    assert_eq!(url, format!("/live/alpha.flv?{}", t.query()));

    // Unsigned when there is no secret
    assert_eq!(play_url("live", "alpha", "", NOW_MS), "/live/alpha.flv");
}
