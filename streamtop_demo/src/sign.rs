//! Server-side verification of signed action tokens.
//!
//! The console signs privileged requests with
//! `sign=<expiresAtMillis>-<md5hex(path-expires-secret)>`; we recompute the
//! digest from the resource path and the supplied expiry and compare. A
//! missing or malformed parameter, a digest mismatch, or a past expiry all
//! reject the request.

/// Check a `sign` query parameter value against `resource_path`.
pub fn verify(resource_path: &str, secret: &str, sign_param: &str, now_ms: i64) -> bool {
    let Some((expires, digest)) = sign_param.split_once('-') else {
        return false;
    };
    let Ok(expires_at) = expires.parse::<i64>() else {
        return false;
    };
    if now_ms > expires_at {
        return false;
    }
    let expected = format!(
        "{:x}",
        md5::compute(format!("{resource_path}-{expires_at}-{secret}"))
    );
    expected == digest
}
