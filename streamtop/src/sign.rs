//! Short-lived signed tokens for privileged stream operations.
//!
//! The server and this console share a secret; a token proves possession of
//! it for a 30s window without any server-issued session. The digest is md5
//! over `path-expires-secret` — an access-control convenience matching the
//! server's check, not a tamper-proof MAC.

/// Validity window added to the mint time, in epoch milliseconds.
pub const SIGN_TTL_MS: i64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionToken {
    /// Epoch millis after which the server rejects the token.
    pub expires_at: i64,
    /// Lowercase hex md5 of `resource_path + "-" + expires_at + "-" + secret`.
    pub digest: String,
}

impl ActionToken {
    /// Query-string form, `sign=<expiresAt>-<digest>`. The expiry travels
    /// with the digest so the server can recompute the same hash.
    pub fn query(&self) -> String {
        format!("sign={}-{}", self.expires_at, self.digest)
    }
}

/// Mint a token for `resource_path`, valid for [`SIGN_TTL_MS`] from `now_ms`.
/// An empty secret yields `None`: the action goes out unsigned and the
/// server decides whether to allow it.
pub fn sign(resource_path: &str, secret: &str, now_ms: i64) -> Option<ActionToken> {
    sign_with_ttl(resource_path, secret, now_ms, SIGN_TTL_MS)
}

pub fn sign_with_ttl(
    resource_path: &str,
    secret: &str,
    now_ms: i64,
    ttl_ms: i64,
) -> Option<ActionToken> {
    if secret.is_empty() {
        return None;
    }
    let expires_at = now_ms + ttl_ms;
    let digest = format!(
        "{:x}",
        md5::compute(format!("{resource_path}-{expires_at}-{secret}"))
    );
    Some(ActionToken { expires_at, digest })
}

/// `"?sign=…"` suffix for `resource_path`, or `""` when there is no secret.
pub fn signed_suffix(resource_path: &str, secret: &str, now_ms: i64) -> String {
    sign(resource_path, secret, now_ms)
        .map(|t| format!("?{}", t.query()))
        .unwrap_or_default()
}

/// Logical stream path covered by the digest, for playback and deletion alike.
pub fn stream_path(app: &str, name: &str) -> String {
    format!("/{app}/{name}")
}

/// Playback URL for a stream: the media path plus a fresh token.
pub fn play_url(app: &str, name: &str, secret: &str, now_ms: i64) -> String {
    let suffix = signed_suffix(&stream_path(app, name), secret, now_ms);
    format!("/{app}/{name}.flv{suffix}")
}
