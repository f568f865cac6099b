//! Minimal HTTP client helpers for the admin API.
//!
//! Fetch failures of any kind (transport, status, decode) collapse to
//! `None`/`false`; the event loop skips that poll tick and tries again on
//! the next one.

use std::time::Duration;

use crate::sign::{signed_suffix, stream_path};
use crate::types::{ServerConfig, ServerSnapshot, StreamsReply};

pub struct Api {
    base: String,
    http: reqwest::Client,
}

impl Api {
    /// `base_url` like `http://host:8000`; `tls_ca` optionally adds a PEM
    /// root certificate for https servers with a private CA.
    pub fn new(base_url: &str, tls_ca: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(5));
        if let Some(path) = tls_ca {
            let pem = std::fs::read(path)?;
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(&pem)?);
        }
        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub async fn server_snapshot(&self) -> Option<ServerSnapshot> {
        self.get_json("/api/server").await
    }

    pub async fn streams(&self) -> Option<StreamsReply> {
        self.get_json("/api/streams").await
    }

    pub async fn config(&self) -> Option<ServerConfig> {
        self.get_json("/api/server/config").await
    }

    /// Delete a stream, minting a fresh token when a secret is present.
    /// Returns whether the server accepted the request.
    pub async fn delete_stream(&self, app: &str, name: &str, secret: &str, now_ms: i64) -> bool {
        let suffix = signed_suffix(&stream_path(app, name), secret, now_ms);
        let url = format!("{}/api/streams/{app}/{name}{suffix}", self.base);
        match self.http.delete(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Option<T> {
        let url = format!("{}{}", self.base, path);
        let resp = self.http.get(&url).send().await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<T>().await.ok()
    }
}
