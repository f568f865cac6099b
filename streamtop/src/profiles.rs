//! Connection profiles: load/save simple JSON mapping of profile name ->
//! { url, tls_ca, secret }.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/streamtop/profiles.json
//! (fallback ~/.config/streamtop/profiles.json)
//!
//! The `secret` field is the operator password privileged stream actions are
//! signed with. It is stored in plain text, like the cookie it replaces from
//! browser-based admin panels; treat the profiles file accordingly.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProfileEntry {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_ca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("streamtop")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("streamtop")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> std::io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).map_err(std::io::Error::other)?;
    fs::write(path, data)
}

/// Persist a changed secret for a named profile. Called when the operator
/// edits the password in the Streams screen; no-op for unnamed sessions.
pub fn save_secret(profile_name: &str, secret: &str) -> std::io::Result<()> {
    let mut pf = load_profiles();
    if let Some(entry) = pf.profiles.get_mut(profile_name) {
        entry.secret = if secret.is_empty() {
            None
        } else {
            Some(secret.to_string())
        };
        save_profiles(&pf)?;
    }
    Ok(())
}

pub enum ResolveProfile {
    /// Use the provided runtime inputs (not persisted). (url, tls_ca, secret)
    Direct(String, Option<String>, Option<String>),
    /// Loaded from existing profile entry (url, tls_ca, secret)
    Loaded(String, Option<String>, Option<String>),
    /// Should prompt user to select among profile names
    PromptSelect(Vec<String>),
    /// Should prompt user to create a new profile (name)
    PromptCreate(String),
    /// No profile could be resolved (e.g., missing arguments)
    None,
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
    pub tls_ca: Option<String>,
    pub secret: Option<String>,
}

impl ProfileRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> ResolveProfile {
        // Case: only profile name given -> try load
        if self.url.is_none() && self.profile_name.is_some() {
            let name = self.profile_name.unwrap();
            if let Some(entry) = pf.profiles.get(&name) {
                // A secret passed on the command line overrides the stored one
                return ResolveProfile::Loaded(
                    entry.url.clone(),
                    entry.tls_ca.clone(),
                    self.secret.or_else(|| entry.secret.clone()),
                );
            } else {
                return ResolveProfile::PromptCreate(name);
            }
        }
        // Both provided -> direct (maybe later saved by caller)
        if let Some(u) = self.url {
            return ResolveProfile::Direct(u, self.tls_ca, self.secret);
        }
        // Nothing provided -> maybe prompt select if profiles exist
        if self.url.is_none() && self.profile_name.is_none() {
            if pf.profiles.is_empty() {
                ResolveProfile::None
            } else {
                ResolveProfile::PromptSelect(pf.profiles.keys().cloned().collect())
            }
        } else {
            ResolveProfile::None
        }
    }
}
