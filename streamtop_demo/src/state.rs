//! Shared server state: sysinfo handles, the synthetic stream registry, and
//! the admin secret privileged requests must be signed with.

use std::sync::Arc;
use std::time::Instant;

use sysinfo::{Networks, System};
use tokio::sync::Mutex;

use crate::streams::StreamRegistry;

pub type SharedSystem = Arc<Mutex<System>>;
pub type SharedNetworks = Arc<Mutex<Networks>>;
pub type SharedStreams = Arc<Mutex<StreamRegistry>>;

#[derive(Clone)]
pub struct AppState {
    pub started: Instant,

    // Persistent sysinfo handles
    pub sys: SharedSystem,
    pub nets: SharedNetworks,

    pub streams: SharedStreams,

    // None: unsigned privileged requests are allowed
    pub secret: Option<String>,
}
