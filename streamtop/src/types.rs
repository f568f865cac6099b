//! Types that mirror the media server's admin API JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

// ---------- /api/server ----------

#[derive(Debug, Deserialize, Clone)]
pub struct OsInfo {
    pub arch: String,
    pub platform: String,
    pub release: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CpuInfo {
    /// Instantaneous load, 0..=100.
    pub load: f64,
    pub num: Option<u32>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MemInfo {
    pub free: u64,
    // Upstream servers spell this "totle"; accept both.
    #[serde(alias = "totle")]
    pub total: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientCounts {
    pub rtmp: u64,
    pub http: u64,
    pub ws: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetInfo {
    // cumulative totals; the client diffs consecutive polls to get rates
    pub inbytes: u64,
    pub outbytes: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RuntimeInfo {
    pub uptime: f64,
    pub version: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSnapshot {
    pub cpu: CpuInfo,
    pub mem: MemInfo,
    pub net: NetInfo,
    pub clients: ClientCounts,
    pub os: Option<OsInfo>,
    pub nodejs: Option<RuntimeInfo>,
    pub version: Option<String>,
}

// ---------- /api/streams ----------

/// app name -> stream name -> publisher/subscribers.
pub type StreamsReply = BTreeMap<String, BTreeMap<String, StreamEntry>>;

#[derive(Debug, Deserialize, Clone)]
pub struct StreamEntry {
    pub publisher: Option<Publisher>,
    #[serde(default)]
    pub subscribers: Vec<Subscriber>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub client_id: String,
    pub ip: String,
    pub connect_created: String,
    pub audio: Option<AudioTrack>,
    pub video: Option<VideoTrack>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AudioTrack {
    pub codec: String,
    pub profile: Option<String>,
    pub samplerate: Option<u32>,
    pub channels: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VideoTrack {
    pub codec: String,
    pub profile: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub app: String,
    pub stream: String,
    pub client_id: String,
    pub ip: String,
    pub protocol: String,
    pub bytes: u64,
    pub connect_created: String,
}

/// One row of the Streams table: a live publisher with display-ready
/// codec/resolution columns and its current subscribers.
#[derive(Debug, Clone)]
pub struct StreamRow {
    pub app: String,
    pub name: String,
    pub id: String,
    pub ip: String,
    pub audio_codec: String,
    pub audio_freq: String,
    pub audio_chan: String,
    pub video_codec: String,
    pub video_size: String,
    pub video_fps: String,
    pub uptime_secs: i64,
    pub clients: Vec<Subscriber>,
}

/// Flatten the nested app/stream map into table rows, publishers only.
/// Iteration order of the map is the row order (BTreeMap: sorted by name).
pub fn flatten_streams(reply: &StreamsReply, now: DateTime<Utc>) -> Vec<StreamRow> {
    let mut rows = Vec::new();
    for (app, streams) in reply {
        for (name, entry) in streams {
            let Some(publisher) = &entry.publisher else {
                continue;
            };
            let uptime_secs = DateTime::parse_from_rfc3339(&publisher.connect_created)
                .map(|t| (now.timestamp() - t.timestamp()).max(0))
                .unwrap_or(0);
            let (audio_codec, audio_freq, audio_chan) = match &publisher.audio {
                Some(a) => (
                    match &a.profile {
                        Some(p) => format!("{} {}", a.codec, p),
                        None => a.codec.clone(),
                    },
                    a.samplerate.map(|s| s.to_string()).unwrap_or_default(),
                    a.channels.map(|c| c.to_string()).unwrap_or_default(),
                ),
                None => (String::new(), String::new(), String::new()),
            };
            let (video_codec, video_size, video_fps) = match &publisher.video {
                Some(v) => (
                    match &v.profile {
                        Some(p) => format!("{} {}", v.codec, p),
                        None => v.codec.clone(),
                    },
                    match (v.width, v.height) {
                        (Some(w), Some(h)) => format!("{w}x{h}"),
                        _ => String::new(),
                    },
                    v.fps.map(|f| (f.floor() as i64).to_string()).unwrap_or_default(),
                ),
                None => (String::new(), String::new(), String::new()),
            };
            rows.push(StreamRow {
                app: app.clone(),
                name: name.clone(),
                id: publisher.client_id.clone(),
                ip: publisher.ip.clone(),
                audio_codec,
                audio_freq,
                audio_chan,
                video_codec,
                video_size,
                video_fps,
                uptime_secs,
                clients: entry.subscribers.clone(),
            });
        }
    }
    rows
}

// ---------- /api/server/config ----------

/// Read-only server configuration, grouped by subsystem. An absent group
/// means the subsystem is disabled; bodies are shown verbatim.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServerConfig {
    pub http: Option<serde_json::Value>,
    pub https: Option<serde_json::Value>,
    pub rtmp: Option<serde_json::Value>,
    pub trans: Option<serde_json::Value>,
    pub relay: Option<serde_json::Value>,
    pub fission: Option<serde_json::Value>,
}
