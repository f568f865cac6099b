//! Synthetic stream registry: a couple of demo publishers whose subscriber
//! byte counters grow over wall-clock time, shaped like the real listing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct DemoPublisher {
    pub client_id: String,
    pub ip: String,
    pub created: DateTime<Utc>,
    pub audio_codec: &'static str,
    pub audio_profile: &'static str,
    pub samplerate: u32,
    pub channels: u32,
    pub video_codec: &'static str,
    pub video_profile: &'static str,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    // Synthetic media rate the byte counters grow at
    pub bitrate_bps: u64,
}

#[derive(Debug, Clone)]
pub struct DemoSubscriber {
    pub client_id: String,
    pub ip: String,
    pub protocol: &'static str,
    pub created: DateTime<Utc>,
    pub bitrate_bps: u64,
}

#[derive(Debug, Clone)]
pub struct DemoStream {
    pub publisher: DemoPublisher,
    pub subscribers: Vec<DemoSubscriber>,
}

#[derive(Debug, Default)]
pub struct StreamRegistry {
    pub apps: BTreeMap<String, BTreeMap<String, DemoStream>>,
}

// ---------- Listing payload (mirrors the admin API JSON) ----------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPayload {
    pub codec: String,
    pub profile: String,
    pub samplerate: u32,
    pub channels: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPayload {
    pub codec: String,
    pub profile: String,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherPayload {
    pub app: String,
    pub stream: String,
    pub client_id: String,
    pub connect_created: String,
    pub bytes: u64,
    pub ip: String,
    pub audio: AudioPayload,
    pub video: VideoPayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberPayload {
    pub app: String,
    pub stream: String,
    pub client_id: String,
    pub connect_created: String,
    pub bytes: u64,
    pub ip: String,
    pub protocol: String,
}

#[derive(Debug, Serialize)]
pub struct EntryPayload {
    pub publisher: Option<PublisherPayload>,
    pub subscribers: Vec<SubscriberPayload>,
}

pub type ListingPayload = BTreeMap<String, BTreeMap<String, EntryPayload>>;

fn bytes_since(created: DateTime<Utc>, now: DateTime<Utc>, bitrate_bps: u64) -> u64 {
    let secs = (now.timestamp() - created.timestamp()).max(0) as u64;
    secs * bitrate_bps / 8
}

impl StreamRegistry {
    /// Fixed demo content: two live publishers with a handful of watchers.
    pub fn seed(now: DateTime<Utc>) -> Self {
        let mut rng = rand::thread_rng();
        let mut client_id = move || -> String {
            const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
            (0..8)
                .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
                .collect()
        };

        let alpha = DemoStream {
            publisher: DemoPublisher {
                client_id: client_id(),
                ip: "203.0.113.10".into(),
                created: now,
                audio_codec: "AAC",
                audio_profile: "LC",
                samplerate: 48000,
                channels: 2,
                video_codec: "H264",
                video_profile: "High",
                width: 1920,
                height: 1080,
                fps: 30.0,
                bitrate_bps: 4_000_000,
            },
            subscribers: vec![
                DemoSubscriber {
                    client_id: client_id(),
                    ip: "198.51.100.21".into(),
                    protocol: "http",
                    created: now,
                    bitrate_bps: 4_000_000,
                },
                DemoSubscriber {
                    client_id: client_id(),
                    ip: "198.51.100.22".into(),
                    protocol: "ws",
                    created: now,
                    bitrate_bps: 4_000_000,
                },
            ],
        };
        let beta = DemoStream {
            publisher: DemoPublisher {
                client_id: client_id(),
                ip: "203.0.113.11".into(),
                created: now,
                audio_codec: "AAC",
                audio_profile: "LC",
                samplerate: 44100,
                channels: 2,
                video_codec: "H264",
                video_profile: "Main",
                width: 1280,
                height: 720,
                fps: 25.0,
                bitrate_bps: 2_000_000,
            },
            subscribers: vec![DemoSubscriber {
                client_id: client_id(),
                ip: "198.51.100.23".into(),
                protocol: "rtmp",
                created: now,
                bitrate_bps: 2_000_000,
            }],
        };

        let mut live = BTreeMap::new();
        live.insert("alpha".to_string(), alpha);
        live.insert("beta".to_string(), beta);
        let mut apps = BTreeMap::new();
        apps.insert("live".to_string(), live);
        Self { apps }
    }

    pub fn contains(&self, app: &str, name: &str) -> bool {
        self.apps.get(app).is_some_and(|s| s.contains_key(name))
    }

    /// Drop a stream; empty apps disappear from the listing. Returns whether
    /// anything was removed.
    pub fn remove(&mut self, app: &str, name: &str) -> bool {
        let Some(streams) = self.apps.get_mut(app) else {
            return false;
        };
        let removed = streams.remove(name).is_some();
        if streams.is_empty() {
            self.apps.remove(app);
        }
        removed
    }

    /// (rtmp, http, ws) connection counts: publishers ingest over rtmp,
    /// subscribers carry their own protocol.
    pub fn client_counts(&self) -> (u64, u64, u64) {
        let mut rtmp = 0;
        let mut http = 0;
        let mut ws = 0;
        for streams in self.apps.values() {
            for s in streams.values() {
                rtmp += 1;
                for sub in &s.subscribers {
                    match sub.protocol {
                        "rtmp" => rtmp += 1,
                        "ws" => ws += 1,
                        _ => http += 1,
                    }
                }
            }
        }
        (rtmp, http, ws)
    }

    pub fn listing(&self, now: DateTime<Utc>) -> ListingPayload {
        self.apps
            .iter()
            .map(|(app, streams)| {
                let entries = streams
                    .iter()
                    .map(|(name, s)| {
                        let p = &s.publisher;
                        let publisher = PublisherPayload {
                            app: app.clone(),
                            stream: name.clone(),
                            client_id: p.client_id.clone(),
                            connect_created: p.created.to_rfc3339(),
                            bytes: bytes_since(p.created, now, p.bitrate_bps),
                            ip: p.ip.clone(),
                            audio: AudioPayload {
                                codec: p.audio_codec.into(),
                                profile: p.audio_profile.into(),
                                samplerate: p.samplerate,
                                channels: p.channels,
                            },
                            video: VideoPayload {
                                codec: p.video_codec.into(),
                                profile: p.video_profile.into(),
                                width: p.width,
                                height: p.height,
                                fps: p.fps,
                            },
                        };
                        let subscribers = s
                            .subscribers
                            .iter()
                            .map(|sub| SubscriberPayload {
                                app: app.clone(),
                                stream: name.clone(),
                                client_id: sub.client_id.clone(),
                                connect_created: sub.created.to_rfc3339(),
                                bytes: bytes_since(sub.created, now, sub.bitrate_bps),
                                ip: sub.ip.clone(),
                                protocol: sub.protocol.into(),
                            })
                            .collect();
                        (
                            name.clone(),
                            EntryPayload {
                                publisher: Some(publisher),
                                subscribers,
                            },
                        )
                    })
                    .collect();
                (app.clone(), entries)
            })
            .collect()
    }

    /// Total bytes pushed/pulled so far, folded into the snapshot's
    /// cumulative net counters on top of the host interface totals.
    pub fn media_totals(&self, now: DateTime<Utc>) -> (u64, u64) {
        let mut inbytes = 0;
        let mut outbytes = 0;
        for streams in self.apps.values() {
            for s in streams.values() {
                inbytes += bytes_since(s.publisher.created, now, s.publisher.bitrate_bps);
                for sub in &s.subscribers {
                    outbytes += bytes_since(sub.created, now, sub.bitrate_bps);
                }
            }
        }
        (inbytes, outbytes)
    }
}
