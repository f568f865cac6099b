//! Static demo payload for `/api/server/config`. The https/relay/fission
//! groups are deliberately absent so the console's off markers get exercised.

use serde_json::{json, Value};

pub fn demo_config() -> Value {
    json!({
        "http": {
            "port": 8000,
            "mediaroot": "./media",
            "allow_origin": "*",
            "api": true
        },
        "rtmp": {
            "port": 1935,
            "chunk_size": 60000,
            "gop_cache": true,
            "ping": 30,
            "ping_timeout": 60
        },
        "trans": {
            "ffmpeg": "/usr/bin/ffmpeg",
            "tasks": [
                {
                    "app": "live",
                    "hls": true,
                    "hlsFlags": "[hls_time=2:hls_list_size=3:hls_flags=delete_segments]"
                }
            ]
        }
    })
}
