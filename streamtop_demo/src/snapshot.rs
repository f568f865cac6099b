//! Builds the `/api/server` payload from live sysinfo readings plus the
//! synthetic stream registry.

use chrono::Utc;
use serde::Serialize;
use sysinfo::System;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OsPayload {
    pub arch: String,
    pub platform: String,
    pub release: String,
}

#[derive(Debug, Serialize)]
pub struct CpuPayload {
    pub load: f64,
    pub num: usize,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct MemPayload {
    pub free: u64,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct NetPayload {
    // cumulative totals; the console diffs consecutive polls to get rates
    pub inbytes: u64,
    pub outbytes: u64,
}

#[derive(Debug, Serialize)]
pub struct ClientsPayload {
    pub rtmp: u64,
    pub http: u64,
    pub ws: u64,
}

#[derive(Debug, Serialize)]
pub struct RuntimePayload {
    pub uptime: f64,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct SnapshotPayload {
    pub os: OsPayload,
    pub cpu: CpuPayload,
    pub mem: MemPayload,
    pub net: NetPayload,
    pub clients: ClientsPayload,
    pub nodejs: RuntimePayload,
    pub version: String,
}

pub async fn collect_snapshot(state: &AppState) -> SnapshotPayload {
    let now = Utc::now();

    let (load, num, model, mem_free, mem_total) = {
        let mut sys = state.sys.lock().await;
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        let model = sys
            .cpus()
            .first()
            .map(|c| c.brand().to_string())
            .unwrap_or_else(|| "unknown".into());
        (
            (sys.global_cpu_usage() as f64 * 10.0).round() / 10.0,
            sys.cpus().len(),
            model,
            sys.free_memory(),
            sys.total_memory(),
        )
    };

    // Host interface totals plus synthetic media traffic, so the counters
    // keep moving even when the demo host is idle.
    let (iface_rx, iface_tx) = {
        let mut nets = state.nets.lock().await;
        nets.refresh();
        let rx = nets.iter().map(|(_, d)| d.total_received()).sum::<u64>();
        let tx = nets.iter().map(|(_, d)| d.total_transmitted()).sum::<u64>();
        (rx, tx)
    };

    let ((rtmp, http, ws), (media_in, media_out)) = {
        let streams = state.streams.lock().await;
        (streams.client_counts(), streams.media_totals(now))
    };

    SnapshotPayload {
        os: OsPayload {
            arch: System::cpu_arch().unwrap_or_else(|| std::env::consts::ARCH.into()),
            platform: System::name().unwrap_or_else(|| std::env::consts::OS.into()),
            release: System::os_version().unwrap_or_else(|| "unknown".into()),
        },
        cpu: CpuPayload { load, num, model },
        mem: MemPayload {
            free: mem_free,
            total: mem_total,
        },
        net: NetPayload {
            inbytes: iface_rx + media_in,
            outbytes: iface_tx + media_out,
        },
        clients: ClientsPayload { rtmp, http, ws },
        nodejs: RuntimePayload {
            uptime: state.started.elapsed().as_secs_f64(),
            version: format!("streamtop-demo/{}", env!("CARGO_PKG_VERSION")),
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}
