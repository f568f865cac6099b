//! Bounded chart histories fed from periodic server snapshots.
//!
//! The event loop owns a [`ChartState`] and replaces it wholesale each poll
//! tick via [`ChartState::ingest`]; draw code may keep a reference to the
//! previous value, so ingest never mutates in place.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::types::ServerSnapshot;

/// Points kept per series. One point lands every poll tick.
pub const SAMPLE_WINDOW: usize = 30;

/// Poll cadence of the snapshot endpoint, in seconds. The bandwidth divisor
/// below is a fixed `/2` matching this cadence, not derived from elapsed
/// time; changing one without the other changes observable chart output.
pub const POLL_INTERVAL_SECS: u64 = 2;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// Cumulative byte delta for one tick -> megabits per sample unit.
/// Zero in, exactly zero out.
pub fn bytes_to_band(bytes: f64) -> f64 {
    if bytes == 0.0 {
        return 0.0;
    }
    let bits = bytes * 8.0;
    (bits / (1024.0 * 1024.0)).round()
}

/// One chart line: a fixed-capacity FIFO of (axis label, value) pairs.
/// Labels are wall-clock time strings for axis display, never keys.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub name: String,
    pub points: VecDeque<(String, f64)>,
}

impl MetricSeries {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            points: VecDeque::with_capacity(SAMPLE_WINDOW),
        }
    }

    fn push(&mut self, label: &str, value: f64) {
        push_capped(&mut self.points, (label.to_string(), value), SAMPLE_WINDOW);
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.back().map(|(_, v)| *v)
    }

    pub fn last_label(&self) -> Option<&str> {
        self.points.back().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// All dashboard series plus the carry-over needed to derive the next tick:
/// previous cumulative byte counters and a running sample count.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    pub cpu: MetricSeries,
    pub mem: MetricSeries,
    pub conn_rtmp: MetricSeries,
    pub conn_http: MetricSeries,
    pub conn_ws: MetricSeries,
    /// Combined client count, shown in the Connections panel title.
    pub conn_total: u64,
    pub net_in: MetricSeries,
    pub net_out: MetricSeries,
    pub last_in_bytes: Option<u64>,
    pub last_out_bytes: Option<u64>,
    pub samples: u64,
}

impl ChartState {
    pub fn new() -> Self {
        Self {
            cpu: MetricSeries::new("CPU Usage"),
            mem: MetricSeries::new("Memory Usage"),
            conn_rtmp: MetricSeries::new("Rtmp"),
            conn_http: MetricSeries::new("Http"),
            conn_ws: MetricSeries::new("WebSocket"),
            conn_total: 0,
            net_in: MetricSeries::new("Input"),
            net_out: MetricSeries::new("Output"),
            last_in_bytes: None,
            last_out_bytes: None,
            samples: 0,
        }
    }

    /// Fold one snapshot into a fresh state. Pure: no I/O, deterministic
    /// given its inputs, `self` untouched. Assumes a validated snapshot;
    /// a failed poll should be skipped by the caller, not passed in.
    pub fn ingest(&self, snap: &ServerSnapshot, now: DateTime<Local>) -> ChartState {
        let mut next = self.clone();
        let label = now.format("%H:%M:%S").to_string();

        next.cpu.push(&label, snap.cpu.load);

        let mem_pct = if snap.mem.total > 0 {
            let pct = 100.0 - 100.0 * snap.mem.free as f64 / snap.mem.total as f64;
            (pct * 100.0).round() / 100.0
        } else {
            0.0
        };
        next.mem.push(&label, mem_pct);

        next.conn_rtmp.push(&label, snap.clients.rtmp as f64);
        next.conn_http.push(&label, snap.clients.http as f64);
        next.conn_ws.push(&label, snap.clients.ws as f64);
        next.conn_total = snap.clients.rtmp + snap.clients.http + snap.clients.ws;

        // Cumulative counters diffed per tick. The /2 divisor stands in for
        // the 2s poll interval and applies uniformly, first tick included
        // (previous counter taken as 0).
        let in_delta = snap.net.inbytes.saturating_sub(self.last_in_bytes.unwrap_or(0));
        let out_delta = snap.net.outbytes.saturating_sub(self.last_out_bytes.unwrap_or(0));
        next.net_in.push(&label, bytes_to_band(in_delta as f64 / 2.0));
        next.net_out.push(&label, bytes_to_band(out_delta as f64 / 2.0));

        next.last_in_bytes = Some(snap.net.inbytes);
        next.last_out_bytes = Some(snap.net.outbytes);
        next.samples = self.samples + 1;
        next
    }
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new()
    }
}
