//! Tests for the chart aggregation core: window bounds, FIFO eviction, and
//! the bandwidth derivation rules.

use chrono::{DateTime, Local, TimeZone};

use streamtop::telemetry::{bytes_to_band, ChartState, SAMPLE_WINDOW};
use streamtop::types::{ClientCounts, CpuInfo, MemInfo, NetInfo, ServerSnapshot};

const MIB: u64 = 1024 * 1024;

fn snapshot(cpu_load: f64, inbytes: u64, outbytes: u64) -> ServerSnapshot {
    ServerSnapshot {
        cpu: CpuInfo {
            load: cpu_load,
            num: None,
            model: None,
        },
        mem: MemInfo {
            free: 4 * 1024 * MIB,
            total: 16 * 1024 * MIB,
        },
        net: NetInfo { inbytes, outbytes },
        clients: ClientCounts {
            rtmp: 3,
            http: 7,
            ws: 2,
        },
        os: None,
        nodejs: None,
        version: None,
    }
}

fn tick_time(i: i64) -> DateTime<Local> {
    // Fixed 2s cadence starting at an arbitrary instant
    Local.timestamp_opt(1_700_000_000 + 2 * i, 0).unwrap()
}

#[test]
fn window_never_exceeds_capacity_and_keeps_last_values() {
    let mut state = ChartState::new();
    let ticks = SAMPLE_WINDOW + 5;
    for i in 0..ticks {
        state = state.ingest(&snapshot(i as f64, 0, 0), tick_time(i as i64));
    }

    assert_eq!(state.cpu.len(), SAMPLE_WINDOW);
    assert_eq!(state.samples, ticks as u64);

    // Contents are exactly the last SAMPLE_WINDOW ingested values, in order
    let got: Vec<f64> = state.cpu.values().collect();
    let want: Vec<f64> = (5..ticks).map(|i| i as f64).collect();
    assert_eq!(got, want);
}

#[test]
fn eviction_is_strict_fifo() {
    let mut state = ChartState::new();
    for i in 0..SAMPLE_WINDOW {
        state = state.ingest(&snapshot(i as f64, 0, 0), tick_time(i as i64));
    }
    let before: Vec<f64> = state.cpu.values().collect();

    let state = state.ingest(&snapshot(999.0, 0, 0), tick_time(SAMPLE_WINDOW as i64));
    let after: Vec<f64> = state.cpu.values().collect();

    assert_eq!(after.len(), SAMPLE_WINDOW);
    // Oldest dropped, newest appended, everything else keeps relative order
    assert_eq!(&after[..SAMPLE_WINDOW - 1], &before[1..]);
    assert_eq!(after[SAMPLE_WINDOW - 1], 999.0);
}

#[test]
fn ingest_leaves_previous_state_untouched() {
    let first = ChartState::new().ingest(&snapshot(10.0, MIB, 0), tick_time(0));
    let copy = first.clone();
    let _second = first.ingest(&snapshot(20.0, 2 * MIB, 0), tick_time(1));
    // A render surface may still hold `first`
    assert_eq!(first, copy);
}

#[test]
fn identical_counters_yield_exactly_zero_bandwidth() {
    let state = ChartState::new()
        .ingest(&snapshot(1.0, 5 * MIB, 3 * MIB), tick_time(0))
        .ingest(&snapshot(1.0, 5 * MIB, 3 * MIB), tick_time(1));

    assert_eq!(state.net_in.last_value(), Some(0.0));
    assert_eq!(state.net_out.last_value(), Some(0.0));
}

#[test]
fn one_mebibyte_delta_converts_to_four_megabits() {
    // 1 MiB over one tick: /2 divisor, *8 bits, /1024^2 -> 4
    assert_eq!(bytes_to_band(MIB as f64 / 2.0), 4.0);

    let state = ChartState::new()
        .ingest(&snapshot(1.0, MIB, 0), tick_time(0))
        .ingest(&snapshot(1.0, 2 * MIB, 0), tick_time(1));
    assert_eq!(state.net_in.last_value(), Some(4.0));
}

#[test]
fn memory_percent_rounds_to_two_decimals() {
    let mut snap = snapshot(1.0, 0, 0);
    snap.mem = MemInfo { free: 1, total: 3 };
    let state = ChartState::new().ingest(&snap, tick_time(0));
    assert_eq!(state.mem.last_value(), Some(66.67));
}

#[test]
fn connection_series_and_combined_total() {
    let state = ChartState::new().ingest(&snapshot(1.0, 0, 0), tick_time(0));
    assert_eq!(state.conn_rtmp.last_value(), Some(3.0));
    assert_eq!(state.conn_http.last_value(), Some(7.0));
    assert_eq!(state.conn_ws.last_value(), Some(2.0));
    assert_eq!(state.conn_total, 12);
}

#[test]
fn labels_are_wall_clock_times_in_insertion_order() {
    let state = ChartState::new()
        .ingest(&snapshot(1.0, 0, 0), tick_time(0))
        .ingest(&snapshot(2.0, 0, 0), tick_time(1));
    let labels: Vec<&str> = state.cpu.points.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels.len(), 2);
    assert_ne!(labels[0], labels[1]);
    // HH:MM:SS shape
    assert_eq!(labels[0].len(), 8);
    assert_eq!(labels[0].matches(':').count(), 2);
}

#[test]
fn end_to_end_synthetic_feed() {
    // 35 ticks, constant cpu load 42, inbytes growing 1 MiB per tick
    let mut state = ChartState::new();
    for i in 0..35u64 {
        state = state.ingest(&snapshot(42.0, (i + 1) * MIB, 0), tick_time(i as i64));
        if i > 0 {
            assert_eq!(state.net_in.last_value(), Some(4.0), "tick {i}");
        }
    }

    assert_eq!(state.cpu.len(), SAMPLE_WINDOW);
    assert!(state.cpu.values().all(|v| v == 42.0));
    assert_eq!(state.net_in.len(), SAMPLE_WINDOW);
    assert_eq!(state.net_in.last_value(), Some(4.0));
    assert_eq!(state.last_in_bytes, Some(35 * MIB));
    assert_eq!(state.samples, 35);
}
