//! streamtop library: telemetry aggregation, signed action tokens, admin API
//! types and client plumbing, plus the TUI app itself.

pub mod api;
pub mod app;
pub mod profiles;
pub mod sign;
pub mod telemetry;
pub mod types;
pub mod ui;
