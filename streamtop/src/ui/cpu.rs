//! CPU usage sparkline.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Sparkline},
};

use crate::telemetry::MetricSeries;

pub fn draw_cpu_chart(f: &mut ratatui::Frame<'_>, area: Rect, series: &MetricSeries) {
    let title = match series.last_value() {
        Some(v) => format!("CPU Usage (now: {v:>5.1}%)"),
        None => "CPU Usage".into(),
    };
    let max_points = area.width.saturating_sub(2) as usize;
    let start = series.len().saturating_sub(max_points);
    let data: Vec<u64> = series.values().skip(start).map(|v| v.round() as u64).collect();
    let spark = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&data)
        .max(100)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(spark, area);
}
