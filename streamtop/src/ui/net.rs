//! Network bandwidth sparklines (input/output, Mbps).

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Sparkline},
};

use crate::telemetry::MetricSeries;

pub fn draw_net_spark(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    series: &MetricSeries,
    color: Color,
) {
    let now = series.last_value().unwrap_or(0.0).round() as u64;
    let title = format!("{} (Mbps) — now: {now}", series.name);
    let max_points = area.width.saturating_sub(2) as usize;
    let start = series.len().saturating_sub(max_points);
    let data: Vec<u64> = series.values().skip(start).map(|v| v.round() as u64).collect();

    let spark = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&data)
        .style(Style::default().fg(color));
    f.render_widget(spark, area);
}
