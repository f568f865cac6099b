//! Connections panel: one mini sparkline per protocol, combined count in
//! the panel title.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
};

use crate::telemetry::ChartState;

pub fn draw_connections(f: &mut ratatui::Frame<'_>, area: Rect, charts: &ChartState) {
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Connections {}", charts.conn_total)),
        area,
    );

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height < 3 {
        return;
    }

    let lanes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(inner);

    let series = [
        (&charts.conn_rtmp, Color::Yellow),
        (&charts.conn_http, Color::Green),
        (&charts.conn_ws, Color::Cyan),
    ];

    for (lane, (s, color)) in lanes.iter().zip(series) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(6), Constraint::Length(16)])
            .split(*lane);

        let max_points = cols[0].width as usize;
        let start = s.len().saturating_sub(max_points);
        let data: Vec<u64> = s.values().skip(start).map(|v| v.round() as u64).collect();
        let spark = Sparkline::default()
            .data(&data)
            .style(Style::default().fg(color));
        f.render_widget(spark, cols[0]);

        let now = s.last_value().unwrap_or(0.0).round() as u64;
        let label = format!("{:<9} {now:>4}", s.name);
        let line = Line::from(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(line).right_aligned(), cols[1]);
    }
}
