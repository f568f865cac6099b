//! Read-only config screen: one panel per server subsystem.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::types::ServerConfig;

pub fn draw_config(f: &mut ratatui::Frame<'_>, area: Rect, cfg: Option<&ServerConfig>) {
    let Some(cfg) = cfg else {
        let p = Paragraph::new("fetching config... ('r' retries)")
            .block(Block::default().borders(Borders::ALL).title("Config"));
        f.render_widget(p, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    draw_section(f, top[0], "HTTP", cfg.http.as_ref());
    draw_section(f, top[1], "HTTPS", cfg.https.as_ref());

    draw_section(f, rows[1], "RTMP", cfg.rtmp.as_ref());

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[2]);
    draw_section(f, bottom[0], "Trans", cfg.trans.as_ref());
    draw_section(f, bottom[1], "Relay", cfg.relay.as_ref());
    draw_section(f, bottom[2], "Fission", cfg.fission.as_ref());
}

fn draw_section(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    name: &str,
    value: Option<&serde_json::Value>,
) {
    let (marker, style, body) = match value {
        Some(v) => (
            "on",
            Style::default().fg(Color::Green),
            serde_json::to_string_pretty(v).unwrap_or_else(|_| "{}".into()),
        ),
        None => ("off", Style::default().fg(Color::DarkGray), String::new()),
    };
    let p = Paragraph::new(body).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{name} Config [{marker}]")),
    );
    f.render_widget(p, area);
}
