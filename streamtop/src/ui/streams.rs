//! Streams screen: secret entry, publisher table, per-stream clients popup.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

use crate::types::StreamRow;
use crate::ui::util::{bytes_to_size, secs_dhms, truncate_middle};

pub struct StreamsView<'a> {
    pub rows: &'a [StreamRow],
    pub selected: usize,
    pub secret: &'a str,
    pub editing: bool,
    pub edit_buf: &'a str,
}

const COLS: [Constraint; 12] = [
    Constraint::Length(8),  // App
    Constraint::Min(10),    // Name
    Constraint::Length(10), // ID
    Constraint::Length(15), // IP
    Constraint::Length(10), // Audio
    Constraint::Length(6),  // Freq
    Constraint::Length(4),  // Chan
    Constraint::Length(10), // Video
    Constraint::Length(9),  // Size
    Constraint::Length(4),  // FPS
    Constraint::Length(9),  // Time
    Constraint::Length(7),  // Clients
];

pub fn draw_streams(f: &mut ratatui::Frame<'_>, area: Rect, view: &StreamsView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    draw_secret_field(f, chunks[0], view);
    draw_table(f, chunks[1], view);
}

fn draw_secret_field(f: &mut ratatui::Frame<'_>, area: Rect, view: &StreamsView<'_>) {
    // Mask the stored secret; show it in the clear only while editing.
    let (text, style) = if view.editing {
        (
            format!("{}_", view.edit_buf),
            Style::default().fg(Color::Yellow),
        )
    } else if view.secret.is_empty() {
        (
            "(none — privileged actions go unsigned)".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        ("*".repeat(view.secret.len()), Style::default())
    };
    let title = if view.editing {
        "Secret (enter: save, esc: cancel)"
    } else {
        "Secret ('s' to edit)"
    };
    let p = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(p, area);
}

fn draw_table(f: &mut ratatui::Frame<'_>, area: Rect, view: &StreamsView<'_>) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Streams ({}) — enter: clients, p: play url, d: delete",
        view.rows.len()
    ));
    f.render_widget(block, area);

    let content = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if content.height < 2 {
        return;
    }

    let header = Row::new(vec![
        "App", "Name", "ID", "IP", "Audio", "Freq", "Chan", "Video", "Size", "FPS", "Time",
        "Clients",
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    // Keep the selection on screen.
    let viewport = content.height.saturating_sub(1) as usize;
    let offset = view.selected.saturating_sub(viewport.saturating_sub(1));

    let rows_iter = view.rows.iter().enumerate().skip(offset).map(|(i, r)| {
        let style = if i == view.selected {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(r.app.clone()),
            Cell::from(r.name.clone()),
            Cell::from(truncate_middle(&r.id, 10)),
            Cell::from(r.ip.clone()),
            Cell::from(r.audio_codec.clone()),
            Cell::from(r.audio_freq.clone()),
            Cell::from(r.audio_chan.clone()),
            Cell::from(r.video_codec.clone()),
            Cell::from(r.video_size.clone()),
            Cell::from(r.video_fps.clone()),
            Cell::from(secs_dhms(r.uptime_secs)),
            Cell::from(r.clients.len().to_string()),
        ])
        .style(style)
    });

    let table = Table::new(rows_iter, COLS.to_vec())
        .header(header)
        .column_spacing(1);
    f.render_widget(table, content);
}

/// Centered popup listing the subscribers of one stream.
pub fn draw_clients_popup(f: &mut ratatui::Frame<'_>, area: Rect, row: &StreamRow) {
    let popup = centered_rect(area, 70, 60);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Clients — /{}/{} (esc closes)", row.app, row.name));
    f.render_widget(block, popup);

    let content = Rect {
        x: popup.x + 1,
        y: popup.y + 1,
        width: popup.width.saturating_sub(2),
        height: popup.height.saturating_sub(2),
    };
    if content.height < 2 {
        return;
    }

    let header = Row::new(vec!["ID", "Connection", "Data", "Connected"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let rows_iter = row.clients.iter().map(|c| {
        Row::new(vec![
            Cell::from(truncate_middle(&c.client_id, 12)),
            Cell::from(format!("{} @ {}", c.protocol, c.ip)),
            Cell::from(bytes_to_size(c.bytes)),
            Cell::from(c.connect_created.clone()),
        ])
    });
    let table = Table::new(
        rows_iter,
        [
            Constraint::Length(14),
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(26),
        ]
        .to_vec(),
    )
    .header(header)
    .column_spacing(1);
    f.render_widget(table, content);
}

fn centered_rect(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
    let w = area.width * pct_x / 100;
    let h = area.height * pct_y / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}
