//! Server info screen: static facts from the latest snapshot.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::types::ServerSnapshot;
use crate::ui::util::{bytes_to_size, secs_dhms};

pub fn draw_profile(f: &mut ratatui::Frame<'_>, area: Rect, snap: Option<&ServerSnapshot>) {
    let block = Block::default().borders(Borders::ALL).title("Server Info");
    f.render_widget(block, area);

    let content = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    let Some(s) = snap else {
        f.render_widget(Paragraph::new("waiting for first snapshot..."), content);
        return;
    };

    let mut rows: Vec<(String, String)> = Vec::new();
    if let Some(os) = &s.os {
        rows.push((
            "OS".into(),
            format!("{}_{}_{}", os.arch, os.platform, os.release),
        ));
    }
    let cpu = match (&s.cpu.num, &s.cpu.model) {
        (Some(n), Some(m)) => format!("{n} x {m}"),
        (None, Some(m)) => m.clone(),
        _ => format!("load {:.1}%", s.cpu.load),
    };
    rows.push(("CPU".into(), cpu));
    rows.push(("Memory".into(), bytes_to_size(s.mem.total)));
    if let Some(rt) = &s.nodejs {
        rows.push(("Node.js".into(), rt.version.clone()));
        rows.push(("Uptime".into(), secs_dhms(rt.uptime as i64)));
    }
    if let Some(v) = &s.version {
        rows.push(("Server Version".into(), v.clone()));
    }
    rows.push((
        "Console Version".into(),
        env!("CARGO_PKG_VERSION").to_string(),
    ));

    let rows_iter = rows.into_iter().map(|(k, v)| {
        Row::new(vec![
            Cell::from(k).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::from(v),
        ])
    });
    let table = Table::new(
        rows_iter,
        [Constraint::Length(20), Constraint::Min(20)].to_vec(),
    )
    .column_spacing(1);
    f.render_widget(table, content);
}
