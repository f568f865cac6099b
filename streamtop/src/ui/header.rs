//! Top header: screen tabs plus the connected host.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Tabs},
};

use crate::app::Screen;

const TITLES: [&str; 4] = ["1:Dashboard", "2:Streams", "3:Profile", "4:Config"];

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, screen: Screen, host: &str) {
    let tabs = Tabs::new(TITLES.to_vec())
        .select(screen as usize)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .title(format!("streamtop — {host}  (press 'q' to quit)")),
        );
    f.render_widget(tabs, area);
}
