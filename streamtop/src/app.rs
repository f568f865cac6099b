//! App state and main loop: input handling, polling the admin API, threading
//! chart state through the aggregator, and drawing.

use std::{
    io,
    time::{Duration, Instant},
};

use chrono::{Local, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Color,
    Terminal,
};
use tokio::time::sleep;

use crate::api::Api;
use crate::profiles::save_secret;
use crate::sign::play_url;
use crate::telemetry::ChartState;
use crate::types::{flatten_streams, ServerConfig, ServerSnapshot, StreamRow};
use crate::ui::{
    config::draw_config,
    conn::draw_connections,
    cpu::draw_cpu_chart,
    header::draw_header,
    mem::draw_mem_chart,
    net::draw_net_spark,
    profile::draw_profile,
    streams::{draw_clients_popup, draw_streams, StreamsView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Streams,
    Profile,
    Config,
}

pub struct App {
    api: Api,
    // Named profile the secret is persisted to, if any
    profile_name: Option<String>,

    screen: Screen,

    // Chart state, replaced wholesale each snapshot tick
    charts: ChartState,
    last_snapshot: Option<ServerSnapshot>,

    streams: Vec<StreamRow>,
    selected: usize,
    show_clients: bool,

    config: Option<ServerConfig>,
    config_attempted: bool,

    secret: String,
    editing_secret: bool,
    edit_buf: String,

    status: Option<String>,
    should_quit: bool,

    last_snapshot_poll: Instant,
    last_streams_poll: Instant,
    snapshot_interval: Duration,
    streams_interval: Duration,
}

impl App {
    pub fn new(api: Api, profile_name: Option<String>, secret: String) -> Self {
        let past = Instant::now()
            .checked_sub(Duration::from_secs(60))
            .unwrap_or_else(Instant::now); // trigger immediately on first loop
        Self {
            api,
            profile_name,
            screen: Screen::Dashboard,
            charts: ChartState::new(),
            last_snapshot: None,
            streams: Vec::new(),
            selected: 0,
            show_clients: false,
            config: None,
            config_attempted: false,
            secret,
            editing_secret: false,
            edit_buf: String::new(),
            status: None,
            should_quit: false,
            last_snapshot_poll: past,
            last_streams_poll: past,
            snapshot_interval: Duration::from_secs(crate::telemetry::POLL_INTERVAL_SECS),
            streams_interval: Duration::from_secs(5),
        }
    }

    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        let backend = terminal.backend_mut();
        execute!(backend, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    self.on_key(k).await;
                }
            }
            if self.should_quit {
                break;
            }

            // Fetch and update
            if self.last_snapshot_poll.elapsed() >= self.snapshot_interval {
                if let Some(snap) = self.api.server_snapshot().await {
                    // The previous state stays untouched; draw code may still
                    // borrow series from it.
                    self.charts = self.charts.ingest(&snap, Local::now());
                    self.last_snapshot = Some(snap);
                }
                self.last_snapshot_poll = Instant::now();
            }

            if self.screen == Screen::Streams
                && self.last_streams_poll.elapsed() >= self.streams_interval
            {
                self.refresh_streams().await;
                self.last_streams_poll = Instant::now();
            }

            if self.screen == Screen::Config && self.config.is_none() && !self.config_attempted {
                self.config = self.api.config().await;
                self.config_attempted = true;
            }

            // Draw
            terminal.draw(|f| self.draw(f))?;

            // Tick rate (input stays responsive; fetch cadence gated above)
            sleep(Duration::from_millis(100)).await;
        }

        Ok(())
    }

    async fn refresh_streams(&mut self) {
        if let Some(reply) = self.api.streams().await {
            self.streams = flatten_streams(&reply, Utc::now());
            if self.selected >= self.streams.len() {
                self.selected = self.streams.len().saturating_sub(1);
            }
        }
    }

    async fn on_key(&mut self, k: KeyEvent) {
        if self.editing_secret {
            self.on_secret_key(k);
            return;
        }
        if self.show_clients {
            if matches!(
                k.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
            ) {
                self.show_clients = false;
            }
            return;
        }

        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('1') => self.switch_to(Screen::Dashboard),
            KeyCode::Char('2') => self.switch_to(Screen::Streams),
            KeyCode::Char('3') => self.switch_to(Screen::Profile),
            KeyCode::Char('4') => self.switch_to(Screen::Config),
            KeyCode::Tab => {
                let next = match self.screen {
                    Screen::Dashboard => Screen::Streams,
                    Screen::Streams => Screen::Profile,
                    Screen::Profile => Screen::Config,
                    Screen::Config => Screen::Dashboard,
                };
                self.switch_to(next);
            }
            KeyCode::Char('r') => {
                // Force refetch of everything on next loop turn
                let past = Instant::now()
                    .checked_sub(Duration::from_secs(60))
                    .unwrap_or_else(Instant::now);
                self.last_snapshot_poll = past;
                self.last_streams_poll = past;
                self.config = None;
                self.config_attempted = false;
                self.status = Some("refreshing".into());
            }
            _ if self.screen == Screen::Streams => self.on_streams_key(k).await,
            _ => {}
        }
    }

    fn on_secret_key(&mut self, k: KeyEvent) {
        match k.code {
            KeyCode::Enter => {
                self.secret = self.edit_buf.clone();
                self.editing_secret = false;
                if let Some(name) = &self.profile_name {
                    match save_secret(name, &self.secret) {
                        Ok(()) => self.status = Some(format!("secret saved to profile '{name}'")),
                        Err(e) => self.status = Some(format!("secret not persisted: {e}")),
                    }
                } else {
                    self.status = Some("secret set for this session".into());
                }
            }
            KeyCode::Esc => {
                self.editing_secret = false;
                self.edit_buf.clear();
            }
            KeyCode::Backspace => {
                self.edit_buf.pop();
            }
            KeyCode::Char(c) => self.edit_buf.push(c),
            _ => {}
        }
    }

    async fn on_streams_key(&mut self, k: KeyEvent) {
        match k.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.streams.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => {
                if !self.streams.is_empty() {
                    self.show_clients = true;
                }
            }
            KeyCode::Char('s') => {
                self.editing_secret = true;
                self.edit_buf = self.secret.clone();
            }
            KeyCode::Char('p') => {
                if let Some(row) = self.streams.get(self.selected) {
                    // Token minted at the moment of the action; a stale one
                    // just fails server-side verification.
                    let url = play_url(
                        &row.app,
                        &row.name,
                        &self.secret,
                        Utc::now().timestamp_millis(),
                    );
                    self.status = Some(format!("play: {}{}", self.api.base(), url));
                }
            }
            KeyCode::Char('d') => {
                if let Some(row) = self.streams.get(self.selected).cloned() {
                    let ok = self
                        .api
                        .delete_stream(
                            &row.app,
                            &row.name,
                            &self.secret,
                            Utc::now().timestamp_millis(),
                        )
                        .await;
                    if ok {
                        self.status = Some(format!("deleted /{}/{}", row.app, row.name));
                        self.refresh_streams().await;
                    } else {
                        self.status = Some(format!("delete of /{}/{} rejected", row.app, row.name));
                    }
                }
            }
            _ => {}
        }
    }

    fn switch_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.status = None;
        if screen == Screen::Streams {
            // Fetch right away instead of waiting out the interval
            self.last_streams_poll = Instant::now()
                .checked_sub(self.streams_interval)
                .unwrap_or_else(Instant::now);
        }
        if screen == Screen::Config {
            self.config_attempted = false;
        }
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // header/tabs
                Constraint::Min(6),    // active screen
                Constraint::Length(1), // status line
            ])
            .split(area);

        draw_header(f, rows[0], self.screen, self.api.base());

        match self.screen {
            Screen::Dashboard => self.draw_dashboard(f, rows[1]),
            Screen::Streams => {
                let view = StreamsView {
                    rows: &self.streams,
                    selected: self.selected,
                    secret: &self.secret,
                    editing: self.editing_secret,
                    edit_buf: &self.edit_buf,
                };
                draw_streams(f, rows[1], &view);
                if self.show_clients {
                    if let Some(row) = self.streams.get(self.selected) {
                        draw_clients_popup(f, rows[1], row);
                    }
                }
            }
            Screen::Profile => draw_profile(f, rows[1], self.last_snapshot.as_ref()),
            Screen::Config => draw_config(f, rows[1], self.config.as_ref()),
        }

        let status = self.status.as_deref().unwrap_or(match self.screen {
            Screen::Dashboard => "1-4/tab: screens | r: refresh",
            Screen::Streams => {
                "up/down: select | enter: clients | p: play url | d: delete | s: secret"
            }
            Screen::Profile => "1-4/tab: screens",
            Screen::Config => "1-4/tab: screens | r: refetch",
        });
        f.render_widget(
            ratatui::widgets::Paragraph::new(status)
                .style(ratatui::style::Style::default().fg(Color::DarkGray)),
            rows[2],
        );
    }

    fn draw_dashboard(&self, f: &mut ratatui::Frame<'_>, area: ratatui::layout::Rect) {
        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        // Top: connections (left) + network bandwidth (right)
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(halves[0]);
        draw_connections(f, top[0], &self.charts);

        let net = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(top[1]);
        draw_net_spark(f, net[0], &self.charts.net_in, Color::Green);
        draw_net_spark(f, net[1], &self.charts.net_out, Color::Blue);

        // Bottom: cpu (left) + memory (right)
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(halves[1]);
        draw_cpu_chart(f, bottom[0], &self.charts.cpu);
        draw_mem_chart(f, bottom[1], &self.charts.mem);
    }
}
