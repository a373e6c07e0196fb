use anyhow::{Context as _, Result};
use chrono::prelude::*;
use chrono::Duration;
use circular_queue::CircularQueue;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, info, trace, warn};
use signal_hook::consts::{SIGTERM, SIGWINCH};
use signal_hook::iterator::Signals;
use termion::input::{MouseTerminal, TermRead};
use termion::raw::{IntoRawMode, RawTerminal};
use tui::backend::TermionBackend;
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::{Color, Style};
use tui::text::{Span, Spans, Text};
use tui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use tui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use tui::Terminal;

use std::io;
use std::thread;

use crate::bus::{Broadcaster, BusEvent};
use crate::event::Event;
use crate::ground_station::GroundStation;
use crate::network::{Command, Connection, Data};
use crate::notifications::{Notification, NotificationLog};
use crate::settings::Settings;
use crate::spacecraft::Spacecraft;
use crate::state::State;
use crate::timeline::{group_slots, GanttRow};
use crate::widgets::{InfoBar, Timeline};

const COL_LIGHT_BG: Color = Color::DarkGray;
const COL_CYAN: Color = Color::LightCyan;
const COL_DARK_CYAN: Color = Color::DarkGray;
const COL_WHITE: Color = Color::White;

type Backend = TermionBackend<MouseTerminal<RawTerminal<io::Stdout>>>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum View {
    Map,
    GroundStations,
    Spacecraft,
    Timeline,
    Events,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Map,
        View::GroundStations,
        View::Spacecraft,
        View::Timeline,
        View::Events,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Map => "MAP",
            View::GroundStations => "GROUND STATIONS",
            View::Spacecraft => "SPACECRAFT",
            View::Timeline => "TIMELINE",
            View::Events => "EVENTS",
        }
    }

    fn next(self) -> View {
        match self {
            View::Map => View::GroundStations,
            View::GroundStations => View::Spacecraft,
            View::Spacecraft => View::Timeline,
            View::Timeline => View::Events,
            View::Events => View::Map,
        }
    }

    fn prev(self) -> View {
        match self {
            View::Map => View::Events,
            View::GroundStations => View::Map,
            View::Spacecraft => View::GroundStations,
            View::Timeline => View::Spacecraft,
            View::Events => View::Timeline,
        }
    }
}

pub struct Ui {
    active_view: View,
    broadcaster: Broadcaster,
    bus_events: Receiver<BusEvent>,
    connected: bool,
    events: Receiver<Event>,
    gs_table: TableState,
    last_message_at: DateTime<Utc>,
    last_sync: std::time::Instant,
    logs: CircularQueue<(DateTime<Utc>, log::Level, String)>,
    network: Connection,
    notifications: NotificationLog,
    passes_stale: bool,
    sc_table: TableState,
    sender: Sender<Event>,
    settings: Settings,
    show_logs: bool,
    shutdown: bool,
    size: Rect,
    state: State,
    terminal: Terminal<Backend>,
    ticks: u32,
    timeline_rows: Vec<GanttRow>,
}

impl Ui {
    pub fn new(settings: Settings) -> Result<Self> {
        let (sender, receiver) = bounded(100);

        // Must be called before any threads are launched
        let winch_send = sender.clone();
        let mut signals =
            Signals::new([SIGWINCH, SIGTERM]).context("couldn't register signal handler")?;
        thread::spawn(move || {
            for signal in signals.forever() {
                let event = match signal {
                    SIGWINCH => Event::Resize,
                    _ => Event::Shutdown,
                };
                if winch_send.send(event).is_err() {
                    break;
                }
            }
        });

        let send = sender.clone();
        thread::spawn(move || {
            for event in io::stdin().events() {
                if let Ok(ev) = event {
                    if send.send(Event::Input(ev)).is_err() {
                        break;
                    }
                }
            }
        });

        let send = sender.clone();
        thread::spawn(move || {
            while send.send(Event::Tick).is_ok() {
                thread::sleep(std::time::Duration::new(1, 0));
            }
        });

        let stdout = io::stdout()
            .into_raw_mode()
            .context("failed to put stdout into raw mode")?;
        let stdout = MouseTerminal::from(stdout);
        let backend = TermionBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

        terminal.clear().context("failed to clear terminal")?;
        terminal.hide_cursor().context("failed to hide cursor")?;

        let mut broadcaster = Broadcaster::new();
        let bus_events = broadcaster.subscribe();

        let network = Connection::new(&settings, sender.clone());

        let ui = Self {
            active_view: View::Map,
            broadcaster,
            bus_events,
            connected: false,
            events: receiver,
            gs_table: TableState::default(),
            last_message_at: Utc::now(),
            last_sync: std::time::Instant::now(),
            logs: CircularQueue::with_capacity(100),
            network,
            notifications: NotificationLog::with_capacity(200),
            passes_stale: false,
            sc_table: TableState::default(),
            sender,
            settings,
            show_logs: false,
            shutdown: false,
            size: Rect::default(),
            state: State::new(),
            terminal,
            ticks: 0,
            timeline_rows: vec![],
        };

        Ok(ui)
    }

    pub fn sender(&self) -> Sender<Event> {
        self.sender.clone()
    }

    pub fn run(mut self) -> Result<()> {
        use std::time::{Duration, Instant};

        debug!(
            "event bus ready, {} subscriber(s)",
            self.broadcaster.subscriber_count()
        );

        self.sync();
        self.draw()?;

        while let Ok(event) = self.events.recv() {
            self.handle_event(event);
            self.drain_bus();

            let start_instant = Instant::now();
            while let Some(remaining_time) =
                Duration::from_millis(16).checked_sub(start_instant.elapsed())
            {
                let event = match self.events.recv_timeout(remaining_time) {
                    Ok(ev) => ev,
                    Err(RecvTimeoutError::Timeout) => break,
                    Err(_) => {
                        self.shutdown = true;
                        break;
                    }
                };

                self.handle_event(event);
                self.drain_bus();
            }

            self.draw()?;

            if self.shutdown {
                break;
            }
        }

        Ok(())
    }

    /// Requests a full refresh of everything the monitor tracks.
    fn sync(&mut self) {
        trace!("requesting configuration sync");

        self.send_command(Command::SyncGroundStations);
        self.send_command(Command::SyncSpacecraft);
        self.update_passes();

        if self.settings.leop.is_some() {
            self.send_command(Command::SyncLeop);
            self.send_command(Command::SyncMessages(self.last_message_at));
        }

        self.last_sync = std::time::Instant::now();
    }

    fn update_passes(&self) {
        let spacecraft = self.state.spacecraft.keys().cloned().collect();
        self.send_command(Command::SyncPasses(spacecraft));
    }

    fn send_command(&self, command: Command) {
        if self.network.send(command).is_err() {
            warn!("network worker is gone");
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::CommandResponse(data) => self.handle_data(data),
            Event::Input(event) => self.handle_input(&event),
            Event::Log((level, message)) => {
                self.logs.push((Utc::now(), level, message));
            }
            Event::NoServerConnection => {
                self.connected = false;
                warn!("no connection to the satnet server");
            }
            Event::Resize => debug!("terminal size changed"),
            Event::Shutdown => self.shutdown = true,
            Event::Tick => self.handle_tick(),
        }
    }

    fn handle_data(&mut self, data: Data) {
        self.connected = true;

        match data {
            Data::GroundStations(configs) => {
                match self.state.reconcile_ground_stations(configs) {
                    Ok(events) => self.publish_all(events),
                    Err(err) => warn!("{}", err),
                }
            }
            Data::Spacecraft(configs) => {
                match self.state.reconcile_spacecraft(configs) {
                    Ok(events) => self.publish_all(events),
                    Err(err) => warn!("{}", err),
                }
            }
            Data::Passes(slots) => {
                info!("{} pass slots scheduled", slots.len());
                self.timeline_rows = group_slots(&slots);
                self.state.passes = slots;
            }
            Data::Messages(messages) => {
                for message in messages {
                    if message.timestamp > self.last_message_at {
                        self.last_message_at = message.timestamp;
                    }

                    self.notifications.insert(Notification {
                        time: message.timestamp,
                        source: message.gs_identifier,
                        text: message.message,
                    });
                }
            }
            Data::GroundTrack(identifier, track) => {
                trace!("ground track for {} ({} samples)", identifier, track.len());
                if let Err(err) = self.state.set_ground_track(&identifier, track) {
                    warn!("{}", err);
                }
            }
            Data::LeopGroundStations(assignment) => {
                info!("{} station(s) assigned to launch operations", assignment.in_use.len());
                self.state.leop_gs = Some(assignment);
            }
        }
    }

    fn publish_all(&mut self, events: Vec<BusEvent>) {
        for event in events {
            self.broadcaster.publish(&event);
        }
    }

    fn drain_bus(&mut self) {
        while let Ok(event) = self.bus_events.try_recv() {
            self.handle_bus_event(event);
        }

        // one schedule refresh per drain, however many spacecraft changed
        if self.passes_stale {
            self.passes_stale = false;
            self.update_passes();
        }
    }

    fn handle_bus_event(&mut self, event: BusEvent) {
        info!("{}", event);

        self.notifications.insert(Notification {
            time: Utc::now(),
            source: event.name().to_string(),
            text: event.identifier().to_string(),
        });

        match &event {
            // a freshly tracked spacecraft has no track samples yet
            BusEvent::ScAdded(identifier) => {
                self.send_command(Command::GetGroundTrack(identifier.clone()));
            }
            BusEvent::ScUpdated(identifier) => {
                let needs_track = self
                    .state
                    .spacecraft
                    .get(identifier)
                    .map(|sc| sc.track().is_empty())
                    .unwrap_or(false);
                if needs_track {
                    self.send_command(Command::GetGroundTrack(identifier.clone()));
                }
            }
            // drop orphaned schedule rows right away, the next passes sync
            // rebuilds the rest
            BusEvent::GsRemoved(identifier) => {
                self.state.passes.retain(|slot| &slot.gs_identifier != identifier);
                self.timeline_rows.retain(|row| &row.gs != identifier);
            }
            BusEvent::ScRemoved(identifier) => {
                self.state.passes.retain(|slot| &slot.sc_identifier != identifier);
                self.timeline_rows.retain(|row| &row.sc != identifier);
            }
            _ => {}
        }

        // the pass schedule follows the tracked spacecraft set
        if matches!(event, BusEvent::ScAdded(_) | BusEvent::ScRemoved(_)) {
            self.passes_stale = true;
        }

        self.clamp_selection();
    }

    fn handle_input(&mut self, event: &termion::event::Event) {
        use termion::event::Event::*;
        use termion::event::Key::*;

        match *event {
            Key(Ctrl('c')) => self.shutdown = true,
            Key(Char('q')) => self.shutdown = true,
            Key(Char('l')) => self.show_logs = !self.show_logs,
            Key(Char('\t')) => self.active_view = self.active_view.next(),
            Key(BackTab) => self.active_view = self.active_view.prev(),
            Key(Char('r')) => self.sync(),
            Key(Down) => self.select_next(),
            Key(Up) => self.select_prev(),
            Key(Char('g')) => self.request_ground_track(),
            Key(Char('a')) => self.leop_assign(),
            Key(Char('u')) => self.leop_release(),
            Key(Char('D')) => self.delete_ground_station(),
            Key(key) => {
                trace!("unbound key {:?}", key);
            }
            _ => {}
        }
    }

    fn handle_tick(&mut self) {
        if self.last_sync.elapsed().as_secs() >= self.settings.sync_interval {
            self.sync();
        }

        self.ticks += 1;

        if self.settings.leop.is_some()
            && u64::from(self.ticks) % self.settings.message_interval == 0
        {
            self.send_command(Command::SyncMessages(self.last_message_at));
        }

        if self.ticks % 60 == 0 {
            self.drop_finished_slots();
        }
    }

    /// Slots whose window closed more than an hour ago no longer belong on
    /// the timeline.
    fn drop_finished_slots(&mut self) {
        let horizon = Utc::now() - Duration::hours(1);
        let before = self.state.passes.len();

        self.state.passes.retain(|slot| slot.slot_end >= horizon);

        if self.state.passes.len() != before {
            self.timeline_rows = group_slots(&self.state.passes);
        }
    }

    fn select_next(&mut self) {
        let (table, len) = match self.active_view {
            View::GroundStations => (&mut self.gs_table, self.state.ground_stations.len()),
            View::Spacecraft => (&mut self.sc_table, self.state.spacecraft.len()),
            _ => return,
        };

        if len == 0 {
            return;
        }

        let at = table.selected().map_or(0, |at| (at + 1) % len);
        table.select(Some(at));
    }

    fn select_prev(&mut self) {
        let (table, len) = match self.active_view {
            View::GroundStations => (&mut self.gs_table, self.state.ground_stations.len()),
            View::Spacecraft => (&mut self.sc_table, self.state.spacecraft.len()),
            _ => return,
        };

        if len == 0 {
            return;
        }

        let at = table.selected().map_or(0, |at| (at + len - 1) % len);
        table.select(Some(at));
    }

    /// Keeps the table selections inside the entity count after the tracked
    /// set changed.
    fn clamp_selection(&mut self) {
        let gs_len = self.state.ground_stations.len();
        match self.gs_table.selected() {
            Some(_) if gs_len == 0 => self.gs_table.select(None),
            Some(at) if at >= gs_len => self.gs_table.select(Some(gs_len - 1)),
            None if gs_len > 0 => self.gs_table.select(Some(0)),
            _ => {}
        }

        let sc_len = self.state.spacecraft.len();
        match self.sc_table.selected() {
            Some(_) if sc_len == 0 => self.sc_table.select(None),
            Some(at) if at >= sc_len => self.sc_table.select(Some(sc_len - 1)),
            None if sc_len > 0 => self.sc_table.select(Some(0)),
            _ => {}
        }
    }

    fn selected_ground_station(&self) -> Option<&GroundStation> {
        let at = self.gs_table.selected()?;
        self.state.ground_stations.values().nth(at)
    }

    fn selected_spacecraft(&self) -> Option<&Spacecraft> {
        let at = self.sc_table.selected()?;
        self.state.spacecraft.values().nth(at)
    }

    fn request_ground_track(&mut self) {
        if self.active_view != View::Spacecraft {
            return;
        }

        if let Some(sc) = self.selected_spacecraft() {
            let identifier = sc.identifier().to_string();
            info!("refreshing ground track of {}", identifier);
            self.send_command(Command::GetGroundTrack(identifier));
        }
    }

    fn leop_assign(&mut self) {
        if self.active_view != View::GroundStations {
            return;
        }

        if self.settings.leop.is_none() {
            warn!("no LEOP cluster configured");
            return;
        }

        if let Some(gs) = self.selected_ground_station() {
            let identifier = gs.identifier().to_string();
            info!("assigning {} to launch operations", identifier);
            self.send_command(Command::LeopAssign(identifier));
        }
    }

    fn leop_release(&mut self) {
        if self.active_view != View::GroundStations {
            return;
        }

        if self.settings.leop.is_none() {
            warn!("no LEOP cluster configured");
            return;
        }

        if let Some(gs) = self.selected_ground_station() {
            let identifier = gs.identifier().to_string();
            info!("releasing {} from launch operations", identifier);
            self.send_command(Command::LeopRelease(identifier));
        }
    }

    fn delete_ground_station(&mut self) {
        if self.active_view != View::GroundStations {
            return;
        }

        if let Some(gs) = self.selected_ground_station() {
            let identifier = gs.identifier().to_string();
            info!("deleting ground station {}", identifier);
            self.send_command(Command::DeleteGroundStation(identifier));
        }
    }

    /// Left hand info panel of the map view.
    fn map_panel(&self, utc: DateTime<Utc>) -> Vec<Spans<'static>> {
        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Cyan));
        let value = |text: String| Span::styled(text, Style::default().fg(COL_WHITE));

        let server = if self.connected {
            Span::styled(
                format!("{:>19}", "CONNECTED"),
                Style::default().fg(Color::LightGreen),
            )
        } else {
            Span::styled(
                format!("{:>19}", "OFFLINE"),
                Style::default().fg(Color::LightRed),
            )
        };

        let mut panel = vec![
            Spans::from(Span::styled("Network", Style::default().fg(Color::Yellow))),
            Spans::default(),
            Spans::from(vec![label("Server       "), server]),
            Spans::from(vec![
                label("Stations     "),
                value(format!("{:>19}", self.state.ground_stations.len())),
            ]),
            Spans::from(vec![
                label("Spacecraft   "),
                value(format!("{:>19}", self.state.spacecraft.len())),
            ]),
            Spans::from(vec![
                label("Pass Slots   "),
                value(format!("{:>19}", self.state.passes.len())),
            ]),
            Spans::default(),
        ];

        let next = self
            .state
            .passes
            .iter()
            .filter(|slot| slot.slot_end > utc)
            .min_by_key(|slot| slot.slot_start);

        match next {
            Some(slot) => {
                let delta_t = utc - slot.slot_start;
                let time_style = if delta_t >= Duration::zero() {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                panel.push(Spans::from(vec![
                    Span::styled("Next Pass", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!(
                            "        {:+4}'{:2}\"",
                            delta_t.num_minutes(),
                            (delta_t.num_seconds() % 60).abs()
                        ),
                        time_style,
                    ),
                ]));
                panel.push(Spans::default());
                panel.push(Spans::from(vec![
                    label("Slot         "),
                    value(format!("{:>19}", format!("#{}", slot.identifier))),
                ]));
                panel.push(Spans::from(vec![
                    label("Station      "),
                    value(format!("{:>19}", slot.gs_identifier)),
                ]));
                panel.push(Spans::from(vec![
                    label("Spacecraft   "),
                    value(format!("{:>19}", slot.sc_identifier)),
                ]));
                panel.push(Spans::from(vec![
                    label("Start        "),
                    value(format!("{:>19}", slot.slot_start.format("%Y-%m-%d %H:%M:%S"))),
                ]));
                panel.push(Spans::from(vec![
                    label("End          "),
                    value(format!("{:>19}", slot.slot_end.format("%Y-%m-%d %H:%M:%S"))),
                ]));
            }
            None => {
                panel.push(Spans::from(Span::styled(
                    "Next Pass",
                    Style::default().fg(Color::Yellow),
                )));
                panel.push(Spans::default());
                panel.push(Spans::from(Span::styled(
                    "None",
                    Style::default().fg(Color::Red),
                )));
            }
        }

        if let Some(leop) = &self.settings.leop {
            panel.push(Spans::default());
            panel.push(Spans::from(Span::styled(
                "Launch Ops",
                Style::default().fg(Color::Yellow),
            )));
            panel.push(Spans::default());
            panel.push(Spans::from(vec![
                label("Cluster      "),
                value(format!("{:>19}", leop)),
            ]));

            if let Some(assignment) = &self.state.leop_gs {
                panel.push(Spans::from(vec![
                    label("In Use       "),
                    value(format!("{:>19}", assignment.in_use.len())),
                ]));
                panel.push(Spans::from(vec![
                    label("Available    "),
                    value(format!("{:>19}", assignment.available.len())),
                ]));
            }
        }

        panel
    }

    fn draw(&mut self) -> Result<()> {
        let size = self.terminal.size().context("failed to get terminal size")?;
        if self.size != size {
            self.terminal
                .resize(size)
                .context("failed to resize terminal")?;
            self.size = size;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)].as_ref())
            .split(self.size);
        let body = rows[1];

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(37), Constraint::Min(0)].as_ref())
            .split(body);

        let log_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(10)].as_ref())
            .split(self.size)[1];

        let utc: DateTime<Utc> = Utc::now();
        let active_view = self.active_view;
        let show_logs = self.show_logs;
        let map_labels = self.settings.ui.map_labels;

        let info_bar =
            InfoBar::new(active_view, self.connected).leop(self.settings.leop.as_deref());

        let panel = self.map_panel(utc);

        let gs_markers: Vec<_> = self
            .state
            .ground_stations
            .values()
            .map(|gs| gs.marker.clone())
            .collect();

        let sc_layers: Vec<_> = self
            .state
            .spacecraft
            .values()
            .map(|sc| {
                let (flown, ahead) = sc.track_layers(utc);
                (sc.marker(utc), flown, ahead)
            })
            .collect();

        let leop_gs = &self.state.leop_gs;
        let gs_rows: Vec<Row> = self
            .state
            .ground_stations
            .values()
            .map(|gs| {
                let assigned = leop_gs
                    .as_ref()
                    .map(|set| set.in_use.iter().any(|id| id == gs.identifier()))
                    .unwrap_or(false);

                Row::new(vec![
                    Cell::from(gs.cfg.identifier.clone()),
                    Cell::from(gs.cfg.callsign.clone()),
                    Cell::from(format!("{:8.2}", gs.cfg.lat())),
                    Cell::from(format!("{:8.2}", gs.cfg.lng())),
                    Cell::from(format!("{:4.0}°", gs.cfg.elevation)),
                    Cell::from(if assigned { "■" } else { "" }),
                ])
            })
            .collect();

        let sc_rows: Vec<Row> = self
            .state
            .spacecraft
            .values()
            .map(|sc| {
                let (lat, lng) = match sc.marker(utc) {
                    Some(marker) => (format!("{:8.2}", marker.lat), format!("{:8.2}", marker.lng)),
                    None => ("       -".to_string(), "       -".to_string()),
                };

                Row::new(vec![
                    Cell::from(sc.cfg.identifier.clone()),
                    Cell::from(sc.cfg.callsign.clone()),
                    Cell::from(sc.cfg.tle_id.clone()),
                    Cell::from(format!("{:7}", sc.track().len())),
                    Cell::from(lat),
                    Cell::from(lng),
                ])
            })
            .collect();

        let gs_widths = [
            Constraint::Length(16),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(4),
        ];
        let sc_widths = [
            Constraint::Length(16),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(8),
        ];

        let window_start = utc - Duration::hours(1);
        let window_end = utc + Duration::hours(self.settings.ui.timeline_hours.max(1));
        let timeline_rows = &self.timeline_rows;

        let mut event_lines: Vec<Spans> = self
            .notifications
            .iter()
            .map(|notification| {
                Spans::from(vec![
                    Span::styled(
                        notification.time.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{:<12} ", notification.source),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(notification.text.clone(), Style::default().fg(COL_WHITE)),
                ])
            })
            .collect();
        let visible = body.height.saturating_sub(1) as usize;
        let event_scroll = self.notifications.len().saturating_sub(visible) as u16;
        if self.notifications.is_empty() {
            event_lines.push(Spans::from(Span::styled(
                "no events yet",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let mut log_lines: Vec<Spans> = self
            .logs
            .iter()
            .take(8)
            .map(|(time, level, message)| {
                let style = match level {
                    log::Level::Warn => Style::default().fg(Color::Yellow),
                    log::Level::Error => Style::default().fg(Color::Red),
                    _ => Style::default(),
                };

                Spans::from(vec![
                    Span::raw(time.format("%H:%M:%S").to_string()),
                    Span::styled(format!(" {:<5} ", level), style),
                    Span::raw(message.clone()),
                ])
            })
            .collect();
        log_lines.reverse();

        let gs_table = &mut self.gs_table;
        let sc_table = &mut self.sc_table;
        let terminal = &mut self.terminal;

        terminal
            .draw(|f| {
                f.render_widget(info_bar, rows[0]);

                match active_view {
                    View::Map => {
                        let info = Paragraph::new(Text::from(panel))
                            .alignment(Alignment::Left)
                            .block(
                                Block::default()
                                    .borders(Borders::RIGHT)
                                    .border_style(Style::default().fg(COL_DARK_CYAN)),
                            );
                        f.render_widget(info, panes[0]);

                        let map = Canvas::default()
                            .paint(|ctx| {
                                ctx.draw(&Map {
                                    color: COL_LIGHT_BG,
                                    resolution: MapResolution::High,
                                });

                                for marker in &gs_markers {
                                    let label = if map_labels {
                                        format!("▲ {}", marker.label)
                                    } else {
                                        "▲".to_string()
                                    };
                                    ctx.print(
                                        marker.lng,
                                        marker.lat,
                                        Span::styled(label, Style::default().fg(COL_CYAN)),
                                    );
                                }

                                for (marker, flown, ahead) in &sc_layers {
                                    ctx.layer();
                                    let mut track = Points::default();
                                    // plot the upcoming part first so the
                                    // flown part is drawn on top
                                    track.color = Color::Cyan;
                                    track.coords = *ahead;
                                    ctx.draw(&track);

                                    ctx.layer();
                                    track.color = Color::Yellow;
                                    track.coords = *flown;
                                    ctx.draw(&track);

                                    if let Some(marker) = marker {
                                        let label = if map_labels {
                                            format!("■─{}", marker.label)
                                        } else {
                                            "■".to_string()
                                        };
                                        ctx.print(
                                            marker.lng,
                                            marker.lat,
                                            Span::styled(
                                                label,
                                                Style::default().fg(Color::LightRed),
                                            ),
                                        );
                                    }
                                }
                            })
                            .x_bounds([-180.0, 180.0])
                            .y_bounds([-90.0, 90.0]);
                        f.render_widget(map, panes[1]);
                    }
                    View::GroundStations => {
                        let table = Table::new(gs_rows)
                            .header(
                                Row::new(vec!["ID", "CALLSIGN", "LAT", "LNG", "EL", "LEOP"])
                                    .style(Style::default().fg(Color::Yellow)),
                            )
                            .block(
                                Block::default()
                                    .borders(Borders::TOP)
                                    .border_style(Style::default().fg(COL_DARK_CYAN))
                                    .title(Span::styled(
                                        "Ground Stations",
                                        Style::default().fg(Color::Yellow),
                                    )),
                            )
                            .widths(&gs_widths)
                            .column_spacing(2)
                            .highlight_style(Style::default().fg(Color::Black).bg(COL_CYAN))
                            .highlight_symbol("▶ ");
                        f.render_stateful_widget(table, body, gs_table);
                    }
                    View::Spacecraft => {
                        let table = Table::new(sc_rows)
                            .header(
                                Row::new(vec!["ID", "CALLSIGN", "TLE", "SAMPLES", "LAT", "LNG"])
                                    .style(Style::default().fg(Color::Yellow)),
                            )
                            .block(
                                Block::default()
                                    .borders(Borders::TOP)
                                    .border_style(Style::default().fg(COL_DARK_CYAN))
                                    .title(Span::styled(
                                        "Spacecraft",
                                        Style::default().fg(Color::Yellow),
                                    )),
                            )
                            .widths(&sc_widths)
                            .column_spacing(2)
                            .highlight_style(Style::default().fg(Color::Black).bg(COL_CYAN))
                            .highlight_symbol("▶ ");
                        f.render_stateful_widget(table, body, sc_table);
                    }
                    View::Timeline => {
                        let timeline = Timeline::new(timeline_rows, window_start, window_end)
                            .now(utc)
                            .block(
                                Block::default()
                                    .borders(Borders::TOP)
                                    .border_style(Style::default().fg(COL_DARK_CYAN))
                                    .title(Span::styled(
                                        "Pass Schedule",
                                        Style::default().fg(Color::Yellow),
                                    )),
                            );
                        f.render_widget(timeline, body);
                    }
                    View::Events => {
                        let events = Paragraph::new(Text::from(event_lines))
                            .alignment(Alignment::Left)
                            .block(
                                Block::default()
                                    .borders(Borders::TOP)
                                    .border_style(Style::default().fg(COL_DARK_CYAN))
                                    .title(Span::styled(
                                        "Events",
                                        Style::default().fg(Color::Yellow),
                                    )),
                            )
                            .scroll((event_scroll, 0));
                        f.render_widget(events, body);
                    }
                }

                if show_logs {
                    let logs = Paragraph::new(Text::from(log_lines))
                        .alignment(Alignment::Left)
                        .block(
                            Block::default()
                                .borders(Borders::RIGHT | Borders::LEFT | Borders::TOP)
                                .border_style(Style::default().fg(COL_DARK_CYAN))
                                .title(Span::styled("Log", Style::default().fg(Color::Yellow))),
                        );
                    f.render_widget(logs, log_area);
                }
            })
            .context("failed to draw to terminal")?;

        Ok(())
    }
}
