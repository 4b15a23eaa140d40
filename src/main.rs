use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use log::info;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use polo_terminal::clock::{format_clock, status_label};
use polo_terminal::config::TrackerConfig;
use polo_terminal::heatmap::{COLS, HeatTier, ROWS, Zone, heat_tier, zone_label};
use polo_terminal::plays::PLAY_NAMES;
use polo_terminal::possession::end_label;
use polo_terminal::roster::{PlayerCounter, counter_abbr, counter_label, player_initials};
use polo_terminal::session::Session;
use polo_terminal::side::{Side, side_label};
use polo_terminal::state::{apply_delta, AppState, Modal, Pacer, Panel, RenameTarget, ShotKind};
use polo_terminal::team::{TeamCounter, team_counter_label, team_counter_name};

struct App {
    state: AppState,
    pacer: Pacer,
    should_quit: bool,
}

impl App {
    fn new(config: &TrackerConfig) -> Self {
        Self {
            state: AppState::new(Session::new(config.session())),
            pacer: Pacer::from_config(config),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.modal.is_some() {
            self.on_modal_key(key);
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('z') => self.state.undo(),
                KeyCode::Char('y') => self.state.redo(),
                KeyCode::Char('c') => self.should_quit = true,
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            KeyCode::Char(' ') => {
                if self.state.session.clock().is_active() {
                    self.state.session.pause_game();
                } else {
                    self.state.session.start_game();
                }
                self.state.flush_notices();
            }
            KeyCode::Char('R') => {
                self.state.reset();
                self.pacer.clear_switches();
            }
            KeyCode::Char('S') => self.state.save(),
            KeyCode::Char('z') => self.state.undo(),
            KeyCode::Char('y') => self.state.redo(),
            KeyCode::Char('[') => {
                self.state.session.step_quarter(-1);
                self.state.flush_notices();
            }
            KeyCode::Char(']') => {
                self.state.session.step_quarter(1);
                self.state.flush_notices();
            }
            KeyCode::Char('h') => self.state.toggle_possession(Side::Home),
            KeyCode::Char('a') => self.state.toggle_possession(Side::Away),
            KeyCode::Tab => self.state.toggle_panel(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Right => self.state.cycle_counter_next(),
            KeyCode::Left => self.state.cycle_counter_prev(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.state.adjust_selected(1),
            KeyCode::Char('-') => self.state.adjust_selected(-1),
            KeyCode::Enter => self.state.select_cursor_player(),
            KeyCode::Char('g') => self.state.open_zone_picker(ShotKind::Goal),
            KeyCode::Char('x') => self.state.open_zone_picker(ShotKind::Shot),
            KeyCode::Char('t') => self.state.turnover(),
            KeyCode::Char('e') => self.state.steal(),
            KeyCode::Char('v') => self.state.toggle_roster_view(),
            KeyCode::Char('b') => self.state.toggle_bench(),
            KeyCode::Char('n') => self.state.open_player_rename(),
            KeyCode::Char('N') => self.state.open_team_rename(),
            KeyCode::Char('p') => self.state.open_play_picker(),
            _ => {}
        }
    }

    fn on_modal_key(&mut self, key: KeyEvent) {
        match self.state.modal {
            Some(Modal::ZonePicker { .. }) => match key.code {
                KeyCode::Esc => self.state.close_modal(),
                KeyCode::Char(ch) => {
                    if let Some(zone) = Zone::from_key(ch) {
                        self.state.pick_zone(zone);
                    }
                }
                _ => {}
            },
            Some(Modal::PlayPicker { .. }) => match key.code {
                KeyCode::Esc => self.state.close_modal(),
                KeyCode::Char('j') | KeyCode::Down => self.state.move_play_picker(true),
                KeyCode::Char('k') | KeyCode::Up => self.state.move_play_picker(false),
                KeyCode::Char('s') | KeyCode::Enter => self.state.pick_play(true),
                KeyCode::Char('f') => self.state.pick_play(false),
                _ => {}
            },
            Some(Modal::Rename { .. }) => match key.code {
                KeyCode::Esc => self.state.close_modal(),
                KeyCode::Enter => self.state.commit_rename(),
                KeyCode::Backspace => self.state.rename_backspace(),
                KeyCode::Char(ch) => self.state.rename_input(ch),
                _ => {}
            },
            None => {}
        }
    }
}

fn init_logging(config: &TrackerConfig) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("cannot open log file {}", config.log_file))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = TrackerConfig::from_env();
    init_logging(&config)?;
    info!(
        "tracker starting: tick {:?}, auto switch {:?}, history {}",
        config.tick, config.auto_switch_delay, config.history_limit
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(&config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("tracker stopped");
    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let poll_rate = Duration::from_millis(250);

    loop {
        let now = Instant::now();
        app.pacer.collect(now, &mut app.state.session);
        for delta in app.pacer.poll(now, &app.state.session) {
            apply_delta(&mut app.state, delta);
        }
        app.pacer.collect(now, &mut app.state.session);

        terminal.draw(|f| ui(f, &app.state))?;

        let timeout = app
            .pacer
            .next_switch_in(Instant::now())
            .map_or(poll_rate, |wait| wait.min(poll_rate));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(60), Constraint::Length(38)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(7)])
        .split(columns[0]);
    render_roster(frame, left[0], state);
    render_team(frame, left[1], state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Min(3),
            Constraint::Length(7),
        ])
        .split(columns[1]);
    render_heatmap(frame, right[0], state, Side::Home);
    render_heatmap(frame, right[1], state, Side::Away);
    render_plays(frame, right[2], state);
    render_timeline(frame, right[3], state);

    render_console(frame, chunks[2], state);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    match &state.modal {
        Some(Modal::ZonePicker { kind, .. }) => render_zone_picker(frame, *kind),
        Some(Modal::PlayPicker { selected }) => render_play_picker(frame, *selected),
        Some(Modal::Rename { target, buffer }) => render_rename(frame, state, *target, buffer),
        None => {}
    }

    if state.help_overlay {
        let area = frame.size();
        render_help_overlay(frame, area);
    }
}

fn header_text(state: &AppState) -> String {
    let session = &state.session;
    let clock = session.clock();
    let team = session.team();
    let ball = match session.possession().active_side() {
        Some(side) => format!("ball: {}", session.team_name(side)),
        None => "ball: -".to_string(),
    };
    let line1 = format!(
        "  POLO LIVE | {} | Q{} | {} | {}",
        clock.display(),
        session.quarter(),
        status_label(clock.status()),
        ball
    );
    let line2 = format!(
        "  {} {}  vs  {} {}  | undo {} redo {}",
        session.team_name(Side::Home),
        format_clock(team.possession_time(Side::Home)),
        session.team_name(Side::Away),
        format_clock(team.possession_time(Side::Away)),
        if session.can_undo() { "on" } else { "off" },
        if session.can_redo() { "on" } else { "off" },
    );
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    match state.panel {
        Panel::Roster => {
            "Space Clock | h/a Possession | ↑/↓ Player | ←/→ Stat | +/- Adjust | Enter Select | v Other roster | g Goal | x Shot | t TO | e Steal | p Play | z/y Undo/Redo | ? Help | q Quit".to_string()
        }
        Panel::Team => {
            "Space Clock | Tab Roster | ↑/↓ Counter | +/- Adjust | [/] Quarter | z/y Undo/Redo | ? Help | q Quit".to_string()
        }
    }
}

fn panel_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style)
}

fn render_roster(frame: &mut Frame, area: Rect, state: &AppState) {
    let session = &state.session;
    let side = state.view_side();
    let selection = session.selection();
    let focused = state.panel == Panel::Roster;

    let mut header_cells = vec![Cell::from("#"), Cell::from("Player")];
    for (idx, counter) in PlayerCounter::ALL.iter().enumerate() {
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        if focused && idx == state.counter_selected {
            style = style.fg(Color::Cyan);
        }
        header_cells.push(Cell::from(counter_abbr(*counter)).style(style));
    }

    let rows: Vec<Row> = session
        .roster(side)
        .players
        .iter()
        .enumerate()
        .map(|(idx, player)| {
            let tracked = selection
                .is_some_and(|sel| sel.side == side && sel.player_id == player.id);
            let marker = if tracked { "*" } else { " " };
            let name = if player.is_active {
                player.name.clone()
            } else {
                format!("{} (bench)", player_initials(&player.name))
            };
            let mut cells = vec![
                Cell::from(format!("{marker}{}", player.id)),
                Cell::from(name),
            ];
            cells.extend(
                PlayerCounter::ALL
                    .iter()
                    .map(|counter| Cell::from(player.get(*counter).to_string())),
            );
            let mut style = Style::default();
            if !player.is_active {
                style = style.fg(Color::DarkGray);
            }
            if tracked {
                style = style.fg(Color::Yellow);
            }
            if idx == state.roster_selected {
                style = style.bg(Color::DarkGray);
            }
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![Constraint::Length(5), Constraint::Min(14)];
    widths.extend(PlayerCounter::ALL.iter().map(|_| Constraint::Length(4)));

    let browsing = if state.roster_view.is_some() {
        " | browsing, v to return"
    } else {
        ""
    };
    let title = format!(
        "{} roster | {} | {}{browsing}",
        session.team_name(side),
        side_label(side),
        counter_label(state.selected_counter())
    );
    let table = Table::new(rows, widths)
        .header(Row::new(header_cells))
        .block(panel_block(title, focused));
    frame.render_widget(table, area);
}

fn render_team(frame: &mut Frame, area: Rect, state: &AppState) {
    let team = state.session.team();
    let focused = state.panel == Panel::Team;
    let lines: Vec<Line> = TeamCounter::ALL
        .chunks(5)
        .enumerate()
        .map(|(row, chunk)| {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .map(|(col, counter)| {
                    let mut style = Style::default();
                    if focused && row * 5 + col == state.team_selected {
                        style = style.bg(Color::DarkGray).fg(Color::Cyan);
                    }
                    Span::styled(
                        format!(" {} {:<3}", team_counter_label(*counter), team.get(*counter)),
                        style,
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    let title = format!(
        "Team stats | {}",
        team_counter_name(state.selected_team_counter())
    );
    let paragraph = Paragraph::new(lines).block(panel_block(title, focused));
    frame.render_widget(paragraph, area);
}

fn heat_color(side: Side, tier: HeatTier) -> Color {
    let ramp = match side {
        Side::Home => [
            Color::Rgb(255, 241, 118),
            Color::Rgb(255, 213, 79),
            Color::Rgb(255, 179, 0),
            Color::Rgb(255, 143, 0),
        ],
        Side::Away => [
            Color::Rgb(239, 154, 154),
            Color::Rgb(229, 115, 115),
            Color::Rgb(229, 57, 53),
            Color::Rgb(183, 28, 28),
        ],
    };
    match tier {
        HeatTier::Empty => Color::Rgb(100, 181, 246),
        HeatTier::Low => ramp[0],
        HeatTier::Medium => ramp[1],
        HeatTier::High => ramp[2],
        HeatTier::Max => ramp[3],
    }
}

fn render_heatmap(frame: &mut Frame, area: Rect, state: &AppState, side: Side) {
    let heatmap = state.session.heatmap();
    let mut lines = Vec::new();
    for row in 0..ROWS {
        let mut spans = Vec::new();
        for col in 0..COLS {
            let Some(zone) = Zone::from_cell(row, col) else {
                continue;
            };
            let value = heatmap.display_value(side, zone);
            let color = heat_color(side, heat_tier(value));
            spans.push(Span::styled(
                format!(" {:<10}{:>3} ", zone_label(zone), value),
                Style::default().bg(color).fg(Color::Black),
            ));
        }
        lines.push(Line::from(spans));
    }
    let title = format!(
        "{} shots ({})",
        state.session.team_name(side),
        heatmap.total(side)
    );
    let paragraph = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_plays(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = state
        .session
        .plays()
        .iter()
        .take(visible)
        .map(|play| {
            let (mark, color) = if play.success {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };
            Line::from(vec![
                Span::styled(format!("{mark} "), Style::default().fg(color)),
                Span::raw(format!("{} {} ({})", play.timestamp, play.name, side_label(play.side))),
            ])
        })
        .collect();
    let paragraph = Paragraph::new(lines).block(Block::default().title("Plays").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_timeline(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = area.height.saturating_sub(2) as usize;
    let timeline = state.session.possession().timeline();
    let lines: Vec<Line> = timeline
        .iter()
        .rev()
        .take(visible)
        .map(|event| {
            let color = match event.side {
                Side::Home => Color::Yellow,
                Side::Away => Color::Red,
            };
            Line::from(vec![
                Span::styled(format!("{:<5}", side_label(event.side)), Style::default().fg(color)),
                Span::raw(format!(
                    "{:>4}s  {}",
                    event.duration,
                    end_label(event.end)
                )),
            ])
        })
        .collect();
    let paragraph =
        Paragraph::new(lines).block(Block::default().title("Possessions").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_console(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.logs.len().saturating_sub(visible);
    let lines: Vec<Line> = state
        .logs
        .iter()
        .skip(start)
        .map(|msg| {
            let color = if msg.starts_with("[WARN]") {
                Color::Red
            } else if msg.starts_with("[OK]") {
                Color::Green
            } else {
                Color::Gray
            };
            Line::styled(msg.clone(), Style::default().fg(color))
        })
        .collect();
    let paragraph = Paragraph::new(lines).block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_zone_picker(frame: &mut Frame, kind: ShotKind) {
    let popup_area = centered_rect(40, 40, frame.size());
    frame.render_widget(Clear, popup_area);
    let mut lines = vec![String::new()];
    for row in 0..ROWS {
        let cells: Vec<String> = (0..COLS)
            .filter_map(|col| Zone::from_cell(row, col))
            .map(|zone| {
                let key = ('1'..='6')
                    .find(|key| Zone::from_key(*key) == Some(zone))
                    .unwrap_or('?');
                format!("[{key}] {:<12}", zone_label(zone))
            })
            .collect();
        lines.push(format!("  {}", cells.join(" ")));
    }
    lines.push(String::new());
    lines.push("  Esc cancel".to_string());
    let title = match kind {
        ShotKind::Shot => "Shot zone",
        ShotKind::Goal => "Goal zone",
    };
    let picker = Paragraph::new(lines.join("\n"))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(picker, popup_area);
}

fn render_play_picker(frame: &mut Frame, selected: usize) {
    let popup_area = centered_rect(40, 40, frame.size());
    frame.render_widget(Clear, popup_area);
    let mut lines: Vec<Line> = PLAY_NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == selected {
                Line::styled(format!("> {name}"), Style::default().fg(Color::Cyan))
            } else {
                Line::raw(format!("  {name}"))
            }
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::raw("s/Enter success | f fail | Esc cancel"));
    let picker =
        Paragraph::new(lines).block(Block::default().title("Log play").borders(Borders::ALL));
    frame.render_widget(picker, popup_area);
}

fn render_rename(frame: &mut Frame, state: &AppState, target: RenameTarget, buffer: &str) {
    let popup_area = centered_rect(50, 20, frame.size());
    frame.render_widget(Clear, popup_area);
    let title = match target {
        RenameTarget::Player { side, player_id } => {
            format!("Rename #{player_id} ({})", state.session.team_name(side))
        }
        RenameTarget::Team(side) => format!("Rename {} team", side_label(side)),
    };
    let text = format!("{buffer}_\n\nEnter save | Esc cancel");
    let modal = Paragraph::new(text).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(modal, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Polo Live - Help",
        "",
        "Game:",
        "  Space        Start / pause clock",
        "  R            Reset game",
        "  S            Save (dump to log)",
        "  [ / ]        Quarter down / up",
        "  z / Ctrl+Z   Undo",
        "  y / Ctrl+Y   Redo",
        "",
        "Possession:",
        "  h / a        Start or stop Home / Away",
        "",
        "Stats:",
        "  Tab          Roster / team panel",
        "  j/k or ↑/↓   Move",
        "  ←/→          Stat column",
        "  + / -        Adjust",
        "  Enter        Select player",
        "  g / x        Goal / shot (pick zone 1-6)",
        "  v            Browse the other roster",
        "  t / e        Turnover / steal (steal: select a defender first)",
        "  b            Bench toggle",
        "  n / N        Rename player / team",
        "  p            Log a play",
        "",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
