use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::TrackerConfig;
use crate::error::Rejection;
use crate::heatmap::Zone;
use crate::notice::{NoticeLevel, level_tag};
use crate::plays::PLAY_NAMES;
use crate::possession::ScheduledSwitch;
use crate::roster::{PlayerCounter, PlayerStat};
use crate::session::Session;
use crate::side::Side;
use crate::team::TeamCounter;
use crate::timer::{Deferred, Ticker};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Roster,
    Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotKind {
    Shot,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameTarget {
    Player { side: Side, player_id: u32 },
    Team(Side),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    ZonePicker {
        kind: ShotKind,
        side: Side,
        player_id: u32,
    },
    PlayPicker {
        selected: usize,
    },
    Rename {
        target: RenameTarget,
        buffer: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub session: Session,
    pub panel: Panel,
    pub roster_selected: usize,
    pub counter_selected: usize,
    pub team_selected: usize,
    pub modal: Option<Modal>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    /// Roster browsed instead of the side with the ball, e.g. to credit a
    /// steal to a defender.
    pub roster_view: Option<Side>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl AppState {
    pub fn new(session: Session) -> Self {
        let mut state = Self {
            session,
            panel: Panel::Roster,
            roster_selected: 0,
            counter_selected: 0,
            team_selected: 0,
            modal: None,
            logs: VecDeque::new(),
            help_overlay: false,
            roster_view: None,
        };
        state.push_log("[INFO] Ready. Space starts the clock, ? shows keys");
        state
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Moves pending session notices into the console.
    pub fn flush_notices(&mut self) {
        for notice in self.session.drain_notices() {
            let line = format!("{} {}", level_tag(notice.level()), notice);
            self.push_log(line);
        }
    }

    /// Roster shown in the table.
    pub fn view_side(&self) -> Side {
        self.roster_view.unwrap_or_else(|| self.session.focus_side())
    }

    /// Flips the table to the other roster without touching possession.
    pub fn toggle_roster_view(&mut self) {
        let next = self.view_side().opponent();
        self.roster_view = if next == self.session.focus_side() {
            None
        } else {
            Some(next)
        };
        self.clamp_selection();
    }

    pub fn visible_players(&self) -> &[PlayerStat] {
        &self.session.roster(self.view_side()).players
    }

    pub fn cursor_player(&self) -> Option<&PlayerStat> {
        self.visible_players().get(self.roster_selected)
    }

    pub fn selected_counter(&self) -> PlayerCounter {
        PlayerCounter::ALL[self.counter_selected % PlayerCounter::ALL.len()]
    }

    pub fn selected_team_counter(&self) -> TeamCounter {
        TeamCounter::ALL[self.team_selected % TeamCounter::ALL.len()]
    }

    pub fn toggle_panel(&mut self) {
        self.panel = match self.panel {
            Panel::Roster => Panel::Team,
            Panel::Team => Panel::Roster,
        };
    }

    pub fn select_next(&mut self) {
        let total = self.row_count();
        let selected = self.row_cursor();
        if total == 0 {
            *selected = 0;
            return;
        }
        *selected = (*selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.row_count();
        let selected = self.row_cursor();
        if total == 0 {
            *selected = 0;
            return;
        }
        if *selected == 0 {
            *selected = total - 1;
        } else {
            *selected -= 1;
        }
    }

    pub fn cycle_counter_next(&mut self) {
        self.counter_selected = (self.counter_selected + 1) % PlayerCounter::ALL.len();
    }

    pub fn cycle_counter_prev(&mut self) {
        let total = PlayerCounter::ALL.len();
        self.counter_selected = (self.counter_selected + total - 1) % total;
    }

    /// Keeps the roster cursor in range after the focused roster changes.
    pub fn clamp_selection(&mut self) {
        let total = self.visible_players().len();
        if total == 0 {
            self.roster_selected = 0;
        } else if self.roster_selected >= total {
            self.roster_selected = total - 1;
        }
    }

    /// `+`/`-` on whatever the cursor points at.
    pub fn adjust_selected(&mut self, delta: i32) {
        match self.panel {
            Panel::Roster => {
                let side = self.view_side();
                let counter = self.selected_counter();
                if let Some(id) = self.cursor_player().map(|player| player.id) {
                    let _ = self.session.adjust_player_stat(side, id, counter, delta);
                }
            }
            Panel::Team => {
                let counter = self.selected_team_counter();
                self.session.adjust_team_stat(counter, delta);
            }
        }
        self.flush_notices();
    }

    pub fn select_cursor_player(&mut self) {
        let side = self.view_side();
        if let Some(id) = self.cursor_player().map(|player| player.id) {
            let _ = self.session.select_player(side, id);
        }
        self.flush_notices();
    }

    /// Opens the zone picker for the selected player.
    pub fn open_zone_picker(&mut self, kind: ShotKind) {
        let Some(selection) = self.session.selection() else {
            self.warn(Rejection::NoPlayerSelected);
            return;
        };
        self.modal = Some(Modal::ZonePicker {
            kind,
            side: selection.side,
            player_id: selection.player_id,
        });
    }

    pub fn pick_zone(&mut self, zone: Zone) {
        let Some(Modal::ZonePicker {
            kind,
            side,
            player_id,
        }) = self.modal.take()
        else {
            return;
        };
        let _ = match kind {
            ShotKind::Shot => self.session.record_shot_by(side, player_id, zone),
            ShotKind::Goal => self.session.on_goal_scored(side, player_id, zone),
        };
        self.session.clear_selection();
        self.after_roster_change();
    }

    pub fn turnover(&mut self) {
        let Some(selection) = self.session.selection() else {
            self.warn(Rejection::NoPlayerSelected);
            return;
        };
        let _ = self.session.on_turnover(selection.side, selection.player_id);
        self.session.clear_selection();
        self.flush_notices();
    }

    pub fn steal(&mut self) {
        let Some(selection) = self.session.selection() else {
            self.warn(Rejection::NoPlayerSelected);
            return;
        };
        if self
            .session
            .on_steal(selection.side, selection.player_id)
            .is_ok()
        {
            self.session.clear_selection();
            self.roster_view = None;
        }
        self.after_roster_change();
    }

    pub fn toggle_bench(&mut self) {
        let side = self.view_side();
        if let Some(id) = self.cursor_player().map(|player| player.id) {
            let _ = self.session.toggle_in_pool(side, id);
        }
        self.flush_notices();
    }

    pub fn toggle_possession(&mut self, side: Side) {
        self.session.toggle_possession(side);
        self.roster_view = None;
        self.after_roster_change();
    }

    pub fn open_play_picker(&mut self) {
        self.modal = Some(Modal::PlayPicker { selected: 0 });
    }

    pub fn move_play_picker(&mut self, forward: bool) {
        if let Some(Modal::PlayPicker { selected }) = &mut self.modal {
            let total = PLAY_NAMES.len();
            *selected = if forward {
                (*selected + 1) % total
            } else {
                (*selected + total - 1) % total
            };
        }
    }

    pub fn pick_play(&mut self, success: bool) {
        let Some(Modal::PlayPicker { selected }) = self.modal.take() else {
            return;
        };
        if let Some(name) = PLAY_NAMES.get(selected) {
            self.session.log_play(name, success);
        }
        self.flush_notices();
    }

    pub fn open_player_rename(&mut self) {
        if self.session.clock().is_active() {
            self.warn(Rejection::RosterLocked);
            return;
        }
        let side = self.view_side();
        let Some(player) = self.cursor_player() else {
            return;
        };
        let target = RenameTarget::Player {
            side,
            player_id: player.id,
        };
        let buffer = player.name.clone();
        self.modal = Some(Modal::Rename { target, buffer });
    }

    pub fn open_team_rename(&mut self) {
        if self.session.clock().is_active() {
            self.warn(Rejection::RosterLocked);
            return;
        }
        let side = self.view_side();
        let buffer = self.session.team_name(side).to_string();
        self.modal = Some(Modal::Rename {
            target: RenameTarget::Team(side),
            buffer,
        });
    }

    pub fn rename_input(&mut self, ch: char) {
        if let Some(Modal::Rename { buffer, .. }) = &mut self.modal {
            buffer.push(ch);
        }
    }

    pub fn rename_backspace(&mut self) {
        if let Some(Modal::Rename { buffer, .. }) = &mut self.modal {
            buffer.pop();
        }
    }

    pub fn commit_rename(&mut self) {
        let Some(Modal::Rename { target, buffer }) = self.modal.take() else {
            return;
        };
        let _ = match target {
            RenameTarget::Player { side, player_id } => {
                self.session.rename_player(side, player_id, &buffer)
            }
            RenameTarget::Team(side) => self.session.set_team_name(side, &buffer),
        };
        self.flush_notices();
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn undo(&mut self) {
        if !self.session.undo() {
            debug!("undo at oldest snapshot");
        }
        self.after_roster_change();
    }

    pub fn redo(&mut self) {
        if !self.session.redo() {
            debug!("redo at newest snapshot");
        }
        self.after_roster_change();
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.modal = None;
        self.roster_view = None;
        self.roster_selected = 0;
        self.flush_notices();
    }

    pub fn save(&mut self) {
        if let Some(dump) = self.session.save() {
            self.push_log(format!(
                "{} save dump is {} bytes, see the log file",
                level_tag(NoticeLevel::Info),
                dump.len()
            ));
        }
        self.flush_notices();
    }

    fn after_roster_change(&mut self) {
        self.clamp_selection();
        self.flush_notices();
    }

    fn warn(&mut self, rejection: Rejection) {
        self.push_log(format!("{} {}", level_tag(NoticeLevel::Error), rejection));
    }

    fn row_count(&self) -> usize {
        match self.panel {
            Panel::Roster => self.visible_players().len(),
            Panel::Team => TeamCounter::ALL.len(),
        }
    }

    fn row_cursor(&mut self) -> &mut usize {
        match self.panel {
            Panel::Roster => &mut self.roster_selected,
            Panel::Team => &mut self.team_selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delta {
    ClockTick,
    PossessionTick,
    AutoSwitch(ScheduledSwitch),
    Log(String),
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::ClockTick => {
            state.session.clock_tick();
        }
        Delta::PossessionTick => {
            state.session.possession_tick();
        }
        Delta::AutoSwitch(switch) => {
            if state.session.apply_auto_switch(switch) {
                state.roster_view = None;
                state.clamp_selection();
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
    state.flush_notices();
}

/// Turns wall-clock time into deltas: one ticker for the game clock, one for
/// possession time, and the queue of delayed possession switches.
#[derive(Debug, Clone)]
pub struct Pacer {
    clock: Ticker,
    possession: Ticker,
    possession_side: Option<Side>,
    switches: Deferred<ScheduledSwitch>,
    switch_delay: Duration,
}

impl Pacer {
    pub fn new(tick: Duration, switch_delay: Duration) -> Self {
        Self {
            clock: Ticker::new(tick),
            possession: Ticker::new(tick),
            possession_side: None,
            switches: Deferred::new(),
            switch_delay,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.tick, config.auto_switch_delay)
    }

    pub fn pending_switches(&self) -> usize {
        self.switches.len()
    }

    /// Queues the switches the session asked for since the last call.
    pub fn collect(&mut self, now: Instant, session: &mut Session) {
        for switch in session.take_scheduled() {
            self.switches.schedule(now, self.switch_delay, switch);
        }
    }

    /// Time until the next queued switch is due; zero once it is overdue.
    pub fn next_switch_in(&self, now: Instant) -> Option<Duration> {
        self.switches
            .next_deadline()
            .map(|at| at.saturating_duration_since(now))
    }

    pub fn clear_switches(&mut self) {
        self.switches.clear();
    }

    pub fn poll(&mut self, now: Instant, session: &Session) -> Vec<Delta> {
        let mut deltas = Vec::new();

        let clock_ticks = self.clock.poll(now, session.clock().is_running());
        deltas.extend((0..clock_ticks).map(|_| Delta::ClockTick));

        // A possession hand-over restarts the interval for the new side.
        let side = session.possession().active_side();
        if side != self.possession_side {
            self.possession.disarm();
            self.possession_side = side;
        }
        let gated = session.config().possession_follows_clock && !session.clock().is_running();
        let possession_ticks = self.possession.poll(now, side.is_some() && !gated);
        deltas.extend((0..possession_ticks).map(|_| Delta::PossessionTick));

        deltas.extend(self.switches.due(now).into_iter().map(Delta::AutoSwitch));
        deltas
    }
}
