use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;

use crate::clock::{Clock, status_label};
use crate::config::SessionConfig;
use crate::error::Rejection;
use crate::heatmap::{Heatmap, Zone};
use crate::history::History;
use crate::notice::Notice;
use crate::plays::{Play, PlayLog};
use crate::possession::{Possession, PossessionEnd, PossessionEvent, ScheduledSwitch};
use crate::roster::{PlayerCounter, Roster};
use crate::side::Side;
use crate::team::{TeamCounter, TeamStat};

pub const MIN_QUARTER: u8 = 1;
pub const MAX_QUARTER: u8 = 4;

/// Everything undo/redo restores. Rosters sit behind `Arc` and the play log
/// is a shared list, so cloning a sheet for the history only copies what a
/// mutation actually touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scoresheet {
    pub home: Arc<Roster>,
    pub away: Arc<Roster>,
    pub team: TeamStat,
    pub plays: PlayLog,
    pub quarter: u8,
    pub heatmap: Heatmap,
}

impl Default for Scoresheet {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Scoresheet {
    pub fn seeded() -> Self {
        Self {
            home: Arc::new(Roster::seed(Side::Home)),
            away: Arc::new(Roster::seed(Side::Away)),
            team: TeamStat::default(),
            plays: PlayLog::new(),
            quarter: MIN_QUARTER,
            heatmap: Heatmap::default(),
        }
    }

    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Home => Arc::make_mut(&mut self.home),
            Side::Away => Arc::make_mut(&mut self.away),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub side: Side,
    pub player_id: u32,
}

#[derive(Serialize)]
struct SessionDump<'a> {
    saved_at: String,
    clock: String,
    status: &'static str,
    home_name: &'a str,
    away_name: &'a str,
    sheet: &'a Scoresheet,
    possession: &'a [PossessionEvent],
}

/// One live game: clock, stat stores, possession tracking and undo history.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    clock: Clock,
    sheet: Scoresheet,
    possession: Possession,
    history: History<Scoresheet>,
    selection: Option<Selection>,
    team_names: [String; 2],
    scheduled: Vec<ScheduledSwitch>,
    notices: Vec<Notice>,
    generation: u64,
    next_play_id: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let sheet = Scoresheet::seeded();
        let mut history = History::new(config.history_limit);
        history.snapshot(sheet.clone());
        let team_names = [config.home_name.clone(), config.away_name.clone()];
        Self {
            config,
            clock: Clock::new(),
            sheet,
            possession: Possession::new(),
            history,
            selection: None,
            team_names,
            scheduled: Vec::new(),
            notices: Vec::new(),
            generation: 0,
            next_play_id: 1,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn sheet(&self) -> &Scoresheet {
        &self.sheet
    }

    pub fn roster(&self, side: Side) -> &Roster {
        self.sheet.roster(side)
    }

    pub fn team(&self) -> &TeamStat {
        &self.sheet.team
    }

    pub fn plays(&self) -> &PlayLog {
        &self.sheet.plays
    }

    pub fn heatmap(&self) -> &Heatmap {
        &self.sheet.heatmap
    }

    pub fn quarter(&self) -> u8 {
        self.sheet.quarter
    }

    pub fn possession(&self) -> &Possession {
        &self.possession
    }

    pub fn history(&self) -> &History<Scoresheet> {
        &self.history
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn team_name(&self, side: Side) -> &str {
        &self.team_names[side.index()]
    }

    /// Roster the stat buttons act on: whoever had the ball last, home
    /// before any possession.
    pub fn focus_side(&self) -> Side {
        self.possession.last_side().unwrap_or(Side::Home)
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Auto switches produced since the last call, for the caller to delay.
    pub fn take_scheduled(&mut self) -> Vec<ScheduledSwitch> {
        std::mem::take(&mut self.scheduled)
    }

    pub fn start_game(&mut self) {
        self.clock.start();
        info!("game started at {}", self.clock.display());
        self.notices.push(Notice::GameStarted);
    }

    pub fn pause_game(&mut self) {
        self.clock.pause();
        if self.clock.is_paused() {
            info!("game paused at {}", self.clock.display());
            self.notices.push(Notice::GamePaused);
        } else {
            info!("game resumed at {}", self.clock.display());
            self.notices.push(Notice::GameResumed);
        }
    }

    pub fn reset(&mut self) {
        self.clock.reset();
        self.sheet = Scoresheet::seeded();
        self.possession.reset();
        self.selection = None;
        self.scheduled.clear();
        self.generation += 1;
        self.next_play_id = 1;
        self.history.restart(self.sheet.clone());
        info!("game reset");
        self.notices.push(Notice::GameReset);
    }

    /// Emits the confirmation notice and returns the JSON dump that is also
    /// written to the debug log. Nothing is persisted.
    pub fn save(&mut self) -> Option<String> {
        let dump = SessionDump {
            saved_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            clock: self.clock.display(),
            status: status_label(self.clock.status()),
            home_name: self.team_name(Side::Home),
            away_name: self.team_name(Side::Away),
            sheet: &self.sheet,
            possession: self.possession.timeline(),
        };
        let json = match serde_json::to_string_pretty(&dump) {
            Ok(json) => json,
            Err(err) => {
                warn!("save dump failed: {err}");
                return None;
            }
        };
        info!("game saved ({} plays)", self.sheet.plays.len());
        debug!("save dump:\n{json}");
        self.notices.push(Notice::Saved);
        Some(json)
    }

    pub fn clock_tick(&mut self) -> bool {
        self.clock.tick()
    }

    pub fn possession_tick(&mut self) -> bool {
        if self.config.possession_follows_clock && !self.clock.is_running() {
            return false;
        }
        self.possession.tick(&mut self.sheet.team)
    }

    pub fn set_quarter(&mut self, quarter: i32) -> u8 {
        let quarter = quarter.clamp(MIN_QUARTER as i32, MAX_QUARTER as i32) as u8;
        self.sheet.quarter = quarter;
        self.notices.push(Notice::QuarterSet(quarter));
        self.commit("quarter");
        quarter
    }

    pub fn step_quarter(&mut self, delta: i32) -> u8 {
        self.set_quarter(self.sheet.quarter as i32 + delta)
    }

    pub fn adjust_player_stat(
        &mut self,
        side: Side,
        player_id: u32,
        counter: PlayerCounter,
        delta: i32,
    ) -> Result<u32, Rejection> {
        let name = self.player_name(side, player_id)?;
        let value = self
            .sheet
            .roster_mut(side)
            .get_mut(player_id)
            .map(|player| player.adjust(counter, delta))
            .unwrap_or_default();
        self.notices.push(Notice::PlayerAdjusted {
            player: name,
            counter,
            increased: delta > 0,
        });
        self.commit("player stat");
        Ok(value)
    }

    pub fn adjust_team_stat(&mut self, counter: TeamCounter, delta: i32) -> u32 {
        let value = self.sheet.team.adjust(counter, delta);
        self.notices.push(Notice::TeamAdjusted {
            counter,
            increased: delta > 0,
        });
        self.commit("team stat");
        value
    }

    pub fn select_player(&mut self, side: Side, player_id: u32) -> Result<(), Rejection> {
        let name = self.player_name(side, player_id)?;
        self.selection = Some(Selection { side, player_id });
        self.notices.push(Notice::Tracking { player: name });
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Marks a shot location for the selected player's side. Player counters
    /// are left to the caller.
    pub fn record_shot(&mut self, zone: Zone) -> Result<u32, Rejection> {
        let Some(selection) = self.selection else {
            return Err(self.reject(Rejection::NoPlayerSelected));
        };
        let value = self.sheet.heatmap.record(selection.side, zone);
        self.notices.push(Notice::Shot { player: None, zone });
        self.commit("shot location");
        Ok(value)
    }

    /// Shot taken: shots + 1 and the zone cell + 1.
    pub fn record_shot_by(&mut self, side: Side, player_id: u32, zone: Zone) -> Result<(), Rejection> {
        let name = self.player_name(side, player_id)?;
        if let Some(player) = self.sheet.roster_mut(side).get_mut(player_id) {
            player.adjust(PlayerCounter::Shots, 1);
        }
        self.sheet.heatmap.record(side, zone);
        self.notices.push(Notice::Shot {
            player: Some(name),
            zone,
        });
        self.commit("shot");
        Ok(())
    }

    /// Goal: goals and shots + 1, zone cell + 1, possession stopped and the
    /// restart handed to the other side after the switch delay.
    pub fn on_goal_scored(&mut self, side: Side, player_id: u32, zone: Zone) -> Result<(), Rejection> {
        let name = self.player_name(side, player_id)?;
        if let Some(player) = self.sheet.roster_mut(side).get_mut(player_id) {
            player.adjust(PlayerCounter::Goals, 1);
            player.adjust(PlayerCounter::Shots, 1);
        }
        self.sheet.heatmap.record(side, zone);
        self.notices.push(Notice::Goal { player: name, zone });
        self.possession.stop(PossessionEnd::Goal, &self.sheet.team);
        self.schedule_switch(side.opponent(), PossessionEnd::Goal);
        self.commit("goal");
        Ok(())
    }

    /// Turnover by `side`: the ball goes to the opponent.
    pub fn on_turnover(&mut self, side: Side, player_id: u32) -> Result<(), Rejection> {
        let name = self.player_name(side, player_id)?;
        if let Some(player) = self.sheet.roster_mut(side).get_mut(player_id) {
            player.adjust(PlayerCounter::Turnovers, 1);
        }
        self.notices.push(Notice::Turnover { player: name });
        self.possession.stop(PossessionEnd::Turnover, &self.sheet.team);
        self.schedule_switch(side.opponent(), PossessionEnd::Turnover);
        self.commit("turnover");
        Ok(())
    }

    /// Steal by `side`: the ball goes to the stealing side, which must not
    /// be the side currently in possession.
    pub fn on_steal(&mut self, side: Side, player_id: u32) -> Result<(), Rejection> {
        let name = self.player_name(side, player_id)?;
        if self.possession.is_active(side) {
            return Err(self.reject(Rejection::StealByPossessor { side }));
        }
        if let Some(player) = self.sheet.roster_mut(side).get_mut(player_id) {
            player.adjust(PlayerCounter::Steals, 1);
        }
        self.notices.push(Notice::Steal { player: name });
        self.possession.stop(PossessionEnd::Steal, &self.sheet.team);
        self.schedule_switch(side, PossessionEnd::Steal);
        self.commit("steal");
        Ok(())
    }

    pub fn start_possession(&mut self, side: Side) -> bool {
        if self.possession.is_active(side) {
            return false;
        }
        self.possession.start(side, &self.sheet.team);
        self.selection = None;
        let team = self.team_name(side).to_string();
        self.notices.push(Notice::PossessionStarted {
            team,
            restart: false,
        });
        self.commit("possession start");
        true
    }

    pub fn stop_possession(&mut self) -> bool {
        let Some(side) = self.possession.active_side() else {
            return false;
        };
        self.possession.stop(PossessionEnd::Manual, &self.sheet.team);
        self.selection = None;
        let team = self.team_name(side).to_string();
        self.notices.push(Notice::PossessionStopped {
            team,
            end: PossessionEnd::Manual,
        });
        self.commit("possession stop");
        true
    }

    /// The per-side start/stop button.
    pub fn toggle_possession(&mut self, side: Side) -> bool {
        if self.possession.is_active(side) {
            self.stop_possession()
        } else {
            self.start_possession(side)
        }
    }

    /// Lands a delayed switch. Returns whether it changed possession.
    pub fn apply_auto_switch(&mut self, switch: ScheduledSwitch) -> bool {
        if switch.generation != self.generation {
            debug!("dropping auto switch from before reset");
            return false;
        }
        if !self.possession.accepts(&switch, self.config.switch_policy) {
            debug!("auto switch to {} superseded", switch.to);
            return false;
        }
        if self.possession.is_active(switch.to) {
            return false;
        }
        self.possession.start(switch.to, &self.sheet.team);
        self.selection = None;
        let team = self.team_name(switch.to).to_string();
        self.notices.push(Notice::PossessionStarted {
            team,
            restart: switch.cause == PossessionEnd::Goal,
        });
        self.commit("auto possession");
        true
    }

    pub fn log_play(&mut self, name: &str, success: bool) -> Play {
        let play = Play {
            id: self.next_play_id,
            name: name.to_string(),
            timestamp: self.clock.display(),
            success,
            side: self.focus_side(),
        };
        self.next_play_id += 1;
        self.sheet.plays.prepend(play.clone());
        self.notices.push(Notice::PlayLogged {
            name: play.name.clone(),
            success,
        });
        self.commit("play");
        play
    }

    /// Moves a player between the pool and the bench. Returns the new
    /// in-pool flag.
    pub fn toggle_in_pool(&mut self, side: Side, player_id: u32) -> Result<bool, Rejection> {
        let name = self.player_name(side, player_id)?;
        let mut in_pool = false;
        if let Some(player) = self.sheet.roster_mut(side).get_mut(player_id) {
            player.is_active = !player.is_active;
            in_pool = player.is_active;
        }
        self.notices.push(Notice::Substituted {
            player: name,
            in_pool,
        });
        self.commit("substitution");
        Ok(in_pool)
    }

    pub fn rename_player(&mut self, side: Side, player_id: u32, name: &str) -> Result<(), Rejection> {
        if self.clock.is_active() {
            return Err(self.reject(Rejection::RosterLocked));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(self.reject(Rejection::EmptyName));
        }
        self.player_name(side, player_id)?;
        if let Some(player) = self.sheet.roster_mut(side).get_mut(player_id) {
            player.name = name.to_string();
        }
        self.notices.push(Notice::RosterUpdated);
        self.commit("rename");
        Ok(())
    }

    pub fn set_team_name(&mut self, side: Side, name: &str) -> Result<(), Rejection> {
        if self.clock.is_active() {
            return Err(self.reject(Rejection::RosterLocked));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(self.reject(Rejection::EmptyName));
        }
        self.team_names[side.index()] = name.to_string();
        self.notices.push(Notice::RosterUpdated);
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        let Some(sheet) = self.history.undo() else {
            return false;
        };
        self.sheet = sheet.clone();
        debug!("undo -> {}/{}", self.history.cursor(), self.history.len());
        self.notices.push(Notice::Undone);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(sheet) = self.history.redo() else {
            return false;
        };
        self.sheet = sheet.clone();
        debug!("redo -> {}/{}", self.history.cursor(), self.history.len());
        self.notices.push(Notice::Redone);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn player_name(&mut self, side: Side, player_id: u32) -> Result<String, Rejection> {
        let name = self
            .sheet
            .roster(side)
            .get(player_id)
            .map(|player| player.name.clone());
        match name {
            Some(name) => Ok(name),
            None => Err(self.reject(Rejection::UnknownPlayer { side, id: player_id })),
        }
    }

    fn schedule_switch(&mut self, to: Side, cause: PossessionEnd) {
        let epoch = self.possession.mark_change();
        self.scheduled.push(ScheduledSwitch {
            to,
            cause,
            epoch,
            generation: self.generation,
        });
    }

    fn reject(&mut self, rejection: Rejection) -> Rejection {
        debug!("rejected: {rejection}");
        self.notices.push(Notice::Rejected(rejection.to_string()));
        rejection
    }

    fn commit(&mut self, what: &str) {
        self.history.snapshot(self.sheet.clone());
        debug!(
            "{what} at {} (history {}/{})",
            self.clock.display(),
            self.history.cursor() + 1,
            self.history.len()
        );
    }
}
