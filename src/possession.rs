use serde::Serialize;

use crate::side::Side;
use crate::team::TeamStat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PossessionState {
    Idle,
    Active(Side),
}

/// What ended a possession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PossessionEnd {
    Manual,
    Turnover,
    Steal,
    Goal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PossessionEvent {
    pub id: u64,
    pub side: Side,
    /// Side's accumulated possession seconds when this possession began.
    pub start: u32,
    pub duration: u32,
    pub end: PossessionEnd,
}

/// How a pending auto switch reacts to possession changes made after it was
/// scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SwitchPolicy {
    /// Every scheduled switch fires; the latest one to land wins.
    #[default]
    LastWriteWins,
    /// A later possession change invalidates switches scheduled before it.
    CancelOnChange,
}

/// Auto possession switch waiting for its delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledSwitch {
    pub to: Side,
    pub cause: PossessionEnd,
    pub epoch: u64,
    pub generation: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Possession {
    state: PossessionState,
    last_side: Option<Side>,
    start_offset: u32,
    timeline: Vec<PossessionEvent>,
    epoch: u64,
    next_event_id: u64,
}

impl Default for Possession {
    fn default() -> Self {
        Self::new()
    }
}

impl Possession {
    pub fn new() -> Self {
        Self {
            state: PossessionState::Idle,
            last_side: None,
            start_offset: 0,
            timeline: Vec::new(),
            epoch: 0,
            next_event_id: 1,
        }
    }

    pub fn state(&self) -> PossessionState {
        self.state
    }

    pub fn active_side(&self) -> Option<Side> {
        match self.state {
            PossessionState::Idle => None,
            PossessionState::Active(side) => Some(side),
        }
    }

    pub fn is_active(&self, side: Side) -> bool {
        self.state == PossessionState::Active(side)
    }

    /// Side that held the ball most recently, active or not.
    pub fn last_side(&self) -> Option<Side> {
        self.last_side
    }

    pub fn start_offset(&self) -> u32 {
        self.start_offset
    }

    pub fn timeline(&self) -> &[PossessionEvent] {
        &self.timeline
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Starts `side`, freezing the other side first if it was running.
    pub fn start(&mut self, side: Side, team: &TeamStat) -> Option<PossessionEvent> {
        let frozen = match self.state {
            PossessionState::Active(current) if current != side => {
                self.stop(PossessionEnd::Manual, team)
            }
            PossessionState::Active(_) => return None,
            PossessionState::Idle => None,
        };
        self.state = PossessionState::Active(side);
        self.last_side = Some(side);
        self.start_offset = team.possession_time(side);
        self.epoch += 1;
        frozen
    }

    /// Freezes the running side and returns the timeline entry, if the
    /// possession lasted at least one second.
    pub fn stop(&mut self, end: PossessionEnd, team: &TeamStat) -> Option<PossessionEvent> {
        let PossessionState::Active(side) = self.state else {
            return None;
        };
        self.state = PossessionState::Idle;
        self.epoch += 1;
        let duration = team.possession_time(side).saturating_sub(self.start_offset);
        if duration == 0 {
            return None;
        }
        let event = PossessionEvent {
            id: self.next_event_id,
            side,
            start: self.start_offset,
            duration,
            end,
        };
        self.next_event_id += 1;
        self.timeline.push(event.clone());
        Some(event)
    }

    /// One possession period elapsed.
    pub fn tick(&self, team: &mut TeamStat) -> bool {
        match self.state {
            PossessionState::Active(side) => {
                team.accrue(side);
                true
            }
            PossessionState::Idle => false,
        }
    }

    /// Bumps the change counter; switches scheduled under an older value
    /// count as superseded.
    pub fn mark_change(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// Whether a switch scheduled under `switch.epoch` may still land.
    pub fn accepts(&self, switch: &ScheduledSwitch, policy: SwitchPolicy) -> bool {
        match policy {
            SwitchPolicy::LastWriteWins => true,
            SwitchPolicy::CancelOnChange => switch.epoch == self.epoch,
        }
    }

    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self::new();
        self.epoch = epoch;
    }
}

pub fn end_label(end: PossessionEnd) -> &'static str {
    match end {
        PossessionEnd::Manual => "Stop",
        PossessionEnd::Turnover => "Turnover",
        PossessionEnd::Steal => "Steal",
        PossessionEnd::Goal => "Goal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_other_side_freezes_current_first() {
        let mut team = TeamStat::default();
        let mut possession = Possession::new();
        possession.start(Side::Home, &team);
        possession.tick(&mut team);
        possession.tick(&mut team);

        let frozen = possession.start(Side::Away, &team).expect("home had 2s");
        assert_eq!(frozen.side, Side::Home);
        assert_eq!(frozen.duration, 2);
        assert_eq!(frozen.end, PossessionEnd::Manual);
        assert_eq!(possession.state(), PossessionState::Active(Side::Away));

        possession.tick(&mut team);
        assert_eq!(team.possession_home, 2);
        assert_eq!(team.possession_away, 1);
    }

    #[test]
    fn zero_length_possessions_leave_no_timeline_entry() {
        let team = TeamStat::default();
        let mut possession = Possession::new();
        possession.start(Side::Away, &team);
        assert!(possession.stop(PossessionEnd::Turnover, &team).is_none());
        assert!(possession.timeline().is_empty());
        assert_eq!(possession.state(), PossessionState::Idle);
        assert_eq!(possession.last_side(), Some(Side::Away));
    }

    #[test]
    fn restarting_the_running_side_is_a_no_op() {
        let mut team = TeamStat::default();
        let mut possession = Possession::new();
        possession.start(Side::Home, &team);
        possession.tick(&mut team);
        let epoch = possession.epoch();
        assert!(possession.start(Side::Home, &team).is_none());
        assert_eq!(possession.start_offset(), 0);
        assert_eq!(possession.epoch(), epoch);
    }
}
