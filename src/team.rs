use serde::Serialize;

use crate::side::Side;

/// Team-level situational counters. The possession accumulators are not
/// adjustable from here; they only grow through `accrue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TeamCounter {
    FrontCourtOffense,
    FrontCourtDefense,
    CounterAttackOffense,
    CounterAttackDefense,
    Advantage,
    AdvantageDefense,
    SixOnFive,
    FiveOnSix,
    SevenOnSix,
    SixOnSeven,
}

impl TeamCounter {
    pub const ALL: [TeamCounter; 10] = [
        TeamCounter::FrontCourtOffense,
        TeamCounter::FrontCourtDefense,
        TeamCounter::CounterAttackOffense,
        TeamCounter::CounterAttackDefense,
        TeamCounter::Advantage,
        TeamCounter::AdvantageDefense,
        TeamCounter::SixOnFive,
        TeamCounter::FiveOnSix,
        TeamCounter::SevenOnSix,
        TeamCounter::SixOnSeven,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamStat {
    pub front_court_offense: u32,
    pub front_court_defense: u32,
    pub counter_attack_offense: u32,
    pub counter_attack_defense: u32,
    pub advantage: u32,
    pub advantage_defense: u32,
    pub six_on_five: u32,
    pub five_on_six: u32,
    pub seven_on_six: u32,
    pub six_on_seven: u32,
    pub possession_home: u32,
    pub possession_away: u32,
}

impl TeamStat {
    pub fn get(&self, counter: TeamCounter) -> u32 {
        match counter {
            TeamCounter::FrontCourtOffense => self.front_court_offense,
            TeamCounter::FrontCourtDefense => self.front_court_defense,
            TeamCounter::CounterAttackOffense => self.counter_attack_offense,
            TeamCounter::CounterAttackDefense => self.counter_attack_defense,
            TeamCounter::Advantage => self.advantage,
            TeamCounter::AdvantageDefense => self.advantage_defense,
            TeamCounter::SixOnFive => self.six_on_five,
            TeamCounter::FiveOnSix => self.five_on_six,
            TeamCounter::SevenOnSix => self.seven_on_six,
            TeamCounter::SixOnSeven => self.six_on_seven,
        }
    }

    pub fn adjust(&mut self, counter: TeamCounter, delta: i32) -> u32 {
        let slot = match counter {
            TeamCounter::FrontCourtOffense => &mut self.front_court_offense,
            TeamCounter::FrontCourtDefense => &mut self.front_court_defense,
            TeamCounter::CounterAttackOffense => &mut self.counter_attack_offense,
            TeamCounter::CounterAttackDefense => &mut self.counter_attack_defense,
            TeamCounter::Advantage => &mut self.advantage,
            TeamCounter::AdvantageDefense => &mut self.advantage_defense,
            TeamCounter::SixOnFive => &mut self.six_on_five,
            TeamCounter::FiveOnSix => &mut self.five_on_six,
            TeamCounter::SevenOnSix => &mut self.seven_on_six,
            TeamCounter::SixOnSeven => &mut self.six_on_seven,
        };
        *slot = slot.saturating_add_signed(delta);
        *slot
    }

    pub fn possession_time(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.possession_home,
            Side::Away => self.possession_away,
        }
    }

    pub fn accrue(&mut self, side: Side) {
        let slot = match side {
            Side::Home => &mut self.possession_home,
            Side::Away => &mut self.possession_away,
        };
        *slot = slot.saturating_add(1);
    }
}

pub fn team_counter_label(counter: TeamCounter) -> &'static str {
    match counter {
        TeamCounter::FrontCourtOffense => "FCO",
        TeamCounter::FrontCourtDefense => "FCD",
        TeamCounter::CounterAttackOffense => "CAO",
        TeamCounter::CounterAttackDefense => "CAD",
        TeamCounter::Advantage => "AG",
        TeamCounter::AdvantageDefense => "AGD",
        TeamCounter::SixOnFive => "6v5",
        TeamCounter::FiveOnSix => "5v6",
        TeamCounter::SevenOnSix => "7v6",
        TeamCounter::SixOnSeven => "6v7",
    }
}

pub fn team_counter_name(counter: TeamCounter) -> &'static str {
    match counter {
        TeamCounter::FrontCourtOffense => "Front court offense",
        TeamCounter::FrontCourtDefense => "Front court defense",
        TeamCounter::CounterAttackOffense => "Counter attack offense",
        TeamCounter::CounterAttackDefense => "Counter attack defense",
        TeamCounter::Advantage => "Advantage goal",
        TeamCounter::AdvantageDefense => "Advantage goal defense",
        TeamCounter::SixOnFive => "6 on 5",
        TeamCounter::FiveOnSix => "5 on 6",
        TeamCounter::SevenOnSix => "7 on 6",
        TeamCounter::SixOnSeven => "6 on 7",
    }
}
