use std::fmt;

use crate::heatmap::{Zone, zone_label};
use crate::possession::{PossessionEnd, end_label};
use crate::roster::{PlayerCounter, counter_label};
use crate::team::{TeamCounter, team_counter_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Domain events surfaced to the notification sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    GameStarted,
    GamePaused,
    GameResumed,
    GameReset,
    Saved,
    Undone,
    Redone,
    QuarterSet(u8),
    PlayerAdjusted {
        player: String,
        counter: PlayerCounter,
        increased: bool,
    },
    TeamAdjusted {
        counter: TeamCounter,
        increased: bool,
    },
    Shot {
        player: Option<String>,
        zone: Zone,
    },
    Goal {
        player: String,
        zone: Zone,
    },
    Turnover {
        player: String,
    },
    Steal {
        player: String,
    },
    PossessionStarted {
        team: String,
        restart: bool,
    },
    PossessionStopped {
        team: String,
        end: PossessionEnd,
    },
    PlayLogged {
        name: String,
        success: bool,
    },
    Tracking {
        player: String,
    },
    Substituted {
        player: String,
        in_pool: bool,
    },
    RosterUpdated,
    Rejected(String),
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::Turnover { .. } | Notice::Rejected(_) => NoticeLevel::Error,
            Notice::GamePaused
            | Notice::GameResumed
            | Notice::Undone
            | Notice::Redone
            | Notice::QuarterSet(_)
            | Notice::PossessionStopped { .. } => NoticeLevel::Info,
            Notice::PossessionStarted { restart, .. } if *restart => NoticeLevel::Info,
            _ => NoticeLevel::Success,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::GameStarted => write!(f, "Game started"),
            Notice::GamePaused => write!(f, "Game paused"),
            Notice::GameResumed => write!(f, "Game resumed"),
            Notice::GameReset => write!(f, "Game stats reset"),
            Notice::Saved => write!(f, "Game stats saved"),
            Notice::Undone => write!(f, "Action undone"),
            Notice::Redone => write!(f, "Action redone"),
            Notice::QuarterSet(q) => write!(f, "Quarter {q}"),
            Notice::PlayerAdjusted {
                player,
                counter,
                increased,
            } => write!(
                f,
                "{player} - {} {}",
                counter_label(*counter),
                if *increased { "added" } else { "removed" }
            ),
            Notice::TeamAdjusted { counter, increased } => write!(
                f,
                "Team {} {}",
                team_counter_label(*counter),
                if *increased {
                    "incremented"
                } else {
                    "decremented"
                }
            ),
            Notice::Shot { player, zone } => match player {
                Some(player) => write!(f, "{player} - Shot from {}", zone_label(*zone)),
                None => write!(f, "Shot recorded at {}", zone_label(*zone)),
            },
            Notice::Goal { player, zone } => {
                write!(f, "{player} - GOAL from {}!", zone_label(*zone))
            }
            Notice::Turnover { player } => write!(f, "{player} - Turnover"),
            Notice::Steal { player } => write!(f, "{player} - Steal!"),
            Notice::PossessionStarted { team, restart } => {
                if *restart {
                    write!(f, "{team} possession started (restart)")
                } else {
                    write!(f, "{team} possession started")
                }
            }
            Notice::PossessionStopped { team, end } => {
                write!(f, "{team} possession stopped ({})", end_label(*end))
            }
            Notice::PlayLogged { name, success } => write!(
                f,
                "Play \"{name}\" logged as {}",
                if *success {
                    "successful"
                } else {
                    "unsuccessful"
                }
            ),
            Notice::Tracking { player } => write!(f, "Tracking {player}"),
            Notice::Substituted { player, in_pool } => {
                if *in_pool {
                    write!(f, "{player} in the pool")
                } else {
                    write!(f, "{player} to the bench")
                }
            }
            Notice::RosterUpdated => write!(f, "Player rosters updated"),
            Notice::Rejected(reason) => write!(f, "{reason}"),
        }
    }
}

pub fn level_tag(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "[OK]",
        NoticeLevel::Info => "[INFO]",
        NoticeLevel::Error => "[WARN]",
    }
}
