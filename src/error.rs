use thiserror::Error;

use crate::side::Side;

/// An action that was refused without touching session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no player #{id} on the {side} roster")]
    UnknownPlayer { side: Side, id: u32 },
    #[error("select a player first")]
    NoPlayerSelected,
    #[error("rosters can only be edited before the game starts")]
    RosterLocked,
    #[error("name cannot be empty")]
    EmptyName,
    #[error("{side} already has the ball; credit the steal to the other side")]
    StealByPossessor { side: Side },
}
