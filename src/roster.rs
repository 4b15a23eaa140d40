use serde::Serialize;

use crate::side::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerCounter {
    Shots,
    Goals,
    Penalties,
    Turnovers,
    Rebounds,
    Assists,
    Blocks,
    TippedPasses,
    Sprints,
    Steals,
    Hustle,
    Exclusions,
    Draws,
}

impl PlayerCounter {
    pub const ALL: [PlayerCounter; 13] = [
        PlayerCounter::Shots,
        PlayerCounter::Goals,
        PlayerCounter::Penalties,
        PlayerCounter::Turnovers,
        PlayerCounter::Rebounds,
        PlayerCounter::Assists,
        PlayerCounter::Blocks,
        PlayerCounter::TippedPasses,
        PlayerCounter::Sprints,
        PlayerCounter::Steals,
        PlayerCounter::Hustle,
        PlayerCounter::Exclusions,
        PlayerCounter::Draws,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerStat {
    pub id: u32,
    pub name: String,
    pub shots: u32,
    pub goals: u32,
    pub penalties: u32,
    pub turnovers: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub blocks: u32,
    pub tipped_passes: u32,
    pub sprints: u32,
    pub steals: u32,
    pub hustle: u32,
    pub exclusions: u32,
    pub draws: u32,
    pub is_active: bool,
}

impl PlayerStat {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_active: true,
            ..Self::default()
        }
    }

    pub fn get(&self, counter: PlayerCounter) -> u32 {
        match counter {
            PlayerCounter::Shots => self.shots,
            PlayerCounter::Goals => self.goals,
            PlayerCounter::Penalties => self.penalties,
            PlayerCounter::Turnovers => self.turnovers,
            PlayerCounter::Rebounds => self.rebounds,
            PlayerCounter::Assists => self.assists,
            PlayerCounter::Blocks => self.blocks,
            PlayerCounter::TippedPasses => self.tipped_passes,
            PlayerCounter::Sprints => self.sprints,
            PlayerCounter::Steals => self.steals,
            PlayerCounter::Hustle => self.hustle,
            PlayerCounter::Exclusions => self.exclusions,
            PlayerCounter::Draws => self.draws,
        }
    }

    fn slot(&mut self, counter: PlayerCounter) -> &mut u32 {
        match counter {
            PlayerCounter::Shots => &mut self.shots,
            PlayerCounter::Goals => &mut self.goals,
            PlayerCounter::Penalties => &mut self.penalties,
            PlayerCounter::Turnovers => &mut self.turnovers,
            PlayerCounter::Rebounds => &mut self.rebounds,
            PlayerCounter::Assists => &mut self.assists,
            PlayerCounter::Blocks => &mut self.blocks,
            PlayerCounter::TippedPasses => &mut self.tipped_passes,
            PlayerCounter::Sprints => &mut self.sprints,
            PlayerCounter::Steals => &mut self.steals,
            PlayerCounter::Hustle => &mut self.hustle,
            PlayerCounter::Exclusions => &mut self.exclusions,
            PlayerCounter::Draws => &mut self.draws,
        }
    }

    /// Applies `delta` and clamps at zero. Returns the new value.
    pub fn adjust(&mut self, counter: PlayerCounter, delta: i32) -> u32 {
        let slot = self.slot(counter);
        *slot = slot.saturating_add_signed(delta);
        *slot
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub players: Vec<PlayerStat>,
}

impl Roster {
    pub fn new(players: Vec<PlayerStat>) -> Self {
        Self { players }
    }

    pub fn seed(side: Side) -> Self {
        match side {
            Side::Home => Self::new(
                HOME_SEED
                    .iter()
                    .enumerate()
                    .map(|(i, name)| PlayerStat::new(i as u32 + 1, *name))
                    .collect(),
            ),
            Side::Away => Self::new(
                (1..=7u32)
                    .map(|n| PlayerStat::new(100 + n, format!("Opponent #{n}")))
                    .collect(),
            ),
        }
    }

    pub fn get(&self, id: u32) -> Option<&PlayerStat> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut PlayerStat> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn total(&self, counter: PlayerCounter) -> u32 {
        self.players.iter().map(|p| p.get(counter)).sum()
    }

    pub fn in_pool(&self) -> usize {
        self.players.iter().filter(|p| p.is_active).count()
    }
}

const HOME_SEED: [&str; 7] = [
    "Alex Martinez",
    "Jake Thompson",
    "Ryan Chen",
    "Marcus Wilson",
    "David Kim",
    "Brandon Lee",
    "Chris Anderson",
];

pub fn counter_label(counter: PlayerCounter) -> &'static str {
    match counter {
        PlayerCounter::Shots => "Shots",
        PlayerCounter::Goals => "Goals",
        PlayerCounter::Penalties => "Penalties",
        PlayerCounter::Turnovers => "Turnovers",
        PlayerCounter::Rebounds => "Rebounds",
        PlayerCounter::Assists => "Assists",
        PlayerCounter::Blocks => "Blocks",
        PlayerCounter::TippedPasses => "Tipped passes",
        PlayerCounter::Sprints => "Sprints",
        PlayerCounter::Steals => "Steals",
        PlayerCounter::Hustle => "Hustle",
        PlayerCounter::Exclusions => "Exclusions",
        PlayerCounter::Draws => "Draws",
    }
}

pub fn counter_abbr(counter: PlayerCounter) -> &'static str {
    match counter {
        PlayerCounter::Shots => "SH",
        PlayerCounter::Goals => "G",
        PlayerCounter::Penalties => "PEN",
        PlayerCounter::Turnovers => "TO",
        PlayerCounter::Rebounds => "REB",
        PlayerCounter::Assists => "AST",
        PlayerCounter::Blocks => "BLK",
        PlayerCounter::TippedPasses => "TIP",
        PlayerCounter::Sprints => "SPR",
        PlayerCounter::Steals => "STL",
        PlayerCounter::Hustle => "HUS",
        PlayerCounter::Exclusions => "EXC",
        PlayerCounter::Draws => "DRW",
    }
}

/// Initials for the roster grid; "Opponent #3" collapses to "#3".
pub fn player_initials(name: &str) -> String {
    if let Some(rest) = name.strip_prefix("Opponent ") {
        return rest.to_string();
    }
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase()
}
