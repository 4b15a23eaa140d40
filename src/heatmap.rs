use serde::Serialize;

use crate::side::Side;

pub const ROWS: usize = 3;
pub const COLS: usize = 2;

/// Shot location. Rows are distance bands from goal (wing 0-2m, flat 2-5m,
/// point 5-7m), columns are left/right. Both point cells are one zone for
/// display but stay separately addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Zone {
    LeftWing,
    RightWing,
    LeftFlat,
    RightFlat,
    PointLeft,
    PointRight,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::LeftWing,
        Zone::LeftFlat,
        Zone::RightWing,
        Zone::RightFlat,
        Zone::PointLeft,
        Zone::PointRight,
    ];

    pub fn cell(self) -> (usize, usize) {
        match self {
            Zone::LeftWing => (0, 0),
            Zone::RightWing => (0, 1),
            Zone::LeftFlat => (1, 0),
            Zone::RightFlat => (1, 1),
            Zone::PointLeft => (2, 0),
            Zone::PointRight => (2, 1),
        }
    }

    pub fn from_cell(row: usize, col: usize) -> Option<Zone> {
        match (row, col) {
            (0, 0) => Some(Zone::LeftWing),
            (0, 1) => Some(Zone::RightWing),
            (1, 0) => Some(Zone::LeftFlat),
            (1, 1) => Some(Zone::RightFlat),
            (2, 0) => Some(Zone::PointLeft),
            (2, 1) => Some(Zone::PointRight),
            _ => None,
        }
    }

    /// Picker key, numbered the way zones are painted on the court diagram.
    pub fn from_key(key: char) -> Option<Zone> {
        match key {
            '1' => Some(Zone::LeftWing),
            '2' => Some(Zone::LeftFlat),
            '3' => Some(Zone::RightWing),
            '4' => Some(Zone::RightFlat),
            '5' => Some(Zone::PointLeft),
            '6' => Some(Zone::PointRight),
            _ => None,
        }
    }
}

pub fn zone_label(zone: Zone) -> &'static str {
    match zone {
        Zone::LeftWing => "Left Wing",
        Zone::RightWing => "Right Wing",
        Zone::LeftFlat => "Left Flat",
        Zone::RightFlat => "Right Flat",
        Zone::PointLeft | Zone::PointRight => "Point",
    }
}

pub type Grid = [[u32; COLS]; ROWS];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub home: Grid,
    pub away: Grid,
}

impl Heatmap {
    pub fn grid(&self, side: Side) -> &Grid {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn record(&mut self, side: Side, zone: Zone) -> u32 {
        let (row, col) = zone.cell();
        let grid = match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        };
        grid[row][col] = grid[row][col].saturating_add(1);
        grid[row][col]
    }

    pub fn cell(&self, side: Side, zone: Zone) -> u32 {
        let (row, col) = zone.cell();
        self.grid(side)[row][col]
    }

    /// Value shown for a zone; the point band shows both cells summed.
    pub fn display_value(&self, side: Side, zone: Zone) -> u32 {
        match zone {
            Zone::PointLeft | Zone::PointRight => {
                self.cell(side, Zone::PointLeft) + self.cell(side, Zone::PointRight)
            }
            _ => self.cell(side, zone),
        }
    }

    pub fn total(&self, side: Side) -> u32 {
        self.grid(side).iter().flatten().sum()
    }
}

/// Five-tier display intensity; thresholds are shared by both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeatTier {
    Empty,
    Low,
    Medium,
    High,
    Max,
}

pub fn heat_tier(value: u32) -> HeatTier {
    match value {
        0 => HeatTier::Empty,
        1 => HeatTier::Low,
        2 => HeatTier::Medium,
        3 => HeatTier::High,
        _ => HeatTier::Max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_thresholds() {
        let tiers: Vec<HeatTier> = (0..=6).map(heat_tier).collect();
        assert_eq!(
            tiers,
            vec![
                HeatTier::Empty,
                HeatTier::Low,
                HeatTier::Medium,
                HeatTier::High,
                HeatTier::Max,
                HeatTier::Max,
                HeatTier::Max,
            ]
        );
    }

    #[test]
    fn cells_and_zones_line_up() {
        for zone in Zone::ALL {
            let (row, col) = zone.cell();
            assert_eq!(Zone::from_cell(row, col), Some(zone));
        }
        assert_eq!(Zone::from_cell(3, 0), None);
        assert_eq!(Zone::from_cell(0, 2), None);
    }

    #[test]
    fn point_cells_merge_for_display_only() {
        let mut map = Heatmap::default();
        map.record(Side::Away, Zone::PointLeft);
        map.record(Side::Away, Zone::PointRight);
        map.record(Side::Away, Zone::PointRight);
        assert_eq!(map.cell(Side::Away, Zone::PointLeft), 1);
        assert_eq!(map.cell(Side::Away, Zone::PointRight), 2);
        assert_eq!(map.display_value(Side::Away, Zone::PointLeft), 3);
        assert_eq!(map.total(Side::Home), 0);
    }
}
