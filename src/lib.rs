pub mod clock;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod history;
pub mod notice;
pub mod plays;
pub mod possession;
pub mod roster;
pub mod session;
pub mod side;
pub mod state;
pub mod team;
pub mod timer;
