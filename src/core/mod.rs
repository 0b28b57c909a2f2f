//! Core engine types: players, configuration, placements, errors.

pub mod action;
pub mod config;
pub mod error;
pub mod player;

pub use action::{Placement, PlacementRecord};
pub use config::GameConfig;
pub use error::{GameError, IllegalMove};
pub use player::{Player, PlayerMap};
