//! Game configuration.
//!
//! The board is a fixed `width x height` rectangle chosen at creation time.
//! The reference configuration is 5x5.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Default board width.
pub const DEFAULT_WIDTH: usize = 5;

/// Default board height.
pub const DEFAULT_HEIGHT: usize = 5;

/// Default bound on rounds within a single cascade.
pub const DEFAULT_MAX_CASCADE_ROUNDS: u32 = 10_000;

/// Configuration for a game instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Columns. Must be at least 2.
    pub width: usize,

    /// Rows. Must be at least 2.
    pub height: usize,

    /// Rounds a single cascade may run before it is reported as
    /// `GameError::CascadeLimit`.
    pub max_cascade_rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_cascade_rounds: DEFAULT_MAX_CASCADE_ROUNDS,
        }
    }
}

impl GameConfig {
    /// Create a config for a `width x height` board with default limits.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::default().with_size(width, height)
    }

    /// Set the board size.
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the cascade round limit.
    #[must_use]
    pub fn with_max_cascade_rounds(mut self, rounds: u32) -> Self {
        self.max_cascade_rounds = rounds;
        self
    }

    /// Number of cells on the board. Saturates for sizes that fail
    /// [`GameConfig::validate`].
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Check the dimensions.
    ///
    /// Both sides must be at least 2: on a one-wide strip the end cells
    /// have fewer than two neighbors and a lone orb never settles. The cell
    /// count must also fit in a `usize`.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width < 2 || self.height < 2 || self.width.checked_mul(self.height).is_none() {
            return Err(GameError::InvalidConfiguration {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
