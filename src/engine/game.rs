//! Turn state machine driving placements and cascades.
//!
//! A `Game` is mutated in place. `place_orb` validates and applies a
//! placement, then locks input in `Resolving`. The host drains the cascade
//! either one round at a time with `step_cascade` (to animate) or all at once
//! with `run_to_settled`. Settling a cascade advances the turn counter,
//! evaluates the win condition and hands the move to the other player.
//!
//! ## Example
//!
//! ```
//! use chain_reaction::{Cell, Game, GameStatus, Player};
//!
//! let mut game = Game::with_size(5, 5).unwrap();
//! assert_eq!(game.status(), GameStatus::AwaitingMove(Player::First));
//!
//! for corner in [24, 20, 4] {
//!     game.place_orb(12, Player::First).unwrap();
//!     game.run_to_settled().unwrap();
//!     game.play(corner, Player::Second).unwrap();
//! }
//!
//! let outcome = game.play(12, Player::First).unwrap();
//! assert_eq!(outcome.rounds, 1);
//! assert_eq!(game.cell_at(12).unwrap(), Cell::EMPTY);
//! assert_eq!(game.cell_at(7).unwrap(), Cell::owned(Player::First, 1));
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::cascade::propagate;
use super::status::{CascadeStatus, GameStatus, MoveOutcome};
use crate::board::{Board, Cell, Grid};
use crate::core::{GameConfig, GameError, IllegalMove, Placement, PlacementRecord, Player};

/// Completed moves required before a win can be declared.
pub const WIN_GUARD_TURNS: u32 = 2;

/// One game instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    board: Board,
    status: GameStatus,
    /// Completed moves.
    turn: u32,
    /// Player whose placement started the cascade in flight.
    mover: Option<Player>,
    /// Rounds run by the current or last cascade.
    rounds: u32,
    /// Explosions in the current or last cascade.
    explosions: u32,
    history: Vector<PlacementRecord>,
}

impl Game {
    /// Create a game and open it for the first player.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let grid = Grid::from_config(&config)?;
        let mut game = Self::fresh(config, grid);
        game.start();
        Ok(game)
    }

    /// Create a `width x height` game with default limits.
    pub fn with_size(width: usize, height: usize) -> Result<Self, GameError> {
        Self::new(GameConfig::new(width, height))
    }

    /// Rebuild a game by playing back recorded placements from an empty board.
    pub fn replay<'a>(
        config: GameConfig,
        placements: impl IntoIterator<Item = &'a Placement>,
    ) -> Result<Self, GameError> {
        let mut game = Self::new(config)?;
        for placement in placements {
            game.play(placement.index, placement.player)?;
        }
        Ok(game)
    }

    fn fresh(config: GameConfig, grid: Grid) -> Self {
        Self {
            config,
            board: Board::new(grid),
            status: GameStatus::NotStarted,
            turn: 0,
            mover: None,
            rounds: 0,
            explosions: 0,
            history: Vector::new(),
        }
    }

    fn start(&mut self) {
        if self.status == GameStatus::NotStarted {
            self.status = GameStatus::AwaitingMove(Player::First);
            info!(
                width = self.grid().width(),
                height = self.grid().height(),
                "game started"
            );
        }
    }

    // === Queries ===

    /// Current phase.
    ///
    /// A cascade is cut short once the opponent owns no cells and the win
    /// guard has passed, so an `Over` game may still hold critical cells and
    /// [`Board::is_settled`] can be false for its final board.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.board.grid()
    }

    /// Completed moves so far.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Player to move, if input is open.
    #[must_use]
    pub fn current_player(&self) -> Option<Player> {
        self.status.to_move()
    }

    /// Player whose cascade is resolving, if any.
    #[must_use]
    pub fn mover(&self) -> Option<Player> {
        self.mover
    }

    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    /// Cell at `index`. After a win the value may be at or over capacity;
    /// see [`Game::status`].
    pub fn cell_at(&self, index: usize) -> Result<Cell, GameError> {
        self.board.cell(index)
    }

    /// Cells owned by `player`.
    #[must_use]
    pub fn score_of(&self, player: Player) -> usize {
        self.board.score(player)
    }

    #[must_use]
    pub fn total_orbs(&self) -> u32 {
        self.board.total_orbs()
    }

    /// Accepted placements, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<PlacementRecord> {
        &self.history
    }

    /// Whether `place_orb(index, player)` would be accepted.
    #[must_use]
    pub fn is_legal(&self, index: usize, player: Player) -> bool {
        self.check_placement(index, player).is_ok()
    }

    /// Every index `player` may place on right now. Empty unless it is
    /// `player`'s turn.
    #[must_use]
    pub fn legal_moves(&self, player: Player) -> Vec<usize> {
        if self.status != GameStatus::AwaitingMove(player) {
            return Vec::new();
        }
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.accepts(player))
            .map(|(index, _)| index)
            .collect()
    }

    // === Transitions ===

    /// Place one orb for `player` at `index`.
    ///
    /// On success the game is `Resolving`; drain it with
    /// [`Game::step_cascade`] or [`Game::run_to_settled`]. A rejected
    /// placement changes nothing.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn place_orb(&mut self, index: usize, player: Player) -> Result<(), GameError> {
        let cell = self
            .check_placement(index, player)
            .inspect_err(|err| warn!(%err, "placement rejected"))?;

        self.board
            .set(index, Cell::owned(player, cell.value + 1))?;
        self.history
            .push_back(PlacementRecord::new(Placement::new(player, index), self.turn));
        self.mover = Some(player);
        self.rounds = 0;
        self.explosions = 0;
        self.status = GameStatus::Resolving;
        debug!(value = cell.value + 1, "orb placed");
        Ok(())
    }

    /// Advance the cascade by exactly one round.
    ///
    /// Returns `Pending` with the cells that exploded, or `Settled` once the
    /// move has been finalized.
    #[instrument(level = "debug", skip(self), fields(round = self.rounds))]
    pub fn step_cascade(&mut self) -> Result<CascadeStatus, GameError> {
        let mover = match (self.status, self.mover) {
            (GameStatus::Resolving, Some(mover)) => mover,
            _ => return Err(IllegalMove::NotResolving.into()),
        };

        if self.is_decided(mover) {
            debug!("opponent eliminated, cascade cut short");
            self.settle(mover);
            return Ok(CascadeStatus::Settled);
        }

        let Some(round) = propagate(&self.board, mover) else {
            self.settle(mover);
            return Ok(CascadeStatus::Settled);
        };

        if self.rounds >= self.config.max_cascade_rounds {
            warn!(rounds = self.rounds, "cascade round limit reached");
            return Err(GameError::CascadeLimit {
                rounds: self.rounds,
            });
        }

        self.board = round.board;
        self.rounds += 1;
        self.explosions += round.exploded.len() as u32;
        debug!(exploded = ?round.exploded, "round resolved");
        Ok(CascadeStatus::Pending {
            exploded: round.exploded,
        })
    }

    /// Run rounds until the move is finalized.
    #[instrument(skip(self))]
    pub fn run_to_settled(&mut self) -> Result<MoveOutcome, GameError> {
        while !self.step_cascade()?.is_settled() {}
        Ok(MoveOutcome {
            rounds: self.rounds,
            explosions: self.explosions,
            status: self.status,
        })
    }

    /// Place and fully resolve a move.
    pub fn play(&mut self, index: usize, player: Player) -> Result<MoveOutcome, GameError> {
        self.place_orb(index, player)?;
        self.run_to_settled()
    }

    /// Discard everything, including any cascade in flight, and reopen the
    /// game for the first player.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn restart(&mut self) {
        let grid = *self.grid();
        *self = Self::fresh(self.config.clone(), grid);
        self.start();
    }

    // === Internals ===

    fn check_placement(&self, index: usize, player: Player) -> Result<Cell, GameError> {
        let cell = self.board.cell(index)?;
        match self.status {
            GameStatus::NotStarted => return Err(IllegalMove::NotStarted.into()),
            GameStatus::Resolving => return Err(IllegalMove::InputLocked.into()),
            GameStatus::Over(_) => return Err(IllegalMove::GameOver.into()),
            GameStatus::AwaitingMove(expected) if expected != player => {
                return Err(IllegalMove::WrongPlayer {
                    expected,
                    actual: player,
                }
                .into());
            }
            GameStatus::AwaitingMove(_) => {}
        }
        match cell.owner {
            Some(owner) if owner != player => Err(IllegalMove::OpponentCell { index, owner }.into()),
            _ => Ok(cell),
        }
    }

    /// Settling now would pass the win guard and the opponent has nothing
    /// left; later rounds can only convert more cells to the mover.
    fn is_decided(&self, mover: Player) -> bool {
        self.turn + 1 >= WIN_GUARD_TURNS
            && self.board.score(mover.opponent()) == 0
            && self.board.score(mover) > 0
    }

    fn settle(&mut self, mover: Player) {
        self.turn += 1;
        self.mover = None;
        self.status = match self.board.sole_owner() {
            Some(winner) if self.turn >= WIN_GUARD_TURNS => {
                info!(%winner, turn = self.turn, "game over");
                GameStatus::Over(winner)
            }
            _ => GameStatus::AwaitingMove(mover.opponent()),
        };
        debug!(
            rounds = self.rounds,
            explosions = self.explosions,
            status = %self.status,
            "cascade settled"
        );
    }
}
