use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use log::info;
use rand::rngs::SmallRng;

use crate::board::Board;
use crate::common::{Coord, FireOutcome, GameError, PlacementError, ShotOutcome};
use crate::config::Difficulty;
use crate::ship::{Orientation, Ship};
use crate::strategy::{strategy_for, Strategy};

/// A named participant owning exactly one board. Computer-controlled players
/// carry the strategy that picks their shots and places their fleet.
pub struct Player {
    name: String,
    board: Board,
    strategy: Option<Box<dyn Strategy>>,
}

impl Player {
    /// A human-controlled player.
    pub fn new(name: impl Into<String>, board: Board) -> Self {
        Self {
            name: name.into(),
            board,
            strategy: None,
        }
    }

    /// A computer-controlled player driven by `strategy`.
    pub fn with_strategy(name: impl Into<String>, board: Board, strategy: Box<dyn Strategy>) -> Self {
        Self {
            name: name.into(),
            board,
            strategy: Some(strategy),
        }
    }

    /// A computer-controlled player using the policy for `difficulty`.
    pub fn computer(name: impl Into<String>, board: Board, difficulty: Difficulty) -> Self {
        Self::with_strategy(name, board, strategy_for(difficulty))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn is_ai(&self) -> bool {
        self.strategy.is_some()
    }

    pub(crate) fn strategy_mut(&mut self) -> Option<&mut (dyn Strategy + 'static)> {
        self.strategy.as_deref_mut()
    }

    /// Place `ship` on this player's board.
    pub fn add_ship(
        &mut self,
        ship: Ship,
        start: Coord,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        let name = ship.name();
        self.board.place_ship(ship, start, orientation)?;
        info!("{} placed {} at {:?} {:?}", self.name, name, start, orientation);
        Ok(())
    }

    /// Let this player's strategy place `fleet`. Human players place their
    /// own ships through [`Player::add_ship`] and get `Ok(false)` here.
    pub fn auto_place(
        &mut self,
        rng: &mut SmallRng,
        fleet: Vec<Ship>,
        attempts: usize,
    ) -> Result<bool, GameError> {
        let Some(strategy) = self.strategy.as_deref_mut() else {
            return Ok(false);
        };
        strategy.place_ships(rng, &mut self.board, fleet, attempts)?;
        info!("{} placed {} ships", self.name, self.board.ships().len());
        Ok(true)
    }

    /// Fire a shot at an opponent's board. The shooter's own board is untouched.
    pub fn fire_at(&self, opponent_board: &mut Board, coord: Coord) -> ShotOutcome {
        opponent_board.take_shot(coord)
    }

    /// Let the strategy pick a target and fire at `opponent` directly,
    /// outside any turn coordination. `Ok(None)` for human players.
    pub fn take_ai_shot(
        &mut self,
        rng: &mut SmallRng,
        opponent: &mut Player,
    ) -> Result<Option<(Coord, ShotOutcome)>, GameError> {
        let Some(strategy) = self.strategy.as_deref_mut() else {
            return Ok(None);
        };
        let coord = strategy
            .choose_shot(rng, &opponent.board.target_view())
            .ok_or(GameError::NoShotAvailable)?;
        let outcome = opponent.board.take_shot(coord);
        strategy.handle_shot_result(coord, &FireOutcome::from(outcome));
        Ok(Some((coord, outcome)))
    }

    /// Returns `true` if all of the player's ships are sunk.
    pub fn has_lost(&self) -> bool {
        self.board.all_ships_sunk()
    }

    /// Every ship this player has placed.
    pub fn ships(&self) -> &[Ship] {
        self.board.ships()
    }

    /// Ships that have not been sunk yet.
    pub fn remaining_ships(&self) -> Vec<&Ship> {
        self.board.remaining_ships().collect()
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("strategy", &self.strategy.as_ref().map(|s| s.name()))
            .field("board", &self.board)
            .finish()
    }
}
