//! Turn coordination between two players.

use alloc::vec::Vec;
use log::{info, warn};
use rand::rngs::SmallRng;

use crate::common::{Coord, FireOutcome, GameError, PlacementError};
use crate::config::{standard_fleet, GameConfig, PLACEMENT_ATTEMPTS};
use crate::player::Player;
use crate::ship::{Orientation, Ship};
use crate::snapshot::{GameSnapshot, PlayerSnapshot};
use crate::strategy::place_fleet;

/// Current status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    /// Terminal. `winner` is the seat index of the player who sank the last ship.
    GameOver { winner: usize },
}

/// Orchestrates a fixed pair of players: whose move it is, resolving a shot
/// into an outcome and a turn transition, and detecting the end of the match.
#[derive(Debug)]
pub struct GameEngine {
    players: [Player; 2],
    current_turn: usize,
    status: GameStatus,
    rejected_shot_passes_turn: bool,
    placement_attempts: usize,
}

impl GameEngine {
    /// Start a match; `player1` moves first.
    pub fn new(player1: Player, player2: Player) -> Self {
        Self {
            players: [player1, player2],
            current_turn: 0,
            status: GameStatus::InProgress,
            rejected_shot_passes_turn: true,
            placement_attempts: PLACEMENT_ATTEMPTS,
        }
    }

    /// Start a match with the turn and placement rules from `config`.
    pub fn with_config(player1: Player, player2: Player, config: &GameConfig) -> Self {
        Self {
            rejected_shot_passes_turn: config.rejected_shot_passes_turn,
            placement_attempts: config.placement_attempts,
            ..Self::new(player1, player2)
        }
    }

    /// Index (0 or 1) of the player whose move it is.
    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_turn]
    }

    pub fn opponent(&self) -> &Player {
        &self.players[1 - self.current_turn]
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// `true` once the player not on the move has lost every ship.
    pub fn is_game_over(&self) -> bool {
        self.opponent().has_lost()
    }

    /// Seat index of the winner, once the match is over.
    pub fn winner(&self) -> Option<usize> {
        match self.status {
            GameStatus::GameOver { winner } => Some(winner),
            GameStatus::InProgress => None,
        }
    }

    /// Place `ship` on the board of `seat`.
    pub fn place_ship(
        &mut self,
        seat: usize,
        ship: Ship,
        start: Coord,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        match self.players.get_mut(seat) {
            Some(player) => player.add_ship(ship, start, orientation),
            None => Err(PlacementError::new(ship, GameError::UnknownSeat(seat))),
        }
    }

    /// Randomly place `fleet` on the board of `seat`, whoever controls it.
    pub fn place_fleet(
        &mut self,
        seat: usize,
        rng: &mut SmallRng,
        fleet: Vec<Ship>,
    ) -> Result<(), GameError> {
        let attempts = self.placement_attempts;
        let player = self
            .players
            .get_mut(seat)
            .ok_or(GameError::UnknownSeat(seat))?;
        place_fleet(rng, player.board_mut(), fleet, attempts)
    }

    /// Let every computer-controlled player with an empty board place the
    /// standard fleet.
    pub fn auto_place_ai_fleets(&mut self, rng: &mut SmallRng) -> Result<(), GameError> {
        let attempts = self.placement_attempts;
        for player in self.players.iter_mut() {
            if player.is_ai() && player.ships().is_empty() {
                player.auto_place(rng, standard_fleet(), attempts)?;
            }
        }
        Ok(())
    }

    /// The current player fires at the opponent's board.
    ///
    /// Returns [`FireOutcome::Win`] and ends the match when the shot sinks the
    /// opponent's last ship; the turn does not change in that case. Any other
    /// outcome passes the turn, except that REPEAT and INVALID keep it when
    /// the engine is configured to re-prompt.
    pub fn fire(&mut self, row: usize, col: usize) -> Result<FireOutcome, GameError> {
        if let GameStatus::GameOver { .. } = self.status {
            warn!("shot at {:?} after the game ended", (row, col));
            return Err(GameError::GameOver);
        }
        let attacker = self.current_turn;
        let outcome = {
            let (shooter, defender) = self.split_mut();
            let outcome = shooter.fire_at(defender.board_mut(), (row, col));
            info!("{} fires at {:?}: {}", shooter.name(), (row, col), outcome);
            outcome
        };

        if self.players[1 - attacker].has_lost() {
            self.status = GameStatus::GameOver { winner: attacker };
            info!("{} wins", self.players[attacker].name());
            return Ok(FireOutcome::Win);
        }
        if outcome.is_resolved() || self.rejected_shot_passes_turn {
            self.end_turn();
        }
        Ok(FireOutcome::Shot(outcome))
    }

    /// Fire on behalf of `seat`, rejecting shots from the seat not on the move.
    pub fn fire_as(&mut self, seat: usize, row: usize, col: usize) -> Result<FireOutcome, GameError> {
        if seat > 1 {
            return Err(GameError::UnknownSeat(seat));
        }
        if seat != self.current_turn {
            warn!("seat {} fired out of turn", seat);
            return Err(GameError::NotYourTurn { seat });
        }
        self.fire(row, col)
    }

    /// If the current player is computer-controlled, let its strategy choose
    /// a target and fire. `Ok(None)` when a human is on the move.
    pub fn ai_take_turn(
        &mut self,
        rng: &mut SmallRng,
    ) -> Result<Option<(Coord, FireOutcome)>, GameError> {
        if let GameStatus::GameOver { .. } = self.status {
            return Err(GameError::GameOver);
        }
        let attacker = self.current_turn;
        let coord = {
            let (shooter, defender) = self.split_mut();
            let Some(strategy) = shooter.strategy_mut() else {
                return Ok(None);
            };
            strategy
                .choose_shot(rng, &defender.board().target_view())
                .ok_or(GameError::NoShotAvailable)?
        };
        let outcome = self.fire(coord.0, coord.1)?;
        if let Some(strategy) = self.players[attacker].strategy_mut() {
            strategy.handle_shot_result(coord, &outcome);
        }
        Ok(Some((coord, outcome)))
    }

    /// What `seat` may see: its own board in full, the opponent's board with
    /// unhit ships hidden.
    pub fn snapshot_for(&self, seat: usize) -> Result<GameSnapshot, GameError> {
        if seat > 1 {
            return Err(GameError::UnknownSeat(seat));
        }
        let players = [0, 1].map(|idx| {
            let player = &self.players[idx];
            PlayerSnapshot::new(player, idx == seat)
        });
        Ok(GameSnapshot {
            viewer: seat,
            current_turn: self.current_turn,
            status: self.status,
            players,
        })
    }

    fn end_turn(&mut self) {
        self.current_turn = 1 - self.current_turn;
    }

    fn split_mut(&mut self) -> (&mut Player, &mut Player) {
        let [first, second] = &mut self.players;
        if self.current_turn == 0 {
            (first, second)
        } else {
            (second, first)
        }
    }
}
