//! Shot-selection and fleet-placement policies for computer-controlled players.

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use log::debug;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::board::{Board, TargetView};
use crate::common::{Coord, FireOutcome, GameError};
use crate::config::Difficulty;
use crate::ship::Ship;

/// Interface implemented by the different AI policies.
///
/// A strategy is responsible for:
/// - Placing its owner's fleet
/// - Selecting targets to attack
/// - Handling feedback from its shots
pub trait Strategy: Send {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Place every ship of `fleet`, in order, onto `board`.
    fn place_ships(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: Vec<Ship>,
        attempts: usize,
    ) -> Result<(), GameError> {
        place_fleet(rng, board, fleet, attempts)
    }

    /// Choose the next target given what is known about the opponent's board.
    /// Returns `None` once no untried coordinate is left.
    fn choose_shot(&mut self, rng: &mut SmallRng, target: &TargetView) -> Option<Coord>;

    /// Inform the strategy of the result of its last shot.
    fn handle_shot_result(&mut self, _coord: Coord, _outcome: &FireOutcome) {}
}

/// Place `fleet` in order, each ship at a random legal slot.
///
/// Each ship gets `attempts` random samples and then an exhaustive scan, so
/// this never loops forever: a board that cannot take the next ship yields
/// [`GameError::PlacementExhausted`]. All or nothing: on failure `board` is
/// left exactly as it was.
pub fn place_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Board,
    fleet: Vec<Ship>,
    attempts: usize,
) -> Result<(), GameError> {
    let mut staged = board.clone();
    for ship in fleet {
        let (start, orient) = staged.random_placement(rng, &ship, attempts)?;
        staged.place_ship(ship, start, orient)?;
    }
    *board = staged;
    Ok(())
}

/// Uniform random targeting that never repeats one of its own choices.
#[derive(Debug, Clone, Default)]
pub struct RandomStrategy {
    previous_shots: BTreeSet<Coord>,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coordinates this instance has already chosen.
    pub fn previous_shots(&self) -> &BTreeSet<Coord> {
        &self.previous_shots
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_shot(&mut self, rng: &mut SmallRng, target: &TargetView) -> Option<Coord> {
        let (rows, cols) = (target.rows(), target.cols());
        // Rejection sampling first; fall back to the explicit free list once
        // the board is mostly used up.
        for _ in 0..rows * cols {
            let choice = (rng.random_range(0..rows), rng.random_range(0..cols));
            if self.previous_shots.insert(choice) {
                return Some(choice);
            }
        }
        let unused: Vec<Coord> = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .filter(|coord| !self.previous_shots.contains(coord))
            .collect();
        let choice = *unused.choose(rng)?;
        debug!("random strategy fell back to free list ({} left)", unused.len());
        self.previous_shots.insert(choice);
        Some(choice)
    }
}

/// The strategy used for a nominal difficulty tier.
pub fn strategy_for(difficulty: Difficulty) -> Box<dyn Strategy> {
    match difficulty {
        Difficulty::Easy | Difficulty::Medium | Difficulty::Hard => {
            Box::new(RandomStrategy::new())
        }
    }
}
