use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::BitBoard;
use crate::board::Board;
use crate::common::GameError;
use crate::ship::{Ship, ShipType};

pub const BOARD_ROWS: usize = 10;
pub const BOARD_COLS: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// The standard fleet, in the order ships are placed.
pub const FLEET: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Random samples tried per ship before falling back to an exhaustive scan.
pub const PLACEMENT_ATTEMPTS: usize = 100;

const _: () = assert!(BOARD_ROWS * BOARD_COLS <= 128);

/// Fresh, unplaced ships of the standard fleet.
pub fn standard_fleet() -> Vec<Ship> {
    FLEET.iter().map(ShipType::build).collect()
}

/// Nominal AI difficulty. Every tier currently plays the uniform random policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize, clap::ValueEnum),
    serde(rename_all = "lowercase")
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// How a board answers a shot at a cell it has already recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RepeatPolicy {
    /// Report `REPEAT`.
    #[default]
    Reject,
    /// Report `MISS`. Still no mutation.
    CountAsMiss,
}

/// Match settings. Defaults reproduce the standard 10×10 game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub difficulty: Difficulty,
    pub repeat_policy: RepeatPolicy,
    /// When `false`, REPEAT and INVALID shots keep the turn with the shooter.
    pub rejected_shot_passes_turn: bool,
    pub placement_attempts: usize,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            difficulty: Difficulty::default(),
            repeat_policy: RepeatPolicy::default(),
            rejected_shot_passes_turn: true,
            placement_attempts: PLACEMENT_ATTEMPTS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Check that a board of the configured size can be built and has room
    /// for the standard fleet.
    pub fn validate(&self) -> Result<(), GameError> {
        let board = BitBoard::<u128>::try_new(self.rows, self.cols)?;
        let cells = board.rows() * board.cols();
        if cells < TOTAL_SHIP_CELLS {
            return Err(GameError::BoardTooSmall {
                cells,
                needed: TOTAL_SHIP_CELLS,
            });
        }
        Ok(())
    }

    /// An empty board with the configured dimensions and repeat policy.
    pub fn new_board(&self) -> Result<Board, GameError> {
        Ok(Board::new(self.rows, self.cols)?.with_repeat_policy(self.repeat_policy))
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
