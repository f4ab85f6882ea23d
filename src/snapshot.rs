//! Read-only views of a match for front ends.
//!
//! A snapshot is a plain copy of what one seat may see. Front ends render and
//! branch on it; they never mutate engine state through it.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::board::{Board, Cell, Mask, TargetView};
use crate::common::Coord;
use crate::game::GameStatus;
use crate::player::Player;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipStatus {
    pub name: &'static str,
    pub size: usize,
    pub hits: usize,
    pub sunk: bool,
    /// Known only to the owner, or to everyone once the ship is sunk.
    pub positions: Option<Vec<Coord>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<Cell>>,
    pub ships: Vec<ShipStatus>,
}

impl BoardSnapshot {
    /// Full view, as the board's owner sees it.
    pub fn owner_view(board: &Board) -> Self {
        Self::capture(board, true)
    }

    /// Opponent view: intact ship cells read as EMPTY and only sunk ships
    /// disclose their positions.
    pub fn opponent_view(board: &Board) -> Self {
        Self::capture(board, false)
    }

    fn capture(board: &Board, reveal: bool) -> Self {
        let mut cells = board.grid();
        if !reveal {
            for cell in cells.iter_mut().flatten() {
                if *cell == Cell::Ship {
                    *cell = Cell::Empty;
                }
            }
        }
        let ships = board
            .ships()
            .iter()
            .map(|ship| ShipStatus {
                name: ship.name(),
                size: ship.size(),
                hits: ship.hit_count(),
                sunk: ship.is_sunk(),
                positions: (reveal || ship.is_sunk()).then(|| ship.positions().to_vec()),
            })
            .collect();
        BoardSnapshot {
            rows: board.rows(),
            cols: board.cols(),
            cells,
            ships,
        }
    }

    /// Number of ships not yet sunk.
    pub fn ships_afloat(&self) -> usize {
        self.ships.iter().filter(|s| !s.sunk).count()
    }

    /// Rebuild the targeting view a strategy needs from this snapshot.
    pub fn target_view(&self) -> TargetView {
        let mut fired = Mask::new(self.rows, self.cols);
        let mut hits = fired;
        let mut sunk = fired;
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Hit => {
                        let _ = fired.set(r, c);
                        let _ = hits.set(r, c);
                    }
                    Cell::Miss => {
                        let _ = fired.set(r, c);
                    }
                    Cell::Empty | Cell::Ship => {}
                }
            }
        }
        for ship in self.ships.iter().filter(|s| s.sunk) {
            for &(r, c) in ship.positions.iter().flatten() {
                let _ = sunk.set(r, c);
            }
        }
        TargetView {
            fired,
            hits,
            sunk,
            remaining: self
                .ships
                .iter()
                .filter(|s| !s.sunk)
                .map(|s| s.size)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct PlayerSnapshot {
    pub name: String,
    pub is_ai: bool,
    pub has_lost: bool,
    pub board: BoardSnapshot,
}

impl PlayerSnapshot {
    pub(crate) fn new(player: &Player, reveal: bool) -> Self {
        let board = if reveal {
            BoardSnapshot::owner_view(player.board())
        } else {
            BoardSnapshot::opponent_view(player.board())
        };
        PlayerSnapshot {
            name: player.name().to_string(),
            is_ai: player.is_ai(),
            has_lost: player.has_lost(),
            board,
        }
    }
}

/// Everything one seat may know about the match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct GameSnapshot {
    /// Seat this snapshot was taken for.
    pub viewer: usize,
    pub current_turn: usize,
    pub status: GameStatus,
    pub players: [PlayerSnapshot; 2],
}

impl GameSnapshot {
    pub fn is_my_turn(&self) -> bool {
        self.status == GameStatus::InProgress && self.current_turn == self.viewer
    }

    pub fn me(&self) -> &PlayerSnapshot {
        &self.players[self.viewer]
    }

    pub fn opponent(&self) -> &PlayerSnapshot {
        &self.players[1 - self.viewer]
    }
}
