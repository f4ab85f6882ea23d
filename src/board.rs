//! Game board: ship placement, shot resolution and defeat detection.

use alloc::vec::Vec;
use core::fmt;
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{Coord, GameError, PlacementError, ShotOutcome};
use crate::config::{RepeatPolicy, BOARD_COLS, BOARD_ROWS};
use crate::ship::{footprint, Orientation, Ship};

pub(crate) type Mask = BitBoard<u128>;

/// State of one grid cell as seen by the board's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum Cell {
    Empty,
    Ship,
    Hit,
    Miss,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '~',
            Cell::Ship => 'S',
            Cell::Hit => 'X',
            Cell::Miss => 'O',
        }
    }
}

/// A player's grid and the ships on it.
///
/// Occupancy, hits and misses are bitboards; the cell grid is derived from
/// them, so the set of fired cells is always `hits | misses`.
#[derive(Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    ships: Vec<Ship>,
    ship_map: Mask,
    hits: Mask,
    misses: Mask,
    repeat_policy: RepeatPolicy,
}

impl Board {
    /// Create an empty `rows×cols` board.
    ///
    /// Occupancy, hits and misses are each packed into one `u128`, so a board
    /// holds at most 128 cells (10×10, 8×16 and 11×11 fit; 12×12 does not).
    /// Larger or zero-sized grids fail with [`GameError::BitBoard`] carrying
    /// [`BitBoardError::SizeTooLarge`](crate::BitBoardError::SizeTooLarge) or
    /// [`BitBoardError::EmptyDimensions`](crate::BitBoardError::EmptyDimensions).
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        let empty = Mask::try_new(rows, cols)?;
        Ok(Self::from_empty(empty))
    }

    /// Empty 10×10 board.
    pub fn standard() -> Self {
        Self::from_empty(Mask::new(BOARD_ROWS, BOARD_COLS))
    }

    fn from_empty(empty: Mask) -> Self {
        Board {
            rows: empty.rows(),
            cols: empty.cols(),
            ships: Vec::new(),
            ship_map: empty,
            hits: empty,
            misses: empty,
            repeat_policy: RepeatPolicy::default(),
        }
    }

    pub fn with_repeat_policy(mut self, policy: RepeatPolicy) -> Self {
        self.repeat_policy = policy;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Ships placed so far, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Board occupancy mask of all ships.
    pub fn ship_map(&self) -> BitBoard<u128> {
        self.ship_map
    }

    /// Validate a placement and return the cells it would cover.
    pub fn check_placement(
        &self,
        ship: &Ship,
        start: Coord,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, GameError> {
        if ship.is_placed() {
            return Err(GameError::ShipAlreadyPlaced);
        }
        if ship.size() == 0 {
            return Err(GameError::EmptyShip);
        }
        let cells =
            footprint(ship.size(), start, orientation).ok_or(GameError::ShipOutOfBounds)?;
        if cells.iter().any(|&(r, c)| !self.in_bounds(r, c)) {
            return Err(GameError::ShipOutOfBounds);
        }
        if cells
            .iter()
            .any(|&(r, c)| self.ship_map.get(r, c).unwrap_or(false))
        {
            return Err(GameError::ShipOverlaps);
        }
        Ok(cells)
    }

    /// `true` if `ship` fits at `start` without leaving the grid or touching
    /// another ship. Never mutates.
    pub fn can_place(&self, ship: &Ship, start: Coord, orientation: Orientation) -> bool {
        self.check_placement(ship, start, orientation).is_ok()
    }

    /// Place `ship` and take ownership of it. On failure nothing changes and
    /// the ship is handed back inside the error.
    pub fn place_ship(
        &mut self,
        mut ship: Ship,
        start: Coord,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        let mask = match self
            .check_placement(&ship, start, orientation)
            .and_then(|cells| Ok(Mask::from_iter(self.rows, self.cols, cells)?))
        {
            Ok(mask) => mask,
            Err(reason) => {
                debug!("rejected {} at {:?} {:?}: {}", ship.name(), start, orientation, reason);
                return Err(PlacementError::new(ship, reason));
            }
        };
        if let Err(reason) = ship.place(start, orientation) {
            return Err(PlacementError::new(ship, reason));
        }
        debug!("placed {} at {:?} {:?}", ship.name(), start, orientation);
        self.ship_map |= mask;
        self.ships.push(ship);
        Ok(())
    }

    /// Every legal `(start, orientation)` for `ship` on the current board.
    pub fn legal_placements(&self, ship: &Ship) -> Vec<(Coord, Orientation)> {
        let mut slots = Vec::new();
        for r in 0..self.rows {
            for c in 0..self.cols {
                for orient in Orientation::ALL {
                    if self.can_place(ship, (r, c), orient) {
                        slots.push(((r, c), orient));
                    }
                }
            }
        }
        slots
    }

    /// Returns a random legal `(start, orientation)` for `ship`.
    ///
    /// Samples up to `attempts` random slots, then scans the whole board and
    /// picks uniformly among the legal slots. Fails with
    /// [`GameError::PlacementExhausted`] when there are none.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship: &Ship,
        attempts: usize,
    ) -> Result<(Coord, Orientation), GameError> {
        if ship.is_placed() {
            return Err(GameError::ShipAlreadyPlaced);
        }
        let len = ship.size();
        for _ in 0..attempts {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (Some(self.rows - 1), self.cols.checked_sub(len)),
                Orientation::Vertical => (self.rows.checked_sub(len), Some(self.cols - 1)),
            };
            let (Some(max_r), Some(max_c)) = (max_r, max_c) else {
                continue;
            };
            let start = (rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            if self.can_place(ship, start, orient) {
                return Ok((start, orient));
            }
        }
        debug!("random sampling failed for {}, scanning all slots", ship.name());
        self.legal_placements(ship)
            .choose(rng)
            .copied()
            .ok_or(GameError::PlacementExhausted { ship: ship.name() })
    }

    /// Resolve a shot at `coord`. Exactly one outcome per call; only HIT,
    /// SUNK and MISS change the board.
    pub fn take_shot(&mut self, coord: Coord) -> ShotOutcome {
        let (r, c) = coord;
        if !self.in_bounds(r, c) {
            return ShotOutcome::Invalid;
        }
        if self.is_fired(coord) {
            return match self.repeat_policy {
                RepeatPolicy::Reject => ShotOutcome::Repeat,
                RepeatPolicy::CountAsMiss => ShotOutcome::Miss,
            };
        }
        if let Some(ship) = self.ships.iter_mut().find(|s| s.occupies(coord)) {
            ship.register_hit(coord);
            let _ = self.hits.set(r, c);
            if ship.is_sunk() {
                debug!("{:?} sank {}", coord, ship.name());
                return ShotOutcome::Sunk(ship.name());
            }
            debug!("{:?} hit {}", coord, ship.name());
            return ShotOutcome::Hit;
        }
        let _ = self.misses.set(r, c);
        debug!("{:?} missed", coord);
        ShotOutcome::Miss
    }

    /// Returns `true` when at least one ship is placed and every ship is sunk.
    pub fn all_ships_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// `true` if `coord` has already been fired upon.
    pub fn is_fired(&self, (r, c): Coord) -> bool {
        self.hits.get(r, c).unwrap_or(false) || self.misses.get(r, c).unwrap_or(false)
    }

    /// Cells fired upon so far, row-major.
    pub fn shots_taken(&self) -> impl Iterator<Item = Coord> {
        (self.hits | self.misses).iter_set_bits()
    }

    pub fn shot_count(&self) -> usize {
        self.hits.count_ones() + self.misses.count_ones()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if !self.in_bounds(row, col) {
            return None;
        }
        let cell = if self.hits.get(row, col).unwrap_or(false) {
            Cell::Hit
        } else if self.misses.get(row, col).unwrap_or(false) {
            Cell::Miss
        } else if self.ship_map.get(row, col).unwrap_or(false) {
            Cell::Ship
        } else {
            Cell::Empty
        };
        Some(cell)
    }

    /// The full cell grid, row by row.
    pub fn grid(&self) -> Vec<Vec<Cell>> {
        (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| self.cell(r, c).unwrap_or(Cell::Empty))
                    .collect()
            })
            .collect()
    }

    pub fn remaining_ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships.iter().filter(|s| !s.is_sunk())
    }

    /// Lengths of ships still afloat, in placement order.
    pub fn remaining_ship_lengths(&self) -> Vec<usize> {
        self.remaining_ships().map(Ship::size).collect()
    }

    /// What an opponent may know about this board.
    pub fn target_view(&self) -> TargetView {
        let mut sunk = Mask::new(self.rows, self.cols);
        for ship in self.ships.iter().filter(|s| s.is_sunk()) {
            for &(r, c) in ship.positions() {
                let _ = sunk.set(r, c);
            }
        }
        TargetView {
            fired: self.hits | self.misses,
            hits: self.hits,
            sunk,
            remaining: self.remaining_ship_lengths(),
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{} {{", self.rows, self.cols)?;
        for r in 0..self.rows {
            f.write_str("  ")?;
            for c in 0..self.cols {
                let symbol = self.cell(r, c).map_or('?', Cell::symbol);
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  ships: {:?}", self.ships)?;
        write!(f, "}}")
    }
}

/// The public knowledge about an opponent's board: which cells were fired,
/// which of those hit, which belong to sunk ships, and the lengths of ships
/// still afloat. Strategies choose shots from this view only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetView {
    pub(crate) fired: Mask,
    pub(crate) hits: Mask,
    pub(crate) sunk: Mask,
    pub(crate) remaining: Vec<usize>,
}

impl TargetView {
    pub fn rows(&self) -> usize {
        self.fired.rows()
    }

    pub fn cols(&self) -> usize {
        self.fired.cols()
    }

    pub fn in_bounds(&self, (r, c): Coord) -> bool {
        r < self.rows() && c < self.cols()
    }

    pub fn is_fired(&self, (r, c): Coord) -> bool {
        self.fired.get(r, c).unwrap_or(false)
    }

    pub fn is_hit(&self, (r, c): Coord) -> bool {
        self.hits.get(r, c).unwrap_or(false)
    }

    /// Hit cell belonging to a ship that has been sunk.
    pub fn is_sunk_cell(&self, (r, c): Coord) -> bool {
        self.sunk.get(r, c).unwrap_or(false)
    }

    /// Lengths of enemy ships not yet sunk.
    pub fn remaining_ship_lengths(&self) -> &[usize] {
        &self.remaining
    }

    /// Cells never fired upon, row-major.
    pub fn unfired_cells(&self) -> impl Iterator<Item = Coord> {
        (!self.fired).iter_set_bits()
    }
}
