//! Ship definitions and placement geometry.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::common::{Coord, GameError};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Columns increase from the start cell.
    Horizontal,
    /// Rows increase from the start cell.
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// The `i`-th cell from `start` along this axis, or `None` on overflow.
    pub fn offset(self, (row, col): Coord, i: usize) -> Option<Coord> {
        match self {
            Orientation::Horizontal => Some((row, col.checked_add(i)?)),
            Orientation::Vertical => Some((row.checked_add(i)?, col)),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        }
    }
}

impl TryFrom<char> for Orientation {
    type Error = GameError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'H' | 'h' => Ok(Orientation::Horizontal),
            'V' | 'v' => Ok(Orientation::Vertical),
            other => Err(GameError::InvalidDirection(other)),
        }
    }
}

impl FromStr for Orientation {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("horizontal") {
            return Ok(Orientation::Horizontal);
        }
        if s.eq_ignore_ascii_case("vertical") {
            return Ok(Orientation::Vertical);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Orientation::try_from(c),
            (first, _) => Err(GameError::InvalidDirection(first.unwrap_or('\0'))),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// A fresh, unplaced ship of this type.
    pub fn build(&self) -> Ship {
        Ship::new(self.name, self.length)
    }
}

/// Cells covered by a ship of `size` laid out from `start`.
///
/// Returns `None` when a coordinate would overflow `usize`.
pub fn footprint(size: usize, start: Coord, orientation: Orientation) -> Option<Vec<Coord>> {
    (0..size).map(|i| orientation.offset(start, i)).collect()
}

/// One vessel: a run of cells fixed once at placement, plus the hits taken.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    name: &'static str,
    size: usize,
    orientation: Option<Orientation>,
    positions: Vec<Coord>,
    hits: BTreeSet<Coord>,
}

impl Ship {
    /// Create an unplaced ship.
    pub fn new(name: &'static str, size: usize) -> Self {
        Ship {
            name,
            size,
            orientation: None,
            positions: Vec::new(),
            hits: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Occupied cells in order from the start cell; empty until placed.
    pub fn positions(&self) -> &[Coord] {
        &self.positions
    }

    /// Orientation chosen at placement.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn is_placed(&self) -> bool {
        !self.positions.is_empty()
    }

    /// Fix the ship's cells starting at `start` along `orientation`.
    ///
    /// No bounds check happens here; the board validates before calling.
    pub fn place(&mut self, start: Coord, orientation: Orientation) -> Result<(), GameError> {
        if self.is_placed() {
            return Err(GameError::ShipAlreadyPlaced);
        }
        if self.size == 0 {
            return Err(GameError::EmptyShip);
        }
        let cells =
            footprint(self.size, start, orientation).ok_or(GameError::ShipOutOfBounds)?;
        self.positions = cells;
        self.orientation = Some(orientation);
        Ok(())
    }

    pub fn occupies(&self, coord: Coord) -> bool {
        self.positions.contains(&coord)
    }

    /// Record a hit at `coord`. Returns `false`, changing nothing, when the
    /// ship does not occupy that cell.
    pub fn register_hit(&mut self, coord: Coord) -> bool {
        if self.occupies(coord) {
            self.hits.insert(coord);
            true
        } else {
            false
        }
    }

    /// Cells hit so far.
    pub fn hits(&self) -> impl Iterator<Item = Coord> + '_ {
        self.hits.iter().copied()
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.len() == self.size
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", size: {}, origin: {:?}, orientation: {:?}, hits: {} }}",
            self.name,
            self.size,
            self.positions.first(),
            self.orientation.map(Orientation::as_char),
            self.hits.len(),
        )
    }
}
