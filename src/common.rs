//! Common types for the rules engine: coordinates, shot outcomes and errors.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::ship::Ship;

/// Grid coordinate as `(row, col)`.
pub type Coord = (usize, usize);

/// Result of a single shot against a board.
///
/// Front ends branch on [`ShotOutcome::tag`], so the vocabulary is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum ShotOutcome {
    /// Shot struck a ship that is still afloat.
    Hit,
    /// Shot struck the last intact segment of a ship, carrying its name.
    Sunk(&'static str),
    /// Shot landed in open water.
    Miss,
    /// Cell had already been fired upon; nothing changed.
    Repeat,
    /// Coordinate lies outside the board; nothing changed.
    Invalid,
}

impl ShotOutcome {
    pub fn tag(&self) -> &'static str {
        match self {
            ShotOutcome::Hit => "HIT",
            ShotOutcome::Sunk(_) => "SUNK",
            ShotOutcome::Miss => "MISS",
            ShotOutcome::Repeat => "REPEAT",
            ShotOutcome::Invalid => "INVALID",
        }
    }

    /// `true` for HIT, SUNK and MISS: the board recorded a new shot.
    pub fn is_resolved(&self) -> bool {
        matches!(self, ShotOutcome::Hit | ShotOutcome::Sunk(_) | ShotOutcome::Miss)
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit | ShotOutcome::Sunk(_))
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotOutcome::Sunk(name) => write!(f, "SUNK({})", name),
            other => f.write_str(other.tag()),
        }
    }
}

/// Result of [`GameEngine::fire`](crate::GameEngine::fire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum FireOutcome {
    /// The shot was resolved and the match goes on.
    Shot(ShotOutcome),
    /// The shot sank the defender's last ship.
    Win,
}

impl FireOutcome {
    pub fn tag(&self) -> &'static str {
        match self {
            FireOutcome::Shot(outcome) => outcome.tag(),
            FireOutcome::Win => "WIN",
        }
    }
}

impl From<ShotOutcome> for FireOutcome {
    fn from(outcome: ShotOutcome) -> Self {
        FireOutcome::Shot(outcome)
    }
}

impl fmt::Display for FireOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FireOutcome::Shot(outcome) => fmt::Display::fmt(outcome, f),
            FireOutcome::Win => f.write_str("WIN"),
        }
    }
}

/// Errors returned by placement and turn-coordination operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Underlying bitboard error (e.g., board too large for its storage).
    BitBoard(BitBoardError),
    /// Board has fewer cells than the fleet occupies.
    BoardTooSmall { cells: usize, needed: usize },
    /// Orientation was neither `H` nor `V`.
    InvalidDirection(char),
    /// Ship has zero length.
    EmptyShip,
    /// Ship already has its positions fixed.
    ShipAlreadyPlaced,
    /// Some ship cell would fall outside the board.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// No legal slot is left on the board for the named ship.
    PlacementExhausted { ship: &'static str },
    /// A seat tried to act while it is the other seat's turn.
    NotYourTurn { seat: usize },
    /// Seat index is not 0 or 1.
    UnknownSeat(usize),
    /// The match already has a winner.
    GameOver,
    /// The strategy has no untried coordinate left.
    NoShotAvailable,
    /// Every ship of the seat's fleet has already been placed.
    PlacementClosed,
    /// Firing was requested before both fleets were placed.
    PlacementIncomplete,
}

impl From<BitBoardError> for GameError {
    fn from(err: BitBoardError) -> Self {
        GameError::BitBoard(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::BitBoard(e) => write!(f, "BitBoard error: {}", e),
            GameError::BoardTooSmall { cells, needed } => {
                write!(f, "Board has {} cells, the fleet needs {}", cells, needed)
            }
            GameError::InvalidDirection(c) => {
                write!(f, "Direction must be 'H' or 'V', got {:?}", c)
            }
            GameError::EmptyShip => write!(f, "Ship has no cells"),
            GameError::ShipAlreadyPlaced => write!(f, "Ship is already placed on the board"),
            GameError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            GameError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            GameError::PlacementExhausted { ship } => {
                write!(f, "No valid placement left for {}", ship)
            }
            GameError::NotYourTurn { seat } => write!(f, "Not your turn (seat {})", seat),
            GameError::UnknownSeat(seat) => write!(f, "Unknown seat {}", seat),
            GameError::GameOver => write!(f, "The game is already over"),
            GameError::NoShotAvailable => write!(f, "No untried coordinate left"),
            GameError::PlacementClosed => write!(f, "All ships of this fleet are placed"),
            GameError::PlacementIncomplete => write!(f, "Both fleets must be placed first"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// A rejected placement. The ship is handed back so the caller can retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementError {
    ship: Ship,
    reason: GameError,
}

impl PlacementError {
    pub(crate) fn new(ship: Ship, reason: GameError) -> Self {
        Self { ship, reason }
    }

    /// The ship that was not placed.
    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Why the placement was refused.
    pub fn reason(&self) -> &GameError {
        &self.reason
    }

    /// Extract the ship and the reason.
    pub fn into_inner(self) -> (Ship, GameError) {
        (self.ship, self.reason)
    }
}

impl From<PlacementError> for GameError {
    fn from(err: PlacementError) -> Self {
        err.reason
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot place {}: {}", self.ship.name(), self.reason)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
