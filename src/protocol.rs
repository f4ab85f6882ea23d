#![cfg(feature = "std")]

use tokio::sync::oneshot;

use crate::common::{Coord, FireOutcome, GameError};
use crate::game::GameStatus;
use crate::ship::Orientation;
use crate::snapshot::GameSnapshot;

/// Reply channel carried by every request.
pub type Reply<T> = oneshot::Sender<Result<T, GameError>>;

/// Commands a seat sends to the game host.
#[derive(Debug)]
pub enum Request {
    /// Place the seat's next unplaced fleet ship. Replies with its name.
    PlaceShip {
        seat: usize,
        start: Coord,
        orientation: Orientation,
        reply: Reply<&'static str>,
    },
    /// Randomly place every ship the seat has not placed yet.
    AutoPlace { seat: usize, reply: Reply<()> },
    /// Fire at the other seat's board.
    Fire {
        seat: usize,
        row: usize,
        col: usize,
        reply: Reply<FireOutcome>,
    },
    /// What the seat may currently see.
    Snapshot { seat: usize, reply: Reply<GameSnapshot> },
}

/// Turn state broadcast by the host after every accepted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TurnState {
    pub current_turn: usize,
    pub placement_complete: bool,
    pub status: GameStatus,
}

impl TurnState {
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver { .. })
    }

    /// `true` when `seat` may fire now.
    pub fn is_turn_of(&self, seat: usize) -> bool {
        self.placement_complete && !self.is_over() && self.current_turn == seat
    }
}

/// What a front end can do with its seat at the table.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    /// Seat index (0 or 1) this handle acts for.
    fn seat(&self) -> usize;
    async fn place_ship(&mut self, start: Coord, orientation: Orientation) -> anyhow::Result<&'static str>;
    async fn auto_place(&mut self) -> anyhow::Result<()>;
    async fn fire(&mut self, row: usize, col: usize) -> anyhow::Result<FireOutcome>;
    async fn snapshot(&mut self) -> anyhow::Result<GameSnapshot>;
    /// Wait until this seat may fire or the match is over.
    async fn wait_for_turn(&mut self) -> anyhow::Result<TurnState>;
}
