#![cfg(feature = "std")]

//! Two front ends sharing one match.
//!
//! The [`GameHost`] task owns the only [`GameEngine`]; each front end holds a
//! [`Seat`] and talks to the host through a channel. Commands are applied one
//! at a time in arrival order, and a shot from the seat not on the move is
//! answered with [`GameError::NotYourTurn`] rather than queued.

use std::collections::VecDeque;

use anyhow::anyhow;
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use tokio::sync::{mpsc, oneshot, watch};

use crate::common::{Coord, FireOutcome, GameError};
use crate::config::standard_fleet;
use crate::game::GameEngine;
use crate::protocol::{GameApi, Reply, Request, TurnState};
use crate::ship::{Orientation, Ship};
use crate::snapshot::GameSnapshot;

const REQUEST_QUEUE: usize = 16;

pub struct GameHost {
    engine: GameEngine,
    pending: [VecDeque<Ship>; 2],
    rng: SmallRng,
    requests: mpsc::Receiver<Request>,
    turns: watch::Sender<TurnState>,
}

impl GameHost {
    /// Wrap `engine` and hand out one seat per player. Each seat must place
    /// the standard fleet before either may fire.
    pub fn new(engine: GameEngine, rng: SmallRng) -> (Self, [Seat; 2]) {
        let (tx, rx) = mpsc::channel(REQUEST_QUEUE);
        let pending = [0, 1].map(|seat| {
            let placed = engine.players()[seat].ships().len();
            standard_fleet().into_iter().skip(placed).collect::<VecDeque<_>>()
        });
        let initial = Self::turn_state_of(&engine, &pending);
        let (turns, turn_rx) = watch::channel(initial);
        let seats = [0, 1].map(|seat| Seat {
            seat,
            requests: tx.clone(),
            turns: turn_rx.clone(),
        });
        let host = GameHost {
            engine,
            pending,
            rng,
            requests: rx,
            turns,
        };
        (host, seats)
    }

    /// Serve requests until both seats are dropped, then return the engine.
    pub async fn run(mut self) -> GameEngine {
        while let Some(request) = self.requests.recv().await {
            self.handle(request);
        }
        info!("all seats left, host shutting down");
        self.engine
    }

    fn handle(&mut self, request: Request) {
        match request {
            Request::PlaceShip {
                seat,
                start,
                orientation,
                reply,
            } => {
                let result = self.place_ship(seat, start, orientation);
                self.respond(reply, result)
            }
            Request::AutoPlace { seat, reply } => {
                let result = self.auto_place(seat);
                self.respond(reply, result)
            }
            Request::Fire {
                seat,
                row,
                col,
                reply,
            } => {
                let result = self.fire(seat, row, col);
                self.respond(reply, result)
            }
            Request::Snapshot { seat, reply } => {
                let result = self.engine.snapshot_for(seat);
                self.respond(reply, result)
            }
        }
    }

    // The new turn state goes out before the reply, so a seat that has its
    // answer never observes the state from before its own command.
    fn respond<T>(&self, reply: Reply<T>, result: Result<T, GameError>) {
        let state = Self::turn_state_of(&self.engine, &self.pending);
        self.turns.send_replace(state);
        // The seat may have given up waiting; nothing to do then.
        let _ = reply.send(result);
    }

    fn place_ship(
        &mut self,
        seat: usize,
        start: Coord,
        orientation: Orientation,
    ) -> Result<&'static str, GameError> {
        let queue = self.pending.get_mut(seat).ok_or(GameError::UnknownSeat(seat))?;
        let ship = queue.pop_front().ok_or(GameError::PlacementClosed)?;
        let name = ship.name();
        match self.engine.place_ship(seat, ship, start, orientation) {
            Ok(()) => Ok(name),
            Err(err) => {
                let (ship, reason) = err.into_inner();
                queue.push_front(ship);
                debug!("seat {} could not place {}: {}", seat, name, reason);
                Err(reason)
            }
        }
    }

    fn auto_place(&mut self, seat: usize) -> Result<(), GameError> {
        let queue = self.pending.get_mut(seat).ok_or(GameError::UnknownSeat(seat))?;
        if queue.is_empty() {
            return Err(GameError::PlacementClosed);
        }
        let fleet: Vec<Ship> = queue.iter().cloned().collect();
        // The queue only empties once the whole fleet is down.
        self.engine.place_fleet(seat, &mut self.rng, fleet)?;
        queue.clear();
        Ok(())
    }

    fn fire(&mut self, seat: usize, row: usize, col: usize) -> Result<FireOutcome, GameError> {
        if seat > 1 {
            return Err(GameError::UnknownSeat(seat));
        }
        if self.pending.iter().any(|q| !q.is_empty()) {
            warn!("seat {} fired before placement finished", seat);
            return Err(GameError::PlacementIncomplete);
        }
        self.engine.fire_as(seat, row, col)
    }

    fn turn_state_of(engine: &GameEngine, pending: &[VecDeque<Ship>; 2]) -> TurnState {
        TurnState {
            current_turn: engine.current_turn(),
            placement_complete: pending.iter().all(VecDeque::is_empty),
            status: engine.status(),
        }
    }
}

/// A front end's handle on one side of a hosted match.
pub struct Seat {
    seat: usize,
    requests: mpsc::Sender<Request>,
    turns: watch::Receiver<TurnState>,
}

impl Seat {
    async fn call<T>(&self, make: impl FnOnce(Reply<T>) -> Request) -> anyhow::Result<T> {
        let (tx, rx) = oneshot::channel();
        self.requests
            .send(make(tx))
            .await
            .map_err(|_| anyhow!("game host has shut down"))?;
        let result = rx.await.map_err(|_| anyhow!("game host dropped the request"))?;
        Ok(result?)
    }

    /// Latest turn state without waiting.
    pub fn turn_state(&self) -> TurnState {
        *self.turns.borrow()
    }
}

#[async_trait::async_trait]
impl GameApi for Seat {
    fn seat(&self) -> usize {
        self.seat
    }

    async fn place_ship(&mut self, start: Coord, orientation: Orientation) -> anyhow::Result<&'static str> {
        let seat = self.seat;
        self.call(|reply| Request::PlaceShip {
            seat,
            start,
            orientation,
            reply,
        })
        .await
    }

    async fn auto_place(&mut self) -> anyhow::Result<()> {
        let seat = self.seat;
        self.call(|reply| Request::AutoPlace { seat, reply }).await
    }

    async fn fire(&mut self, row: usize, col: usize) -> anyhow::Result<FireOutcome> {
        let seat = self.seat;
        self.call(|reply| Request::Fire {
            seat,
            row,
            col,
            reply,
        })
        .await
    }

    async fn snapshot(&mut self) -> anyhow::Result<GameSnapshot> {
        let seat = self.seat;
        self.call(|reply| Request::Snapshot { seat, reply }).await
    }

    async fn wait_for_turn(&mut self) -> anyhow::Result<TurnState> {
        let seat = self.seat;
        let state = self
            .turns
            .wait_for(|s| s.is_over() || s.is_turn_of(seat))
            .await
            .map_err(|_| anyhow!("game host has shut down"))?;
        Ok(*state)
    }
}
