#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod session;
mod ship;
pub mod snapshot;
mod strategy;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use player::*;
#[cfg(feature = "std")]
pub use protocol::{GameApi, Request, TurnState};
#[cfg(feature = "std")]
pub use session::{GameHost, Seat};
pub use ship::*;
pub use snapshot::{BoardSnapshot, GameSnapshot, PlayerSnapshot, ShipStatus};
pub use strategy::*;
