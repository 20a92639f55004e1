//! nd-core: run-state simulation core for Neon Descent
//!
//! This crate contains all game logic with no I/O dependencies: the room
//! type selector, the encounter card factory, per-type resolution, the
//! Security Alert subsystem, the module ledger, contracts, and the run
//! state machine tying them together. It is designed to be pure and
//! testable: presentation layers consume [`GameState`] read-only and feed
//! back [`Action`] values, and all randomness flows through the seedable
//! [`GameRng`].

pub mod advisor;
pub mod alert;
pub mod combat;
pub mod contract;
pub mod event;
pub mod modules;
pub mod player;
pub mod room;
pub mod shop;
pub mod treasure;
pub mod tuning;

mod consts;
mod gameloop;
mod rng;

pub use consts::*;
pub use gameloop::{Action, ApplyOutcome, GameState, LogEntry, LogKind, Status};
pub use rng::GameRng;
