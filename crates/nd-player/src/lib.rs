//! Virtual player for the Neon Descent core.
//!
//! This crate is the in-repo embodiment of the presentation collaborator:
//! it consumes [`nd_core::GameState`] read-only, emits one core action per
//! tick, and drives whole seeded sessions for balance and regression
//! sweeps.
//!
//! - [`agent`]: the heuristic decision policy
//! - [`advisor`]: a local tactical-analysis implementation
//! - [`session`]: seeded end-to-end run driver and summaries

pub mod advisor;
pub mod agent;
pub mod session;

pub use agent::Agent;
pub use session::{RunSummary, SessionConfig, run_session};
