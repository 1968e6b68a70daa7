//! dc-core: Core game logic for the room-crawler
//!
//! This crate contains all game logic with no I/O dependencies.
//! It is designed to be pure and testable: every random decision flows
//! through a caller-supplied [`GameRng`], so whole runs replay from a seed.

pub mod choice;
pub mod combat;
pub mod creature;
pub mod drops;
pub mod effect;
pub mod element;
pub mod item;
pub mod log;
pub mod procgen;
pub mod session;

mod consts;
mod rng;

pub use consts::*;
pub use rng::GameRng;
pub use session::{GameSession, Mode, SessionSignal, SessionState};
