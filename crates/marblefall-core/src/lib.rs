//! # Marblefall Core
//!
//! Deterministic orchestration layer for a physics-driven weighted raffle.
//!
//! Participants are entered as `name*weight` lines; each unit of weight
//! becomes one colored marble dropped into an obstacle-filled arena, and the
//! first marble to touch the collection basket wins for its owner. The
//! rigid-body simulation itself is provided by the [`tumble`] substrate;
//! this crate owns everything around it:
//!
//! - [`entry`]: lenient line-oriented parsing of weighted entries
//! - [`roster`]: expanding entries into one physical token per chance
//! - [`arena`]: static scene construction (walls, obstacles, basket)
//! - [`monitor`]: at-most-one-winner resolution over the contact stream
//! - [`controller`]: the Idle → Running → Settled lifecycle state machine
//! - [`snapshot`]: read-only state for a presentation layer
//!
//! ## Usage
//!
//! ```
//! use marblefall_core::{parse_entries, RaffleConfig, RunController};
//!
//! let entries = parse_entries("alice*2\nbob*1");
//! let mut raffle = RunController::new(RaffleConfig::default(), 42).unwrap();
//! raffle.start(&entries).unwrap();
//!
//! // Drive the cooperative step loop until the raffle settles.
//! raffle.step();
//!
//! let snapshot = raffle.snapshot();
//! assert_eq!(snapshot.total_tokens, 3);
//! ```
//!
//! ## Determinism
//!
//! All randomness (spawn placement, shuffle, shake) flows from a master
//! seed through a per-run `ChaCha8Rng` stream, so the same seed and the
//! same call sequence reproduce the same run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod arena;
pub mod config;
pub mod controller;
pub mod entry;
pub mod error;
pub mod monitor;
pub mod notice;
pub mod roster;
pub mod snapshot;

// Re-export the physics substrate for callers that embed the renderer.
pub use tumble;

pub use arena::Arena;
pub use config::RaffleConfig;
pub use controller::{Phase, RunController};
pub use entry::{parse_entries, Entry, SEPARATOR};
pub use error::{ConfigError, RaffleError};
pub use monitor::{OutcomeMonitor, Winner};
pub use notice::Notice;
pub use roster::{Token, TokenSet, PALETTE};
pub use snapshot::{ParticipantView, RaffleSnapshot, TokenView};

#[cfg(test)]
mod tests;
