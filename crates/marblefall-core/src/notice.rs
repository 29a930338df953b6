//! User-visible notifications queued by the run controller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A message intended for the user, drained by the presentation layer via
/// [`RunController::take_notices`](crate::RunController::take_notices).
///
/// Notices are the only channel through which lifecycle events reach the
/// user; they never carry simulation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// `start` was refused because no valid entries were provided.
    EmptyRoster,
    /// All tokens were moved back to fresh spawn positions.
    Shuffled,
    /// A random impulse was applied to every token.
    Shaken,
    /// The raffle has a winner.
    Winner(String),
    /// A timed run expired without any token reaching the basket.
    NoWinner,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRoster => write!(f, "add at least one participant before starting"),
            Self::Shuffled => write!(f, "token positions reshuffled"),
            Self::Shaken => write!(f, "arena shaken"),
            Self::Winner(name) => write!(f, "winner: {name}"),
            Self::NoWinner => write!(f, "time expired with no winner"),
        }
    }
}
