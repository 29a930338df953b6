//! Error types for configuration validation and lifecycle misuse.
//!
//! Most "failures" in this system are deliberately not errors: malformed
//! input lines are dropped, and lifecycle calls with unmet preconditions
//! are silent no-ops. The types here cover the two cases a caller can
//! actually act on: a configuration that cannot produce a playable arena,
//! and a start request with no valid entries.

use thiserror::Error;

/// A configuration value that cannot produce a playable arena.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A dimension or coefficient that must be strictly positive was not.
    #[error("`{field}` must be strictly positive")]
    NonPositive {
        /// Name of the offending config field.
        field: &'static str,
    },

    /// The spawn margins overlap: no horizontal band remains for spawning.
    #[error("spawn margin {margin} leaves no room in arena width {width}")]
    MarginTooWide {
        /// Configured spawn margin.
        margin: f32,
        /// Configured arena width.
        width: f32,
    },

    /// The basket is at least as wide as the arena.
    #[error("basket width {basket} does not fit in arena width {width}")]
    BasketTooWide {
        /// Configured basket width.
        basket: f32,
        /// Configured arena width.
        width: f32,
    },
}

/// Errors surfaced by the run controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RaffleError {
    /// `start` was called with zero valid entries. The run state is left
    /// untouched; a user-facing [`Notice`](crate::Notice) is queued as well.
    #[error("cannot start a raffle with no entries")]
    EmptyRoster,

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
