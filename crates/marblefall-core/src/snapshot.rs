//! Read-only views of raffle state for presentation layers.
//!
//! A snapshot is a value, not a borrow: renderers and logging sinks can
//! hold one across frames without pinning the simulation, and the whole
//! thing serializes to JSON for headless capture.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tumble::RenderHint;

use crate::controller::Phase;

/// One roster entry as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantView {
    /// Participant name, verbatim from the roster.
    pub name: String,
    /// Number of tokens this participant holds.
    pub weight: u32,
    /// Index into the shared color palette.
    pub color_index: usize,
}

/// One live token: where it is and how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenView {
    /// Name of the participant this token belongs to.
    pub owner: String,
    /// World-space position, y-up.
    pub position: Vec2,
    /// Index into the shared color palette.
    pub color_index: usize,
    /// Current render hint, if one is attached. The winning token carries
    /// the highlight hint from the moment the outcome resolves.
    pub hint: Option<RenderHint>,
}

/// Full derived state of the raffle at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaffleSnapshot {
    /// Lifecycle phase at capture time.
    pub phase: Phase,
    /// Winner name, once decided.
    pub winner: Option<String>,
    /// Total live tokens (sum of participant weights while running).
    pub total_tokens: usize,
    /// The roster behind the current run, in entry order.
    pub participants: Vec<ParticipantView>,
    /// Every live token, in spawn order.
    pub tokens: Vec<TokenView>,
}

// =============================================================================
// Tests
// =============================================================================
