//! Test helper functions for setting up raffles and inspecting runs.
//!
//! This module provides factory functions and setup utilities that make
//! writing lifecycle tests more ergonomic and consistent.

use glam::Vec2;
use tumble::ContactPair;

use crate::config::RaffleConfig;
use crate::controller::RunController;
use crate::entry::{parse_entries, Entry};

// =============================================================================
// Factories
// =============================================================================

/// Installs a test-writer subscriber so `--nocapture` shows lifecycle logs.
/// Safe to call from every test; only the first call wins.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Builds an idle controller with the default configuration.
pub fn controller(seed: u64) -> RunController {
    init_tracing();
    RunController::new(RaffleConfig::default(), seed).expect("default config is valid")
}

/// A small mixed-weight roster: 2 + 3 + 1 = 6 tokens.
pub fn roster() -> Vec<Entry> {
    parse_entries("alice*2\nbob*3\ncarol*1")
}

// =============================================================================
// Run Inspection
// =============================================================================

/// Positions of every live token, in spawn order.
pub fn token_positions(raffle: &RunController) -> Vec<Vec2> {
    raffle
        .snapshot()
        .tokens
        .iter()
        .map(|token| token.position)
        .collect()
}

/// Velocities of every live token, in spawn order.
pub fn token_velocities(raffle: &RunController) -> Vec<Vec2> {
    let run = raffle.run().expect("run must be live");
    run.tokens
        .iter()
        .map(|token| {
            run.arena
                .world()
                .velocity(token.body)
                .expect("live token has a body")
        })
        .collect()
}

/// Injects a qualifying contact between the first live token and a basket
/// piece, resolving the outcome without waiting on real physics.
///
/// Returns the name of the participant whose token was injected.
pub fn inject_winner(raffle: &mut RunController) -> String {
    let (collider, owner) = {
        let run = raffle.run().expect("run must be live");
        let token = run.tokens.iter().next().expect("roster is non-empty");
        (token.collider, token.owner.clone())
    };
    let target = {
        let run = raffle.run().expect("run must be live");
        run.arena
            .target_colliders()
            .next()
            .expect("arena has basket pieces")
    };

    raffle.handle_contacts(&[ContactPair {
        first: collider,
        second: target,
    }]);
    owner
}
