//! Determinism verification tests.
//!
//! These tests verify that a raffle produces identical results when:
//! - Started with the same seed
//! - Given an identical perturbation script
//!
//! This is critical for:
//! - Auditable draws (re-run the seed, get the same winner)
//! - Debug reproducibility

use super::helpers::{controller, roster, token_positions};

// =============================================================================
// Same Seed, Same Run
// =============================================================================

#[test]
fn same_seed_produces_identical_initial_layout() {
    let mut left = controller(42);
    let mut right = controller(42);

    left.start(&roster()).unwrap();
    right.start(&roster()).unwrap();

    assert_eq!(left.snapshot(), right.snapshot());
}

#[test]
fn same_seed_produces_identical_trajectories() {
    let mut left = controller(42);
    let mut right = controller(42);

    left.start(&roster()).unwrap();
    right.start(&roster()).unwrap();

    for _ in 0..120 {
        left.step();
        right.step();
    }

    // Bit-identical, not approximately equal: both runs execute the same
    // fixed-timestep pipeline over the same spawn layout.
    assert_eq!(token_positions(&left), token_positions(&right));
    assert_eq!(left.snapshot(), right.snapshot());
}

#[test]
fn scripted_perturbations_replay_identically() {
    let mut left = controller(7);
    let mut right = controller(7);

    left.start(&roster()).unwrap();
    right.start(&roster()).unwrap();

    for tick in 0..60 {
        if tick == 10 || tick == 30 {
            left.shake();
            right.shake();
        }
        left.step();
        right.step();
    }

    assert_eq!(token_positions(&left), token_positions(&right));
}

// =============================================================================
// Divergence
// =============================================================================

#[test]
fn different_seeds_diverge() {
    let mut left = controller(1);
    let mut right = controller(2);

    left.start(&roster()).unwrap();
    right.start(&roster()).unwrap();

    assert_ne!(token_positions(&left), token_positions(&right));
}

#[test]
fn restarting_draws_a_fresh_layout() {
    let mut raffle = controller(42);

    raffle.start(&roster()).unwrap();
    let first = token_positions(&raffle);

    raffle.reset();
    raffle.start(&roster()).unwrap();
    let second = token_positions(&raffle);

    // The generation counter salts the per-run stream, so a restart under
    // the same master seed does not replay the previous layout.
    assert_ne!(first, second);
}

#[test]
fn fresh_controller_replays_a_completed_sequence() {
    // Start-reset-start on one controller matches the same sequence on a
    // fresh controller: run layout depends only on seed and generation.
    let mut first = controller(9);
    first.start(&roster()).unwrap();
    first.reset();
    first.start(&roster()).unwrap();

    let mut second = controller(9);
    second.start(&roster()).unwrap();
    second.reset();
    second.start(&roster()).unwrap();

    assert_eq!(token_positions(&first), token_positions(&second));
}
