//! Test module for determinism and integration tests.
//!
//! This module provides the crate-level tests for the raffle lifecycle:
//! - **Determinism tests**: Verify same seed produces identical runs
//! - **Integration tests**: Exercise the full start / step / settle cycle
//! - **Helper functions**: Utilities for test setup
//!
//! # Test Structure
//!
//! - `determinism.rs`: Tests that verify deterministic execution
//! - `integration.rs`: End-to-end tests of the raffle lifecycle
//! - `helpers.rs`: Test setup utilities and factory functions

mod determinism;
mod helpers;

// Re-export for convenience
pub use helpers::*;
