//! # Tumble
//!
//! Thin 2D drop-physics substrate over `rapier2d`.
//!
//! Tumble exposes exactly the slice of a rigid-body engine that an
//! arena-style simulation needs: a gravity world, static panels, dynamic
//! balls, a fixed-timestep integrator, and a drainable stream of
//! contact-begin events. Callers never see `rapier2d` types; bodies and
//! colliders are referenced through opaque [`BodyId`] / [`ColliderId`]
//! handles that are only valid for the [`World`] that created them.
//!
//! ## Handle safety
//!
//! Every `World` carries a process-unique sequence number that is baked
//! into the ids it hands out. Operations with an id minted by a different
//! (possibly already torn down) world are silent no-ops or return `None`,
//! so a stale handle can never mutate a fresh world.
//!
//! ## Render hints
//!
//! Each body can carry a [`RenderHint`] (fill/stroke/line width). Tumble
//! stores hints in a side table and passes them through untouched; it
//! never interprets them.
//!
//! ## Quick start
//!
//! ```
//! use glam::Vec2;
//! use tumble::{BallParams, PanelParams, RenderHint, World};
//!
//! let mut world = World::new(Vec2::new(0.0, -981.0), 1.0 / 60.0);
//!
//! // A floor and a ball above it.
//! world.spawn_panel(&PanelParams {
//!     center: Vec2::new(0.0, -5.0),
//!     half_extents: Vec2::new(100.0, 5.0),
//!     ..PanelParams::default()
//! });
//! let (ball, _) = world.spawn_ball(&BallParams {
//!     position: Vec2::new(0.0, 50.0),
//!     radius: 10.0,
//!     ..BallParams::default()
//! });
//!
//! for _ in 0..10 {
//!     world.step();
//! }
//! let pos = world.position(ball).unwrap();
//! assert!(pos.y < 50.0, "ball should be falling");
//! # let _ = RenderHint::default();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod body;
pub mod world;

pub use body::{BallParams, BodyId, ColliderId, ContactPair, PanelParams, RenderHint};
pub use world::World;
