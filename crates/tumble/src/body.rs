//! Opaque body handles and spawn parameter types.
//!
//! [`BodyId`] and [`ColliderId`] are foreign-key references into a
//! [`World`](crate::world::World)'s body registry. They are `Copy`,
//! hashable, and comparable, which makes them usable as keys in caller-side
//! side tables, but they expose nothing about the underlying engine.

use glam::Vec2;
use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Handles
// =============================================================================

/// Opaque reference to a rigid body inside a specific [`World`](crate::World).
///
/// Ids embed the originating world's sequence number, so two ids only
/// compare equal when they name the same body in the same world instance.
/// An id held across a world teardown becomes inert: every operation on it
/// is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId {
    pub(crate) world: u64,
    pub(crate) handle: RigidBodyHandle,
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (idx, generation) = self.handle.into_raw_parts();
        write!(f, "body:{}/{}.{}", self.world, idx, generation)
    }
}

/// Opaque reference to a collider inside a specific [`World`](crate::World).
///
/// Contact events report collider pairs, so callers that need to resolve a
/// contact back to their own bookkeeping should key side tables by
/// `ColliderId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderId {
    pub(crate) world: u64,
    pub(crate) handle: ColliderHandle,
}

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (idx, generation) = self.handle.into_raw_parts();
        write!(f, "collider:{}/{}.{}", self.world, idx, generation)
    }
}

// =============================================================================
// Contact events
// =============================================================================

/// One contact-begin event reported by [`World::drain_contacts`].
///
/// The order of `first` and `second` carries no meaning; callers must test
/// both members when looking for a body of interest.
///
/// [`World::drain_contacts`]: crate::world::World::drain_contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactPair {
    /// One member of the contacting pair.
    pub first: ColliderId,
    /// The other member of the contacting pair.
    pub second: ColliderId,
}

impl ContactPair {
    /// Returns the member of the pair that is *not* `id`, if `id` is one of
    /// the two members.
    #[must_use]
    pub fn other(&self, id: ColliderId) -> Option<ColliderId> {
        if self.first == id {
            Some(self.second)
        } else if self.second == id {
            Some(self.first)
        } else {
            None
        }
    }

    /// Returns true if `id` is one of the two members.
    #[must_use]
    pub fn involves(&self, id: ColliderId) -> bool {
        self.first == id || self.second == id
    }
}

// =============================================================================
// Render hints
// =============================================================================

/// Opaque presentation metadata attached to a body.
///
/// Tumble stores hints verbatim and hands them back on request; the colors
/// are plain strings (typically CSS-style hex) that only the presentation
/// layer interprets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderHint {
    /// Fill color.
    pub fill: String,
    /// Stroke (outline) color.
    pub stroke: String,
    /// Stroke width in world units.
    pub line_width: f32,
}

impl RenderHint {
    /// Creates a hint from fill/stroke colors and a line width.
    #[must_use]
    pub fn new(fill: &str, stroke: &str, line_width: f32) -> Self {
        Self {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            line_width,
        }
    }

    /// Creates a solid fill with no visible stroke.
    #[must_use]
    pub fn solid(fill: &str) -> Self {
        Self::new(fill, fill, 0.0)
    }
}

impl Default for RenderHint {
    fn default() -> Self {
        Self::solid("#FFFFFF")
    }
}

// =============================================================================
// Spawn parameters
// =============================================================================

/// Parameters for spawning a dynamic circular body.
#[derive(Debug, Clone, PartialEq)]
pub struct BallParams {
    /// Spawn position of the ball center.
    pub position: Vec2,
    /// Ball radius.
    pub radius: f32,
    /// Bounciness coefficient (0 = dead, 1 = perfectly elastic).
    pub restitution: f32,
    /// Surface friction coefficient.
    pub friction: f32,
    /// Presentation metadata passed through untouched.
    pub hint: RenderHint,
}

impl Default for BallParams {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            radius: 10.0,
            restitution: 0.5,
            friction: 0.1,
            hint: RenderHint::default(),
        }
    }
}

/// Parameters for spawning a static rectangular panel.
///
/// Panels are fixed bodies: walls, floors, obstacle bars, baskets. A panel
/// flagged as `sensor` reports contact-begin events but does not physically
/// block motion.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelParams {
    /// Center of the panel.
    pub center: Vec2,
    /// Half-width and half-height.
    pub half_extents: Vec2,
    /// Rotation in radians (counter-clockwise).
    pub angle: f32,
    /// When true the panel detects overlap without colliding.
    pub sensor: bool,
    /// Presentation metadata passed through untouched.
    pub hint: RenderHint,
}

impl Default for PanelParams {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            half_extents: Vec2::new(10.0, 10.0),
            angle: 0.0,
            sensor: false,
            hint: RenderHint::default(),
        }
    }
}
