//! Static scene construction: bounding box, obstacle bars, and the basket.
//!
//! One `Arena` exists per run and owns the physics world for that run.
//! There is no incremental teardown: replacing the `Arena` value drops the
//! old world wholesale, which also ends its event stream and invalidates
//! every handle it minted — no duplicate geometry or stale subscriptions
//! can survive across runs.
//!
//! The collection target is a solid U-shaped basket (floor segment plus two
//! side walls). All three pieces are recorded in the target set, so a token
//! landing on any of them qualifies; the outcome monitor's latch keeps a
//! second wall contact from overriding the first winner.

use std::collections::HashSet;
use std::f32::consts::PI;

use glam::Vec2;
use tumble::{ColliderId, PanelParams, RenderHint, World};

use crate::config::RaffleConfig;

const WALL_FILL: &str = "#2D3748";
const BASKET_FILL: &str = "#8B4513";
const BASKET_STROKE: &str = "#654321";
const OBSTACLE_FILL: &str = "#E53E3E";
const OBSTACLE_STROKE: &str = "#C53030";

/// Obstacle bar layout: (x fraction, y fraction, half-length, angle).
/// Fractions are of arena width/height, measured from the bottom-left.
const OBSTACLES: [(f32, f32, f32, f32); 5] = [
    (0.20, 0.70, 40.0, -PI / 6.0),
    (0.80, 0.70, 40.0, PI / 6.0),
    (0.50, 0.50, 50.0, -PI / 8.0),
    (0.25, 0.30, 30.0, PI / 4.0),
    (0.75, 0.30, 30.0, -PI / 4.0),
];

const OBSTACLE_HALF_THICKNESS: f32 = 7.5;
const WALL_HALF_THICKNESS: f32 = 30.0;
const BASKET_HALF_THICKNESS: f32 = 5.0;

/// The static scene plus the simulation world for one run.
#[derive(Debug)]
pub struct Arena {
    world: World,
    target: HashSet<ColliderId>,
}

impl Arena {
    /// Builds a fresh arena from scratch: floor, side walls (open at the
    /// top for token injection), five angled obstacle bars, and the basket.
    #[must_use]
    pub fn build(config: &RaffleConfig) -> Self {
        let mut world = World::new(Vec2::new(0.0, config.gravity_y), config.dt);
        let mut target = HashSet::new();

        let w = config.width;
        let h = config.height;
        // Side walls extend up through the spawn band so freshly shuffled
        // tokens cannot bounce out over the top edge.
        let wall_top = h + config.spawn_clearance + config.spawn_band;
        let wall_hint = RenderHint::solid(WALL_FILL);

        // Floor, top face at y = 0.
        world.spawn_panel(&PanelParams {
            center: Vec2::new(w / 2.0, -WALL_HALF_THICKNESS),
            half_extents: Vec2::new(w / 2.0, WALL_HALF_THICKNESS),
            hint: wall_hint.clone(),
            ..PanelParams::default()
        });
        // Left and right walls, inner faces at x = 0 and x = w.
        for x in [-WALL_HALF_THICKNESS, w + WALL_HALF_THICKNESS] {
            world.spawn_panel(&PanelParams {
                center: Vec2::new(x, wall_top / 2.0),
                half_extents: Vec2::new(WALL_HALF_THICKNESS, wall_top / 2.0),
                hint: wall_hint.clone(),
                ..PanelParams::default()
            });
        }

        // U-shaped basket: floor segment plus two side walls, all tagged
        // as the collection target.
        let basket_hint = RenderHint::new(BASKET_FILL, BASKET_STROKE, 2.0);
        let basket_x = w / 2.0;
        let bottom_y = config.basket_elevation - config.basket_wall_height / 2.0;

        let (_, bottom) = world.spawn_panel(&PanelParams {
            center: Vec2::new(basket_x, bottom_y),
            half_extents: Vec2::new(config.basket_width / 2.0, BASKET_HALF_THICKNESS),
            hint: basket_hint.clone(),
            ..PanelParams::default()
        });
        target.insert(bottom);

        for side in [-1.0, 1.0] {
            let (_, wall) = world.spawn_panel(&PanelParams {
                center: Vec2::new(
                    basket_x + side * config.basket_width / 2.0,
                    config.basket_elevation,
                ),
                half_extents: Vec2::new(
                    BASKET_HALF_THICKNESS,
                    config.basket_wall_height / 2.0,
                ),
                hint: basket_hint.clone(),
                ..PanelParams::default()
            });
            target.insert(wall);
        }

        // Angled obstacle bars.
        let obstacle_hint = RenderHint::new(OBSTACLE_FILL, OBSTACLE_STROKE, 2.0);
        for (fx, fy, half_length, angle) in OBSTACLES {
            world.spawn_panel(&PanelParams {
                center: Vec2::new(w * fx, h * fy),
                half_extents: Vec2::new(half_length, OBSTACLE_HALF_THICKNESS),
                angle,
                hint: obstacle_hint.clone(),
                ..PanelParams::default()
            });
        }

        Self { world, target }
    }

    /// Returns true if `collider` is part of the collection target.
    #[must_use]
    pub fn is_target(&self, collider: ColliderId) -> bool {
        self.target.contains(&collider)
    }

    /// Read access to the simulation world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the simulation world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Iterates the colliders that make up the collection target.
    pub(crate) fn target_colliders(&self) -> impl Iterator<Item = ColliderId> + '_ {
        self.target.iter().copied()
    }
}
