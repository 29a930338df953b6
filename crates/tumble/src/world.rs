//! The physics world: rapier sets, a fixed-step pipeline, and the contact
//! event stream.
//!
//! A [`World`] owns every rapier structure needed to run an isolated 2D
//! scene. Dropping the `World` tears the whole scene down; there is no
//! partial teardown API because callers that want a fresh scene are expected
//! to replace the value wholesale (which also invalidates every id minted
//! by the old instance).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;
use rapier2d::crossbeam::channel::{self, Receiver};
use rapier2d::math::{Real, Vector};
use rapier2d::prelude::{
    ActiveEvents, CCDSolver, ChannelEventCollector, ColliderBuilder, ColliderSet,
    CollisionEvent, ContactForceEvent, DefaultBroadPhase, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline,
    RigidBodyBuilder, RigidBodySet,
};
use tracing::trace;

use crate::body::{BallParams, BodyId, ColliderId, ContactPair, PanelParams, RenderHint};

/// Process-wide world sequence counter. Never reused, so ids from a torn
/// down world can never alias a live one.
static WORLD_SEQ: AtomicU64 = AtomicU64::new(1);

fn to_vector(v: Vec2) -> Vector<Real> {
    Vector::new(v.x, v.y)
}

fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

// =============================================================================
// World
// =============================================================================

/// An isolated 2D rigid-body scene with a fixed-timestep integrator.
///
/// The world is single-threaded and cooperative: nothing moves until
/// [`step`](World::step) is called, and contact events reported during a
/// step are buffered until [`drain_contacts`](World::drain_contacts) is
/// called. One step may buffer zero, one, or many contact pairs.
pub struct World {
    seq: u64,
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    events: ChannelEventCollector,
    collision_recv: Receiver<CollisionEvent>,
    _force_recv: Receiver<ContactForceEvent>,
    hints: HashMap<ColliderId, RenderHint>,
}

impl World {
    /// Creates a new empty world.
    ///
    /// # Arguments
    ///
    /// * `gravity` - Gravity vector in world units per second squared.
    /// * `dt` - Fixed timestep advanced by each [`step`](World::step).
    #[must_use]
    pub fn new(gravity: Vec2, dt: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = dt;

        let (collision_send, collision_recv) = channel::unbounded();
        let (force_send, force_recv) = channel::unbounded();

        Self {
            seq: WORLD_SEQ.fetch_add(1, Ordering::Relaxed),
            pipeline: PhysicsPipeline::new(),
            gravity: to_vector(gravity),
            integration_parameters,
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            events: ChannelEventCollector::new(collision_send, force_send),
            collision_recv,
            _force_recv: force_recv,
            hints: HashMap::new(),
        }
    }

    /// Spawns a dynamic circular body.
    ///
    /// The collider is created with collision events enabled and continuous
    /// collision detection on, so fast-falling balls cannot tunnel through
    /// thin panels.
    pub fn spawn_ball(&mut self, params: &BallParams) -> (BodyId, ColliderId) {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_vector(params.position))
            .ccd_enabled(true)
            .build();
        let body_handle = self.bodies.insert(body);

        let collider = ColliderBuilder::ball(params.radius)
            .restitution(params.restitution)
            .friction(params.friction)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        let body_id = BodyId {
            world: self.seq,
            handle: body_handle,
        };
        let collider_id = ColliderId {
            world: self.seq,
            handle: collider_handle,
        };
        self.hints.insert(collider_id, params.hint.clone());
        trace!(%body_id, "spawned ball");
        (body_id, collider_id)
    }

    /// Spawns a static rectangular panel.
    pub fn spawn_panel(&mut self, params: &PanelParams) -> (BodyId, ColliderId) {
        let body = RigidBodyBuilder::fixed()
            .translation(to_vector(params.center))
            .rotation(params.angle)
            .build();
        let body_handle = self.bodies.insert(body);

        let collider = ColliderBuilder::cuboid(params.half_extents.x, params.half_extents.y)
            .sensor(params.sensor)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        let body_id = BodyId {
            world: self.seq,
            handle: body_handle,
        };
        let collider_id = ColliderId {
            world: self.seq,
            handle: collider_handle,
        };
        self.hints.insert(collider_id, params.hint.clone());
        trace!(%body_id, sensor = params.sensor, "spawned panel");
        (body_id, collider_id)
    }

    /// Advances the world by one fixed timestep.
    ///
    /// Contact events produced during the step are buffered; call
    /// [`drain_contacts`](World::drain_contacts) afterwards to collect them.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &self.events,
        );
    }

    /// Drains all buffered contact-begin events.
    ///
    /// Contact-end events are discarded; only `Started` pairs are reported.
    /// Pairs are returned in the order the engine emitted them, and one
    /// batch may contain several pairs from a single step.
    pub fn drain_contacts(&mut self) -> Vec<ContactPair> {
        let mut contacts = Vec::new();
        while let Ok(event) = self.collision_recv.try_recv() {
            if let CollisionEvent::Started(a, b, _) = event {
                contacts.push(ContactPair {
                    first: ColliderId {
                        world: self.seq,
                        handle: a,
                    },
                    second: ColliderId {
                        world: self.seq,
                        handle: b,
                    },
                });
            }
        }
        contacts
    }

    /// Returns the position of a body, or `None` for unknown/stale ids.
    #[must_use]
    pub fn position(&self, id: BodyId) -> Option<Vec2> {
        if id.world != self.seq {
            return None;
        }
        self.bodies.get(id.handle).map(|b| to_vec2(b.translation()))
    }

    /// Returns the linear velocity of a body, or `None` for unknown/stale ids.
    #[must_use]
    pub fn velocity(&self, id: BodyId) -> Option<Vec2> {
        if id.world != self.seq {
            return None;
        }
        self.bodies.get(id.handle).map(|b| to_vec2(b.linvel()))
    }

    /// Teleports a body to a new position, waking it. No-op for stale ids.
    pub fn set_position(&mut self, id: BodyId, position: Vec2) {
        if id.world != self.seq {
            return;
        }
        if let Some(body) = self.bodies.get_mut(id.handle) {
            body.set_translation(to_vector(position), true);
        }
    }

    /// Overwrites a body's linear velocity. No-op for stale ids.
    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
        if id.world != self.seq {
            return;
        }
        if let Some(body) = self.bodies.get_mut(id.handle) {
            body.set_linvel(to_vector(velocity), true);
        }
    }

    /// Applies an instantaneous impulse at the body's center of mass.
    /// No-op for stale ids.
    pub fn apply_impulse(&mut self, id: BodyId, impulse: Vec2) {
        if id.world != self.seq {
            return;
        }
        if let Some(body) = self.bodies.get_mut(id.handle) {
            body.apply_impulse(to_vector(impulse), true);
        }
    }

    /// Resolves a collider back to its parent body.
    #[must_use]
    pub fn body_of(&self, id: ColliderId) -> Option<BodyId> {
        if id.world != self.seq {
            return None;
        }
        self.colliders
            .get(id.handle)
            .and_then(rapier2d::prelude::Collider::parent)
            .map(|handle| BodyId {
                world: self.seq,
                handle,
            })
    }

    /// Returns the render hint attached to a collider, if any.
    #[must_use]
    pub fn hint(&self, id: ColliderId) -> Option<&RenderHint> {
        self.hints.get(&id)
    }

    /// Replaces the render hint attached to a collider.
    ///
    /// Hints for stale ids are ignored.
    pub fn set_hint(&mut self, id: ColliderId, hint: RenderHint) {
        if id.world != self.seq {
            return;
        }
        self.hints.insert(id, hint);
    }

    /// Returns the number of bodies (static and dynamic) in the world.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("seq", &self.seq)
            .field("bodies", &self.bodies.len())
            .field("colliders", &self.colliders.len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
