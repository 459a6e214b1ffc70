//! Rigid-body engine adapter
//!
//! [`DynamicsWorld`] owns every native structure of the dynamics engine:
//! the stepping pipeline, island manager, broadphase, narrowphase, body and
//! collider arenas, joint sets and CCD solver. Nothing outside this module
//! touches engine types; callers speak in [`BodyHandle`]s, descriptors and
//! query value types.
//!
//! World gravity is the zero vector. Gravity is per-body and per-frame,
//! installed as forces by the gravity field before each step.
//!
//! Ray and contact queries scan the collider arena with parry shape queries
//! instead of a cached acceleration structure: results stay correct
//! immediately after a position push with no interleaved step, and a linear
//! scan is the right cost model at sandbox entity counts.

use crate::ecs::Entity;
use crate::foundation::math::{Iso3, Point3, Translation3, Vec3};
use crate::physics::query::{ContactPoint, RayHit};
use crate::physics::shape::ShapeDescriptor;

use rapier3d::parry::query::{contact, Ray as ParryRay, RayCast};
use rapier3d::prelude::{
    CCDSolver, Collider, ColliderBuilder, ColliderHandle, ColliderSet, DefaultBroadPhase,
    ImpulseJointSet, IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase,
    PhysicsPipeline, QueryPipeline, RigidBodyBuilder, RigidBodyHandle, RigidBodySet, SharedShape,
};

/// Fixed simulation substep length in seconds
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Maximum substeps integrated per `step` call; backlog past this is dropped
pub const MAX_SUBSTEPS: u32 = 5;

/// Velocity threshold below which bodies are allowed to deactivate
const SLEEP_THRESHOLD: f32 = 0.5;

/// Contact queries report pairs within this margin, so near-touching
/// contacts appear with zero or negative depth
const CONTACT_PREDICTION: f32 = 0.05;

/// User-data stamp for the planet body, which owns no scene entity
const PLANET_USER_DATA: u128 = u128::MAX;

/// Opaque reference to a native rigid body and its collision shape.
///
/// Owned exclusively by [`DynamicsWorld`]; the entity bridge stores copies
/// but never removes bodies itself. Every body gets its own collider
/// instance, never shared between handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

/// The dynamics engine adapter
pub struct DynamicsWorld {
    pipeline: PhysicsPipeline,
    integration: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    gravity: Vec3,
    accumulator: f32,
    /// The always-present static sphere representing the planet. Dedicated
    /// field rather than a reserved arena slot: bulk clears never see it.
    planet: BodyHandle,
}

impl DynamicsWorld {
    /// Create the dynamics world with its static planet sphere.
    ///
    /// The planet is centered at `(0, -radius, 0)` so its surface passes
    /// through the world origin. It lives for the whole world lifetime;
    /// [`clear`](Self::clear) never removes it.
    pub fn new(planet_radius: f32) -> Self {
        let mut integration = IntegrationParameters::default();
        integration.dt = FIXED_TIMESTEP;

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        let planet_body = bodies.insert(
            RigidBodyBuilder::fixed()
                .translation(Vec3::new(0.0, -planet_radius, 0.0))
                .user_data(PLANET_USER_DATA)
                .build(),
        );
        let planet_collider = colliders.insert_with_parent(
            ColliderBuilder::new(SharedShape::ball(planet_radius)).build(),
            planet_body,
            &mut bodies,
        );

        log::info!("dynamics world created, planet radius {planet_radius}");

        Self {
            pipeline: PhysicsPipeline::new(),
            integration,
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity: Vec3::zeros(),
            accumulator: 0.0,
            planet: BodyHandle {
                body: planet_body,
                collider: planet_collider,
            },
        }
    }

    /// Handle of the planet body
    pub fn planet_handle(&self) -> BodyHandle {
        self.planet
    }

    /// Create a native body for `entity` from a shape descriptor.
    ///
    /// The collider matches the descriptor variant; terrain and anything
    /// else without a dedicated collision path falls back to a fixed small
    /// box rather than failing the call. Mass derives from the shape's
    /// footprint unless overridden; zero mass produces a static body.
    pub fn create_body(
        &mut self,
        entity: Entity,
        descriptor: &ShapeDescriptor,
        mass_override: Option<f32>,
    ) -> BodyHandle {
        let dims = descriptor.dimensions();
        let shape = match *descriptor {
            ShapeDescriptor::Sphere { radius, .. } => SharedShape::ball(radius),
            ShapeDescriptor::Cube { .. } => SharedShape::cuboid(dims.x, dims.y, dims.z),
            ShapeDescriptor::Terrain { .. } => {
                log::debug!("no collision path for {descriptor:?}, substituting default box");
                SharedShape::cuboid(5.0, 5.0, 5.0)
            }
        };

        let mass = mass_override.unwrap_or_else(|| descriptor.default_mass());
        let damping = (descriptor.rolling_friction() * mass * 0.01).min(0.25);

        let builder = if mass > 0.0 {
            RigidBodyBuilder::dynamic()
        } else {
            RigidBodyBuilder::fixed()
        };
        let body = self.bodies.insert(
            builder
                .linear_damping(damping)
                .angular_damping(damping)
                .user_data(u128::from(entity.id()))
                .build(),
        );

        if let Some(rb) = self.bodies.get_mut(body) {
            // Resting bodies should deactivate quickly
            let activation = rb.activation_mut();
            activation.normalized_linear_threshold = SLEEP_THRESHOLD;
            activation.angular_threshold = SLEEP_THRESHOLD;
        }

        let collider = self.colliders.insert_with_parent(
            ColliderBuilder::new(shape).mass(mass).build(),
            body,
            &mut self.bodies,
        );

        log::debug!(
            "body created for entity {} (mass {mass}, damping {damping})",
            entity.id()
        );

        BodyHandle { body, collider }
    }

    /// Remove a single body and its collider
    pub fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies.remove(
            handle.body,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Integrates in fixed substeps of [`FIXED_TIMESTEP`], at most
    /// [`MAX_SUBSTEPS`] per call; any remaining backlog is dropped so a slow
    /// frame cannot trigger a catch-up spiral. Substep length is constant
    /// regardless of frame time.
    pub fn step(&mut self, dt: f32) {
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= FIXED_TIMESTEP && substeps < MAX_SUBSTEPS {
            self.pipeline.step(
                &self.gravity,
                &self.integration,
                &mut self.islands,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                None::<&mut QueryPipeline>,
                &(),
                &(),
            );
            self.accumulator -= FIXED_TIMESTEP;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
    }

    /// Cast a ray and return the closest intersection, if any.
    ///
    /// The hit carries the owning entity decoded from the body's user data;
    /// `None` for the planet.
    pub fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let ray = ParryRay::new(Point3::from(origin), direction.normalize());

        let mut closest: Option<RayHit> = None;
        for (_, collider) in self.colliders.iter() {
            let pose = self.collider_pose(collider);
            let Some(hit) = collider
                .shape()
                .cast_ray_and_get_normal(&pose, &ray, max_distance, true)
            else {
                continue;
            };

            if closest
                .as_ref()
                .map_or(true, |best| hit.time_of_impact < best.distance)
            {
                closest = Some(RayHit {
                    entity: self.entity_of_collider(collider),
                    distance: hit.time_of_impact,
                    point: ray.point_at(hit.time_of_impact).coords,
                    normal: hit.normal,
                });
            }
        }

        closest
    }

    /// All current contacts of `handle` against every other collider.
    pub fn contacts_against(&self, handle: BodyHandle) -> Vec<ContactPoint> {
        let Some(collider) = self.colliders.get(handle.collider) else {
            return Vec::new();
        };
        self.contacts_at_pose(handle, self.collider_pose(collider))
    }

    /// The contact with the greatest penetration depth, if any contact
    /// exists within the query margin.
    ///
    /// The returned contact may carry zero or negative depth; callers must
    /// gate on a positive-depth threshold before correcting.
    pub fn deepest_contact_against(&self, handle: BodyHandle) -> Option<ContactPoint> {
        Self::deepest_of(self.contacts_against(handle))
    }

    /// Like [`deepest_contact_against`](Self::deepest_contact_against), but
    /// evaluates the body's shape at a hypothetical `position` without
    /// mutating the simulation. This is what makes drag resolution a pure
    /// function over candidate positions.
    pub fn deepest_contact_at(&self, handle: BodyHandle, position: Vec3) -> Option<ContactPoint> {
        let Some(collider) = self.colliders.get(handle.collider) else {
            return None;
        };
        let rotation = self.collider_pose(collider).rotation;
        let pose = Iso3::from_parts(Translation3::from(position), rotation);
        Self::deepest_of(self.contacts_at_pose(handle, pose))
    }

    fn contacts_at_pose(&self, handle: BodyHandle, pose: Iso3) -> Vec<ContactPoint> {
        let Some(queried) = self.colliders.get(handle.collider) else {
            return Vec::new();
        };

        let mut points = Vec::new();
        for (other_handle, other) in self.colliders.iter() {
            if other_handle == handle.collider {
                continue;
            }

            let other_pose = self.collider_pose(other);
            let result = contact(
                &pose,
                queried.shape(),
                &other_pose,
                other.shape(),
                CONTACT_PREDICTION,
            );
            if let Ok(Some(found)) = result {
                points.push(ContactPoint {
                    position: found.point2.coords,
                    // normal1 points out of the queried shape toward the
                    // other; separation moves the queried body the other way
                    normal: -found.normal1.into_inner(),
                    depth: -found.dist,
                    entity: self.entity_of_collider(other),
                });
            }
        }

        points
    }

    fn deepest_of(points: Vec<ContactPoint>) -> Option<ContactPoint> {
        points
            .into_iter()
            .max_by(|a, b| a.depth.total_cmp(&b.depth))
    }

    /// World pose of a collider, computed through its parent body.
    ///
    /// The engine only propagates body poses into collider poses during a
    /// step, so a query issued right after a position push must go through
    /// the body to see the fresh pose.
    fn collider_pose(&self, collider: &Collider) -> Iso3 {
        match collider.parent().and_then(|body| self.bodies.get(body)) {
            Some(body) => match collider.position_wrt_parent() {
                Some(offset) => body.position() * offset,
                None => *body.position(),
            },
            None => *collider.position(),
        }
    }

    fn entity_of_collider(&self, collider: &Collider) -> Option<Entity> {
        let body = collider.parent()?;
        let user_data = self.bodies.get(body)?.user_data;
        if user_data == PLANET_USER_DATA {
            None
        } else {
            Some(Entity::from_raw(user_data as u32))
        }
    }

    /// Current pose of a body
    pub fn pose_of(&self, handle: BodyHandle) -> Option<Iso3> {
        self.bodies.get(handle.body).map(|rb| *rb.position())
    }

    /// Current world position of a body
    pub fn translation_of(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies.get(handle.body).map(|rb| *rb.translation())
    }

    /// Current linear velocity of a body
    pub fn linear_velocity_of(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies.get(handle.body).map(|rb| *rb.linvel())
    }

    /// Mass of a body (zero for static bodies and stale handles)
    pub fn mass_of(&self, handle: BodyHandle) -> f32 {
        self.bodies.get(handle.body).map_or(0.0, |rb| rb.mass())
    }

    /// Whether the body is simulated dynamically
    pub fn is_dynamic(&self, handle: BodyHandle) -> bool {
        self.bodies.get(handle.body).is_some_and(|rb| rb.is_dynamic())
    }

    /// Whether the body is currently deactivated
    pub fn is_sleeping(&self, handle: BodyHandle) -> bool {
        self.bodies
            .get(handle.body)
            .is_some_and(|rb| rb.is_sleeping())
    }

    /// Overwrite a body's full pose
    pub fn set_pose(&mut self, handle: BodyHandle, pose: Iso3, wake: bool) {
        if let Some(rb) = self.bodies.get_mut(handle.body) {
            rb.set_position(pose, wake);
        }
    }

    /// Overwrite a body's position only, leaving rotation untouched.
    ///
    /// With `wake` false a sleeping body stays asleep and keeps its
    /// velocities, which is what fine-grained drag nudges want.
    pub fn set_translation(&mut self, handle: BodyHandle, position: Vec3, wake: bool) {
        if let Some(rb) = self.bodies.get_mut(handle.body) {
            rb.set_translation(position, wake);
        }
    }

    /// Clear all accumulated forces and torques on a body
    pub fn reset_forces(&mut self, handle: BodyHandle, wake: bool) {
        if let Some(rb) = self.bodies.get_mut(handle.body) {
            rb.reset_forces(wake);
            rb.reset_torques(wake);
        }
    }

    /// Install a gravity acceleration on a body for the next step.
    ///
    /// Replaces whatever force was accumulated before; the installed force
    /// is `acceleration * mass`. Does not wake the body.
    pub fn apply_gravity(&mut self, handle: BodyHandle, acceleration: Vec3) {
        if let Some(rb) = self.bodies.get_mut(handle.body) {
            if !rb.is_dynamic() {
                return;
            }
            let mass = rb.mass();
            rb.reset_forces(false);
            rb.add_force(acceleration * mass, false);
        }
    }

    /// Wake a body so the next step integrates it
    pub fn wake(&mut self, handle: BodyHandle) {
        if let Some(rb) = self.bodies.get_mut(handle.body) {
            rb.wake_up(true);
        }
    }

    /// Force-deactivate a body; its velocities are zeroed
    pub fn sleep(&mut self, handle: BodyHandle) {
        if let Some(rb) = self.bodies.get_mut(handle.body) {
            rb.sleep();
        }
    }

    /// Recompute a body's mass properties from its collider, keeping local
    /// inertia consistent after external pose or geometry changes
    pub fn recompute_inertia(&mut self, handle: BodyHandle) {
        if let Some(rb) = self.bodies.get_mut(handle.body) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }
    }

    /// Number of bodies in the world, planet included
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Remove every body and collider except the planet.
    ///
    /// Safe to call repeatedly; the pending step backlog is discarded too.
    pub fn clear(&mut self) {
        let doomed: Vec<RigidBodyHandle> = self
            .bodies
            .iter()
            .map(|(handle, _)| handle)
            .filter(|handle| *handle != self.planet.body)
            .collect();

        for handle in doomed {
            self.bodies.remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }

        self.accumulator = 0.0;
        log::debug!("dynamics world cleared, {} bodies remain", self.bodies.len());
    }

    // Teardown needs no counterpart to the engine's manual destruction
    // order: the arenas own every body and collider, the planet included,
    // and dropping the struct releases them after the pipeline state.
}
