//! Physics world facade
//!
//! [`PhysicsWorld`] composes the ECS scene, the dynamics adapter, the
//! gravity field and the entity bridge into the surface the application
//! talks to: spawn shapes, pick with rays, push and pull transforms, drive
//! the frame. The frame ordering contract lives in
//! [`draw_scene`](PhysicsWorld::draw_scene): gravity is recomputed before
//! the step that integrates it, and transforms are pulled after the step
//! they reflect, before the render delegate runs.

use crate::ecs::components::{ColorComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec3;
use crate::physics::bridge::BodyBridge;
use crate::physics::drag;
use crate::physics::dynamics::{BodyHandle, DynamicsWorld};
use crate::physics::gravity::GravityField;
use crate::physics::query::{ContactPoint, RayHit};
use crate::physics::shape::ShapeDescriptor;
use crate::render::SceneRenderer;

/// Planet parameters for world construction
#[derive(Debug, Clone, Copy)]
pub struct PlanetConfig {
    /// Planet radius; the surface passes through the world origin
    pub radius: f32,
    /// Base gravitational acceleration
    pub gravity: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 200.0,
            gravity: 9.8,
        }
    }
}

/// The sandbox world: scene graph + rigid-body simulation, kept in sync
pub struct PhysicsWorld {
    world: World,
    dynamics: DynamicsWorld,
    gravity: GravityField,
    bridge: BodyBridge,
}

impl PhysicsWorld {
    /// Create a world around a static planet
    pub fn new(config: PlanetConfig) -> Self {
        Self {
            world: World::new(),
            dynamics: DynamicsWorld::new(config.radius),
            gravity: GravityField::new(config.radius, config.gravity),
            bridge: BodyBridge::new(),
        }
    }

    /// Add a shape with its default footprint-derived mass
    pub fn add_shape(&mut self, descriptor: &ShapeDescriptor) -> Entity {
        self.spawn(descriptor, None)
    }

    /// Add a shape with an explicit mass; zero makes it static
    pub fn add_shape_with_mass(&mut self, descriptor: &ShapeDescriptor, mass: f32) -> Entity {
        self.spawn(descriptor, Some(mass))
    }

    /// Add a sphere with default tessellation
    pub fn add_sphere(&mut self, radius: f32) -> Entity {
        self.add_shape(&ShapeDescriptor::sphere(radius))
    }

    /// Add a cube with the given half-extent
    pub fn add_cube(&mut self, scale: f32) -> Entity {
        self.add_shape(&ShapeDescriptor::cube(scale))
    }

    fn spawn(&mut self, descriptor: &ShapeDescriptor, mass_override: Option<f32>) -> Entity {
        let entity = self.world.create_entity();
        self.world.add_component(entity, TransformComponent::identity());
        self.world.add_component(entity, ColorComponent::default());

        let handle = self.dynamics.create_body(entity, descriptor, mass_override);
        self.bridge.insert(entity, handle);

        entity
    }

    /// Closest ray intersection against everything in the world
    pub fn first_at_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.dynamics.cast_ray(origin, direction, max_distance)
    }

    /// Push an entity's transform into its body: full synchronization,
    /// clearing forces, waking the body and refreshing inertia
    pub fn reset_object(&mut self, entity: Entity) {
        self.bridge.push_transform(&self.world, &mut self.dynamics, entity);
    }

    /// Push only an entity's position into its body, without waking it
    pub fn reset_position(&mut self, entity: Entity) {
        self.bridge.push_position(&self.world, &mut self.dynamics, entity);
    }

    /// Clear an entity's accumulated forces and force-deactivate its body
    pub fn freeze_object(&mut self, entity: Entity) {
        if let Some(handle) = self.bridge.handle_of(entity) {
            self.dynamics.reset_forces(handle, false);
            self.dynamics.sleep(handle);
        }
    }

    /// Write a position into the entity's transform and position-push it
    /// into the body in one motion
    pub fn place_object(&mut self, entity: Entity, position: Vec3) {
        if let Some(transform) = self.world.get_component_mut::<TransformComponent>(entity) {
            transform.position = position;
        }
        self.reset_position(entity);
    }

    /// All current contacts of an entity's body
    pub fn object_contact_points(&self, entity: Entity) -> Vec<ContactPoint> {
        self.bridge
            .handle_of(entity)
            .map(|handle| self.dynamics.contacts_against(handle))
            .unwrap_or_default()
    }

    /// The deepest contact of an entity's body, if any
    pub fn deepest_contact_point(&self, entity: Entity) -> Option<ContactPoint> {
        let handle = self.bridge.handle_of(entity)?;
        self.dynamics.deepest_contact_against(handle)
    }

    /// The deepest contact the entity's body would have at a hypothetical
    /// position, without moving anything
    pub fn deepest_contact_at(&self, entity: Entity, position: Vec3) -> Option<ContactPoint> {
        let handle = self.bridge.handle_of(entity)?;
        self.dynamics.deepest_contact_at(handle, position)
    }

    /// Run the bounded penetration-resolution loop for a drag candidate.
    ///
    /// Pure with respect to the simulation: returns the corrected position
    /// and commits nothing. Returns `None` for entities without a body.
    pub fn resolve_drag_position(&self, entity: Entity, candidate: Vec3) -> Option<Vec3> {
        let handle = self.bridge.handle_of(entity)?;
        Some(drag::resolve_position(
            candidate,
            |position| self.dynamics.deepest_contact_at(handle, position),
            drag::MAX_ITERATIONS,
        ))
    }

    /// Advance one frame: refresh gravity, step the simulation, pull the
    /// simulated transforms back into the scene, then hand the scene to the
    /// render delegate.
    pub fn draw_scene(&mut self, delta: f32, renderer: &mut dyn SceneRenderer) {
        for handle in self.bridge.handles() {
            self.gravity.apply_to(&mut self.dynamics, handle);
        }

        self.dynamics.step(delta);
        self.bridge.pull_transforms(&mut self.world, &self.dynamics);

        renderer.draw_scene(&self.world, delta);
    }

    /// Pull simulated poses into transform components without stepping
    pub fn sync_transforms(&mut self) {
        self.bridge.pull_transforms(&mut self.world, &self.dynamics);
    }

    /// Remove every entity and every non-planet body.
    ///
    /// Safe to call repeatedly. Callers holding a selection must clear it;
    /// entity liveness is not validated here.
    pub fn clear(&mut self) {
        self.dynamics.clear();
        self.bridge.clear();
        self.world.clear();
        log::debug!("scene cleared");
    }

    /// The scene world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The scene world, mutable
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The gravity field
    pub fn gravity_field(&self) -> &GravityField {
        &self.gravity
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.world.entity_count()
    }

    /// Body handle of an entity, if it has one
    pub fn body_of(&self, entity: Entity) -> Option<BodyHandle> {
        self.bridge.handle_of(entity)
    }

    /// Simulated world position of an entity's body
    pub fn position_of(&self, entity: Entity) -> Option<Vec3> {
        let handle = self.bridge.handle_of(entity)?;
        self.dynamics.translation_of(handle)
    }

    /// Simulated linear velocity of an entity's body
    pub fn linear_velocity_of(&self, entity: Entity) -> Option<Vec3> {
        let handle = self.bridge.handle_of(entity)?;
        self.dynamics.linear_velocity_of(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn small_world() -> PhysicsWorld {
        PhysicsWorld::new(PlanetConfig {
            radius: 100.0,
            gravity: 9.8,
        })
    }

    #[test]
    fn test_spawn_creates_entity_body_and_components() {
        let mut world = small_world();
        let ball = world.add_sphere(2.0);

        assert_eq!(world.entity_count(), 1);
        assert!(world.body_of(ball).is_some());
        assert!(world
            .world()
            .get_component::<TransformComponent>(ball)
            .is_some());
        assert!(world.world().get_component::<ColorComponent>(ball).is_some());
    }

    #[test]
    fn test_ray_pick_reports_distance_and_normal() {
        let mut world = small_world();
        let ball = world.add_sphere(2.0);
        world.place_object(ball, Vec3::new(0.0, 50.0, 0.0));

        let hit = world
            .first_at_ray(Vec3::new(0.0, 50.0, 100.0), Vec3::new(0.0, 0.0, -1.0), 500.0)
            .expect("ray aimed at the sphere must hit");

        assert_eq!(hit.entity, Some(ball));
        assert_relative_eq!(hit.distance, 98.0, epsilon = 1e-3);
        assert!(hit.normal.z > 0.99);
    }

    #[test]
    fn test_drag_resolution_clears_penetration_against_static_cube() {
        let mut world = small_world();

        let cube = world.add_shape_with_mass(&ShapeDescriptor::cube(3.0), 0.0);
        world.place_object(cube, Vec3::new(0.0, 50.0, 0.0));

        let ball = world.add_sphere(1.0);
        world.place_object(ball, Vec3::new(0.0, 60.0, 0.0));

        // Candidate buried inside the cube
        let resolved = world
            .resolve_drag_position(ball, Vec3::new(0.0, 51.0, 0.0))
            .unwrap();

        let residual = world
            .deepest_contact_at(ball, resolved)
            .map_or(0.0, |c| c.depth);
        assert!(
            residual <= 1e-3,
            "still penetrating by {residual} at {resolved:?}"
        );

        // The body itself was never committed anywhere
        assert_relative_eq!(
            world.position_of(ball).unwrap(),
            Vec3::new(0.0, 60.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_clear_forgets_bodies_but_keeps_planet() {
        let mut world = small_world();
        let ball = world.add_sphere(1.0);
        world.place_object(ball, Vec3::new(0.0, 30.0, 0.0));

        world.clear();
        world.clear(); // repeat must be harmless

        assert_eq!(world.entity_count(), 0);
        assert!(world.body_of(ball).is_none());
        assert!(world.position_of(ball).is_none());

        // Planet still answers ray queries, with no entity attached
        let hit = world.first_at_ray(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0), 100.0);
        assert!(hit.is_some_and(|h| h.entity.is_none()));
    }

    #[test]
    fn test_gravity_accelerates_bodies_toward_planet_center() {
        let mut world = small_world();
        let ball = world.add_sphere(1.0);
        world.place_object(ball, Vec3::new(30.0, 40.0, 0.0));
        world.reset_object(ball);

        for _ in 0..10 {
            world.draw_scene(DT, &mut NullRenderer);
        }

        let velocity = world.linear_velocity_of(ball).unwrap();
        let to_center = (world.gravity_field().center() - world.position_of(ball).unwrap()).normalize();
        assert!(
            velocity.normalize().dot(&to_center) > 0.99,
            "velocity {velocity:?} does not point at the planet center"
        );
    }

    #[test]
    fn test_body_resting_on_surface_stays_put() {
        let mut world = small_world();
        let ball = world.add_sphere(1.0);
        // Tangent to the planet surface at the origin
        world.place_object(ball, Vec3::new(0.0, 1.0, 0.0));
        world.reset_object(ball);

        for _ in 0..90 {
            world.draw_scene(DT, &mut NullRenderer);
        }

        let drift = (world.position_of(ball).unwrap() - Vec3::new(0.0, 1.0, 0.0)).magnitude();
        assert!(drift < 0.5, "resting body drifted {drift}");
    }

    #[test]
    fn test_frame_pulls_simulation_into_transforms() {
        let mut world = small_world();
        let ball = world.add_sphere(1.0);
        world.place_object(ball, Vec3::new(0.0, 40.0, 0.0));
        world.reset_object(ball);

        for _ in 0..30 {
            world.draw_scene(DT, &mut NullRenderer);
        }

        let component_position = world
            .world()
            .get_component::<TransformComponent>(ball)
            .unwrap()
            .position;
        assert_relative_eq!(
            component_position,
            world.position_of(ball).unwrap(),
            epsilon = 1e-5
        );
        // It fell: the component reflects the simulation, not the placement
        assert!(component_position.y < 40.0);
    }
}
