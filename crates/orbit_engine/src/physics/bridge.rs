//! Entity ↔ body synchronization
//!
//! [`BodyBridge`] keeps the side table mapping scene entities to their
//! native body handles and copies transforms between the two worlds:
//!
//! - **pull** after each step, body pose → transform component, so the
//!   rendering consumer sees the simulation;
//! - **push** on externally-driven changes (placement, release of a drag),
//!   transform component → body, clearing stale forces, waking the body and
//!   recomputing inertia;
//! - **push_position**, the light variant used for fine-grained drag nudges
//!   where re-waking every nudge would throw away velocities.
//!
//! The bridge only references handles. Body ownership stays with the
//! dynamics world; clearing the bridge drops the map and nothing else.

use std::collections::HashMap;

use crate::ecs::components::TransformComponent;
use crate::ecs::{Entity, World};
use crate::physics::dynamics::{BodyHandle, DynamicsWorld};

/// Entity → body handle side table with transform synchronization
#[derive(Debug, Default)]
pub struct BodyBridge {
    map: HashMap<Entity, BodyHandle>,
}

impl BodyBridge {
    /// Create an empty bridge
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Associate an entity with its body handle
    pub fn insert(&mut self, entity: Entity, handle: BodyHandle) {
        self.map.insert(entity, handle);
    }

    /// Look up the body handle for an entity
    pub fn handle_of(&self, entity: Entity) -> Option<BodyHandle> {
        self.map.get(&entity).copied()
    }

    /// Forget an entity's body association
    pub fn remove(&mut self, entity: Entity) -> Option<BodyHandle> {
        self.map.remove(&entity)
    }

    /// Number of mapped bodies
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no bodies are mapped
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over mapped body handles
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.map.values().copied()
    }

    /// Drop all associations (the bodies themselves are untouched)
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Pull every mapped body's simulated pose into its entity's transform
    /// component. Call after stepping; entities without a transform are
    /// skipped.
    pub fn pull_transforms(&self, world: &mut World, dynamics: &DynamicsWorld) {
        for (&entity, &handle) in &self.map {
            let Some(pose) = dynamics.pose_of(handle) else {
                continue;
            };
            if let Some(transform) = world.get_component_mut::<TransformComponent>(entity) {
                transform.set_isometry(&pose);
            }
        }
    }

    /// Push an entity's transform into its body: full synchronization.
    ///
    /// Clears accumulated forces, wakes the body and recomputes inertia so
    /// the engine state is consistent with the externally-written pose.
    pub fn push_transform(&self, world: &World, dynamics: &mut DynamicsWorld, entity: Entity) {
        let Some(handle) = self.handle_of(entity) else {
            return;
        };
        let Some(transform) = world.get_component::<TransformComponent>(entity) else {
            return;
        };

        dynamics.set_pose(handle, transform.to_isometry(), true);
        dynamics.reset_forces(handle, true);
        dynamics.wake(handle);
        dynamics.recompute_inertia(handle);
    }

    /// Push only an entity's position into its body, without waking it or
    /// clearing forces.
    pub fn push_position(&self, world: &World, dynamics: &mut DynamicsWorld, entity: Entity) {
        let Some(handle) = self.handle_of(entity) else {
            return;
        };
        let Some(transform) = world.get_component::<TransformComponent>(entity) else {
            return;
        };

        dynamics.set_translation(handle, transform.position, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Quat, Vec3};
    use crate::physics::shape::ShapeDescriptor;
    use approx::assert_relative_eq;
    use nalgebra::Unit;

    fn setup() -> (World, DynamicsWorld, BodyBridge, Entity) {
        let mut world = World::new();
        let mut dynamics = DynamicsWorld::new(100.0);
        let mut bridge = BodyBridge::new();

        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::identity());
        let handle = dynamics.create_body(entity, &ShapeDescriptor::sphere(1.0), None);
        bridge.insert(entity, handle);

        (world, dynamics, bridge, entity)
    }

    #[test]
    fn test_full_push_pull_roundtrip() {
        let (mut world, mut dynamics, bridge, entity) = setup();

        let position = Vec3::new(3.0, 60.0, -2.0);
        let rotation = Quat::from_axis_angle(&Unit::new_normalize(Vec3::new(0.3, 1.0, 0.1)), 0.8);
        {
            let transform = world.get_component_mut::<TransformComponent>(entity).unwrap();
            transform.position = position;
            transform.rotation = rotation;
        }

        bridge.push_transform(&world, &mut dynamics, entity);

        // Scribble over the component, then pull the body state back
        world.get_component_mut::<TransformComponent>(entity).unwrap().position = Vec3::zeros();
        bridge.pull_transforms(&mut world, &dynamics);

        let transform = world.get_component::<TransformComponent>(entity).unwrap();
        assert_relative_eq!(transform.position, position, epsilon = 1e-5);
        let dot = transform.rotation.coords.dot(&rotation.coords);
        assert!(dot.abs() > 0.999, "rotation not preserved: dot = {dot}");
    }

    #[test]
    fn test_position_push_pull_roundtrip() {
        let (mut world, mut dynamics, bridge, entity) = setup();

        let position = Vec3::new(-8.0, 42.0, 5.0);
        world.get_component_mut::<TransformComponent>(entity).unwrap().position = position;

        bridge.push_position(&world, &mut dynamics, entity);

        world.get_component_mut::<TransformComponent>(entity).unwrap().position = Vec3::zeros();
        bridge.pull_transforms(&mut world, &dynamics);

        let transform = world.get_component::<TransformComponent>(entity).unwrap();
        assert_relative_eq!(transform.position, position, epsilon = 1e-5);
        // Rotation was never touched
        assert_relative_eq!(transform.rotation, Quat::identity(), epsilon = 1e-5);
    }

    #[test]
    fn test_position_push_does_not_wake() {
        let (mut world, mut dynamics, bridge, entity) = setup();
        let handle = bridge.handle_of(entity).unwrap();

        dynamics.sleep(handle);
        assert!(dynamics.is_sleeping(handle));

        world.get_component_mut::<TransformComponent>(entity).unwrap().position =
            Vec3::new(0.0, 30.0, 0.0);
        bridge.push_position(&world, &mut dynamics, entity);
        assert!(dynamics.is_sleeping(handle));

        // The full push does wake
        bridge.push_transform(&world, &mut dynamics, entity);
        assert!(!dynamics.is_sleeping(handle));
    }

    #[test]
    fn test_clear_drops_map_only() {
        let (_world, dynamics, mut bridge, entity) = setup();

        bridge.clear();
        assert!(bridge.is_empty());
        assert!(bridge.handle_of(entity).is_none());

        // Bodies themselves are untouched: planet + the sphere
        assert_eq!(dynamics.body_count(), 2);
    }
}
