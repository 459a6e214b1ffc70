//! # Orbit Engine
//!
//! A planet-gravity physics sandbox engine: a rigid-body world wrapped around
//! a spherical planet, manipulated by mouse ray-picking.
//!
//! ## Features
//!
//! - **Spherical Gravity**: every body is pulled toward the planet center,
//!   recomputed each frame
//! - **ECS Scene**: a small entity/component world bridged to the dynamics
//!   engine in both directions
//! - **Ray Picking**: cursor-to-world unprojection and closest-hit selection
//! - **Drag Resolution**: bounded iterative penetration correction while an
//!   object is dragged through the scene
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orbit_engine::prelude::*;
//!
//! fn main() {
//!     let mut world = PhysicsWorld::new(PlanetConfig::default());
//!     let ball = world.add_sphere(2.0);
//!
//!     let camera = Camera::perspective(Vec3::new(0.0, 5.0, 20.0), 60.0, 16.0 / 9.0, 0.1, 1000.0);
//!     let mut picking = PickingSystem::new(1280, 720);
//!
//!     // In your event loop:
//!     picking.on_mouse_press(640.0, 360.0, &mut world, &camera);
//!
//!     // In your frame loop:
//!     world.draw_scene(1.0 / 60.0, &mut NullRenderer);
//!     let _ = world.position_of(ball);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod physics;
pub mod render;
pub mod input;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Vec3, Mat4, Quat, Transform},
            time::Timer,
        },
        config::{Config, ConfigError},
        ecs::{World, Entity, Component},
        ecs::components::{TransformComponent, ColorComponent},
        ecs::systems::PickingSystem,
        physics::{
            PhysicsWorld, PlanetConfig, ShapeDescriptor, BodyHandle,
            Ray, RayHit, ContactPoint, GravityField,
        },
        render::{Camera, SceneRenderer, NullRenderer},
        input::picking::MouseState,
    };
}
