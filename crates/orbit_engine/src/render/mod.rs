//! Rendering boundary
//!
//! The actual rendering pipeline is an external collaborator. This module
//! holds what the physics core needs from it: a [`Camera`] for view and
//! projection matrices (and cursor unprojection), and the [`SceneRenderer`]
//! delegate the frame loop hands the finished scene to.

pub mod camera;

pub use camera::Camera;

use crate::ecs::World;

/// Delegate the frame loop hands the scene to after stepping and pulling
/// transforms
pub trait SceneRenderer {
    /// Render one frame of the scene
    fn draw_scene(&mut self, world: &World, delta: f32);
}

/// Renderer that draws nothing; for headless runs and tests
pub struct NullRenderer;

impl SceneRenderer for NullRenderer {
    fn draw_scene(&mut self, _world: &World, _delta: f32) {}
}
