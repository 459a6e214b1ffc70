//! Color component
//!
//! Flat RGB tint consumed by the rendering collaborator.

use crate::foundation::math::Vec3;
use crate::ecs::Component;

/// Component holding an entity's RGB color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorComponent {
    /// RGB channels, each in [0, 1]
    pub rgb: Vec3,
}

impl ColorComponent {
    /// Create a color from RGB channels
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            rgb: Vec3::new(r, g, b),
        }
    }

    /// Opaque white
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl Component for ColorComponent {}

impl Default for ColorComponent {
    fn default() -> Self {
        Self::white()
    }
}
