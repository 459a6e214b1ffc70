//! Spherical gravity field
//!
//! Gravity in this world is not a fixed global down vector: every frame,
//! each awake dynamic body is pulled toward the planet center. The magnitude
//! scales with the square root of the body's mass. That formula is made up
//! (arcade gravity, not Newton) and it stays exactly as-is because the
//! observable simulation behavior depends on it.

use crate::foundation::math::Vec3;
use crate::physics::dynamics::{BodyHandle, DynamicsWorld};

/// Positions closer to the center than this get no pull; normalizing a zero
/// vector is undefined and the center is the field's equilibrium anyway
const CENTER_EPSILON: f32 = 1e-4;

/// Per-body gravity toward a spherical planet center
#[derive(Debug, Clone, Copy)]
pub struct GravityField {
    center: Vec3,
    g: f32,
}

impl GravityField {
    /// Field for a planet of `radius` whose surface passes through the
    /// world origin, with base acceleration `g`.
    pub fn new(radius: f32, g: f32) -> Self {
        Self {
            center: Vec3::new(0.0, -radius, 0.0),
            g,
        }
    }

    /// The planet center the field pulls toward
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Base gravitational acceleration
    pub fn g(&self) -> f32 {
        self.g
    }

    /// Gravity acceleration for a body of `mass` at `position`.
    ///
    /// Direction is the unit vector from the body toward the planet center;
    /// magnitude is `sqrt(mass) * g`. Zero for massless bodies and at the
    /// center itself.
    pub fn acceleration_for(&self, mass: f32, position: Vec3) -> Vec3 {
        if mass <= 0.0 {
            return Vec3::zeros();
        }

        let to_center = self.center - position;
        let distance = to_center.magnitude();
        if distance <= CENTER_EPSILON {
            return Vec3::zeros();
        }

        to_center / distance * (mass.sqrt() * self.g)
    }

    /// Recompute and install gravity on one body.
    ///
    /// Sleeping bodies are skipped: their last force stands, which is fine
    /// because the engine does not integrate them until woken. Call this for
    /// every mapped body immediately before stepping, so the step integrates
    /// current gravity.
    pub fn apply_to(&self, dynamics: &mut DynamicsWorld, handle: BodyHandle) {
        if !dynamics.is_dynamic(handle) || dynamics.is_sleeping(handle) {
            return;
        }
        let Some(position) = dynamics.translation_of(handle) else {
            return;
        };

        let acceleration = self.acceleration_for(dynamics.mass_of(handle), position);
        dynamics.apply_gravity(handle, acceleration);
    }
}
