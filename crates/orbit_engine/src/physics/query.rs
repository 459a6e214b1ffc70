//! Ray and contact query value types

use crate::foundation::math::Vec3;
use crate::ecs::Entity;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray intersection test
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// The scene entity that was hit, or `None` for geometry that owns no
    /// entity (the planet)
    pub entity: Option<Entity>,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
    /// The surface normal at the intersection point
    pub normal: Vec3,
}

/// A single contact between a queried body and another collider
#[derive(Debug, Clone, Copy)]
pub struct ContactPoint {
    /// Contact position on the other collider, world space
    pub position: Vec3,
    /// Separation normal: the direction that moves the queried body out of
    /// the other collider
    pub normal: Vec3,
    /// Penetration depth; positive means the shapes interpenetrate, zero or
    /// negative means touching or separated within the query margin
    pub depth: f32,
    /// The entity owning the other collider, or `None` for the planet
    pub entity: Option<Entity>,
}
