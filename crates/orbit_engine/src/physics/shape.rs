//! Geometric shape descriptors
//!
//! A closed set of primitives the application can submit to the scene. Each
//! variant carries its physical extents; collision geometry, default mass and
//! rolling friction all derive from here through explicit `match` dispatch,
//! so the fallback arm is visible at every call site.

use crate::foundation::math::Vec3;

/// Description of a geometric primitive and its physical extents.
///
/// Immutable once submitted: the dynamics layer sizes its collision geometry
/// from a snapshot of these values.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDescriptor {
    /// A UV sphere. `rings`/`slices` are mesh tessellation hints for the
    /// rendering collaborator; physics only consumes the radius.
    Sphere {
        /// Sphere radius
        radius: f32,
        /// Horizontal subdivisions of the render mesh
        rings: u32,
        /// Vertical subdivisions of the render mesh
        slices: u32,
    },

    /// An axis-aligned cube with uniform half-extent `scale`.
    Cube {
        /// Half-extent along each axis
        scale: f32,
    },

    /// Clipmap terrain patch. Physics has no specialized path for it and
    /// substitutes a fixed small box collider.
    Terrain {
        /// Size of one clipmap cell
        scale: f32,
        /// Number of clipmap rings
        rings: u32,
    },
}

impl ShapeDescriptor {
    /// Sphere with default tessellation
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere {
            radius,
            rings: 16,
            slices: 16,
        }
    }

    /// Cube with the given uniform half-extent
    pub fn cube(scale: f32) -> Self {
        Self::Cube { scale }
    }

    /// Terrain patch descriptor
    pub fn terrain(scale: f32, rings: u32) -> Self {
        Self::Terrain { scale, rings }
    }

    /// Derived extents vector used to size collision geometry
    pub fn dimensions(&self) -> Vec3 {
        match *self {
            Self::Sphere { radius, .. } => Vec3::new(radius, radius, radius),
            Self::Cube { scale } => Vec3::new(scale, scale, scale),
            Self::Terrain { scale, .. } => Vec3::new(scale, scale, scale),
        }
    }

    /// Default mass derived from the shape's footprint, used when the caller
    /// does not override it. Zero mass means a static body.
    pub fn default_mass(&self) -> f32 {
        let dims = self.dimensions();
        match *self {
            Self::Sphere { radius, .. } => radius * radius * 0.5,
            Self::Cube { .. } | Self::Terrain { .. } => dims.x * dims.y,
        }
    }

    /// Rolling friction coefficient; only spheres roll.
    pub fn rolling_friction(&self) -> f32 {
        match *self {
            Self::Sphere { .. } => 0.5,
            Self::Cube { .. } | Self::Terrain { .. } => 0.0,
        }
    }
}
