//! Transform component for the ECS system
//!
//! Pure data component (no logic). The rendering consumer reads the
//! column-major matrix form; the physics bridge reads and writes the
//! position/rotation pair directly.

use crate::foundation::math::{Transform as MathTransform, Vec3, Mat4, Quat, Iso3};
use crate::ecs::Component;

/// ECS Transform component
///
/// Represents spatial transformation in world space, Y-up right-handed.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// World space rotation quaternion
    pub rotation: Quat,

    /// World space scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to foundation math Transform for calculations
    pub fn to_math_transform(&self) -> MathTransform {
        MathTransform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Convert to a column-major transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        self.to_math_transform().to_matrix()
    }

    /// Create from a transformation matrix (decompose TRS)
    pub fn from_matrix(matrix: Mat4) -> Self {
        let math_transform = MathTransform::from_matrix(matrix);
        Self {
            position: math_transform.position,
            rotation: math_transform.rotation,
            scale: math_transform.scale,
        }
    }

    /// Convert to a rigid isometry for the physics bridge, ignoring scale
    pub fn to_isometry(&self) -> Iso3 {
        self.to_math_transform().to_isometry()
    }

    /// Overwrite position and rotation from a rigid isometry, keeping scale
    pub fn set_isometry(&mut self, iso: &Iso3) {
        self.position = iso.translation.vector;
        self.rotation = iso.rotation;
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from quaternion
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Unit;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_transform_identity() {
        let transform = TransformComponent::identity();

        assert_eq!(transform.position, Vec3::zeros());
        assert_relative_eq!(transform.rotation, Quat::identity(), epsilon = EPSILON);
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_matrix_roundtrip_consistency() {
        let original = TransformComponent {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_axis_angle(&Unit::new_normalize(Vec3::new(1.0, 1.0, 1.0)), 0.5),
            scale: Vec3::new(2.0, 1.5, 0.8),
        };

        let reconstructed = TransformComponent::from_matrix(original.to_matrix());

        assert_relative_eq!(reconstructed.position, original.position, epsilon = EPSILON);
        assert_relative_eq!(reconstructed.scale, original.scale, epsilon = EPSILON);

        let dot = original.rotation.coords.dot(&reconstructed.rotation.coords);
        assert!(dot.abs() > 0.999, "rotation mismatch: dot product = {dot}");
    }

    #[test]
    fn test_isometry_roundtrip_keeps_scale() {
        let mut transform = TransformComponent::from_position(Vec3::new(5.0, 0.0, -3.0))
            .with_uniform_scale(2.0);

        let iso = transform.to_isometry();
        transform.set_isometry(&iso);

        assert_relative_eq!(transform.position, Vec3::new(5.0, 0.0, -3.0), epsilon = EPSILON);
        assert_eq!(transform.scale, Vec3::new(2.0, 2.0, 2.0));
    }
}
