//! # 3D Camera System
//!
//! Camera abstraction for view/projection matrix generation and for
//! unprojecting cursor positions into world-space pick rays.
//!
//! ## Design Principles
//! - **Library-agnostic**: no renderer types leak into the camera math
//! - **Immutable operation**: matrix getters never modify camera state
//! - **On-demand math**: matrices are computed per call, not cached

use crate::foundation::math::{Vec3, Vec4, Mat4, Mat4Ext, utils};
use crate::physics::query::Ray;

/// 3D camera with perspective projection
///
/// # Coordinate System
/// Right-handed Y-up world space; view space looks down -Z. Projection
/// maps depth to [0, 1].
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Field of view angle in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera with standard Y-up orientation.
    ///
    /// The default target is the origin and the up vector is +Y; both can be
    /// changed after creation.
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Field of view in degrees (stored as radians)
    /// * `aspect` - Viewport aspect ratio (width / height)
    /// * `near` - Near clipping plane distance (> 0)
    /// * `far` - Far clipping plane distance (> near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {position:?}");
    }

    /// Update camera target (look-at point)
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {target:?}");
    }

    /// Configure camera to look at a specific point with a custom up vector
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
    }

    /// Update camera aspect ratio for viewport changes.
    ///
    /// Typically called when the window is resized. Only significant changes
    /// are logged to keep resize events quiet.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Generate the world-to-camera view matrix
    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Generate the perspective projection matrix
    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Generate the combined view-projection matrix (P × V)
    pub fn get_view_projection_matrix(&self) -> Mat4 {
        self.get_projection_matrix() * self.get_view_matrix()
    }

    /// Convert normalized device coordinates to a world-space pick ray.
    ///
    /// Unprojects the cursor at the near and far planes through the inverse
    /// view-projection, then normalizes the near→far direction. The ray
    /// originates at the camera position.
    ///
    /// # Arguments
    /// * `screen_x` - NDC X in [-1, 1], left to right
    /// * `screen_y` - NDC Y in [-1, 1], bottom to top
    pub fn screen_to_world_ray(&self, screen_x: f32, screen_y: f32) -> Ray {
        let view_proj = self.get_view_projection_matrix();
        let inv_view_proj = view_proj
            .try_inverse()
            .expect("view-projection matrix must be invertible");

        // Cursor at the near and far planes in NDC (depth range [0, 1])
        let ndc_near = Vec4::new(screen_x, screen_y, 0.0, 1.0);
        let ndc_far = Vec4::new(screen_x, screen_y, 1.0, 1.0);

        let world_near_h = inv_view_proj * ndc_near;
        let world_far_h = inv_view_proj * ndc_far;

        let world_near = world_near_h.xyz() / world_near_h.w;
        let world_far = world_far_h.xyz() / world_far_h.w;

        let ray_direction = (world_far - world_near).normalize();

        Ray::new(self.position, ray_direction)
    }
}

impl Default for Camera {
    /// A perspective camera above and behind the origin, looking at the
    /// scene center: 45° FOV, 16:9, near 0.1, far 1000.
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 3.0),
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}
