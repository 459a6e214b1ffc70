//! Mouse-based entity selection and drag manipulation
//!
//! Orchestrates the picking pipeline: input → camera → physics → scene.
//! All state lives in an explicit struct threaded through the input
//! callbacks; nothing here is global. While a selection is held, pointer
//! moves and scrolls are manipulation commands rather than camera commands.

use crate::ecs::Entity;
use crate::input::picking::MouseState;
use crate::physics::{drag, PhysicsWorld};
use crate::render::Camera;

/// Mouse picking and drag manipulation state
///
/// # Usage
/// ```no_run
/// # use orbit_engine::ecs::systems::PickingSystem;
/// # use orbit_engine::physics::{PhysicsWorld, PlanetConfig};
/// # use orbit_engine::render::Camera;
/// # let mut world = PhysicsWorld::new(PlanetConfig::default());
/// # let camera = Camera::default();
/// let mut picking = PickingSystem::new(1920, 1080);
///
/// // In your event handlers:
/// picking.on_mouse_press(960.0, 540.0, &mut world, &camera);
/// picking.on_mouse_move(980.0, 540.0, &mut world, &camera);
/// picking.on_mouse_release(&mut world);
/// ```
pub struct PickingSystem {
    /// Mouse input state
    mouse: MouseState,

    /// Currently selected entity, if any
    selected: Option<Entity>,

    /// Maximum pick ray length
    max_pick_distance: f32,
}

impl PickingSystem {
    /// Create a new picking system for the given window size
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            mouse: MouseState::new(window_width, window_height),
            selected: None,
            max_pick_distance: 10_000.0,
        }
    }

    /// Update window size for NDC conversion; call on resize
    pub fn update_window_size(&mut self, width: u32, height: u32) {
        self.mouse.update_window_size(width, height);
    }

    /// Limit how far the pick ray reaches
    pub fn set_max_pick_distance(&mut self, distance: f32) {
        self.max_pick_distance = distance;
    }

    /// Currently selected entity
    pub fn selected(&self) -> Option<Entity> {
        self.selected
    }

    /// Drop the selection without touching the body.
    ///
    /// Callers must invoke this when they clear the scene; the system does
    /// not validate entity liveness on its own.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Handle the select button being pressed.
    ///
    /// Casts a pick ray through the cursor; a hit on an entity-owning body
    /// selects it and freezes it so it hangs in place while held. A miss
    /// (or a hit on entity-less geometry like the planet) clears the
    /// selection.
    pub fn on_mouse_press(
        &mut self,
        screen_x: f64,
        screen_y: f64,
        world: &mut PhysicsWorld,
        camera: &Camera,
    ) {
        self.mouse.update_position(screen_x, screen_y);

        let (ndc_x, ndc_y) = self.mouse.screen_to_ndc();
        let ray = camera.screen_to_world_ray(ndc_x, ndc_y);

        self.selected = world
            .first_at_ray(ray.origin, ray.direction, self.max_pick_distance)
            .and_then(|hit| hit.entity);

        if let Some(entity) = self.selected {
            world.freeze_object(entity);
            log::debug!("selected entity {}", entity.id());
        }
    }

    /// Handle the select button being released.
    ///
    /// Pushes the selection's current transform into its body (waking it
    /// and synchronizing final placement), then clears the selection.
    pub fn on_mouse_release(&mut self, world: &mut PhysicsWorld) {
        if let Some(entity) = self.selected.take() {
            world.reset_object(entity);
            log::debug!("released entity {}", entity.id());
        }
    }

    /// Handle pointer movement. While a selection is held this drags the
    /// object along the new pick ray at constant distance from the camera.
    pub fn on_mouse_move(
        &mut self,
        screen_x: f64,
        screen_y: f64,
        world: &mut PhysicsWorld,
        camera: &Camera,
    ) {
        self.mouse.update_position(screen_x, screen_y);
        if self.selected.is_some() {
            self.drag_selected(world, camera, 0.0);
        }
    }

    /// Handle scroll input. While a selection is held the wheel pushes or
    /// pulls the object along the pick ray.
    pub fn on_mouse_scroll(&mut self, scroll_delta: f32, world: &mut PhysicsWorld, camera: &Camera) {
        if self.selected.is_some() {
            self.drag_selected(world, camera, scroll_delta);
        }
    }

    /// Move the selected object to the cursor: compute the candidate
    /// position on the pick ray, run penetration resolution, and commit the
    /// corrected position with a position-only push.
    fn drag_selected(&self, world: &mut PhysicsWorld, camera: &Camera, scroll_delta: f32) {
        let Some(entity) = self.selected else {
            return;
        };
        // A stale selection (entity cleared elsewhere) simply has no body
        let Some(current) = world.position_of(entity) else {
            return;
        };

        let distance = drag::scroll_distance((current - camera.position).magnitude(), scroll_delta);

        let (ndc_x, ndc_y) = self.mouse.screen_to_ndc();
        let ray = camera.screen_to_world_ray(ndc_x, ndc_y);
        let candidate = drag::drag_target(camera.position, ray.direction, distance);

        if let Some(resolved) = world.resolve_drag_position(entity, candidate) {
            world.place_object(entity, resolved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::physics::PlanetConfig;
    use approx::assert_relative_eq;

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;
    const CENTER_X: f64 = 400.0;
    const CENTER_Y: f64 = 300.0;

    fn setup() -> (PhysicsWorld, Camera, PickingSystem, Entity) {
        let mut world = PhysicsWorld::new(PlanetConfig {
            radius: 100.0,
            gravity: 9.8,
        });

        let ball = world.add_sphere(2.0);
        world.place_object(ball, Vec3::new(0.0, 50.0, 0.0));
        world.reset_object(ball);

        let mut camera = Camera::perspective(Vec3::new(0.0, 50.0, 20.0), 60.0, 1.0, 0.1, 1000.0);
        camera.set_target(Vec3::new(0.0, 50.0, 0.0));

        let picking = PickingSystem::new(WIDTH, HEIGHT);

        (world, camera, picking, ball)
    }

    #[test]
    fn test_press_on_body_selects_and_freezes() {
        let (mut world, camera, mut picking, ball) = setup();

        picking.on_mouse_press(CENTER_X, CENTER_Y, &mut world, &camera);

        assert_eq!(picking.selected(), Some(ball));
        // Frozen: no residual velocity while held
        assert_relative_eq!(
            world.linear_velocity_of(ball).unwrap(),
            Vec3::zeros(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_press_into_sky_clears_selection() {
        let (mut world, camera, mut picking, _ball) = setup();

        picking.on_mouse_press(CENTER_X, CENTER_Y, &mut world, &camera);
        assert!(picking.selected().is_some());

        // Top edge of the screen: the ray goes over the sphere into the sky
        picking.on_mouse_press(CENTER_X, 0.0, &mut world, &camera);
        assert_eq!(picking.selected(), None);
    }

    #[test]
    fn test_release_pushes_and_clears() {
        let (mut world, camera, mut picking, ball) = setup();

        picking.on_mouse_press(CENTER_X, CENTER_Y, &mut world, &camera);
        picking.on_mouse_release(&mut world);

        assert_eq!(picking.selected(), None);
        // A second release is a no-op
        picking.on_mouse_release(&mut world);
        assert_eq!(picking.selected(), None);
        assert!(world.position_of(ball).is_some());
    }

    #[test]
    fn test_drag_preserves_camera_distance() {
        let (mut world, camera, mut picking, ball) = setup();

        picking.on_mouse_press(CENTER_X, CENTER_Y, &mut world, &camera);
        let before = (world.position_of(ball).unwrap() - camera.position).magnitude();

        picking.on_mouse_move(CENTER_X + 40.0, CENTER_Y, &mut world, &camera);

        let after_position = world.position_of(ball).unwrap();
        let after = (after_position - camera.position).magnitude();
        assert_relative_eq!(after, before, epsilon = 1e-2);
        // And it actually moved sideways
        assert!(after_position.x > 0.1);
    }

    #[test]
    fn test_scroll_pushes_along_ray() {
        let (mut world, camera, mut picking, ball) = setup();

        picking.on_mouse_press(CENTER_X, CENTER_Y, &mut world, &camera);
        let before = (world.position_of(ball).unwrap() - camera.position).magnitude();

        picking.on_mouse_scroll(1.0, &mut world, &camera);

        let after = (world.position_of(ball).unwrap() - camera.position).magnitude();
        assert_relative_eq!(after, before * 1.1, epsilon = 1e-2);
    }

    #[test]
    fn test_move_without_selection_is_camera_business() {
        let (mut world, camera, mut picking, ball) = setup();
        let before = world.position_of(ball).unwrap();

        picking.on_mouse_move(100.0, 100.0, &mut world, &camera);

        assert_relative_eq!(world.position_of(ball).unwrap(), before, epsilon = 1e-6);
    }

    #[test]
    fn test_stale_selection_is_harmless() {
        let (mut world, camera, mut picking, _ball) = setup();

        picking.on_mouse_press(CENTER_X, CENTER_Y, &mut world, &camera);
        world.clear();
        picking.clear_selection();

        picking.on_mouse_move(CENTER_X + 10.0, CENTER_Y, &mut world, &camera);
        picking.on_mouse_release(&mut world);
        assert_eq!(picking.selected(), None);
    }
}
