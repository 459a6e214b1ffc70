//! Planet-gravity sandbox demo
//!
//! Builds a physics world around a planet, scatters a few shapes on its
//! surface, and drives a scripted pick-drag-release session through the same
//! API a windowed front end would use. The windowing and rendering layers
//! are external collaborators; here their place is taken by scripted cursor
//! events and a renderer that logs instead of drawing.

mod config;

use config::SandboxConfig;
use orbit_engine::foundation::logging;
use orbit_engine::prelude::*;

/// Frame delta used by the scripted session; a window loop would pass the
/// measured delta instead
const FRAME_DELTA: f32 = 1.0 / 60.0;

/// Renderer stand-in that reports what would be drawn
struct LogRenderer;

impl SceneRenderer for LogRenderer {
    fn draw_scene(&mut self, world: &World, _delta: f32) {
        log::trace!("rendering {} entities", world.entity_count());
    }
}

/// Spawn helper: place an entity and synchronize its body
fn spawn_at(world: &mut PhysicsWorld, entity: Entity, position: Vec3) {
    if let Some(transform) = world.world_mut().get_component_mut::<TransformComponent>(entity) {
        transform.position = position;
    }
    world.reset_object(entity);
}

fn run_frames(world: &mut PhysicsWorld, renderer: &mut LogRenderer, timer: &mut Timer, frames: u32) {
    for _ in 0..frames {
        world.draw_scene(FRAME_DELTA, renderer);
        timer.update();
    }
}

fn main() {
    logging::init();

    let config = SandboxConfig::load_from_file("sandbox.toml").unwrap_or_else(|err| {
        log::warn!("using default configuration: {err}");
        SandboxConfig::default()
    });

    let mut world = PhysicsWorld::new(PlanetConfig {
        radius: config.planet.radius,
        gravity: config.planet.gravity,
    });

    let aspect = config.window.width as f32 / config.window.height as f32;
    let mut camera = Camera::perspective(
        Vec3::new(0.0, 6.0, 24.0),
        config.camera.fov_degrees,
        aspect,
        config.camera.near,
        config.camera.far,
    );
    camera.set_target(Vec3::new(0.0, 3.0, 0.0));

    let mut picking = PickingSystem::new(config.window.width, config.window.height);
    let mut renderer = LogRenderer;
    let mut timer = Timer::new();

    // A small scene on the planet surface: a crate stack and some spheres
    let crate_a = world.add_cube(1.5);
    spawn_at(&mut world, crate_a, Vec3::new(-6.0, 1.5, 0.0));
    let crate_b = world.add_cube(1.5);
    spawn_at(&mut world, crate_b, Vec3::new(-6.0, 4.6, 0.0));

    let ball = world.add_sphere(2.0);
    spawn_at(&mut world, ball, Vec3::new(0.0, 4.0, 0.0));

    let pebble = world.add_sphere(0.8);
    spawn_at(&mut world, pebble, Vec3::new(5.0, 0.8, 2.0));

    log::info!(
        "scene ready: {} entities on a planet of radius {}",
        world.entity_count(),
        config.planet.radius
    );

    // Let everything settle onto the surface
    run_frames(&mut world, &mut renderer, &mut timer, 90);

    // Scripted session: grab whatever sits at the screen center
    let center_x = f64::from(config.window.width) * 0.5;
    let center_y = f64::from(config.window.height) * 0.5;
    picking.on_mouse_press(center_x, center_y, &mut world, &camera);

    match picking.selected() {
        Some(entity) => log::info!("picked entity {} at screen center", entity.id()),
        None => log::info!("nothing under the cursor at screen center"),
    }

    // Drag it across the screen, pull it closer, then let it go
    for i in 1..=30 {
        picking.on_mouse_move(center_x + f64::from(i) * 6.0, center_y, &mut world, &camera);
        world.draw_scene(FRAME_DELTA, &mut renderer);
        timer.update();
    }
    picking.on_mouse_scroll(-2.0, &mut world, &camera);
    picking.on_mouse_release(&mut world);

    // Watch it fall back to the planet
    run_frames(&mut world, &mut renderer, &mut timer, 180);

    for (name, entity) in [
        ("crate_a", crate_a),
        ("crate_b", crate_b),
        ("ball", ball),
        ("pebble", pebble),
    ] {
        if let Some(position) = world.position_of(entity) {
            log::info!(
                "{name}: position ({:.2}, {:.2}, {:.2})",
                position.x,
                position.y,
                position.z
            );
        }
    }

    log::info!(
        "{} frames simulated, {:.1} fps average",
        timer.frame_count(),
        timer.average_fps()
    );
}
