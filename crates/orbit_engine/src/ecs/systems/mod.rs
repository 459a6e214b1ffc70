//! ECS systems

pub mod picking_system;

pub use picking_system::PickingSystem;
