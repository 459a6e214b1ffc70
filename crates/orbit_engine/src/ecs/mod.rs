//! Entity-Component-System implementation
//!
//! A deliberately small ECS: opaque entity identities, typed component
//! storages, and the systems that bridge the scene to physics and picking.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;
pub mod systems;

pub use world::World;
pub use entity::Entity;
pub use component::Component;
