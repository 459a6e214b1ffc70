//! Planet-gravity physics core
//!
//! Bridges the ECS scene to a rigid-body dynamics engine: shape descriptors
//! become native bodies, gravity is recomputed toward the planet center every
//! frame, and ray/contact queries drive selection and drag resolution.
//!
//! # Module Organization
//!
//! - [`shape`] - Geometric shape descriptors submitted by the application
//! - [`query`] - Ray and contact query value types
//! - [`dynamics`] - The adapter owning the rigid-body engine
//! - [`gravity`] - Per-body spherical gravity field
//! - [`bridge`] - Entity ↔ body transform synchronization
//! - [`drag`] - Iterative penetration resolution for dragged objects
//! - [`world`] - The facade composing all of the above

pub mod shape;
pub mod query;
pub mod dynamics;
pub mod gravity;
pub mod bridge;
pub mod drag;
pub mod world;

pub use shape::ShapeDescriptor;
pub use query::{Ray, RayHit, ContactPoint};
pub use dynamics::{DynamicsWorld, BodyHandle};
pub use gravity::GravityField;
pub use bridge::BodyBridge;
pub use drag::resolve_position;
pub use world::{PhysicsWorld, PlanetConfig};
