//! Built-in component types

pub mod transform;
pub mod color;

pub use transform::TransformComponent;
pub use color::ColorComponent;
