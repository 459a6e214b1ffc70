//! Input state consumed by the picking system

pub mod picking;

pub use picking::MouseState;
