//! Component trait and implementations

/// Marker trait for components
pub trait Component: 'static + Send + Sync {}

// Implement Component for foundation types usable directly as components
impl Component for crate::foundation::math::Transform {}
