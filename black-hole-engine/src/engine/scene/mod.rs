//! Placeholder scene around the fall target.
//!
//! Primitive meshes only: the event horizon, a spinning accretion disk, and
//! the expanding gravity-wave rings.

/// Event horizon sphere and accretion disk animated by the scene controls.
pub mod black_hole;

/// Pooled concentric rings emitted on gravity-wave events.
pub mod gravity_wave;
