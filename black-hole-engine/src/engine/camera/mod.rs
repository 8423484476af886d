//! Camera control for the black hole scene.
//!
//! The orbit rig owns the camera between falls; during a fall the
//! phase-driven controller takes over and hands it back on completion.

/// Named easing curves reused across the fall phases.
pub mod easing;

/// Fall state machine resource, trigger token, events and the per-frame driver.
pub mod fall_controller;

/// Per-phase motion models and camera shake.
pub mod fall_motion;

/// Phase enum and the contiguous phase timeline.
pub mod fall_phase;

/// Orbit controls with auto-rotation, disabled while a fall is active.
pub mod orbit_camera;

/// Camera pose value type and look/roll helpers.
pub mod pose;
