//! Runtime input, scene control and diagnostics systems.
//!
//! Translates keyboard and pointer input into scene commands, applies them
//! to the shared scene controls, and reports frame rate and fall phase.

/// Keyboard shortcuts and double-click detection for direct fall requests.
pub mod fall_input;

/// FPS and phase overlays plus the periodic `fps_update` notification.
pub mod fps_tracking;

/// Scene controls resource, presets and the command events every input source writes.
pub mod scene_controls;
