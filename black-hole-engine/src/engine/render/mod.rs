//! Post-processing driven by the fall.
//!
//! Maps the fall controller's phase and progress onto bloom, chromatic
//! aberration and vignette intensities and renders the vignette pass.

/// Parameter mapper and the system applying it to the camera each frame.
pub mod post_processing;

/// Fullscreen vignette render node with per-camera uniform settings.
pub mod vignette_post_processing;
