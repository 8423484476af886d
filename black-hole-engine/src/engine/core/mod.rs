//! Core application setup and state management.
//!
//! Builds the app, owns the Loading → Running state machine and configures
//! the window for native and WASM targets.

/// App construction: plugins, resources, events and the runtime schedule.
pub mod app_setup;

/// Application states and the transition out of loading.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
