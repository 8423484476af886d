//! Fall settings loading.
//!
//! Reads the JSON tuning file through the asset server, validates it, and
//! installs the fall controller before the app starts running.

/// `FallSettings` asset, its validation and `SettingsError`.
pub mod fall_settings;

/// Startup loading and fallback-to-defaults resolution of the settings asset.
pub mod settings_loader;
