use bevy::asset::LoadState;
use bevy::prelude::*;

use super::fall_settings::{FallSettings, ResolvedSettings};
use crate::engine::camera::fall_controller::FallController;
use crate::engine::camera::orbit_camera::OrbitCamera;

pub const FALL_SETTINGS_PATH: &str = "fall_settings.json";

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<FallSettings>>,
    pub resolved: bool,
}

// Start the loading process
pub fn start_loading(mut settings_loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    settings_loader.handle = Some(asset_server.load(FALL_SETTINGS_PATH));
}

/// Validate loaded settings, falling back to defaults with a warning.
pub fn resolve_settings(settings: Option<&FallSettings>) -> ResolvedSettings {
    let Some(settings) = settings else {
        warn!("Fall settings unavailable, using built-in defaults");
        return ResolvedSettings::default();
    };

    match settings.validate() {
        Ok(resolved) => resolved,
        Err(error) => {
            warn!("Invalid fall settings ({error}), using built-in defaults");
            ResolvedSettings::default()
        }
    }
}

// Wait for the settings asset, then install the controller and orbit camera
pub fn load_settings_system(
    mut settings_loader: ResMut<SettingsLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<FallSettings>>,
) {
    if settings_loader.resolved {
        return;
    }

    let resolved = match settings_loader.handle {
        Some(ref handle) => match asset_server.load_state(handle.id()) {
            LoadState::Loaded => {
                println!("✓ Fall settings loaded successfully");
                resolve_settings(settings_assets.get(handle))
            }
            LoadState::Failed(error) => {
                warn!("Failed to load {FALL_SETTINGS_PATH}: {error}");
                resolve_settings(None)
            }
            _ => return,
        },
        None => resolve_settings(None),
    };

    commands.insert_resource(FallController::new(
        resolved.timeline,
        resolved.fov,
        resolved.target,
    ));
    commands.insert_resource(OrbitCamera::from_position(
        resolved.initial_camera_position,
        resolved.target,
    ));
    info!(
        "Fall timeline ready: {:.1}s total",
        resolved.timeline.total()
    );
    settings_loader.resolved = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_settings_fall_back_to_defaults() {
        let mut settings = FallSettings::default();
        settings.durations.crossing = -1.0;
        assert_eq!(resolve_settings(Some(&settings)), ResolvedSettings::default());
        assert_eq!(resolve_settings(None), ResolvedSettings::default());
    }

    #[test]
    fn valid_settings_pass_through() {
        let mut settings = FallSettings::default();
        settings.durations.emergence = 4.0;
        let resolved = resolve_settings(Some(&settings));
        assert!((resolved.timeline.total() - 12.0).abs() < 1e-6);
    }

    #[test]
    fn missing_handle_resolves_immediately() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<FallSettings>()
            .init_resource::<SettingsLoader>()
            .add_systems(Update, load_settings_system);

        app.update();

        assert!(app.world().resource::<SettingsLoader>().resolved);
        assert!(app.world().get_resource::<FallController>().is_some());
        assert!(app.world().get_resource::<OrbitCamera>().is_some());
    }
}
