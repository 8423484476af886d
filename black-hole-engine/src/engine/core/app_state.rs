use bevy::prelude::*;

use crate::engine::loading::settings_loader::SettingsLoader;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct PhaseText;

// Leave Loading once the fall settings have been resolved
pub fn transition_to_running(
    settings_loader: Res<SettingsLoader>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if settings_loader.resolved {
        println!("→ Fall settings resolved, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
