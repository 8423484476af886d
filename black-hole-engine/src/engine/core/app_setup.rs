use bevy::asset::AssetMetaCheck;
use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::post_process::ChromaticAberration;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::coordinate_system::{FALL_TARGET, INITIAL_CAMERA_POSITION, WORLD_UP};
use constants::fall_timeline::DEFAULT_FOV;

// Crate engine modules
use crate::engine::camera::fall_controller::{
    FallCamera, FallCompletedEvent, FallProgressEvent, FallTrigger, drive_fall_camera,
    fall_inactive,
};
use crate::engine::camera::orbit_camera::camera_controller;
use crate::engine::core::app_state::{AppState, FpsText, PhaseText, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::fall_settings::FallSettings;
use crate::engine::loading::settings_loader::{
    SettingsLoader, load_settings_system, start_loading,
};
use crate::engine::render::post_processing::{PostProcessState, apply_post_processing};
use crate::engine::render::vignette_post_processing::{
    VignettePostProcessPlugin, VignetteSettings,
};
use crate::engine::scene::black_hole::{animate_accretion_disk, spawn_black_hole};
use crate::engine::scene::gravity_wave::{WavePool, spawn_wave_rings, update_gravity_waves};
use crate::engine::systems::fall_input::fall_input_system;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::scene_controls::{
    GravityWaveEvent, SceneCommandEvent, SceneControls, handle_scene_commands,
};
// Gesture and Web RPC modules
use crate::gesture::GesturePlugin;
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, phase_text_update_system};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers FallSettings as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<FallSettings>::new(&["json"]))
        .add_plugins(VignettePostProcessPlugin)
        .add_plugins(WebRpcPlugin)
        .add_plugins(GesturePlugin)
        .insert_resource(ClearColor(Color::BLACK));

    // Initialise resources early
    app.init_resource::<SettingsLoader>()
        .init_resource::<FallTrigger>()
        .init_resource::<SceneControls>()
        .init_resource::<PostProcessState>()
        .init_resource::<WavePool>()
        .add_event::<SceneCommandEvent>()
        .add_event::<GravityWaveEvent>()
        .add_event::<FallProgressEvent>()
        .add_event::<FallCompletedEvent>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (load_settings_system, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    // Input resolves into commands, commands into the trigger, the trigger
    // into this frame's camera pose and post-processing.
    let runtime_systems = (
        fall_input_system,
        handle_scene_commands,
        camera_controller.run_if(fall_inactive),
        drive_fall_camera,
        apply_post_processing,
        animate_accretion_disk,
        update_gravity_waves,
        fps_notification_system,
    )
        .chain();

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    // Overlay text only for native builds; the web page draws its own UI.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            (fps_text_update_system, phase_text_update_system)
                .run_if(in_state(AppState::Running)),
        );
    }

    app
}

fn create_fall_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Tonemapping::AcesFitted,
        Projection::Perspective(PerspectiveProjection {
            fov: DEFAULT_FOV.to_radians(),
            ..default()
        }),
        Transform::from_translation(INITIAL_CAMERA_POSITION).looking_at(FALL_TARGET, WORLD_UP),
        Bloom::NATURAL,
        ChromaticAberration::default(),
        VignetteSettings::default(),
        FallCamera,
    ));
}

// Startup system that only handles basic initialisation
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    create_fall_camera(&mut commands);
    spawn_black_hole(&mut commands, &mut meshes, &mut materials);
    spawn_wave_rings(&mut commands, &mut meshes, &mut materials);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.7, 0.4)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                PhaseText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
