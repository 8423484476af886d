use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::camera::fall_controller::FallController;
use crate::engine::core::app_state::{FpsText, PhaseText};
use crate::rpc::web_rpc::WebRpcInterface;

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    // Send FPS every 0.5 seconds
    if current_time - *last_send_time >= 0.5 {
        if let Some(value) = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|fps| fps.smoothed())
        {
            rpc_interface.send_notification("fps_update", serde_json::json!({ "fps": value as f32 }));
            *last_send_time = current_time;
        }
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    let Some(value) = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
    else {
        return;
    };

    for mut text in &mut query {
        text.0 = format!("FPS: {value:.1}");
    }
}

/// Native overlay line showing the current fall phase and overall progress.
pub fn phase_text_update_system(
    controller: Res<FallController>,
    mut query: Query<&mut Text, With<PhaseText>>,
) {
    let status = controller.status();
    let label = if status.active {
        format!("{} {:>3.0}%", status.phase.as_str(), status.progress * 100.0)
    } else {
        "F / double-click to fall".to_string()
    };

    for mut text in &mut query {
        if text.0 != label {
            text.0.clone_from(&label);
        }
    }
}
