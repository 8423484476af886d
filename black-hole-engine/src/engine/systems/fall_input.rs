use bevy::prelude::*;

use super::scene_controls::{CommandSource, SceneCommand, SceneCommandEvent, intensity_step};

/// Maximum gap between two clicks that still counts as a double-click.
const DOUBLE_CLICK_WINDOW_SECS: f64 = 0.3;

#[derive(Debug, Default, Clone, Copy)]
pub struct DoubleClickDetector {
    last_press: Option<f64>,
}

impl DoubleClickDetector {
    /// Register a press; true when it completes a double-click. The pair is
    /// consumed so a third quick press starts a new pair.
    pub fn press(&mut self, now: f64) -> bool {
        match self.last_press {
            Some(previous) if now - previous <= DOUBLE_CLICK_WINDOW_SECS => {
                self.last_press = None;
                true
            }
            _ => {
                self.last_press = Some(now);
                false
            }
        }
    }
}

const TIME_MODE_KEYS: [KeyCode; 4] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

/// Keyboard and pointer shortcuts translated into scene commands.
pub fn fall_input_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut double_click: Local<DoubleClickDetector>,
    mut commands: EventWriter<SceneCommandEvent>,
) {
    let mut send = |command: SceneCommand, source: CommandSource| {
        commands.write(SceneCommandEvent { command, source });
    };

    if mouse_button.just_pressed(MouseButton::Left) && double_click.press(time.elapsed_secs_f64())
    {
        send(SceneCommand::TriggerFall, CommandSource::Pointer);
    }

    if keyboard.just_pressed(KeyCode::KeyF) {
        send(SceneCommand::TriggerFall, CommandSource::Keyboard);
    }

    if keyboard.just_pressed(KeyCode::KeyW) {
        send(SceneCommand::TriggerWave, CommandSource::Keyboard);
    }

    for (index, key) in TIME_MODE_KEYS.iter().enumerate() {
        if keyboard.just_pressed(*key) {
            send(SceneCommand::SelectTimeMode(index), CommandSource::Keyboard);
        }
    }

    if keyboard.just_pressed(KeyCode::Equal) {
        send(
            SceneCommand::AdjustIntensity(intensity_step(true)),
            CommandSource::Keyboard,
        );
    }

    if keyboard.just_pressed(KeyCode::Minus) {
        send(
            SceneCommand::AdjustIntensity(intensity_step(false)),
            CommandSource::Keyboard,
        );
    }
}
