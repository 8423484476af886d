use bevy::prelude::*;
use constants::render_settings::{
    BASE_ROTATION_SPEED, INTENSITY_STEP, MAX_INTENSITY, MIN_INTENSITY, TIME_MODES,
};
use constants::scene::{PRESET_CINEMATIC, PRESET_DEFAULT, PRESET_FRENZY};
use serde::{Deserialize, Serialize};

use crate::engine::camera::fall_controller::FallTrigger;

/// User-tunable scene parameters shared by the orbit camera, the disk and
/// the post-processing mapper.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SceneControls {
    pub time_scale: f32,
    pub intensity: f32,
    /// Set by pinch gestures, 1.0 otherwise.
    pub gesture_speed_multiplier: f32,
}

impl Default for SceneControls {
    fn default() -> Self {
        Self {
            time_scale: PRESET_DEFAULT.0,
            intensity: PRESET_DEFAULT.1,
            gesture_speed_multiplier: 1.0,
        }
    }
}

impl SceneControls {
    /// Orbit auto-rotation speed in orbit units (2π/60 rad/s each).
    pub fn rotation_speed(&self) -> f32 {
        BASE_ROTATION_SPEED * self.time_scale * self.gesture_speed_multiplier
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.intensity = intensity.clamp(MIN_INTENSITY, MAX_INTENSITY);
        }
    }

    pub fn apply_preset(&mut self, preset: ScenePreset) {
        let (time_scale, intensity) = preset.values();
        self.time_scale = time_scale;
        self.set_intensity(intensity);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenePreset {
    Cinematic,
    Default,
    Frenzy,
}

impl ScenePreset {
    pub fn values(&self) -> (f32, f32) {
        match self {
            Self::Cinematic => PRESET_CINEMATIC,
            Self::Default => PRESET_DEFAULT,
            Self::Frenzy => PRESET_FRENZY,
        }
    }
}

/// Where a scene command originated, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Keyboard,
    Pointer,
    Gesture,
    Rpc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    TriggerFall,
    TriggerWave,
    SetIntensity(f32),
    AdjustIntensity(f32),
    SetTimeScale(f32),
    /// Index into the fixed time modes.
    SelectTimeMode(usize),
    ApplyPreset(ScenePreset),
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SceneCommandEvent {
    pub command: SceneCommand,
    pub source: CommandSource,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityWaveEvent {
    pub source: CommandSource,
}

/// Applies queued scene commands from every input source.
pub fn handle_scene_commands(
    mut events: EventReader<SceneCommandEvent>,
    mut controls: ResMut<SceneControls>,
    mut trigger: ResMut<FallTrigger>,
    mut wave_events: EventWriter<GravityWaveEvent>,
    time: Res<Time>,
) {
    for event in events.read() {
        match event.command {
            SceneCommand::TriggerFall => {
                let now_ms = (time.elapsed_secs_f64() * 1000.0) as u64;
                let token = trigger.fire(now_ms);
                info!("Fall requested via {:?} (token {token})", event.source);
            }
            SceneCommand::TriggerWave => {
                wave_events.write(GravityWaveEvent {
                    source: event.source,
                });
            }
            SceneCommand::SetIntensity(value) => controls.set_intensity(value),
            SceneCommand::AdjustIntensity(delta) => {
                let next = controls.intensity + delta;
                controls.set_intensity(next);
            }
            SceneCommand::SetTimeScale(value) => {
                if value.is_finite() {
                    controls.time_scale = value;
                }
            }
            SceneCommand::SelectTimeMode(index) => {
                if let Some(&mode) = TIME_MODES.get(index) {
                    controls.time_scale = mode;
                }
            }
            SceneCommand::ApplyPreset(preset) => {
                controls.apply_preset(preset);
                info!("Scene preset applied: {preset:?}");
            }
        }
    }
}

/// One keyboard step of intensity, signed.
pub fn intensity_step(increase: bool) -> f32 {
    if increase {
        INTENSITY_STEP
    } else {
        -INTENSITY_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<SceneControls>()
            .init_resource::<FallTrigger>()
            .add_event::<SceneCommandEvent>()
            .add_event::<GravityWaveEvent>()
            .add_systems(Update, handle_scene_commands);
        app
    }

    fn send(app: &mut App, command: SceneCommand) {
        app.world_mut().send_event(SceneCommandEvent {
            command,
            source: CommandSource::Rpc,
        });
        app.update();
    }

    #[test]
    fn rotation_speed_combines_scale_and_gesture() {
        let controls = SceneControls {
            time_scale: 20.0,
            intensity: 1.0,
            gesture_speed_multiplier: -5.0,
        };
        assert!((controls.rotation_speed() - (0.8 * 20.0 * -5.0)).abs() < 1e-4);
    }

    #[test]
    fn intensity_is_clamped() {
        let mut app = test_app();
        send(&mut app, SceneCommand::SetIntensity(5.0));
        assert_eq!(app.world().resource::<SceneControls>().intensity, MAX_INTENSITY);
        send(&mut app, SceneCommand::AdjustIntensity(-10.0));
        assert_eq!(app.world().resource::<SceneControls>().intensity, MIN_INTENSITY);
    }

    #[test]
    fn presets_and_time_modes() {
        let mut app = test_app();
        send(&mut app, SceneCommand::ApplyPreset(ScenePreset::Frenzy));
        let controls = *app.world().resource::<SceneControls>();
        assert_eq!(controls.time_scale, 50.0);
        assert_eq!(controls.intensity, 1.8);

        send(&mut app, SceneCommand::SelectTimeMode(0));
        assert_eq!(app.world().resource::<SceneControls>().time_scale, 0.3);
        send(&mut app, SceneCommand::SelectTimeMode(9));
        assert_eq!(app.world().resource::<SceneControls>().time_scale, 0.3);
    }

    #[test]
    fn fall_requests_issue_fresh_tokens() {
        let mut app = test_app();
        send(&mut app, SceneCommand::TriggerFall);
        let first = app.world().resource::<FallTrigger>().token();
        send(&mut app, SceneCommand::TriggerFall);
        let second = app.world().resource::<FallTrigger>().token();
        assert!(first > 0);
        assert!(second > first);
    }

    #[test]
    fn wave_command_emits_event() {
        let mut app = test_app();
        send(&mut app, SceneCommand::TriggerWave);
        let events = app.world().resource::<Events<GravityWaveEvent>>();
        assert_eq!(events.len(), 1);
    }
}
