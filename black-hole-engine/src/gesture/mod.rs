//! Hand-gesture input.
//!
//! Landmark frames arrive from the hosting page at the tracker's own rate.
//! Each frame is classified, debounced and dispatched into scene commands;
//! camera acquisition is negotiated with the page over RPC.

/// Camera constraint negotiation and classified capture errors.
pub mod capture;

/// One-bit fist memory turning raw readings into gesture samples.
pub mod debouncer;

/// Wave, fall and orbit-speed triggers derived from gesture samples.
pub mod dispatch;

/// Fist, pinch and hand-centre classification of 21-point hands.
pub mod landmarks;

use bevy::prelude::*;
use serde_json::json;

use crate::engine::camera::fall_controller::FallController;
use crate::engine::systems::scene_controls::{
    CommandSource, SceneCommand, SceneCommandEvent, SceneControls,
};
use crate::rpc::web_rpc::WebRpcInterface;
use capture::{CaptureConstraints, CaptureError, CaptureNegotiator, NegotiationStep};
use debouncer::{GestureDebouncer, GestureSample};
use dispatch::GestureDispatcher;
use landmarks::{Landmark, classify_hand};

/// One classifier result from the external hand tracker.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LandmarkFrameEvent {
    /// `None` when the tracker found no hand.
    pub landmarks: Option<Vec<Landmark>>,
    /// Tracker timestamp. A session whose first frame lacks one runs on the
    /// render clock throughout.
    pub timestamp_ms: Option<u64>,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum GestureCommandEvent {
    SetEnabled(bool),
    ToggleCamera,
    CaptureStarted,
    CaptureFailed { name: String, message: String },
}

/// Time base for the dispatcher's hold timers, fixed by a session's first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleClock {
    Tracker,
    Render,
}

#[derive(Resource, Default)]
pub struct GestureTracking {
    pub enabled: bool,
    pub sample: GestureSample,
    pub error: Option<CaptureError>,
    pub negotiator: CaptureNegotiator,
    debouncer: GestureDebouncer,
    dispatcher: GestureDispatcher,
    clock: Option<SampleClock>,
    last_tracker_ms: u64,
}

impl GestureTracking {
    pub fn enable(&mut self) -> CaptureConstraints {
        self.enabled = true;
        self.error = None;
        self.clock = None;
        self.negotiator.start()
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.sample = GestureSample::default();
        self.clock = None;
        self.negotiator.stop();
        self.debouncer.reset();
        self.dispatcher.reset();
    }

    /// Sample time in the session's clock. Untimestamped frames in a tracker
    /// session reuse the last tracker time; render sessions ignore timestamps.
    fn sample_time(&mut self, timestamp_ms: Option<u64>, render_ms: u64) -> u64 {
        let clock = *self.clock.get_or_insert(match timestamp_ms {
            Some(_) => SampleClock::Tracker,
            None => SampleClock::Render,
        });
        match clock {
            SampleClock::Tracker => {
                if let Some(timestamp) = timestamp_ms {
                    self.last_tracker_ms = timestamp;
                }
                self.last_tracker_ms
            }
            SampleClock::Render => render_ms,
        }
    }

    fn state_json(&self) -> serde_json::Value {
        json!({
            "enabled": self.enabled,
            "gesture": self.sample.kind,
            "pinch_amount": self.sample.pinch_amount,
            "hand_position": self.sample.hand_center.map(|c| json!({ "x": c.x, "y": c.y })),
            "tracking": self.sample.tracking,
            "facing_mode": self.negotiator.facing_mode,
            "error": self.error.as_ref().map(|error| json!({
                "kind": error.kind(),
                "message": error.to_string(),
            })),
        })
    }
}

pub struct GesturePlugin;

impl Plugin for GesturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GestureTracking>()
            .add_event::<LandmarkFrameEvent>()
            .add_event::<GestureCommandEvent>()
            .add_event::<SceneCommandEvent>()
            .add_systems(
                Update,
                (handle_gesture_commands, process_landmark_frames).chain(),
            );
    }
}

fn request_capture(rpc: &mut WebRpcInterface, constraints: CaptureConstraints) {
    rpc.send_notification(
        "request_capture",
        json!({ "constraints": constraints.to_json() }),
    );
}

pub fn handle_gesture_commands(
    mut events: EventReader<GestureCommandEvent>,
    mut tracking: ResMut<GestureTracking>,
    mut rpc: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match event {
            GestureCommandEvent::SetEnabled(true) => {
                let constraints = tracking.enable();
                info!("Gesture tracking enabled");
                request_capture(&mut rpc, constraints);
            }
            GestureCommandEvent::SetEnabled(false) => {
                tracking.disable();
                info!("Gesture tracking disabled");
            }
            GestureCommandEvent::ToggleCamera => {
                if let Some(constraints) = tracking.negotiator.toggle_facing() {
                    request_capture(&mut rpc, constraints);
                }
            }
            GestureCommandEvent::CaptureStarted => {
                tracking.negotiator.on_success();
                debug!("Camera capture started");
            }
            GestureCommandEvent::CaptureFailed { name, message } => {
                match tracking.negotiator.on_failure(name, message) {
                    NegotiationStep::Retry(constraints) => {
                        warn!("Preferred camera unavailable ({name}), retrying with any camera");
                        request_capture(&mut rpc, constraints);
                    }
                    NegotiationStep::GiveUp(error) => {
                        warn!("Gesture tracking disabled: {error}");
                        tracking.disable();
                        rpc.send_notification(
                            "gesture_error",
                            json!({ "kind": error.kind(), "message": error.to_string() }),
                        );
                        tracking.error = Some(error);
                    }
                }
            }
        }
        rpc.send_notification("gesture_state", tracking.state_json());
    }
}

/// Classify incoming landmark frames and dispatch their triggers. Dispatch
/// is suspended while a fall owns the camera.
pub fn process_landmark_frames(
    mut frames: EventReader<LandmarkFrameEvent>,
    mut tracking: ResMut<GestureTracking>,
    mut controls: ResMut<SceneControls>,
    mut scene_commands: EventWriter<SceneCommandEvent>,
    mut rpc: ResMut<WebRpcInterface>,
    controller: Option<Res<FallController>>,
    time: Res<Time>,
) {
    if !tracking.enabled {
        frames.clear();
        return;
    }

    let falling = controller.is_some_and(|controller| controller.is_active());
    let render_ms = (time.elapsed_secs_f64() * 1000.0) as u64;

    for frame in frames.read() {
        let reading = classify_hand(frame.landmarks.as_deref());
        let sample = tracking.debouncer.update(reading);
        let previous = tracking.sample;
        tracking.sample = sample;

        if previous.kind != sample.kind || previous.tracking != sample.tracking {
            rpc.send_notification("gesture_state", tracking.state_json());
        }

        if falling {
            continue;
        }

        let now_ms = tracking.sample_time(frame.timestamp_ms, render_ms);
        let outcome = tracking.dispatcher.update(&sample, now_ms);

        if outcome.wave {
            scene_commands.write(SceneCommandEvent {
                command: SceneCommand::TriggerWave,
                source: CommandSource::Gesture,
            });
        }
        if outcome.fall {
            scene_commands.write(SceneCommandEvent {
                command: SceneCommand::TriggerFall,
                source: CommandSource::Gesture,
            });
        }
        if controls.gesture_speed_multiplier != outcome.speed_multiplier {
            controls.gesture_speed_multiplier = outcome.speed_multiplier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::tests::{fist_hand, open_hand};

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, GesturePlugin))
            .init_resource::<SceneControls>()
            .init_resource::<WebRpcInterface>();
        app
    }

    fn frame(app: &mut App, landmarks: Option<Vec<Landmark>>, timestamp_ms: u64) {
        frame_at(app, landmarks, Some(timestamp_ms));
    }

    fn frame_at(app: &mut App, landmarks: Option<Vec<Landmark>>, timestamp_ms: Option<u64>) {
        app.world_mut().send_event(LandmarkFrameEvent {
            landmarks,
            timestamp_ms,
        });
        app.update();
    }

    fn enabled_app() -> App {
        let mut app = test_app();
        app.world_mut().send_event(GestureCommandEvent::SetEnabled(true));
        app.update();
        app
    }

    fn scene_commands(app: &App) -> Vec<SceneCommand> {
        app.world()
            .resource::<Events<SceneCommandEvent>>()
            .iter_current_update_events()
            .map(|event| event.command)
            .collect()
    }

    #[test]
    fn frames_ignored_while_disabled() {
        let mut app = test_app();
        frame(&mut app, Some(fist_hand()), 0);
        assert!(scene_commands(&app).is_empty());
        assert!(!app.world().resource::<GestureTracking>().sample.tracking);
    }

    #[test]
    fn fist_and_held_palm_dispatch_commands() {
        let mut app = test_app();
        app.world_mut().send_event(GestureCommandEvent::SetEnabled(true));
        app.update();

        frame(&mut app, Some(fist_hand()), 0);
        assert_eq!(scene_commands(&app), vec![SceneCommand::TriggerWave]);

        frame(&mut app, Some(open_hand()), 100);
        frame(&mut app, Some(open_hand()), 1_099);
        assert!(scene_commands(&app).is_empty());
        frame(&mut app, Some(open_hand()), 1_100);
        assert_eq!(scene_commands(&app), vec![SceneCommand::TriggerFall]);
    }

    #[test]
    fn second_capture_failure_disables_tracking() {
        let mut app = test_app();
        app.world_mut().send_event(GestureCommandEvent::SetEnabled(true));
        app.update();

        for _ in 0..2 {
            app.world_mut().send_event(GestureCommandEvent::CaptureFailed {
                name: "NotFoundError".into(),
                message: "Requested device not found".into(),
            });
            app.update();
        }

        let tracking = app.world().resource::<GestureTracking>();
        assert!(!tracking.enabled);
        assert_eq!(tracking.error, Some(CaptureError::NoDevice));
        assert_eq!(tracking.sample, GestureSample::default());
        let state = tracking.state_json();
        assert_eq!(state["error"]["kind"], json!("no_device"));
        assert_eq!(state["enabled"], json!(false));
    }

    #[test]
    fn reenabling_clears_reported_error() {
        let mut tracking = GestureTracking::default();
        tracking.error = Some(CaptureError::DeviceBusy);
        tracking.enable();
        assert!(tracking.state_json()["error"].is_null());
    }

    #[test]
    fn tracker_session_holds_time_across_untimestamped_frames() {
        let mut app = enabled_app();
        frame_at(&mut app, Some(open_hand()), Some(50_000));
        for _ in 0..3 {
            frame_at(&mut app, Some(open_hand()), None);
            assert!(scene_commands(&app).is_empty());
        }
        frame_at(&mut app, Some(open_hand()), Some(50_999));
        assert!(scene_commands(&app).is_empty());
        frame_at(&mut app, Some(open_hand()), Some(51_000));
        assert_eq!(scene_commands(&app), vec![SceneCommand::TriggerFall]);
    }

    #[test]
    fn render_session_ignores_late_tracker_timestamps() {
        use bevy::time::TimeUpdateStrategy;
        use std::time::Duration;

        let mut app = test_app();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.world_mut().send_event(GestureCommandEvent::SetEnabled(true));
        app.update();

        frame_at(&mut app, Some(open_hand()), None);
        frame_at(&mut app, Some(open_hand()), Some(90_000));
        assert!(scene_commands(&app).is_empty());

        // Render clock advances 100ms per update; 1000ms after the first open frame.
        for _ in 0..8 {
            frame_at(&mut app, Some(open_hand()), Some(90_000));
            assert!(scene_commands(&app).is_empty());
        }
        frame_at(&mut app, Some(open_hand()), None);
        assert_eq!(scene_commands(&app), vec![SceneCommand::TriggerFall]);
    }

    #[test]
    fn clock_is_chosen_again_after_reenabling() {
        let mut tracking = GestureTracking::default();
        tracking.enable();
        assert_eq!(tracking.sample_time(None, 40), 40);
        assert_eq!(tracking.sample_time(Some(9_000), 50), 50);
        tracking.disable();
        tracking.enable();
        assert_eq!(tracking.sample_time(Some(9_000), 60), 9_000);
        assert_eq!(tracking.sample_time(None, 70), 9_000);
    }
}
