//! Time-driven fall state machine.
//!
//! A run is started by a new trigger token, captures the live camera pose as
//! its reference frame, walks through the four timed phases, and restores the
//! captured pose exactly when the timeline is exhausted. Only one run exists
//! at a time; tokens seen while a run is active are dropped.

use bevy::prelude::*;
use constants::coordinate_system::FALL_TARGET;

use super::fall_motion::{
    FallAnchors, FovProfile, PhaseMotion, acceleration, attraction, crossing, emergence,
    shake_offset,
};
use super::fall_phase::{FallPhase, FallTimeline};
use super::pose::CameraPose;

/// Latest fall request token. Zero means no request has ever been made.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FallTrigger {
    token: u64,
}

impl FallTrigger {
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Issue a new token derived from the clock, strictly greater than the last.
    pub fn fire(&mut self, now_ms: u64) -> u64 {
        self.token = now_ms.max(self.token + 1);
        self.token
    }
}

/// Result of presenting a trigger token to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Zero or already-seen token.
    Unchanged,
    Started,
    /// New token arrived mid-run and was discarded.
    IgnoredWhileActive,
}

/// Everything the controller computed for one active frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallFrame {
    pub phase: FallPhase,
    pub phase_progress: f32,
    pub overall_progress: f32,
    /// Pose to hand to the renderer, shake included.
    pub pose: CameraPose,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FallUpdate {
    Idle,
    Active(FallFrame),
    /// The run just ended; carries the restored start pose.
    Completed(CameraPose),
}

/// Polled view of the controller for listeners that do not consume events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallStatus {
    pub active: bool,
    pub phase: FallPhase,
    pub progress: f32,
}

#[derive(Debug, Clone, Copy)]
struct FallRun {
    /// Clock value of the first frame processed after acceptance.
    start_time: Option<f64>,
    start_pose: CameraPose,
    phase: FallPhase,
    elapsed: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct FallController {
    timeline: FallTimeline,
    fov: FovProfile,
    target: Vec3,
    last_token: u64,
    run: Option<FallRun>,
}

impl Default for FallController {
    fn default() -> Self {
        Self::new(FallTimeline::default(), FovProfile::default(), FALL_TARGET)
    }
}

impl FallController {
    pub fn new(timeline: FallTimeline, fov: FovProfile, target: Vec3) -> Self {
        Self {
            timeline,
            fov,
            target,
            last_token: 0,
            run: None,
        }
    }

    pub fn timeline(&self) -> &FallTimeline {
        &self.timeline
    }

    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// Start pose of the active run, if any.
    pub fn start_pose(&self) -> Option<CameraPose> {
        self.run.map(|run| run.start_pose)
    }

    /// Run-elapsed seconds; zero while idle or before the first frame.
    pub fn elapsed(&self) -> f32 {
        self.run.map_or(0.0, |run| run.elapsed)
    }

    pub fn status(&self) -> FallStatus {
        match self.run {
            Some(run) => FallStatus {
                active: true,
                phase: run.phase,
                progress: self.timeline.overall_progress(run.elapsed),
            },
            None => FallStatus {
                active: false,
                phase: FallPhase::Idle,
                progress: 0.0,
            },
        }
    }

    /// Compare `token` against the last one seen. A new non-zero token starts
    /// a run from `current_pose` unless one is already active.
    pub fn observe_trigger(&mut self, token: u64, current_pose: CameraPose) -> TriggerOutcome {
        if token == 0 || token == self.last_token {
            return TriggerOutcome::Unchanged;
        }
        self.last_token = token;

        if self.run.is_some() {
            debug!("Fall trigger {} ignored, run already active", token);
            return TriggerOutcome::IgnoredWhileActive;
        }

        self.run = Some(FallRun {
            start_time: None,
            start_pose: current_pose,
            phase: FallPhase::Attraction,
            elapsed: 0.0,
        });
        info!("Fall started (token {})", token);
        TriggerOutcome::Started
    }

    /// Advance to clock value `now` (seconds). The first call after a run is
    /// accepted pins the run start, so it always reports elapsed 0.
    pub fn advance(&mut self, now: f64) -> FallUpdate {
        let Some(run) = self.run.as_mut() else {
            return FallUpdate::Idle;
        };

        let start_time = *run.start_time.get_or_insert(now);
        run.elapsed = (now - start_time).max(0.0) as f32;

        if run.elapsed >= self.timeline.total() {
            let mut restored = run.start_pose;
            restored.roll = 0.0;
            restored.fov_degrees = self.fov.default;
            self.run = None;
            info!("Fall complete");
            return FallUpdate::Completed(restored);
        }

        let elapsed = run.elapsed;
        let sample = self.timeline.sample(elapsed);
        if sample.phase != run.phase {
            debug!("Fall phase {} -> {}", run.phase.as_str(), sample.phase.as_str());
            run.phase = sample.phase;
        }

        let anchors = FallAnchors {
            start: run.start_pose,
            target: self.target,
            fov: self.fov,
        };
        let motion = phase_motion(&anchors, sample.phase, sample.progress, sample.phase_elapsed, elapsed);
        let shake = shake_offset(elapsed, motion.shake_amplitude);

        FallUpdate::Active(FallFrame {
            phase: sample.phase,
            phase_progress: sample.progress,
            overall_progress: self.timeline.overall_progress(elapsed),
            pose: CameraPose {
                translation: motion.translation + shake,
                rotation: motion.rotation,
                roll: motion.roll,
                fov_degrees: motion.fov_degrees,
            },
        })
    }
}

fn phase_motion(
    anchors: &FallAnchors,
    phase: FallPhase,
    progress: f32,
    phase_elapsed: f32,
    run_elapsed: f32,
) -> PhaseMotion {
    match phase {
        FallPhase::Attraction => attraction(anchors, progress),
        FallPhase::Acceleration => acceleration(anchors, progress, phase_elapsed),
        FallPhase::Crossing => crossing(anchors, progress, run_elapsed),
        FallPhase::Emergence | FallPhase::Idle => emergence(anchors, progress, phase_elapsed),
    }
}

/// Fired once per active frame with the whole-run progress and current phase.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FallProgressEvent {
    pub progress: f32,
    pub phase: FallPhase,
}

/// Fired exactly once when a run finishes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallCompletedEvent;

/// Marker for the camera the fall drives.
#[derive(Component, Default)]
pub struct FallCamera;

/// Per-frame driver: accept new tokens, advance the run, write the pose to
/// the camera and notify listeners.
pub fn drive_fall_camera(
    mut camera_query: Query<(&mut Transform, &mut Projection), With<FallCamera>>,
    mut controller: ResMut<FallController>,
    trigger: Res<FallTrigger>,
    time: Res<Time>,
    mut progress_events: EventWriter<FallProgressEvent>,
    mut completed_events: EventWriter<FallCompletedEvent>,
) {
    let Ok((mut transform, mut projection)) = camera_query.single_mut() else {
        return;
    };

    let current = CameraPose::from_camera(&transform, &projection);
    controller.observe_trigger(trigger.token(), current);

    match controller.advance(time.elapsed_secs_f64()) {
        FallUpdate::Idle => {}
        FallUpdate::Active(frame) => {
            frame.pose.apply_to(&mut transform, &mut projection);
            progress_events.write(FallProgressEvent {
                progress: frame.overall_progress,
                phase: frame.phase,
            });
        }
        FallUpdate::Completed(restored) => {
            restored.apply_to(&mut transform, &mut projection);
            progress_events.write(FallProgressEvent {
                progress: 1.0,
                phase: FallPhase::Idle,
            });
            completed_events.write(FallCompletedEvent);
        }
    }
}

/// Run condition: true while no fall owns the camera.
pub fn fall_inactive(controller: Res<FallController>) -> bool {
    !controller.is_active()
}
