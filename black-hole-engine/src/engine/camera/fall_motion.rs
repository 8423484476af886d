//! Per-phase camera motion models.
//!
//! Each model is a pure function of the run anchors and the phase-local
//! progress (plus elapsed time where the motion oscillates). Attraction,
//! acceleration and emergence interpolate between the captured start and the
//! target; crossing ignores the start pose and is a bounded noise process
//! around the target.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;
use constants::coordinate_system::WORLD_UP;
use constants::fall_timeline::{
    ACCELERATION_COVERAGE, ACCELERATION_PEAK_FOV, ACCELERATION_ROLL, ACCELERATION_SPIRAL_RADIUS,
    ATTRACTION_APPROACH_FRACTION, ATTRACTION_DROP, ATTRACTION_END_FOV, CROSSING_AMPLITUDE,
    CROSSING_LOOK_FREQUENCIES, CROSSING_LOOK_RADIUS, CROSSING_PEAK_FOV,
    CROSSING_POSITION_FREQUENCIES, CROSSING_SPIN_SPEED, DEFAULT_FOV, EMERGENCE_FOV_FLOOR,
    EMERGENCE_ROLL, EMERGENCE_ROLL_FREQUENCY, EMERGENCE_SPIRAL_RADIUS, SHAKE_FREQUENCY,
};

use super::easing::{ease_in_expo, ease_in_out_quart, ease_out_elastic, ease_out_quart};
use super::pose::{CameraPose, look_rotation, with_roll};

/// Field-of-view anchors (degrees) the phases move between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FovProfile {
    pub default: f32,
    pub attraction_end: f32,
    pub acceleration_peak: f32,
    pub crossing_peak: f32,
    pub emergence_floor: f32,
}

impl Default for FovProfile {
    fn default() -> Self {
        Self {
            default: DEFAULT_FOV,
            attraction_end: ATTRACTION_END_FOV,
            acceleration_peak: ACCELERATION_PEAK_FOV,
            crossing_peak: CROSSING_PEAK_FOV,
            emergence_floor: EMERGENCE_FOV_FLOOR,
        }
    }
}

/// Fixed reference frame of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallAnchors {
    pub start: CameraPose,
    pub target: Vec3,
    pub fov: FovProfile,
}

/// Camera placement produced by a phase model, before shake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseMotion {
    pub translation: Vec3,
    pub rotation: Quat,
    pub roll: f32,
    pub fov_degrees: f32,
    pub shake_amplitude: f32,
}

/// Where attraction leaves the camera and acceleration picks it up.
pub fn attraction_end_point(anchors: &FallAnchors) -> Vec3 {
    anchors
        .start
        .translation
        .lerp(anchors.target, ATTRACTION_APPROACH_FRACTION)
        - WORLD_UP * ATTRACTION_DROP
}

/// Slow drift 15% of the way in while sinking and narrowing the view.
pub fn attraction(anchors: &FallAnchors, progress: f32) -> PhaseMotion {
    let eased = ease_in_out_quart(progress);
    let translation = anchors
        .start
        .translation
        .lerp(anchors.target, eased * ATTRACTION_APPROACH_FRACTION)
        - WORLD_UP * (eased * ATTRACTION_DROP);

    PhaseMotion {
        translation,
        rotation: look_rotation(translation, anchors.target),
        roll: 0.0,
        fov_degrees: anchors.fov.default
            + (anchors.fov.attraction_end - anchors.fov.default) * eased,
        shake_amplitude: progress * 0.05,
    }
}

/// Spiralling plunge: exponential radial approach with an ever faster, ever
/// tighter spiral and a back-loaded field-of-view blow-out.
pub fn acceleration(anchors: &FallAnchors, progress: f32, phase_elapsed: f32) -> PhaseMotion {
    let radial = ease_in_expo(progress);
    let mut translation =
        attraction_end_point(anchors).lerp(anchors.target, radial * ACCELERATION_COVERAGE);

    let angular_speed = 1.0 + 8.0 * progress.powf(1.5);
    let angle = phase_elapsed * angular_speed;
    let radius = (1.0 - radial) * ACCELERATION_SPIRAL_RADIUS * (1.0 - progress * 0.5);

    translation.x += angle.cos() * radius;
    translation.z += angle.sin() * radius;
    translation.y += (angle * 0.5).sin() * radius * 0.3;

    let roll = (angle * 0.8).sin() * ACCELERATION_ROLL * (1.0 - progress * 0.3);
    let look = look_rotation(translation, anchors.target);
    let fov = &anchors.fov;

    PhaseMotion {
        translation,
        rotation: with_roll(look, roll),
        roll,
        fov_degrees: fov.attraction_end
            + (fov.acceleration_peak - fov.attraction_end) * progress.powf(1.8),
        shake_amplitude: 0.05 + radial * 0.3,
    }
}

/// Chaotic tumble through the horizon. Independent of the start pose:
/// high-frequency sinusoids around the target under a rise-and-fall envelope.
pub fn crossing(anchors: &FallAnchors, progress: f32, run_elapsed: f32) -> PhaseMotion {
    let envelope = (progress * PI).sin();
    let [fx, fy, fz] = CROSSING_POSITION_FREQUENCIES;
    let translation = anchors.target
        + Vec3::new(
        (run_elapsed * fx).sin(),
        (run_elapsed * fy).cos(),
        (run_elapsed * fz).sin(),
        ) * CROSSING_AMPLITUDE
            * envelope;

    let [lx, ly, lz] = CROSSING_LOOK_FREQUENCIES;
    let look_target = anchors.target
        + Vec3::new(
            (run_elapsed * lx).sin(),
            (run_elapsed * ly).cos(),
            (run_elapsed * lz).sin(),
        ) * CROSSING_LOOK_RADIUS;

    let roll = run_elapsed * CROSSING_SPIN_SPEED * envelope;
    let look = look_rotation(translation, look_target);
    let fov = &anchors.fov;

    PhaseMotion {
        translation,
        rotation: with_roll(look, roll),
        roll,
        fov_degrees: fov.acceleration_peak + envelope * (fov.crossing_peak - fov.acceleration_peak),
        shake_amplitude: envelope * 0.5,
    }
}

/// Spiral back out to the start pose, blending the orientation home and
/// settling the field of view with one elastic bounce.
pub fn emergence(anchors: &FallAnchors, progress: f32, phase_elapsed: f32) -> PhaseMotion {
    let smooth = ease_out_quart(progress);
    let bounce = ease_out_elastic((progress * 1.2).min(1.0));

    let mut translation = anchors.target.lerp(anchors.start.translation, smooth);
    let fade = 1.0 - smooth;
    let angle = (1.0 - progress) * TAU;
    let radius = fade * EMERGENCE_SPIRAL_RADIUS;
    translation.x += angle.cos() * radius * fade;
    translation.z += angle.sin() * radius * fade;

    let look = look_rotation(translation, anchors.target);
    let settled = look.slerp(anchors.start.rotation, smooth);
    let roll = fade * (phase_elapsed * EMERGENCE_ROLL_FREQUENCY).sin() * EMERGENCE_ROLL;

    let fov = &anchors.fov;
    let fov_degrees = (fov.acceleration_peak - bounce * (fov.acceleration_peak - fov.default))
        .max(fov.emergence_floor);

    PhaseMotion {
        translation,
        rotation: with_roll(settled, roll),
        roll,
        fov_degrees,
        shake_amplitude: fade * 0.15,
    }
}

/// Layered-sine camera shake at run-elapsed `run_elapsed`.
pub fn shake_offset(run_elapsed: f32, amplitude: f32) -> Vec3 {
    let t = run_elapsed * SHAKE_FREQUENCY;
    Vec3::new(
        (t * 1.1).sin() * 0.5 + (t * 2.3).sin() * 0.3,
        (t * 1.3).cos() * 0.5 + (t * 2.1).cos() * 0.3,
        (t * 0.9).sin() * 0.3 + (t * 1.7).cos() * 0.2,
    ) * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::coordinate_system::INITIAL_CAMERA_POSITION;

    fn anchors() -> FallAnchors {
        let start = INITIAL_CAMERA_POSITION;
        FallAnchors {
            start: CameraPose::new(start, look_rotation(start, Vec3::ZERO), DEFAULT_FOV),
            target: Vec3::ZERO,
            fov: FovProfile::default(),
        }
    }

    #[test]
    fn attraction_covers_fifteen_percent_and_drops() {
        let anchors = anchors();
        let begin = attraction(&anchors, 0.0);
        assert_eq!(begin.translation, anchors.start.translation);
        assert_eq!(begin.fov_degrees, 50.0);
        assert_eq!(begin.shake_amplitude, 0.0);

        let end = attraction(&anchors, 1.0);
        let expected = INITIAL_CAMERA_POSITION * 0.85 - Vec3::Y * 2.0;
        assert!(end.translation.abs_diff_eq(expected, 1e-5));
        assert_eq!(end.fov_degrees, 45.0);
        assert!((end.shake_amplitude - 0.05).abs() < 1e-6);
    }

    #[test]
    fn acceleration_fov_follows_back_loaded_curve() {
        let anchors = anchors();
        let mid = acceleration(&anchors, 0.5, 1.5);
        let expected = 45.0 + (140.0 - 45.0) * 0.5f32.powf(1.8);
        assert!((mid.fov_degrees - expected).abs() < 1e-4);
        assert_eq!(acceleration(&anchors, 0.0, 0.0).fov_degrees, 45.0);
        assert_eq!(acceleration(&anchors, 1.0, 3.0).fov_degrees, 140.0);
    }

    #[test]
    fn acceleration_starts_on_attraction_end_plus_spiral() {
        let anchors = anchors();
        let begin = acceleration(&anchors, 0.0, 0.0);
        let expected = attraction_end_point(&anchors) + Vec3::new(4.0, 0.0, 0.0);
        assert!(begin.translation.abs_diff_eq(expected, 1e-5));
        assert!((begin.shake_amplitude - 0.05).abs() < 1e-6);
    }

    #[test]
    fn acceleration_stops_short_of_the_target() {
        let anchors = anchors();
        let end = acceleration(&anchors, 1.0, 3.0);
        let expected = attraction_end_point(&anchors) * 0.05;
        // Spiral radius collapses to zero once the radial ease reaches 1.
        assert!(end.translation.abs_diff_eq(expected, 1e-4));
        assert!(end.translation.length() > 0.0);
        assert!((end.shake_amplitude - 0.35).abs() < 1e-6);
    }

    #[test]
    fn crossing_stays_within_noise_bounds() {
        let anchors = anchors();
        for step in 0..=300 {
            let progress = step as f32 / 300.0;
            let motion = crossing(&anchors, progress, 5.0 + progress * 3.0);
            assert!(motion.translation.x.abs() <= 0.3 + 1e-6);
            assert!(motion.translation.y.abs() <= 0.3 + 1e-6);
            assert!(motion.translation.z.abs() <= 0.3 + 1e-6);
            assert!(motion.fov_degrees >= 140.0 - 1e-4);
            assert!(motion.fov_degrees <= 160.0 + 1e-4);
        }
        assert!((crossing(&anchors, 0.5, 6.5).fov_degrees - 160.0).abs() < 1e-3);
    }

    #[test]
    fn crossing_ignores_the_start_pose() {
        let near = anchors();
        let mut far = anchors();
        far.start = CameraPose::new(Vec3::new(-30.0, 12.0, 4.0), Quat::IDENTITY, 50.0);
        assert_eq!(crossing(&near, 0.4, 6.2), crossing(&far, 0.4, 6.2));
        assert_eq!(crossing(&near, 0.0, 5.0).translation, Vec3::ZERO);
    }

    #[test]
    fn crossing_tumbles_around_an_offset_target() {
        let mut anchors = anchors();
        anchors.target = Vec3::new(10.0, 0.0, 0.0);
        assert_eq!(crossing(&anchors, 0.0, 5.0).translation, anchors.target);
        for step in 0..=100 {
            let progress = step as f32 / 100.0;
            let motion = crossing(&anchors, progress, 5.0 + progress * 3.0);
            assert!(motion.translation.distance(anchors.target) <= 0.3 * 3f32.sqrt() + 1e-5);
        }
    }

    #[test]
    fn emergence_returns_home_and_never_undershoots_fov_floor() {
        let anchors = anchors();
        for step in 0..=200 {
            let progress = step as f32 / 200.0;
            let motion = emergence(&anchors, progress, progress * 2.0);
            assert!(motion.fov_degrees >= 45.0);
        }
        let end = emergence(&anchors, 1.0, 2.0);
        assert!(end.translation.abs_diff_eq(anchors.start.translation, 1e-5));
        for axis in [Vec3::NEG_Z, Vec3::Y] {
            assert!((end.rotation * axis).abs_diff_eq(anchors.start.rotation * axis, 1e-5));
        }
        assert_eq!(end.fov_degrees, 50.0);
        assert_eq!(end.shake_amplitude, 0.0);
    }

    #[test]
    fn shake_scales_linearly_and_vanishes_at_zero() {
        assert_eq!(shake_offset(3.7, 0.0), Vec3::ZERO);
        let unit = shake_offset(1.25, 1.0);
        assert!(shake_offset(1.25, 0.4).abs_diff_eq(unit * 0.4, 1e-6));
        assert!(unit.length() <= (0.8f32 * 0.8 * 2.0 + 0.5 * 0.5).sqrt() + 1e-5);
    }
}
