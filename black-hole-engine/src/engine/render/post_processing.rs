//! Post-processing intensities derived from the fall's progress.
//!
//! The mapper is a pure function of the run status and the accretion
//! intensity; `apply_post_processing` pushes its output onto the camera's
//! bloom, chromatic aberration and vignette every frame.

use std::f32::consts::PI;

use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::post_process::ChromaticAberration;
use bevy::prelude::*;
use serde::Serialize;
use constants::render_settings::{
    BASE_BLOOM, BASE_VIGNETTE_DARKNESS, BASE_VIGNETTE_OFFSET, BLOOM_INTENSITY_SCALE,
    BLOOM_PER_INTENSITY, CHROMATIC_PER_INTENSITY, MAX_VIGNETTE_DARKNESS, MIN_BLOOM,
    MIN_CHROMATIC_OFFSET, MIN_VIGNETTE_DARKNESS, MIN_VIGNETTE_OFFSET,
};

use super::vignette_post_processing::VignetteSettings;
use crate::engine::camera::fall_controller::{FallCamera, FallController};
use crate::engine::camera::fall_phase::FallPhase;
use crate::engine::systems::scene_controls::SceneControls;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PostProcessParams {
    pub bloom_intensity: f32,
    pub chromatic_aberration_offset: f32,
    pub vignette_offset: f32,
    pub vignette_darkness: f32,
}

/// Map run status onto post-processing intensities.
///
/// `progress` is whole-run progress. Inactive runs yield the baseline for
/// `intensity`; each phase layers its own ramp, oscillation or decay on top.
pub fn map_post_processing(
    active: bool,
    phase: FallPhase,
    progress: f32,
    intensity: f32,
) -> PostProcessParams {
    let mut bloom = BASE_BLOOM + intensity * BLOOM_PER_INTENSITY;
    let mut chromatic = CHROMATIC_PER_INTENSITY * intensity;
    let mut offset = BASE_VIGNETTE_OFFSET;
    let mut darkness = BASE_VIGNETTE_DARKNESS;

    if active {
        match phase {
            FallPhase::Attraction => {
                bloom += progress * 0.5;
                chromatic += progress * 0.002;
                darkness += progress * 0.1;
            }
            FallPhase::Acceleration => {
                let accel = progress.powf(1.5);
                bloom += 0.5 + accel * 3.0;
                chromatic += 0.002 + accel * 0.015;
                offset -= accel * 0.15;
                darkness += 0.1 + accel * 0.3;
            }
            FallPhase::Crossing => {
                bloom = 5.0 + (progress * PI).sin() * 2.0;
                chromatic = 0.02 + (progress * PI * 3.0).sin() * 0.01;
                offset = 0.1;
                darkness = 1.2 - progress * 0.3;
            }
            FallPhase::Emergence => {
                let emerge = progress.sqrt();
                bloom = 5.0 - emerge * 3.5;
                chromatic = 0.02 - emerge * 0.018;
                offset = 0.1 + emerge * 0.15;
                darkness = 0.9 - emerge * 0.05;
            }
            FallPhase::Idle => {}
        }
    }

    PostProcessParams {
        bloom_intensity: bloom.max(MIN_BLOOM),
        chromatic_aberration_offset: chromatic.max(MIN_CHROMATIC_OFFSET),
        vignette_offset: offset.max(MIN_VIGNETTE_OFFSET),
        vignette_darkness: darkness.clamp(MIN_VIGNETTE_DARKNESS, MAX_VIGNETTE_DARKNESS),
    }
}

/// Latest mapper output, reported by `get_fall_state`.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PostProcessState(pub PostProcessParams);

impl Default for PostProcessState {
    fn default() -> Self {
        Self(map_post_processing(false, FallPhase::Idle, 0.0, 1.0))
    }
}

pub fn apply_post_processing(
    controller: Res<FallController>,
    controls: Res<SceneControls>,
    mut state: ResMut<PostProcessState>,
    mut camera_query: Query<
        (
            Option<&mut Bloom>,
            Option<&mut ChromaticAberration>,
            Option<&mut VignetteSettings>,
        ),
        With<FallCamera>,
    >,
) {
    let status = controller.status();
    let params = map_post_processing(status.active, status.phase, status.progress, controls.intensity);
    state.0 = params;

    for (bloom, chromatic, vignette) in &mut camera_query {
        if let Some(mut bloom) = bloom {
            bloom.intensity = params.bloom_intensity * BLOOM_INTENSITY_SCALE;
        }
        if let Some(mut chromatic) = chromatic {
            chromatic.intensity = params.chromatic_aberration_offset;
        }
        if let Some(mut vignette) = vignette {
            vignette.offset = params.vignette_offset;
            vignette.darkness = params.vignette_darkness;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_depends_on_intensity_only() {
        let low = map_post_processing(false, FallPhase::Crossing, 0.6, 1.0);
        assert_eq!(low.bloom_intensity, 2.0);
        assert!((low.chromatic_aberration_offset - 0.001).abs() < 1e-9);
        assert_eq!(low.vignette_offset, 0.25);
        assert_eq!(low.vignette_darkness, 0.85);

        let high = map_post_processing(false, FallPhase::Idle, 0.0, 2.0);
        assert_eq!(high.bloom_intensity, 2.5);
        assert_eq!(low.vignette_offset, high.vignette_offset);
    }

    #[test]
    fn attraction_and_acceleration_ramp_up() {
        let start = map_post_processing(true, FallPhase::Attraction, 0.0, 1.0);
        let later = map_post_processing(true, FallPhase::Attraction, 0.2, 1.0);
        assert!(later.bloom_intensity > start.bloom_intensity);
        assert!(later.vignette_darkness > start.vignette_darkness);

        let accel_early = map_post_processing(true, FallPhase::Acceleration, 0.25, 1.0);
        let accel_late = map_post_processing(true, FallPhase::Acceleration, 0.45, 1.0);
        assert!(accel_late.bloom_intensity > accel_early.bloom_intensity);
        assert!(accel_late.chromatic_aberration_offset > accel_early.chromatic_aberration_offset);
        assert!(accel_late.vignette_offset < accel_early.vignette_offset);
    }

    #[test]
    fn crossing_oscillates_around_fixed_vignette() {
        let params = map_post_processing(true, FallPhase::Crossing, 0.5, 1.0);
        assert!((params.bloom_intensity - 7.0).abs() < 1e-5);
        assert_eq!(params.vignette_offset, 0.1);
        assert!((params.vignette_darkness - 1.05).abs() < 1e-6);
    }

    #[test]
    fn emergence_decays_toward_baseline() {
        let early = map_post_processing(true, FallPhase::Emergence, 0.8, 1.0);
        let late = map_post_processing(true, FallPhase::Emergence, 1.0, 1.0);
        assert!(late.bloom_intensity < early.bloom_intensity);
        assert!((late.bloom_intensity - 1.5).abs() < 1e-5);
        assert!((late.chromatic_aberration_offset - 0.002).abs() < 1e-6);
        assert!((late.vignette_offset - 0.25).abs() < 1e-6);
    }

    #[test]
    fn outputs_respect_floors_and_ceilings() {
        for phase in FallPhase::TIMED {
            for step in 0..=50 {
                let progress = step as f32 / 50.0;
                for intensity in [0.0, 0.3, 1.0, 2.0] {
                    let p = map_post_processing(true, phase, progress, intensity);
                    assert!(p.bloom_intensity >= 0.5);
                    assert!(p.chromatic_aberration_offset >= 0.0);
                    assert!(p.vignette_offset >= 0.05);
                    assert!((0.5..=1.5).contains(&p.vignette_darkness));
                }
            }
        }
    }
}
