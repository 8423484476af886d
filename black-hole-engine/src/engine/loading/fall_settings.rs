use bevy::prelude::*;
use constants::coordinate_system::{FALL_TARGET, INITIAL_CAMERA_POSITION};
use constants::fall_timeline::{
    ACCELERATION_DURATION, ACCELERATION_PEAK_FOV, ATTRACTION_DURATION, ATTRACTION_END_FOV,
    CROSSING_DURATION, CROSSING_PEAK_FOV, DEFAULT_FOV, EMERGENCE_DURATION, EMERGENCE_FOV_FLOOR,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::camera::fall_motion::FovProfile;
use crate::engine::camera::fall_phase::FallTimeline;

/// Tolerance when comparing a declared total against the summed phases.
const TOTAL_DURATION_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("phase '{phase}' has invalid duration {duration}; expected a finite value > 0")]
    InvalidDuration { phase: &'static str, duration: f32 },
    #[error("declared total duration {declared}s does not match the phase sum {sum}s")]
    DurationMismatch { declared: f32, sum: f32 },
    #[error("field of view '{name}' = {value} is outside (0, 180) degrees")]
    FovOutOfRange { name: &'static str, value: f32 },
}

/// Seconds spent in each timed phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    pub attraction: f32,
    pub acceleration: f32,
    pub crossing: f32,
    pub emergence: f32,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            attraction: ATTRACTION_DURATION,
            acceleration: ACCELERATION_DURATION,
            crossing: CROSSING_DURATION,
            emergence: EMERGENCE_DURATION,
        }
    }
}

/// Field-of-view anchors in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FovSettings {
    pub default: f32,
    pub attraction_end: f32,
    pub acceleration_peak: f32,
    pub crossing_peak: f32,
    pub emergence_floor: f32,
}

impl Default for FovSettings {
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

/// Fall tuning loaded from `assets/fall_settings.json`. Every field is
/// optional in the file; missing values take the compiled-in defaults.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallSettings {
    pub durations: PhaseDurations,
    /// When present, must equal the sum of `durations`.
    pub total_duration: Option<f32>,
    pub fov: FovSettings,
    pub target: [f32; 3],
    pub initial_camera_position: [f32; 3],
}

impl Default for FallSettings {
    fn default() -> Self {
        Self {
            durations: PhaseDurations::default(),
            total_duration: None,
            fov: FovSettings::default(),
            target: FALL_TARGET.to_array(),
            initial_camera_position: INITIAL_CAMERA_POSITION.to_array(),
        }
    }
}

/// Settings after validation, ready to build the fall controller from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSettings {
    pub timeline: FallTimeline,
    pub fov: FovProfile,
    pub target: Vec3,
    pub initial_camera_position: Vec3,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            timeline: FallTimeline::default(),
            fov: FovProfile::default(),
            target: FALL_TARGET,
            initial_camera_position: INITIAL_CAMERA_POSITION,
        }
    }
}

impl FallSettings {
    pub fn validate(&self) -> Result<ResolvedSettings, SettingsError> {
        let d = &self.durations;
        let timeline = FallTimeline::new([d.attraction, d.acceleration, d.crossing, d.emergence])?;

        if let Some(declared) = self.total_duration {
            let sum = timeline.total();
            if !declared.is_finite() || (declared - sum).abs() > TOTAL_DURATION_EPSILON {
                return Err(SettingsError::DurationMismatch { declared, sum });
            }
        }

        let fov = &self.fov;
        for (name, value) in [
            ("default", fov.default),
            ("attraction_end", fov.attraction_end),
            ("acceleration_peak", fov.acceleration_peak),
            ("crossing_peak", fov.crossing_peak),
            ("emergence_floor", fov.emergence_floor),
        ] {
            if !(value > 0.0 && value < 180.0) {
                return Err(SettingsError::FovOutOfRange { name, value });
            }
        }

        Ok(ResolvedSettings {
            timeline,
            fov: FovProfile {
                default: fov.default,
                attraction_end: fov.attraction_end,
                acceleration_peak: fov.acceleration_peak,
                crossing_peak: fov.crossing_peak,
                emergence_floor: fov.emergence_floor,
            },
            target: Vec3::from_array(self.target),
            initial_camera_position: Vec3::from_array(self.initial_camera_position),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_to_compiled_timeline() {
        let resolved = FallSettings::default().validate().unwrap();
        assert_eq!(resolved, ResolvedSettings::default());
        assert!((resolved.timeline.total() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn partial_json_fills_missing_fields() {
        let settings: FallSettings =
            serde_json::from_str(r#"{ "durations": { "crossing": 4.0 }, "total_duration": 11.0 }"#)
                .unwrap();
        assert_eq!(settings.durations.attraction, ATTRACTION_DURATION);
        assert_eq!(settings.durations.crossing, 4.0);
        let resolved = settings.validate().unwrap();
        assert!((resolved.timeline.total() - 11.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_positive_duration() {
        let mut settings = FallSettings::default();
        settings.durations.acceleration = 0.0;
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InvalidDuration {
                phase: "acceleration",
                duration: 0.0
            })
        );
    }

    #[test]
    fn rejects_total_that_disagrees_with_phases() {
        let settings = FallSettings {
            total_duration: Some(12.0),
            ..default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::DurationMismatch { .. })
        ));
    }

    #[test]
    fn rejects_degenerate_fov() {
        let mut settings = FallSettings::default();
        settings.fov.crossing_peak = 180.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::FovOutOfRange {
                name: "crossing_peak",
                ..
            })
        ));
    }
}
