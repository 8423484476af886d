use constants::fall_timeline::{
    ACCELERATION_DURATION, ATTRACTION_DURATION, CROSSING_DURATION, EMERGENCE_DURATION,
};
use serde::{Deserialize, Serialize};

use crate::engine::loading::fall_settings::SettingsError;

/// Named segments of the fall timeline, in playback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallPhase {
    Attraction,
    Acceleration,
    Crossing,
    Emergence,
    #[default]
    Idle,
}

impl FallPhase {
    /// The four timed phases; `Idle` is terminal and has no duration.
    pub const TIMED: [FallPhase; 4] = [
        FallPhase::Attraction,
        FallPhase::Acceleration,
        FallPhase::Crossing,
        FallPhase::Emergence,
    ];

    /// Identifier used in frontend notifications.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attraction => "attraction",
            Self::Acceleration => "acceleration",
            Self::Crossing => "crossing",
            Self::Emergence => "emergence",
            Self::Idle => "idle",
        }
    }
}

/// Where a given run-elapsed time falls on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSample {
    pub phase: FallPhase,
    /// Seconds since the phase began.
    pub phase_elapsed: f32,
    /// Normalised position inside the phase, always in [0,1].
    pub progress: f32,
}

/// Contiguous phase durations. Phase `i` covers `[start_i, start_i + duration_i)`
/// and the run ends at the sum of all four.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallTimeline {
    durations: [f32; 4],
}

impl Default for FallTimeline {
    fn default() -> Self {
        Self {
            durations: [
                ATTRACTION_DURATION,
                ACCELERATION_DURATION,
                CROSSING_DURATION,
                EMERGENCE_DURATION,
            ],
        }
    }
}

impl FallTimeline {
    /// Build a timeline from attraction, acceleration, crossing and emergence
    /// durations in seconds.
    pub fn new(durations: [f32; 4]) -> Result<Self, SettingsError> {
        for (phase, duration) in FallPhase::TIMED.iter().zip(durations) {
            if !duration.is_finite() || duration <= 0.0 {
                return Err(SettingsError::InvalidDuration {
                    phase: phase.as_str(),
                    duration,
                });
            }
        }
        Ok(Self { durations })
    }

    pub fn total(&self) -> f32 {
        self.durations.iter().sum()
    }

    pub fn duration(&self, phase: FallPhase) -> f32 {
        match phase {
            FallPhase::Attraction => self.durations[0],
            FallPhase::Acceleration => self.durations[1],
            FallPhase::Crossing => self.durations[2],
            FallPhase::Emergence => self.durations[3],
            FallPhase::Idle => 0.0,
        }
    }

    /// Run-elapsed time at which `phase` begins. `Idle` begins at the total.
    pub fn phase_start(&self, phase: FallPhase) -> f32 {
        FallPhase::TIMED
            .iter()
            .take_while(|timed| **timed != phase)
            .map(|timed| self.duration(*timed))
            .sum()
    }

    /// Progress inside `phase` at run-elapsed `elapsed`, clamped to [0,1].
    /// Reaching the phase end yields exactly 1.0.
    pub fn phase_progress(&self, phase: FallPhase, elapsed: f32) -> f32 {
        let duration = self.duration(phase);
        if duration <= 0.0 {
            return 1.0;
        }
        let start = self.phase_start(phase);
        if elapsed >= start + duration {
            1.0
        } else if elapsed <= start {
            0.0
        } else {
            ((elapsed - start) / duration).clamp(0.0, 1.0)
        }
    }

    /// Locate `elapsed` on the timeline. Boundaries belong to the later phase,
    /// so a new phase always begins at progress 0.0.
    pub fn sample(&self, elapsed: f32) -> PhaseSample {
        let mut start = 0.0;
        for phase in FallPhase::TIMED {
            let end = start + self.duration(phase);
            if elapsed < end {
                let phase_elapsed = (elapsed - start).max(0.0);
                return PhaseSample {
                    phase,
                    phase_elapsed,
                    progress: self.phase_progress(phase, elapsed),
                };
            }
            start = end;
        }

        PhaseSample {
            phase: FallPhase::Idle,
            phase_elapsed: 0.0,
            progress: 1.0,
        }
    }

    /// Whole-run progress in [0,1].
    pub fn overall_progress(&self, elapsed: f32) -> f32 {
        (elapsed / self.total()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::fall_timeline::TOTAL_DURATION;

    #[test]
    fn default_durations_sum_to_ten_seconds() {
        let timeline = FallTimeline::default();
        assert_eq!(timeline.total(), 10.0);
        assert_eq!(timeline.total(), TOTAL_DURATION);
        assert_eq!(timeline.phase_start(FallPhase::Acceleration), 2.0);
        assert_eq!(timeline.phase_start(FallPhase::Crossing), 5.0);
        assert_eq!(timeline.phase_start(FallPhase::Emergence), 8.0);
        assert_eq!(timeline.phase_start(FallPhase::Idle), 10.0);
    }

    #[test]
    fn boundaries_close_one_phase_at_one_and_open_the_next_at_zero() {
        let timeline = FallTimeline::default();
        for pair in FallPhase::TIMED.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let boundary = timeline.phase_start(next);
            assert_eq!(timeline.phase_progress(current, boundary), 1.0);
            let sample = timeline.sample(boundary);
            assert_eq!(sample.phase, next);
            assert_eq!(sample.progress, 0.0);
        }
        assert_eq!(
            timeline.phase_progress(FallPhase::Emergence, timeline.total()),
            1.0
        );
        assert_eq!(timeline.sample(timeline.total()).phase, FallPhase::Idle);
    }

    #[test]
    fn boundaries_stay_exact_for_uneven_durations() {
        let timeline = FallTimeline::new([0.7, 1.3, 2.9, 0.1]).expect("valid timeline");
        for pair in FallPhase::TIMED.windows(2) {
            let boundary = timeline.phase_start(pair[1]);
            assert_eq!(timeline.phase_progress(pair[0], boundary), 1.0);
            assert_eq!(timeline.sample(boundary).progress, 0.0);
        }
    }

    #[test]
    fn samples_are_contiguous_and_in_range() {
        let timeline = FallTimeline::default();
        let mut last_phase = FallPhase::Attraction;
        for step in 0..1000 {
            let elapsed = step as f32 * 0.01;
            let sample = timeline.sample(elapsed);
            assert!((0.0..=1.0).contains(&sample.progress));
            assert_ne!(sample.phase, FallPhase::Idle);
            let order = |phase: FallPhase| FallPhase::TIMED.iter().position(|p| *p == phase);
            assert!(order(sample.phase) >= order(last_phase));
            last_phase = sample.phase;
        }
    }

    #[test]
    fn rejects_non_positive_or_non_finite_durations() {
        assert!(FallTimeline::new([2.0, 0.0, 3.0, 2.0]).is_err());
        assert!(FallTimeline::new([2.0, 3.0, -1.0, 2.0]).is_err());
        assert!(FallTimeline::new([f32::NAN, 3.0, 3.0, 2.0]).is_err());
        assert!(FallTimeline::new([2.0, 3.0, 3.0, f32::INFINITY]).is_err());
    }
}
