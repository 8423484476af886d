use constants::gesture::{OPEN_PALM_HOLD_MS, PINCH_SPEED_MIN, PINCH_SPEED_SPAN};

use super::debouncer::{GestureKind, GestureSample};

/// What one gesture sample asks the scene to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchOutcome {
    pub wave: bool,
    pub fall: bool,
    pub speed_multiplier: f32,
}

/// Turns debounced samples into scene triggers: a fist edge sends a gravity
/// wave, an open palm held long enough requests a fall, and pinching steers
/// the orbit speed.
#[derive(Debug, Default, Clone, Copy)]
pub struct GestureDispatcher {
    last_fist: bool,
    open_since_ms: Option<u64>,
}

impl GestureDispatcher {
    /// `now_ms` is the classifier timestamp of the sample, not the render clock.
    pub fn update(&mut self, sample: &GestureSample, now_ms: u64) -> DispatchOutcome {
        let is_fist = sample.kind == GestureKind::Fist;
        let wave = is_fist && !self.last_fist;
        self.last_fist = is_fist;

        let mut fall = false;
        if sample.kind == GestureKind::Open {
            match self.open_since_ms {
                None => self.open_since_ms = Some(now_ms),
                Some(since) if now_ms.saturating_sub(since) >= OPEN_PALM_HOLD_MS => {
                    fall = true;
                    self.open_since_ms = None;
                }
                Some(_) => {}
            }
        } else {
            self.open_since_ms = None;
        }

        let speed_multiplier = if sample.kind == GestureKind::Pinch {
            pinch_speed_multiplier(sample.pinch_amount)
        } else {
            1.0
        };

        DispatchOutcome {
            wave,
            fall,
            speed_multiplier,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Pinch amount 0 (closed) → 20, 1 (open) → −5.
pub fn pinch_speed_multiplier(pinch_amount: f32) -> f32 {
    (1.0 - pinch_amount) * PINCH_SPEED_SPAN + PINCH_SPEED_MIN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: GestureKind) -> GestureSample {
        GestureSample {
            kind,
            pinch_amount: 1.0,
            hand_center: None,
            tracking: kind != GestureKind::None,
        }
    }

    #[test]
    fn open_palm_fires_once_after_hold() {
        let mut dispatcher = GestureDispatcher::default();
        let open = sample(GestureKind::Open);

        assert!(!dispatcher.update(&open, 5_000).fall);
        assert!(!dispatcher.update(&open, 5_999).fall);
        assert!(dispatcher.update(&open, 6_000).fall);
        assert!(!dispatcher.update(&open, 6_010).fall);
        assert!(!dispatcher.update(&open, 6_500).fall);
    }

    #[test]
    fn interrupted_palm_restarts_timer() {
        let mut dispatcher = GestureDispatcher::default();
        let open = sample(GestureKind::Open);

        dispatcher.update(&open, 0);
        dispatcher.update(&sample(GestureKind::None), 600);
        dispatcher.update(&open, 700);
        assert!(!dispatcher.update(&open, 1_200).fall);
        assert!(dispatcher.update(&open, 1_700).fall);
    }

    #[test]
    fn fist_wave_only_on_edge() {
        let mut dispatcher = GestureDispatcher::default();
        let fist = sample(GestureKind::Fist);

        assert!(dispatcher.update(&fist, 0).wave);
        assert!(!dispatcher.update(&fist, 30).wave);
        dispatcher.update(&sample(GestureKind::Open), 60);
        assert!(dispatcher.update(&fist, 90).wave);
    }

    #[test]
    fn pinch_steers_speed_and_release_resets() {
        let mut dispatcher = GestureDispatcher::default();
        let mut pinch = sample(GestureKind::Pinch);
        pinch.pinch_amount = 0.2;

        let outcome = dispatcher.update(&pinch, 0);
        assert!((outcome.speed_multiplier - 15.0).abs() < 1e-4);
        assert_eq!(pinch_speed_multiplier(0.0), 20.0);
        assert_eq!(pinch_speed_multiplier(1.0), -5.0);
        assert_eq!(
            dispatcher.update(&sample(GestureKind::Open), 10).speed_multiplier,
            1.0
        );
    }
}
