use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use super::landmarks::HandReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    #[default]
    None,
    Fist,
    Pinch,
    Open,
}

/// Debounced gesture for one classifier frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub kind: GestureKind,
    pub pinch_amount: f32,
    pub hand_center: Option<Vec2>,
    pub tracking: bool,
}

impl Default for GestureSample {
    fn default() -> Self {
        Self {
            kind: GestureKind::None,
            pinch_amount: 1.0,
            hand_center: None,
            tracking: false,
        }
    }
}

/// Remembers whether the previous classifier frame saw a fist so that a
/// newly closed fist outranks a simultaneous pinch.
#[derive(Debug, Default, Clone, Copy)]
pub struct GestureDebouncer {
    fist_held: bool,
}

impl GestureDebouncer {
    pub fn update(&mut self, reading: Option<HandReading>) -> GestureSample {
        let Some(reading) = reading else {
            self.fist_held = false;
            return GestureSample::default();
        };

        let kind = if reading.fist && !self.fist_held {
            GestureKind::Fist
        } else if reading.pinching {
            GestureKind::Pinch
        } else if reading.fist {
            GestureKind::Fist
        } else {
            GestureKind::Open
        };
        self.fist_held = reading.fist;

        GestureSample {
            kind,
            pinch_amount: reading.pinch_amount,
            hand_center: Some(reading.hand_center),
            tracking: true,
        }
    }

    pub fn reset(&mut self) {
        self.fist_held = false;
    }
}
