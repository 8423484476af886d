use bevy::math::Vec2;
use constants::gesture::{
    FINGER_BASES, FINGER_CLOSED_RATIO, FINGER_TIPS, FIST_MIN_CLOSED_DIGITS, HAND_LANDMARK_COUNT,
    INDEX_BASE, INDEX_TIP, MIDDLE_BASE, PINCH_AMOUNT_SCALE, PINCH_THRESHOLD, THUMB_BASE,
    THUMB_CLOSED_RATIO, THUMB_TIP, WRIST,
};
use serde::{Deserialize, Serialize};

/// Normalised image-space keypoint. Depth, when the tracker sends it, is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn distance(&self, other: &Landmark) -> f32 {
        self.position().distance(other.position())
    }
}

/// Per-frame reading of one tracked hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandReading {
    pub fist: bool,
    pub pinching: bool,
    /// 0 = thumb and index touching, 1 = fully apart.
    pub pinch_amount: f32,
    pub hand_center: Vec2,
}

/// Classify a hand from its keypoints. `None` when no hand is present or
/// fewer than 21 keypoints were reported.
pub fn classify_hand(landmarks: Option<&[Landmark]>) -> Option<HandReading> {
    let landmarks = landmarks.filter(|points| points.len() >= HAND_LANDMARK_COUNT)?;

    let pinch_distance = landmarks[THUMB_TIP].distance(&landmarks[INDEX_TIP]);

    Some(HandReading {
        fist: is_fist(landmarks),
        pinching: pinch_distance < PINCH_THRESHOLD,
        pinch_amount: (pinch_distance * PINCH_AMOUNT_SCALE).min(1.0),
        hand_center: (landmarks[WRIST].position() + landmarks[MIDDLE_BASE].position()) * 0.5,
    })
}

fn is_fist(landmarks: &[Landmark]) -> bool {
    let wrist = &landmarks[WRIST];

    let closed_fingers = FINGER_TIPS
        .iter()
        .zip(FINGER_BASES.iter())
        .filter(|&(&tip, &base)| {
            landmarks[tip].distance(wrist) < landmarks[base].distance(wrist) * FINGER_CLOSED_RATIO
        })
        .count();

    // Thumb curls across the palm rather than toward the wrist.
    let index_base = &landmarks[INDEX_BASE];
    let thumb_closed = landmarks[THUMB_TIP].distance(index_base)
        < landmarks[THUMB_BASE].distance(index_base) * THUMB_CLOSED_RATIO;

    closed_fingers + usize::from(thumb_closed) >= FIST_MIN_CLOSED_DIGITS
}
