/// Minimum number of keypoints a hand must report to be classified
pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_BASE: usize = 2;
pub const THUMB_TIP: usize = 4;
pub const INDEX_BASE: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_BASE: usize = 9;

/// Tip/base pairs for index, middle, ring and pinky
pub const FINGER_TIPS: [usize; 4] = [8, 12, 16, 20];
pub const FINGER_BASES: [usize; 4] = [5, 9, 13, 17];

/// Finger counts as closed when tip-to-wrist < base-to-wrist × this ratio
pub const FINGER_CLOSED_RATIO: f32 = 1.1;

/// Thumb counts as closed when tip-to-index-base < thumb-base-to-index-base × this ratio
pub const THUMB_CLOSED_RATIO: f32 = 1.2;

/// Closed digits (of five) required for a fist
pub const FIST_MIN_CLOSED_DIGITS: usize = 4;

/// Thumb-to-index distance below which the hand is pinching (normalised units)
pub const PINCH_THRESHOLD: f32 = 0.08;

/// Scale mapping pinch distance onto [0,1]; distances ≥ 1/scale saturate
pub const PINCH_AMOUNT_SCALE: f32 = 5.0;

/// How long an open palm must be held before a fall is requested
pub const OPEN_PALM_HOLD_MS: u64 = 1000;

/// Orbit speed multiplier range driven by pinching: (1 - amount) × span + min
pub const PINCH_SPEED_SPAN: f32 = 25.0;
pub const PINCH_SPEED_MIN: f32 = -5.0;

/// Ideal capture resolution requested from the camera
pub const CAPTURE_IDEAL_WIDTH: u32 = 320;
pub const CAPTURE_IDEAL_HEIGHT: u32 = 240;
