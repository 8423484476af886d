//! Named easing curves shared by the fall phases.
//!
//! Every curve maps [0,1] onto [0,1] with exact endpoints; the ones whose
//! closed form only approaches an endpoint asymptotically special-case it.

use std::f32::consts::PI;

/// Exponential ease-in, 2^(10t - 10). Exactly 0 at t = 0 and 1 at t = 1.
pub fn ease_in_expo(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2f32.powf(10.0 * t - 10.0)
    }
}

pub fn ease_in_out_quart(t: f32) -> f32 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

pub fn ease_out_quart(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(4)
}

/// Single overshoot past 1 followed by a damped settle.
pub fn ease_out_elastic(t: f32) -> f32 {
    const C4: f32 = (2.0 * PI) / 3.0;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
    }
}
