use std::f32::consts::{PI, TAU};

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::coordinate_system::{FALL_TARGET, INITIAL_CAMERA_POSITION};
use constants::render_settings::{
    ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR_FRACTION, ORBIT_MIN_DISTANCE, ORBIT_MIN_POLAR_FRACTION,
};

use super::fall_controller::FallCamera;
use super::pose::look_rotation;
use crate::engine::systems::scene_controls::SceneControls;

/// Orbit rig around the black hole used whenever no fall owns the camera.
/// Angles are spherical: `yaw` around world up, `polar` measured from it.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub polar: f32,
}

impl OrbitCamera {
    pub fn from_position(position: Vec3, focus_point: Vec3) -> Self {
        let offset = position - focus_point;
        let distance = offset.length().clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let polar = if offset.length() > f32::EPSILON {
            (offset.y / offset.length()).clamp(-1.0, 1.0).acos()
        } else {
            PI * 0.5
        };
        let mut orbit = Self {
            focus_point,
            distance,
            yaw: offset.x.atan2(offset.z),
            polar,
        };
        orbit.polar = orbit.clamp_polar(orbit.polar);
        orbit
    }

    fn clamp_polar(&self, polar: f32) -> f32 {
        polar.clamp(PI * ORBIT_MIN_POLAR_FRACTION, PI * ORBIT_MAX_POLAR_FRACTION)
    }

    pub fn translation(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.focus_point
            + Vec3::new(sin_polar * sin_yaw, cos_polar, sin_polar * cos_yaw) * self.distance
    }

    pub fn transform(&self) -> Transform {
        let translation = self.translation();
        Transform::from_translation(translation)
            .with_rotation(look_rotation(translation, self.focus_point))
    }

    pub fn rotate(&mut self, delta_yaw: f32, delta_polar: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(TAU);
        self.polar = self.clamp_polar(self.polar + delta_polar);
    }

    /// Dolly toward (positive) or away from (negative) the focus point.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance =
            (self.distance * 0.95f32.powf(scroll)).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    /// Spin at `speed` orbit-control units (one unit is a revolution per minute).
    pub fn auto_rotate(&mut self, speed: f32, delta_secs: f32) {
        self.rotate(-speed * TAU / 60.0 * delta_secs, 0.0);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_position(INITIAL_CAMERA_POSITION, FALL_TARGET)
    }
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<FallCamera>>,
    mut orbit: ResMut<OrbitCamera>,
    controls: Res<SceneControls>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let dragging = mouse_button.any_pressed([MouseButton::Left, MouseButton::Right]);
    if dragging && mouse_delta != Vec2::ZERO {
        let yaw_sens = 0.0035;
        let polar_sens = 0.0030;
        orbit.rotate(-mouse_delta.x * yaw_sens, -mouse_delta.y * polar_sens);
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(scroll_accum);
    }

    if !dragging {
        orbit.auto_rotate(controls.rotation_speed(), time.delta_secs());
    }

    *camera_transform = orbit.transform();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orbit_reproduces_initial_position() {
        let orbit = OrbitCamera::default();
        assert!(orbit.translation().abs_diff_eq(INITIAL_CAMERA_POSITION, 1e-4));
    }

    #[test]
    fn zoom_and_polar_are_clamped() {
        let mut orbit = OrbitCamera::default();
        orbit.zoom(500.0);
        assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
        orbit.zoom(-500.0);
        assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);
        orbit.rotate(0.0, 10.0);
        assert!((orbit.polar - PI * ORBIT_MAX_POLAR_FRACTION).abs() < 1e-6);
        orbit.rotate(0.0, -10.0);
        assert!((orbit.polar - PI * ORBIT_MIN_POLAR_FRACTION).abs() < 1e-6);
    }

    #[test]
    fn auto_rotate_keeps_distance_and_height() {
        let mut orbit = OrbitCamera::default();
        let before = orbit.translation();
        orbit.auto_rotate(0.8, 1.0);
        let after = orbit.translation();
        assert!((before.length() - after.length()).abs() < 1e-4);
        assert!((before.y - after.y).abs() < 1e-4);
        assert!(!before.abs_diff_eq(after, 1e-3));
    }
}
