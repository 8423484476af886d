use bevy::prelude::*;
use constants::coordinate_system::WORLD_UP;

/// Camera state the fall controller writes every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub translation: Vec3,
    /// Orientation with `roll` already applied.
    pub rotation: Quat,
    /// Roll (radians) about the viewing axis applied on top of the look orientation.
    pub roll: f32,
    pub fov_degrees: f32,
}

impl CameraPose {
    pub fn new(translation: Vec3, rotation: Quat, fov_degrees: f32) -> Self {
        Self {
            translation,
            rotation,
            roll: 0.0,
            fov_degrees,
        }
    }

    /// Capture the pose of a live camera.
    pub fn from_camera(transform: &Transform, projection: &Projection) -> Self {
        let fov_degrees = match projection {
            Projection::Perspective(perspective) => perspective.fov.to_degrees(),
            _ => constants::fall_timeline::DEFAULT_FOV,
        };
        Self::new(transform.translation, transform.rotation, fov_degrees)
    }

    /// Write translation, orientation and field of view back onto a camera.
    pub fn apply_to(&self, transform: &mut Transform, projection: &mut Projection) {
        transform.translation = self.translation;
        transform.rotation = self.rotation;
        if let Projection::Perspective(perspective) = projection {
            perspective.fov = self.fov_degrees.to_radians();
        }
    }
}

/// Orientation of a camera at `from` looking at `target` with world up.
/// Degenerate directions fall back to Bevy's default forward.
pub fn look_rotation(from: Vec3, target: Vec3) -> Quat {
    Transform::from_translation(from)
        .looking_at(target, WORLD_UP)
        .rotation
}

/// Apply roll about the camera's own viewing axis.
pub fn with_roll(rotation: Quat, roll: f32) -> Quat {
    rotation * Quat::from_rotation_z(roll)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_rotation_points_forward_axis_at_target() {
        let from = Vec3::new(0.0, 8.0, 20.0);
        let rotation = look_rotation(from, Vec3::ZERO);
        let forward = rotation * Vec3::NEG_Z;
        let expected = (Vec3::ZERO - from).normalize();
        assert!(forward.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn roll_keeps_the_viewing_axis() {
        let rotation = look_rotation(Vec3::new(3.0, 1.0, 4.0), Vec3::ZERO);
        let rolled = with_roll(rotation, 0.7);
        assert!((rotation * Vec3::NEG_Z).abs_diff_eq(rolled * Vec3::NEG_Z, 1e-5));
        assert!(!(rotation * Vec3::Y).abs_diff_eq(rolled * Vec3::Y, 1e-3));
    }

    #[test]
    fn camera_round_trip_preserves_fov_and_placement() {
        let pose = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.3), 72.0);
        let mut transform = Transform::default();
        let mut projection = Projection::Perspective(PerspectiveProjection::default());
        pose.apply_to(&mut transform, &mut projection);
        let captured = CameraPose::from_camera(&transform, &projection);
        assert_eq!(captured.translation, pose.translation);
        assert_eq!(captured.rotation, pose.rotation);
        assert!((captured.fov_degrees - 72.0).abs() < 1e-4);
    }
}
