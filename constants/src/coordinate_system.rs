use bevy::math::Vec3;

/// Point every fall is drawn toward: the centre of the event horizon
pub const FALL_TARGET: Vec3 = Vec3::ZERO;

/// Where the viewer starts before any interaction
pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 8.0, 20.0);

/// World up; every look-at orientation is built against it
pub const WORLD_UP: Vec3 = Vec3::Y;
