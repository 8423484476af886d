/// Bloom strength at zero accretion intensity
pub const BASE_BLOOM: f32 = 1.5;

/// Additional bloom per unit of accretion intensity
pub const BLOOM_PER_INTENSITY: f32 = 0.5;

/// Chromatic aberration offset per unit of accretion intensity
pub const CHROMATIC_PER_INTENSITY: f32 = 0.001;

pub const BASE_VIGNETTE_OFFSET: f32 = 0.25;
pub const BASE_VIGNETTE_DARKNESS: f32 = 0.85;

pub const MIN_BLOOM: f32 = 0.5;
pub const MIN_CHROMATIC_OFFSET: f32 = 0.0;
pub const MIN_VIGNETTE_OFFSET: f32 = 0.05;
pub const MIN_VIGNETTE_DARKNESS: f32 = 0.5;
pub const MAX_VIGNETTE_DARKNESS: f32 = 1.5;

/// Mapper bloom strengths are authored on a 0..~7 scale; Bevy's bloom expects ~0..1
pub const BLOOM_INTENSITY_SCALE: f32 = 0.1;

/// Accretion intensity slider range
pub const MIN_INTENSITY: f32 = 0.3;
pub const MAX_INTENSITY: f32 = 2.0;
pub const INTENSITY_STEP: f32 = 0.1;

/// Selectable simulation speeds
pub const TIME_MODES: [f32; 4] = [0.3, 1.0, 20.0, 50.0];

/// Orbit auto-rotation speed at time scale 1 with no gesture influence
pub const BASE_ROTATION_SPEED: f32 = 0.8;

/// Orbit zoom limits
pub const ORBIT_MIN_DISTANCE: f32 = 6.0;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;

/// Orbit polar angle limits as fractions of π
pub const ORBIT_MIN_POLAR_FRACTION: f32 = 0.15;
pub const ORBIT_MAX_POLAR_FRACTION: f32 = 0.85;
