/// Event horizon sphere radius
pub const HORIZON_RADIUS: f32 = 1.0;

/// Accretion disk inner and outer radius
pub const DISK_INNER_RADIUS: f32 = 1.5;
pub const DISK_OUTER_RADIUS: f32 = 8.0;

/// Disk spin in radians per scaled second
pub const DISK_SPIN_RATE: f32 = 0.3;

/// Seconds a gravity wave takes to expand and fade
pub const WAVE_DURATION: f32 = 4.0;

/// Concentric rings per wave and how many waves may overlap
pub const WAVE_LAYERS: usize = 8;
pub const MAX_CONCURRENT_WAVES: usize = 3;

/// Start delay between successive rings of one wave
pub const WAVE_LAYER_DELAY: f32 = 0.08;

/// Ring scale at emission and how far it grows
pub const WAVE_BASE_SCALE: f32 = 1.5;
pub const WAVE_SCALE_SPAN: f32 = 25.0;

/// (time scale, intensity) for each named scene preset
pub const PRESET_CINEMATIC: (f32, f32) = (0.2, 1.5);
pub const PRESET_DEFAULT: (f32, f32) = (1.0, 1.0);
pub const PRESET_FRENZY: (f32, f32) = (50.0, 1.8);
