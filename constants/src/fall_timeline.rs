/// Seconds spent drifting toward the hole before the plunge begins
pub const ATTRACTION_DURATION: f32 = 2.0;

/// Seconds of spiralling, exponentially accelerating descent
pub const ACCELERATION_DURATION: f32 = 3.0;

/// Seconds spent tumbling through the horizon
pub const CROSSING_DURATION: f32 = 3.0;

/// Seconds taken to spiral back out to the starting viewpoint
pub const EMERGENCE_DURATION: f32 = 2.0;

/// Full run length, always the sum of the four phases
pub const TOTAL_DURATION: f32 =
    ATTRACTION_DURATION + ACCELERATION_DURATION + CROSSING_DURATION + EMERGENCE_DURATION;

/// Field of view (degrees) outside of a fall and after it completes
pub const DEFAULT_FOV: f32 = 50.0;

/// Field of view reached at the end of attraction
pub const ATTRACTION_END_FOV: f32 = 45.0;

/// Field of view reached at the end of acceleration, held as crossing's floor
pub const ACCELERATION_PEAK_FOV: f32 = 140.0;

/// Crest of the crossing pulse
pub const CROSSING_PEAK_FOV: f32 = 160.0;

/// Lowest field of view the emergence bounce may undershoot to
pub const EMERGENCE_FOV_FLOOR: f32 = 45.0;

/// Fraction of the start-to-target distance covered during attraction
pub const ATTRACTION_APPROACH_FRACTION: f32 = 0.15;

/// Vertical drop applied over attraction (world units)
pub const ATTRACTION_DROP: f32 = 2.0;

/// Fraction of the remaining distance covered by acceleration
pub const ACCELERATION_COVERAGE: f32 = 0.95;

/// Spiral radius at the very start of acceleration
pub const ACCELERATION_SPIRAL_RADIUS: f32 = 4.0;

/// Maximum roll (radians) while spiralling in
pub const ACCELERATION_ROLL: f32 = 0.4;

/// Amplitude of the positional noise around the horizon
pub const CROSSING_AMPLITUDE: f32 = 0.3;

/// Per-axis angular frequencies (rad/s) of the crossing position noise
pub const CROSSING_POSITION_FREQUENCIES: [f32; 3] = [50.0, 47.0, 53.0];

/// Per-axis angular frequencies (rad/s) of the crossing look target
pub const CROSSING_LOOK_FREQUENCIES: [f32; 3] = [23.0, 19.0, 17.0];

/// Distance of the wandering crossing look target from the origin
pub const CROSSING_LOOK_RADIUS: f32 = 2.0;

/// Roll speed (rad/s) through the horizon, scaled by the intensity envelope
pub const CROSSING_SPIN_SPEED: f32 = 20.0;

/// Radius of the reversed spiral at the start of emergence
pub const EMERGENCE_SPIRAL_RADIUS: f32 = 2.0;

/// Amplitude of the decaying roll oscillation on the way out
pub const EMERGENCE_ROLL: f32 = 0.2;

/// Angular frequency (rad/s) of the decaying roll oscillation
pub const EMERGENCE_ROLL_FREQUENCY: f32 = 3.0;

/// Base frequency of the camera shake noise
pub const SHAKE_FREQUENCY: f32 = 30.0;
