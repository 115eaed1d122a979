//! Simulation constants and tuning parameters.

// --- Units ---

/// Inches per foot. Catalog dimensions are in inches, the world is in feet.
pub const INCHES_PER_FOOT: f64 = 12.0;

// --- Driving ---

/// Fixed driving speed (feet per second), applied in both gears.
pub const DRIVE_SPEED: f64 = 4.0;

/// Largest frame delta the engine will integrate in one step (seconds).
/// Larger deltas (frame hitches, resumed tabs) are clamped to this.
pub const MAX_STEP_DT: f64 = 0.05;

// --- Placement ---

/// Discrete rotation increment for placed vehicles (15 degrees).
pub const ROTATION_STEP: f64 = std::f64::consts::PI / 12.0;

// --- Wheel trails ---

/// Record a trail sample once every this many applied steps.
pub const TRAIL_SAMPLE_INTERVAL: u32 = 2;

/// Maximum points kept per wheel channel before the oldest are evicted.
pub const MAX_TRAIL_POINTS: usize = 4096;

// --- Scenarios ---

/// Clearance between parked vehicles in generated rows (feet).
pub const LOT_VEHICLE_GAP: f64 = 3.0;

/// Width of a painted perpendicular bay (feet).
pub const LOT_BAY_WIDTH: f64 = 9.0;

/// Open curb length of a parallel spot as a multiple of the player's length.
pub const PARALLEL_SPOT_FACTOR: f64 = 1.5;

/// Lateral distance from the curb line to the player's start lane (feet).
pub const LANE_OFFSET: f64 = 8.0;

/// Maximum heading jitter for randomly parked vehicles (radians, ~4 degrees).
pub const LOT_HEADING_JITTER: f64 = 0.07;

/// Default vehicle count for a random lot row.
pub const RANDOM_LOT_VEHICLES: usize = 6;

// --- Driver loop ---

/// Default frame rate of the headless driver (Hz).
pub const DEFAULT_FPS: f64 = 60.0;
