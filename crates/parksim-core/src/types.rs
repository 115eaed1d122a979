//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{Gear, SteerDirection, WheelPosition};

/// A point on the ground plane (feet).
/// x = right, y = up, standard math orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

/// Position and orientation of a vehicle's center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    /// Radians, 0 = facing +x, counter-clockwise positive.
    pub heading: f64,
}

/// Stable identifier of a placed vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub u32);

/// One sampled wheel contact point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub wheel: WheelPosition,
    pub point: WorldPoint,
}

/// Control state read by the engine on every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInput {
    pub steer: SteerDirection,
    pub gear: Gear,
    /// Whether the vehicle is currently being driven.
    pub throttle: bool,
}

impl WorldPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another point (feet).
    pub fn distance_to(&self, other: &WorldPoint) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }
}

impl From<DVec2> for WorldPoint {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Unit vector the vehicle faces.
    pub fn forward(&self) -> DVec2 {
        DVec2::from_angle(self.heading)
    }

    /// Unit vector pointing out of the vehicle's left side.
    pub fn left(&self) -> DVec2 {
        self.forward().perp()
    }

    /// Heading wrapped into [0, TAU) for display.
    pub fn normalized_heading(&self) -> f64 {
        self.heading.rem_euclid(std::f64::consts::TAU)
    }
}

impl ControlInput {
    pub fn new(steer: SteerDirection, gear: Gear, throttle: bool) -> Self {
        Self {
            steer,
            gear,
            throttle,
        }
    }

    /// Idle control: straight, forward, not moving.
    pub fn idle() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
