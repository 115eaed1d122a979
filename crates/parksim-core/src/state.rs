//! Scene snapshot: the complete visible state handed to a renderer.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ControlInput, Pose, VehicleId, WorldPoint};

/// Everything a renderer needs after a frame, in world coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Number of steps that actually moved the player since startup.
    pub steps: u64,
    /// Simulated driving time accumulated by those steps (seconds).
    pub drive_time_secs: f64,
    pub drive_state: DriveState,
    pub control: ControlInput,
    /// Obstacles ordered by id.
    pub obstacles: Vec<VehicleView>,
    pub player: Option<VehicleView>,
    pub trails: TrailView,
}

/// A placed vehicle as drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleView {
    pub id: VehicleId,
    pub name: String,
    pub role: VehicleRole,
    pub pose: Pose,
    /// Heading wrapped into [0, TAU).
    pub display_heading: f64,
    pub length_feet: f64,
    pub width_feet: f64,
    /// Body corners: front-left, front-right, rear-right, rear-left.
    pub footprint: [WorldPoint; 4],
    pub display_color: String,
    /// Whether this footprint overlaps the player (or, for the player, any obstacle).
    pub colliding: bool,
}

/// Wheel trails, oldest point first in each channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailView {
    pub front_left: Vec<WorldPoint>,
    pub front_right: Vec<WorldPoint>,
    pub rear_left: Vec<WorldPoint>,
    pub rear_right: Vec<WorldPoint>,
}

impl TrailView {
    pub fn channel(&self, wheel: WheelPosition) -> &[WorldPoint] {
        match wheel {
            WheelPosition::FrontLeft => &self.front_left,
            WheelPosition::FrontRight => &self.front_right,
            WheelPosition::RearLeft => &self.rear_left,
            WheelPosition::RearRight => &self.rear_right,
        }
    }

    pub fn total_points(&self) -> usize {
        WheelPosition::ALL
            .iter()
            .map(|wheel| self.channel(*wheel).len())
            .sum()
    }
}
