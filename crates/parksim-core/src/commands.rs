//! Scene commands sent from a UI or script to the simulator.
//!
//! Commands are applied at frame boundaries, never in the middle of a step.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::VehicleId;

/// All user actions the simulator understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneCommand {
    // --- Placement ---
    /// Place an obstacle vehicle (catalog name) at a world position.
    PlaceObstacle { vehicle: String, x: f64, y: f64 },
    /// Remove an obstacle by id.
    RemoveObstacle { id: VehicleId },
    /// Place the player vehicle, replacing any previous one.
    PlacePlayer { vehicle: String, x: f64, y: f64 },
    /// Rotate any placed vehicle by an arbitrary angle (radians).
    Rotate { id: VehicleId, delta: f64 },
    /// Rotate any placed vehicle by one fixed increment.
    RotateStep {
        id: VehicleId,
        direction: RotationDirection,
    },
    /// Replace the scene with a preset layout.
    LoadScenario { scenario: ScenarioId, seed: u64 },

    // --- Driving ---
    /// Set all control inputs at once.
    SetControl {
        steer: SteerDirection,
        gear: Gear,
        throttle: bool,
    },
    SetSteer { steer: SteerDirection },
    SetGear { gear: Gear },
    SetThrottle { throttle: bool },
    /// Leave drive mode: throttle off and time baseline dropped.
    StopSession,
    /// Erase all four wheel trails.
    ClearTrails,
}
