//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Discrete steering input. Either straight or full lock to one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteerDirection {
    Left,
    #[default]
    Straight,
    Right,
}

/// Transmission direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gear {
    #[default]
    Forward,
    Reverse,
}

/// Wheel contact channel for trail recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WheelPosition {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

/// Direction of a discrete placement rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    CounterClockwise,
    Clockwise,
}

/// Role of a placed vehicle in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleRole {
    Obstacle,
    Player,
}

/// Drive session state. Toggled only by the throttle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveState {
    #[default]
    Idle,
    Integrating,
}

/// Preset scene layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Nothing placed.
    #[default]
    Empty,
    /// Two cars along a curb with an open spot between them.
    ParallelSpot,
    /// A row of nose-in cars with one open bay.
    PerpendicularRow,
    /// A seeded row of random catalog vehicles.
    RandomLot,
}

impl SteerDirection {
    /// Curvature sign in the counter-clockwise world frame.
    /// Left turns the heading counter-clockwise when driving forward.
    pub fn turn_sign(self) -> f64 {
        match self {
            SteerDirection::Left => 1.0,
            SteerDirection::Straight => 0.0,
            SteerDirection::Right => -1.0,
        }
    }
}

impl Gear {
    /// +1 forward, -1 reverse.
    pub fn sign(self) -> f64 {
        match self {
            Gear::Forward => 1.0,
            Gear::Reverse => -1.0,
        }
    }
}

impl WheelPosition {
    pub const ALL: [WheelPosition; 4] = [
        WheelPosition::FrontLeft,
        WheelPosition::FrontRight,
        WheelPosition::RearLeft,
        WheelPosition::RearRight,
    ];

    /// Channel index, matching the order of `ALL`.
    pub fn index(self) -> usize {
        match self {
            WheelPosition::FrontLeft => 0,
            WheelPosition::FrontRight => 1,
            WheelPosition::RearLeft => 2,
            WheelPosition::RearRight => 3,
        }
    }

    /// Unit offsets along (forward, left) from the vehicle center.
    pub fn axle_signs(self) -> (f64, f64) {
        match self {
            WheelPosition::FrontLeft => (1.0, 1.0),
            WheelPosition::FrontRight => (1.0, -1.0),
            WheelPosition::RearLeft => (-1.0, 1.0),
            WheelPosition::RearRight => (-1.0, -1.0),
        }
    }
}

impl RotationDirection {
    pub fn sign(self) -> f64 {
        match self {
            RotationDirection::CounterClockwise => 1.0,
            RotationDirection::Clockwise => -1.0,
        }
    }
}
