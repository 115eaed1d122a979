//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior.
//! `Pose` and `VehicleId` from `types` are used as components too.

use std::sync::Arc;

use crate::catalog::VehicleSpec;

/// The catalog spec a placed vehicle was built from. Shared, read-only.
#[derive(Debug, Clone)]
pub struct VehicleModel {
    pub spec: Arc<VehicleSpec>,
}

/// Marks a parked obstacle vehicle.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle;

/// Marks the single drivable vehicle.
#[derive(Debug, Clone, Copy)]
pub struct Player;
