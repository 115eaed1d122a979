//! Snapshot system: reads the scene and builds a complete `SceneSnapshot`.
//!
//! This system is read-only and never modifies the scene.

use std::collections::HashSet;

use parksim_core::enums::DriveState;
use parksim_core::state::{SceneSnapshot, VehicleView};
use parksim_core::types::{ControlInput, VehicleId};

use crate::scene::{PlacedVehicle, Scene};
use crate::systems::collision;
use crate::systems::trails::WheelTrails;

/// Step counters reported alongside the scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriveStats {
    pub steps: u64,
    pub drive_time_secs: f64,
}

/// Build a snapshot of everything a renderer needs.
pub fn build_snapshot(
    scene: &Scene,
    trails: &WheelTrails,
    control: ControlInput,
    stats: DriveStats,
) -> SceneSnapshot {
    let player = scene.player();
    let obstacles = scene.obstacles();
    let colliding = colliding_obstacles(player.as_ref(), &obstacles);

    SceneSnapshot {
        steps: stats.steps,
        drive_time_secs: stats.drive_time_secs,
        drive_state: drive_state(&control),
        control,
        obstacles: obstacles
            .iter()
            .map(|o| build_view(o, colliding.contains(&o.id)))
            .collect(),
        player: player.as_ref().map(|p| build_view(p, !colliding.is_empty())),
        trails: trails.view(),
    }
}

/// Integrating exactly while the throttle is held.
pub fn drive_state(control: &ControlInput) -> DriveState {
    if control.throttle {
        DriveState::Integrating
    } else {
        DriveState::Idle
    }
}

/// Obstacles whose footprint overlaps the player's.
pub fn colliding_obstacles(
    player: Option<&PlacedVehicle>,
    obstacles: &[PlacedVehicle],
) -> HashSet<VehicleId> {
    let Some(player) = player else {
        return HashSet::new();
    };
    obstacles
        .iter()
        .filter(|o| {
            collision::footprints_overlap((&player.pose, &*player.spec), (&o.pose, &*o.spec))
        })
        .map(|o| o.id)
        .collect()
}

fn build_view(vehicle: &PlacedVehicle, colliding: bool) -> VehicleView {
    VehicleView {
        id: vehicle.id,
        name: vehicle.spec.name.clone(),
        role: vehicle.role,
        pose: vehicle.pose,
        display_heading: vehicle.pose.normalized_heading(),
        length_feet: vehicle.spec.length_feet(),
        width_feet: vehicle.spec.width_feet(),
        footprint: collision::footprint(&vehicle.pose, &vehicle.spec),
        display_color: vehicle.spec.display_color.clone(),
        colliding,
    }
}
