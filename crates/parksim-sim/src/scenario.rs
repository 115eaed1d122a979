//! Scenario layouts: preset parking situations.
//!
//! Every layout is placed through the normal scene API, so the result is
//! indistinguishable from a scene a user built by hand. The curb runs along
//! y = 0 and the player starts in the lane at positive y (or below the row
//! for perpendicular bays).

use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use parksim_core::catalog::{Catalog, VehicleSpec};
use parksim_core::constants::*;
use parksim_core::enums::ScenarioId;
use parksim_core::error::ConfigError;

use crate::scene::Scene;

/// Number of bays in the perpendicular row, including the open one.
const PERPENDICULAR_BAYS: usize = 5;

/// Clear the scene and place the given layout.
/// `seed` only matters for `RandomLot`.
pub fn load(
    scene: &mut Scene,
    catalog: &Catalog,
    scenario: ScenarioId,
    seed: u64,
) -> Result<(), ConfigError> {
    if catalog.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    scene.clear();

    match scenario {
        ScenarioId::Empty => {}
        ScenarioId::ParallelSpot => build_parallel_spot(scene, catalog)?,
        ScenarioId::PerpendicularRow => build_perpendicular_row(scene, catalog)?,
        ScenarioId::RandomLot => build_random_lot(scene, catalog, seed)?,
    }

    info!(
        ?scenario,
        seed,
        obstacles = scene.obstacle_count(),
        "loaded scenario"
    );
    Ok(())
}

/// Cycle through the catalog so layouts use a mix of vehicles.
fn pick(catalog: &Catalog, index: usize) -> Arc<VehicleSpec> {
    let vehicles = catalog.list();
    vehicles[index % vehicles.len()].clone()
}

/// Two parked cars with a spot 1.5 player-lengths long between them.
/// The player starts alongside the front car, ready to reverse in.
fn build_parallel_spot(scene: &mut Scene, catalog: &Catalog) -> Result<(), ConfigError> {
    let player = pick(catalog, 0);
    let rear = pick(catalog, 1);
    let front = pick(catalog, 2);

    let half_gap = player.length_feet() * PARALLEL_SPOT_FACTOR / 2.0;
    let rear_x = -(half_gap + rear.length_feet() / 2.0);
    let front_x = half_gap + front.length_feet() / 2.0;

    scene.place_obstacle(rear, rear_x, 0.0)?;
    scene.place_obstacle(front, front_x, 0.0)?;
    scene.place_player(player, front_x, LANE_OFFSET)?;
    Ok(())
}

/// A row of nose-in cars with the middle bay left open.
/// The player starts in the aisle below the row, facing +x.
fn build_perpendicular_row(scene: &mut Scene, catalog: &Catalog) -> Result<(), ConfigError> {
    let open_bay = PERPENDICULAR_BAYS / 2;
    let mut longest: f64 = 0.0;

    for bay in 0..PERPENDICULAR_BAYS {
        if bay == open_bay {
            continue;
        }
        let spec = pick(catalog, bay + 1);
        longest = longest.max(spec.length_feet());
        let x = (bay as f64 - open_bay as f64) * LOT_BAY_WIDTH;
        let id = scene.place_obstacle(spec, x, 0.0)?;
        scene.rotate(id, FRAC_PI_2);
    }

    let player = pick(catalog, 0);
    let aisle_y = -(longest / 2.0 + LANE_OFFSET + player.width_feet() / 2.0);
    let start_x = -(open_bay as f64 + 1.0) * LOT_BAY_WIDTH;
    scene.place_player(player, start_x, aisle_y)?;
    Ok(())
}

/// A curbside row of random vehicles with random gaps and slight skew.
/// The same seed always produces the same row.
fn build_random_lot(scene: &mut Scene, catalog: &Catalog, seed: u64) -> Result<(), ConfigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let player = pick(catalog, 0);
    let max_extra_gap = player.length_feet() * PARALLEL_SPOT_FACTOR;

    let mut cursor = 0.0;
    for _ in 0..RANDOM_LOT_VEHICLES {
        let spec = pick(catalog, rng.gen_range(0..catalog.len()));
        let length = spec.length_feet();
        let gap = LOT_VEHICLE_GAP + rng.gen_range(0.0..max_extra_gap);
        let jitter = rng.gen_range(-LOT_HEADING_JITTER..=LOT_HEADING_JITTER);

        let x = cursor + gap + length / 2.0;
        let id = scene.place_obstacle(spec, x, 0.0)?;
        scene.rotate(id, jitter);
        cursor = x + length / 2.0;
    }

    scene.place_player(player, 0.0, LANE_OFFSET)?;
    Ok(())
}
