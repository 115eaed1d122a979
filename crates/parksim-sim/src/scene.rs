//! Scene state: placed obstacles and the single player vehicle.
//!
//! Each placed vehicle is a hecs entity carrying `VehicleId`, `Pose`,
//! `VehicleModel`, and an `Obstacle` or `Player` marker. The scene is a pure
//! container: no overlap or bounds checks happen here.

use std::sync::Arc;

use hecs::{Entity, World};
use tracing::{debug, info, warn};

use parksim_core::catalog::VehicleSpec;
use parksim_core::components::{Obstacle, Player, VehicleModel};
use parksim_core::enums::VehicleRole;
use parksim_core::error::ConfigError;
use parksim_core::types::{Pose, VehicleId};

/// A placed vehicle, copied out of the world.
#[derive(Debug, Clone)]
pub struct PlacedVehicle {
    pub id: VehicleId,
    pub role: VehicleRole,
    pub spec: Arc<VehicleSpec>,
    pub pose: Pose,
}

/// Owns the ECS world of placed vehicles.
pub struct Scene {
    world: World,
    next_id: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            next_id: 0,
        }
    }

    /// Place an obstacle facing +x. Rejects malformed specs.
    pub fn place_obstacle(
        &mut self,
        spec: Arc<VehicleSpec>,
        x: f64,
        y: f64,
    ) -> Result<VehicleId, ConfigError> {
        validate(&spec)?;
        let id = self.allocate_id();
        info!(%id, vehicle = %spec.name, x, y, "placed obstacle");
        self.world
            .spawn((id, Pose::new(x, y, 0.0), VehicleModel { spec }, Obstacle));
        Ok(id)
    }

    /// Remove an obstacle. Unknown ids and the player's id are ignored.
    pub fn remove_obstacle(&mut self, id: VehicleId) -> bool {
        let entity = self
            .world
            .query::<(&VehicleId, &Obstacle)>()
            .iter()
            .find(|(_, (vid, _))| **vid == id)
            .map(|(entity, _)| entity);

        match entity {
            Some(entity) => {
                info!(%id, "removed obstacle");
                self.world.despawn(entity).is_ok()
            }
            None => {
                debug!(%id, "remove ignored: no such obstacle");
                false
            }
        }
    }

    /// Place the player facing +x, replacing any existing player.
    pub fn place_player(
        &mut self,
        spec: Arc<VehicleSpec>,
        x: f64,
        y: f64,
    ) -> Result<VehicleId, ConfigError> {
        validate(&spec)?;

        let previous: Vec<Entity> = self
            .world
            .query::<&Player>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in previous {
            let _ = self.world.despawn(entity);
        }

        let id = self.allocate_id();
        info!(%id, vehicle = %spec.name, x, y, "placed player");
        self.world
            .spawn((id, Pose::new(x, y, 0.0), VehicleModel { spec }, Player));
        Ok(id)
    }

    /// Add `delta` radians to a vehicle's heading. No wraparound is applied.
    pub fn rotate(&mut self, id: VehicleId, delta: f64) -> bool {
        for (_entity, (vid, pose)) in self.world.query_mut::<(&VehicleId, &mut Pose)>() {
            if *vid == id {
                pose.heading += delta;
                return true;
            }
        }
        debug!(%id, "rotate ignored: no such vehicle");
        false
    }

    /// The player vehicle, if one is placed.
    pub fn player(&self) -> Option<PlacedVehicle> {
        self.world
            .query::<(&VehicleId, &Pose, &VehicleModel, &Player)>()
            .iter()
            .next()
            .map(|(_, (id, pose, model, _))| PlacedVehicle {
                id: *id,
                role: VehicleRole::Player,
                spec: model.spec.clone(),
                pose: *pose,
            })
    }

    /// Overwrite the player's pose. Returns false when there is no player.
    pub fn set_player_pose(&mut self, new_pose: Pose) -> bool {
        match self
            .world
            .query_mut::<(&mut Pose, &Player)>()
            .into_iter()
            .next()
        {
            Some((_, (pose, _))) => {
                *pose = new_pose;
                true
            }
            None => false,
        }
    }

    /// All obstacles, ordered by id.
    pub fn obstacles(&self) -> Vec<PlacedVehicle> {
        let mut obstacles: Vec<PlacedVehicle> = self
            .world
            .query::<(&VehicleId, &Pose, &VehicleModel, &Obstacle)>()
            .iter()
            .map(|(_, (id, pose, model, _))| PlacedVehicle {
                id: *id,
                role: VehicleRole::Obstacle,
                spec: model.spec.clone(),
                pose: *pose,
            })
            .collect();
        obstacles.sort_by_key(|v| v.id);
        obstacles
    }

    /// Any placed vehicle by id.
    pub fn vehicle(&self, id: VehicleId) -> Option<PlacedVehicle> {
        if let Some(player) = self.player().filter(|p| p.id == id) {
            return Some(player);
        }
        self.obstacles().into_iter().find(|o| o.id == id)
    }

    pub fn obstacle_count(&self) -> usize {
        self.world.query::<&Obstacle>().iter().count()
    }

    /// Remove every vehicle. Ids keep counting up.
    pub fn clear(&mut self) {
        self.world.clear();
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn allocate_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        id
    }
}

fn validate(spec: &VehicleSpec) -> Result<(), ConfigError> {
    spec.validate().inspect_err(|e| warn!("rejected vehicle placement: {e}"))
}
