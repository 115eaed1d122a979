//! Parking simulator: the single authoritative simulation state.
//!
//! `ParkingSimulator` owns the scene, the latest control input, the wheel
//! trails and the frame clock. It is driven from one thread, one frame at a
//! time; commands and control changes are applied between steps. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use parksim_core::catalog::{Catalog, VehicleSpec};
use parksim_core::commands::SceneCommand;
use parksim_core::constants::*;
use parksim_core::enums::{DriveState, Gear, RotationDirection, ScenarioId, SteerDirection};
use parksim_core::error::ConfigError;
use parksim_core::state::SceneSnapshot;
use parksim_core::types::{ControlInput, Pose, TrailPoint, VehicleId};

use crate::clock::FrameClock;
use crate::scenario;
use crate::scene::Scene;
use crate::systems::kinematics;
use crate::systems::snapshot::{self, DriveStats};
use crate::systems::trails::WheelTrails;

/// Tuning for a simulator instance.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Driving speed (feet per second), both gears.
    pub speed: f64,
    /// Deltas above this are clamped before integration (seconds).
    pub max_step_dt: f64,
    /// Record a trail sample every this many applied steps.
    pub trail_sample_interval: u32,
    /// Maximum points per wheel channel.
    pub trail_capacity: usize,
    /// Increment used by `rotate_step` (radians).
    pub rotation_step: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed: DRIVE_SPEED,
            max_step_dt: MAX_STEP_DT,
            trail_sample_interval: TRAIL_SAMPLE_INTERVAL,
            trail_capacity: MAX_TRAIL_POINTS,
            rotation_step: ROTATION_STEP,
        }
    }
}

impl SimConfig {
    /// Speed, step clamp and rotation step must be positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let settings = [
            ("speed", self.speed),
            ("max_step_dt", self.max_step_dt),
            ("rotation_step", self.rotation_step),
        ];
        for (field, value) in settings {
            if !(value.is_finite() && value > 0.0) {
                warn!(field, value, "rejected simulator config");
                return Err(ConfigError::InvalidSetting { field, value });
            }
        }
        Ok(())
    }
}

/// Result of one step or frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    /// Player pose after the step (`None` when no player is placed).
    pub pose: Option<Pose>,
    /// Whether the player actually moved.
    pub applied: bool,
    /// Wheel contacts recorded by this step, empty if none were sampled.
    pub trail_points: Vec<TrailPoint>,
}

impl StepOutcome {
    fn unchanged(pose: Option<Pose>) -> Self {
        Self {
            pose,
            applied: false,
            trail_points: Vec::new(),
        }
    }
}

/// The parking simulator.
pub struct ParkingSimulator {
    catalog: Arc<Catalog>,
    config: SimConfig,
    scene: Scene,
    control: ControlInput,
    trails: WheelTrails,
    clock: FrameClock,
    stats: DriveStats,
    command_queue: VecDeque<SceneCommand>,
}

impl ParkingSimulator {
    /// Create a simulator over the builtin catalog.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_catalog(Arc::new(Catalog::builtin()), config)
    }

    /// Create a simulator over a shared catalog. Fails on invalid tuning.
    pub fn with_catalog(catalog: Arc<Catalog>, config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            catalog,
            config,
            scene: Scene::new(),
            control: ControlInput::idle(),
            trails: WheelTrails::new(config.trail_sample_interval, config.trail_capacity),
            clock: FrameClock::new(),
            stats: DriveStats::default(),
            command_queue: VecDeque::new(),
        })
    }

    // --- Catalog ---

    pub fn list_vehicles(&self) -> &[Arc<VehicleSpec>] {
        self.catalog.list()
    }

    pub fn get_vehicle(&self, name: &str) -> Result<Arc<VehicleSpec>, ConfigError> {
        self.catalog.get(name)
    }

    // --- Placement ---

    /// Place a catalog vehicle as an obstacle.
    pub fn place_obstacle(&mut self, vehicle: &str, x: f64, y: f64) -> Result<VehicleId, ConfigError> {
        let spec = self.catalog.get(vehicle)?;
        self.scene.place_obstacle(spec, x, y)
    }

    /// Place an obstacle from an explicit spec (not necessarily in the catalog).
    pub fn place_obstacle_spec(
        &mut self,
        spec: Arc<VehicleSpec>,
        x: f64,
        y: f64,
    ) -> Result<VehicleId, ConfigError> {
        self.scene.place_obstacle(spec, x, y)
    }

    pub fn remove_obstacle(&mut self, id: VehicleId) -> bool {
        self.scene.remove_obstacle(id)
    }

    /// Place a catalog vehicle as the player, replacing the previous one.
    pub fn place_player(&mut self, vehicle: &str, x: f64, y: f64) -> Result<VehicleId, ConfigError> {
        let spec = self.catalog.get(vehicle)?;
        self.place_player_spec(spec, x, y)
    }

    /// Place the player from an explicit spec. Starts a fresh drive:
    /// trails are cleared and the time baseline dropped.
    pub fn place_player_spec(
        &mut self,
        spec: Arc<VehicleSpec>,
        x: f64,
        y: f64,
    ) -> Result<VehicleId, ConfigError> {
        let id = self.scene.place_player(spec, x, y)?;
        self.trails.clear();
        self.clock.reset();
        Ok(id)
    }

    pub fn rotate(&mut self, id: VehicleId, delta: f64) -> bool {
        self.scene.rotate(id, delta)
    }

    /// Rotate by one configured increment.
    pub fn rotate_step(&mut self, id: VehicleId, direction: RotationDirection) -> bool {
        self.scene.rotate(id, direction.sign() * self.config.rotation_step)
    }

    /// Replace the whole scene with a preset layout.
    pub fn load_scenario(&mut self, scenario: ScenarioId, seed: u64) -> Result<(), ConfigError> {
        self.stop_session();
        scenario::load(&mut self.scene, &self.catalog, scenario, seed)?;
        self.trails.clear();
        Ok(())
    }

    // --- Controls ---

    /// Replace the control input. Takes effect on the next step.
    pub fn set_control(&mut self, control: ControlInput) {
        if self.control.throttle && !control.throttle {
            self.clock.reset();
        }
        if self.control != control {
            debug!(?control, "control changed");
        }
        self.control = control;
    }

    pub fn set_steer(&mut self, steer: SteerDirection) {
        self.set_control(ControlInput { steer, ..self.control });
    }

    pub fn set_gear(&mut self, gear: Gear) {
        self.set_control(ControlInput { gear, ..self.control });
    }

    pub fn set_throttle(&mut self, throttle: bool) {
        self.set_control(ControlInput {
            throttle,
            ..self.control
        });
    }

    pub fn control(&self) -> ControlInput {
        self.control
    }

    pub fn drive_state(&self) -> DriveState {
        snapshot::drive_state(&self.control)
    }

    /// Leave drive mode: release the throttle and drop the time baseline.
    pub fn stop_session(&mut self) {
        if self.control.throttle {
            info!("drive session stopped");
        }
        self.control.throttle = false;
        self.clock.reset();
    }

    pub fn clear_trails(&mut self) {
        self.trails.clear();
    }

    // --- Simulation ---

    /// Advance the player by `dt` seconds under the current control input.
    ///
    /// No-op (pose unchanged, no trail points) when there is no player, the
    /// throttle is released, or `dt` is not a positive finite number.
    /// Deltas above `max_step_dt` are clamped.
    pub fn step(&mut self, dt: f64) -> StepOutcome {
        let Some(player) = self.scene.player() else {
            trace!("step ignored: no player");
            return StepOutcome::unchanged(None);
        };
        if !self.control.throttle {
            return StepOutcome::unchanged(Some(player.pose));
        }
        if !(dt.is_finite() && dt > 0.0) {
            debug!(dt, "step ignored: invalid delta");
            return StepOutcome::unchanged(Some(player.pose));
        }

        let dt = dt.min(self.config.max_step_dt);
        let next = kinematics::advance(player.pose, &player.spec, &self.control, dt, self.config.speed);
        self.scene.set_player_pose(next);
        self.stats.steps += 1;
        self.stats.drive_time_secs += dt;

        let trail_points = self
            .trails
            .record_step(kinematics::wheel_contacts(&next, &player.spec))
            .map(Vec::from)
            .unwrap_or_default();

        StepOutcome {
            pose: Some(next),
            applied: true,
            trail_points,
        }
    }

    /// Run one display frame at wall-clock time `now_secs`: apply queued
    /// commands, then step by the time since the previous frame.
    ///
    /// The first frame of a drive only sets the time baseline.
    pub fn frame(&mut self, now_secs: f64) -> StepOutcome {
        self.process_commands();

        if !self.control.throttle || self.scene.player().is_none() {
            self.clock.reset();
            return StepOutcome::unchanged(self.player_pose());
        }

        match self.clock.tick(now_secs) {
            Some(dt) => self.step(dt),
            None => StepOutcome::unchanged(self.player_pose()),
        }
    }

    // --- Commands ---

    /// Queue a command for the next frame boundary.
    pub fn queue_command(&mut self, command: SceneCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SceneCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply one command immediately.
    pub fn handle_command(&mut self, command: SceneCommand) -> Result<(), ConfigError> {
        match command {
            SceneCommand::PlaceObstacle { vehicle, x, y } => {
                self.place_obstacle(&vehicle, x, y)?;
            }
            SceneCommand::RemoveObstacle { id } => {
                self.remove_obstacle(id);
            }
            SceneCommand::PlacePlayer { vehicle, x, y } => {
                self.place_player(&vehicle, x, y)?;
            }
            SceneCommand::Rotate { id, delta } => {
                self.rotate(id, delta);
            }
            SceneCommand::RotateStep { id, direction } => {
                self.rotate_step(id, direction);
            }
            SceneCommand::LoadScenario { scenario, seed } => {
                self.load_scenario(scenario, seed)?;
            }
            SceneCommand::SetControl {
                steer,
                gear,
                throttle,
            } => self.set_control(ControlInput::new(steer, gear, throttle)),
            SceneCommand::SetSteer { steer } => self.set_steer(steer),
            SceneCommand::SetGear { gear } => self.set_gear(gear),
            SceneCommand::SetThrottle { throttle } => self.set_throttle(throttle),
            SceneCommand::StopSession => self.stop_session(),
            SceneCommand::ClearTrails => self.clear_trails(),
        }
        Ok(())
    }

    /// Apply all queued commands. A rejected command is logged and skipped;
    /// it never interrupts the frame.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(e) = self.handle_command(command) {
                warn!("command rejected: {e}");
            }
        }
    }

    // --- Queries ---

    pub fn player_pose(&self) -> Option<Pose> {
        self.scene.player().map(|p| p.pose)
    }

    /// Obstacles the player currently overlaps, ordered by id.
    pub fn player_collisions(&self) -> Vec<VehicleId> {
        let obstacles = self.scene.obstacles();
        let mut ids: Vec<VehicleId> =
            snapshot::colliding_obstacles(self.scene.player().as_ref(), &obstacles)
                .into_iter()
                .collect();
        ids.sort();
        ids
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        snapshot::build_snapshot(&self.scene, &self.trails, self.control, self.stats)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn trails(&self) -> &WheelTrails {
        &self.trails
    }
}
