//! Simulation engine for PARKSIM.
//!
//! Owns the hecs scene of placed vehicles, advances the player with the
//! kinematic bicycle model, records wheel trails, and produces
//! `SceneSnapshot`s for a renderer.

pub mod clock;
pub mod engine;
pub mod scenario;
pub mod scene;
pub mod systems;

pub use engine::{ParkingSimulator, SimConfig, StepOutcome};
pub use parksim_core as core;
