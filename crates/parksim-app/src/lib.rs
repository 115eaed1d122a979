//! PARKSIM headless application.
//!
//! Wires the simulator to a real-time drive loop thread and to scripted
//! replays. The `parksim` binary exposes both through a command line.

pub mod game_loop;
pub mod script;
pub mod state;

pub use parksim_core as core;
