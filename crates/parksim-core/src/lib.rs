//! Core types and definitions for the PARKSIM parking simulator.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometric types, control input, commands, snapshots, constants,
//! errors, and the static vehicle catalog.
//! It has no dependency on any runtime or rendering framework.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
