//! Systems that operate on the scene each frame.
//!
//! Systems are plain functions and small state holders. Vehicle state
//! lives in the scene's ECS world, not here.

pub mod collision;
pub mod kinematics;
pub mod snapshot;
pub mod trails;
