//! Configuration errors.
//!
//! These are the only failures the simulator surfaces. Frame-timing
//! anomalies and unknown-id user actions are absorbed as no-ops instead.

use std::fmt;

/// A malformed vehicle definition, a catalog lookup miss, or bad simulator tuning.
///
/// Treated as fatal by callers: a session must not start on a bad config.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No vehicle with this name exists in the catalog.
    UnknownVehicle(String),
    /// A dimension or the turning circle is zero, negative, or not finite.
    NonPositiveDimension {
        vehicle: String,
        field: &'static str,
        value: f64,
    },
    /// A catalog was built from an empty list.
    EmptyCatalog,
    /// Two catalog entries share a name.
    DuplicateVehicle(String),
    /// A simulator tuning value is zero, negative, or not finite.
    InvalidSetting { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownVehicle(name) => write!(f, "Unknown vehicle: {name}"),
            ConfigError::NonPositiveDimension {
                vehicle,
                field,
                value,
            } => write!(
                f,
                "Vehicle '{vehicle}' has invalid {field}: {value} (must be positive)"
            ),
            ConfigError::EmptyCatalog => write!(f, "Vehicle catalog is empty"),
            ConfigError::DuplicateVehicle(name) => {
                write!(f, "Vehicle catalog lists '{name}' more than once")
            }
            ConfigError::InvalidSetting { field, value } => {
                write!(f, "Simulator setting {field} is invalid: {value} (must be positive)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
