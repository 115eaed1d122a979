//! Vehicle catalog: a static table of real vehicles and their dimensions.
//!
//! Pure data. The only derived quantity the simulation needs is the
//! turning radius, computed from each `VehicleSpec` on demand.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::INCHES_PER_FOOT;
use crate::error::ConfigError;

/// Physical description of one vehicle model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub name: String,
    pub length_inches: f64,
    pub width_inches: f64,
    pub wheelbase_inches: f64,
    /// Curb-to-curb turning diameter.
    pub turning_circle_feet: f64,
    /// Cosmetic only (`#rrggbb`).
    pub display_color: String,
}

/// Compiled-in catalog row.
struct VehicleRecord {
    name: &'static str,
    length_inches: f64,
    width_inches: f64,
    wheelbase_inches: f64,
    turning_circle_feet: f64,
    display_color: &'static str,
}

const BUILTIN_VEHICLES: &[VehicleRecord] = &[
    VehicleRecord {
        name: "Toyota Corolla",
        length_inches: 182.3,
        width_inches: 70.1,
        wheelbase_inches: 106.3,
        turning_circle_feet: 34.8,
        display_color: "#c0392b",
    },
    VehicleRecord {
        name: "Honda Civic",
        length_inches: 184.0,
        width_inches: 70.9,
        wheelbase_inches: 107.7,
        turning_circle_feet: 38.1,
        display_color: "#2980b9",
    },
    VehicleRecord {
        name: "Mini Cooper",
        length_inches: 152.2,
        width_inches: 68.0,
        wheelbase_inches: 98.2,
        turning_circle_feet: 35.4,
        display_color: "#27ae60",
    },
    VehicleRecord {
        name: "Tesla Model 3",
        length_inches: 184.8,
        width_inches: 72.8,
        wheelbase_inches: 113.2,
        turning_circle_feet: 38.8,
        display_color: "#ecf0f1",
    },
    VehicleRecord {
        name: "Toyota RAV4",
        length_inches: 180.9,
        width_inches: 73.0,
        wheelbase_inches: 105.9,
        turning_circle_feet: 36.1,
        display_color: "#7f8c8d",
    },
    VehicleRecord {
        name: "Honda Odyssey",
        length_inches: 205.2,
        width_inches: 78.5,
        wheelbase_inches: 118.1,
        turning_circle_feet: 38.1,
        display_color: "#8e44ad",
    },
    VehicleRecord {
        name: "Ford F-150",
        length_inches: 231.7,
        width_inches: 79.9,
        wheelbase_inches: 145.4,
        turning_circle_feet: 47.8,
        display_color: "#2c3e50",
    },
    VehicleRecord {
        name: "Chevrolet Suburban",
        length_inches: 225.7,
        width_inches: 81.1,
        wheelbase_inches: 134.1,
        turning_circle_feet: 42.0,
        display_color: "#d35400",
    },
];

impl VehicleRecord {
    fn to_spec(&self) -> VehicleSpec {
        VehicleSpec {
            name: self.name.to_string(),
            length_inches: self.length_inches,
            width_inches: self.width_inches,
            wheelbase_inches: self.wheelbase_inches,
            turning_circle_feet: self.turning_circle_feet,
            display_color: self.display_color.to_string(),
        }
    }
}

impl VehicleSpec {
    /// Radius of the turning circle (feet). The single curvature parameter.
    pub fn turning_radius_feet(&self) -> f64 {
        self.turning_circle_feet / 2.0
    }

    pub fn length_feet(&self) -> f64 {
        self.length_inches / INCHES_PER_FOOT
    }

    pub fn width_feet(&self) -> f64 {
        self.width_inches / INCHES_PER_FOOT
    }

    pub fn wheelbase_feet(&self) -> f64 {
        self.wheelbase_inches / INCHES_PER_FOOT
    }

    /// Reject any non-positive or non-finite dimension.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("length_inches", self.length_inches),
            ("width_inches", self.width_inches),
            ("wheelbase_inches", self.wheelbase_inches),
            ("turning_circle_feet", self.turning_circle_feet),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveDimension {
                    vehicle: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Immutable, ordered set of vehicle specs.
#[derive(Debug, Clone)]
pub struct Catalog {
    vehicles: Vec<Arc<VehicleSpec>>,
}

impl Catalog {
    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        Self {
            vehicles: BUILTIN_VEHICLES
                .iter()
                .map(|record| Arc::new(record.to_spec()))
                .collect(),
        }
    }

    /// Build a catalog from arbitrary specs, validating each one.
    pub fn from_specs(specs: Vec<VehicleSpec>) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for spec in &specs {
            spec.validate()?;
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicateVehicle(spec.name.clone()));
            }
        }

        Ok(Self {
            vehicles: specs.into_iter().map(Arc::new).collect(),
        })
    }

    /// All vehicles in catalog order.
    pub fn list(&self) -> &[Arc<VehicleSpec>] {
        &self.vehicles
    }

    /// Look up a vehicle by exact name.
    pub fn get(&self, name: &str) -> Result<Arc<VehicleSpec>, ConfigError> {
        self.vehicles
            .iter()
            .find(|spec| spec.name == name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownVehicle(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
