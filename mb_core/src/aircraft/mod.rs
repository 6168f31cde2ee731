//! # Aircraft Profiles
//!
//! Static mass & balance reference data, one [`AircraftProfile`] per type.
//! Profiles are built once (from the embedded table or a user file) and are
//! immutable afterwards; every calculation borrows them.
//!
//! ## Baggage Layout
//!
//! Some aircraft have a single baggage compartment, others two areas with
//! their own arm and limit. That difference is a [`BaggageLayout`] variant,
//! so a profile can never pair a single arm with two limits.
//!
//! ## Example
//!
//! ```rust
//! use mb_core::aircraft::Fleet;
//!
//! let fleet = Fleet::builtin().unwrap();
//! let tecnam = fleet.get("Tecnam P2008").unwrap();
//! assert!(!tecnam.baggage.is_split());
//! assert_eq!(tecnam.units.weight, "kg");
//! ```

pub mod fleet;
pub mod record;

pub use fleet::Fleet;
pub use record::{OneOrTwo, ProfileRecord};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Units;

/// A single baggage compartment: lever arm and structural weight limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Compartment {
    /// Lever arm from the datum
    pub arm: f64,
    /// Maximum weight placarded for this compartment
    pub max_weight: f64,
}

impl Compartment {
    pub fn new(arm: f64, max_weight: f64) -> Self {
        Compartment { arm, max_weight }
    }
}

/// Baggage compartment arrangement of an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum BaggageLayout {
    /// One compartment (e.g. Tecnam P2008)
    Single(Compartment),
    /// Two areas, each with its own arm and limit, optionally sharing a
    /// combined ceiling (e.g. Cessna 150/152: 120 lb + 40 lb, 120 lb total)
    Split {
        area1: Compartment,
        area2: Compartment,
        combined_max_weight: Option<f64>,
    },
}

impl BaggageLayout {
    /// True when the aircraft has two baggage areas
    pub fn is_split(&self) -> bool {
        matches!(self, BaggageLayout::Split { .. })
    }

    /// Number of baggage rows this layout produces in a load sheet
    pub fn compartment_count(&self) -> usize {
        match self {
            BaggageLayout::Single(_) => 1,
            BaggageLayout::Split { .. } => 2,
        }
    }

    /// Combined ceiling across both areas, if the aircraft has one
    pub fn combined_limit(&self) -> Option<f64> {
        match self {
            BaggageLayout::Single(_) => None,
            BaggageLayout::Split {
                combined_max_weight, ..
            } => *combined_max_weight,
        }
    }
}

/// Forward and aft limits of the certified CG range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgEnvelope {
    /// Forward limit
    pub min: f64,
    /// Aft limit
    pub max: f64,
}

impl CgEnvelope {
    pub fn new(min: f64, max: f64) -> Self {
        CgEnvelope { min, max }
    }

    /// Inclusive containment check
    pub fn contains(&self, cg: f64) -> bool {
        cg >= self.min && cg <= self.max
    }

    /// Envelope width (aft limit minus forward limit)
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Mass & balance reference data for one aircraft type.
///
/// Deserialization goes through [`ProfileRecord`], so a profile read from
/// JSON or TOML has always passed [`AircraftProfile::validate`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Tecnam P2008",
///   "fuel_arm": 2.209,
///   "pilot_arm": 1.8,
///   "baggage_arm": 2.417,
///   "max_takeoff_weight": 650.0,
///   "max_fuel_volume": 124.0,
///   "max_passenger_weight": 230.0,
///   "max_baggage_weight": 20.0,
///   "cg_limits": [1.841, 1.978],
///   "fuel_density": 0.72,
///   "units": { "weight": "kg", "arm": "m", "volume": "L" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileRecord", into = "ProfileRecord")]
pub struct AircraftProfile {
    /// Display name, also the lookup key in a [`Fleet`]
    pub name: String,

    /// Fuel tank arm
    pub fuel_arm: f64,

    /// Pilot & passenger seat arm
    pub pilot_arm: f64,

    /// Baggage compartment(s)
    pub baggage: BaggageLayout,

    /// Maximum takeoff weight
    pub max_takeoff_weight: f64,

    /// Usable tank capacity (volume units)
    pub max_fuel_volume: f64,

    /// Seat load ceiling, absent on aircraft without one
    pub max_passenger_weight: Option<f64>,

    /// Certified CG range, absent when no envelope check is performed
    pub cg_limits: Option<CgEnvelope>,

    /// Weight units per volume unit
    pub fuel_density: f64,

    /// Display labels
    pub units: Units,
}

impl AircraftProfile {
    /// Tank capacity expressed as weight
    pub fn tank_capacity_weight(&self) -> f64 {
        self.max_fuel_volume * self.fuel_density
    }

    /// Check the data-model invariants.
    ///
    /// Shape invariants of the baggage data are enforced by the type; this
    /// covers the numeric ones a bad table can still break.
    pub fn validate(&self) -> CalcResult<()> {
        let name = self.name.as_str();

        if self.name.trim().is_empty() {
            return Err(CalcError::invalid_profile("<unnamed>", "name", "Aircraft name is empty"));
        }
        for (field, value) in [
            ("fuel_arm", self.fuel_arm),
            ("pilot_arm", self.pilot_arm),
        ] {
            if !value.is_finite() {
                return Err(CalcError::invalid_profile(name, field, format!("Arm must be finite, got {value}")));
            }
        }
        if !(self.fuel_density > 0.0) {
            return Err(CalcError::invalid_profile(
                name,
                "fuel_density",
                format!("Fuel density must be positive, got {}", self.fuel_density),
            ));
        }
        if !(self.max_takeoff_weight > 0.0) {
            return Err(CalcError::invalid_profile(
                name,
                "max_takeoff_weight",
                format!("Maximum takeoff weight must be positive, got {}", self.max_takeoff_weight),
            ));
        }
        if !(self.max_fuel_volume > 0.0) {
            return Err(CalcError::invalid_profile(
                name,
                "max_fuel_volume",
                format!("Tank capacity must be positive, got {}", self.max_fuel_volume),
            ));
        }
        if let Some(limit) = self.max_passenger_weight {
            if !(limit > 0.0) {
                return Err(CalcError::invalid_profile(
                    name,
                    "max_passenger_weight",
                    format!("Seat limit must be positive when present, got {limit}"),
                ));
            }
        }

        match &self.baggage {
            BaggageLayout::Single(compartment) => validate_compartment(name, "baggage", compartment)?,
            BaggageLayout::Split {
                area1,
                area2,
                combined_max_weight,
            } => {
                validate_compartment(name, "baggage area 1", area1)?;
                validate_compartment(name, "baggage area 2", area2)?;
                if let Some(combined) = combined_max_weight {
                    if !(*combined > 0.0) {
                        return Err(CalcError::invalid_profile(
                            name,
                            "combined_max_baggage_weight",
                            format!("Combined baggage limit must be positive, got {combined}"),
                        ));
                    }
                }
            }
        }

        if let Some(envelope) = &self.cg_limits {
            if !(envelope.min.is_finite() && envelope.max.is_finite() && envelope.min < envelope.max) {
                return Err(CalcError::invalid_profile(
                    name,
                    "cg_limits",
                    format!(
                        "Forward limit must be below aft limit, got {} to {}",
                        envelope.min, envelope.max
                    ),
                ));
            }
        }

        Ok(())
    }
}

fn validate_compartment(aircraft: &str, field: &str, compartment: &Compartment) -> CalcResult<()> {
    if !compartment.arm.is_finite() {
        return Err(CalcError::invalid_profile(aircraft, field, "Arm must be finite"));
    }
    if !(compartment.max_weight >= 0.0) {
        return Err(CalcError::invalid_profile(
            aircraft,
            field,
            format!("Weight limit cannot be negative, got {}", compartment.max_weight),
        ));
    }
    Ok(())
}
