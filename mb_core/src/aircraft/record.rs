//! Raw reference-table records.
//!
//! Reference tables describe baggage as either a scalar or an
//! `[area 1, area 2]` pair, for both the arm and the limit. A
//! [`ProfileRecord`] holds that flat shape as written; converting it into an
//! [`AircraftProfile`] is where the shape invariant is checked.

use serde::{Deserialize, Serialize};

use super::{AircraftProfile, BaggageLayout, CgEnvelope, Compartment};
use crate::errors::CalcError;
use crate::units::Units;

/// A scalar or a two-element array in a reference table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrTwo {
    One(f64),
    Two([f64; 2]),
}

impl OneOrTwo {
    fn shape(&self) -> &'static str {
        match self {
            OneOrTwo::One(_) => "a single value",
            OneOrTwo::Two(_) => "a pair",
        }
    }
}

/// One aircraft entry exactly as it appears in a reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub fuel_arm: f64,
    pub pilot_arm: f64,
    pub baggage_arm: OneOrTwo,
    pub max_takeoff_weight: f64,
    pub max_fuel_volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_passenger_weight: Option<f64>,
    pub max_baggage_weight: OneOrTwo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_max_baggage_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cg_limits: Option<[f64; 2]>,
    pub fuel_density: f64,
    pub units: Units,
}

impl TryFrom<ProfileRecord> for AircraftProfile {
    type Error = CalcError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        let baggage = match (record.baggage_arm, record.max_baggage_weight) {
            (OneOrTwo::One(arm), OneOrTwo::One(max_weight)) => {
                if record.combined_max_baggage_weight.is_some() {
                    return Err(CalcError::invalid_profile(
                        &record.name,
                        "combined_max_baggage_weight",
                        "A combined baggage limit needs two baggage areas",
                    ));
                }
                BaggageLayout::Single(Compartment::new(arm, max_weight))
            }
            (OneOrTwo::Two([arm1, arm2]), OneOrTwo::Two([max1, max2])) => BaggageLayout::Split {
                area1: Compartment::new(arm1, max1),
                area2: Compartment::new(arm2, max2),
                combined_max_weight: record.combined_max_baggage_weight,
            },
            (arm, limit) => {
                return Err(CalcError::invalid_profile(
                    &record.name,
                    "baggage_arm",
                    format!(
                        "baggage_arm is {} but max_baggage_weight is {}",
                        arm.shape(),
                        limit.shape()
                    ),
                ));
            }
        };

        let profile = AircraftProfile {
            name: record.name,
            fuel_arm: record.fuel_arm,
            pilot_arm: record.pilot_arm,
            baggage,
            max_takeoff_weight: record.max_takeoff_weight,
            max_fuel_volume: record.max_fuel_volume,
            max_passenger_weight: record.max_passenger_weight,
            cg_limits: record.cg_limits.map(|[min, max]| CgEnvelope::new(min, max)),
            fuel_density: record.fuel_density,
            units: record.units.normalized(),
        };
        profile.validate()?;
        Ok(profile)
    }
}

impl From<AircraftProfile> for ProfileRecord {
    fn from(profile: AircraftProfile) -> Self {
        let (baggage_arm, max_baggage_weight, combined_max_baggage_weight) = match profile.baggage {
            BaggageLayout::Single(c) => (OneOrTwo::One(c.arm), OneOrTwo::One(c.max_weight), None),
            BaggageLayout::Split {
                area1,
                area2,
                combined_max_weight,
            } => (
                OneOrTwo::Two([area1.arm, area2.arm]),
                OneOrTwo::Two([area1.max_weight, area2.max_weight]),
                combined_max_weight,
            ),
        };

        ProfileRecord {
            name: profile.name,
            fuel_arm: profile.fuel_arm,
            pilot_arm: profile.pilot_arm,
            baggage_arm,
            max_takeoff_weight: profile.max_takeoff_weight,
            max_fuel_volume: profile.max_fuel_volume,
            max_passenger_weight: profile.max_passenger_weight,
            max_baggage_weight,
            combined_max_baggage_weight,
            cg_limits: profile.cg_limits.map(|e| [e.min, e.max]),
            fuel_density: profile.fuel_density,
            units: profile.units,
        }
    }
}
