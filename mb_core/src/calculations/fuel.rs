//! # Fuel Loading
//!
//! Derives fuel weight and volume for a load sheet.
//!
//! In auto mode the aircraft is filled with as much fuel as it can legally
//! carry: the useful load left under MTOW after everything else is loaded,
//! capped by the tank. Whichever constraint bites first is reported in
//! [`FuelState::limited_by`]. In manual mode the entered volume is taken as
//! is, even past the tank or MTOW; those breaches surface as alerts.
//!
//! ## Example
//!
//! ```rust
//! use mb_core::aircraft::Fleet;
//! use mb_core::calculations::{compute_fuel, FuelLimit, LoadInput};
//!
//! let fleet = Fleet::builtin().unwrap();
//! let tecnam = fleet.get("Tecnam P2008").unwrap();
//! let loads = LoadInput::new(430.0, 1.86, 150.0).with_baggage(10.0);
//!
//! let fuel = compute_fuel(tecnam, &loads);
//! assert_eq!(fuel.limited_by, FuelLimit::MaximumWeight);
//! assert!((fuel.weight - 60.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::load::{FuelLoad, LoadInput};
use crate::aircraft::AircraftProfile;

/// The constraint that fixed the fuel quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelLimit {
    /// Useful load under MTOW ran out before the tank was full
    MaximumWeight,
    /// Tank is full with useful load to spare
    TankCapacity,
    /// Pilot entered the volume
    ManualEntry,
}

impl FuelLimit {
    pub fn description(&self) -> &'static str {
        match self {
            FuelLimit::MaximumWeight => "Limited by maximum weight",
            FuelLimit::TankCapacity => "Limited by tank capacity",
            FuelLimit::ManualEntry => "Manual entry",
        }
    }
}

impl std::fmt::Display for FuelLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Fuel quantity carried in a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelState {
    /// Fuel weight (profile weight unit)
    pub weight: f64,
    /// Fuel volume (profile volume unit)
    pub volume: f64,
    /// What determined the quantity
    pub limited_by: FuelLimit,
}

/// Derive fuel for the mode carried in `loads.fuel`.
pub fn compute_fuel(profile: &AircraftProfile, loads: &LoadInput) -> FuelState {
    match loads.fuel {
        FuelLoad::Manual { volume } => FuelState {
            weight: volume * profile.fuel_density,
            volume,
            limited_by: FuelLimit::ManualEntry,
        },
        FuelLoad::AutoMax => auto_max_fuel(profile, loads),
    }
}

fn auto_max_fuel(profile: &AircraftProfile, loads: &LoadInput) -> FuelState {
    // Negative useful load means the aircraft is already over MTOW: no fuel
    let useful_load = (profile.max_takeoff_weight - loads.zero_fuel_weight()).max(0.0);
    let tank_capacity_weight = profile.tank_capacity_weight();

    if useful_load <= tank_capacity_weight {
        let volume = if profile.fuel_density > 0.0 {
            useful_load / profile.fuel_density
        } else {
            0.0
        };
        FuelState {
            weight: useful_load,
            volume,
            limited_by: FuelLimit::MaximumWeight,
        }
    } else {
        FuelState {
            weight: tank_capacity_weight,
            volume: profile.max_fuel_volume,
            limited_by: FuelLimit::TankCapacity,
        }
    }
}
