//! Aircraft profile table.
//!
//! The built-in table is embedded from `data/aircraft.toml` and parsed on
//! first use. User tables in TOML or JSON use the same record format:
//!
//! ```toml
//! [[aircraft]]
//! name = "Tecnam P2008"
//! fuel_arm = 2.209
//! pilot_arm = 1.800
//! baggage_arm = 2.417
//! max_takeoff_weight = 650.0
//! max_fuel_volume = 124.0
//! max_baggage_weight = 20.0
//! fuel_density = 0.72
//! units = { weight = "kg", arm = "m" }
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{AircraftProfile, ProfileRecord};
use crate::errors::{CalcError, CalcResult};

const BUILTIN_TABLE: &str = include_str!("../../data/aircraft.toml");

static BUILTIN_FLEET: Lazy<CalcResult<Fleet>> = Lazy::new(|| Fleet::from_toml_str(BUILTIN_TABLE));

/// On-disk layout of a profile table
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FleetFile {
    aircraft: Vec<ProfileRecord>,
}

/// An ordered, validated set of aircraft profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    profiles: Vec<AircraftProfile>,
}

impl Fleet {
    /// The embedded training-fleet table.
    pub fn builtin() -> CalcResult<&'static Fleet> {
        BUILTIN_FLEET.as_ref().map_err(Clone::clone)
    }

    /// Build a fleet from already-constructed profiles, validating each one.
    pub fn from_profiles(profiles: Vec<AircraftProfile>) -> CalcResult<Self> {
        if profiles.is_empty() {
            return Err(CalcError::invalid_config("aircraft", "Profile table contains no aircraft"));
        }
        for (i, profile) in profiles.iter().enumerate() {
            profile.validate()?;
            if profiles[..i].iter().any(|p| lookup_key(&p.name) == lookup_key(&profile.name)) {
                return Err(CalcError::invalid_profile(
                    &profile.name,
                    "name",
                    "Aircraft listed more than once",
                ));
            }
        }
        Ok(Fleet { profiles })
    }

    /// Parse a TOML profile table.
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let file: FleetFile = toml::from_str(source).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid aircraft table: {}", e),
        })?;
        Self::from_records(file.aircraft, "toml")
    }

    /// Parse a JSON profile table (`{"aircraft": [...]}`).
    pub fn from_json_str(source: &str) -> CalcResult<Self> {
        let file: FleetFile = serde_json::from_str(source).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid aircraft table: {}", e),
        })?;
        Self::from_records(file.aircraft, "json")
    }

    fn from_records(records: Vec<ProfileRecord>, format: &str) -> CalcResult<Self> {
        let profiles = records
            .into_iter()
            .map(AircraftProfile::try_from)
            .collect::<CalcResult<Vec<_>>>()?;
        let fleet = Self::from_profiles(profiles)?;
        info!(count = fleet.len(), format, "Loaded aircraft table");
        Ok(fleet)
    }

    /// Look up a profile by name.
    ///
    /// Matching ignores case, spaces, dashes and underscores, so
    /// `"cessna-152"` finds `"Cessna 152"`.
    pub fn get(&self, name: &str) -> CalcResult<&AircraftProfile> {
        let key = lookup_key(name);
        self.profiles
            .iter()
            .find(|p| lookup_key(&p.name) == key)
            .ok_or_else(|| CalcError::aircraft_not_found(name))
    }

    /// Aircraft names in table order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    pub fn profiles(&self) -> &[AircraftProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Serialize back to the TOML record format.
    pub fn to_toml_string(&self) -> CalcResult<String> {
        let file = FleetFile {
            aircraft: self.profiles.iter().cloned().map(ProfileRecord::from).collect(),
        };
        toml::to_string_pretty(&file).map_err(|e| CalcError::serialization(e.to_string()))
    }
}

fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::BaggageLayout;

    #[test]
    fn test_builtin_table_loads() {
        let fleet = Fleet::builtin().unwrap();
        let names: Vec<_> = fleet.names().collect();
        assert_eq!(names, vec!["Tecnam P2008", "Cessna 150", "Cessna 152"]);
    }

    #[test]
    fn test_builtin_profiles_match_reference_numbers() {
        let fleet = Fleet::builtin().unwrap();

        let tecnam = fleet.get("Tecnam P2008").unwrap();
        assert_eq!(tecnam.max_takeoff_weight, 650.0);
        assert_eq!(tecnam.max_passenger_weight, Some(230.0));
        assert!(matches!(tecnam.baggage, BaggageLayout::Single(c) if c.max_weight == 20.0));

        let c150 = fleet.get("Cessna 150").unwrap();
        assert!(c150.cg_limits.is_none());
        assert_eq!(c150.baggage.combined_limit(), Some(120.0));

        let c152 = fleet.get("Cessna 152").unwrap();
        assert_eq!(c152.max_fuel_volume, 26.0);
        assert_eq!(c152.units.volume, "gal");
    }

    #[test]
    fn test_flexible_lookup() {
        let fleet = Fleet::builtin().unwrap();
        assert_eq!(fleet.get("cessna-152").unwrap().name, "Cessna 152");
        assert_eq!(fleet.get("TECNAM_P2008").unwrap().name, "Tecnam P2008");
        let err = fleet.get("Piper Cub").unwrap_err();
        assert_eq!(err.error_code(), "AIRCRAFT_NOT_FOUND");
    }

    #[test]
    fn test_toml_roundtrip() {
        let fleet = Fleet::builtin().unwrap();
        let toml = fleet.to_toml_string().unwrap();
        let reparsed = Fleet::from_toml_str(&toml).unwrap();
        assert_eq!(&reparsed, fleet);
    }

    #[test]
    fn test_json_table_with_missing_volume_label() {
        let json = r#"{
            "aircraft": [{
                "name": "Test Single",
                "fuel_arm": 2.2,
                "pilot_arm": 1.8,
                "baggage_arm": 2.4,
                "max_takeoff_weight": 600,
                "max_fuel_volume": 100,
                "max_baggage_weight": 20,
                "fuel_density": 0.72,
                "units": {"weight": "kg", "arm": "m"}
            }]
        }"#;
        let fleet = Fleet::from_json_str(json).unwrap();
        let profile = fleet.get("test single").unwrap();
        assert_eq!(profile.units.volume, "L");
        assert_eq!(profile.max_passenger_weight, None);
    }

    #[test]
    fn test_shape_mismatch_in_table_fails_loudly() {
        let toml = r#"
            [[aircraft]]
            name = "Broken"
            fuel_arm = 42.0
            pilot_arm = 39.0
            baggage_arm = [64.0, 84.0]
            max_takeoff_weight = 1670.0
            max_fuel_volume = 26.0
            max_baggage_weight = 120.0
            fuel_density = 6.0
            units = { weight = "lb", arm = "in" }
        "#;
        let err = Fleet::from_toml_str(toml).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let fleet = Fleet::builtin().unwrap();
        let mut profiles = fleet.profiles().to_vec();
        profiles.push(profiles[0].clone());
        assert!(Fleet::from_profiles(profiles).is_err());
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(Fleet::from_toml_str("aircraft = []").is_err());
    }
}
