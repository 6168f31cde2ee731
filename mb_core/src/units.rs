//! # Unit Labels
//!
//! Each aircraft profile carries its own unit system: the Tecnam is
//! certified in kilograms, metres and litres, the Cessnas in pounds, inches
//! and US gallons. Values are never converted between systems; the labels
//! exist only so that every number shown to a pilot carries the unit it was
//! entered in.
//!
//! ## Example
//!
//! ```rust
//! use mb_core::units::Units;
//!
//! let units = Units::new("kg", "m");
//! assert_eq!(units.volume, "L");
//! assert_eq!(units.moment(), "kg·m");
//! ```

use serde::{Deserialize, Serialize};

/// Display labels for a profile's weight, arm and fuel volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    /// Weight unit (e.g. "kg", "lb")
    pub weight: String,

    /// Arm distance unit (e.g. "m", "in")
    pub arm: String,

    /// Fuel volume unit (e.g. "L", "gal")
    #[serde(default)]
    pub volume: String,
}

impl Units {
    /// Create a unit set, deriving the volume label from the weight unit.
    pub fn new(weight: impl Into<String>, arm: impl Into<String>) -> Self {
        let weight = weight.into();
        let volume = default_volume_label(&weight).to_string();
        Units {
            weight,
            arm: arm.into(),
            volume,
        }
    }

    /// Create a unit set with an explicit volume label.
    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.volume = volume.into();
        self
    }

    /// Moment label, weight times arm (e.g. "lb·in")
    pub fn moment(&self) -> String {
        format!("{}·{}", self.weight, self.arm)
    }

    /// Fill in a missing volume label from the weight unit.
    pub(crate) fn normalized(mut self) -> Self {
        if self.volume.trim().is_empty() {
            self.volume = default_volume_label(&self.weight).to_string();
        }
        self
    }
}

/// Metric aircraft are fuelled in litres, imperial ones in US gallons.
fn default_volume_label(weight_unit: &str) -> &'static str {
    if weight_unit.eq_ignore_ascii_case("kg") {
        "L"
    } else {
        "gal"
    }
}
