//! # Load Input
//!
//! Per-calculation user loads. A [`LoadInput`] is built fresh for every
//! recalculation and never mutated by the calculator.
//!
//! ## JSON Example (split baggage, manual fuel)
//!
//! ```json
//! {
//!   "empty_weight": 1111.0,
//!   "empty_weight_arm": 33.4,
//!   "pilot_passenger_weight": 340.0,
//!   "baggage": { "area1": 40.0, "area2": 10.0 },
//!   "fuel": { "mode": "manual", "volume": 20.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::aircraft::{BaggageLayout, Compartment};

/// Which fuel policy a calculation uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelMode {
    /// Fill to whichever of MTOW or tank capacity is reached first
    AutoMax,
    /// Use the volume the pilot entered
    Manual,
}

/// Fuel part of the user input: the mode, plus the volume in manual mode.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FuelLoad {
    #[default]
    AutoMax,
    Manual { volume: f64 },
}

impl FuelLoad {
    pub fn mode(&self) -> FuelMode {
        match self {
            FuelLoad::AutoMax => FuelMode::AutoMax,
            FuelLoad::Manual { .. } => FuelMode::Manual,
        }
    }
}

/// Baggage weights: one value, or one per area.
///
/// Serializes as a bare number or as `{"area1": .., "area2": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BaggageLoad {
    Single(f64),
    Split { area1: f64, area2: f64 },
}

impl Default for BaggageLoad {
    fn default() -> Self {
        BaggageLoad::Single(0.0)
    }
}

impl BaggageLoad {
    /// Sum of all baggage weight
    pub fn total(&self) -> f64 {
        match self {
            BaggageLoad::Single(w) => *w,
            BaggageLoad::Split { area1, area2 } => area1 + area2,
        }
    }

    /// True when this load has the same shape as the aircraft's compartments
    pub fn fits(&self, layout: &BaggageLayout) -> bool {
        matches!(
            (self, layout),
            (BaggageLoad::Single(_), BaggageLayout::Single(_))
                | (BaggageLoad::Split { .. }, BaggageLayout::Split { .. })
        )
    }

    pub(crate) fn shape_name(&self) -> &'static str {
        match self {
            BaggageLoad::Single(_) => "single",
            BaggageLoad::Split { .. } => "split",
        }
    }
}

/// User-entered loads for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadInput {
    /// Basic empty weight from the weighing report
    pub empty_weight: f64,

    /// Arm of the empty-weight CG
    pub empty_weight_arm: f64,

    /// Pilot and passenger, combined
    pub pilot_passenger_weight: f64,

    /// Baggage, shaped like the aircraft's compartments
    #[serde(default)]
    pub baggage: BaggageLoad,

    /// Fuel mode (and volume in manual mode)
    #[serde(default)]
    pub fuel: FuelLoad,
}

impl LoadInput {
    /// Create an input with no baggage and auto-maximised fuel.
    pub fn new(empty_weight: f64, empty_weight_arm: f64, pilot_passenger_weight: f64) -> Self {
        LoadInput {
            empty_weight,
            empty_weight_arm,
            pilot_passenger_weight,
            baggage: BaggageLoad::default(),
            fuel: FuelLoad::AutoMax,
        }
    }

    /// Builder: single-compartment baggage
    pub fn with_baggage(mut self, weight: f64) -> Self {
        self.baggage = BaggageLoad::Single(weight);
        self
    }

    /// Builder: two-area baggage
    pub fn with_split_baggage(mut self, area1: f64, area2: f64) -> Self {
        self.baggage = BaggageLoad::Split { area1, area2 };
        self
    }

    /// Builder: manual fuel volume
    pub fn with_manual_fuel(mut self, volume: f64) -> Self {
        self.fuel = FuelLoad::Manual { volume };
        self
    }

    /// Builder: auto-maximised fuel
    pub fn with_auto_fuel(mut self) -> Self {
        self.fuel = FuelLoad::AutoMax;
        self
    }

    /// Total non-fuel payload and empty weight
    pub fn zero_fuel_weight(&self) -> f64 {
        self.empty_weight + self.pilot_passenger_weight + self.baggage.total()
    }

    /// Every user-entered number, paired with its field name
    pub fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("empty_weight", self.empty_weight),
            ("empty_weight_arm", self.empty_weight_arm),
            ("pilot_passenger_weight", self.pilot_passenger_weight),
        ];
        match self.baggage {
            BaggageLoad::Single(weight) => fields.push(("baggage", weight)),
            BaggageLoad::Split { area1, area2 } => {
                fields.push(("baggage.area1", area1));
                fields.push(("baggage.area2", area2));
            }
        }
        if let FuelLoad::Manual { volume } = self.fuel {
            fields.push(("fuel.volume", volume));
        }
        fields
    }
}

/// Baggage weight paired with the compartment that carries it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BaggageEntry {
    /// 0 for a single compartment, otherwise the area number (1 or 2)
    pub area: u8,
    pub weight: f64,
    pub compartment: Compartment,
}

/// Pair baggage weights with compartments, in area order.
///
/// A load that does not fit the layout is folded onto it: a single weight
/// on a split aircraft goes to Area 1, split weights on a single-compartment
/// aircraft are summed.
pub(crate) fn resolve_baggage(layout: &BaggageLayout, load: &BaggageLoad) -> Vec<BaggageEntry> {
    match layout {
        BaggageLayout::Single(compartment) => vec![BaggageEntry {
            area: 0,
            weight: load.total(),
            compartment: *compartment,
        }],
        BaggageLayout::Split { area1, area2, .. } => {
            let (w1, w2) = match *load {
                BaggageLoad::Single(w) => (w, 0.0),
                BaggageLoad::Split { area1, area2 } => (area1, area2),
            };
            vec![
                BaggageEntry {
                    area: 1,
                    weight: w1,
                    compartment: *area1,
                },
                BaggageEntry {
                    area: 2,
                    weight: w2,
                    compartment: *area2,
                },
            ]
        }
    }
}
