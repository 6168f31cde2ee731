//! # Moments and Totals
//!
//! One [`LineItem`] per contributing mass, moment = weight × arm, then totals
//! and the CG.
//!
//! Items are always produced and summed in the same order (empty weight,
//! pilot & passenger, baggage areas in order, fuel) so that repeated runs
//! give bit-identical totals.

use serde::{Deserialize, Serialize};

use super::fuel::FuelState;
use super::load::{resolve_baggage, LoadInput};
use crate::aircraft::AircraftProfile;

/// What a load-sheet row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    EmptyWeight,
    PilotPassenger,
    /// Only compartment of a single-compartment aircraft
    Baggage,
    BaggageArea1,
    BaggageArea2,
    Fuel,
}

impl LineItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            LineItemKind::EmptyWeight => "Empty Weight",
            LineItemKind::PilotPassenger => "Pilot & Passenger",
            LineItemKind::Baggage => "Baggage",
            LineItemKind::BaggageArea1 => "Baggage Area 1",
            LineItemKind::BaggageArea2 => "Baggage Area 2",
            LineItemKind::Fuel => "Fuel",
        }
    }

    fn baggage(area: u8) -> Self {
        match area {
            1 => LineItemKind::BaggageArea1,
            2 => LineItemKind::BaggageArea2,
            _ => LineItemKind::Baggage,
        }
    }
}

/// One row of the mass & balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub kind: LineItemKind,
    pub label: String,
    pub weight: f64,
    pub arm: f64,
    pub moment: f64,
}

impl LineItem {
    pub fn new(kind: LineItemKind, weight: f64, arm: f64) -> Self {
        LineItem {
            kind,
            label: kind.label().to_string(),
            weight,
            arm,
            moment: weight * arm,
        }
    }
}

/// Rows plus their sums
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub items: Vec<LineItem>,
    pub total_weight: f64,
    pub total_moment: f64,
    /// `total_moment / total_weight`, or 0 for an empty aircraft
    pub cg: f64,
}

/// Compute per-item moments, totals and CG.
pub fn compute_moments_and_totals(profile: &AircraftProfile, loads: &LoadInput, fuel: &FuelState) -> Totals {
    let mut items = Vec::with_capacity(5);
    items.push(LineItem::new(
        LineItemKind::EmptyWeight,
        loads.empty_weight,
        loads.empty_weight_arm,
    ));
    items.push(LineItem::new(
        LineItemKind::PilotPassenger,
        loads.pilot_passenger_weight,
        profile.pilot_arm,
    ));
    for entry in resolve_baggage(&profile.baggage, &loads.baggage) {
        items.push(LineItem::new(
            LineItemKind::baggage(entry.area),
            entry.weight,
            entry.compartment.arm,
        ));
    }
    items.push(LineItem::new(LineItemKind::Fuel, fuel.weight, profile.fuel_arm));

    let total_weight = items.iter().fold(0.0, |acc, item| acc + item.weight);
    let total_moment = items.iter().fold(0.0, |acc, item| acc + item.moment);
    let cg = if total_weight > 0.0 {
        total_moment / total_weight
    } else {
        0.0
    };

    Totals {
        items,
        total_weight,
        total_moment,
        cg,
    }
}
