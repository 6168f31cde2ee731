//! # Mass & Balance Calculation
//!
//! The weight-and-balance calculator. Follows the crate-wide pattern:
//!
//! - [`LoadInput`] - user loads (JSON-serializable)
//! - [`CalculationResult`] - derived load sheet (JSON-serializable)
//! - [`calculate`] - pure function from (profile, input) to result
//!
//! The individual steps are public as well, for callers that only need one:
//!
//! - [`compute_fuel`] - manual or auto-maximised fuel
//! - [`compute_moments_and_totals`] - rows, totals, CG
//! - [`evaluate_alerts`] - limit violations
//! - [`classify_severity`] / [`classify_cg`] - OK / near limit / exceeded
//!
//! ## Example
//!
//! ```rust
//! use mb_core::aircraft::Fleet;
//! use mb_core::calculations::{calculate, LoadInput, Severity};
//!
//! let fleet = Fleet::builtin().unwrap();
//! let tecnam = fleet.get("Tecnam P2008").unwrap();
//!
//! let loads = LoadInput::new(430.0, 1.86, 150.0).with_baggage(10.0);
//! let result = calculate(tecnam, &loads).unwrap();
//!
//! assert!((result.total_weight - 650.0).abs() < 1e-9);
//! assert!(result.alerts.is_empty());
//! assert_eq!(result.weight_severity, Severity::NearLimit);
//! ```

pub mod alerts;
pub mod fuel;
pub mod load;
pub mod moments;
pub mod severity;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use alerts::{evaluate_alerts, Alert};
pub use fuel::{compute_fuel, FuelLimit, FuelState};
pub use load::{BaggageLoad, FuelLoad, FuelMode, LoadInput};
pub use moments::{compute_moments_and_totals, LineItem, LineItemKind, Totals};
pub use severity::{classify_cg, classify_severity, Severity, DEFAULT_NEAR_MARGIN};

use crate::aircraft::AircraftProfile;
use crate::errors::{CalcError, CalcResult};

/// Complete load sheet for one (profile, input) pair.
///
/// ## JSON Example
///
/// ```json
/// {
///   "aircraft": "Tecnam P2008",
///   "items": [
///     { "kind": "empty_weight", "label": "Empty Weight", "weight": 430.0, "arm": 1.86, "moment": 799.8 }
///   ],
///   "total_weight": 650.0,
///   "total_moment": 1226.51,
///   "cg": 1.887,
///   "baggage_total": 10.0,
///   "fuel": { "weight": 60.0, "volume": 83.33, "limited_by": "maximum_weight" },
///   "alerts": [],
///   "weight_severity": "near_limit",
///   "cg_severity": "ok"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Profile name the result was computed for
    pub aircraft: String,

    /// Rows in fixed order: empty weight, pilot & passenger, baggage, fuel
    pub items: Vec<LineItem>,

    pub total_weight: f64,

    pub total_moment: f64,

    /// Centre of gravity (arm unit); 0 when nothing is loaded
    pub cg: f64,

    /// Sum of all baggage weights
    pub baggage_total: f64,

    pub fuel: FuelState,

    /// Violated limits, in check order, without duplicates
    pub alerts: Vec<Alert>,

    /// Total weight against MTOW
    pub weight_severity: Severity,

    /// CG against the envelope (`Ok` when the profile has none)
    pub cg_severity: Severity,
}

impl CalculationResult {
    /// True when no limit is violated
    pub fn is_within_limits(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Alert texts, for consumers that only show strings
    pub fn alert_messages(&self) -> Vec<String> {
        self.alerts.iter().map(Alert::message).collect()
    }

    /// Find a row by kind
    pub fn item(&self, kind: LineItemKind) -> Option<&LineItem> {
        self.items.iter().find(|i| i.kind == kind)
    }
}

/// Run a full calculation with the default near-limit margin.
///
/// # Returns
///
/// * `Ok(CalculationResult)` - for any finite input, limit breaches included
/// * `Err(CalcError::InvalidInput)` - a value is NaN or infinite, or the
///   baggage load shape does not match the aircraft's compartments
pub fn calculate(profile: &AircraftProfile, loads: &LoadInput) -> CalcResult<CalculationResult> {
    calculate_with_margin(profile, loads, DEFAULT_NEAR_MARGIN)
}

/// Run a full calculation with a configured near-limit margin.
pub fn calculate_with_margin(
    profile: &AircraftProfile,
    loads: &LoadInput,
    near_margin: f64,
) -> CalcResult<CalculationResult> {
    // NaN fails every limit comparison and would pass as within limits
    if let Some((field, value)) = loads.numeric_fields().into_iter().find(|(_, v)| !v.is_finite()) {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    if !loads.baggage.fits(&profile.baggage) {
        return Err(CalcError::invalid_input(
            "baggage",
            loads.baggage.shape_name(),
            format!(
                "{} has {} baggage compartment(s)",
                profile.name,
                profile.baggage.compartment_count()
            ),
        ));
    }
    if !(0.0..1.0).contains(&near_margin) {
        return Err(CalcError::invalid_input(
            "near_margin",
            near_margin.to_string(),
            "Near-limit margin must be in [0, 1)",
        ));
    }

    let fuel = compute_fuel(profile, loads);
    let totals = compute_moments_and_totals(profile, loads, &fuel);
    let alerts = evaluate_alerts(profile, loads, totals.total_weight, totals.cg);

    let weight_severity = classify_severity(totals.total_weight, Some(profile.max_takeoff_weight), near_margin);
    let cg_severity = classify_cg(totals.cg, profile.cg_limits.as_ref(), near_margin);

    debug!(
        aircraft = %profile.name,
        fuel_mode = ?loads.fuel.mode(),
        total_weight = totals.total_weight,
        cg = totals.cg,
        alerts = alerts.len(),
        "Computed load sheet"
    );

    Ok(CalculationResult {
        aircraft: profile.name.clone(),
        items: totals.items,
        total_weight: totals.total_weight,
        total_moment: totals.total_moment,
        cg: totals.cg,
        baggage_total: loads.baggage.total(),
        fuel,
        alerts,
        weight_severity,
        cg_severity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::tests::{cessna_150, tecnam};

    #[test]
    fn test_shape_mismatch_rejected() {
        let loads = LoadInput::new(1100.0, 33.0, 340.0).with_baggage(10.0);
        let err = calculate(&cessna_150(), &loads).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let c150 = cessna_150();
        let nan_empty = LoadInput::new(f64::NAN, 33.0, 340.0).with_split_baggage(0.0, 0.0);
        let err = calculate(&c150, &nan_empty).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "empty_weight"));

        let cases = [
            LoadInput::new(430.0, 1.86, f64::NAN),
            LoadInput::new(430.0, f64::INFINITY, 150.0),
            LoadInput::new(430.0, 1.86, 150.0).with_baggage(f64::NAN),
            LoadInput::new(430.0, 1.86, 150.0).with_manual_fuel(f64::NEG_INFINITY),
        ];
        for loads in cases {
            assert!(calculate(&tecnam(), &loads).is_err(), "{:?}", loads);
        }

        let nan_area2 = LoadInput::new(1100.0, 33.0, 340.0).with_split_baggage(10.0, f64::NAN);
        assert!(calculate(&c150, &nan_area2).is_err());
    }

    #[test]
    fn test_bad_margin_rejected() {
        let loads = LoadInput::new(430.0, 1.86, 150.0);
        assert!(calculate_with_margin(&tecnam(), &loads, 1.0).is_err());
        assert!(calculate_with_margin(&tecnam(), &loads, -0.1).is_err());
    }

    #[test]
    fn test_negative_inputs_are_tolerated() {
        let loads = LoadInput::new(-10.0, 1.86, -5.0).with_baggage(-1.0);
        let result = calculate(&tecnam(), &loads).unwrap();
        assert!(result.total_weight.is_finite());
    }

    #[test]
    fn test_result_helpers() {
        let loads = LoadInput::new(500.0, 1.86, 240.0).with_baggage(30.0).with_manual_fuel(0.0);
        let result = calculate(&tecnam(), &loads).unwrap();
        assert!(!result.is_within_limits());
        assert!(result
            .alert_messages()
            .contains(&"Pilot & Passenger exceed limit!".to_string()));
        assert_eq!(result.item(LineItemKind::Baggage).map(|i| i.weight), Some(30.0));
        assert!(result.item(LineItemKind::BaggageArea1).is_none());
    }

    #[test]
    fn test_result_serialization() {
        let loads = LoadInput::new(430.0, 1.86, 150.0).with_baggage(10.0);
        let result = calculate(&tecnam(), &loads).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("\"limited_by\": \"maximum_weight\""));
        assert!(json.contains("\"weight_severity\": \"near_limit\""));
        let roundtrip: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.items.len(), result.items.len());
        assert_eq!(roundtrip.fuel.limited_by, result.fuel.limited_by);
        assert!((roundtrip.cg - result.cg).abs() < 1e-12);
    }
}
