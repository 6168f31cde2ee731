//! # Limit Alerts
//!
//! Operational limit violations, reported as data. Each rule is an
//! independent check; several may fire for the same load.

use serde::{Deserialize, Serialize};

use super::load::{resolve_baggage, LoadInput};
use crate::aircraft::AircraftProfile;

/// A limit the current load violates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Alert {
    /// Total weight above MTOW
    MaxTakeoffWeightExceeded,
    /// Single compartment over its limit
    BaggageExceeded,
    /// One area of a split compartment over its limit
    BaggageAreaExceeded { area: u8 },
    /// Both areas together over the shared ceiling
    CombinedBaggageExceeded { limit: f64, unit: String },
    /// Seat load above the profile's pilot & passenger limit
    PilotPassengerExceeded,
    /// CG forward or aft of the envelope
    CgOutsideEnvelope,
}

impl Alert {
    /// Human-readable message shown to the pilot
    pub fn message(&self) -> String {
        match self {
            Alert::MaxTakeoffWeightExceeded => "Total weight exceeds maximum takeoff weight!".to_string(),
            Alert::BaggageExceeded => "Baggage exceeds limit!".to_string(),
            Alert::BaggageAreaExceeded { area } => format!("Baggage Area {} exceeds limit!", area),
            Alert::CombinedBaggageExceeded { limit, unit } => {
                format!("Total baggage exceeds {} {} limit!", limit, unit)
            }
            Alert::PilotPassengerExceeded => "Pilot & Passenger exceed limit!".to_string(),
            Alert::CgOutsideEnvelope => "CG outside safe envelope!".to_string(),
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Evaluate every limit check, in a fixed order:
///
/// 1. total weight vs. MTOW
/// 2. each baggage compartment vs. its own limit
/// 3. both areas vs. the combined ceiling (split layouts that define one)
/// 4. pilot & passenger vs. the seat limit, if defined
/// 5. CG vs. the envelope, if defined
///
/// Limits are exclusive: a value exactly at a limit does not alert. The
/// returned list has no two alerts with the same message.
pub fn evaluate_alerts(profile: &AircraftProfile, loads: &LoadInput, total_weight: f64, cg: f64) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if total_weight > profile.max_takeoff_weight {
        push_distinct(&mut alerts, Alert::MaxTakeoffWeightExceeded);
    }

    for entry in resolve_baggage(&profile.baggage, &loads.baggage) {
        if entry.weight > entry.compartment.max_weight {
            let alert = match entry.area {
                0 => Alert::BaggageExceeded,
                area => Alert::BaggageAreaExceeded { area },
            };
            push_distinct(&mut alerts, alert);
        }
    }

    if let Some(limit) = profile.baggage.combined_limit() {
        if loads.baggage.total() > limit {
            push_distinct(
                &mut alerts,
                Alert::CombinedBaggageExceeded {
                    limit,
                    unit: profile.units.weight.clone(),
                },
            );
        }
    }

    if let Some(limit) = profile.max_passenger_weight {
        if loads.pilot_passenger_weight > limit {
            push_distinct(&mut alerts, Alert::PilotPassengerExceeded);
        }
    }

    if let Some(envelope) = &profile.cg_limits {
        if !envelope.contains(cg) {
            push_distinct(&mut alerts, Alert::CgOutsideEnvelope);
        }
    }

    alerts
}

fn push_distinct(alerts: &mut Vec<Alert>, alert: Alert) {
    let message = alert.message();
    if !alerts.iter().any(|a| a.message() == message) {
        alerts.push(alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::tests::{cessna_150, tecnam};

    #[test]
    fn test_no_alerts_at_exact_limits() {
        let loads = LoadInput::new(400.0, 1.9, 230.0).with_baggage(20.0);
        let alerts = evaluate_alerts(&tecnam(), &loads, 650.0, 1.978);
        assert!(alerts.is_empty(), "unexpected alerts: {:?}", alerts);
    }

    #[test]
    fn test_mtow_alert() {
        let loads = LoadInput::new(400.0, 1.9, 150.0);
        let alerts = evaluate_alerts(&tecnam(), &loads, 650.01, 1.9);
        assert_eq!(alerts, vec![Alert::MaxTakeoffWeightExceeded]);
        assert_eq!(alerts[0].message(), "Total weight exceeds maximum takeoff weight!");
    }

    #[test]
    fn test_single_baggage_alert() {
        let loads = LoadInput::new(400.0, 1.9, 150.0).with_baggage(21.0);
        let alerts = evaluate_alerts(&tecnam(), &loads, 600.0, 1.9);
        assert_eq!(alerts, vec![Alert::BaggageExceeded]);
    }

    #[test]
    fn test_area_2_alert_only() {
        let loads = LoadInput::new(1100.0, 33.0, 340.0).with_split_baggage(10.0, 45.0);
        let alerts = evaluate_alerts(&cessna_150(), &loads, 1500.0, 34.0);
        assert_eq!(alerts, vec![Alert::BaggageAreaExceeded { area: 2 }]);
        assert_eq!(alerts[0].message(), "Baggage Area 2 exceeds limit!");
    }

    #[test]
    fn test_combined_alert_only() {
        // 100 + 30 = 130 > 120, each area within its own limit
        let loads = LoadInput::new(1100.0, 33.0, 340.0).with_split_baggage(100.0, 30.0);
        let alerts = evaluate_alerts(&cessna_150(), &loads, 1500.0, 34.0);
        assert_eq!(
            alerts,
            vec![Alert::CombinedBaggageExceeded {
                limit: 120.0,
                unit: "lb".to_string()
            }]
        );
        assert_eq!(alerts[0].message(), "Total baggage exceeds 120 lb limit!");
    }

    #[test]
    fn test_passenger_alert() {
        let loads = LoadInput::new(380.0, 1.9, 231.0);
        let alerts = evaluate_alerts(&tecnam(), &loads, 611.0, 1.9);
        assert_eq!(alerts, vec![Alert::PilotPassengerExceeded]);
    }

    #[test]
    fn test_passenger_check_skipped_without_limit() {
        let loads = LoadInput::new(900.0, 33.0, 600.0).with_split_baggage(0.0, 0.0);
        let alerts = evaluate_alerts(&cessna_150(), &loads, 1500.0, 34.0);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_cg_alert_forward_and_aft() {
        let loads = LoadInput::new(400.0, 1.9, 150.0);
        assert_eq!(
            evaluate_alerts(&tecnam(), &loads, 600.0, 1.80),
            vec![Alert::CgOutsideEnvelope]
        );
        assert_eq!(
            evaluate_alerts(&tecnam(), &loads, 600.0, 2.00),
            vec![Alert::CgOutsideEnvelope]
        );
    }

    #[test]
    fn test_cg_check_skipped_without_envelope() {
        let loads = LoadInput::new(1100.0, 33.0, 340.0).with_split_baggage(0.0, 0.0);
        assert!(evaluate_alerts(&cessna_150(), &loads, 1500.0, 99.0).is_empty());
    }

    #[test]
    fn test_alerts_fire_together_in_order() {
        let loads = LoadInput::new(500.0, 1.9, 240.0).with_baggage(30.0);
        let alerts = evaluate_alerts(&tecnam(), &loads, 770.0, 2.1);
        assert_eq!(
            alerts,
            vec![
                Alert::MaxTakeoffWeightExceeded,
                Alert::BaggageExceeded,
                Alert::PilotPassengerExceeded,
                Alert::CgOutsideEnvelope,
            ]
        );
    }

    #[test]
    fn test_push_distinct_drops_duplicates() {
        let mut alerts = Vec::new();
        push_distinct(&mut alerts, Alert::CgOutsideEnvelope);
        push_distinct(&mut alerts, Alert::CgOutsideEnvelope);
        assert_eq!(alerts.len(), 1);
    }
}
