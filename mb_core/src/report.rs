//! # Text Reports
//!
//! Plain-text load sheet and the "operational limits" block shared with the
//! PDF exporter. Both only read a [`CalculationResult`]; nothing here
//! recomputes weights or limits.
//!
//! ## Example
//!
//! ```rust
//! use mb_core::aircraft::Fleet;
//! use mb_core::calculations::{calculate, LoadInput};
//! use mb_core::flight::FlightInfo;
//! use mb_core::report::{limits_text, render_text_report};
//!
//! let fleet = Fleet::builtin().unwrap();
//! let c152 = fleet.get("Cessna 152").unwrap();
//! assert!(limits_text(c152).contains("Max Total Baggage: 120 lb"));
//!
//! let loads = LoadInput::new(1111.0, 33.4, 340.0).with_split_baggage(20.0, 0.0);
//! let result = calculate(c152, &loads).unwrap();
//! let text = render_text_report(c152, &result, &FlightInfo::new("CS-DXY", "042"));
//! assert!(text.starts_with("MASS & BALANCE REPORT"));
//! ```

use tracing::warn;

use crate::aircraft::{AircraftProfile, BaggageLayout};
use crate::calculations::{CalculationResult, FuelLimit};
use crate::flight::FlightInfo;

/// Operational limits of a profile, one line per limit.
pub fn limits_lines(profile: &AircraftProfile) -> Vec<String> {
    let w = &profile.units.weight;
    let mut lines = vec![
        format!("Max Takeoff Weight: {} {}", profile.max_takeoff_weight, w),
        format!("Max Fuel Volume: {} {}", profile.max_fuel_volume, profile.units.volume),
    ];
    if let Some(limit) = profile.max_passenger_weight {
        lines.push(format!("Max Pilot+Passenger: {} {}", limit, w));
    }
    match &profile.baggage {
        BaggageLayout::Single(c) => lines.push(format!("Max Baggage: {} {}", c.max_weight, w)),
        BaggageLayout::Split {
            area1,
            area2,
            combined_max_weight,
        } => {
            lines.push(format!("Max Baggage Area 1: {} {}", area1.max_weight, w));
            lines.push(format!("Max Baggage Area 2: {} {}", area2.max_weight, w));
            if let Some(combined) = combined_max_weight {
                lines.push(format!("Max Total Baggage: {} {}", combined, w));
            }
        }
    }
    if let Some(envelope) = &profile.cg_limits {
        lines.push(format!(
            "CG Limits: {} to {} {}",
            envelope.min, envelope.max, profile.units.arm
        ));
    }
    lines
}

/// Operational limits as a newline-separated block
pub fn limits_text(profile: &AircraftProfile) -> String {
    limits_lines(profile).join("\n")
}

/// One-line fuel summary, e.g. `83.3 L / 60.0 kg (Limited by maximum weight)`
pub fn fuel_summary(profile: &AircraftProfile, result: &CalculationResult) -> String {
    let fuel = &result.fuel;
    let base = format!(
        "{:.1} {} / {:.1} {}",
        fuel.volume, profile.units.volume, fuel.weight, profile.units.weight
    );
    match fuel.limited_by {
        FuelLimit::ManualEntry => base,
        limit => format!("{} ({})", base, limit),
    }
}

/// Render a plain-text load sheet.
pub fn render_text_report(profile: &AircraftProfile, result: &CalculationResult, info: &FlightInfo) -> String {
    if !result.alerts.is_empty() {
        warn!(
            aircraft = %profile.name,
            alerts = result.alerts.len(),
            "Exporting load sheet with limit violations"
        );
    }

    let units = &profile.units;
    let mut lines = vec![
        "MASS & BALANCE REPORT".to_string(),
        String::new(),
        format!("Aircraft: {} ({})", profile.name, info.registration),
        format!("Mission Number: {}", info.mission_number),
        format!("Flight (UTC): {}", info.flight_datetime),
    ];
    if !info.operator.is_empty() {
        lines.push(format!("Operator: {}", info.operator));
    }
    lines.push(String::new());

    lines.push("Operational Limits:".to_string());
    lines.extend(limits_lines(profile).into_iter().map(|line| format!("  {}", line)));
    lines.push(String::new());

    lines.push(format!(
        "{:<20} {:>12} {:>10} {:>16}",
        "Item",
        format!("Weight ({})", units.weight),
        format!("Arm ({})", units.arm),
        format!("Moment ({})", units.moment()),
    ));
    lines.extend(result.items.iter().map(|item| {
        format!(
            "{:<20} {:>12.2} {:>10.3} {:>16.2}",
            item.label, item.weight, item.arm, item.moment
        )
    }));
    lines.push(String::new());

    lines.push(format!("Fuel: {}", fuel_summary(profile, result)));
    lines.push(format!(
        "Total Weight: {:.2} {} [{}]",
        result.total_weight, units.weight, result.weight_severity
    ));
    lines.push(format!("Total Moment: {:.2} {}", result.total_moment, units.moment()));
    match &profile.cg_limits {
        Some(envelope) => {
            lines.push(format!("CG: {:.3} {} [{}]", result.cg, units.arm, result.cg_severity));
            lines.push(format!(
                "CG Limits: {:.3} to {:.3} {}",
                envelope.min, envelope.max, units.arm
            ));
        }
        None => lines.push(format!("CG: {:.3} {}", result.cg, units.arm)),
    }

    if !result.alerts.is_empty() {
        lines.push(String::new());
        lines.extend(result.alerts.iter().map(|alert| format!("WARNING: {}", alert)));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::tests::{cessna_150, tecnam};
    use crate::calculations::{calculate, LoadInput};

    #[test]
    fn test_tecnam_limits_text() {
        let lines = limits_lines(&tecnam());
        assert_eq!(
            lines,
            vec![
                "Max Takeoff Weight: 650 kg",
                "Max Fuel Volume: 124 L",
                "Max Pilot+Passenger: 230 kg",
                "Max Baggage: 20 kg",
                "CG Limits: 1.841 to 1.978 m",
            ]
        );
    }

    #[test]
    fn test_split_limits_text_without_envelope() {
        let text = limits_text(&cessna_150());
        assert!(text.contains("Max Baggage Area 1: 120 lb"));
        assert!(text.contains("Max Baggage Area 2: 40 lb"));
        assert!(text.contains("Max Total Baggage: 120 lb"));
        assert!(text.contains("Max Fuel Volume: 22.5 gal"));
        assert!(!text.contains("CG Limits"));
        assert!(!text.contains("Pilot+Passenger"));
    }

    #[test]
    fn test_fuel_summary_auto() {
        let profile = tecnam();
        let result = calculate(&profile, &LoadInput::new(430.0, 1.86, 150.0).with_baggage(10.0)).unwrap();
        assert_eq!(
            fuel_summary(&profile, &result),
            "83.3 L / 60.0 kg (Limited by maximum weight)"
        );
    }

    #[test]
    fn test_text_report_contents() {
        let profile = tecnam();
        let loads = LoadInput::new(430.0, 1.86, 150.0)
            .with_baggage(10.0)
            .with_manual_fuel(124.0);
        let result = calculate(&profile, &loads).unwrap();
        let info = FlightInfo::new("CS-DXY", "042")
            .with_operator("Sevenair Academy")
            .with_flight_datetime("2025-06-01 09:30 UTC");

        let text = render_text_report(&profile, &result, &info);
        assert!(text.contains("Aircraft: Tecnam P2008 (CS-DXY)"));
        assert!(text.contains("Operator: Sevenair Academy"));
        assert!(text.contains("Flight (UTC): 2025-06-01 09:30 UTC"));
        assert!(text.contains("Fuel: 124.0 L / 89.3 kg\n"));
        assert!(text.contains("Total Weight: 679.28 kg [EXCEEDED]"));
        assert!(text.contains("WARNING: Total weight exceeds maximum takeoff weight!"));
    }

    #[test]
    fn test_text_report_without_envelope() {
        let profile = cessna_150();
        let loads = LoadInput::new(1100.0, 33.0, 340.0).with_split_baggage(20.0, 0.0);
        let result = calculate(&profile, &loads).unwrap();
        let text = render_text_report(&profile, &result, &FlightInfo::default());
        assert!(text.contains("Baggage Area 2"));
        assert!(!text.contains("CG Limits"));
        assert!(!text.contains("WARNING"));
    }

    #[test]
    fn test_text_report_layout() {
        let profile = tecnam();
        let loads = LoadInput::new(500.0, 1.86, 240.0).with_baggage(30.0).with_manual_fuel(0.0);
        let result = calculate(&profile, &loads).unwrap();
        let info = FlightInfo::new("CS-DXY", "042").with_flight_datetime("2025-06-01 09:30 UTC");

        let text = render_text_report(&profile, &result, &info);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "MASS & BALANCE REPORT");
        assert_eq!(lines[1], "");
        assert!(!text.contains("Operator:"));
        assert!(text.ends_with("WARNING: Pilot & Passenger exceed limit!\n"));
        assert!(lines.contains(&"  Max Baggage: 20 kg"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("WARNING: ")).count(), result.alerts.len());
    }
}
