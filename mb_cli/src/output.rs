use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, Table};

use mb_core::calculations::Severity;
use mb_core::report::fuel_summary;
use mb_core::{AircraftProfile, CalculationResult, Fleet};

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Ok => Color::Green,
        Severity::NearLimit => Color::Yellow,
        Severity::Exceeded => Color::Red,
    }
}

/// No colour when the profile has no envelope to check against
fn cg_color(profile: &AircraftProfile, result: &CalculationResult) -> Option<Color> {
    profile.cg_limits.map(|_| severity_color(result.cg_severity))
}

fn number(value: f64, decimals: usize) -> Cell {
    Cell::new(format!("{:.*}", decimals, value)).set_alignment(CellAlignment::Right)
}

pub fn fleet_table(fleet: &Fleet) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Aircraft", "MTOW", "Fuel", "Baggage", "CG envelope"]);

    for profile in fleet.profiles() {
        let units = &profile.units;
        let envelope = profile
            .cg_limits
            .map(|e| format!("{} to {} {}", e.min, e.max, units.arm))
            .unwrap_or_else(|| "-".to_string());
        let baggage = if profile.baggage.is_split() { "2 areas" } else { "1 area" };

        table.add_row(vec![
            Cell::new(&profile.name),
            Cell::new(format!("{} {}", profile.max_takeoff_weight, units.weight)),
            Cell::new(format!("{} {}", profile.max_fuel_volume, units.volume)),
            Cell::new(baggage),
            Cell::new(envelope),
        ]);
    }
    table
}

pub fn items_table(profile: &AircraftProfile, result: &CalculationResult) -> Table {
    let units = &profile.units;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Item".to_string(),
        format!("Weight ({})", units.weight),
        format!("Arm ({})", units.arm),
        format!("Moment ({})", units.moment()),
    ]);

    for item in &result.items {
        table.add_row(vec![
            Cell::new(&item.label),
            number(item.weight, 2),
            number(item.arm, 3),
            number(item.moment, 2),
        ]);
    }

    let mut cg_cell = number(result.cg, 3);
    if let Some(color) = cg_color(profile, result) {
        cg_cell = cg_cell.fg(color);
    }
    table.add_row(vec![
        Cell::new("Total"),
        number(result.total_weight, 2).fg(severity_color(result.weight_severity)),
        cg_cell,
        number(result.total_moment, 2),
    ]);
    table
}

pub fn print_result(profile: &AircraftProfile, result: &CalculationResult) {
    println!("{}", profile.name);
    println!("{}", items_table(profile, result));
    println!("Fuel: {}", fuel_summary(profile, result));
    println!(
        "Weight: {:.2} / {} {} [{}]",
        result.total_weight, profile.max_takeoff_weight, profile.units.weight, result.weight_severity
    );
    match &profile.cg_limits {
        Some(envelope) => println!(
            "CG: {:.3} {} (limits {} to {}) [{}]",
            result.cg, profile.units.arm, envelope.min, envelope.max, result.cg_severity
        ),
        None => println!("CG: {:.3} {}", result.cg, profile.units.arm),
    }

    for alert in &result.alerts {
        println!("WARNING: {}", alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mb_core::{calculate, LoadInput};

    #[test]
    fn test_fleet_table_lists_every_aircraft() {
        let fleet = Fleet::builtin().unwrap();
        let rendered = fleet_table(fleet).to_string();
        for name in fleet.names() {
            assert!(rendered.contains(name));
        }
    }

    #[test]
    fn test_items_table_has_total_row() {
        let fleet = Fleet::builtin().unwrap();
        let tecnam = fleet.get("Tecnam P2008").unwrap();
        let result = calculate(tecnam, &LoadInput::new(430.0, 1.86, 150.0).with_baggage(10.0)).unwrap();
        let rendered = items_table(tecnam, &result).to_string();
        assert!(rendered.contains("Empty Weight"));
        assert!(rendered.contains("Total"));
        assert!(rendered.contains("Moment (kg·m)"));
    }

    #[test]
    fn test_cg_uncoloured_without_envelope() {
        let fleet = Fleet::builtin().unwrap();

        let c150 = fleet.get("Cessna 150").unwrap();
        let loads = LoadInput::new(1100.0, 33.0, 340.0).with_split_baggage(20.0, 0.0);
        let result = calculate(c150, &loads).unwrap();
        assert_eq!(cg_color(c150, &result), None);

        let c152 = fleet.get("Cessna 152").unwrap();
        let loads = LoadInput::new(1111.0, 33.4, 340.0).with_split_baggage(20.0, 0.0);
        let result = calculate(c152, &loads).unwrap();
        assert_eq!(cg_color(c152, &result), Some(severity_color(result.cg_severity)));
    }
}
