//! # mb_core - Aircraft Mass & Balance Engine
//!
//! `mb_core` computes pre-flight weight-and-balance load sheets for light
//! training aircraft: fuel load, line-item moments, total weight, centre of
//! gravity, limit alerts and near-limit severities. All inputs and outputs
//! are JSON-serializable so the same calculation can back a CLI, a GUI or a
//! remote tool.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take a profile and loads and return a result
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Alerts are data**: Limit violations are part of the result, not errors
//! - **Validated reference data**: Aircraft profiles are checked when the table loads
//!
//! ## Quick Start
//!
//! ```rust
//! use mb_core::{calculate, Fleet, LoadInput};
//!
//! let fleet = Fleet::builtin().unwrap();
//! let tecnam = fleet.get("Tecnam P2008").unwrap();
//!
//! let loads = LoadInput::new(430.0, 1.86, 150.0).with_baggage(10.0);
//! let result = calculate(tecnam, &loads).unwrap();
//!
//! println!("CG {:.3} {}", result.cg, tecnam.units.arm);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`aircraft`] - Aircraft profiles and the built-in fleet table
//! - [`calculations`] - Fuel, moments, alerts and severity
//! - [`flight`] - Registration / mission header fields for reports
//! - [`report`] - Plain-text load sheet and limits summary
//! - [`pdf`] - PDF load sheet via Typst
//! - [`config`] - Optional `loadsheet.toml` settings
//! - [`units`] - Unit labels carried by each profile
//! - [`errors`] - Structured error types
//! - [`file_io`] - Table loading and atomic report writes

pub mod aircraft;
pub mod calculations;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod flight;
pub mod pdf;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use aircraft::{AircraftProfile, Fleet};
pub use calculations::{calculate, calculate_with_margin, CalculationResult, LoadInput};
pub use config::PlannerConfig;
pub use errors::{CalcError, CalcResult};
pub use file_io::{default_report_name, load_fleet, write_report};
pub use flight::FlightInfo;
