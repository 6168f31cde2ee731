//! # Flight Metadata
//!
//! Cosmetic header fields printed on a load sheet. The calculator never
//! reads them; they are carried through to the report exporters verbatim.
//!
//! ## Example
//!
//! ```rust
//! use mb_core::flight::FlightInfo;
//!
//! let info = FlightInfo::new("CS-DXY", "042")
//!     .with_operator("Sevenair Academy")
//!     .with_flight_datetime("2025-06-01 09:30 UTC");
//!
//! assert_eq!(info.report_file_stem(), "MB_CS-DXY_042");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format used for the default flight date/time field
pub const FLIGHT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Pass-through header fields for a load sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightInfo {
    /// Aircraft registration (e.g. "CS-DXY")
    pub registration: String,

    /// Mission / flight number
    pub mission_number: String,

    /// Scheduled flight date and time, free text
    pub flight_datetime: String,

    /// Operator name
    pub operator: String,
}

impl FlightInfo {
    /// Create metadata with the flight time set to now (UTC).
    pub fn new(registration: impl Into<String>, mission_number: impl Into<String>) -> Self {
        FlightInfo {
            registration: registration.into(),
            mission_number: mission_number.into(),
            flight_datetime: format_flight_datetime(Utc::now()),
            operator: String::new(),
        }
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = operator.into();
        self
    }

    pub fn with_flight_datetime(mut self, flight_datetime: impl Into<String>) -> Self {
        self.flight_datetime = flight_datetime.into();
        self
    }

    /// File name stem for exported reports: `MB_{registration}_{mission}`
    ///
    /// Characters that are unsafe in file names are replaced with `_`.
    pub fn report_file_stem(&self) -> String {
        let sanitize = |s: &str| -> String {
            s.chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
                .collect()
        };
        format!("MB_{}_{}", sanitize(&self.registration), sanitize(&self.mission_number))
    }
}

impl Default for FlightInfo {
    fn default() -> Self {
        FlightInfo::new("CS-XXX", "001")
    }
}

/// Format a timestamp the way load sheets print it
pub fn format_flight_datetime(at: DateTime<Utc>) -> String {
    at.format(FLIGHT_DATETIME_FORMAT).to_string()
}
