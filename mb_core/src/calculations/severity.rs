//! # Severity Classification
//!
//! Three-level rating of a value against its limit, so that every consumer
//! (terminal table, PDF, a future UI) colours totals the same way without
//! re-deriving thresholds.
//!
//! ```rust
//! use mb_core::calculations::{classify_severity, Severity, DEFAULT_NEAR_MARGIN};
//!
//! assert_eq!(classify_severity(600.0, Some(650.0), DEFAULT_NEAR_MARGIN), Severity::Ok);
//! assert_eq!(classify_severity(640.0, Some(650.0), DEFAULT_NEAR_MARGIN), Severity::NearLimit);
//! assert_eq!(classify_severity(651.0, Some(650.0), DEFAULT_NEAR_MARGIN), Severity::Exceeded);
//! assert_eq!(classify_severity(9999.0, None, DEFAULT_NEAR_MARGIN), Severity::Ok);
//! ```

use serde::{Deserialize, Serialize};

use crate::aircraft::CgEnvelope;

/// Fraction of a limit (or of the CG envelope width) treated as "near".
pub const DEFAULT_NEAR_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Ok,
    NearLimit,
    Exceeded,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::NearLimit => "NEAR LIMIT",
            Severity::Exceeded => "EXCEEDED",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Rate `value` against an upper `limit`.
///
/// `Exceeded` above the limit, `NearLimit` in the top `near_margin`
/// fraction below it, `Ok` otherwise. No limit means no rating: `Ok`.
pub fn classify_severity(value: f64, limit: Option<f64>, near_margin: f64) -> Severity {
    let Some(limit) = limit else {
        return Severity::Ok;
    };
    if value > limit {
        Severity::Exceeded
    } else if value > limit * (1.0 - near_margin) {
        Severity::NearLimit
    } else {
        Severity::Ok
    }
}

/// Rate a CG position against the envelope.
///
/// The near band is `near_margin` of the envelope width, measured inward
/// from both the forward and the aft limit.
pub fn classify_cg(cg: f64, envelope: Option<&CgEnvelope>, near_margin: f64) -> Severity {
    let Some(envelope) = envelope else {
        return Severity::Ok;
    };
    let margin = envelope.width() * near_margin;
    if !envelope.contains(cg) {
        Severity::Exceeded
    } else if cg < envelope.min + margin || cg > envelope.max - margin {
        Severity::NearLimit
    } else {
        Severity::Ok
    }
}
