//! # PDF Generation Module
//!
//! Renders a load sheet to PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via `{{PLACEHOLDER}}` substitution before compilation
//! - User-provided strings are escaped
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use mb_core::aircraft::Fleet;
//! use mb_core::calculations::{calculate, LoadInput};
//! use mb_core::flight::FlightInfo;
//! use mb_core::pdf::render_load_sheet_pdf;
//!
//! let fleet = Fleet::builtin().unwrap();
//! let tecnam = fleet.get("Tecnam P2008").unwrap();
//! let loads = LoadInput::new(430.0, 1.86, 150.0).with_baggage(10.0);
//! let result = calculate(tecnam, &loads).unwrap();
//!
//! let info = FlightInfo::new("CS-DXY", "042").with_operator("Sevenair Academy");
//! let pdf_bytes = render_load_sheet_pdf(tecnam, &result, &info).unwrap();
//! std::fs::write("MB_CS-DXY_042.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use tracing::debug;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::aircraft::AircraftProfile;
use crate::calculations::{CalculationResult, Severity};
use crate::errors::{CalcError, CalcResult};
use crate::flight::FlightInfo;
use crate::report::{fuel_summary, limits_lines};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Fonts bundled with typst-assets (Libertinus Serif, DejaVu Sans Mono, ...)
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for a single-page load sheet
const LOAD_SHEET_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Loadsheet Mass & Balance]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Mission: {{MISSION}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 11pt)

// Title Block
#align(center)[
  #block(width: 100%, fill: rgb("#1a3257"), inset: 12pt, radius: 4pt)[
    #text(size: 20pt, weight: "bold", fill: white)[MASS & BALANCE REPORT]
    #v(4pt)
    #text(size: 14pt, fill: white)[{{AIRCRAFT}}]
  ]
]

#v(12pt)

#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 4pt,
  [Aircraft:], [{{AIRCRAFT}} ({{REGISTRATION}})],
  [Mission Number:], [{{MISSION}}],
  [Flight (UTC):], [{{FLIGHT_DATETIME}}],
  [Operator:], [{{OPERATOR}}],
)

#v(8pt)

== Operational Limits

#text(fill: rgb("#1e1e1e"))[
{{LIMITS}}
]

#v(8pt)

== Mass & Balance Table

#table(
  columns: (1fr, auto, auto, auto),
  inset: 8pt,
  stroke: 0.5pt + rgb("#e0e5ef"),
  align: (left, right, right, right),
  fill: (_, row) => if row == 0 { rgb("#1a3257") } else { none },
  table.header(
    text(fill: white, weight: "bold")[Item],
    text(fill: white, weight: "bold")[Weight ({{W_UNIT}})],
    text(fill: white, weight: "bold")[Arm ({{ARM_UNIT}})],
    text(fill: white, weight: "bold")[Moment ({{MOMENT_UNIT}})],
  ),
{{ITEM_ROWS}}
)

#v(8pt)

== Summary

#text(fill: rgb("#0064aa"), weight: "bold")[Fuel: {{FUEL}}] \
#text(fill: {{WEIGHT_COLOR}}, weight: "bold")[Total Weight: {{TOTAL_WEIGHT}} {{W_UNIT}}] \
Total Moment: {{TOTAL_MOMENT}} {{MOMENT_UNIT}} \
{{CG_LINES}}

{{ALERTS}}

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(4pt)

#text(size: 9pt, fill: gray, style: "italic")[
  Generated by Loadsheet on {{DATE}} \
  Planning aid only. Verify against the approved flight manual and weighing report.
]
"##;

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render a load sheet to PDF.
///
/// # Arguments
///
/// * `profile` - Aircraft the result was computed for
/// * `result` - The calculation result
/// * `info` - Registration, mission number, flight time, operator
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::ReportFailed)` - If Typst compilation or export fails
pub fn render_load_sheet_pdf(
    profile: &AircraftProfile,
    result: &CalculationResult,
    info: &FlightInfo,
) -> CalcResult<Vec<u8>> {
    let source = build_load_sheet_source(profile, result, info);
    debug!(aircraft = %profile.name, bytes = source.len(), "Compiling load sheet template");
    compile_pdf(source)
}

/// Fill the template. Split out so the markup can be checked without
/// running the compiler.
fn build_load_sheet_source(profile: &AircraftProfile, result: &CalculationResult, info: &FlightInfo) -> String {
    let units = &profile.units;
    let operator = if info.operator.is_empty() {
        "-".to_string()
    } else {
        escape_typst(&info.operator)
    };

    LOAD_SHEET_TEMPLATE
        .replace("{{AIRCRAFT}}", &escape_typst(&profile.name))
        .replace("{{REGISTRATION}}", &escape_typst(&info.registration))
        .replace("{{MISSION}}", &escape_typst(&info.mission_number))
        .replace("{{FLIGHT_DATETIME}}", &escape_typst(&info.flight_datetime))
        .replace("{{OPERATOR}}", &operator)
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{LIMITS}}", &build_limits_list(profile))
        .replace("{{W_UNIT}}", &escape_typst(&units.weight))
        .replace("{{ARM_UNIT}}", &escape_typst(&units.arm))
        .replace("{{MOMENT_UNIT}}", &escape_typst(&units.moment()))
        .replace("{{ITEM_ROWS}}", &build_item_rows(result))
        .replace("{{FUEL}}", &escape_typst(&fuel_summary(profile, result)))
        .replace("{{WEIGHT_COLOR}}", severity_color(Some(result.weight_severity)))
        .replace("{{TOTAL_WEIGHT}}", &format!("{:.2}", result.total_weight))
        .replace("{{TOTAL_MOMENT}}", &format!("{:.2}", result.total_moment))
        .replace("{{CG_LINES}}", &build_cg_lines(profile, result))
        .replace("{{ALERTS}}", &build_alerts(result))
}

fn compile_pdf(source: String) -> CalcResult<Vec<u8>> {
    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::ReportFailed {
            reason: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::ReportFailed {
            reason: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })
}

/// Typst colour for a severity; `None` (unchecked) renders black
fn severity_color(severity: Option<Severity>) -> &'static str {
    match severity {
        Some(Severity::Ok) => "rgb(\"#00ba45\")",
        Some(Severity::NearLimit) => "rgb(\"#e8870f\")",
        Some(Severity::Exceeded) => "rgb(\"#e13d2b\")",
        None => "black",
    }
}

fn build_limits_list(profile: &AircraftProfile) -> String {
    limits_lines(profile)
        .iter()
        .map(|line| format!("- {}", escape_typst(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_item_rows(result: &CalculationResult) -> String {
    result
        .items
        .iter()
        .map(|item| {
            format!(
                "  [{}], [{:.2}], [{:.3}], [{:.2}],",
                escape_typst(&item.label),
                item.weight,
                item.arm,
                item.moment
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_cg_lines(profile: &AircraftProfile, result: &CalculationResult) -> String {
    let arm = escape_typst(&profile.units.arm);
    match &profile.cg_limits {
        Some(envelope) => format!(
            "#text(fill: {}, weight: \"bold\")[CG: {:.3} {}] \\\nCG Limits: {:.3} to {:.3} {}",
            severity_color(Some(result.cg_severity)),
            result.cg,
            arm,
            envelope.min,
            envelope.max,
            arm
        ),
        None => format!(
            "#text(fill: {})[CG: {:.3} {}]",
            severity_color(None),
            result.cg,
            arm
        ),
    }
}

fn build_alerts(result: &CalculationResult) -> String {
    result
        .alerts
        .iter()
        .map(|alert| {
            format!(
                "#block(fill: rgb(\"#ffe6e0\"), stroke: (left: 4pt + rgb(\"#e13d2b\")), inset: 8pt, width: 100%)[#text(fill: rgb(\"#e13d2b\"), weight: \"bold\")[WARNING: {}]]",
                escape_typst(&alert.message())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '/' => "\\/".to_string(),
            '~' => "\\~".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::tests::{cessna_150, tecnam};
    use crate::calculations::{calculate, LoadInput};

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("CS#1 [A]"), "CS\\#1 \\[A\\]");
        assert_eq!(escape_typst("a/b_c"), "a\\/b\\_c");
        assert_eq!(escape_typst("Tecnam P2008"), "Tecnam P2008");
    }

    #[test]
    fn test_template_fully_substituted() {
        let profile = tecnam();
        let loads = LoadInput::new(430.0, 1.86, 150.0).with_baggage(10.0);
        let result = calculate(&profile, &loads).unwrap();
        let source = build_load_sheet_source(&profile, &result, &FlightInfo::new("CS-DXY", "042"));

        assert!(!source.contains("{{"), "unsubstituted placeholder left in template");
        assert!(source.contains("[Empty Weight], [430.00], [1.860], [799.80],"));
        assert!(source.contains("- Max Takeoff Weight: 650 kg"));
        // Weight at exactly MTOW is near the limit: orange
        assert!(source.contains("#text(fill: rgb(\"#e8870f\"), weight: \"bold\")[Total Weight: 650.00 kg]"));
        assert!(!source.contains("WARNING"));
    }

    #[test]
    fn test_alerts_and_unchecked_cg_in_source() {
        let profile = cessna_150();
        let loads = LoadInput::new(1100.0, 33.0, 340.0).with_split_baggage(130.0, 10.0);
        let result = calculate(&profile, &loads).unwrap();
        let source = build_load_sheet_source(&profile, &result, &FlightInfo::default());

        assert!(source.contains("WARNING: Baggage Area 1 exceeds limit!"));
        assert!(source.contains("WARNING: Total baggage exceeds 120 lb limit!"));
        assert!(source.contains("#text(fill: black)[CG:"));
    }

    #[test]
    fn test_pdf_generation() {
        let profile = tecnam();
        let loads = LoadInput::new(430.0, 1.86, 150.0)
            .with_baggage(10.0)
            .with_manual_fuel(124.0);
        let result = calculate(&profile, &loads).unwrap();
        let info = FlightInfo::new("CS-DXY", "042").with_operator("Sevenair Academy");

        let pdf = render_load_sheet_pdf(&profile, &result, &info);

        // Should succeed
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        // PDF should start with %PDF
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }
}
