//! # File I/O Module
//!
//! File operations around the calculator:
//! - **Profile tables**: load a user aircraft table from `.toml` or `.json`
//! - **Atomic report writes**: write to .tmp, sync, rename, so a half-written
//!   load sheet never replaces a good one
//!
//! ## Example
//!
//! ```rust,no_run
//! use mb_core::file_io::{load_fleet, write_report};
//! use std::path::Path;
//!
//! let fleet = load_fleet(Path::new("club_fleet.toml"))?;
//! println!("{} aircraft loaded", fleet.len());
//!
//! write_report(Path::new("MB_CS-DXY_042.txt"), b"MASS & BALANCE REPORT")?;
//! # Ok::<(), mb_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::aircraft::Fleet;
use crate::errors::{CalcError, CalcResult};
use crate::flight::FlightInfo;

/// Load an aircraft profile table.
///
/// The format is chosen by extension: `.json` is parsed as JSON, anything
/// else as TOML. Every profile is validated; a broken table is rejected as
/// a whole.
///
/// # Returns
///
/// * `Ok(Fleet)` - Table parsed and validated
/// * `Err(CalcError::InvalidProfile)` - A profile violates an invariant
/// * `Err(CalcError::SerializationError)` - Invalid TOML/JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_fleet(path: &Path) -> CalcResult<Fleet> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let fleet = if is_json {
        Fleet::from_json_str(&contents)
    } else {
        Fleet::from_toml_str(&contents)
    }
    .map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("{} ({})", reason, path.display()),
        },
        other => other,
    })?;

    info!(path = %path.display(), count = fleet.len(), "Loaded aircraft table from file");
    Ok(fleet)
}

/// Write report bytes with atomic write semantics.
///
/// The write process:
/// 1. Write to a temporary file next to the target (`<name>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
pub fn write_report(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), bytes = bytes.len(), "Wrote report");
    Ok(())
}

/// Default export file name, e.g. `MB_CS-DXY_042.pdf`
pub fn default_report_name(info: &FlightInfo, ext: &str) -> String {
    format!("{}.{}", info.report_file_stem(), ext.trim_start_matches('.'))
}

/// `report.pdf` -> `report.pdf.tmp`
fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    tmp.into()
}
