//! # Loadsheet CLI
//!
//! Command-line front end for `mb_core`: list the fleet, print limits,
//! compute a load sheet and export it as text or PDF.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mb_core::config::{load_config, load_config_or_default};
use mb_core::flight::FlightInfo;
use mb_core::pdf::render_load_sheet_pdf;
use mb_core::report::{limits_text, render_text_report};
use mb_core::{
    calculate_with_margin, default_report_name, load_fleet, write_report, AircraftProfile, CalculationResult,
    Fleet, LoadInput, PlannerConfig,
};

mod output;

#[derive(Parser, Debug)]
#[command(author, version, about = "Aircraft mass & balance calculator", long_about = None)]
struct Cli {
    /// Aircraft table (.toml or .json) replacing the built-in fleet
    #[arg(long, global = true)]
    fleet: Option<PathBuf>,

    /// Config file (defaults to ./loadsheet.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the aircraft in the table
    List,
    /// Print the operational limits of one aircraft
    Limits {
        /// Aircraft name, e.g. "Cessna 152"
        aircraft: String,
    },
    /// Compute a load sheet
    Calc {
        #[command(flatten)]
        loads: LoadArgs,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Compute a load sheet and export it
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct LoadArgs {
    /// Aircraft name, e.g. "Tecnam P2008"
    aircraft: String,

    /// Basic empty weight
    #[arg(long)]
    empty_weight: f64,

    /// Arm of the empty weight
    #[arg(long)]
    empty_arm: f64,

    /// Pilot and passenger weight
    #[arg(long, default_value_t = 0.0)]
    pilot: f64,

    /// Baggage weight (area 1 on split-compartment aircraft)
    #[arg(long, default_value_t = 0.0)]
    baggage: f64,

    /// Baggage area 2 weight
    #[arg(long)]
    baggage2: Option<f64>,

    /// Fuel volume; maximum permissible fuel is computed when omitted
    #[arg(long)]
    fuel: Option<f64>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[command(flatten)]
    loads: LoadArgs,

    #[arg(long, value_enum, default_value_t = ReportFormat::Pdf)]
    format: ReportFormat,

    #[arg(long, default_value = "CS-XXX")]
    registration: String,

    #[arg(long, default_value = "001")]
    mission: String,

    /// Flight date/time, free text (defaults to now, UTC)
    #[arg(long)]
    flight_time: Option<String>,

    /// Operator name (overrides the config file)
    #[arg(long)]
    operator: Option<String>,

    /// Output path (defaults to MB_<registration>_<mission>.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ReportFormat {
    Pdf,
    Text,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Text => "txt",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = resolve_config(cli.config.as_deref())?;
    let fleet = resolve_fleet(cli.fleet.as_deref(), &config)?;

    match cli.command {
        Command::List => {
            println!("{}", output::fleet_table(&fleet));
        }
        Command::Limits { aircraft } => {
            let profile = fleet.get(&aircraft)?;
            println!("{}", profile.name);
            println!("{}", limits_text(profile));
        }
        Command::Calc { loads, json } => {
            let profile = fleet.get(&loads.aircraft)?;
            let result = run_calculation(profile, &loads, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output::print_result(profile, &result);
            }
        }
        Command::Report(args) => {
            let profile = fleet.get(&args.loads.aircraft)?;
            let result = run_calculation(profile, &args.loads, &config)?;
            export_report(profile, &result, &args, &config)?;
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn resolve_config(path: Option<&Path>) -> Result<PlannerConfig> {
    match path {
        Some(path) => load_config(path).with_context(|| format!("loading config {}", path.display())),
        None => {
            let cwd = env::current_dir().context("reading working directory")?;
            Ok(load_config_or_default(&cwd)?)
        }
    }
}

fn resolve_fleet(path: Option<&Path>, config: &PlannerConfig) -> Result<Fleet> {
    match path.or(config.fleet_path.as_deref()) {
        Some(path) => load_fleet(path).with_context(|| format!("loading aircraft table {}", path.display())),
        None => Ok(Fleet::builtin()?.clone()),
    }
}

fn build_loads(profile: &AircraftProfile, args: &LoadArgs) -> Result<LoadInput> {
    let loads = LoadInput::new(args.empty_weight, args.empty_arm, args.pilot);

    let loads = match (profile.baggage.is_split(), args.baggage2) {
        (true, area2) => loads.with_split_baggage(args.baggage, area2.unwrap_or(0.0)),
        (false, None) => loads.with_baggage(args.baggage),
        (false, Some(_)) => bail!("{} has a single baggage compartment; drop --baggage2", profile.name),
    };

    Ok(match args.fuel {
        Some(volume) => loads.with_manual_fuel(volume),
        None => loads.with_auto_fuel(),
    })
}

fn run_calculation(profile: &AircraftProfile, args: &LoadArgs, config: &PlannerConfig) -> Result<CalculationResult> {
    let loads = build_loads(profile, args)?;
    debug!(?loads, "Parsed loads");
    calculate_with_margin(profile, &loads, config.near_margin)
        .with_context(|| format!("calculating load sheet for {}", profile.name))
}

fn export_report(
    profile: &AircraftProfile,
    result: &CalculationResult,
    args: &ReportArgs,
    config: &PlannerConfig,
) -> Result<()> {
    let mut info = FlightInfo::new(&args.registration, &args.mission)
        .with_operator(args.operator.clone().unwrap_or_else(|| config.operator.clone()));
    if let Some(flight_time) = &args.flight_time {
        info = info.with_flight_datetime(flight_time);
    }

    let bytes = match args.format {
        ReportFormat::Pdf => render_load_sheet_pdf(profile, result, &info)?,
        ReportFormat::Text => render_text_report(profile, result, &info).into_bytes(),
    };

    let path = match &args.output {
        Some(path) => path.clone(),
        None => {
            let name = default_report_name(&info, args.format.extension());
            report_path(config.report_dir.as_deref(), &name)?
        }
    };

    write_report(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), format = ?args.format, "Report exported");
    println!("Report written to {}", path.display());

    if !result.alerts.is_empty() {
        for message in result.alert_messages() {
            eprintln!("WARNING: {}", message);
        }
    }
    Ok(())
}

/// Place `name` in the configured report directory, creating it if needed
fn report_path(report_dir: Option<&Path>, name: &str) -> Result<PathBuf> {
    match report_dir {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating report directory {}", dir.display()))?;
            Ok(dir.join(name))
        }
        None => Ok(PathBuf::from(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_args(aircraft: &str) -> LoadArgs {
        LoadArgs {
            aircraft: aircraft.to_string(),
            empty_weight: 1111.0,
            empty_arm: 33.4,
            pilot: 340.0,
            baggage: 20.0,
            baggage2: None,
            fuel: None,
        }
    }

    #[test]
    fn test_cli_parses_calc() {
        let cli = Cli::try_parse_from([
            "loadsheet",
            "calc",
            "Cessna 152",
            "--empty-weight",
            "1111",
            "--empty-arm",
            "33.4",
            "--pilot",
            "340",
            "--baggage2",
            "5",
            "--fuel",
            "20",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Calc { loads, json } => {
                assert!(json);
                assert_eq!(loads.baggage2, Some(5.0));
                assert_eq!(loads.fuel, Some(20.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_split_aircraft_defaults_area2() {
        let fleet = Fleet::builtin().unwrap();
        let c152 = fleet.get("Cessna 152").unwrap();
        let loads = build_loads(c152, &load_args("Cessna 152")).unwrap();
        assert!(loads.baggage.fits(&c152.baggage));
        assert_eq!(loads.baggage.total(), 20.0);
    }

    #[test]
    fn test_single_aircraft_rejects_area2() {
        let fleet = Fleet::builtin().unwrap();
        let tecnam = fleet.get("Tecnam P2008").unwrap();
        let mut args = load_args("Tecnam P2008");
        args.baggage2 = Some(3.0);
        assert!(build_loads(tecnam, &args).is_err());
    }

    #[test]
    fn test_report_format_extension() {
        assert_eq!(ReportFormat::Pdf.extension(), "pdf");
        assert_eq!(ReportFormat::Text.extension(), "txt");
    }

    #[test]
    fn test_report_path_creates_missing_dir() {
        let dir = env::temp_dir()
            .join(format!("loadsheet_reports_{}", std::process::id()))
            .join("nested");
        let _ = fs::remove_dir_all(&dir);

        let path = report_path(Some(dir.as_path()), "MB_CS-DXY_042.pdf").unwrap();
        assert!(dir.is_dir());
        assert_eq!(path, dir.join("MB_CS-DXY_042.pdf"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_report_path_without_dir() {
        assert_eq!(report_path(None, "MB_CS-XXX_001.txt").unwrap(), PathBuf::from("MB_CS-XXX_001.txt"));
    }
}
