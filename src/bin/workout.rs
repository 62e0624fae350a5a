//! Workout CLI - Command-line interface for Workout Report
//!
//! Commands:
//! - demo: Print reports for the reference sensor packages
//! - report: Compute one report from command-line readings
//! - transform: Compute reports for a file of sensor packages (batch mode)
//! - kinds: List recognized activity kinds and their field layouts

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use workout_report::{
    compute_report, compute_reports, sample_packages, ActivityKind, ComputeError, SensorPackage,
    WorkoutReport, VERSION,
};

/// Workout - Summaries of raw workout sensor readings
#[derive(Parser)]
#[command(name = "workout")]
#[command(version = VERSION)]
#[command(about = "Compute workout distance, speed and calories", long_about = None)]
struct Cli {
    /// Log dispatch and computed metrics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print reports for the reference sensor packages
    Demo,

    /// Compute one report from command-line readings
    Report {
        /// Activity kind code (RUN, WLK, SWM)
        kind: String,

        /// Readings in the kind's positional order
        #[arg(allow_negative_numbers = true)]
        fields: Vec<f64>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute reports for a file of sensor packages (batch mode)
    Transform {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// List recognized activity kinds and their field layouts
    Kinds {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one package per line)
    Ndjson,
    /// JSON array of packages
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One rendered message per line
    Text,
    /// Newline-delimited JSON (one report per line)
    Ndjson,
    /// JSON array of reports
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let error = CliError::from(e);
            let rendered =
                serde_json::to_string(&error).unwrap_or_else(|_| "Unknown error".to_string());
            eprintln!("{}", rendered);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only reports.
///
/// Silent unless `--verbose` or `RUST_LOG` asks for it, so a failing run leaves
/// nothing on stderr but the JSON error object.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "off" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(atty::is(atty::Stream::Stderr)),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), WorkoutCliError> {
    match cli.command {
        Commands::Demo => cmd_demo(),
        Commands::Report { kind, fields, json } => cmd_report(&kind, &fields, json),
        Commands::Transform {
            input,
            output,
            input_format,
            output_format,
        } => cmd_transform(&input, &output, input_format, output_format),
        Commands::Kinds { json } => cmd_kinds(json),
    }
}

fn cmd_demo() -> Result<(), WorkoutCliError> {
    let reports = compute_reports(&sample_packages())?;
    print!("{}", format_output(&reports, &OutputFormat::Text)?);
    Ok(())
}

fn cmd_report(kind: &str, fields: &[f64], json: bool) -> Result<(), WorkoutCliError> {
    let report = compute_report(kind, fields)?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}

fn cmd_transform(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
) -> Result<(), WorkoutCliError> {
    // Read input
    let input_data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("Reading sensor packages from the terminal; finish with Ctrl-D");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    // Parse packages
    let packages = match input_format {
        InputFormat::Ndjson => SensorPackage::parse_ndjson(&input_data)?,
        InputFormat::Json => SensorPackage::parse_array(&input_data)?,
    };

    if packages.is_empty() {
        return Err(WorkoutCliError::NoPackages);
    }

    tracing::debug!(count = packages.len(), "computing reports");
    let reports = compute_reports(&packages)?;

    // Write output
    let output_data = format_output(&reports, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_kinds(json: bool) -> Result<(), WorkoutCliError> {
    let kinds: Vec<KindInfo> = ActivityKind::ALL
        .iter()
        .map(|kind| KindInfo {
            code: kind.code(),
            label: kind.label(),
            fields: kind.field_names().to_vec(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&kinds)?);
    } else {
        println!("Activity Kinds");
        println!("==============");
        for info in &kinds {
            println!("  {}  {:<14} {}", info.code, info.label, info.fields.join(", "));
        }
    }

    Ok(())
}

// Helper functions

fn format_output(
    reports: &[WorkoutReport],
    format: &OutputFormat,
) -> Result<String, WorkoutCliError> {
    match format {
        OutputFormat::Text => {
            let lines: Vec<String> = reports.iter().map(WorkoutReport::message).collect();
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for report in reports {
                lines.push(serde_json::to_string(report)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(reports)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(reports)?),
    }
}

// Error types

#[derive(Debug)]
enum WorkoutCliError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
    NoPackages,
}

impl From<io::Error> for WorkoutCliError {
    fn from(e: io::Error) -> Self {
        WorkoutCliError::Io(e)
    }
}

impl From<ComputeError> for WorkoutCliError {
    fn from(e: ComputeError) -> Self {
        WorkoutCliError::Compute(e)
    }
}

impl From<serde_json::Error> for WorkoutCliError {
    fn from(e: serde_json::Error) -> Self {
        WorkoutCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<WorkoutCliError> for CliError {
    fn from(e: WorkoutCliError) -> Self {
        match e {
            WorkoutCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            WorkoutCliError::Compute(e) => {
                let (code, hint) = match &e {
                    ComputeError::InvalidActivityKind { .. } => (
                        "INVALID_ACTIVITY_KIND",
                        "Run 'workout kinds' to list recognized codes",
                    ),
                    ComputeError::ArityMismatch { .. } => (
                        "ARITY_MISMATCH",
                        "Run 'workout kinds' to see each kind's field layout",
                    ),
                    ComputeError::InvalidField { .. } => {
                        ("INVALID_FIELD", "Check the sensor readings")
                    }
                    ComputeError::ParseError(_) | ComputeError::JsonError(_) => (
                        "PARSE_ERROR",
                        "Packages look like {\"kind\": \"RUN\", \"data\": [15000, 1, 75]}",
                    ),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            WorkoutCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            WorkoutCliError::NoPackages => CliError {
                code: "NO_PACKAGES".to_string(),
                message: "No sensor packages found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct KindInfo {
    code: &'static str,
    label: &'static str,
    fields: Vec<&'static str>,
}
