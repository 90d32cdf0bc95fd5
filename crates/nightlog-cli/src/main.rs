// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nightlog_core::airports::AirportTable;
use nightlog_core::config::NightConfig;
use nightlog_core::logbook::{DerivedLogbookValues, PilotRole};
use nightlog_core::ofp::OfpExtractor;
use nightlog_core::submit::{submit_flight_record, LogbookSubmitter};
use nightlog_core::{compute_flight_record, FlightRecord};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(short, long, env = "NIGHTLOG_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Line,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the flight facts found in an OFP
    Extract {
        /// OFP text file, or '-' for stdin
        ofp: PathBuf,
    },
    /// Compute night time, landings and logbook values for an OFP
    Compute {
        /// OFP text file, or '-' for stdin
        ofp: PathBuf,
        /// Airport coordinates CSV (icao,lat,lon)
        #[arg(short, long, env = "NIGHTLOG_AIRPORTS")]
        airports: PathBuf,
        /// PF or PM; anything else counts as PF
        #[arg(short, long)]
        role: Option<String>,
        /// Sun altitude in degrees below which a minute is night
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<f64>,
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Print the submission payload instead of only the record
        #[arg(long)]
        dry_run: bool,
    },
}

/// Stands in for the logbook service: prints the payload it would send.
struct StdoutSubmitter;

impl LogbookSubmitter for StdoutSubmitter {
    fn submit(&self, values: &DerivedLogbookValues) -> Result<String> {
        println!("{}", serde_json::to_string_pretty(values)?);
        Ok("dry-run".to_string())
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    // init fails only if a logger is already installed; keep that one.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn read_ofp(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read OFP from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read OFP {:?}", path))
    }
}

fn print_record(record: &FlightRecord, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Line => {
            println!("{}", record.values.to_log_line());
            println!("night: {}", record.night.reason);
            println!("landing: {}", record.landing.reason);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.unwrap_or_else(NightConfig::default_path);
    let mut config = NightConfig::load_or_default(&config_path)?;

    match cli.command {
        Commands::Extract { ofp } => {
            let text = read_ofp(&ofp)?;
            let facts = OfpExtractor::new(&config.carrier_code).extract(&text);
            println!("{}", serde_json::to_string_pretty(&facts)?);
        }
        Commands::Compute {
            ofp,
            airports,
            role,
            threshold,
            format,
            dry_run,
        } => {
            if let Some(t) = threshold {
                config.twilight_threshold_deg = t;
            }
            let role = role
                .as_deref()
                .map(PilotRole::parse_lenient)
                .unwrap_or(config.default_role);

            let text = read_ofp(&ofp)?;
            let table = AirportTable::from_csv_path(&airports)
                .with_context(|| format!("Failed to load airport table {:?}", airports))?;

            if dry_run {
                let (record, _) =
                    submit_flight_record(&StdoutSubmitter, &text, role, &table, &config)?;
                if matches!(format, OutputFormat::Line) {
                    print_record(&record, format)?;
                }
            } else {
                let record = compute_flight_record(&text, role, &table, &config)?;
                print_record(&record, format)?;
            }
        }
    }

    Ok(())
}
