//! Catchment CLI.
//!
//! Drives one selection end to end: load the configured datasets, pick a
//! facility, run the radius or shape membership test, write the CSV export.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use catchment::config::Config;
use catchment::export;
use catchment::parse::{decompose_all, RegexLabeller};
use catchment::repo::AddressRepository;
use catchment::select::{
    is_supported_radius, select_in_features, select_within_radius, SelectionSession,
    RADIUS_STEPS_MILES,
};

#[derive(Parser, Debug)]
#[command(name = "catchment")]
#[command(about = "Geospatial address selection around school facilities")]
struct Args {
    /// Dataset configuration file
    #[arg(short, long, default_value = "catchment.toml")]
    config: PathBuf,

    /// Directory CSV exports are written into
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List facility labels
    Facilities,

    /// Select addresses within a radius of a facility
    Radius {
        /// Facility display name
        #[arg(long)]
        facility: String,

        /// Radius in statute miles, one of the fixed steps
        #[arg(long)]
        radius: f64,
    },

    /// Select addresses inside drawn shapes
    Shapes {
        /// Facility display name
        #[arg(long)]
        facility: String,

        /// JSON file holding an array of drawn features
        #[arg(long)]
        features: PathBuf,

        /// Decompose matched addresses into structured rows
        #[arg(long)]
        parse: bool,

        /// Decompose and expand hyphenated unit ranges
        #[arg(long, conflicts_with = "parse")]
        expand: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = Config::load_from_file(&args.config)
        .with_context(|| format!("Loading config {}", args.config.display()))?;
    let repo = AddressRepository::load(&config)?;

    match args.command {
        Command::Facilities => {
            for label in repo.facility_labels() {
                println!("{label}");
            }
            Ok(())
        }
        Command::Radius { facility, radius } => run_radius(&args.out, &repo, &facility, radius),
        Command::Shapes {
            facility,
            features,
            parse,
            expand,
        } => run_shapes(&args.out, &repo, &facility, &features, parse, expand),
    }
}

fn run_radius(out: &Path, repo: &AddressRepository, facility: &str, radius: f64) -> Result<()> {
    if !is_supported_radius(radius) {
        bail!("radius {radius} is not one of the supported steps {RADIUS_STEPS_MILES:?}");
    }
    let facility = repo
        .facility(facility)
        .with_context(|| format!("Unknown facility `{facility}`"))?;
    let records = repo.region_records(facility)?;

    let mut session = SelectionSession::new();
    let result = session.preview(|| Ok(select_within_radius(facility, records, radius)))?;

    let path = out.join(export::export_filename(
        &facility.label,
        &export::radius_suffix(radius),
    ));
    let file = fs::File::create(&path)
        .with_context(|| format!("Creating export file {}", path.display()))?;
    export::write_distance_csv(file, &result.matched)?;
    info!("Wrote {} rows to {}", result.total, path.display());
    Ok(())
}

fn run_shapes(
    out: &Path,
    repo: &AddressRepository,
    facility: &str,
    features_path: &Path,
    parse: bool,
    expand: bool,
) -> Result<()> {
    let facility = repo
        .facility(facility)
        .with_context(|| format!("Unknown facility `{facility}`"))?;
    let records = repo.region_records(facility)?;

    let text = fs::read_to_string(features_path)
        .with_context(|| format!("Reading feature file {}", features_path.display()))?;
    let features: Vec<Value> =
        serde_json::from_str(&text).context("Feature file must hold a JSON array of features")?;

    let mut session = SelectionSession::new();
    let result = session.preview(|| select_in_features(records, &features))?;

    let suffix = if expand {
        "shapes_expanded"
    } else if parse {
        "shapes_parsed"
    } else {
        "shapes"
    };
    let path = out.join(export::export_filename(&facility.label, suffix));
    let file = fs::File::create(&path)
        .with_context(|| format!("Creating export file {}", path.display()))?;

    if parse || expand {
        let labeller = RegexLabeller::new();
        let rows = decompose_all(
            result.matched.iter().map(|m| m.record.raw_text.as_str()),
            &labeller,
        );
        if expand {
            export::write_expanded_csv(file, &rows)?;
        } else {
            export::write_parsed_csv(file, &rows)?;
        }
        info!("Wrote {} structured rows to {}", rows.len(), path.display());
    } else {
        export::write_containment_csv(file, &result.matched)?;
        info!("Wrote {} rows to {}", result.total, path.display());
    }
    Ok(())
}
