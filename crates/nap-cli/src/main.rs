//! `nap` CLI — compute an in-flight nap window from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Plan a nap for an overnight flight from GMT-7 to GMT+1
//! nap plan \
//!     --usual-wake 07:30 --usual-bed 23:00 \
//!     --flight-day-wake 05:00 \
//!     --preferred-wake 09:00 --preferred-bed 23:00 \
//!     --arrival-day-bed 01:30 \
//!     --home-tz -07:00 --dest-tz +01:00 \
//!     --depart 20:30 --arrive 13:00
//!
//! # Same trip with a custom rules table and the full computed details
//! nap plan ... --config rules.json --details
//!
//! # Emit the raw plan result as JSON
//! nap plan ... --json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nap_engine::{plan, render, render_details, PlannerConfig, TripInputs};

#[derive(Parser)]
#[command(
    name = "nap",
    version,
    about = "In-flight nap planner for travelers crossing time zones"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the recommended nap window for a trip
    Plan {
        /// Usual wake time at home (HH:MM)
        #[arg(long)]
        usual_wake: String,
        /// Usual bed time at home (HH:MM)
        #[arg(long)]
        usual_bed: String,
        /// Latest wake time on the day of the flight (HH:MM)
        #[arg(long)]
        flight_day_wake: String,
        /// Preferred wake time at the destination (HH:MM)
        #[arg(long)]
        preferred_wake: String,
        /// Preferred bed time at the destination (HH:MM)
        #[arg(long)]
        preferred_bed: String,
        /// Earliest bed time on the arrival day (HH:MM)
        #[arg(long)]
        arrival_day_bed: String,
        /// Home UTC offset (±HH:MM)
        #[arg(long, allow_hyphen_values = true)]
        home_tz: String,
        /// Destination UTC offset (±HH:MM)
        #[arg(long, allow_hyphen_values = true)]
        dest_tz: String,
        /// Departure clock time in the home offset (HH:MM)
        #[arg(long)]
        depart: String,
        /// Arrival clock time in the destination offset (HH:MM)
        #[arg(long)]
        arrive: String,
        /// JSON file overriding the default rules table and thresholds
        #[arg(long)]
        config: Option<String>,
        /// Print the full computed details instead of the summary
        #[arg(long)]
        details: bool,
        /// Emit the raw plan result as JSON
        #[arg(long, conflicts_with = "details")]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            usual_wake,
            usual_bed,
            flight_day_wake,
            preferred_wake,
            preferred_bed,
            arrival_day_bed,
            home_tz,
            dest_tz,
            depart,
            arrive,
            config,
            details,
            json,
        } => {
            let config = load_config(config.as_deref())?;
            let inputs = TripInputs {
                usual_wake_time: usual_wake,
                usual_bed_time: usual_bed,
                flight_day_wake_time: flight_day_wake,
                preferred_wake_time: preferred_wake,
                preferred_bed_time: preferred_bed,
                arrival_day_bed_time: arrival_day_bed,
                home_time_zone: home_tz,
                dest_time_zone: dest_tz,
                flight_depart_time: depart,
                flight_arrival_time: arrive,
            };

            let result = plan(&inputs, &config).context("Failed to compute a nap plan")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if details {
                println!("{}", render_details(&result));
            } else {
                println!("{}", render(&result));
            }
        }
    }

    Ok(())
}

/// Load the planner configuration, or fall back to the built-in defaults.
///
/// The file only needs to name the values it overrides; everything else
/// keeps its default.
fn load_config(path: Option<&str>) -> Result<PlannerConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path))
        }
        None => Ok(PlannerConfig::default()),
    }
}
