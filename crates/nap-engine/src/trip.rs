//! Trip input records and wall-clock normalization.
//!
//! [`TripInputs`] is the raw ten-field record supplied by the caller.
//! [`TripTimes`] is the normalized, immutable form built once per planning
//! call: every wall-clock string resolved to an absolute instant, anchored to
//! the flight so day rollovers land on the right calendar day. The caller's
//! record is never written to.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::resolve::{parse_utc_offset, resolve};

/// Raw trip inputs: six wall-clock preference strings (`HH:MM[:SS]`), two
/// signed UTC offsets (`±HH:MM`), and the two flight clock times read in the
/// respective offset (departure in the home zone, arrival in the destination
/// zone).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripInputs {
    /// Usual wake time at home.
    pub usual_wake_time: String,
    /// Usual bed time at home.
    pub usual_bed_time: String,
    /// Latest wake time on the day of the flight.
    pub flight_day_wake_time: String,
    /// Preferred wake time at the destination.
    pub preferred_wake_time: String,
    /// Preferred bed time at the destination.
    pub preferred_bed_time: String,
    /// Earliest bed time on the arrival day.
    pub arrival_day_bed_time: String,
    /// Home UTC offset, `±HH:MM`.
    pub home_time_zone: String,
    /// Destination UTC offset, `±HH:MM`.
    pub dest_time_zone: String,
    /// Departure clock time, read in the home offset.
    pub flight_depart_time: String,
    /// Arrival clock time, read in the destination offset.
    pub flight_arrival_time: String,
}

/// Fully resolved trip times. All fields are absolute instants; the attached
/// offsets matter only for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTimes {
    pub home: FixedOffset,
    pub dest: FixedOffset,
    pub depart: DateTime<FixedOffset>,
    pub arrival: DateTime<FixedOffset>,
    pub usual_wake: DateTime<FixedOffset>,
    pub usual_bed: DateTime<FixedOffset>,
    pub flight_day_wake: DateTime<FixedOffset>,
    pub preferred_wake: DateTime<FixedOffset>,
    pub preferred_bed: DateTime<FixedOffset>,
    pub arrival_day_bed: DateTime<FixedOffset>,
}

impl TripTimes {
    /// Resolve the raw inputs into absolute instants.
    ///
    /// Departure and arrival are anchored to `reference` (the current instant
    /// when `None`); if the resolved arrival precedes departure it is
    /// advanced by one day. Home-side preferences inherit the departure date,
    /// destination-side preferences inherit the arrival date.
    ///
    /// # Errors
    /// Propagates `InvalidTimeFormat` / `InvalidOffset` from the resolver.
    pub fn resolve(
        inputs: &TripInputs,
        config: &PlannerConfig,
        reference: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let home = parse_utc_offset(&inputs.home_time_zone)?;
        let dest = parse_utc_offset(&inputs.dest_time_zone)?;

        // One clock read, shared by both flight endpoints.
        let anchor = reference.unwrap_or_else(Utc::now).with_timezone(&home);

        let depart = resolve(&inputs.flight_depart_time, home, Some(anchor))?;
        let mut arrival = resolve(&inputs.flight_arrival_time, dest, Some(anchor))?;

        // Overnight flights read as arriving "before" departure on the clock;
        // the arrival is actually the next calendar day.
        if arrival < depart {
            arrival += Duration::days(1);
        }

        let usual_wake = resolve(&inputs.usual_wake_time, home, Some(depart))?;
        let usual_bed = resolve(&inputs.usual_bed_time, home, Some(depart))?;
        let flight_day_wake = resolve(&inputs.flight_day_wake_time, home, Some(depart))?;

        let preferred_wake = resolve(&inputs.preferred_wake_time, dest, Some(arrival))?;
        let preferred_bed = resolve(&inputs.preferred_bed_time, dest, Some(arrival))?;
        let mut arrival_day_bed = resolve(&inputs.arrival_day_bed_time, dest, Some(arrival))?;

        if config.roll_arrival_bed_forward && preferred_bed > arrival_day_bed {
            arrival_day_bed += Duration::days(1);
        }

        Ok(Self {
            home,
            dest,
            depart,
            arrival,
            usual_wake,
            usual_bed,
            flight_day_wake,
            preferred_wake,
            preferred_bed,
            arrival_day_bed,
        })
    }
}
