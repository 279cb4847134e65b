//! Nap window planning: aggregates, rule evaluation, and the repair search.
//!
//! `plan` computes how long the traveler will be continuously awake, picks a
//! nap length from the rules table, centers a candidate window between the
//! home bedtime and the destination wake preference, and evaluates the
//! disallow rules. A disallowed window enters a bounded repair search that
//! nudges the nap (and, failing that, the wake-up anchor) in fixed steps
//! until the rules pass or the search space is exhausted.
//!
//! Every candidate is a fresh evaluation over the immutable [`TripTimes`]
//! record; nothing is written back onto the inputs between attempts.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Serialize;

use crate::config::{NapRule, PlannerConfig};
use crate::error::Result;
use crate::trip::{TripInputs, TripTimes};

/// The contiguous instant range recommended for an in-flight nap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NapWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl NapWindow {
    /// Whether this window overlaps `[start, end]`.
    ///
    /// Boundary contact is not an overlap: a nap that ends exactly when an
    /// exclusion period begins is allowed.
    pub fn overlaps(&self, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> bool {
        self.start < end && start < self.end
    }

    /// Whether `instant` falls strictly inside the window.
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        self.start < instant && instant < self.end
    }
}

/// Outcome of a planning call, handed to the report formatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanResult {
    /// Whether the (possibly repaired) nap window satisfies every rule, or no
    /// nap was required at all.
    pub allowed: bool,
    /// Every rule violated by the final candidate, in evaluation order.
    pub reasons: Vec<String>,
    /// Nap duration in hours; `0.0` when no nap is needed.
    pub nap_length: f64,
    /// The recommended window; `None` when no nap is needed.
    pub window: Option<NapWindow>,
    /// The window as first computed, before any repair offset.
    pub original_window: Option<NapWindow>,
    /// Whether the repair search ran.
    pub modified: bool,
    /// Earliest wake instant, including any repair wake shift.
    pub wakeup: DateTime<FixedOffset>,
    /// Latest bed instant.
    pub bed: DateTime<FixedOffset>,
    /// Flight duration in hours.
    pub flight_hours: f64,
    /// Continuous wakefulness from `wakeup` to `bed`, in hours.
    pub total_wakefulness: f64,
    /// Home UTC offset, for display.
    #[serde(serialize_with = "serialize_offset")]
    pub home: FixedOffset,
    /// Destination UTC offset, for display.
    #[serde(serialize_with = "serialize_offset")]
    pub dest: FixedOffset,
}

fn serialize_offset<S: serde::Serializer>(
    offset: &FixedOffset,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&offset.to_string())
}

/// Offsets applied to one candidate evaluation during the repair search.
#[derive(Debug, Clone, Copy, Default)]
struct Modifiers {
    /// Hours to slide the nap window, positive = later.
    nap_offset: f64,
    /// Hours to shift the wake-up anchor, positive = later.
    wake_shift: f64,
}

fn hours_between(later: DateTime<FixedOffset>, earlier: DateTime<FixedOffset>) -> f64 {
    (later - earlier).num_seconds() as f64 / 3600.0
}

fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

fn duration_from_hours(hours: f64) -> Duration {
    Duration::seconds((hours * 3600.0).round() as i64)
}

/// Compute the recommended nap window for a trip.
///
/// Reads the system clock to anchor the flight date. Prefer
/// [`plan_with_reference`] where determinism matters (tests always do).
///
/// # Errors
/// Propagates `InvalidTimeFormat` / `InvalidOffset` for malformed inputs.
pub fn plan(inputs: &TripInputs, config: &PlannerConfig) -> Result<PlanResult> {
    plan_with_reference(inputs, config, None)
}

/// Compute the recommended nap window, anchoring the flight to `reference`.
///
/// A disallowed result with a nap required enters the repair search:
/// forward then backward nap offsets bounded by the flight duration, then
/// backward and forward wake shifts bounded by `config.max_wake_shift`, all
/// in `config.nap_offset_attempt` steps. The first allowed candidate wins;
/// otherwise the last attempted candidate is returned with its reasons.
///
/// # Errors
/// Propagates `InvalidTimeFormat` / `InvalidOffset` for malformed inputs.
pub fn plan_with_reference(
    inputs: &TripInputs,
    config: &PlannerConfig,
    reference: Option<DateTime<Utc>>,
) -> Result<PlanResult> {
    let times = TripTimes::resolve(inputs, config, reference)?;

    let base = evaluate(&times, config, Modifiers::default());
    if base.allowed || base.nap_length == 0.0 {
        return Ok(base);
    }

    // The search only advances with a positive step.
    let step = config.nap_offset_attempt;
    if step <= 0.0 {
        return Ok(base);
    }

    let mut result = base.clone();
    let mut modified = false;

    // Slide the nap later, then earlier, never further than the flight lasts.
    for direction in [1.0, -1.0] {
        if result.allowed {
            break;
        }
        let mut offset = step * direction;
        while offset.abs() <= base.flight_hours {
            modified = true;
            result = evaluate(
                &times,
                config,
                Modifiers {
                    nap_offset: offset,
                    wake_shift: 0.0,
                },
            );
            if result.allowed {
                break;
            }
            offset += step * direction;
        }
    }

    // With the nap itself immovable, shift the wake-up anchor earlier, then
    // later, within the configured limit.
    for direction in [-1.0, 1.0] {
        if result.allowed {
            break;
        }
        let mut shift = step * direction;
        while shift.abs() <= config.max_wake_shift {
            modified = true;
            result = evaluate(
                &times,
                config,
                Modifiers {
                    nap_offset: 0.0,
                    wake_shift: shift,
                },
            );
            if result.allowed {
                break;
            }
            shift += step * direction;
        }
    }

    result.modified = modified;
    result.original_window = base.original_window.clone();
    Ok(result)
}

/// Evaluate one candidate: aggregates, nap-length lookup, window
/// construction, and every disallow rule. Violations accumulate in order;
/// nothing short-circuits, so the reasons list names every rule the
/// candidate breaks.
fn evaluate(times: &TripTimes, config: &PlannerConfig, modifiers: Modifiers) -> PlanResult {
    let flight_hours = round_hours(hours_between(times.arrival, times.depart));

    let mut wakeup = times.flight_day_wake.min(times.usual_wake);
    if modifiers.wake_shift != 0.0 {
        wakeup += duration_from_hours(modifiers.wake_shift);
    }

    let mut bed = times.preferred_bed.max(times.arrival_day_bed);
    if bed < times.arrival {
        bed += Duration::days(1);
    }

    let total_wakefulness = round_hours(hours_between(bed, wakeup));

    let rule = config.nap_rule_for(total_wakefulness);
    let nap_length = rule.map_or(0.0, |rule| rule.length);

    let mut reasons = Vec::new();
    let mut window = None;
    let mut original_window = None;

    if let Some(rule) = rule {
        // Center the nap on the midpoint between the home bedtime and the
        // destination wake preference, pulled back by half the nap length.
        let midpoint_hours =
            hours_between(times.preferred_wake, times.usual_bed) / 2.0 - nap_length / 2.0;
        let base_start = times.usual_bed + duration_from_hours(midpoint_hours);
        let start = base_start + duration_from_hours(modifiers.nap_offset);
        let candidate = NapWindow {
            start,
            end: start + duration_from_hours(nap_length),
        };

        check_rules(&candidate, rule, wakeup, bed, times, config, &mut reasons);

        original_window = Some(NapWindow {
            start: base_start,
            end: base_start + duration_from_hours(nap_length),
        });
        window = Some(candidate);
    } else if total_wakefulness > config.max_wakefulness {
        reasons.push(format!(
            "more than {} hours awake without sleep and no nap length covers it",
            config.max_wakefulness
        ));
    }

    PlanResult {
        allowed: reasons.is_empty(),
        reasons,
        nap_length,
        window,
        original_window,
        modified: false,
        wakeup,
        bed,
        flight_hours,
        total_wakefulness,
        home: times.home,
        dest: times.dest,
    }
}

/// Run the four disallow rules against a candidate window, pushing a reason
/// for each violation.
fn check_rules(
    window: &NapWindow,
    rule: &NapRule,
    wakeup: DateTime<FixedOffset>,
    bed: DateTime<FixedOffset>,
    times: &TripTimes,
    config: &PlannerConfig,
    reasons: &mut Vec<String>,
) {
    // 1. Take-off exclusion period.
    let takeoff_start = times.depart - duration_from_hours(config.hours_allowed_before_take_off);
    let takeoff_end = times.depart + duration_from_hours(config.hours_allowed_after_take_off);
    if window.overlaps(takeoff_start, takeoff_end) {
        reasons.push(format!(
            "nap overlaps the exclusion period from {} hours before take off to {} hours after",
            config.hours_allowed_before_take_off, config.hours_allowed_after_take_off
        ));
    }

    // 2. Landing exclusion period.
    let landing_start = times.arrival - duration_from_hours(config.hours_allowed_before_landing);
    let landing_end = times.arrival + duration_from_hours(config.hours_allowed_after_landing);
    if window.overlaps(landing_start, landing_end) {
        reasons.push(format!(
            "nap overlaps the exclusion period from {} hours before landing to {} hours after",
            config.hours_allowed_before_landing, config.hours_allowed_after_landing
        ));
    }

    // 3. A flight event strictly inside the window.
    if window.contains(times.depart) {
        reasons.push("take off falls inside the nap window".to_string());
    }
    if window.contains(times.arrival) {
        reasons.push("landing falls inside the nap window".to_string());
    }

    // 4. Minimum offsets from the wake and bed anchors, per the matched row.
    let start_offset = round_hours(hours_between(window.start, wakeup));
    let end_offset = round_hours(hours_between(bed, window.end));
    if start_offset < rule.min_start_offset_hours || end_offset < rule.min_end_offset_hours {
        reasons.push(format!(
            "a {} hour nap must start at least {} hours after waking and end at least {} hours before bed",
            rule.length, rule.min_start_offset_hours, rule.min_end_offset_hours
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    fn at(offset: FixedOffset, day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
        offset
            .with_ymd_and_hms(2026, 3, day, hour, minute, 0)
            .unwrap()
    }

    /// A trip whose base window both overlaps the take-off exclusion and
    /// starts too soon after waking.
    fn conflicted_times() -> TripTimes {
        let home = offset(-7);
        let dest = offset(1);
        TripTimes {
            home,
            dest,
            depart: at(home, 20, 21, 30),
            arrival: at(dest, 21, 13, 0),
            usual_wake: at(home, 20, 7, 30),
            usual_bed: at(home, 20, 23, 0),
            flight_day_wake: at(home, 20, 5, 0),
            preferred_wake: at(dest, 21, 9, 0),
            preferred_bed: at(dest, 21, 23, 0),
            arrival_day_bed: at(dest, 21, 1, 30),
        }
    }

    #[test]
    fn all_violations_are_collected() {
        let mut config = PlannerConfig::default();
        // Total wakefulness is 34h → the 4h row. Raise its start offset so
        // the base window (17h after waking) also violates rule 4.
        config.naps[2].min_start_offset_hours = 18.0;

        let result = evaluate(&conflicted_times(), &config, Modifiers::default());

        assert!(!result.allowed);
        assert_eq!(result.reasons.len(), 2, "both rules should be reported");
        assert!(result.reasons[0].contains("take off"));
        assert!(result.reasons[1].contains("must start at least 18 hours"));
    }

    #[test]
    fn nap_offset_modifier_slides_the_window() {
        let config = PlannerConfig::default();
        let times = conflicted_times();

        let base = evaluate(&times, &config, Modifiers::default());
        let shifted = evaluate(
            &times,
            &config,
            Modifiers {
                nap_offset: 0.5,
                wake_shift: 0.0,
            },
        );

        let base_window = base.window.unwrap();
        let shifted_window = shifted.window.unwrap();
        assert_eq!(
            shifted_window.start - base_window.start,
            Duration::minutes(30)
        );
        // The unmodified placement is what gets recorded as original.
        assert_eq!(shifted.original_window.unwrap(), base_window);
    }

    #[test]
    fn wake_shift_modifier_moves_the_anchor_not_the_window() {
        let config = PlannerConfig::default();
        let times = conflicted_times();

        let base = evaluate(&times, &config, Modifiers::default());
        let shifted = evaluate(
            &times,
            &config,
            Modifiers {
                nap_offset: 0.0,
                wake_shift: -1.0,
            },
        );

        assert_eq!(base.wakeup - shifted.wakeup, Duration::hours(1));
        assert_eq!(shifted.total_wakefulness, base.total_wakefulness + 1.0);
        assert_eq!(shifted.window, base.window);
    }

    #[test]
    fn boundary_contact_with_exclusion_is_allowed() {
        let home = offset(0);
        let window = NapWindow {
            start: at(home, 10, 22, 0),
            end: at(home, 11, 2, 0),
        };
        // Exclusion ends exactly at the window start.
        assert!(!window.overlaps(at(home, 10, 17, 30), at(home, 10, 22, 0)));
        // One minute further and they overlap.
        assert!(window.overlaps(at(home, 10, 17, 30), at(home, 10, 22, 1)));
    }
}
