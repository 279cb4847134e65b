//! Planner configuration: the nap-length rules table and global thresholds.
//!
//! Everything the disallow rules compare against lives here, so variant
//! threshold sets can be loaded from data (e.g. a JSON file) and tested
//! independently of the algorithm.

use serde::{Deserialize, Serialize};

/// One row of the wakefulness → nap-length table.
///
/// Rows are kept in ascending `length` order with contiguous, non-overlapping
/// wakefulness bands. The last row leaves `max_wakefulness` at the sentinel
/// `0.0`, meaning "no upper limit".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NapRule {
    /// Nap duration in hours.
    pub length: f64,
    /// Exclusive lower bound of the wakefulness band, in hours.
    pub min_wakefulness: f64,
    /// Inclusive upper bound of the wakefulness band; `0.0` means unbounded.
    pub max_wakefulness: f64,
    /// Minimum hours between waking up and the nap start.
    pub min_start_offset_hours: f64,
    /// Minimum hours between the nap end and going to bed.
    pub min_end_offset_hours: f64,
}

impl NapRule {
    /// Whether this row's wakefulness band covers `total_wakefulness`.
    pub fn matches(&self, total_wakefulness: f64) -> bool {
        total_wakefulness > self.min_wakefulness
            && (self.max_wakefulness == 0.0 || total_wakefulness <= self.max_wakefulness)
    }
}

/// Rule thresholds for the nap planner.
///
/// Deserializes with per-field defaults, so a config file only needs to name
/// the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Hours before take off during which a nap must not run.
    pub hours_allowed_before_take_off: f64,
    /// Hours after take off during which a nap must not run.
    pub hours_allowed_after_take_off: f64,
    /// Hours before landing during which a nap must not run.
    pub hours_allowed_before_landing: f64,
    /// Hours after landing during which a nap must not run.
    pub hours_allowed_after_landing: f64,
    /// Step size, in hours, for each attempt of the repair search.
    pub nap_offset_attempt: f64,
    /// Longest stretch the traveler may stay awake when no nap length
    /// qualifies, in hours.
    pub max_wakefulness: f64,
    /// How far the repair search may shift the wake-up anchor, in hours.
    pub max_wake_shift: f64,
    /// Advance the arrival-day bedtime by one day when it precedes the
    /// preferred bedtime. Off by default; the right reading of "earliest
    /// bedtime" is context-dependent, so this stays a caller policy.
    pub roll_arrival_bed_forward: bool,
    /// The wakefulness → nap-length table, ascending by `length`.
    pub naps: Vec<NapRule>,
}

impl PlannerConfig {
    /// Find the rules-table row whose wakefulness band covers
    /// `total_wakefulness`, scanning in ascending order.
    ///
    /// `None` means no nap is required (total wakefulness at or below the
    /// lowest band).
    pub fn nap_rule_for(&self, total_wakefulness: f64) -> Option<&NapRule> {
        self.naps.iter().find(|rule| rule.matches(total_wakefulness))
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hours_allowed_before_take_off: 4.0,
            hours_allowed_after_take_off: 1.0,
            hours_allowed_before_landing: 1.0,
            hours_allowed_after_landing: 2.0,
            nap_offset_attempt: 0.25,
            max_wakefulness: 20.0,
            max_wake_shift: 1.5,
            roll_arrival_bed_forward: false,
            naps: vec![
                NapRule {
                    length: 1.0,
                    min_wakefulness: 20.0,
                    max_wakefulness: 24.0,
                    min_start_offset_hours: 4.0,
                    min_end_offset_hours: 6.0,
                },
                NapRule {
                    length: 2.0,
                    min_wakefulness: 24.0,
                    max_wakefulness: 28.0,
                    min_start_offset_hours: 6.0,
                    min_end_offset_hours: 8.0,
                },
                NapRule {
                    length: 4.0,
                    min_wakefulness: 28.0,
                    max_wakefulness: 36.0,
                    min_start_offset_hours: 9.0,
                    min_end_offset_hours: 10.0,
                },
                NapRule {
                    length: 6.0,
                    min_wakefulness: 36.0,
                    max_wakefulness: 42.0,
                    min_start_offset_hours: 12.0,
                    min_end_offset_hours: 12.0,
                },
                NapRule {
                    length: 8.0,
                    min_wakefulness: 42.0,
                    max_wakefulness: 0.0,
                    min_start_offset_hours: 14.0,
                    min_end_offset_hours: 12.0,
                },
            ],
        }
    }
}
