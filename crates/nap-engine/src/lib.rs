//! # nap-engine
//!
//! Deterministic in-flight nap planning for travelers crossing time zones.
//!
//! Given home and destination wake/bed preferences plus flight departure and
//! arrival times, the engine computes how long the traveler will stay awake,
//! picks a nap length from a configurable rules table, places a candidate nap
//! window between the pre-flight bedtime and the post-flight wake preference,
//! and repairs windows that collide with take-off/landing exclusion periods
//! or minimum-offset rules via a bounded search.
//!
//! All time zones are fixed UTC offsets supplied by the caller; arithmetic is
//! always on absolute instants, offsets affect display only.
//!
//! ## Modules
//!
//! - [`resolve`] — wall-clock `HH:MM[:SS]` strings → absolute instants
//! - [`trip`] — raw trip inputs and flight-anchored normalization
//! - [`config`] — the nap rules table and global thresholds
//! - [`planner`] — aggregates, disallow rules, and the repair search
//! - [`report`] — text rendering of planning results
//! - [`error`] — error types

pub mod config;
pub mod error;
pub mod planner;
pub mod report;
pub mod resolve;
pub mod trip;

pub use config::{NapRule, PlannerConfig};
pub use error::NapError;
pub use planner::{plan, plan_with_reference, NapWindow, PlanResult};
pub use report::{render, render_details};
pub use resolve::{parse_time_of_day, parse_utc_offset, resolve};
pub use trip::{TripInputs, TripTimes};
