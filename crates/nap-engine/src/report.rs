//! Render a [`PlanResult`] as text.
//!
//! The summary form is one of three shapes: no nap needed, unresolvable, or
//! a placed nap with start/end wall-clock times in both the home and
//! destination offsets (plus the original placement when the repair search
//! moved it). `render_details` dumps every computed field for debugging.

use chrono::{DateTime, FixedOffset};

use crate::planner::{NapWindow, PlanResult};

/// Format a fixed offset as the `GMT±H` label used in the summary,
/// e.g. `-7`, `+1`, `+5.5`.
fn gmt_label(offset: FixedOffset) -> String {
    let hours = f64::from(offset.local_minus_utc()) / 3600.0;
    if hours == hours.trunc() {
        format!("{:+}", hours as i64)
    } else {
        format!("{:+}", hours)
    }
}

fn clock(instant: DateTime<FixedOffset>) -> String {
    instant.format("%H:%M").to_string()
}

fn full(instant: DateTime<FixedOffset>) -> String {
    instant.format("%Y-%m-%d %H:%M %:z").to_string()
}

/// Render the one-line or multi-line summary of a planning result.
pub fn render(result: &PlanResult) -> String {
    if !result.allowed {
        return "Unallowed nap condition can not be resolved".to_string();
    }
    if result.nap_length == 0.0 {
        return "No nap is needed".to_string();
    }
    let Some(window) = &result.window else {
        return "No nap is needed".to_string();
    };

    let home_label = gmt_label(result.home);
    let dest_label = gmt_label(result.dest);

    let mut output = if result.modified {
        String::from("Yes, the nap can be placed by modifying the nap time")
    } else {
        String::from("Yes, the nap can be placed without modifying the nap time")
    };

    output.push_str(&window_lines(window, "", result.dest, &home_label, &dest_label));

    if result.modified {
        if let Some(original) = &result.original_window {
            output.push_str(&window_lines(
                original,
                "Original ",
                result.dest,
                &home_label,
                &dest_label,
            ));
        }
    }

    output
}

fn window_lines(
    window: &NapWindow,
    prefix: &str,
    dest: FixedOffset,
    home_label: &str,
    dest_label: &str,
) -> String {
    format!(
        "\n{prefix}Nap Start Time: {} GMT{home_label} / {} GMT{dest_label}\
         \n{prefix}Nap End Time: {} GMT{home_label} / {} GMT{dest_label}",
        clock(window.start),
        clock(window.start.with_timezone(&dest)),
        clock(window.end),
        clock(window.end.with_timezone(&dest)),
    )
}

/// Render every computed field of a planning result, one per line.
pub fn render_details(result: &PlanResult) -> String {
    let mut lines = vec![
        "--- Nap Details ---".to_string(),
        format!("allowed: {}", if result.allowed { "yes" } else { "no" }),
        format!("modified: {}", if result.modified { "yes" } else { "no" }),
        format!("flight hours: {}", result.flight_hours),
        format!("total wakefulness hours: {}", result.total_wakefulness),
        format!("wake up time: {}", full(result.wakeup)),
        format!("bed time: {}", full(result.bed)),
        format!("nap length: {}", result.nap_length),
    ];

    if let Some(window) = &result.window {
        lines.push(format!("nap start time: {}", full(window.start)));
        lines.push(format!("nap end time: {}", full(window.end)));
    }
    if let Some(original) = &result.original_window {
        lines.push(format!("original nap start time: {}", full(original.start)));
        lines.push(format!("original nap end time: {}", full(original.end)));
    }
    for reason in &result.reasons {
        lines.push(format!("unallowed: {}", reason));
    }

    lines.join("\n")
}
