//! Elapsed-time rendering shared by all formatters.
//!
//! Every function takes `now` explicitly, so the same inputs always produce
//! the same display text and sort key.

use chrono::{DateTime, TimeDelta, Utc};

use kubelens_types::FieldValue;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Largest whole unit of `seconds`: days, hours, minutes, then seconds
pub fn format_elapsed_seconds(seconds: i64) -> String {
    let seconds = seconds.max(0);

    if seconds >= DAY {
        return format!("{}d", seconds / DAY);
    }

    if seconds >= HOUR {
        return format!("{}h", seconds / HOUR);
    }

    if seconds >= MINUTE {
        return format!("{}m", seconds / MINUTE);
    }

    format!("{seconds}s")
}

fn elapsed(from: DateTime<Utc>, to: DateTime<Utc>) -> TimeDelta {
    (to - from).max(TimeDelta::zero())
}

/// Time since creation, sorted by the creation instant
pub fn age(created: DateTime<Utc>, now: DateTime<Utc>) -> FieldValue {
    FieldValue::measured(
        format_elapsed_seconds(elapsed(created, now).num_seconds()),
        created.timestamp_millis(),
    )
}

/// Run time of a job: `completion` (or `now`) minus `start`
///
/// Sorted by elapsed milliseconds; "Not started" sorts as zero.
pub fn job_duration(
    start: Option<DateTime<Utc>>,
    completion: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> FieldValue {
    let Some(start) = start else {
        return FieldValue::measured("Not started", 0i64);
    };

    let span = elapsed(start, completion.unwrap_or(now));
    let minutes = span.num_minutes();
    let text = if span.num_seconds() < MINUTE {
        format!("{}s", span.num_seconds())
    } else if minutes < 60 {
        format!("{minutes}m")
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    };

    FieldValue::measured(text, span.num_milliseconds())
}

/// Time since a cron job last fired, sorted by the schedule instant
pub fn last_schedule(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> FieldValue {
    match last {
        None => FieldValue::measured("Never", 0i64),
        Some(last) => FieldValue::measured(
            format!(
                "{} ago",
                format_elapsed_seconds(elapsed(last, now).num_seconds())
            ),
            last.timestamp_millis(),
        ),
    }
}

/// Absolute timestamp for detail views
pub fn timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
