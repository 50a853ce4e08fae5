//! Weekly recurrence expansion.
//!
//! Turns a [`RecurrencePattern`] into the concrete [`Occurrence`] rows that
//! get bulk-inserted when a recurring event is approved. The expansion is a
//! plain day-by-day walk over the calendar; it performs no I/O and never
//! fails, it just returns an empty list when nothing matches.

use chrono::{Datelike, Local, NaiveDate, NaiveTime, Weekday};
use uuid::Uuid;

use super::types::{Occurrence, RecurrencePattern};

/// Parses a three-letter weekday tag (`sun` through `sat`), case-insensitive.
///
/// Returns `None` for anything outside the vocabulary; expansion treats
/// unrecognized tags as matching no date.
pub fn parse_weekday_tag(tag: &str) -> Option<Weekday> {
    match tag.trim().to_ascii_lowercase().as_str() {
        "sun" => Some(Weekday::Sun),
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        _ => None,
    }
}

/// Expands a recurrence pattern into occurrence rows.
///
/// Walks every calendar date from `from` (defaulting to today when `None`)
/// through `pattern.until` inclusive, and emits one occurrence per date
/// whose weekday is in the pattern, carrying the supplied times unchanged.
/// The result is ordered ascending by date with no duplicates.
///
/// The expansion is total: an empty or unrecognized day set, or a `from`
/// past `until`, yields an empty vector rather than an error. For a fixed
/// `from` the dates produced are fully determined by the pattern; only the
/// generated IDs differ between runs.
pub fn expand_recurrence(
    event_id: Uuid,
    pattern: &RecurrencePattern,
    start_time: NaiveTime,
    end_time: Option<NaiveTime>,
    from: Option<NaiveDate>,
) -> Vec<Occurrence> {
    let targets = pattern.target_weekdays();
    if targets.is_empty() {
        return Vec::new();
    }

    let from = from.unwrap_or_else(|| Local::now().date_naive());
    let mut occurrences = Vec::new();
    let mut current = from;

    while current <= pattern.until {
        if targets.contains(&current.weekday()) {
            occurrences.push(Occurrence::new(event_id, current, start_time, end_time));
        }
        // succ_opt only fails at NaiveDate::MAX, far past any real pattern.
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    occurrences
}
