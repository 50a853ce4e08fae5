//! Pretty output formatting.

use eventboard_core::events::{time_range_label, Event, EventInstance, Occurrence};

/// Format a listing instance for display.
pub fn format_instance(instance: &EventInstance) -> String {
    let mut output = format!(
        "{} [{}]\n  {} {}",
        instance.title,
        instance.category.label(),
        instance.date,
        time_range_label(instance.start_time, instance.end_time),
    );
    if let Some(venue) = &instance.venue_name {
        output.push_str(&format!("\n  Venue: {}", venue));
    }
    if instance.is_featured {
        output.push_str("\n  Featured");
    }
    output.push_str(&format!("\n  Slug: {}", instance.slug));
    output
}

/// Format listing instances for display.
pub fn format_instances(instances: &[EventInstance]) -> String {
    if instances.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = format!("EVENTS ({})\n", instances.len());
    output.push_str(&"-".repeat(40));
    for instance in instances {
        output.push_str(&format!("\n{}", format_instance(instance)));
        output.push('\n');
    }
    output
}

/// Format an event for display.
pub fn format_event(event: &Event) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Slug: {}",
        event.title,
        event.category.label(),
        event.id,
        event.slug
    );
    match (&event.recurrence, event.date) {
        (Some(pattern), _) => {
            output.push_str(&format!(
                "\n  Repeats: {} until {}",
                pattern.days.join(", "),
                pattern.until
            ));
        }
        (None, Some(date)) => {
            output.push_str(&format!("\n  Date: {}", date));
        }
        (None, None) => {}
    }
    output.push_str(&format!(
        "\n  Time: {}",
        time_range_label(event.start_time, event.end_time)
    ));
    if let Some(venue) = &event.venue_name {
        output.push_str(&format!("\n  Venue: {}", venue));
    }
    if let Some(organizer) = &event.organizer_name {
        output.push_str(&format!("\n  Organizer: {}", organizer));
    }
    output.push_str(&format!(
        "\n  Approved: {}  Featured: {}",
        event.is_approved, event.is_featured
    ));
    output
}

/// Format events for display.
pub fn format_events(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = format!("EVENTS ({})\n", events.len());
    output.push_str(&"-".repeat(40));
    for event in events {
        output.push_str(&format!("\n{}", format_event(event)));
        output.push('\n');
    }
    output
}

/// Format an occurrence for display.
pub fn format_occurrence(occurrence: &Occurrence) -> String {
    let mut output = format!(
        "{} {}",
        occurrence.date,
        time_range_label(occurrence.start_time, occurrence.end_time)
    );
    if occurrence.is_cancelled {
        output.push_str(" (cancelled)");
    }
    output
}

/// Format occurrences for display.
pub fn format_occurrences(occurrences: &[Occurrence]) -> String {
    if occurrences.is_empty() {
        return "No upcoming occurrences.".to_string();
    }
    occurrences
        .iter()
        .map(|o| format!("  {}", format_occurrence(o)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use eventboard_core::events::Category;

    #[test]
    fn test_format_instances_empty() {
        assert_eq!(format_instances(&[]), "No events found.");
    }

    #[test]
    fn test_format_event_recurring() {
        let pattern = eventboard_core::events::RecurrencePattern::new(
            vec!["mon".to_string(), "wed".to_string()],
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        );
        let event = Event::recurring(
            "Morning Yoga",
            Category::Yoga,
            pattern,
            NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        );

        let output = format_event(&event);
        assert!(output.contains("Morning Yoga [Yoga]"));
        assert!(output.contains("Repeats: mon, wed until 2026-12-31"));
        assert!(output.contains("Time: 7:00 AM"));
    }

    #[test]
    fn test_format_occurrence_cancelled() {
        let mut occurrence = Occurrence::new(
            uuid::Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            None,
        );
        occurrence.is_cancelled = true;
        assert!(format_occurrence(&occurrence).contains("(cancelled)"));
    }
}
