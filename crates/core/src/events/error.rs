use thiserror::Error;

/// Errors produced when validating an event submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Title is required (min 2 characters)")]
    TitleTooShort,
    #[error("Title too long (max 200 characters)")]
    TitleTooLong,
    #[error("Venue name is required")]
    MissingVenue,
    #[error("Organizer name is required")]
    MissingOrganizer,
    #[error("Date is required for non-recurring events")]
    MissingDate,
    #[error("Event date cannot be in the past")]
    DateInPast,
    #[error("End time must be after start time")]
    InvalidTimeRange,
    #[error("Select at least one day for recurring events")]
    NoRecurrenceDays,
    #[error("Contact link must be an http(s) URL: {0}")]
    InvalidContactLink(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_error_display() {
        assert_eq!(
            SubmitError::MissingDate.to_string(),
            "Date is required for non-recurring events"
        );
        assert_eq!(
            SubmitError::NoRecurrenceDays.to_string(),
            "Select at least one day for recurring events"
        );
        assert_eq!(
            SubmitError::InvalidContactLink("ftp://x".to_string()).to_string(),
            "Contact link must be an http(s) URL: ftp://x"
        );
    }
}
