mod digest;
mod error;
mod operations;
mod recurrence;
mod requests;
mod types;

pub use digest::{build_digest_days, digest_subject, DigestDay, DigestItem};
pub use error::SubmitError;
pub use operations::{
    format_date_label, format_time_12h, is_happening_at, make_slug, matches_search, slugify,
    time_range_label, validate_submission,
};
pub use recurrence::{expand_recurrence, parse_weekday_tag};
pub use requests::{SubmitEventRequest, SubscribeRequest, UpdateEventRequest};
pub use types::{Category, Event, EventInstance, Occurrence, RecurrencePattern, Subscriber};
