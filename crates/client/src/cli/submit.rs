//! Event submission command.

use chrono::{NaiveDate, NaiveTime};
use clap::Args;

/// Submit a new event for moderation.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Event title.
    #[arg(long)]
    pub title: String,

    /// Category slug (yoga, music, ceremony, food, wellness, community, market, other).
    #[arg(long, default_value = "other")]
    pub category: String,

    /// Venue name.
    #[arg(long)]
    pub venue: String,

    /// Organizer name.
    #[arg(long)]
    pub organizer: String,

    /// Event description.
    #[arg(long)]
    pub description: Option<String>,

    /// Date (YYYY-MM-DD). Required unless --recurring.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Start time (HH:MM:SS).
    #[arg(long)]
    pub start_time: NaiveTime,

    /// End time (HH:MM:SS).
    #[arg(long)]
    pub end_time: Option<NaiveTime>,

    /// Mark the event as weekly recurring.
    #[arg(long)]
    pub recurring: bool,

    /// Recurrence weekday tag (sun..sat); repeat for multiple days.
    #[arg(long = "day")]
    pub days: Vec<String>,

    /// Last date of the recurrence (YYYY-MM-DD).
    #[arg(long)]
    pub until: Option<NaiveDate>,

    /// Contact link (http(s) URL).
    #[arg(long)]
    pub link: Option<String>,
}
