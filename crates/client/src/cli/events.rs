//! Event listing commands.

use clap::{Args, Subcommand};

/// Browse event listings.
#[derive(Debug, Args)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// Today's events, ordered by start time.
    Today,
    /// Events happening right now.
    Now,
    /// Events for the next 7 days.
    Week,
    /// Search upcoming events.
    Search {
        /// Search text (min 2 characters).
        query: String,
    },
    /// Show one event with its upcoming occurrences.
    Get {
        /// The event's public slug.
        slug: String,
    },
}
