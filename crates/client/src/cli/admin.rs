//! Admin moderation commands.

use clap::{Args, Subcommand};
use uuid::Uuid;

/// Admin moderation (requires the admin password).
#[derive(Debug, Args)]
pub struct AdminCommand {
    /// Admin password, sent as a bearer token.
    #[arg(long, env = "EVENTBOARD_ADMIN_PASSWORD")]
    pub password: String,

    #[command(subcommand)]
    pub action: AdminAction,
}

#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// List events waiting for approval.
    Pending,
    /// Approve an event (expands recurring patterns).
    Approve {
        /// Event ID.
        id: Uuid,
    },
    /// Reject an event, deleting it and its occurrences.
    Reject {
        /// Event ID.
        id: Uuid,
    },
    /// Toggle an event's featured flag.
    Feature {
        /// Event ID.
        id: Uuid,
    },
    /// Cancel a single occurrence.
    Cancel {
        /// Occurrence ID.
        id: Uuid,
    },
    /// Trigger the weekly digest send.
    Digest,
}
