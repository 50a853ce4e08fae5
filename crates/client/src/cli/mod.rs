//! CLI command definitions.

pub mod admin;
pub mod events;
pub mod submit;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the eventboard API.
#[derive(Debug, Parser)]
#[command(name = "eventboard-client")]
#[command(about = "CLI client for the eventboard API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "EVENTBOARD_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse event listings.
    Events(events::EventsCommand),
    /// Submit a new event for moderation.
    Submit(submit::SubmitCommand),
    /// Subscribe an email to the weekly digest.
    Subscribe {
        /// Email address to subscribe.
        email: String,
    },
    /// Admin moderation (requires the admin password).
    Admin(admin::AdminCommand),
    /// Check server health.
    Health,
}
