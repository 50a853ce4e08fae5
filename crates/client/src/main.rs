//! eventboard-client CLI entry point.

use clap::Parser;

use eventboard_client::cli::{Cli, Commands, OutputFormat};
use eventboard_client::client::EventboardClient;
use eventboard_client::output::{pretty, to_json};
use eventboard_core::events::{Category, SubmitEventRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = EventboardClient::new(&cli.base_url);

    match cli.command {
        Commands::Events(events_cmd) => {
            use eventboard_client::cli::events::EventsAction;
            match events_cmd.action {
                EventsAction::Today => {
                    let instances = client.events_today().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", to_json(&instances)),
                        OutputFormat::Pretty => println!("{}", pretty::format_instances(&instances)),
                    }
                }
                EventsAction::Now => {
                    let instances = client.events_now().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", to_json(&instances)),
                        OutputFormat::Pretty => println!("{}", pretty::format_instances(&instances)),
                    }
                }
                EventsAction::Week => {
                    let instances = client.events_week().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", to_json(&instances)),
                        OutputFormat::Pretty => println!("{}", pretty::format_instances(&instances)),
                    }
                }
                EventsAction::Search { query } => {
                    let instances = client.search_events(&query).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", to_json(&instances)),
                        OutputFormat::Pretty => println!("{}", pretty::format_instances(&instances)),
                    }
                }
                EventsAction::Get { slug } => {
                    let detail = client.get_event(&slug).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", to_json(&detail.event)),
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_event(&detail.event));
                            println!("Upcoming:");
                            println!("{}", pretty::format_occurrences(&detail.upcoming));
                        }
                    }
                }
            }
        }
        Commands::Submit(submit_cmd) => {
            let request = SubmitEventRequest {
                title: submit_cmd.title,
                description: submit_cmd.description,
                category: Category::parse(&submit_cmd.category),
                venue_name: Some(submit_cmd.venue),
                organizer_name: Some(submit_cmd.organizer),
                date: submit_cmd.date,
                start_time: submit_cmd.start_time,
                end_time: submit_cmd.end_time,
                is_recurring: submit_cmd.recurring,
                recurrence_days: submit_cmd.days,
                recurrence_until: submit_cmd.until,
                contact_whatsapp: None,
                contact_instagram: None,
                contact_link: submit_cmd.link,
                images: Vec::new(),
            };
            let event = client.submit_event(&request).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&event)),
                OutputFormat::Pretty => {
                    println!("Submitted for moderation:\n{}", pretty::format_event(&event))
                }
            }
        }
        Commands::Subscribe { email } => {
            client.subscribe(&email).await?;
            if !cli.quiet {
                println!("Subscribed {email} to the weekly digest");
            }
        }
        Commands::Admin(admin_cmd) => {
            use eventboard_client::cli::admin::AdminAction;
            let password = admin_cmd.password;
            match admin_cmd.action {
                AdminAction::Pending => {
                    let pending = client.pending_events(&password).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", to_json(&pending)),
                        OutputFormat::Pretty => println!("{}", pretty::format_events(&pending)),
                    }
                }
                AdminAction::Approve { id } => {
                    let event = client.approve_event(&password, id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", to_json(&event)),
                        OutputFormat::Pretty => {
                            println!("Approved:\n{}", pretty::format_event(&event))
                        }
                    }
                }
                AdminAction::Reject { id } => {
                    client.reject_event(&password, id).await?;
                    if !cli.quiet {
                        println!("Rejected event {}", id);
                    }
                }
                AdminAction::Feature { id } => {
                    let event = client.toggle_featured(&password, id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", to_json(&event)),
                        OutputFormat::Pretty => println!(
                            "Featured = {} for {}",
                            event.is_featured, event.title
                        ),
                    }
                }
                AdminAction::Cancel { id } => {
                    let occurrence = client.cancel_occurrence(&password, id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", to_json(&occurrence)),
                        OutputFormat::Pretty => {
                            println!("Cancelled: {}", pretty::format_occurrence(&occurrence))
                        }
                    }
                }
                AdminAction::Digest => {
                    let result = client.send_digest(&password).await?;
                    println!("{}", result.message);
                }
            }
        }
        Commands::Health => {
            let health = client.health().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&serde_json::json!({
                    "status": health.status,
                    "events": health.events,
                }))),
                OutputFormat::Pretty => {
                    println!("Status: {}\nEvents: {}", health.status, health.events)
                }
            }
        }
    }

    Ok(())
}
