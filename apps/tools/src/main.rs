use anyhow::{Context, Result};
use chrono::SecondsFormat;
use clap::{Parser, Subcommand};
use intake_client::IntakeClient;
use shared::domain::{Booking, ContactSubmission};

#[derive(Parser, Debug)]
#[command(name = "intake-admin", about = "Inspect and triage intake records")]
struct Cli {
    #[arg(long, env = "INTAKE_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is answering.
    Ping,
    /// List contact submissions, most recent first.
    Contacts,
    /// List consultation bookings, most recent first.
    Bookings,
    /// Show one booking in full.
    Booking { id: String },
    SetContactStatus { id: String, status: String },
    SetBookingStatus { id: String, status: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let cli = Cli::parse();
    let client = IntakeClient::new(&cli.server_url)?;

    match cli.command {
        Command::Ping => {
            let message = client.ping().await.context("ping failed")?;
            println!("{message}");
        }
        Command::Contacts => {
            let submissions = client.list_contact_submissions().await?;
            for submission in &submissions {
                println!("{}", contact_line(submission));
            }
            println!("total={}", submissions.len());
        }
        Command::Bookings => {
            let bookings = client.list_bookings().await?;
            for booking in &bookings {
                println!("{}", booking_line(booking));
            }
            println!("total={}", bookings.len());
        }
        Command::Booking { id } => match client.get_booking(&id).await? {
            Some(booking) => println!("{}", serde_json::to_string_pretty(&booking)?),
            None => anyhow::bail!("booking {id} not found"),
        },
        Command::SetContactStatus { id, status } => {
            match client.update_contact_status(&id, &status).await? {
                Some(submission) => println!("updated {}", contact_line(&submission)),
                None => anyhow::bail!("submission {id} not found"),
            }
        }
        Command::SetBookingStatus { id, status } => {
            match client.update_booking_status(&id, &status).await? {
                Some(booking) => println!("updated {}", booking_line(&booking)),
                None => anyhow::bail!("booking {id} not found"),
            }
        }
    }

    Ok(())
}

fn contact_line(submission: &ContactSubmission) -> String {
    format!(
        "{}  {}  {}  {}  {}",
        submission.id,
        submission.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        submission.status,
        submission.data.name,
        submission.data.service
    )
}

fn booking_line(booking: &Booking) -> String {
    format!(
        "{}  {}  {}  {}  {}  {} {}",
        booking.id,
        booking.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        booking.status,
        booking.data.name,
        booking.data.service,
        booking.data.preferred_date,
        booking.data.preferred_time
    )
}
