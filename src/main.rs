//! Calendar mail
//!
//! Command line entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use calendar_mail::{
    config::Settings,
    database::{create_pool, run_migrations, DatabasePool, DatabaseService},
    mail::{transport, MailDispatcher},
    models::ForgotPassword,
    services::{EmailService, SendOutcome, ServiceFactory},
    utils::logging,
    Result,
};

#[derive(Parser)]
#[command(name = "calendar-mail", version, about = "Calendar email notifications")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply database migrations
    Migrate,
    /// Notify one user about an event
    Notify {
        #[arg(long)]
        event_id: i64,
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Notify every participant of an event, on behalf of its owner
    NotifyParticipants {
        #[arg(long)]
        requester_id: i64,
        #[arg(long)]
        event_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Invite someone to register
    Invite {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        recipient: String,
        #[arg(long)]
        email: String,
    },
    /// Mail a local file as an attachment
    SendFile {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        email: String,
    },
    /// Mail a password reset link
    ResetPassword {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", calendar_mail::info());

    if let Command::Migrate = cli.command {
        let pool = connect(&settings)
            .await
            .context("Failed to connect to database")?;
        run_migrations(&pool).await?;
        return Ok(());
    }

    let transport = transport::from_config(&settings.smtp)?;
    let (queue, dispatcher) = MailDispatcher::start(transport, &settings.dispatcher);
    let services = ServiceFactory::new(&settings, queue).await?;

    let result = execute(cli.command, &settings, &services.email_service).await;
    if let Err(e) = &result {
        error!(
            severity = %e.severity(),
            recoverable = e.is_recoverable(),
            "Command failed: {}",
            e
        );
    }

    // Close the queue so the dispatcher can drain and stop
    drop(services);
    dispatcher.join().await;

    info!("All queued mail handled");
    Ok(result?)
}

async fn execute(command: Command, settings: &Settings, email: &EmailService) -> Result<()> {
    match command {
        Command::Migrate => Ok(()),
        Command::Notify { event_id, user_id, title, content } => {
            let store = DatabaseService::new(connect(settings).await?);
            let outcome = email.send(&store, event_id, user_id, &title, &content).await?;
            report(outcome).await
        }
        Command::NotifyParticipants { requester_id, event_id, title, content } => {
            let store = DatabaseService::new(connect(settings).await?);
            let count = email
                .send_email_to_event_participants(&store, requester_id, event_id, &title, &content)
                .await?;
            info!(event_id = event_id, count = count, "Participant mailing queued");
            Ok(())
        }
        Command::Invite { sender, recipient, email: address } => {
            let outcome = email.send_email_invitation(&sender, &recipient, &address).await?;
            report(outcome).await
        }
        Command::SendFile { path, email: address } => {
            let outcome = email.send_email_file(&path, &address).await?;
            report(outcome).await
        }
        Command::ResetPassword { username, email: address, token } => {
            let user = ForgotPassword {
                email: address,
                username,
                email_verification_token: token,
            };
            let outcome = email.send_reset_password_mail(&user).await?;
            report(outcome).await
        }
    }
}

async fn connect(settings: &Settings) -> Result<DatabasePool> {
    info!("Connecting to database...");
    create_pool(&settings.database).await
}

async fn report(outcome: SendOutcome) -> Result<()> {
    match outcome {
        SendOutcome::Queued(handle) => {
            let id = handle.id();
            handle.wait().await?;
            info!(delivery_id = %id, "Mail delivered");
        }
        SendOutcome::Rejected(reason) => {
            warn!(reason = %reason, "Mail not sent");
        }
    }
    Ok(())
}
