use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod health;
pub mod push;
pub mod serve;
pub mod toast;
pub mod toasts;

use crate::core::{AppConfig, init_tracing};
use crate::notify::NotificationService;

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "8080")]
        port: String,
    },
    /// Send a toast to a user
    Toast {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        message: String,
        /// One of success, error, info or warning
        #[arg(long = "type", default_value = "info")]
        toast_type: String,
        /// Extra data as a JSON object
        #[arg(long)]
        context: Option<String>,
    },
    /// Send a push notification to a user
    Push {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Fetch pending toasts for a user
    Toasts {
        #[arg(long)]
        user_id: String,
    },
    /// Check that the notification service is reachable
    Health {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        Some(Command::Toast {
            user_id,
            message,
            toast_type,
            context,
        }) => {
            init_tracing();
            let service = NotificationService::from_config(&config)?;
            toast::run(&service, &user_id, &message, &toast_type, context.as_deref()).await?;
        }
        Some(Command::Push {
            user_id,
            title,
            body,
            url,
            icon,
        }) => {
            init_tracing();
            let service = NotificationService::from_config(&config)?;
            push::run(
                &service,
                &user_id,
                &title,
                &body,
                url.as_deref(),
                icon.as_deref(),
            )
            .await;
        }
        Some(Command::Toasts { user_id }) => {
            init_tracing();
            let service = NotificationService::from_config(&config)?;
            toasts::run(&service, &user_id).await?;
        }
        Some(Command::Health {}) => {
            init_tracing();
            let service = NotificationService::from_config(&config)?;
            health::run(&service).await;
        }
        None => {}
    }

    Ok(())
}
