use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod history;
pub mod serve;

use crate::core::AppConfig;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "5000")]
        port: String,
    },
    /// Start an interactive chat session
    Chat {
        /// Continue an existing session instead of starting a new one
        #[arg(long)]
        session_id: Option<String>,
    },
    /// Print the transcript of a session
    History {
        #[arg(long)]
        session_id: String,
    },
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

    // Settings can come from a `.env` file in the working directory
    dotenv::dotenv().ok();
    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        Some(Command::Chat { session_id }) => {
            chat::run(session_id, config).await?;
        }
        Some(Command::History { session_id }) => {
            history::run(&session_id, config).await?;
        }
        None => {}
    }

    Ok(())
}
