use clap::{Parser, Subcommand};
use jobboard::{conf::Settings, pkg::server::listen, prelude::Result};

mod ping;

#[derive(Parser)]
#[command(about = "job listings service")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Serve the HTTP API
    Listen,
    /// Check that the job store is reachable
    Ping,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    let settings = Settings::new()?;
    match args.command {
        Some(SubCommandType::Listen) => {
            listen(&settings).await?;
        }
        Some(SubCommandType::Ping) => {
            ping::check(&settings).await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
