mod config;
mod server;

use clap::Parser;
use config::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Commands::Start(config) => {
            server::init_tracing(config.debug);
            server::start_server(&config).await
        }
        Commands::Version => {
            println!("Repdesk v{}", env!("CARGO_PKG_VERSION"));
            println!("Company and representative directory service");
            Ok(())
        }
    }
}
