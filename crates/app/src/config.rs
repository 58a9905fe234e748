use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "repdesk")]
#[command(version, about = "Repdesk - company and representative directory service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the repdesk daemon
    Start(StartConfig),
    /// Display version information
    Version,
}

#[derive(Args)]
pub struct StartConfig {
    /// HTTP server address
    #[arg(long = "http.addr", default_value = "0.0.0.0:3000")]
    pub http_addr: String,

    /// Database path
    #[arg(long = "db.path", default_value = "./data/repdesk_db")]
    pub db_path: String,

    /// Enable debug logging
    #[arg(long = "log.debug")]
    pub debug: bool,

    /// Requests per second allowed per instance; unlimited when unset
    #[arg(long = "rate-limit.rps")]
    pub rate_limit_rps: Option<u32>,

    /// Disable the prometheus metrics endpoint
    #[arg(long = "metrics.disable")]
    pub metrics_disable: bool,
}
