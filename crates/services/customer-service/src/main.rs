//! Customer Service - HTTP API for customer management.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "customer-service")]
#[command(about = "Customer management microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "CUSTOMER_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "CUSTOMER_SERVICE_PORT", default_value = "8080")]
        port: u16,
        /// Keep customers in memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            in_memory,
        } => {
            customer_service_lib::run_embedded(&host, port, in_memory).await?;
        }
    }

    Ok(())
}
