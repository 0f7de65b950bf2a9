use clap::{Parser, Subcommand};

mod commands;

use commands::{CompareArgs, ProductsArgs, TrendsArgs};

#[derive(Parser)]
#[command(name = "feria")]
#[command(about = "Compare grocery basket prices and price trends across retail chains", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the retail chains the feed knows about
    Chains,
    /// Search the product catalog
    Products(ProductsArgs),
    /// Price a basket across chains and rank them
    Compare(CompareArgs),
    /// Merge and summarize historical price series
    Trends(TrendsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = feria_core::ConfigLoader::load_from(&cli.config)?;

    match cli.command {
        Commands::Chains => commands::chains::run(&config).await,
        Commands::Products(args) => commands::products::run(&config, args).await,
        Commands::Compare(args) => commands::compare::run(&config, args).await,
        Commands::Trends(args) => commands::trends::run(&config, args).await,
    }
}
