use anyhow::{bail, Result};
use bizops_seed::config::AppConfig;
use bizops_seed::seed::{
    purge_seed_data, seed_all, seed_chat, seed_only, LogProgress, SeedPlan, SeedStep, StepMode,
};
use bizops_seed::store::PostgresBackend;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;

#[derive(Parser)]
#[clap(author, version, about = "Populate the business operations database with synthetic data")]
struct Cli {
    /// Overrides RUST_LOG, e.g. "debug" to see every inserted batch
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the full dataset, or only the listed steps
    Seed {
        /// Comma separated steps; their parents are loaded instead of seeded
        #[clap(long, value_enum, value_delimiter = ',')]
        only: Vec<SeedStep>,
        /// Fixed RNG seed for a reproducible dataset
        #[clap(long)]
        rng_seed: Option<u64>,
        #[clap(long)]
        batch_size: Option<usize>,
    },
    /// Seed chat groups and messages for existing projects and users
    SeedChat {
        #[clap(long)]
        rng_seed: Option<u64>,
    },
    /// Print the step order without touching the database
    Plan {
        #[clap(long, value_enum, value_delimiter = ',')]
        only: Vec<SeedStep>,
        #[clap(long)]
        chat: bool,
    },
    /// Delete every seeded row
    Purge {
        /// Required; purging cannot be undone
        #[clap(long)]
        yes: bool,
    },
    /// Serve the seeding HTTP API
    Serve,
}

fn setup_logging(level: &Option<String>) {
    let mut builder = Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.filter_module("sqlx", LevelFilter::Warn).init();
}

async fn connect(config: &AppConfig) -> Result<PostgresBackend> {
    let database_url = config.database_url()?;
    let backend =
        PostgresBackend::new(&database_url, config.database.max_connections.unwrap_or(10)).await?;
    log::info!("Running database migrations...");
    backend.migrate().await?;
    Ok(backend)
}

fn print_plan(plan: &SeedPlan) {
    for (index, planned) in plan.steps().iter().enumerate() {
        let mode = match planned.mode {
            StepMode::Seed => "seed",
            StepMode::Load => "load",
        };
        println!("{:>2}. {:<4} {}", index + 1, mode, planned.step);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    setup_logging(&args.log_level);

    let mut config = AppConfig::load()?;

    match args.command {
        Commands::Seed {
            only,
            rng_seed,
            batch_size,
        } => {
            if rng_seed.is_some() {
                config.seed.rng_seed = rng_seed;
            }
            if let Some(batch_size) = batch_size {
                config.seed.batch_size = batch_size;
            }
            let backend = connect(&config).await?;
            let report = if only.is_empty() {
                seed_all(&backend, &config.seed, &LogProgress).await?
            } else {
                seed_only(&backend, &config.seed, &LogProgress, &only).await?
            };
            println!("{}", report);
        }
        Commands::SeedChat { rng_seed } => {
            if rng_seed.is_some() {
                config.seed.rng_seed = rng_seed;
            }
            let backend = connect(&config).await?;
            let report = seed_chat(&backend, &config.seed, &LogProgress).await?;
            println!("{}", report);
        }
        Commands::Plan { only, chat } => {
            let plan = if !only.is_empty() {
                SeedPlan::for_targets(&only)?
            } else if chat {
                SeedPlan::chat()?
            } else {
                SeedPlan::full()?
            };
            print_plan(&plan);
        }
        Commands::Purge { yes } => {
            if !yes {
                bail!("refusing to purge without --yes");
            }
            let backend = connect(&config).await?;
            let report = purge_seed_data(&backend, &LogProgress).await?;
            println!("Deleted {} rows", report.total());
        }
        Commands::Serve => {
            let backend = connect(&config).await?;
            bizops_seed::run_server(backend, &config).await?;
        }
    }

    Ok(())
}
