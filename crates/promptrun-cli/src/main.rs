//! `promptrun` - drive a remote agent with recorded datasets.

use anyhow::Context;
use clap::{Parser, Subcommand};
use promptrun_core::{
    CountingObserver, DatasetConfig, DatasetSource, JsonlDatasetLoader, LoadObserver,
    DEFAULT_FOLDER,
};
use promptrun_runtime::{A2aClient, AgentClient, CardResolver, EvaluatorRegistry, DEFAULT_TIMEOUT};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Drive a remote agent with recorded datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the agent service
    #[arg(
        long,
        short = 'u',
        default_value = "http://localhost:9999",
        env = "PROMPTRUN_AGENT_URL",
        global = true
    )]
    agent_url: String,

    /// Folder dataset files are resolved under
    #[arg(
        long,
        default_value = DEFAULT_FOLDER,
        env = "PROMPTRUN_DATA_FOLDER",
        global = true
    )]
    folder: PathBuf,

    /// Agent request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(), global = true)]
    timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send every dataset query to the agent and print its responses
    Run(RunArgs),

    /// Check a dataset file and report record counts
    Validate(ValidateArgs),

    /// List evaluators and whether the environment configures them
    Evaluators,
}

#[derive(Parser)]
struct RunArgs {
    /// Dataset file name (JSONL) inside the data folder
    file: String,
}

#[derive(Parser)]
struct ValidateArgs {
    /// Dataset file name (JSONL) inside the data folder
    file: String,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Run(args) => run(&cli, args).await,
        Commands::Validate(args) => validate(&cli, args),
        Commands::Evaluators => evaluators(),
    }
}

async fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<()> {
    let started_at = chrono::Utc::now();

    let observer = Arc::new(CountingObserver::new());
    let config = DatasetConfig::new(&cli.folder, &args.file);
    let path = config.path();
    let loader_observer: Arc<dyn LoadObserver> = Arc::clone(&observer) as Arc<dyn LoadObserver>;
    let mut loader = JsonlDatasetLoader::with_observer(config, loader_observer);
    let records = loader
        .records()
        .with_context(|| format!("failed to load dataset {}", path.display()))?
        .to_vec();
    info!(
        records = records.len(),
        skipped = observer.skipped(),
        "dataset loaded"
    );

    let http = reqwest::Client::new();
    let card = CardResolver::new(http.clone(), &cli.agent_url)
        .resolve()
        .await
        .with_context(|| format!("failed to resolve agent card at {}", cli.agent_url))?;
    info!(agent = %card.name, endpoint = %card.url, "resolved agent card");

    let client = A2aClient::for_card(http, &card)
        .with_reference(&args.file)
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    let mut sent = 0usize;
    let mut failed = 0usize;
    for record in &records {
        println!("Processing: '{}'", record.query);
        match client.send_message(&record.query).await {
            Ok(reply) => {
                sent += 1;
                println!("{reply}");
            }
            Err(err) => {
                failed += 1;
                error!(%err, query = %record.query, "agent request failed");
            }
        }
    }

    let elapsed = chrono::Utc::now() - started_at;
    println!(
        "{sent} sent, {failed} failed, {} skipped (started {}, took {}.{:03}s)",
        observer.skipped(),
        started_at.format("%Y-%m-%dT%H:%M:%SZ"),
        elapsed.num_seconds(),
        elapsed.num_milliseconds().rem_euclid(1000),
    );

    if failed > 0 {
        anyhow::bail!("{failed} of {} requests failed", records.len());
    }
    Ok(())
}

fn validate(cli: &Cli, args: &ValidateArgs) -> anyhow::Result<()> {
    let observer = Arc::new(CountingObserver::new());
    let config = DatasetConfig::new(&cli.folder, &args.file);
    let path = config.path();
    let loader_observer: Arc<dyn LoadObserver> = Arc::clone(&observer) as Arc<dyn LoadObserver>;
    let mut loader = JsonlDatasetLoader::with_observer(config, loader_observer);

    let records = loader
        .records()
        .with_context(|| format!("failed to load dataset {}", path.display()))?;

    println!(
        "{}: {} records, {} skipped",
        path.display(),
        records.len(),
        observer.skipped()
    );
    Ok(())
}

fn evaluators() -> anyhow::Result<()> {
    let registry = EvaluatorRegistry::with_defaults();
    for name in registry.available_types() {
        // available_types only returns registered names
        let Some(factory) = registry.get_factory(name) else {
            continue;
        };
        let state = if factory.is_configured() {
            "configured"
        } else {
            "not configured"
        };
        println!("{name:<16} {state:<16} {}", factory.description());
    }
    Ok(())
}
