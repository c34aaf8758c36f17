use anyhow::{Context, Result};
use clap::Parser;
use paper_fetcher::config::{find_config_file, get_config, load_config, LogFormat, LoggingConfig};
use paper_fetcher::ui::{print_papers, print_status, Status};
use paper_fetcher::utils::write_csv;
use paper_fetcher::{run, PipelineOutcome, PubMedSource};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch PubMed papers with industry-affiliated authors
#[derive(Parser, Debug)]
#[command(name = "paper-fetcher")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch PubMed papers with at least one industry-affiliated author", long_about = None)]
struct Cli {
    /// Search query for PubMed (supports full PubMed query syntax)
    query: String,

    /// Output CSV filename (prints to the console when omitted)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short)]
    debug: bool,
}

fn init_tracing(debug: bool, logging: &LoggingConfig) {
    let level = if debug { "debug" } else { logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("paper_fetcher={}", level)),
    );
    let json = logging.format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match find_config_file() {
        Some(path) => load_config(&path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => get_config().context("Invalid PAPER_FETCHER_* environment settings")?,
    };

    init_tracing(cli.debug, &config.logging);
    tracing::debug!("Using E-utilities at {}", config.pubmed.base_url);

    let source = PubMedSource::new(&config.pubmed)?;
    let papers = match run(&source, &cli.query).await? {
        PipelineOutcome::NoResults => {
            print_status(Status::Info, "No results found.");
            return Ok(());
        }
        PipelineOutcome::NoQualifyingPapers { fetched } => {
            tracing::debug!("None of {} fetched papers qualified", fetched);
            print_status(Status::Warning, "No qualifying papers found.");
            return Ok(());
        }
        PipelineOutcome::Papers(papers) => papers,
    };

    match &cli.file {
        Some(path) => {
            write_csv(path, &papers)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_status(Status::Success, &format!("Saved to {}", path.display()));
        }
        None => print_papers(&papers),
    }

    Ok(())
}
