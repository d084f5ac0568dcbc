//! CLI binary for wordscout.

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wordscout::{ExtractionMode, Pipeline, WordscoutConfig, query, report};

/// Search the web and report the most common words across the result pages.
#[derive(Parser)]
#[command(name = "wordscout", version, about)]
struct Cli {
    /// Comma-separated search queries.
    #[arg(short, long)]
    query: Option<String>,

    /// Comma-separated search queries, used when --query is absent.
    #[arg(short, long = "multi-query")]
    multi_query: Option<String>,

    /// Result URLs requested per query.
    #[arg(short = 'n', long = "num-results")]
    num_results: Option<usize>,

    /// What to count: b/body, m/meta or a/all. Empty means body.
    #[arg(short, long = "search")]
    search_type: Option<String>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How many of the most common words to print.
    #[arg(short = 'k', long = "top")]
    top: Option<usize>,

    /// Pages fetched at once.
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("wordscout=info,wordscout_search=info,html5ever=warn,reqwest=warn")
        }))
        .init();

    let cli = Cli::parse();

    let queries = query::select(cli.query.as_deref(), cli.multi_query.as_deref())?;
    let config = load_config(&cli)?;
    config.validate()?;

    info!(
        queries = queries.len(),
        mode = %config.report.mode,
        num_results = config.search.max_results,
        "starting run"
    );

    let pipeline = Pipeline::from_config(&config)?;
    let index = pipeline.run(&queries).await?;

    if cli.json {
        println!("{}", report::render_json(&index, config.report.top_k)?);
    } else {
        print!("{}", report::render_text(&index, config.report.top_k));
    }

    Ok(())
}

/// Explicit `--config`, else the default path if it exists, else defaults.
/// Flags given on the command line win over file values.
fn load_config(cli: &Cli) -> anyhow::Result<WordscoutConfig> {
    let mut config = match cli.config {
        Some(ref path) => WordscoutConfig::from_file(path)?,
        None => {
            let path = WordscoutConfig::default_config_path();
            if path.is_file() {
                debug!(path = %path.display(), "loading default config");
                WordscoutConfig::from_file(&path)?
            } else {
                WordscoutConfig::default()
            }
        }
    };

    if let Some(ref search_type) = cli.search_type {
        config.report.mode = search_type.parse::<ExtractionMode>()?;
    }
    if let Some(n) = cli.num_results {
        config.search.max_results = n;
    }
    if let Some(k) = cli.top {
        config.report.top_k = k;
    }
    if let Some(j) = cli.concurrency {
        config.fetch.concurrency = j;
    }

    Ok(config)
}
