use clap::Parser;
use colored::*;
use tracing::{error, info};

use fec_collector::{
    cli::{output, Cli, Commands, LookupQuery, OutputFormat},
    collector::Collector,
    fec::FecClient,
    storage::JsonStore,
    AppContext, Config, Result,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fec_collector=info,warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Lookup { format, query }) => run_lookup(config, format, query).await,
        None => run_batch(&config, cli.fetch, cli.retry, cli.merge).await,
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

/// Run the requested batch operations in fetch, retry, merge order
async fn run_batch(config: &Config, fetch: bool, retry: bool, merge: bool) -> Result<()> {
    let store = JsonStore::new(config.storage.clone());
    store.ensure_dir()?;

    if !(fetch || retry || merge) {
        info!(
            "Nothing to do; data directory is {}. Pass --fetch, --retry or --merge.",
            store.data_dir().display()
        );
        return Ok(());
    }

    let client = FecClient::from_config(config)?;
    let collector = Collector::new(&client, config.collector.clone(), store);

    if fetch {
        let summary = collector.fetch().await?;
        if !summary.listing_complete {
            println!(
                "{}",
                format!(
                    "Candidate listing stopped after {} pages; results are partial",
                    summary.pages_fetched
                )
                .yellow()
            );
        }
        summary.filter.print_summary();
    }

    if retry {
        let recovered = collector.retry().await?;
        println!("{}", format!("✓ Recovered {} candidates", recovered.len()).green());
    }

    if merge {
        match collector.merge()? {
            Some(merged) => {
                println!("{}", format!("✓ Merged {} candidates", merged.len()).green());
            }
            None => {
                println!("{}", "Merge skipped: run --fetch and --retry first".yellow());
            }
        }
    }

    Ok(())
}

async fn run_lookup(config: Config, format: OutputFormat, query: LookupQuery) -> Result<()> {
    let client = FecClient::from_config(&config)?;
    let mut ctx = AppContext::init(config, client)?;

    match query {
        LookupQuery::Search { name } => {
            let found = ctx.search_candidates(&name).await?;
            output::candidates(&found, format)
        }
        LookupQuery::Donations { candidate_id, year } => {
            let records = ctx.donations(&candidate_id, year).await?;
            output::donations(&records, format)
        }
        LookupQuery::Committees { candidate_id } => {
            output::committees(&candidate_id, ctx.committees(&candidate_id), format)
        }
        LookupQuery::LatestReport { committee_ids } => {
            let mut reports = Vec::with_capacity(committee_ids.len());
            for committee_id in committee_ids {
                let report = ctx.latest_report(&committee_id).await?;
                reports.push((committee_id, report));
            }
            let cache = ctx.report_cache();
            info!(
                hits = cache.hits(),
                misses = cache.misses(),
                capacity = cache.capacity(),
                policy = %cache.policy(),
                "Report cache usage"
            );
            output::latest_reports(&reports, format)
        }
    }
}
