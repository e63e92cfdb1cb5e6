use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use log::{info, warn};
use std::sync::Arc;

use meteora_pool_ranker::config;
use meteora_pool_ranker::meteora::PoolFetcher;
use meteora_pool_ranker::models::{Category, WeightKey};
use meteora_pool_ranker::monitoring::MemoryLogSink;
use meteora_pool_ranker::strategy::{PoolSession, ScoredPool};
use meteora_pool_ranker::utils::{format_address, format_percent, format_usd, pool_url};

/// Rank Meteora DLMM pools by a tunable fee/depth score
#[derive(Debug, Parser)]
#[command(name = "meteora-pool-ranker", version, about)]
struct Cli {
    /// Tab to show: top, stable, majors, new
    #[arg(long, default_value = "top")]
    tab: Category,

    /// Case-insensitive filter on pair label or address
    #[arg(long, default_value = "")]
    search: String,

    /// Maximum rows to print
    #[arg(long, default_value_t = 25)]
    limit: usize,

    /// Weight override, e.g. `--weight depth=0.8` (repeatable)
    #[arg(long = "weight", value_parser = parse_weight)]
    weights: Vec<(WeightKey, f64)>,

    /// Show one pool with its bin histogram
    #[arg(long)]
    details: Option<String>,

    /// Print the ranked view as JSON
    #[arg(long)]
    json: bool,
}

fn parse_weight(arg: &str) -> Result<(WeightKey, f64), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {}", arg))?;
    let key = key.parse::<WeightKey>()?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid weight {}: {}", value, e))?;
    Ok((key, value))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables
    dotenv().ok();

    // Initialize logging
    init_logger();

    let cli = Cli::parse();
    info!("Starting Meteora pool ranker...");

    // Load configuration
    let config = config::load_config()?;
    info!("Configuration loaded ({} endpoints)", config.endpoints.len());

    let sink = Arc::new(MemoryLogSink::new());
    let fetcher = PoolFetcher::from_config(&config)?.with_sink(sink.clone());

    let mut session = PoolSession::new(config.weights);
    for (key, value) in &cli.weights {
        session.set_weight(*key, *value);
    }
    session.set_category(cli.tab);
    session.set_search(cli.search.clone());

    session.load(&fetcher).await;
    for failure in session.failures() {
        warn!("{} -> {}", failure.endpoint, failure.error);
    }

    if let Some(id) = &cli.details {
        let pool = session
            .details(id)
            .with_context(|| format!("Pool {} not found", id))?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&pool)?);
        } else {
            print_details(&pool);
        }
        return Ok(());
    }

    let view: Vec<ScoredPool> = session.view().into_iter().take(cli.limit).collect();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("Weights: {}", session.weights());
        print_table(&view, session.query().category);
    }

    info!("Diagnostics captured: {}", sink.entries().len());
    Ok(())
}

fn print_table(view: &[ScoredPool], category: Category) {
    println!("{} ({} pools)", category, view.len());
    println!(
        "{:<4} {:<20} {:<13} {:>10} {:>10} {:>9} {:>5} {:>7}",
        "#", "PAIR", "ADDRESS", "TVL", "VOL 24H", "FEE APR", "STEP", "SCORE"
    );
    for (rank, scored) in view.iter().enumerate() {
        let pool = &scored.pool;
        println!(
            "{:<4} {:<20} {:<13} {:>10} {:>10} {:>9} {:>5} {:>7.3}",
            rank + 1,
            pool.pair_label,
            format_address(&pool.id),
            format_usd(pool.tvl),
            format_usd(pool.volume_24h),
            format_percent(pool.fee_apr_estimate),
            pool.bin_step,
            scored.score,
        );
    }
}

fn print_details(scored: &ScoredPool) {
    let pool = &scored.pool;
    println!("{}  score {:.3}", pool.pair_label, scored.score);
    println!("  address    {}", pool.id);
    println!("  link       {}", pool_url(&pool.id));
    println!("  tvl        {}", format_usd(pool.tvl));
    println!("  volume 24h {}", format_usd(pool.volume_24h));
    println!("  volume 7d  {}", format_usd(pool.volume_7d));
    println!("  fee apr    {}", format_percent(pool.fee_apr_estimate));
    println!("  bin step   {}", pool.bin_step);
    if let Some(created) = pool.created_at {
        println!("  created    {}", created.to_rfc3339());
    }

    let label = if pool.has_live_bins() { "liquidity" } else { "liquidity (estimated)" };
    println!("  {}:", label);
    let peak = pool.bins.iter().cloned().fold(0.0_f64, f64::max);
    for (index, amount) in pool.bins.iter().enumerate() {
        let width = if peak > 0.0 { (amount / peak * 40.0).round() as usize } else { 0 };
        let marker = if index == pool.current_price_bin_index { '*' } else { ' ' };
        println!("  {}{:>3} {}", marker, index + 1, "#".repeat(width));
    }
}

fn init_logger() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or("RUST_LOG", "info")
    );
}
