use clap::Parser;
use dust_sweep::config::with_builtin_chains;
use dust_sweep::utils::config_loader::{OptionalSweepConfigLoader, SweepConfigLoader, load_json_from_file};
use dust_sweep::{
    ChainDirectory, ExecutionEvent, ExecutorConfig, OutcomeStatus, Plan, RpcWallet, RunReport, TransactionExecutor, WalletSession,
};
use eyre::{Result, WrapErr, eyre};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Execute a dust aggregation plan through a wallet, one chain at a time.
#[derive(Debug, Parser)]
#[command(name = "dust-sweep", version)]
struct Args {
    /// Planner response (`/api/aggregate` JSON) to execute
    #[arg(long, short)]
    plan: PathBuf,

    /// TOML config with `[executor]` and optional `[chains]` sections
    #[arg(long, short, env = "DUST_SWEEP_CONFIG")]
    config: Option<PathBuf>,

    /// Chain list (`/api/chains` JSON); overrides `[chains]` from the config
    #[arg(long)]
    chains: Option<PathBuf>,
}

fn init_logging() -> Result<()> {
    let output_json = std::env::var("OUTPUT_JSON").map(|value| ["1", "y", "yes", "true"].contains(&value.to_lowercase().as_str())).unwrap_or(false);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    if output_json { builder.json().try_init() } else { builder.compact().try_init() }
        .map_err(|e| eyre!("Failed to initialize logging: {}", e))
}

async fn load_config(args: &Args) -> Result<(ExecutorConfig, ChainDirectory)> {
    let (mut config, configured_chains) = match &args.config {
        Some(path) => {
            let file_name = path.display().to_string();
            let config = ExecutorConfig::load_section_from_file(file_name.clone())
                .await
                .wrap_err_with(|| format!("Failed to load executor config from {file_name}"))?;
            let chains = ChainDirectory::load_optional_section_from_file(file_name).await?;
            (config, chains)
        }
        None => (ExecutorConfig::default(), None),
    };
    config.apply_env()?;

    let directory = match &args.chains {
        Some(path) => load_json_from_file(path).await.wrap_err_with(|| format!("Failed to load chain list from {}", path.display()))?,
        None => with_builtin_chains(configured_chains),
    };

    Ok((config, directory))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging()?;
    let args = Args::parse();

    let (config, directory) = load_config(&args).await?;
    let plan: Plan = load_json_from_file(&args.plan).await.wrap_err_with(|| format!("Failed to read plan {}", args.plan.display()))?;
    let plan = plan.into_checked()?;

    if plan.is_empty() {
        warn!("No transactions to execute");
        return Ok(());
    }
    for chain in plan.unknown_chains(&directory) {
        warn!(chain, "Plan references a chain missing from the chain list, its transactions will fail");
    }
    if let Some(instructions) = &plan.instructions {
        info!(%instructions, "Planner instructions");
    }

    let mut wallet = RpcWallet::connect(&config).await?;
    info!(account = %wallet.account(), fingerprint = %plan.fingerprint(), "Executing {} transactions", plan.submittable_count());

    let mut executor = TransactionExecutor::new();
    let mut events = executor.subscribe();
    let progress = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                ExecutionEvent::GroupStarted { chain, requests } => println!("→ {chain}: {requests} request(s)"),
                ExecutionEvent::Submitted { chain, tx_hash } => println!("  ⏳ {chain}: {tx_hash} submitted, confirming..."),
                _ => {}
            }
        }
    });

    let outcomes = executor.execute(plan.into_transactions(), &directory, &mut wallet).await;
    drop(executor);
    progress.await?;

    println!();
    for outcome in &outcomes {
        let label = outcome.request.label();
        match &outcome.status {
            OutcomeStatus::Success { tx_hash } => {
                let link = directory.get(&outcome.request.chain).and_then(|chain| chain.explorer_url(tx_hash));
                println!("✓ {label}: {}", link.unwrap_or_else(|| tx_hash.to_string()));
            }
            OutcomeStatus::Failed { kind, message } => println!("✗ {label}: [{kind}] {message}"),
            OutcomeStatus::Skipped => println!("- {label}: skipped"),
        }
    }

    let report = RunReport::from_outcomes(&outcomes);
    println!("\n{}", report.summary());

    if report.is_complete() { Ok(()) } else { Err(eyre!("{} of {} transactions failed", report.failed, report.submittable())) }
}
