use clap::{Parser, Subcommand};
use rand::Rng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use shapes_common::ItemId;
use shapes_kernel::RecordingVisuals;
use shapes_spawn::{REMOVAL_STREAM, SpawnConfig, SpawnCoordinator, TargetRoller, seeded_rng};
use shapes_tools::PopulationInspector;

#[derive(Parser)]
#[command(name = "shapes-cli", about = "CLI tool for shapes population runs")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON config file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the config seed
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Roll the per-kind count from the target range instead of using count_per_kind
    #[arg(long, global = true)]
    roll: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Spawn a population and remove items one at a time
    Simulate {
        /// Number of removals to perform
        #[arg(short, long, default_value = "10")]
        removals: usize,
        /// Print each rebalance result as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Spawn a population and print every item
    Inspect,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => SpawnConfig::load(path)?,
        None => SpawnConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    match cli.command {
        Commands::Info => {
            println!("shapes-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("balance: {}", shapes_balance::crate_info());
            println!("spawn: {}", shapes_spawn::crate_info());
            println!("tools: {}", shapes_tools::crate_info());
            println!(
                "config: kinds={} colors={} tolerance={} target={}..={} seed={}",
                config.kinds.len(),
                config.colors.len(),
                config.tolerance,
                config.target_range.min,
                config.target_range.max,
                config.seed
            );
        }
        Commands::Simulate { removals, json } => {
            let mut coordinator = spawn(&config, cli.roll)?;
            println!("{}", PopulationInspector::summary(coordinator.store()));

            let mut picker = seeded_rng(config.seed, REMOVAL_STREAM);
            let mut events = 0usize;
            for step in 1..=removals {
                if coordinator.store().is_empty() {
                    println!("Population exhausted after {} removals", step - 1);
                    break;
                }
                let live: Vec<ItemId> = coordinator.store().items().map(|i| i.id).collect();
                let pick = live[picker.gen_range(0..live.len())];
                let result = coordinator.on_item_removed(pick)?;
                events += coordinator.drain_events().len();

                if json {
                    println!("{}", serde_json::to_string(&result)?);
                } else {
                    let change = match (&result.deleted, &result.added) {
                        (Some(d), Some(a)) if d.id == a.id => {
                            format!("recolored {} {} -> {}", a.id, d.color, a.color)
                        }
                        (Some(d), Some(a)) => format!(
                            "replaced {} {}/{} with {} {}/{}",
                            d.id, d.kind, d.color, a.id, a.kind, a.color
                        ),
                        _ => "no correction".to_string(),
                    };
                    println!(
                        "[{step}] removed {} {}/{}: {:?}, {change}",
                        result.removed.id, result.removed.kind, result.removed.color, result.action
                    );
                }
            }

            let commands = coordinator.visuals_mut().drain();
            println!("Visual commands issued: {}", commands.len());
            println!("Population events: {events}");
            println!("{}", PopulationInspector::summary(coordinator.store()));
        }
        Commands::Inspect => {
            let coordinator = spawn(&config, cli.roll)?;
            println!("{}", PopulationInspector::summary(coordinator.store()));
            for info in PopulationInspector::list_items(coordinator.store()) {
                println!("  {info}");
            }
        }
    }

    Ok(())
}

/// Build a populated coordinator. With `roll`, the configured population is
/// replaced by one sized from the target range.
fn spawn(
    config: &SpawnConfig,
    roll: bool,
) -> anyhow::Result<SpawnCoordinator<shapes_spawn::BoxPlacement, RecordingVisuals>> {
    let mut coordinator = SpawnCoordinator::from_config(config, RecordingVisuals::new())?;
    if roll {
        let n = TargetRoller::new(config.target_range, config.seed).roll();
        tracing::info!(n, "spawning rolled population");
        coordinator.on_population_target_received(n)?;
    }
    coordinator.visuals_mut().drain();
    coordinator.drain_events();
    Ok(coordinator)
}
