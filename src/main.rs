use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ferrite_forward::DriverConfig;

/// Builds a feedforward network, fills it with (optionally seeded) random
/// parameters, and prints the result of one forward pass.
///
/// With no flags this runs the built-in demo: 2 inputs → 5 → 3 → 1 sigmoid,
/// input `0.5,0.8`.
#[derive(Parser, Debug)]
#[command(name = "ferrite-forward", version, about)]
struct Cli {
    /// JSON driver config (topology, input, seed, init)
    #[arg(long)]
    config: Option<String>,

    /// Seed for parameter initialization; overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated input vector; overrides the config
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    input: Option<Vec<f64>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ferrite_forward=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DriverConfig::load_json(path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => DriverConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(input) = cli.input {
        config.input = input;
    }

    info!(
        layers = config.topology.layer_count(),
        seed = ?config.seed,
        init = ?config.init,
        "running forward pass"
    );
    let output = config.run().context("forward pass failed")?;

    for value in output {
        println!("Output: {value:.6}");
    }
    Ok(())
}
