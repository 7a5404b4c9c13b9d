use anyhow::{Context, Result};
use clap::Parser;
use demand_net::config::{load_config, validate_config, TrainingConfig};
use demand_net::training::{Dataset, TrainingLoop};
use demand_net::utils::seeded_rng;
use demand_net::Network;
use ndarray::{Array1, Array2};
use rand::Rng;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Trains the regression network on synthetic demand data, y = 2*x1 - x2.
const NUM_INPUTS: usize = 2;
const VALIDATION_FRACTION: f64 = 0.2;

#[derive(Parser, Debug)]
#[command(name = "train_demand", about = "Train the demand regression network on synthetic data")]
struct Args {
    /// JSON training config; built-in defaults when absent
    #[arg(short, long)]
    config: Option<String>,

    #[arg(long)]
    iterations: Option<usize>,

    #[arg(long)]
    learning_rate: Option<f64>,

    #[arg(long)]
    hidden_nodes: Option<usize>,

    #[arg(long)]
    batch_size: Option<usize>,

    /// Number of synthetic records to generate
    #[arg(long, default_value_t = 512)]
    samples: usize,

    #[arg(long)]
    seed: Option<u64>,
}

// Config file (or defaults) with command-line overrides applied on top.
fn resolve_config(args: &Args) -> Result<TrainingConfig> {
    let mut config = match &args.config {
        Some(path) => {
            load_config(path).with_context(|| format!("loading config from {}", path))?
        }
        None => TrainingConfig::default(),
    };

    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(learning_rate) = args.learning_rate {
        config.learning_rate = learning_rate;
    }
    if let Some(hidden_nodes) = args.hidden_nodes {
        config.hidden_nodes = hidden_nodes;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    validate_config(&config).context("invalid training config")?;
    Ok(config)
}

// Uniform features in [-1, 1) with target 2*x1 - x2.
fn synthetic_dataset<R: Rng + ?Sized>(rng: &mut R, records: usize) -> Result<Dataset> {
    let features =
        Array2::from_shape_fn((records, NUM_INPUTS), |_| rng.gen_range(-1.0..1.0));
    let targets: Array1<f64> = features
        .rows()
        .into_iter()
        .map(|row| 2.0 * row[0] - row[1])
        .collect();
    Ok(Dataset::new(features, targets)?)
}

// Split off the last VALIDATION_FRACTION of the records.
fn split_validation(dataset: &Dataset) -> Result<(Dataset, Dataset)> {
    let n_validation = ((dataset.len() as f64) * VALIDATION_FRACTION).round() as usize;
    let n_train = dataset.len() - n_validation;

    let train = Dataset::new(
        dataset.features().slice(ndarray::s![..n_train, ..]).to_owned(),
        dataset.targets().slice(ndarray::s![..n_train]).to_owned(),
    )?;
    let validation = Dataset::new(
        dataset.features().slice(ndarray::s![n_train.., ..]).to_owned(),
        dataset.targets().slice(ndarray::s![n_train..]).to_owned(),
    )?;
    Ok((train, validation))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;
    let mut rng = seeded_rng(config.seed);

    let all = synthetic_dataset(&mut rng, args.samples)?;
    let (train, validation) = split_validation(&all)?;
    info!(
        train = train.len(),
        validation = validation.len(),
        "generated synthetic data"
    );

    let mut network = Network::with_rng(
        NUM_INPUTS,
        config.hidden_nodes,
        config.output_nodes,
        config.learning_rate,
        &mut rng,
    )?;
    let initial_mse = train.mse(&network)?;

    let train_start = Instant::now();
    let history = TrainingLoop::new(&config).run(&mut network, &train, Some(&validation), &mut rng)?;
    let train_time = train_start.elapsed().as_secs_f64();

    info!(
        initial_mse,
        final_train_mse = history.last_train().unwrap_or(initial_mse),
        final_validation_mse = history.last_validation(),
        seconds = train_time,
        "training finished"
    );

    Ok(())
}
