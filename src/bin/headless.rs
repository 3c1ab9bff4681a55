//! Headless batch runner: trains independent runs in parallel and writes their records.

use anyhow::{Context, Result};
use clap::Parser;
use evo_arena::simulation::brain::BrainBuilder;
use evo_arena::simulation::evolution::GeneticEvolver;
use evo_arena::simulation::params::Params;
use evo_arena::simulation::telemetry::{FileRecordSink, NullSink, RecordSink, new_run_id};
use evo_arena::simulation::trainer::{RunSummary, Trainer};
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML parameter file; defaults are used for missing keys.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of independent runs.
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Directory receiving one generation log per run.
    #[arg(long, default_value = "stats")]
    stats_dir: PathBuf,

    /// File collecting the periodic best-genome records of all runs.
    #[arg(long, default_value = "best_genomes.txt")]
    best_log: PathBuf,

    /// Base seed; run `i` uses `seed + 1000 * i`.
    #[arg(long)]
    seed: Option<u64>,

    /// Do not write any record file.
    #[arg(long)]
    no_records: bool,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::info!("{args:#?}");

    let mut params = match &args.config {
        Some(path) => Params::from_file(path).with_context(|| format!("failed to load {}", path.display()))?,
        None => Params::default(),
    };
    if args.seed.is_some() {
        params.seed = args.seed;
    }

    let summaries: Vec<RunSummary> = (0..args.runs)
        .into_par_iter()
        .map(|run_idx| train(&args, &params, run_idx))
        .collect::<Result<_>>()?;

    for summary in &summaries {
        log::info!(
            "run {}: {} generations, best fitness {:?}, stopped by {:?}",
            summary.run_id,
            summary.generations,
            summary.best_fitness,
            summary.reason
        );
    }

    Ok(())
}

fn train(args: &Cli, params: &Params, run_idx: usize) -> Result<RunSummary> {
    let mut params = params.clone();
    params.seed = params.seed.map(|seed| seed.wrapping_add(1000 * run_idx as u64));

    let run_id = format!("{}-{run_idx}", new_run_id());
    let sink: Box<dyn RecordSink> = if args.no_records {
        Box::new(NullSink)
    } else {
        Box::new(FileRecordSink::new(&args.stats_dir, &args.best_log, &run_id).context("failed to open record files")?)
    };

    let builder = BrainBuilder::new(params.layer_sizes());
    let evolver = GeneticEvolver::from_params(&params);
    let mut trainer = Trainer::new(params, Box::new(evolver), Box::new(builder), sink, run_id)
        .with_context(|| format!("failed to set up run {run_idx}"))?;

    trainer.run().with_context(|| format!("run {run_idx} failed"))
}
