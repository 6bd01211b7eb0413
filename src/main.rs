use std::fs::File;
use std::path::PathBuf;

use clap::Parser;

use batchsim::{Scheduler, SimSettings};

/// Discrete-event simulator of a multiprogrammed batch OS.
#[derive(Debug, Parser)]
#[command(name = "batchsim", version)]
struct Args {
    /// Workload-description file to simulate.
    input: PathBuf,

    /// Optional TOML file overriding the simulation constants.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the job summary as CSV to this path.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the job summary as JSON lines to this path.
    #[arg(long)]
    jsonl: Option<PathBuf>,

    /// Log verbosity (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let settings = match &args.config {
        Some(path) => {
            tracing::info!("loading configuration from: {}", path.display());
            batchsim::load_settings(path).map_err(|e| {
                tracing::error!("failed to load config from '{}': {}", path.display(), e);
                Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
            })?
        }
        None => SimSettings::default(),
    };

    tracing::info!(
        memory = settings.memory.size,
        quantum = settings.processor.quantum,
        multiprogramming = settings.multiprogramming.limit,
        "simulation settings"
    );

    tracing::info!("reading workload from: {}", args.input.display());
    let workload = batchsim::read_workload(&args.input)?;

    let mut scheduler = Scheduler::new(&settings, workload);
    let report = scheduler.run();

    print!("{}", report.render_table());

    if let Some(path) = &args.csv {
        report.write_csv(File::create(path)?)?;
        tracing::info!("job summary written to {}", path.display());
    }
    if let Some(path) = &args.jsonl {
        report.write_jsonl(File::create(path)?)?;
        tracing::info!("job summary written to {}", path.display());
    }

    Ok(())
}
