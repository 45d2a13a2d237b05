//! Project every plan in a directory and store each snapshot set
//!
//! Plans are projected in parallel; each plan's CSV is replaced as a whole.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use lifeplan::{plan::load_plan, CsvDirectorySink, PlanRunner, ProjectionConfig, SnapshotSink};

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Project all plan files in a directory")]
struct Args {
    /// Directory of plan files (*.json)
    #[arg(long)]
    plans: PathBuf,

    /// Directory to write plan_<id>.csv files into
    #[arg(long)]
    output: PathBuf,

    /// Education cost table (CSV)
    #[arg(long)]
    costs: Option<PathBuf>,

    /// Projection config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let runner = match &args.costs {
        Some(path) => PlanRunner::from_csv_path(path)
            .with_context(|| format!("loading education costs {}", path.display()))?,
        None => PlanRunner::new(),
    };
    let config = match &args.config {
        Some(path) => ProjectionConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ProjectionConfig::default(),
    };

    let mut paths: Vec<PathBuf> = fs::read_dir(&args.plans)
        .with_context(|| format!("reading {}", args.plans.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let plans = paths
        .iter()
        .map(|path| load_plan(path).with_context(|| format!("loading plan {}", path.display())))
        .collect::<Result<Vec<_>>>()?;
    println!("Loaded {} plans in {:?}", plans.len(), start.elapsed());

    let proj_start = Instant::now();
    let results = runner.run_batch(&plans, &config);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut sink = CsvDirectorySink::new(&args.output);
    for result in &results {
        sink.store(result)
            .with_context(|| format!("writing snapshots for plan {}", result.plan_id))?;

        let summary = result.summary();
        println!("  Plan {:>4}: {} years, final savings {}, final investments {}{}",
            result.plan_id,
            summary.total_years,
            summary.final_savings,
            summary.final_investments,
            summary.depletion_year.map(|y| format!(", depleted {}", y)).unwrap_or_default(),
        );
    }

    println!("\nOutput written to {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}
