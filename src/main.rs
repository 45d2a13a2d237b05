//! Lifeplan CLI
//!
//! Command-line interface for projecting a single household plan

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lifeplan::{
    plan::{load_events, load_plan},
    CsvDirectorySink, EducationCostTable, ProjectionConfig, ProjectionEngine, SnapshotSink,
};

#[derive(Debug, Parser)]
#[command(name = "lifeplan", version, about = "Project a household plan year by year")]
struct Args {
    /// Plan file (JSON)
    #[arg(long)]
    plan: PathBuf,

    /// Additional life events (CSV)
    #[arg(long)]
    events: Option<PathBuf>,

    /// Education cost table (CSV); the built-in table when omitted
    #[arg(long)]
    costs: Option<PathBuf>,

    /// Projection config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// First projected year, instead of the current year
    #[arg(long)]
    start_year: Option<i32>,

    /// Directory to write the plan's snapshot CSV into
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the expense breakdown for each year
    #[arg(long)]
    detailed: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut plan = load_plan(&args.plan)
        .with_context(|| format!("loading plan {}", args.plan.display()))?;
    if let Some(path) = &args.events {
        let events = load_events(path).with_context(|| format!("loading events {}", path.display()))?;
        plan.events.extend(events);
    }

    let costs = match &args.costs {
        Some(path) => EducationCostTable::from_csv_path(path)
            .with_context(|| format!("loading education costs {}", path.display()))?,
        None => EducationCostTable::standard(),
    };

    let mut config = match &args.config {
        Some(path) => ProjectionConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ProjectionConfig::default(),
    };
    if args.start_year.is_some() {
        config.start_year = args.start_year;
    }
    config.detailed_output |= args.detailed;

    let profile = &plan.profile;
    println!("Plan {}: {}", profile.plan_id, profile.name);
    println!("  Birth year: {}", profile.birth_year);
    println!("  Dependents: {}", plan.dependents.len());
    println!("  Life events: {}", plan.events.len());
    println!();

    let engine = ProjectionEngine::new(costs, config);
    let result = engine.project_plan(&plan);

    println!("{:>5} {:>4} {:>10} {:>10} {:>10} {:>12} {:>12}",
        "Year", "Age", "Income", "Expenses", "Balance", "Savings", "Investments");
    println!("{}", "-".repeat(71));
    for s in &result.snapshots {
        println!("{:>5} {:>4} {:>10} {:>10} {:>10} {:>12} {:>12}",
            s.year, s.age, s.income, s.expenses, s.balance, s.savings, s.investments);

        if let Some(detail) = &s.detail {
            let e = &detail.expenses;
            println!("      base {:.1} edu {:.1} tax {:.1} ins {:.1} events {:.1}/{:.1} adj {:.1} return {:.1}",
                e.base, e.education, e.income_tax, e.social_insurance,
                e.single_events, e.recurring_events, e.retirement_adjustment, detail.investment_return);
        }
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Years projected: {}", summary.total_years);
    println!("  Total income: {}", summary.total_income);
    println!("  Total expenses: {}", summary.total_expenses);
    println!("  Final savings: {}", summary.final_savings);
    println!("  Final investments: {}", summary.final_investments);
    if let Some(year) = summary.peak_year {
        println!("  Peak net worth: {} ({})", summary.peak_net_worth, year);
    }
    match summary.depletion_year {
        Some(year) => println!("  Assets depleted in: {}", year),
        None => println!("  Assets never depleted"),
    }

    if let Some(dir) = args.output {
        let mut sink = CsvDirectorySink::new(&dir);
        sink.store(&result)
            .with_context(|| format!("writing snapshots to {}", dir.display()))?;
        println!("\nSnapshots written to: {}", sink.path_for(result.plan_id).display());
    }

    Ok(())
}
