use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use mags_planner::plan::{plan, PlanOutcome};
use mags_planner::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(about, version)]
struct Cli {
    #[arg(
        value_name = "SCENARIO FILE",
        help = "JSON file describing the obstacle circles plus start and goal points"
    )]
    scenario: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let args = Cli::parse();

    let raw = fs::read_to_string(&args.scenario)
        .with_context(|| format!("reading scenario file {:?}", args.scenario))?;
    let scenario = Scenario::from_json_str(&raw)
        .with_context(|| format!("parsing scenario file {:?}", args.scenario))?;

    let outcome = plan(scenario.obstacle_circles(), scenario.start_point(), scenario.goal_point())
        .context("planning failed")?;

    match outcome {
        PlanOutcome::Found { waypoints, cost } => {
            for waypoint in &waypoints {
                println!("{:.6} {:.6}", waypoint.position.x(), waypoint.position.y());
            }
            println!("cost {:.6}", cost);
            Ok(())
        }
        PlanOutcome::NoPath => {
            eprintln!("NoPath");
            std::process::exit(1);
        }
    }
}
