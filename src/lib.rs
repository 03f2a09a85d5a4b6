use std::io::BufRead;

use log::info;

pub use arguments::{Arguments, Mode};
pub use config::{SearchConfig, MAX_FLOORS};
pub use engine::{
    BreakOracle, NextDrop, Phase, Probe, ScanOrigin, ScanRange, SearchOutcome, SearchState, SecretFloor, Stage, Step,
    Termination, ThresholdSearchEngine,
};
pub use errors::{ConfigError, SearchError, SolveError};
pub use planner::{plan, step_count, Bracket, Plan, ProbeSequence};
use output_file::{release_output_file, reserve_output_file, write_report};
use report::{Report, RunReport};

mod arguments;
mod errors;
mod output_file;
mod playback;

pub mod config;
pub mod engine;
pub mod planner;
pub mod report;
pub mod scenarios;
pub mod sweep;

fn stdin_line() -> Result<String, SolveError> {
    std::io::stdin()
        .lock()
        .lines()
        .next()
        .ok_or(SolveError::EmptyInput)?
        .map_err(SolveError::from)
}

/// Sets up logging with an `env_logger` filter such as `"warn"` or `"eggdrop_rs=debug"`
pub fn init_log(filters: &str) {
    let _ = env_logger::Builder::new().parse_filters(filters).try_init();
}

/// Solves a single search, stepping through it or solving it at once depending on the mode
pub async fn solve_one(config: &SearchConfig, args: &Arguments) -> Result<SearchState, SolveError> {
    let mut engine = ThresholdSearchEngine::new(config);
    let plan = engine.plan();
    println!(
        "Dropping the first probe every {} floors, then every one floor less: {}",
        plan.k,
        itertools::join(plan.sequence.iter(), ", ")
    );
    let state = match args.mode {
        Mode::Step => {
            let progress = playback::progress_bar(0);
            playback::play(&mut engine, args.delay, &progress).await.clone()
        }
        Mode::Batch => engine.run_to_completion().clone(),
    };
    state.outcome()?;
    Ok(state)
}

/// What a run does, once its input is known to be valid
enum Job {
    Sweep(u64),
    Scenarios(Vec<SearchConfig>),
    Single(SearchConfig),
}

async fn choose_job(args: &Arguments) -> Result<Job, SolveError> {
    if args.sweep {
        Ok(Job::Sweep(SearchConfig::check_floors(args.choose_floors()?)?))
    } else if let Some(path) = &args.scenarios {
        Ok(Job::Scenarios(scenarios::load_scenarios(path).await?))
    } else {
        Ok(Job::Single(args.choose_config()?))
    }
}

async fn run_job(job: &Job, args: &Arguments) -> Result<Report, SolveError> {
    Ok(match job {
        Job::Sweep(floors) => {
            let floors = *floors;
            println!("Solving every breaking floor of a {} floor building...", floors);
            let report = sweep::sweep(floors, &playback::progress_bar(floors))?;
            println!(
                "Between {} and {} drops ({:.2} on average), for a planned worst case of {}",
                report.fewest_drops, report.most_drops, report.mean_drops, report.planned_worst_case
            );
            Report::Sweep(report)
        }
        Job::Scenarios(configs) => {
            let mut runs = Vec::with_capacity(configs.len());
            for config in configs {
                let state = sweep::verify(config)?;
                println!("{}: {}", config, state);
                runs.push(RunReport::new(config, &state));
            }
            Report::Scenarios { runs }
        }
        Job::Single(config) => {
            let state = solve_one(config, args).await?;
            println!("Found the breaking floor: {}", state);
            Report::Run(RunReport::new(config, &state))
        }
    })
}

pub async fn solve(args: &Arguments) -> Result<(), SolveError> {
    let job = choose_job(args).await?;
    let path = match &args.outfile {
        Some(path) => path,
        None => {
            run_job(&job, args).await?;
            info!("No output file requested");
            return Ok(());
        }
    };
    reserve_output_file(path)?;
    let report = match run_job(&job, args).await {
        Ok(report) => report,
        Err(err) => {
            release_output_file(path);
            return Err(err);
        }
    };
    write_report(path, &report).await?;
    println!("Saved the report to {}", path.to_string_lossy());
    Ok(())
}
