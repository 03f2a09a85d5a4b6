//! Solving a building for every possible breaking floor.

use indicatif::ProgressBar;
use itertools::{Itertools, MinMaxResult};
use log::info;
use serde::Serialize;

use crate::config::SearchConfig;
use crate::engine::{SearchState, Step, ThresholdSearchEngine};
use crate::errors::SolveError;
use crate::planner::{plan, ProbeSequence};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub floors: u64,
    pub k: u64,
    pub sequence: ProbeSequence,
    pub planned_worst_case: u64,
    pub fewest_drops: usize,
    pub most_drops: usize,
    pub mean_drops: f64,
    /// The breaking floors that need `most_drops` drops
    pub hardest_secrets: Vec<u64>,
}

/// Solves a search both by stepping and in batch, and checks that
/// both found the breaking floor with the same drops
pub fn verify(config: &SearchConfig) -> Result<SearchState, SolveError> {
    let mut stepped = ThresholdSearchEngine::new(config);
    while let Step::Dropped(_) = stepped.advance() {}
    let mut batch = ThresholdSearchEngine::new(config);
    batch.run_to_completion();
    let (stepped, batch) = (stepped.into_state(), batch.into_state());
    if stepped != batch {
        return Err(SolveError::DivergentOutcome {
            floors: config.floors(),
            secret: config.secret(),
            stepped: stepped.to_string(),
            batch: batch.to_string(),
        });
    }
    let outcome = batch.outcome()?;
    if outcome.found_floor != config.secret() {
        return Err(SolveError::WrongFloor { expected: config.secret(), found: outcome.found_floor });
    }
    Ok(batch)
}

pub fn sweep(floors: u64, progress: &ProgressBar) -> Result<SweepReport, SolveError> {
    let floors = SearchConfig::check_floors(floors)?;
    let planned = plan(floors);
    progress.set_length(floors);
    let mut drops = Vec::new();
    for secret in 0..floors {
        let state = verify(&SearchConfig::new(floors, secret)?)?;
        drops.push(state.total_drops());
        progress.inc(1);
    }
    let (fewest_drops, most_drops) = match drops.iter().minmax() {
        MinMaxResult::NoElements => (0, 0),
        MinMaxResult::OneElement(&d) => (d, d),
        MinMaxResult::MinMax(&min, &max) => (min, max),
    };
    let mean_drops = drops.iter().sum::<usize>() as f64 / drops.len() as f64;
    let hardest_secrets = drops.iter()
        .positions(|&d| d == most_drops)
        .map(|secret| secret as u64)
        .collect();
    info!("Swept {} floors: between {} and {} drops", floors, fewest_drops, most_drops);
    progress.finish_and_clear();
    Ok(SweepReport {
        floors,
        k: planned.k,
        planned_worst_case: planned.worst_case_drops(),
        sequence: planned.sequence,
        fewest_drops,
        most_drops,
        mean_drops,
        hardest_secrets,
    })
}
