use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use super::phase::{Phase, Termination};
use crate::errors::SearchError;
use crate::planner::{Plan, ProbeSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Descent,
    Scan,
}

/// A single drop, and whether the probe broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Probe {
    pub floor: u64,
    pub broke: bool,
    pub stage: Stage,
}

/// The final answer of a search that found the breaking floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub found_floor: u64,
    pub total_drops: usize,
}

/// Everything a search did so far: its plan, the drops in the order they were
/// made, and the phase it is in.
///
/// The default state has an empty plan. Stepping it finishes immediately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub(super) plan: Plan,
    pub(super) drops: Vec<Probe>,
    pub(super) phase: Phase,
}

impl SearchState {
    pub fn new(plan: Plan) -> Self {
        SearchState { plan, drops: vec![], phase: Phase::default() }
    }

    /// Forget every drop, keeping the plan
    pub fn restart(&mut self) {
        self.drops.clear();
        self.phase = Phase::default();
    }

    pub(super) fn record(&mut self, probe: Probe) {
        debug_assert!(!self.phase.is_done(), "no drop can follow the end of a search");
        self.drops.push(probe);
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }
    pub fn k(&self) -> u64 {
        self.plan.k
    }
    pub fn sequence(&self) -> &ProbeSequence {
        &self.plan.sequence
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn drops(&self) -> &[Probe] {
        &self.drops
    }
    pub fn dropped_floors(&self) -> impl Iterator<Item = u64> + '_ {
        self.drops.iter().map(|p| p.floor)
    }
    pub fn total_drops(&self) -> usize {
        self.drops.len()
    }
    pub fn is_finished(&self) -> bool {
        self.phase.is_done()
    }

    pub fn found_floor(&self) -> Option<u64> {
        match self.phase {
            Phase::Done(Termination::Found { floor }) => Some(floor),
            _ => None,
        }
    }

    /// The found floor or, when the search ended without one, the top floor
    pub fn last_resort_floor(&self) -> u64 {
        self.found_floor().unwrap_or_else(|| self.plan.floors.saturating_sub(1))
    }

    pub fn outcome(&self) -> Result<SearchOutcome, SearchError> {
        let total_drops = self.total_drops();
        match self.phase {
            Phase::Done(Termination::Found { floor }) => Ok(SearchOutcome { found_floor: floor, total_drops }),
            Phase::Done(Termination::ScanExhausted { first, last }) => {
                Err(SearchError::ScanExhausted { first, last })
            }
            Phase::Done(Termination::NoBreakingFloor) => {
                Err(SearchError::NoBreakingFloor { floors: self.plan.floors })
            }
            Phase::Done(Termination::NothingToProbe) => Err(SearchError::NothingToProbe),
            _ => Err(SearchError::Unfinished { drops: total_drops }),
        }
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.is_finished(), self.found_floor()) {
            (_, Some(floor)) => write!(f, "found floor {}", floor)?,
            (true, None) => f.write_str("finished without a floor")?,
            (false, None) => f.write_str("searching")?,
        }
        write!(f, " after {} drops", self.total_drops())?;
        if !self.drops.is_empty() {
            write!(f, " ({})", self.dropped_floors().join(", "))?;
        }
        Ok(())
    }
}
