//! The two-probe search for the breaking floor.
//!
//! A search can be stepped one drop at a time with [`ThresholdSearchEngine::advance`],
//! or solved at once with [`ThresholdSearchEngine::run_to_completion`]. Both make the
//! same drops in the same order: when no planned drop breaks the first probe,
//! both go on scanning the floors above the plan up to the top floor.

use log::{debug, info, warn};

pub use phase::{NextDrop, Phase, ScanOrigin, ScanRange, Termination};
pub use state::{Probe, SearchOutcome, SearchState, Stage};

use crate::config::SearchConfig;
use crate::planner::{plan, Plan};

mod batch;
mod phase;
mod state;

/// Tells whether a probe dropped from a given floor breaks
pub trait BreakOracle {
    fn breaks(&mut self, floor: u64) -> bool;
}

/// The usual threshold: every floor at or above the secret floor breaks the probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretFloor(pub u64);

impl BreakOracle for SecretFloor {
    fn breaks(&mut self, floor: u64) -> bool {
        floor >= self.0
    }
}

impl<F: FnMut(u64) -> bool> BreakOracle for F {
    fn breaks(&mut self, floor: u64) -> bool {
        self(floor)
    }
}

/// What a call to [`ThresholdSearchEngine::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Dropped(Probe),
    Finished(Termination),
}

#[derive(Debug, Clone)]
pub struct ThresholdSearchEngine<O = SecretFloor> {
    oracle: O,
    state: SearchState,
}

impl ThresholdSearchEngine<SecretFloor> {
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_oracle(config.floors(), SecretFloor(config.secret()))
    }

    /// Start over with another building, dropping the current plan and drops
    pub fn apply(&mut self, config: &SearchConfig) {
        *self = Self::new(config);
    }
}

impl<O: BreakOracle> ThresholdSearchEngine<O> {
    /// `floors` is planned as is; [`SearchConfig::check_floors`] bounds it.
    pub fn with_oracle(floors: u64, oracle: O) -> Self {
        ThresholdSearchEngine { oracle, state: SearchState::new(plan(floors)) }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn plan(&self) -> &Plan {
        self.state.plan()
    }

    pub fn into_state(self) -> SearchState {
        self.state
    }

    /// Make the next drop. Once the search is finished, this changes nothing and keeps
    /// returning [`Step::Finished`].
    pub fn advance(&mut self) -> Step {
        let (phase, floor) = match self.state.phase.next_drop(&self.state.plan) {
            NextDrop::From { phase, floor } => (phase, floor),
            NextDrop::Finished(termination) => {
                if !self.state.phase.is_done() {
                    self.state.phase = Phase::Done(termination);
                    log_transition(&self.state);
                }
                return Step::Finished(termination);
            }
        };
        if phase != self.state.phase {
            self.state.phase = phase;
            log_transition(&self.state);
        }
        let stage = match phase {
            Phase::Descending { .. } => Stage::Descent,
            _ => Stage::Scan,
        };
        let probe = drop_probe(&mut self.state, &mut self.oracle, floor, stage);
        self.state.phase = phase.after_drop(&self.state.plan, floor, probe.broke);
        if probe.broke {
            log_transition(&self.state);
        }
        Step::Dropped(probe)
    }

    /// Solve the search from the start, forgetting the drops made so far
    pub fn run_to_completion(&mut self) -> &SearchState {
        batch::run(&mut self.state, &mut self.oracle);
        log_transition(&self.state);
        &self.state
    }

    /// Forget every drop, keeping the plan
    pub fn restart(&mut self) {
        self.state.restart();
    }

    /// Forget the plan and every drop. The engine then finishes at once
    /// until a new configuration is applied.
    pub fn reset(&mut self) {
        self.state = SearchState::default();
    }
}

fn drop_probe<O: BreakOracle>(state: &mut SearchState, oracle: &mut O, floor: u64, stage: Stage) -> Probe {
    let broke = oracle.breaks(floor);
    debug!("{:?} drop from floor {}: {}", stage, floor, if broke { "broke" } else { "safe" });
    let probe = Probe { floor, broke, stage };
    state.record(probe);
    probe
}

fn log_transition(state: &SearchState) {
    match state.phase() {
        Phase::Scanning(range) => info!(
            "Scanning floors {} to {} with the second probe ({:?})",
            range.first, range.last, range.origin
        ),
        Phase::Done(Termination::Found { floor }) => {
            info!("Found breaking floor {} after {} drops", floor, state.total_drops())
        }
        Phase::Done(termination) => warn!("Search ended without a breaking floor: {:?}", termination),
        Phase::Descending { .. } => {}
    }
}
