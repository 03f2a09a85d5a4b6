use std::ops::RangeInclusive;

use super::phase::{Phase, Termination};
use super::state::{SearchState, Stage};
use super::{drop_probe, BreakOracle};

/// Solves a search in a single pass, without going through the phase transitions
pub(super) fn run<O: BreakOracle>(state: &mut SearchState, oracle: &mut O) {
    state.restart();
    let planned = state.plan.sequence.clone();
    let mut previous_safe: Option<u64> = None;
    for floor in planned.iter() {
        if drop_probe(state, oracle, floor, Stage::Descent).broke {
            let first = previous_safe.map_or(0, |safe| safe + 1);
            state.phase = Phase::Done(match scan(state, oracle, first..=floor) {
                Some(found) => Termination::Found { floor: found },
                None => Termination::ScanExhausted { first, last: floor },
            });
            return;
        }
        previous_safe = Some(floor);
    }
    let top_floor = state.plan.floors.saturating_sub(1);
    state.phase = Phase::Done(match previous_safe {
        None => Termination::NothingToProbe,
        Some(highest_planned) => match scan(state, oracle, highest_planned + 1..=top_floor) {
            Some(found) => Termination::Found { floor: found },
            None => Termination::NoBreakingFloor,
        },
    });
}

fn scan<O: BreakOracle>(state: &mut SearchState, oracle: &mut O, floors: RangeInclusive<u64>) -> Option<u64> {
    floors.into_iter().find(|&floor| drop_probe(state, oracle, floor, Stage::Scan).broke)
}
