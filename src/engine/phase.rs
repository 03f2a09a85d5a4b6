use serde::Serialize;

use crate::planner::Plan;

/// Where a search stands. Every transition happens right after a drop
/// (`after_drop`) or, when there is nothing left to drop in the current
/// phase, at the beginning of the next step (`next_drop`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Dropping the first probe from the planned floor at `index`
    Descending { index: usize },
    /// Dropping the second probe from every floor of a range, bottom to top
    Scanning(ScanRange),
    Done(Termination),
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Descending { index: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanRange {
    pub first: u64,
    pub next: u64,
    pub last: u64,
    pub origin: ScanOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrigin {
    /// The planned drop at `break_index` broke the first probe
    Bracketed { break_index: usize },
    /// No planned drop broke the first probe
    AbovePlan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Termination {
    Found { floor: u64 },
    /// The scanned range ended without a break, although its top floor broke before
    ScanExhausted { first: u64, last: u64 },
    /// No floor of the building broke anything
    NoBreakingFloor,
    /// The plan was empty
    NothingToProbe,
}

/// What [`Phase::next_drop`] leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextDrop {
    /// Drop from `floor`, in `phase`
    From { phase: Phase, floor: u64 },
    Finished(Termination),
}

impl Phase {
    pub fn is_done(&self) -> bool {
        matches!(self, Phase::Done(_))
    }

    /// The next drop of a search in this phase. A phase with no floor left to drop
    /// from first gives way to the phase that follows it.
    pub fn next_drop(self, plan: &Plan) -> NextDrop {
        match self {
            Phase::Done(termination) => NextDrop::Finished(termination),
            Phase::Descending { index } => match (plan.sequence.get(index), plan.sequence.last()) {
                (Some(floor), _) => NextDrop::From { phase: self, floor },
                (None, None) => NextDrop::Finished(Termination::NothingToProbe),
                (None, Some(top)) if top + 1 < plan.floors => NextDrop::From {
                    phase: Phase::Scanning(ScanRange {
                        first: top + 1,
                        next: top + 1,
                        last: plan.floors - 1,
                        origin: ScanOrigin::AbovePlan,
                    }),
                    floor: top + 1,
                },
                (None, Some(_)) => NextDrop::Finished(Termination::NoBreakingFloor),
            },
            Phase::Scanning(range) if range.next <= range.last => NextDrop::From { phase: self, floor: range.next },
            Phase::Scanning(range) => NextDrop::Finished(match range.origin {
                ScanOrigin::Bracketed { .. } => Termination::ScanExhausted {
                    first: range.first,
                    last: range.last,
                },
                ScanOrigin::AbovePlan => Termination::NoBreakingFloor,
            }),
        }
    }

    /// The phase that follows a drop from `floor`, made in this phase
    pub fn after_drop(self, plan: &Plan, floor: u64, broke: bool) -> Phase {
        match self {
            Phase::Descending { index } if broke => {
                let first = match index {
                    0 => 0,
                    _ => plan.sequence.get(index - 1).map_or(0, |safe| safe + 1),
                };
                Phase::Scanning(ScanRange {
                    first,
                    next: first,
                    last: floor,
                    origin: ScanOrigin::Bracketed { break_index: index },
                })
            }
            Phase::Descending { index } => Phase::Descending { index: index + 1 },
            Phase::Scanning(_) if broke => Phase::Done(Termination::Found { floor }),
            Phase::Scanning(range) => Phase::Scanning(ScanRange { next: range.next + 1, ..range }),
            done @ Phase::Done(_) => done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan;

    fn floor_of(next: NextDrop) -> Option<u64> {
        match next {
            NextDrop::From { floor, .. } => Some(floor),
            NextDrop::Finished(_) => None,
        }
    }

    #[test]
    fn test_break_opens_bracket_above_previous_drop() {
        let p = plan(10);
        let phase = Phase::Descending { index: 1 }.after_drop(&p, 7, true);
        assert_eq!(phase, Phase::Scanning(ScanRange {
            first: 5,
            next: 5,
            last: 7,
            origin: ScanOrigin::Bracketed { break_index: 1 },
        }));
        assert_eq!(phase.next_drop(&p), NextDrop::From { phase, floor: 5 });
    }

    #[test]
    fn test_first_drop_break_scans_from_ground() {
        let p = plan(10);
        let phase = Phase::default().after_drop(&p, 4, true);
        assert_eq!(floor_of(phase.next_drop(&p)), Some(0));
    }

    #[test]
    fn test_exhausted_plan_scans_above() {
        let p = plan(5);
        let phase = Phase::default().after_drop(&p, 3, false);
        let above = Phase::Scanning(ScanRange { first: 4, next: 4, last: 4, origin: ScanOrigin::AbovePlan });
        assert_eq!(phase.next_drop(&p), NextDrop::From { phase: above, floor: 4 });
        let done = above.after_drop(&p, 4, false).next_drop(&p);
        assert_eq!(done, NextDrop::Finished(Termination::NoBreakingFloor));
    }

    #[test]
    fn test_exhausted_bracket_is_reported() {
        let p = plan(10);
        let mut phase = Phase::default().after_drop(&p, 4, true);
        for floor in 0..=4 {
            assert_eq!(floor_of(phase.next_drop(&p)), Some(floor));
            phase = phase.after_drop(&p, floor, false);
        }
        assert_eq!(phase.next_drop(&p), NextDrop::Finished(Termination::ScanExhausted { first: 0, last: 4 }));
    }

    #[test]
    fn test_plan_reaching_top_floor_ends_without_scan() {
        let p = plan(10);
        let phase = Phase::Descending { index: p.sequence.len() };
        assert_eq!(phase.next_drop(&p), NextDrop::Finished(Termination::NoBreakingFloor));
    }

    #[test]
    fn test_empty_plan() {
        let p = plan(0);
        assert_eq!(Phase::default().next_drop(&p), NextDrop::Finished(Termination::NothingToProbe));
    }

    #[test]
    fn test_finished_phase_stays_finished() {
        let p = plan(10);
        let done = Phase::Done(Termination::Found { floor: 3 });
        assert_eq!(done.next_drop(&p), NextDrop::Finished(Termination::Found { floor: 3 }));
    }
}
