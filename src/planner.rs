//! Planning of the drops made with the first probe.
//!
//! With two probes, the first one is dropped from floors separated by
//! decreasing gaps `k, k-1, k-2, ...` so that whichever gap the breaking floor
//! falls into, the number of first-probe drops plus the length of the gap
//! scanned by the second probe stays the same.

use log::debug;
use serde::Serialize;

/// The floors from which the first probe is dropped, in increasing order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ProbeSequence(Vec<u64>);

impl ProbeSequence {
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<u64> {
        self.0.get(index).copied()
    }
    pub fn last(&self) -> Option<u64> {
        self.0.last().copied()
    }
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }
    /// Distance of each planned floor from the previous one,
    /// the first one being measured from the ground
    pub fn gaps(&self) -> impl Iterator<Item = u64> + '_ {
        let previous = std::iter::once(0).chain(self.iter());
        self.iter().zip(previous).map(|(floor, previous)| floor - previous)
    }
}

/// A range of floors the second probe may have to scan,
/// after `descent_drops` drops of the first probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bracket {
    pub descent_drops: u64,
    pub first: u64,
    pub last: u64,
}

impl Bracket {
    pub fn width(&self) -> u64 {
        (self.last + 1).saturating_sub(self.first)
    }
    /// Drops needed when the breaking floor is the top of the bracket
    pub fn worst_case_drops(&self) -> u64 {
        self.descent_drops + self.width()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Plan {
    pub floors: u64,
    pub k: u64,
    pub sequence: ProbeSequence,
}

impl Plan {
    /// Every range the second probe can be asked to scan. The last one covers the floors
    /// above the highest planned drop, when there are any.
    pub fn brackets(&self) -> Vec<Bracket> {
        let mut brackets = Vec::with_capacity(self.sequence.len() + 1);
        let mut first = 0;
        for (index, floor) in self.sequence.iter().enumerate() {
            brackets.push(Bracket { descent_drops: index as u64 + 1, first, last: floor });
            first = floor + 1;
        }
        if !self.sequence.is_empty() && first < self.floors {
            brackets.push(Bracket {
                descent_drops: self.sequence.len() as u64,
                first,
                last: self.floors - 1,
            });
        }
        brackets
    }

    pub fn widest_bracket(&self) -> u64 {
        self.brackets().iter().map(Bracket::width).max().unwrap_or(0)
    }

    /// The largest number of drops a search following this plan can need
    pub fn worst_case_drops(&self) -> u64 {
        self.brackets().iter().map(Bracket::worst_case_drops).max().unwrap_or(0)
    }
}

fn triangular(k: u64) -> u128 {
    u128::from(k) * (u128::from(k) + 1) / 2
}

/// The smallest `k` such that `k * (k + 1) / 2 >= floors`
pub fn step_count(floors: u64) -> u64 {
    let target = u128::from(floors);
    let mut k = (((8.0 * floors as f64 + 1.0).sqrt() - 1.0) / 2.0) as u64;
    while triangular(k) < target {
        k += 1;
    }
    while k > 0 && triangular(k - 1) >= target {
        k -= 1;
    }
    k
}

pub fn plan(floors: u64) -> Plan {
    let k = step_count(floors);
    let mut sequence = Vec::new();
    let (mut current, mut step) = (k, k);
    while current < floors && step > 0 {
        sequence.push(current);
        step -= 1;
        current = current.saturating_add(step);
    }
    if sequence.is_empty() && floors > 0 {
        sequence.push(k.min(floors - 1));
    }
    debug!("Planned {} first-probe drops for {} floors (k={})", sequence.len(), floors, k);
    Plan { floors, k, sequence: ProbeSequence(sequence) }
}
