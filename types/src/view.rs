//! Consensus view: the (height, round) pair seeding proposer selection.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A consensus view.
///
/// `round` increments on leader change or timeout; `height` increments with
/// each committed block. Views order by height first, then round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct View {
    pub round: u64,
    pub height: u64,
}

impl View {
    pub fn new(height: u64, round: u64) -> Self {
        Self { round, height }
    }

    /// The view after a leader change at the same height.
    pub fn next_round(&self) -> Self {
        Self::new(self.height, self.round + 1)
    }

    /// The first round of the following height.
    pub fn next_height(&self) -> Self {
        Self::new(self.height + 1, 0)
    }
}

impl Ord for View {
    fn cmp(&self, other: &Self) -> Ordering {
        self.height
            .cmp(&other.height)
            .then(self.round.cmp(&other.round))
    }
}

impl PartialOrd for View {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Height: {}, Round: {}}}", self.height, self.round)
    }
}
