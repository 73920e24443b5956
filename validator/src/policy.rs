//! Proposer selection policies.
//!
//! The seed arithmetic is consensus-critical: every node must pick the same
//! proposer for the same `(last_proposer, round)`. Arithmetic wraps on `u64`
//! overflow rather than panicking.

use hotstuff_types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Validator, ValidatorError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposerPolicy {
    /// Rotate to the validator after the last proposer, advanced by the round.
    #[default]
    RoundRobin,
    /// Keep the last proposer until a round change moves it.
    Sticky,
    /// Verifiable random selection. Not implemented; selecting with it fails.
    Vrf,
}

impl ProposerPolicy {
    /// Index of the next proposer in `validators` (sorted, non-empty).
    pub fn select(
        self,
        validators: &[Validator],
        last_proposer: Address,
        round: u64,
    ) -> Result<usize, ValidatorError> {
        if validators.is_empty() {
            return Err(ValidatorError::EmptySet);
        }
        match self {
            Self::RoundRobin => Ok(round_robin(validators, last_proposer, round)),
            Self::Sticky => Ok(sticky(validators, last_proposer, round)),
            Self::Vrf => Err(ValidatorError::UnsupportedPolicy(self)),
        }
    }
}

impl fmt::Display for ProposerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RoundRobin => "round_robin",
            Self::Sticky => "sticky",
            Self::Vrf => "vrf",
        };
        f.write_str(name)
    }
}

/// Position of `last_proposer` in the set, or 0 when it is not a member.
fn calc_seed(validators: &[Validator], last_proposer: Address, round: u64) -> u64 {
    let offset = validators
        .iter()
        .position(|v| v.address() == last_proposer)
        .unwrap_or(0) as u64;
    offset.wrapping_add(round)
}

fn round_robin(validators: &[Validator], last_proposer: Address, round: u64) -> usize {
    let seed = if last_proposer.is_zero() {
        round
    } else {
        calc_seed(validators, last_proposer, round).wrapping_add(1)
    };
    (seed % validators.len() as u64) as usize
}

fn sticky(validators: &[Validator], last_proposer: Address, round: u64) -> usize {
    let seed = if last_proposer.is_zero() {
        round
    } else {
        calc_seed(validators, last_proposer, round)
    };
    (seed % validators.len() as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(n: u8) -> Vec<Validator> {
        (1..=n).map(|i| Validator::new(Address::new([i; 20]))).collect()
    }

    #[test]
    fn round_robin_without_last_proposer_uses_round() {
        let vals = set(4);
        for round in 0..8 {
            assert_eq!(
                ProposerPolicy::RoundRobin.select(&vals, Address::ZERO, round).unwrap(),
                (round % 4) as usize
            );
        }
    }

    #[test]
    fn round_robin_moves_past_last_proposer() {
        let vals = set(4);
        let last = vals[2].address();
        assert_eq!(ProposerPolicy::RoundRobin.select(&vals, last, 0).unwrap(), 3);
        assert_eq!(ProposerPolicy::RoundRobin.select(&vals, last, 1).unwrap(), 0);
    }

    #[test]
    fn sticky_keeps_last_proposer_in_round_zero() {
        let vals = set(4);
        let last = vals[2].address();
        assert_eq!(ProposerPolicy::Sticky.select(&vals, last, 0).unwrap(), 2);
        assert_eq!(ProposerPolicy::Sticky.select(&vals, last, 3).unwrap(), 1);
    }

    #[test]
    fn unknown_last_proposer_counts_as_slot_zero() {
        let vals = set(4);
        let stranger = Address::new([0xEE; 20]);
        assert_eq!(ProposerPolicy::RoundRobin.select(&vals, stranger, 0).unwrap(), 1);
        assert_eq!(ProposerPolicy::Sticky.select(&vals, stranger, 0).unwrap(), 0);
    }

    #[test]
    fn vrf_is_unsupported() {
        assert_eq!(
            ProposerPolicy::Vrf.select(&set(4), Address::ZERO, 0),
            Err(ValidatorError::UnsupportedPolicy(ProposerPolicy::Vrf))
        );
    }

    #[test]
    fn empty_set_is_distinct_from_unsupported() {
        assert_eq!(
            ProposerPolicy::RoundRobin.select(&[], Address::ZERO, 0),
            Err(ValidatorError::EmptySet)
        );
    }

    #[test]
    fn serializes_snake_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            policy: ProposerPolicy,
        }
        let text = toml::to_string(&Wrapper {
            policy: ProposerPolicy::RoundRobin,
        })
        .unwrap();
        assert_eq!(text.trim(), "policy = \"round_robin\"");
        let back: Wrapper = toml::from_str("policy = \"sticky\"").unwrap();
        assert_eq!(back.policy, ProposerPolicy::Sticky);
    }
}
