use hotstuff_types::Address;
use thiserror::Error;

use crate::ProposerPolicy;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    /// A committer is not a member, or appears more than once.
    #[error("invalid participant {0}")]
    InvalidParticipant(Address),

    #[error("quorum not reached: {have} seals, need more than {threshold}")]
    QuorumNotReached { have: usize, threshold: usize },

    #[error("validator set is empty")]
    EmptySet,

    #[error("proposer policy {0} is not supported")]
    UnsupportedPolicy(ProposerPolicy),
}
