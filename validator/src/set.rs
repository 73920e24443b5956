//! The ordered validator set shared between header verification and sealing.
//!
//! Reads (every header verification) take the shared lock; membership
//! changes and proposer recomputation take the exclusive lock. No I/O
//! happens while either lock is held.

use hotstuff_types::Address;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::{ProposerPolicy, Validator, ValidatorError};

struct Inner {
    /// Sorted ascending by address, no duplicates.
    validators: Vec<Validator>,
    proposer: Option<Validator>,
}

pub struct ValidatorSet {
    policy: ProposerPolicy,
    inner: RwLock<Inner>,
}

impl ValidatorSet {
    /// Build a set from `addresses`. The caller guarantees there are no
    /// duplicates. The proposer starts at index 0 when the set is non-empty.
    pub fn new(addresses: impl IntoIterator<Item = Address>, policy: ProposerPolicy) -> Self {
        let mut validators: Vec<Validator> = addresses.into_iter().map(Validator::new).collect();
        validators.sort();
        let proposer = validators.first().copied();
        Self {
            policy,
            inner: RwLock::new(Inner {
                validators,
                proposer,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn size(&self) -> usize {
        self.read().validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn list(&self) -> Vec<Validator> {
        self.read().validators.clone()
    }

    pub fn address_list(&self) -> Vec<Address> {
        self.read().validators.iter().map(Validator::address).collect()
    }

    pub fn get_by_index(&self, index: usize) -> Option<Validator> {
        self.read().validators.get(index).copied()
    }

    /// Linear scan for `address`, returning its index and the validator.
    pub fn get_by_address(&self, address: &Address) -> Option<(usize, Validator)> {
        self.read()
            .validators
            .iter()
            .enumerate()
            .find(|(_, v)| v.address() == *address)
            .map(|(i, v)| (i, *v))
    }

    pub fn get_proposer(&self) -> Option<Validator> {
        self.read().proposer
    }

    pub fn is_proposer(&self, address: &Address) -> bool {
        self.get_proposer().is_some_and(|p| p.address() == *address)
    }

    /// Recompute and cache the proposer with the set's policy.
    pub fn calc_proposer(&self, last_proposer: Address, round: u64) -> Result<Validator, ValidatorError> {
        let mut inner = self.write();
        let index = self.policy.select(&inner.validators, last_proposer, round)?;
        let proposer = inner.validators[index];
        inner.proposer = Some(proposer);
        debug!(%last_proposer, round, index, proposer = %proposer, "proposer recomputed");
        Ok(proposer)
    }

    /// Force the proposer by index: `0` and `1` both select slot 0, any
    /// larger `index` selects slot `(index - 1) mod size`.
    pub fn calc_proposer_by_index(&self, index: u64) -> Result<Validator, ValidatorError> {
        let mut inner = self.write();
        let n = inner.validators.len() as u64;
        if n == 0 {
            return Err(ValidatorError::EmptySet);
        }
        let slot = if index <= 1 { 0 } else { (index - 1) % n };
        let proposer = inner.validators[slot as usize];
        inner.proposer = Some(proposer);
        Ok(proposer)
    }

    /// Insert `address`, keeping the canonical order. Returns `false` if it
    /// is already a member.
    pub fn add_validator(&self, address: Address) -> bool {
        let mut inner = self.write();
        match inner.validators.binary_search(&Validator::new(address)) {
            Ok(_) => false,
            Err(pos) => {
                inner.validators.insert(pos, Validator::new(address));
                debug!(%address, size = inner.validators.len(), "validator added");
                true
            }
        }
    }

    /// Remove `address`. Returns `false` if it was not a member.
    pub fn remove_validator(&self, address: &Address) -> bool {
        let mut inner = self.write();
        match inner.validators.iter().position(|v| v.address() == *address) {
            Some(pos) => {
                inner.validators.remove(pos);
                debug!(%address, size = inner.validators.len(), "validator removed");
                true
            }
            None => false,
        }
    }

    /// An independent deep copy; later changes to either set are not shared.
    pub fn copy(&self) -> ValidatorSet {
        let inner = self.read();
        ValidatorSet {
            policy: self.policy,
            inner: RwLock::new(Inner {
                validators: inner.validators.clone(),
                proposer: inner.proposer,
            }),
        }
    }

    /// How many entries of `addresses` are members. Repeated entries are
    /// counted each time.
    pub fn participants_number(&self, addresses: &[Address]) -> usize {
        let inner = self.read();
        addresses
            .iter()
            .filter(|a| inner.validators.iter().any(|v| v.address() == **a))
            .count()
    }

    /// Check that `committers` are distinct members numbering strictly more
    /// than [`q`](Self::q).
    pub fn check_quorum(&self, committers: &[Address]) -> Result<(), ValidatorError> {
        let (mut remaining, threshold) = {
            let inner = self.read();
            (inner.validators.clone(), quorum(inner.validators.len()))
        };
        for committer in committers {
            match remaining.iter().position(|v| v.address() == *committer) {
                Some(pos) => {
                    remaining.swap_remove(pos);
                }
                None => return Err(ValidatorError::InvalidParticipant(*committer)),
            }
        }
        if committers.len() > threshold {
            Ok(())
        } else {
            Err(ValidatorError::QuorumNotReached {
                have: committers.len(),
                threshold,
            })
        }
    }

    /// Maximum number of faulty validators tolerated: `ceil(N/3) - 1`.
    pub fn f(&self) -> usize {
        self.size().div_ceil(3).saturating_sub(1)
    }

    /// Quorum threshold: `ceil(2N/3)`. A certificate needs more than this.
    pub fn q(&self) -> usize {
        quorum(self.size())
    }

    pub fn policy(&self) -> ProposerPolicy {
        self.policy
    }

    /// Same size and same members, regardless of order or cached proposer.
    pub fn cmp(&self, other: &ValidatorSet) -> bool {
        let theirs = other.address_list();
        let n = self.participants_number(&theirs);
        n == self.size() && n == theirs.len()
    }
}

fn quorum(n: usize) -> usize {
    (2 * n).div_ceil(3)
}

impl Clone for ValidatorSet {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        f.debug_struct("ValidatorSet")
            .field("policy", &self.policy)
            .field("validators", &inner.validators)
            .field("proposer", &inner.proposer)
            .finish()
    }
}
