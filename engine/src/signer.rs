//! Signer facade: the header authentication contract used by the engine.

use hotstuff_crypto::BlsSignature;
use hotstuff_types::{Address, Header};
use hotstuff_validator::{ValidatorError, ValidatorSet};
use tracing::{debug, info};

use crate::leader::{self, LeaderSigner};
use crate::seal::BlsSigner;
use crate::EngineError;

/// Combines the leader signer and the BLS signer of the local validator.
pub struct Signer {
    pub leader: LeaderSigner,
    pub bls: BlsSigner,
}

impl Signer {
    pub fn new(leader: LeaderSigner, bls: BlsSigner) -> Self {
        Self { leader, bls }
    }

    pub fn address(&self) -> Address {
        self.leader.address()
    }

    /// Verify the leader seal and, when `check_validator_seal` is set, the
    /// aggregate validator seal.
    pub fn verify_header(
        &self,
        header: &Header,
        validators: &ValidatorSet,
        check_validator_seal: bool,
    ) -> Result<(), EngineError> {
        leader::verify_leader_seal(header)?;
        if check_validator_seal {
            self.bls.verify_validator_seal(header, validators)?;
        }
        Ok(())
    }

    /// Addresses registered for validator indices `0..count`.
    pub fn get_validators(&self, count: u32) -> Result<Vec<Address>, EngineError> {
        (0..count).map(|i| self.leader.get_validator(i)).collect()
    }

    /// Aggregate the seals of `committers` into the header's extra-data.
    ///
    /// The committers must be distinct members numbering more than the
    /// quorum threshold. Participant indices are written in committer order.
    pub fn commit_seals(
        &self,
        header: &mut Header,
        validators: &ValidatorSet,
        seals: &[(Address, BlsSignature)],
    ) -> Result<(), EngineError> {
        let committers: Vec<Address> = seals.iter().map(|(address, _)| *address).collect();
        validators.check_quorum(&committers)?;

        let participants_index = committers
            .iter()
            .map(|address| {
                validators
                    .get_by_address(address)
                    .map(|(index, _)| index as u32)
                    .ok_or(ValidatorError::InvalidParticipant(*address))
            })
            .collect::<Result<Vec<u32>, _>>()?;

        let signatures: Vec<BlsSignature> = seals.iter().map(|(_, sig)| *sig).collect();
        let aggregated = self
            .bls
            .aggregate_signatures(&signatures)
            .ok_or(EngineError::EmptyCommittedSeals)?;

        let mut extra = header.extract_extra()?;
        extra.aggregated_validators_seal = aggregated.to_bytes().to_vec();
        extra.participants_index = participants_index;
        header.set_extra(&extra);

        info!(
            number = header.number,
            participants = committers.len(),
            "quorum certificate assembled"
        );
        debug!(hash = %header.hash(), "committed header");
        Ok(())
    }
}
