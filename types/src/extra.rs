//! HotStuff section of a header's extra-data.
//!
//! Layout: `[vanity: 32 bytes][bincode(HeaderExtra)]`.
//!
//! The encoded payload carries, in order: `validators`, `leader_seal`,
//! `aggregated_validators_seal`, `salt`, `participants_index`. The participant
//! list is written together with the aggregate seal once a quorum has signed,
//! so [`Header::filtered`] clears both of them: the bytes validators sign
//! must not depend on who ends up in the certificate.

use serde::{Deserialize, Serialize};

use crate::{Address, Header, TypesError};

/// Fixed number of extra-data bytes reserved for proposer vanity.
pub const EXTRA_VANITY: usize = 32;

/// Length of one recoverable leader signature (`r || s || v`).
pub const EXTRA_SEAL: usize = 65;

/// Consensus data persisted in a header's extra-data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderExtra {
    /// Validator addresses of the set that certifies this block, canonically sorted.
    pub validators: Vec<Address>,
    /// Proposer's recoverable signature over the seal hash.
    pub leader_seal: Vec<u8>,
    /// Aggregated BLS signature of the participating validators.
    pub aggregated_validators_seal: Vec<u8>,
    pub salt: Vec<u8>,
    /// Indices (into `validators`) of the validators folded into the aggregate seal.
    pub participants_index: Vec<u32>,
}

impl HeaderExtra {
    /// A fresh extra with the given validators and every seal empty.
    pub fn with_validators(validators: Vec<Address>) -> Self {
        Self {
            validators,
            ..Default::default()
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        crate::codec::encode(self)
    }

    pub fn decode(payload: &[u8]) -> Result<Self, TypesError> {
        crate::codec::decode(payload).map_err(|e| TypesError::InvalidExtraDataFormat(e.to_string()))
    }

    /// Decode the extra from a raw extra-data region (vanity included).
    pub fn from_extra_data(extra: &[u8]) -> Result<Self, TypesError> {
        if extra.len() < EXTRA_VANITY {
            return Err(TypesError::InvalidExtraDataFormat(format!(
                "extra-data is {} bytes, vanity alone needs {}",
                extra.len(),
                EXTRA_VANITY
            )));
        }
        Self::decode(&extra[EXTRA_VANITY..])
    }
}

impl Header {
    /// Decode the [`HeaderExtra`] carried by this header.
    pub fn extract_extra(&self) -> Result<HeaderExtra, TypesError> {
        HeaderExtra::from_extra_data(&self.extra)
    }

    /// Replace the payload after the vanity prefix, zero-padding the vanity if needed.
    pub fn set_extra(&mut self, extra: &HeaderExtra) {
        self.extra.resize(EXTRA_VANITY, 0);
        self.extra.extend_from_slice(&extra.encode());
    }

    /// Copy of this header with the aggregate seal (and its participant list)
    /// cleared, and the leader seal cleared unless `keep_leader_seal` is set.
    ///
    /// `filtered(false)` is what the proposer signs; `filtered(true)` is what
    /// validators sign and what their aggregate seal is verified against.
    pub fn filtered(&self, keep_leader_seal: bool) -> Result<Header, TypesError> {
        let mut extra = self.extract_extra()?;
        if !keep_leader_seal {
            extra.leader_seal.clear();
        }
        extra.aggregated_validators_seal.clear();
        extra.participants_index.clear();

        let mut header = self.clone();
        header.set_extra(&extra);
        Ok(header)
    }

    /// Initialise the extra-data of a header under construction: keep (or
    /// zero-pad) the vanity prefix and append an empty-seal extra carrying
    /// `validators`.
    pub fn fill_with_validators(&mut self, validators: Vec<Address>) {
        self.set_extra(&HeaderExtra::with_validators(validators));
    }
}
