//! The proposer's leader seal.
//!
//! The leader signs `sig_hash(header)`: the hash of the header with both
//! seals cleared. Verifiers recompute the same digest and recover the signer
//! address from the 65-byte recoverable signature, so the header never has
//! to carry the proposer's public key.

use std::sync::Arc;

use hotstuff_crypto::{recover_address, LeaderKey, LEADER_SIGNATURE_LEN};
use hotstuff_store::ConsensusKeyStore;
use hotstuff_types::{Address, Hash, Header, EXTRA_SEAL};
use tracing::{debug, trace};

use crate::EngineError;

/// Digest the leader signs: the header hash with every seal cleared.
pub fn sig_hash(header: &Header) -> Result<Hash, EngineError> {
    Ok(header.filtered(false)?.hash())
}

/// Recover the address that produced the header's leader seal.
pub fn recover(header: &Header) -> Result<Address, EngineError> {
    let extra = header.extract_extra()?;
    let digest = sig_hash(header)?;
    Ok(recover_address(&digest, &extra.leader_seal)?)
}

/// Check that the leader seal was produced by the header's declared
/// proposer (`coinbase`). Genesis carries no seal and always passes.
pub fn verify_leader_seal(header: &Header) -> Result<(), EngineError> {
    if header.number == 0 {
        return Ok(());
    }
    let recovered = recover(header)?;
    if recovered != header.coinbase {
        debug!(
            number = header.number,
            declared = %header.coinbase,
            %recovered,
            "leader seal signer mismatch"
        );
        return Err(EngineError::InvalidSigner {
            declared: header.coinbase,
            recovered,
        });
    }
    Ok(())
}

/// Holds the local proposer key and the validator address registry.
pub struct LeaderSigner {
    key: LeaderKey,
    store: Arc<dyn ConsensusKeyStore>,
}

impl LeaderSigner {
    pub fn new(key: LeaderKey, store: Arc<dyn ConsensusKeyStore>) -> Self {
        Self { key, store }
    }

    pub fn address(&self) -> Address {
        self.key.address()
    }

    /// Recoverable signature over a 32-byte digest.
    pub fn sign(&self, digest: &Hash) -> Result<[u8; LEADER_SIGNATURE_LEN], EngineError> {
        Ok(self.key.sign_digest(digest)?)
    }

    /// Sign the header's `sig_hash` and write the result into its leader
    /// seal slot.
    pub fn seal_before_commit(&self, header: &mut Header) -> Result<(), EngineError> {
        let digest = sig_hash(header)?;
        let seal = self.sign(&digest)?;
        if seal.is_empty() || seal.len() % EXTRA_SEAL != 0 {
            return Err(EngineError::InvalidSignature(format!(
                "leader seal is {} bytes, not a multiple of {EXTRA_SEAL}",
                seal.len()
            )));
        }

        let mut extra = header.extract_extra()?;
        extra.leader_seal = seal.to_vec();
        header.set_extra(&extra);
        trace!(number = header.number, %digest, "leader seal written");
        Ok(())
    }

    /// Register `address` as the validator at `index`.
    pub fn store_validator(&self, address: &Address, index: u32) -> Result<(), EngineError> {
        Ok(self.store.put_validator_address(index, address)?)
    }

    pub fn get_validator(&self, index: u32) -> Result<Address, EngineError> {
        Ok(self.store.get_validator_address(index)?)
    }
}
