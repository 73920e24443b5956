//! Validator quorum seals.
//!
//! Each validator signs the hash of `filtered(header, true)`, i.e. the
//! header with its leader seal in place and the aggregate seal cleared. The
//! finalizer aggregates a quorum of those signatures into one BLS signature
//! and records which validator indices took part.

use std::sync::Arc;

use hotstuff_crypto::{aggregate, fast_aggregate_verify, BlsPublicKey, BlsSecretKey, BlsSignature};
use hotstuff_store::{ConsensusKeyStore, StoreError};
use hotstuff_types::{Address, Hash, Header};
use hotstuff_validator::ValidatorSet;
use tracing::debug;

use crate::EngineError;

/// Digest validators sign: the header hash with the aggregate seal and
/// participant list cleared.
pub fn validator_seal_hash(header: &Header) -> Result<Hash, EngineError> {
    Ok(header.filtered(true)?.hash())
}

/// Holds the local BLS consensus key and the public key registry.
pub struct BlsSigner {
    key: BlsSecretKey,
    public_key: BlsPublicKey,
    store: Arc<dyn ConsensusKeyStore>,
}

impl BlsSigner {
    pub fn new(key: BlsSecretKey, store: Arc<dyn ConsensusKeyStore>) -> Self {
        let public_key = key.public_key();
        Self {
            key,
            public_key,
            store,
        }
    }

    pub fn public_key(&self) -> BlsPublicKey {
        self.public_key
    }

    pub fn sign(&self, message: &[u8]) -> BlsSignature {
        self.key.sign(message)
    }

    /// This validator's seal over `header`.
    pub fn sign_header(&self, header: &Header) -> Result<BlsSignature, EngineError> {
        let digest = validator_seal_hash(header)?;
        Ok(self.sign(digest.as_bytes()))
    }

    pub fn aggregate_signatures(&self, signatures: &[BlsSignature]) -> Option<BlsSignature> {
        aggregate(signatures)
    }

    pub fn store_public_key(&self, index: u32, key: &BlsPublicKey) -> Result<(), EngineError> {
        Ok(self.store.put_bls_public_key(index, &key.to_bytes())?)
    }

    /// Register `keys` under indices `0..keys.len()`.
    pub fn store_public_key_list(&self, keys: &[BlsPublicKey]) -> Result<(), EngineError> {
        for (index, key) in keys.iter().enumerate() {
            self.store_public_key(index as u32, key)?;
        }
        Ok(())
    }

    pub fn get_public_key(&self, index: u32) -> Result<BlsPublicKey, EngineError> {
        let bytes = self.store.get_bls_public_key(index).map_err(|e| match e {
            StoreError::NotFound(_) => EngineError::ValidatorNotFound(index),
            other => EngineError::Store(other),
        })?;
        Ok(BlsPublicKey::from_bytes(&bytes)?)
    }

    /// Verify the aggregate validator seal carried by `header` against
    /// `validators`.
    pub fn verify_validator_seal(
        &self,
        header: &Header,
        validators: &ValidatorSet,
    ) -> Result<(), EngineError> {
        let extra = header.extract_extra()?;
        if extra.aggregated_validators_seal.is_empty() {
            return Err(EngineError::EmptyCommittedSeals);
        }

        let threshold = validators.q();
        if extra.participants_index.len() < threshold {
            return Err(EngineError::InvalidValidatorSeals(format!(
                "{} participants, quorum threshold is {threshold}",
                extra.participants_index.len()
            )));
        }

        let committers = extra
            .participants_index
            .iter()
            .map(|&index| {
                validators
                    .get_by_index(index as usize)
                    .map(|v| v.address())
                    .ok_or(EngineError::ValidatorNotFound(index))
            })
            .collect::<Result<Vec<Address>, _>>()?;
        validators.check_quorum(&committers)?;

        let public_keys = extra
            .participants_index
            .iter()
            .map(|&index| self.get_public_key(index))
            .collect::<Result<Vec<_>, _>>()?;

        let signature = BlsSignature::from_bytes(&extra.aggregated_validators_seal)?;
        let digest = validator_seal_hash(header)?;
        if !fast_aggregate_verify(&signature, &public_keys, digest.as_bytes()) {
            debug!(number = header.number, %digest, "aggregate seal does not verify");
            return Err(EngineError::InvalidValidatorSeals(
                "aggregate signature does not match participants".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotstuff_nullables::NullKeyStore;

    fn signer(seed: u8, store: &Arc<NullKeyStore>) -> BlsSigner {
        BlsSigner::new(
            BlsSecretKey::from_ikm(&[seed; 32]).unwrap(),
            Arc::clone(store) as Arc<dyn ConsensusKeyStore>,
        )
    }

    #[test]
    fn public_key_registry_roundtrip() {
        let store = Arc::new(NullKeyStore::new());
        let s = signer(1, &store);
        s.store_public_key_list(&[s.public_key(), signer(2, &store).public_key()])
            .unwrap();
        assert_eq!(s.get_public_key(0).unwrap(), s.public_key());
        assert!(matches!(s.get_public_key(2), Err(EngineError::ValidatorNotFound(2))));
    }

    #[test]
    fn corrupt_public_key_is_rejected() {
        let store = Arc::new(NullKeyStore::new());
        store.put_bls_public_key(0, &[0u8; 10]).unwrap();
        let s = signer(1, &store);
        assert!(matches!(s.get_public_key(0), Err(EngineError::InvalidSignature(_))));
    }

    #[test]
    fn header_seal_ignores_aggregate_slot() {
        let store = Arc::new(NullKeyStore::new());
        let s = signer(1, &store);
        let mut header = Header {
            number: 2,
            ..Default::default()
        };
        header.fill_with_validators(Vec::new());
        let before = s.sign_header(&header).unwrap();

        let mut extra = header.extract_extra().unwrap();
        extra.aggregated_validators_seal = vec![1, 2, 3];
        extra.participants_index = vec![0];
        header.set_extra(&extra);
        assert_eq!(s.sign_header(&header).unwrap(), before);
    }

    #[test]
    fn empty_aggregate_is_empty_committed_seals() {
        let store = Arc::new(NullKeyStore::new());
        let s = signer(1, &store);
        let mut header = Header::default();
        header.fill_with_validators(Vec::new());
        let set = ValidatorSet::new(Vec::new(), Default::default());
        assert!(matches!(
            s.verify_validator_seal(&header, &set),
            Err(EngineError::EmptyCommittedSeals)
        ));
    }
}
