//! Nullable key store: thread-safe in-memory validator registry for testing.

use hotstuff_store::keys::{bls_public_key_key, decode_address, validator_address_key};
use hotstuff_store::{ConsensusKeyStore, StoreError};
use hotstuff_types::Address;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory [`ConsensusKeyStore`] using the same key layout as the
/// LMDB backend.
pub struct NullKeyStore {
    entries: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl NullKeyStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored entries across both namespaces.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &[u8]) -> Result<Vec<u8>, StoreError> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(String::from_utf8_lossy(key).into_owned()))
    }
}

impl Default for NullKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsensusKeyStore for NullKeyStore {
    fn put_bls_public_key(&self, index: u32, key: &[u8]) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(bls_public_key_key(index), key.to_vec());
        Ok(())
    }

    fn get_bls_public_key(&self, index: u32) -> Result<Vec<u8>, StoreError> {
        self.get(&bls_public_key_key(index))
    }

    fn put_validator_address(&self, index: u32, address: &Address) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(validator_address_key(index), address.as_bytes().to_vec());
        Ok(())
    }

    fn get_validator_address(&self, index: u32) -> Result<Address, StoreError> {
        let bytes = self.get(&validator_address_key(index))?;
        decode_address(index, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_both_namespaces_separately() {
        let store = NullKeyStore::new();
        store.put_bls_public_key(0, &[1; 48]).unwrap();
        store.put_validator_address(0, &Address::new([2; 20])).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_bls_public_key(0).unwrap(), vec![1; 48]);
        assert_eq!(store.get_validator_address(0).unwrap(), Address::new([2; 20]));
    }

    #[test]
    fn missing_is_not_found() {
        let store = NullKeyStore::new();
        assert!(matches!(store.get_bls_public_key(3), Err(StoreError::NotFound(_))));
        assert!(store.validator_addresses(1).is_err());
        assert_eq!(store.validator_addresses(0).unwrap(), Vec::<Address>::new());
    }
}
