//! LMDB implementation of ConsensusKeyStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};
use tracing::debug;

use hotstuff_store::keys::{bls_public_key_key, decode_address, validator_address_key};
use hotstuff_store::{ConsensusKeyStore, StoreError};
use hotstuff_types::Address;

use crate::LmdbError;

pub struct LmdbKeyStore {
    pub(crate) env: Arc<Env>,
    pub(crate) db: Database<Bytes, Bytes>,
}

impl LmdbKeyStore {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        self.db.put(&mut wtxn, key, value)?;
        wtxn.commit()?;
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Vec<u8>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let val = self
            .db
            .get(&rtxn, key)?
            .ok_or_else(|| LmdbError::NotFound(String::from_utf8_lossy(key).into_owned()))?;
        Ok(val.to_vec())
    }
}

impl ConsensusKeyStore for LmdbKeyStore {
    fn put_bls_public_key(&self, index: u32, key: &[u8]) -> Result<(), StoreError> {
        self.put(&bls_public_key_key(index), key)?;
        debug!(index, "stored BLS public key");
        Ok(())
    }

    fn get_bls_public_key(&self, index: u32) -> Result<Vec<u8>, StoreError> {
        Ok(self.get(&bls_public_key_key(index))?)
    }

    fn put_validator_address(&self, index: u32, address: &Address) -> Result<(), StoreError> {
        self.put(&validator_address_key(index), address.as_bytes())?;
        debug!(index, %address, "stored validator address");
        Ok(())
    }

    fn get_validator_address(&self, index: u32) -> Result<Address, StoreError> {
        let bytes = self.get(&validator_address_key(index))?;
        decode_address(index, &bytes)
    }
}
