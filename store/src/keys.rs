//! Validator key registry.
//!
//! Entries are keyed by the validator's index in the sorted validator set,
//! not by its address. BLS public keys and validator addresses live under
//! separate prefixes; the key is the prefix followed by the decimal index.

use hotstuff_types::Address;

use crate::StoreError;

pub const BLS_PUBLIC_KEY_PREFIX: &str = "bls-public-key";
pub const VALIDATOR_ADDRESS_PREFIX: &str = "validator-address";

/// Database key of the BLS public key registered for `index`.
pub fn bls_public_key_key(index: u32) -> Vec<u8> {
    format!("{BLS_PUBLIC_KEY_PREFIX}{index}").into_bytes()
}

/// Database key of the validator address registered for `index`.
pub fn validator_address_key(index: u32) -> Vec<u8> {
    format!("{VALIDATOR_ADDRESS_PREFIX}{index}").into_bytes()
}

/// Decode a stored address, rejecting anything that is not exactly 20 bytes.
pub fn decode_address(index: u32, bytes: &[u8]) -> Result<Address, StoreError> {
    if bytes.len() != Address::LEN {
        return Err(StoreError::Corruption(format!(
            "validator address {index} is {} bytes",
            bytes.len()
        )));
    }
    Ok(Address::from_slice(bytes))
}

/// Index-keyed storage for validator addresses and BLS public keys.
///
/// Lookups are synchronous and cheap; they may be called while the
/// validator set's read lock is held.
pub trait ConsensusKeyStore: Send + Sync {
    /// Store a compressed BLS public key for validator `index`.
    fn put_bls_public_key(&self, index: u32, key: &[u8]) -> Result<(), StoreError>;

    /// Compressed BLS public key of validator `index`, or `NotFound`.
    fn get_bls_public_key(&self, index: u32) -> Result<Vec<u8>, StoreError>;

    fn put_validator_address(&self, index: u32, address: &Address) -> Result<(), StoreError>;

    /// Address of validator `index`, or `NotFound`.
    fn get_validator_address(&self, index: u32) -> Result<Address, StoreError>;

    /// Addresses registered for indices `0..n`, failing on the first gap.
    fn validator_addresses(&self, n: u32) -> Result<Vec<Address>, StoreError> {
        (0..n).map(|i| self.get_validator_address(i)).collect()
    }
}
