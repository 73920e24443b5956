//! secp256k1 recoverable signatures for the leader seal.

use hotstuff_types::{Address, Hash};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::CryptoError;

/// `r (32) || s (32) || recovery id (1)`.
pub const LEADER_SIGNATURE_LEN: usize = 65;

/// The proposer's signing key.
pub struct LeaderKey {
    signing_key: SigningKey,
    address: Address,
}

impl LeaderKey {
    /// Generate a fresh key from 32 bytes of OS randomness.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut seed = Zeroizing::new([0u8; 32]);
        getrandom::getrandom(&mut seed[..]).map_err(|e| CryptoError::KeyGen(e.to_string()))?;
        Self::from_bytes(&seed[..]).map_err(|e| CryptoError::KeyGen(e.to_string()))
    }

    /// Load a key from its 32-byte scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|e| CryptoError::InvalidSecretKey(e.to_string()))?;
        let address = pubkey_to_address(signing_key.verifying_key());
        Ok(Self {
            signing_key,
            address,
        })
    }

    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        let mut out = Zeroizing::new([0u8; 32]);
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a 32-byte digest, producing a recoverable signature.
    pub fn sign_digest(&self, digest: &Hash) -> Result<[u8; LEADER_SIGNATURE_LEN], CryptoError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest.as_bytes())
            .map_err(|e| CryptoError::Signing(e.to_string()))?;
        let mut out = [0u8; LEADER_SIGNATURE_LEN];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte();
        Ok(out)
    }
}

/// Address of a secp256k1 public key: the trailing 20 bytes of Blake2b-256
/// over the uncompressed point without its `0x04` tag.
pub fn pubkey_to_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let digest = Hash::digest(&point.as_bytes()[1..]);
    Address::from_slice(&digest.as_bytes()[12..])
}

/// Recover the signer address from a digest and a 65-byte recoverable signature.
pub fn recover_address(digest: &Hash, signature: &[u8]) -> Result<Address, CryptoError> {
    if signature.len() != LEADER_SIGNATURE_LEN {
        return Err(CryptoError::InvalidSignature(format!(
            "leader signature is {} bytes, expected {}",
            signature.len(),
            LEADER_SIGNATURE_LEN
        )));
    }
    let sig = Signature::from_slice(&signature[..64])
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    let recovery_id = RecoveryId::from_byte(signature[64]).ok_or_else(|| {
        CryptoError::InvalidSignature(format!("bad recovery id {}", signature[64]))
    })?;
    let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    Ok(pubkey_to_address(&key))
}
