//! BLS12-381 multi-signatures over a single message.
//!
//! Uses the proof-of-possession ciphersuite with signatures in G2. All
//! validators of a round sign the same header digest; the aggregate is
//! checked with `fast_aggregate_verify` against the participants' public keys.

use blst::min_pk::{AggregateSignature, PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;
use zeroize::Zeroizing;

use crate::CryptoError;

/// Domain separation tag for every validator seal. Never change it: seals
/// signed under a different tag do not verify.
pub const BLS_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Compressed G1 public key length.
pub const BLS_PUBLIC_KEY_LEN: usize = 48;

/// Compressed G2 signature length.
pub const BLS_SIGNATURE_LEN: usize = 96;

/// A validator's BLS secret key. Held only in process memory; zeroized on drop.
#[derive(Clone)]
pub struct BlsSecretKey(SecretKey);

/// A validator's BLS public key.
#[derive(Clone, Copy, Debug)]
pub struct BlsPublicKey(PublicKey);

/// A single or aggregated BLS signature.
#[derive(Clone, Copy, Debug)]
pub struct BlsSignature(Signature);

impl PartialEq for BlsPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for BlsPublicKey {}

impl PartialEq for BlsSignature {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for BlsSignature {}

/// Generate a fresh secret key from 32 bytes of OS randomness.
pub fn generate_key() -> Result<BlsSecretKey, CryptoError> {
    let mut ikm = Zeroizing::new([0u8; 32]);
    getrandom::getrandom(&mut ikm[..]).map_err(|e| CryptoError::KeyGen(e.to_string()))?;
    BlsSecretKey::from_ikm(&ikm[..])
}

impl BlsSecretKey {
    /// Derive a key from input keying material (at least 32 bytes).
    pub fn from_ikm(ikm: &[u8]) -> Result<Self, CryptoError> {
        SecretKey::key_gen(ikm, &[])
            .map(Self)
            .map_err(|e| CryptoError::KeyGen(format!("{e:?}")))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        SecretKey::from_bytes(bytes)
            .map(Self)
            .map_err(|e| CryptoError::InvalidSecretKey(format!("{e:?}")))
    }

    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.0.to_bytes())
    }

    pub fn public_key(&self) -> BlsPublicKey {
        BlsPublicKey(self.0.sk_to_pk())
    }

    /// Deterministic signature over `message` under [`BLS_DST`].
    pub fn sign(&self, message: &[u8]) -> BlsSignature {
        BlsSignature(self.0.sign(message, BLS_DST, &[]))
    }
}

impl BlsPublicKey {
    /// Parse and validate a public key (rejects the identity and points
    /// outside the prime-order subgroup).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        PublicKey::key_validate(bytes)
            .map(Self)
            .map_err(|e| CryptoError::InvalidPublicKey(format!("{e:?}")))
    }

    pub fn to_bytes(&self) -> [u8; BLS_PUBLIC_KEY_LEN] {
        self.0.to_bytes()
    }
}

impl BlsSignature {
    /// Parse and validate a signature (subgroup and identity checks).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Signature::sig_validate(bytes, true)
            .map(Self)
            .map_err(|e| CryptoError::InvalidSignature(format!("{e:?}")))
    }

    pub fn to_bytes(&self) -> [u8; BLS_SIGNATURE_LEN] {
        self.0.to_bytes()
    }

    /// Verify a single signature against one public key.
    pub fn verify(&self, public_key: &BlsPublicKey, message: &[u8]) -> bool {
        self.0.verify(true, message, BLS_DST, &[], &public_key.0, true) == BLST_ERROR::BLST_SUCCESS
    }
}

/// Combine signatures over the same message into one.
///
/// Returns `None` for an empty input: there is no signature to carry.
pub fn aggregate(signatures: &[BlsSignature]) -> Option<BlsSignature> {
    let refs: Vec<&Signature> = signatures.iter().map(|s| &s.0).collect();
    // Signatures are validated when parsed, so no group check here.
    AggregateSignature::aggregate(&refs, false)
        .ok()
        .map(|agg| BlsSignature(agg.to_signature()))
}

/// Check that `signature` aggregates one signature over `message` from each
/// of `public_keys`. Always `false` for an empty key list.
pub fn fast_aggregate_verify(
    signature: &BlsSignature,
    public_keys: &[BlsPublicKey],
    message: &[u8],
) -> bool {
    if public_keys.is_empty() {
        return false;
    }
    let refs: Vec<&PublicKey> = public_keys.iter().map(|pk| &pk.0).collect();
    signature.0.fast_aggregate_verify(true, message, BLS_DST, &refs) == BLST_ERROR::BLST_SUCCESS
}
