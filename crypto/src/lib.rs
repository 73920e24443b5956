//! Cryptographic primitives for the HotStuff consensus core.
//!
//! - **BLS12-381** (min-pk: public keys in G1, signatures in G2) for the
//!   validators' aggregate seal. Every validator signs the same header digest,
//!   so verification is a single `fast_aggregate_verify`.
//! - **secp256k1** recoverable ECDSA for the leader seal, so a verifier can
//!   recover the proposer address without the public key in the header.
//! - Address derivation: last 20 bytes of Blake2b-256 over the uncompressed
//!   secp256k1 public key.

pub mod bls;
pub mod ecdsa;
pub mod error;

pub use bls::{
    aggregate, fast_aggregate_verify, generate_key, BlsPublicKey, BlsSecretKey, BlsSignature,
    BLS_DST, BLS_PUBLIC_KEY_LEN, BLS_SIGNATURE_LEN,
};
pub use ecdsa::{pubkey_to_address, recover_address, LeaderKey, LEADER_SIGNATURE_LEN};
pub use error::CryptoError;
