//! Block header as seen by the consensus core.

use serde::{Deserialize, Serialize};

use crate::{Address, Hash};

/// Mix-digest marker identifying blocks produced by the HotStuff engine.
///
/// The bytes spell `"ctical byzantine fault tolerance"`.
pub const HOTSTUFF_DIGEST: Hash = Hash::new(*b"ctical byzantine fault tolerance");

/// Every HotStuff block carries the same difficulty.
pub const DEFAULT_DIFFICULTY: u64 = 1;

/// An 8-byte proof-of-work nonce. Always empty for HotStuff blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockNonce(pub [u8; 8]);

impl BlockNonce {
    pub const EMPTY: Self = Self([0u8; 8]);
}

/// A block header.
///
/// Only `number`, `coinbase`, `time`, `parent_hash` and `extra` carry meaning
/// for the consensus core; the other fields are hashed but owned by the chain
/// layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub parent_hash: Hash,
    pub uncle_hash: Hash,
    /// Declared proposer of this block.
    pub coinbase: Address,
    pub root: Hash,
    pub tx_hash: Hash,
    pub receipt_hash: Hash,
    pub difficulty: u64,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    /// Unix timestamp in seconds.
    pub time: u64,
    /// Vanity prefix followed by the encoded [`HeaderExtra`](crate::HeaderExtra).
    pub extra: Vec<u8>,
    pub mix_digest: Hash,
    pub nonce: BlockNonce,
}

impl Header {
    /// Canonical byte encoding of the header.
    pub fn encode(&self) -> Vec<u8> {
        crate::codec::encode(self)
    }

    /// Blake2b-256 over the canonical encoding, seals included.
    pub fn hash(&self) -> Hash {
        Hash::digest(&self.encode())
    }
}

/// Uncle hash of a block without uncles: the hash of an encoded empty header list.
pub fn empty_uncle_hash() -> Hash {
    let empty: Vec<Header> = Vec::new();
    Hash::digest(&crate::codec::encode(&empty))
}
