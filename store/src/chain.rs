//! Read access to the chain layer's headers.

use hotstuff_types::{Hash, Header};

/// Header lookup used when checking a header's ancestor.
pub trait HeaderReader: Send + Sync {
    /// The header with `hash` at height `number`, if the chain has it.
    fn get_header(&self, hash: &Hash, number: u64) -> Option<Header>;
}
