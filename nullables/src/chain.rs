//! Nullable chain: an in-memory header index for ancestor lookups.

use hotstuff_store::HeaderReader;
use hotstuff_types::{Hash, Header};
use std::collections::HashMap;
use std::sync::Mutex;

/// Headers keyed by `(hash, number)`, as the chain layer would serve them.
pub struct NullChain {
    headers: Mutex<HashMap<(Hash, u64), Header>>,
}

impl NullChain {
    pub fn new() -> Self {
        Self {
            headers: Mutex::new(HashMap::new()),
        }
    }

    /// Make `header` available to [`HeaderReader::get_header`].
    pub fn insert(&self, header: Header) {
        let key = (header.hash(), header.number);
        self.headers.lock().unwrap().insert(key, header);
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderReader for NullChain {
    fn get_header(&self, hash: &Hash, number: u64) -> Option<Header> {
        self.headers.lock().unwrap().get(&(*hash, number)).cloned()
    }
}
