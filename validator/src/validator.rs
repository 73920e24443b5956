use hotstuff_types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A consensus participant, identified by its address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Validator {
    address: Address,
}

impl Validator {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl From<Address> for Validator {
    fn from(address: Address) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.address, f)
    }
}
