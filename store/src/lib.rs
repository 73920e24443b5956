//! Abstract storage traits for the HotStuff consensus core.
//!
//! The core reads two kinds of external state: validator key material
//! registered by index, and ancestor headers owned by the chain layer.
//! Backends (LMDB, in-memory for testing) implement these traits; the rest
//! of the workspace depends only on the traits.

pub mod chain;
pub mod error;
pub mod keys;

pub use chain::HeaderReader;
pub use error::StoreError;
pub use keys::{ConsensusKeyStore, BLS_PUBLIC_KEY_PREFIX, VALIDATOR_ADDRESS_PREFIX};
