//! LMDB storage backend for the HotStuff consensus core.
//!
//! Implements [`ConsensusKeyStore`](hotstuff_store::ConsensusKeyStore) with
//! the `heed` LMDB bindings. All registry entries share one named database
//! inside a single environment; the key prefixes keep them apart.

pub mod environment;
pub mod error;
pub mod keys;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use keys::LmdbKeyStore;
