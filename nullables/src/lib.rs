//! Nullable infrastructure for deterministic testing.
//!
//! The consensus core reaches the outside world through three traits: the
//! wall clock, the validator key registry, and the chain's header lookup.
//! This crate provides in-memory implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem
//!
//! Usage: swap real implementations for nullables in tests.

pub mod chain;
pub mod clock;
pub mod store;

pub use chain::NullChain;
pub use clock::NullClock;
pub use store::NullKeyStore;
