//! Validator membership for the HotStuff consensus core.
//!
//! A [`ValidatorSet`] keeps its members sorted by address so every node
//! assigns the same index to the same validator. Indices are what the
//! proposer selectors rotate over and what a header's participant list
//! refers to, so the ordering is part of the protocol.

pub mod error;
pub mod policy;
pub mod set;
pub mod validator;

pub use error::ValidatorError;
pub use policy::ProposerPolicy;
pub use set::ValidatorSet;
pub use validator::Validator;
