//! HotStuff header sealing and verification.
//!
//! [`HotStuffEngine`] is what the chain layer talks to: it prepares and seals
//! headers this node proposes, and checks every incoming header's fields,
//! ancestry, leader seal and (optionally) quorum seal.
//!
//! - [`leader`]: secp256k1 recoverable leader seal over the filtered header.
//! - [`seal`]: BLS validator seals and their aggregate.
//! - [`signer`]: the facade combining both.
//! - [`batch`]: parallel, cancellable verification of header runs.

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod leader;
pub mod logging;
pub mod metrics;
pub mod seal;
pub mod signer;

pub use batch::AbortHandle;
pub use config::Config;
pub use engine::HotStuffEngine;
pub use error::{EngineError, ErrorKind};
pub use leader::LeaderSigner;
pub use metrics::EngineMetrics;
pub use seal::BlsSigner;
pub use signer::Signer;
