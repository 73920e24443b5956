//! Fundamental types for the HotStuff consensus core.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! validator addresses, hashes, block headers, consensus views, the protocol
//! message envelope, a wall-clock abstraction, and the codec for the HotStuff
//! section of a header's extra-data.

pub mod address;
mod codec;
pub mod error;
pub mod extra;
pub mod hash;
pub mod header;
pub mod message;
pub mod time;
pub mod view;

pub use address::Address;
pub use codec::MAX_DECODE_LEN;
pub use error::TypesError;
pub use extra::{HeaderExtra, EXTRA_SEAL, EXTRA_VANITY};
pub use hash::Hash;
pub use header::{empty_uncle_hash, BlockNonce, Header, DEFAULT_DIFFICULTY, HOTSTUFF_DIGEST};
pub use message::{Message, MsgType};
pub use time::{Clock, SystemClock};
pub use view::View;
