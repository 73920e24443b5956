//! Error type for decoding the types in this crate.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// The extra-data region is shorter than the vanity prefix or its payload
    /// does not decode into a [`HeaderExtra`](crate::HeaderExtra).
    #[error("invalid extra-data format: {0}")]
    InvalidExtraDataFormat(String),

    #[error("invalid message encoding: {0}")]
    InvalidMessage(String),

    #[error("unknown message code {0}")]
    UnknownMessageCode(u64),

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}
