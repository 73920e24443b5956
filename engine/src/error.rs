use hotstuff_crypto::CryptoError;
use hotstuff_store::StoreError;
use hotstuff_types::{Address, TypesError};
use hotstuff_validator::ValidatorError;
use thiserror::Error;

/// Coarse classification of an [`EngineError`], used by the chain layer to
/// decide between dropping the peer, discarding the block, or waiting and
/// checking again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed header fields or encodings.
    Format,
    /// A seal does not authenticate the header.
    Authentication,
    /// Non-member or duplicate committer.
    Participation,
    KeyGeneration,
    UnsupportedPolicy,
    /// The parent is not known yet.
    UnknownAncestor,
    Storage,
    Configuration,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid extra-data format: {0}")]
    InvalidExtraDataFormat(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid signer: header declares {declared}, seal recovers {recovered}")]
    InvalidSigner { declared: Address, recovered: Address },

    #[error("empty committed seals")]
    EmptyCommittedSeals,

    #[error("invalid validator seals: {0}")]
    InvalidValidatorSeals(String),

    #[error("no public key registered for validator {0}")]
    ValidatorNotFound(u32),

    #[error("invalid mix digest")]
    InvalidMixDigest,

    #[error("non-empty uncle hash")]
    InvalidUncleHash,

    #[error("invalid difficulty {0}")]
    InvalidDifficulty(u64),

    #[error("invalid timestamp {time}: parent at {parent_time}")]
    InvalidTimestamp { time: u64, parent_time: u64 },

    #[error("unknown ancestor of block {0}")]
    UnknownAncestor(u64),

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error(transparent)]
    Validator(#[from] ValidatorError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("config error: {0}")]
    Config(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidExtraDataFormat(_)
            | Self::InvalidSignature(_)
            | Self::InvalidMixDigest
            | Self::InvalidUncleHash
            | Self::InvalidDifficulty(_)
            | Self::InvalidTimestamp { .. } => ErrorKind::Format,
            Self::InvalidSigner { .. }
            | Self::EmptyCommittedSeals
            | Self::InvalidValidatorSeals(_)
            | Self::ValidatorNotFound(_) => ErrorKind::Authentication,
            Self::Validator(e) => match e {
                ValidatorError::QuorumNotReached { .. } => ErrorKind::Authentication,
                ValidatorError::UnsupportedPolicy(_) => ErrorKind::UnsupportedPolicy,
                ValidatorError::InvalidParticipant(_)
                | ValidatorError::EmptySet => ErrorKind::Participation,
            },
            Self::UnknownAncestor(_) => ErrorKind::UnknownAncestor,
            Self::KeyGeneration(_) => ErrorKind::KeyGeneration,
            Self::Store(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Configuration,
        }
    }
}

impl From<TypesError> for EngineError {
    fn from(e: TypesError) -> Self {
        match e {
            TypesError::InvalidExtraDataFormat(msg) => EngineError::InvalidExtraDataFormat(msg),
            other => EngineError::InvalidExtraDataFormat(other.to_string()),
        }
    }
}

impl From<CryptoError> for EngineError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::KeyGen(msg) => EngineError::KeyGeneration(msg),
            other => EngineError::InvalidSignature(other.to_string()),
        }
    }
}
