//! Wire envelope for HotStuff protocol messages.
//!
//! Only the schema lives here; the phase state machine that produces and
//! consumes these messages sits outside the consensus core.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Address, TypesError, View};

/// Protocol message codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "u64")]
#[repr(u64)]
pub enum MsgType {
    NewView = 1,
    Prepare = 2,
    PrepareVote = 3,
    PreCommit = 4,
    PreCommitVote = 5,
    Commit = 6,
    CommitVote = 7,
    Decide = 8,
}

impl MsgType {
    pub fn value(self) -> u64 {
        self as u64
    }

    pub fn from_u64(code: u64) -> Option<Self> {
        Some(match code {
            1 => Self::NewView,
            2 => Self::Prepare,
            3 => Self::PrepareVote,
            4 => Self::PreCommit,
            5 => Self::PreCommitVote,
            6 => Self::Commit,
            7 => Self::CommitVote,
            8 => Self::Decide,
            _ => return None,
        })
    }

    /// Display name for a raw code, `"UNKNOWN"` for unassigned codes.
    pub fn name_of(code: u64) -> &'static str {
        Self::from_u64(code).map_or("UNKNOWN", Self::name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::NewView => "NEW_VIEW",
            Self::Prepare => "PREPARE",
            Self::PrepareVote => "PREPARE_VOTE",
            Self::PreCommit => "PRECOMMIT",
            Self::PreCommitVote => "PRECOMMIT_VOTE",
            Self::Commit => "COMMIT",
            Self::CommitVote => "COMMIT_VOTE",
            Self::Decide => "DECIDE",
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<MsgType> for u64 {
    fn from(code: MsgType) -> Self {
        code.value()
    }
}

impl TryFrom<u64> for MsgType {
    type Error = TypesError;

    fn try_from(code: u64) -> Result<Self, Self::Error> {
        Self::from_u64(code).ok_or(TypesError::UnknownMessageCode(code))
    }
}

/// A consensus protocol message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub code: MsgType,
    pub view: View,
    pub payload: Vec<u8>,
    /// Sender address.
    pub address: Address,
    /// Sender's signature over [`Message::signing_bytes`].
    pub signature: Vec<u8>,
    pub committed_seal: Vec<u8>,
}

impl Message {
    pub fn new(code: MsgType, view: View, payload: Vec<u8>, address: Address) -> Self {
        Self {
            code,
            view,
            payload,
            address,
            signature: Vec::new(),
            committed_seal: Vec::new(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        crate::codec::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TypesError> {
        crate::codec::decode(bytes).map_err(|e| TypesError::InvalidMessage(e.to_string()))
    }

    /// Encoding of the message with signature and committed seal stripped;
    /// the bytes a sender signs.
    pub fn signing_bytes(&self) -> Vec<u8> {
        let mut unsigned = self.clone();
        unsigned.signature.clear();
        unsigned.committed_seal.clear();
        unsigned.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_protocol_values() {
        assert_eq!(MsgType::NewView.value(), 1);
        assert_eq!(MsgType::Decide.value(), 8);
        for code in 1..=8 {
            assert_eq!(MsgType::from_u64(code).unwrap().value(), code);
        }
        assert!(MsgType::from_u64(0).is_none());
        assert!(MsgType::from_u64(9).is_none());
    }

    #[test]
    fn display_names() {
        assert_eq!(MsgType::PreCommitVote.to_string(), "PRECOMMIT_VOTE");
        assert_eq!(MsgType::name_of(2), "PREPARE");
        assert_eq!(MsgType::name_of(42), "UNKNOWN");
    }

    #[test]
    fn decode_rejects_unknown_code() {
        let msg = Message::new(MsgType::Prepare, View::new(1, 0), vec![1], Address::ZERO);
        let mut bytes = msg.encode();
        // The code is the leading little-endian u64.
        bytes[0] = 99;
        assert!(Message::decode(&bytes).is_err());
    }

    #[test]
    fn signing_bytes_ignore_signatures() {
        let mut msg = Message::new(MsgType::Commit, View::new(3, 1), vec![7; 4], Address::new([1; 20]));
        let unsigned = msg.signing_bytes();
        msg.signature = vec![1; 65];
        msg.committed_seal = vec![2; 96];
        assert_eq!(msg.signing_bytes(), unsigned);
        assert_eq!(Message::decode(&msg.encode()).unwrap(), msg);
    }
}
