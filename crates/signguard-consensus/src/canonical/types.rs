//! Canonical sign-byte message types
//!
//! Hand-declared `prost` messages matching the Tendermint canonical
//! encodings (`tendermint.types.CanonicalProposal` / `CanonicalVote`).
//! Field tags and scalar kinds must stay byte-compatible with the node,
//! since the signature covers exactly these bytes.

#![allow(missing_docs)]

use prost::Message;

/// Wire message type carried in the first field of every canonical message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SignedMsgType {
    /// Unset
    Unknown = 0,
    /// Prevote
    Prevote = 1,
    /// Precommit
    Precommit = 2,
    /// Proposal
    Proposal = 32,
}

#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CanonicalPartSetHeader {
    #[prost(uint32, tag = "1")]
    pub total: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub hash: Vec<u8>,
}

/// Block reference; `hash` is the value identifier.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CanonicalBlockId {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub part_set_header: Option<CanonicalPartSetHeader>,
}

/// `google.protobuf.Timestamp` layout.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CanonicalTimestamp {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CanonicalProposal {
    #[prost(enumeration = "SignedMsgType", tag = "1")]
    pub r#type: i32,
    #[prost(sfixed64, tag = "2")]
    pub height: i64,
    #[prost(sfixed64, tag = "3")]
    pub round: i64,
    #[prost(int64, tag = "4")]
    pub pol_round: i64,
    #[prost(message, optional, tag = "5")]
    pub block_id: Option<CanonicalBlockId>,
    #[prost(message, optional, tag = "6")]
    pub timestamp: Option<CanonicalTimestamp>,
    #[prost(string, tag = "7")]
    pub chain_id: String,
}

#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CanonicalVote {
    #[prost(enumeration = "SignedMsgType", tag = "1")]
    pub r#type: i32,
    #[prost(sfixed64, tag = "2")]
    pub height: i64,
    #[prost(sfixed64, tag = "3")]
    pub round: i64,
    #[prost(message, optional, tag = "4")]
    pub block_id: Option<CanonicalBlockId>,
    #[prost(message, optional, tag = "5")]
    pub timestamp: Option<CanonicalTimestamp>,
    #[prost(string, tag = "6")]
    pub chain_id: String,
}

impl CanonicalProposal {
    /// Length-delimited encoding, as the node hands it to the signer.
    pub fn to_sign_bytes(&self) -> Vec<u8> {
        self.encode_length_delimited_to_vec()
    }
}

impl CanonicalVote {
    /// Length-delimited encoding, as the node hands it to the signer.
    pub fn to_sign_bytes(&self) -> Vec<u8> {
        self.encode_length_delimited_to_vec()
    }
}
