//! Canonical value decoder
//!
//! Dispatches on step: PROPOSE bytes are a canonical proposal, PREVOTE and
//! PRECOMMIT bytes are a canonical vote. Both strategies end in the same
//! place, the optional block reference whose hash is the value identifier.
//!
//! The wire `type` field is carried but not checked against the step; the
//! requested step alone selects the envelope. Malformed bytes are always an
//! error. They are never read as a nil vote.

use prost::Message;
use signguard_core::{Step, ValueId};

use super::types::{CanonicalBlockId, CanonicalProposal, CanonicalVote};
use crate::errors::DecodeError;

/// Decoded canonical sign bytes, tagged by envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalSignBytes {
    /// PROPOSE envelope
    Proposal(CanonicalProposal),
    /// PREVOTE / PRECOMMIT envelope
    Vote(CanonicalVote),
}

impl CanonicalSignBytes {
    /// Decode length-delimited sign bytes for `step`.
    pub fn decode(step: Step, sign_bytes: &[u8]) -> Result<Self, DecodeError> {
        if sign_bytes.is_empty() {
            return Err(DecodeError::Empty { step });
        }

        match step {
            Step::Propose => CanonicalProposal::decode_length_delimited(sign_bytes)
                .map(CanonicalSignBytes::Proposal),
            Step::Prevote | Step::Precommit => CanonicalVote::decode_length_delimited(sign_bytes)
                .map(CanonicalSignBytes::Vote),
        }
        .map_err(|source| DecodeError::Malformed { step, source })
    }

    /// Raw wire message type
    pub fn msg_type(&self) -> i32 {
        match self {
            CanonicalSignBytes::Proposal(p) => p.r#type,
            CanonicalSignBytes::Vote(v) => v.r#type,
        }
    }

    /// Height encoded in the message
    pub fn height(&self) -> i64 {
        match self {
            CanonicalSignBytes::Proposal(p) => p.height,
            CanonicalSignBytes::Vote(v) => v.height,
        }
    }

    /// Round encoded in the message
    pub fn round(&self) -> i64 {
        match self {
            CanonicalSignBytes::Proposal(p) => p.round,
            CanonicalSignBytes::Vote(v) => v.round,
        }
    }

    /// Block reference, if any
    pub fn block_id(&self) -> Option<&CanonicalBlockId> {
        match self {
            CanonicalSignBytes::Proposal(p) => p.block_id.as_ref(),
            CanonicalSignBytes::Vote(v) => v.block_id.as_ref(),
        }
    }

    /// Non-empty block hash, if any. An empty hash is a nil reference.
    pub fn block_hash(&self) -> Option<&[u8]> {
        self.block_id()
            .map(|block_id| block_id.hash.as_slice())
            .filter(|hash| !hash.is_empty())
    }
}

/// Extract the value identifier from raw sign bytes.
///
/// `None` when the message has no block reference or its hash is empty (nil).
pub fn decode_value_id(step: Step, sign_bytes: &[u8]) -> Result<Option<ValueId>, DecodeError> {
    let decoded = CanonicalSignBytes::decode(step, sign_bytes)?;
    let Some(hash) = decoded.block_hash() else {
        return Ok(None);
    };
    ValueId::try_from(hash)
        .map(Some)
        .map_err(|_| DecodeError::InvalidHashLength {
            step,
            len: hash.len(),
        })
}
