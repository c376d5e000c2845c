//! Canonical sign-byte decoding
//!
//! Maps `(step, sign_bytes)` to the value identifier the message commits to.

pub mod decode;
pub mod types;

pub use decode::{decode_value_id, CanonicalSignBytes};
pub use types::{
    CanonicalBlockId, CanonicalPartSetHeader, CanonicalProposal, CanonicalTimestamp,
    CanonicalVote, SignedMsgType,
};
