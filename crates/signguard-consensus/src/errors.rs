//! Error taxonomy for the consensus lock path
//!
//! Two kinds leave the validation path:
//!
//! - [`ConsensusLockViolation`]: an expected safety rejection. Refuse, log,
//!   carry on.
//! - [`DecodeError`]: the sign bytes could not be read. Refuse and escalate;
//!   the request may be corrupt or hostile.
//!
//! Callers that wrap these in their own error types can still classify them
//! with [`is_consensus_lock_violation`], which walks the source chain.

use signguard_core::{HrsKey, Step, ValueId};
use std::error::Error;

/// A PROPOSE/PREVOTE request that conflicts with the value locked at its height.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "consensus lock violation: locked on value {locked_value} at height {locked_height} \
     round {locked_round}, refusing {requested} for value {requested_value}"
)]
pub struct ConsensusLockViolation {
    /// Height the lock was established at
    pub locked_height: i64,
    /// Round the lock was established at
    pub locked_round: i64,
    /// Value the lock commits to
    pub locked_value: ValueId,
    /// Conflicting value in the refused request
    pub requested_value: ValueId,
    /// HRS of the refused request
    pub requested: HrsKey,
}

/// Canonical sign bytes could not be decoded into a value identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// No bytes at all
    #[error("canonical decode failure: empty sign bytes for {step}")]
    Empty {
        /// Step the bytes were decoded for
        step: Step,
    },

    /// Protobuf framing or field decoding failed
    #[error("canonical decode failure: malformed {step} sign bytes: {source}")]
    Malformed {
        /// Step the bytes were decoded for
        step: Step,
        /// Underlying protobuf error
        #[source]
        source: prost::DecodeError,
    },

    /// The block hash is present but is not a 32-byte identifier
    #[error("canonical decode failure: block hash for {step} is {len} bytes, expected 32")]
    InvalidHashLength {
        /// Step the bytes were decoded for
        step: Step,
        /// Length found on the wire
        len: usize,
    },
}

/// Any failure the consensus lock validation path can return.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsensusLockError {
    /// Expected safety rejection
    #[error(transparent)]
    Violation(#[from] ConsensusLockViolation),

    /// Unexpected fault in the request payload
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ConsensusLockError {
    /// Whether this is a lock violation (log-and-refuse)
    pub fn is_violation(&self) -> bool {
        matches!(self, ConsensusLockError::Violation(_))
    }

    /// Whether this is a decode failure (log-and-escalate)
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, ConsensusLockError::Decode(_))
    }

    /// The violation, if this is one
    pub fn as_violation(&self) -> Option<&ConsensusLockViolation> {
        match self {
            ConsensusLockError::Violation(v) => Some(v),
            ConsensusLockError::Decode(_) => None,
        }
    }

    /// Stable code for alerting pipelines
    pub fn code(&self) -> &'static str {
        match self {
            ConsensusLockError::Violation(_) => "consensus_lock_violation",
            ConsensusLockError::Decode(_) => "canonical_decode_failure",
        }
    }
}

/// Classify an error as a consensus lock violation.
///
/// Walks the source chain, so a violation wrapped by a caller's own error
/// type is still recognised.
pub fn is_consensus_lock_violation(err: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<ConsensusLockViolation>() {
            return true;
        }
        if let Some(lock_err) = e.downcast_ref::<ConsensusLockError>() {
            return lock_err.is_violation();
        }
        current = e.source();
    }
    false
}
