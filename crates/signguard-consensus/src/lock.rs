//! Consensus lock call surface for the signing service
//!
//! Combines the canonical decoder with the pure lock core. All functions are
//! pure and take the current lock by reference; persisting the returned lock
//! is the caller's job.

use signguard_core::{HrsKey, Step};

use crate::canonical::decode_value_id;
use crate::core::{self, ConsensusLock};
use crate::errors::ConsensusLockError;

pub use crate::errors::is_consensus_lock_violation;

/// Check a sign request against the lock before signing.
///
/// Sign bytes are only decoded when the lock can actually constrain the
/// request. Requests the lock cannot affect (unlocked, another height, a
/// PRECOMMIT, an earlier round) are allowed without parsing.
pub fn validate_consensus_lock(
    lock: &ConsensusLock,
    requested: HrsKey,
    sign_bytes: &[u8],
) -> Result<(), ConsensusLockError> {
    if !lock.constrains(&requested) {
        return Ok(());
    }
    let value = decode_value_id(requested.step, sign_bytes)?;
    core::validate(lock, requested, value)?;
    Ok(())
}

/// Lock to persist after a PRECOMMIT at `signed` was signed.
///
/// Decode failures surface; a PRECOMMIT whose value cannot be read must never
/// silently leave the old lock in place. Non-PRECOMMIT keys return the lock
/// unchanged without decoding.
pub fn advance_consensus_lock(
    lock: &ConsensusLock,
    signed: HrsKey,
    sign_bytes: &[u8],
) -> Result<ConsensusLock, ConsensusLockError> {
    if signed.step != Step::Precommit {
        return Ok(*lock);
    }
    let value = decode_value_id(signed.step, sign_bytes)?;
    Ok(core::advance(lock, signed, value))
}

/// Lock after observing `observed`; cleared when the height moved.
pub fn clear_consensus_lock(lock: &ConsensusLock, observed: HrsKey) -> ConsensusLock {
    core::clear_on_height_advance(lock, observed)
}
