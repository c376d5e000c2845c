//! Pure Consensus Lock Validation
//!
//! Decides whether a request at a given HRS and value is consistent with the
//! current lock. Read-only: validation never mutates the lock.

use signguard_core::{HrsKey, SignGuardError, ValueId};

use super::state::ConsensusLock;
use crate::errors::ConsensusLockViolation;

/// Check a request against the current lock.
///
/// Allowed without comparing values:
/// - the lock is unlocked
/// - the request is at another height
/// - the request is a PRECOMMIT (it sets or replaces the lock, regardless of
///   round or value)
/// - the request is in a round earlier than the lock's round
/// - the request carries no value (nil)
///
/// Otherwise the requested value must equal the locked value.
pub fn validate(
    lock: &ConsensusLock,
    requested: HrsKey,
    requested_value: Option<ValueId>,
) -> Result<(), ConsensusLockViolation> {
    if !lock.constrains(&requested) {
        return Ok(());
    }

    let (Some(locked_value), Some(requested_value)) = (lock.value, requested_value) else {
        return Ok(());
    };

    if locked_value == requested_value {
        return Ok(());
    }

    Err(ConsensusLockViolation {
        locked_height: lock.height,
        locked_round: lock.round,
        locked_value,
        requested_value,
        requested,
    })
}

/// Structural invariants of a lock restored from storage.
///
/// A locked lock must name a non-negative height and round.
pub fn check_invariants(lock: &ConsensusLock) -> Result<(), SignGuardError> {
    if !lock.is_locked() {
        return Ok(());
    }
    if lock.height < 0 {
        return Err(SignGuardError::invalid(format!(
            "consensus lock height must be >= 0, got {}",
            lock.height
        )));
    }
    if lock.round < 0 {
        return Err(SignGuardError::invalid(format!(
            "consensus lock round must be >= 0, got {}",
            lock.round
        )));
    }
    Ok(())
}
