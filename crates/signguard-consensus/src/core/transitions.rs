//! Pure Consensus Lock Transitions
//!
//! Effect-free functions computing the next lock. The signer-state layer
//! owns the lock and writes the result back under its own critical section.
//!
//! ## Design Principles
//! 1. Pure functions: `fn(lock, hrs, ...) -> ConsensusLock`
//! 2. No side effects: no I/O, no logging, no shared state
//! 3. Deterministic: same inputs always produce same outputs

use signguard_core::{HrsKey, Step, ValueId};

use super::state::ConsensusLock;

/// Next lock after a PRECOMMIT at `signed` has actually been signed.
///
/// Preconditions:
/// - `signed.step == Precommit`. Any other step is a caller bug and leaves
///   the lock unchanged.
///
/// Effects:
/// - Replaces any prior lock, including one on a different value or in a
///   later round. Releasing the old lock and establishing the new one happen
///   in the same step.
/// - A nil PRECOMMIT (`signed_value == None`) yields the unlocked state.
pub fn advance(
    lock: &ConsensusLock,
    signed: HrsKey,
    signed_value: Option<ValueId>,
) -> ConsensusLock {
    if signed.step != Step::Precommit {
        return *lock;
    }

    match signed_value {
        Some(value) => ConsensusLock {
            height: signed.height,
            round: signed.round,
            value: Some(value),
            value_type: lock.value_type,
        },
        None => ConsensusLock {
            value_type: lock.value_type,
            ..ConsensusLock::unlocked()
        },
    }
}

/// Drop the lock once the observed height differs from the locked height.
///
/// Round changes within the locked height never clear the lock. Idempotent,
/// so it is safe to call on every HRS observation, not only on sign requests.
pub fn clear_on_height_advance(lock: &ConsensusLock, observed: HrsKey) -> ConsensusLock {
    if observed.height != lock.height {
        return ConsensusLock {
            value_type: lock.value_type,
            ..ConsensusLock::unlocked()
        };
    }
    *lock
}
