//! Consensus Lock State
//!
//! The persisted safety record: either unlocked, or locked at a height and
//! round on one value. A lock is scoped to exactly one height.

use serde::{Deserialize, Serialize};
use signguard_core::{HrsKey, LockValueType, ValueId};
use std::fmt;

/// Consensus lock.
///
/// The zero value (`value == None`) is the unlocked state. When `value` is
/// present, `height` and `round` name the PRECOMMIT that established it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ConsensusLock {
    /// Height the lock was established at
    pub height: i64,
    /// Round the lock was established at
    pub round: i64,
    /// Locked value, `None` when unlocked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueId>,
    /// Kind of value locked on
    #[serde(default)]
    pub value_type: LockValueType,
}

impl ConsensusLock {
    /// The unlocked state
    pub fn unlocked() -> Self {
        Self::default()
    }

    /// A lock on `value` established at `height`/`round`
    pub fn locked(height: i64, round: i64, value: ValueId) -> Self {
        Self {
            height,
            round,
            value: Some(value),
            value_type: LockValueType::Block,
        }
    }

    /// Whether a value is locked
    pub fn is_locked(&self) -> bool {
        self.value.is_some()
    }

    /// Whether a value is locked at `height`
    pub fn is_locked_at_height(&self, height: i64) -> bool {
        self.is_locked() && self.height == height
    }

    /// Whether this lock constrains a request at `hrs`.
    ///
    /// Only PROPOSE/PREVOTE at the locked height, in the locked round or a
    /// later one, are constrained. Earlier rounds are left alone.
    pub fn constrains(&self, hrs: &HrsKey) -> bool {
        self.is_locked_at_height(hrs.height)
            && hrs.step.is_lock_constrained()
            && hrs.round >= self.round
    }
}

impl fmt::Display for ConsensusLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            None => f.write_str("unlocked"),
            Some(value) => write!(
                f,
                "locked at {}/{} on {} {}",
                self.height, self.round, self.value_type, value
            ),
        }
    }
}
