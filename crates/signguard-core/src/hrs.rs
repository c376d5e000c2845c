//! Height/round/step keys
//!
//! An [`HrsKey`] names a point in the consensus protocol. Ordering between
//! keys is defined on `(height, round)` only; the step is carried along for
//! dispatch but never participates in comparisons.

use crate::{Result, SignGuardError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Message step within one consensus round.
///
/// Numbering follows the signer-state convention (1, 2, 3), which is not the
/// same as the canonical wire message type. See `SignedMsgType` in
/// `signguard-consensus` for the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Step {
    /// Block proposal
    Propose = 1,
    /// First voting step
    Prevote = 2,
    /// Second voting step; signing one establishes a consensus lock
    Precommit = 3,
}

impl Step {
    /// Whether this step is constrained by an existing consensus lock.
    pub fn is_lock_constrained(self) -> bool {
        matches!(self, Step::Propose | Step::Prevote)
    }
}

impl TryFrom<i8> for Step {
    type Error = SignGuardError;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            1 => Ok(Step::Propose),
            2 => Ok(Step::Prevote),
            3 => Ok(Step::Precommit),
            other => Err(SignGuardError::invalid(format!("unknown step: {other}"))),
        }
    }
}

impl From<Step> for i8 {
    fn from(step: Step) -> Self {
        step as i8
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Propose => "PROPOSE",
            Step::Prevote => "PREVOTE",
            Step::Precommit => "PRECOMMIT",
        };
        f.write_str(name)
    }
}

/// Immutable (height, round, step) triple.
///
/// Heights and rounds are accepted as-is; range validation belongs to
/// whoever produces the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HrsKey {
    /// Block height
    pub height: i64,
    /// Round within the height
    pub round: i64,
    /// Step within the round
    pub step: Step,
}

impl HrsKey {
    /// Create a new key
    pub fn new(height: i64, round: i64, step: Step) -> Self {
        Self {
            height,
            round,
            step,
        }
    }

    /// Lexicographic comparison on `(height, round)`.
    pub fn cmp_height_round(&self, other: &HrsKey) -> Ordering {
        (self.height, self.round).cmp(&(other.height, other.round))
    }

    /// `self` comes strictly before `other`.
    pub fn is_before(&self, other: &HrsKey) -> bool {
        self.cmp_height_round(other) == Ordering::Less
    }

    /// `self` and `other` share height and round.
    pub fn is_same(&self, other: &HrsKey) -> bool {
        self.cmp_height_round(other) == Ordering::Equal
    }

    /// `self` comes strictly after `other`.
    pub fn is_after(&self, other: &HrsKey) -> bool {
        self.cmp_height_round(other) == Ordering::Greater
    }
}

impl fmt::Display for HrsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.height, self.round, self.step)
    }
}
