//! Signer state record and its critical section
//!
//! One [`SignState`] exists per validator identity. It is the only mutable
//! state on the lock path, so it lives behind a single mutex
//! ([`GuardedSignState`]) and every signing decision runs
//! clear → validate → sign → advance while holding it. Two concurrent
//! requests for the same validator therefore never both observe the
//! pre-update lock.
//!
//! Requests below the recorded height are refused outright, so a late
//! message for an old height can neither sign nor move the lock.
//!
//! The critical section is CPU-bound. The signer closure passed to
//! [`GuardedSignState::sign_with`] must not block on network or disk.

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use signguard_core::{HrsKey, Result, SignGuardError, Step};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::config::ConsensusLockConfig;
use crate::core::{check_invariants, ConsensusLock};
use crate::errors::ConsensusLockError;
use crate::lock;

/// Identity of a validator served by this signer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorId(pub String);

impl ValidatorId {
    /// Create a new validator identity
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ValidatorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Per-validator signing state, persisted by the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignState {
    /// Latest observed height
    pub height: i64,
    /// Latest observed round
    pub round: i64,
    /// Latest observed step
    pub step: Step,
    /// Current consensus lock
    #[serde(default)]
    pub consensus_lock: ConsensusLock,
}

impl SignState {
    /// Fresh state at `hrs` with no lock
    pub fn new(hrs: HrsKey) -> Self {
        Self {
            height: hrs.height,
            round: hrs.round,
            step: hrs.step,
            consensus_lock: ConsensusLock::unlocked(),
        }
    }

    /// State for a validator that has never signed
    pub fn initial(config: &ConsensusLockConfig) -> Self {
        let mut state = Self::new(HrsKey::new(0, 0, Step::Propose));
        state.consensus_lock.value_type = config.value_type;
        state
    }

    /// Latest observed HRS
    pub fn hrs(&self) -> HrsKey {
        HrsKey::new(self.height, self.round, self.step)
    }

    /// Check a request against the current lock without mutating anything.
    pub fn validate_consensus_lock(
        &self,
        requested: HrsKey,
        sign_bytes: &[u8],
    ) -> std::result::Result<(), ConsensusLockError> {
        lock::validate_consensus_lock(&self.consensus_lock, requested, sign_bytes)
    }

    /// Apply the effect of a signed PRECOMMIT to the lock.
    pub fn advance_consensus_lock(
        &mut self,
        signed: HrsKey,
        sign_bytes: &[u8],
    ) -> std::result::Result<(), ConsensusLockError> {
        self.consensus_lock =
            lock::advance_consensus_lock(&self.consensus_lock, signed, sign_bytes)?;
        Ok(())
    }

    /// Clear the lock if `observed` is at another height.
    pub fn clear_consensus_lock(&mut self, observed: HrsKey) {
        self.consensus_lock = lock::clear_consensus_lock(&self.consensus_lock, observed);
    }

    /// Record a forward HRS observation.
    ///
    /// Observations before the current HRS are stale and ignored, so a late
    /// message for an old height can never release the current lock.
    /// Returns whether the observation was applied.
    pub fn observe(&mut self, hrs: HrsKey) -> bool {
        if hrs.is_before(&self.hrs()) {
            return false;
        }
        self.clear_consensus_lock(hrs);
        self.height = hrs.height;
        self.round = hrs.round;
        self.step = hrs.step;
        true
    }
}

/// Result of a successful signing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOutcome<T> {
    /// Whatever the signer closure produced
    pub signature: T,
    /// New lock to persist, if the lock changed
    pub lock_update: Option<ConsensusLock>,
}

/// Failure of a signing decision.
#[derive(Debug, thiserror::Error)]
pub enum SignError<E: std::error::Error + 'static> {
    /// The lock path refused the request
    #[error("sign request refused: {0}")]
    Lock(#[from] ConsensusLockError),

    /// The request is for a height below the one already recorded
    #[error("sign request refused: {requested} is below current height {current_height}")]
    StaleHeight {
        /// HRS of the refused request
        requested: HrsKey,
        /// Height recorded in the signer state
        current_height: i64,
    },

    /// The signer closure failed
    #[error("signer failed: {0}")]
    Signer(#[source] E),
}

impl<E: std::error::Error + 'static> SignError<E> {
    /// Whether the refusal was a consensus lock violation
    pub fn is_consensus_lock_violation(&self) -> bool {
        matches!(self, SignError::Lock(e) if e.is_violation())
    }
}

/// A validator's [`SignState`] behind its one critical section.
pub struct GuardedSignState {
    validator: ValidatorId,
    state: Mutex<SignState>,
}

impl GuardedSignState {
    /// Guard a fresh or restored state
    pub fn new(validator: ValidatorId, state: SignState) -> Self {
        Self {
            validator,
            state: Mutex::new(state),
        }
    }

    /// Validator this state belongs to
    pub fn validator(&self) -> &ValidatorId {
        &self.validator
    }

    /// Copy of the current state, for persistence
    pub fn snapshot(&self) -> SignState {
        *self.state.lock()
    }

    /// Current lock
    pub fn consensus_lock(&self) -> ConsensusLock {
        self.state.lock().consensus_lock
    }

    /// Replace the state with one restored from storage.
    pub fn restore(&self, restored: SignState) -> Result<()> {
        check_invariants(&restored.consensus_lock)?;
        *self.state.lock() = restored;
        Ok(())
    }

    /// Record an HRS observation outside of a sign request.
    ///
    /// Returns the new lock when the observation cleared it.
    pub fn observe(&self, hrs: HrsKey) -> Option<ConsensusLock> {
        let mut state = self.state.lock();
        let before = state.consensus_lock;
        state.observe(hrs);
        if state.consensus_lock == before {
            return None;
        }
        debug!(
            validator = %self.validator,
            height = hrs.height,
            round = hrs.round,
            released = %before,
            "Consensus lock cleared on height advance"
        );
        Some(state.consensus_lock)
    }

    /// Run one signing decision as a single critical section.
    ///
    /// Requests below the recorded height are refused. Otherwise the request
    /// is checked against the lock, `signer` is invoked on the sign bytes,
    /// and for a PRECOMMIT the lock is advanced. The state is only written
    /// back once `signer` succeeds; any failure leaves it untouched.
    pub fn sign_with<T, E, F>(
        &self,
        hrs: HrsKey,
        sign_bytes: &[u8],
        signer: F,
    ) -> std::result::Result<SignOutcome<T>, SignError<E>>
    where
        E: std::error::Error + 'static,
        F: FnOnce(&[u8]) -> std::result::Result<T, E>,
    {
        let mut state = self.state.lock();
        if hrs.height < state.height {
            warn!(
                validator = %self.validator,
                height = hrs.height,
                round = hrs.round,
                step = %hrs.step,
                current_height = state.height,
                "Refusing sign request below current height"
            );
            return Err(SignError::StaleHeight {
                requested: hrs,
                current_height: state.height,
            });
        }

        let mut next = *state;
        next.observe(hrs);

        if let Err(err) = next.validate_consensus_lock(hrs, sign_bytes) {
            match &err {
                ConsensusLockError::Violation(violation) => warn!(
                    validator = %self.validator,
                    height = hrs.height,
                    round = hrs.round,
                    step = %hrs.step,
                    locked_round = violation.locked_round,
                    locked_value = %violation.locked_value,
                    requested_value = %violation.requested_value,
                    "Consensus lock violation"
                ),
                ConsensusLockError::Decode(decode) => error!(
                    validator = %self.validator,
                    height = hrs.height,
                    round = hrs.round,
                    step = %hrs.step,
                    error = %decode,
                    "Refusing sign request with undecodable sign bytes"
                ),
            }
            return Err(err.into());
        }

        // PRECOMMIT values are decoded before signing so an unreadable
        // payload is refused rather than signed without a lock update.
        if let Err(err) = next.advance_consensus_lock(hrs, sign_bytes) {
            error!(
                validator = %self.validator,
                height = hrs.height,
                round = hrs.round,
                error = %err,
                "Refusing PRECOMMIT with undecodable sign bytes"
            );
            return Err(err.into());
        }

        let signature = signer(sign_bytes).map_err(SignError::Signer)?;

        let lock_update =
            (next.consensus_lock != state.consensus_lock).then_some(next.consensus_lock);
        if let Some(new_lock) = &lock_update {
            debug!(
                validator = %self.validator,
                height = hrs.height,
                round = hrs.round,
                step = %hrs.step,
                lock = %new_lock,
                "Consensus lock updated"
            );
        }
        *state = next;

        Ok(SignOutcome {
            signature,
            lock_update,
        })
    }
}

impl fmt::Debug for GuardedSignState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedSignState")
            .field("validator", &self.validator)
            .field("state", &*self.state.lock())
            .finish()
    }
}

/// All signer states served by this process, one per validator identity.
///
/// Requests for one identity serialize on that identity's mutex; distinct
/// identities never contend beyond the brief map lookup.
pub struct SignStateRegistry {
    config: ConsensusLockConfig,
    states: RwLock<HashMap<ValidatorId, Arc<GuardedSignState>>>,
}

impl SignStateRegistry {
    /// Empty registry
    pub fn new(config: ConsensusLockConfig) -> Self {
        Self {
            config,
            states: RwLock::new(HashMap::new()),
        }
    }

    /// State for `validator`, if registered
    pub fn get(&self, validator: &ValidatorId) -> Option<Arc<GuardedSignState>> {
        self.states.read().get(validator).cloned()
    }

    /// State for `validator`, created unlocked on first use
    pub fn get_or_init(&self, validator: &ValidatorId) -> Arc<GuardedSignState> {
        if let Some(existing) = self.get(validator) {
            return existing;
        }
        self.states
            .write()
            .entry(validator.clone())
            .or_insert_with(|| {
                Arc::new(GuardedSignState::new(
                    validator.clone(),
                    SignState::initial(&self.config),
                ))
            })
            .clone()
    }

    /// Register a state restored from storage, replacing any existing one.
    pub fn insert_restored(
        &self,
        validator: ValidatorId,
        restored: SignState,
    ) -> Result<Arc<GuardedSignState>> {
        check_invariants(&restored.consensus_lock).map_err(|e| {
            SignGuardError::invalid(format!("restored state for {validator}: {e}"))
        })?;
        let guarded = Arc::new(GuardedSignState::new(validator.clone(), restored));
        self.states.write().insert(validator, guarded.clone());
        Ok(guarded)
    }

    /// Number of registered validators
    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    /// Whether no validator is registered
    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }
}
