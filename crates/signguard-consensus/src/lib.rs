#![deny(clippy::dbg_macro)]
#![deny(clippy::todo)]
//! # SignGuard Consensus - lock enforcement on the signing path
//!
//! Prevents a validator's remote signer from signing a PROPOSE or PREVOTE
//! that conflicts with a value it has already PRECOMMIT-ted at the same
//! height. Consulted on every sign request; records the effect of every
//! signed PRECOMMIT.
//!
//! ## Architecture
//!
//! - **canonical**: decodes the value identifier out of canonical sign bytes,
//!   dispatching on step (proposal envelope vs. vote envelope)
//! - **core**: pure lock state, transitions and validation
//! - **lock**: the call surface the signing service uses
//! - **errors**: violation and decode-failure taxonomy
//! - **sign_state**: per-validator signer state behind one critical section
//! - **config**: `[consensus_lock]` runtime configuration
//!
//! ## Control flow
//!
//! ```text
//! sign request ─▶ clear on height advance ─▶ decode value ─▶ validate ─▶ sign
//!                                                                         │
//!                                   persist ◀─ advance (PRECOMMIT only) ◀─┘
//! ```
//!
//! Everything outside `sign_state` is pure and safe to call from any thread
//! without synchronization.

pub mod canonical;
pub mod config;
pub mod core;
pub mod errors;
pub mod lock;
pub mod sign_state;

pub use canonical::{decode_value_id, CanonicalSignBytes};
pub use config::ConsensusLockConfig;
pub use self::core::ConsensusLock;
pub use errors::{
    is_consensus_lock_violation, ConsensusLockError, ConsensusLockViolation, DecodeError,
};
pub use lock::{advance_consensus_lock, clear_consensus_lock, validate_consensus_lock};
pub use sign_state::{
    GuardedSignState, SignError, SignOutcome, SignState, SignStateRegistry, ValidatorId,
};
