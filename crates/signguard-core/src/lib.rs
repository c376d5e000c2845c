//! SignGuard Core - leaf types for the validator signer
//!
//! This crate holds the vocabulary shared by every SignGuard layer. It has no
//! policy of its own and performs no I/O.
//!
//! - [`HrsKey`] / [`Step`]: points in the consensus protocol, ordered on
//!   `(height, round)`
//! - [`ValueId`]: the 32-byte hash a proposal or vote commits to
//! - [`LockValueType`]: tag recorded alongside a consensus lock
//! - [`SignGuardError`]: unified error for non-safety faults

#![forbid(unsafe_code)]

/// Height/round/step keys
pub mod hrs;

/// Value identifiers
pub mod value;

/// Unified error handling
pub mod errors;

pub use errors::{Result, SignGuardError};
pub use hrs::{HrsKey, Step};
pub use value::{LockValueType, ValueId, VALUE_ID_LEN};
