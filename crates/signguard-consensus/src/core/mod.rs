//! Pure consensus lock core
//!
//! Effect-free lock state, transitions and validation. Nothing here performs
//! I/O, logs, or touches shared state, so every function can run on the
//! signing hot path from any thread.

pub mod state;
pub mod transitions;
pub mod validation;

pub use state::ConsensusLock;
pub use transitions::{advance, clear_on_height_advance};
pub use validation::{check_invariants, validate};
