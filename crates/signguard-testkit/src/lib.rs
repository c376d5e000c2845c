//! SignGuard Testkit
//!
//! Builders for canonical sign bytes and lock fixtures, so tests can speak in
//! terms of "a PREVOTE for block B at 100/6" instead of hand-assembling
//! protobuf.

#![allow(missing_docs)]

use sha2::{Digest, Sha256};
use signguard_consensus::canonical::{
    CanonicalBlockId, CanonicalPartSetHeader, CanonicalProposal, CanonicalTimestamp,
    CanonicalVote, SignedMsgType,
};
use signguard_consensus::{ConsensusLock, SignState};
use signguard_core::{HrsKey, Step, ValueId};

pub const TEST_CHAIN_ID: &str = "signguard-test-chain";

/// Deterministic value id derived from a human-readable label.
pub fn value_id(label: &str) -> ValueId {
    let digest = Sha256::digest(label.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    ValueId(bytes)
}

fn block_id(value: Option<ValueId>) -> Option<CanonicalBlockId> {
    value.map(|v| CanonicalBlockId {
        hash: v.as_bytes().to_vec(),
        part_set_header: Some(CanonicalPartSetHeader {
            total: 1,
            hash: value_id("part-set").as_bytes().to_vec(),
        }),
    })
}

fn timestamp() -> Option<CanonicalTimestamp> {
    Some(CanonicalTimestamp {
        seconds: 1_700_000_000,
        nanos: 0,
    })
}

/// Length-delimited canonical proposal bytes.
pub fn proposal_sign_bytes(height: i64, round: i64, value: Option<ValueId>) -> Vec<u8> {
    CanonicalProposal {
        r#type: SignedMsgType::Proposal as i32,
        height,
        round,
        pol_round: -1,
        block_id: block_id(value),
        timestamp: timestamp(),
        chain_id: TEST_CHAIN_ID.to_string(),
    }
    .to_sign_bytes()
}

/// Length-delimited canonical vote bytes for PREVOTE or PRECOMMIT.
pub fn vote_sign_bytes(step: Step, height: i64, round: i64, value: Option<ValueId>) -> Vec<u8> {
    let msg_type = match step {
        Step::Precommit => SignedMsgType::Precommit,
        Step::Prevote | Step::Propose => SignedMsgType::Prevote,
    };
    CanonicalVote {
        r#type: msg_type as i32,
        height,
        round,
        block_id: block_id(value),
        timestamp: timestamp(),
        chain_id: TEST_CHAIN_ID.to_string(),
    }
    .to_sign_bytes()
}

/// Sign bytes matching `hrs`, committing to `value` (or nil).
pub fn sign_bytes(hrs: HrsKey, value: Option<ValueId>) -> Vec<u8> {
    match hrs.step {
        Step::Propose => proposal_sign_bytes(hrs.height, hrs.round, value),
        Step::Prevote | Step::Precommit => vote_sign_bytes(hrs.step, hrs.height, hrs.round, value),
    }
}

/// Signer state that has just PRECOMMIT-ted `value` at `height`/`round`.
pub fn locked_state(height: i64, round: i64, value: ValueId) -> SignState {
    SignState {
        height,
        round,
        step: Step::Precommit,
        consensus_lock: ConsensusLock::locked(height, round, value),
    }
}

/// Signer state at `height`/`round` with no lock.
pub fn unlocked_state(height: i64, round: i64) -> SignState {
    SignState::new(HrsKey::new(height, round, Step::Precommit))
}
