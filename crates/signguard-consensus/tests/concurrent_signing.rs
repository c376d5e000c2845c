//! Concurrent sign requests against one validator's state.
//!
//! Every signature that gets produced is recorded from inside the signer
//! closure. Replaying that record in order through the pure lock rules must
//! never hit a violation: the critical section serializes decisions.

use parking_lot::Mutex;
use signguard_consensus::core::{advance, clear_on_height_advance, validate};
use signguard_consensus::{
    ConsensusLock, ConsensusLockConfig, GuardedSignState, SignError, SignStateRegistry,
    ValidatorId,
};
use signguard_core::{HrsKey, Step, ValueId};
use signguard_testkit::{locked_state, sign_bytes, value_id};
use std::convert::Infallible;
use std::sync::Arc;

type SignedLog = Mutex<Vec<(HrsKey, Option<ValueId>)>>;

fn replay(log: &[(HrsKey, Option<ValueId>)], start: ConsensusLock) {
    let mut lock = start;
    for (hrs, value) in log {
        lock = clear_on_height_advance(&lock, *hrs);
        validate(&lock, *hrs, *value)
            .unwrap_or_else(|v| panic!("signed history conflicts with lock: {v}"));
        lock = advance(&lock, *hrs, *value);
    }
}

#[test]
fn test_concurrent_conflicting_requests_serialize() {
    let _ = tracing_subscriber::fmt::try_init();
    let block_a = value_id("block A");
    let block_b = value_id("block B");
    let start = locked_state(100, 5, block_a);
    let guarded = Arc::new(GuardedSignState::new(ValidatorId::new("val-1"), start));
    let log: Arc<SignedLog> = Arc::new(Mutex::new(Vec::new()));

    std::thread::scope(|scope| {
        for worker in 0..8i64 {
            let guarded = guarded.clone();
            let log = log.clone();
            scope.spawn(move || {
                for round in 6..40i64 {
                    // Workers disagree on which block to sign in each round.
                    let value = if (round + worker) % 2 == 0 { block_a } else { block_b };
                    for step in [Step::Propose, Step::Prevote, Step::Precommit] {
                        let hrs = HrsKey::new(100, round, step);
                        let bytes = sign_bytes(hrs, Some(value));
                        let result = guarded.sign_with(hrs, &bytes, |signed| {
                            log.lock().push((hrs, Some(value)));
                            Ok::<_, Infallible>(signed.len())
                        });
                        if let Err(err) = result {
                            assert!(err.is_consensus_lock_violation(), "unexpected refusal: {err}");
                        }
                    }
                }
            });
        }
    });

    let log = log.lock();
    assert!(!log.is_empty());
    replay(&log, start.consensus_lock);

    let (last_hrs, last_value) = log
        .iter()
        .rev()
        .find(|(hrs, _)| hrs.step == Step::Precommit)
        .copied()
        .expect("at least one precommit is never blocked");
    let final_lock = guarded.consensus_lock();
    assert_eq!(final_lock.value, last_value);
    assert_eq!(final_lock.round, last_hrs.round);
}

#[test]
fn test_precommit_race_leaves_one_lock() {
    let block_a = value_id("block A");
    let block_b = value_id("block B");
    let guarded = GuardedSignState::new(ValidatorId::new("val-1"), locked_state(100, 5, block_a));
    let hrs = HrsKey::new(100, 6, Step::Precommit);

    std::thread::scope(|scope| {
        for value in [block_a, block_b] {
            let guarded = &guarded;
            scope.spawn(move || {
                let bytes = sign_bytes(hrs, Some(value));
                guarded
                    .sign_with(hrs, &bytes, |_| Ok::<_, Infallible>(()))
                    .unwrap();
            });
        }
    });

    let lock = guarded.consensus_lock();
    assert!(lock.value == Some(block_a) || lock.value == Some(block_b));
    assert_eq!(lock.round, 6);
}

#[test]
fn test_registry_isolates_validators() {
    let registry = Arc::new(SignStateRegistry::new(ConsensusLockConfig::default()));
    let block = value_id("block");
    let other = value_id("other");

    std::thread::scope(|scope| {
        for i in 0..4 {
            let registry = registry.clone();
            scope.spawn(move || {
                let id = ValidatorId::new(format!("val-{i}"));
                let guarded = registry.get_or_init(&id);
                let precommit = HrsKey::new(10, 0, Step::Precommit);
                guarded
                    .sign_with(precommit, &sign_bytes(precommit, Some(block)), |_| {
                        Ok::<_, Infallible>(())
                    })
                    .unwrap();
            });
        }
    });
    assert_eq!(registry.len(), 4);

    let val_0 = registry.get(&ValidatorId::new("val-0")).unwrap();
    let prevote = HrsKey::new(10, 1, Step::Prevote);
    let err = val_0
        .sign_with(prevote, &sign_bytes(prevote, Some(other)), |_| {
            Ok::<_, Infallible>(())
        })
        .unwrap_err();
    assert!(matches!(err, SignError::Lock(_)));

    // A late request for an older height is refused and leaves the lock alone.
    let late = HrsKey::new(9, 4, Step::Precommit);
    let err = val_0
        .sign_with(late, &sign_bytes(late, Some(other)), |_| Ok::<_, Infallible>(()))
        .unwrap_err();
    assert!(matches!(err, SignError::StaleHeight { current_height: 10, .. }));
    assert_eq!(val_0.consensus_lock(), ConsensusLock::locked(10, 0, block));

    // A fresh identity has no lock and signs anything.
    let fresh = registry.get_or_init(&ValidatorId::new("val-fresh"));
    fresh
        .sign_with(prevote, &sign_bytes(prevote, Some(other)), |_| {
            Ok::<_, Infallible>(())
        })
        .unwrap();
}
