//! Property tests for the consensus lock rules.

use proptest::prelude::*;
use signguard_consensus::core::{advance, clear_on_height_advance, validate};
use signguard_consensus::{validate_consensus_lock, ConsensusLock};
use signguard_core::{HrsKey, Step, ValueId};
use signguard_testkit::sign_bytes;

fn arb_value() -> impl Strategy<Value = ValueId> {
    any::<[u8; 32]>().prop_map(ValueId)
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![Just(Step::Propose), Just(Step::Prevote), Just(Step::Precommit)]
}

fn arb_lock() -> impl Strategy<Value = ConsensusLock> {
    (0i64..1_000, 0i64..50, arb_value()).prop_map(|(h, r, v)| ConsensusLock::locked(h, r, v))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_other_heights_never_constrained(
        lock in arb_lock(),
        delta in 1i64..1_000,
        above in any::<bool>(),
        round in 0i64..50,
        step in arb_step(),
        value in arb_value(),
    ) {
        let height = if above { lock.height + delta } else { lock.height - delta };
        let request = HrsKey::new(height, round, step);
        prop_assert!(validate(&lock, request, Some(value)).is_ok());
    }

    #[test]
    fn prop_precommit_never_blocked(
        lock in arb_lock(),
        round in 0i64..50,
        value in arb_value(),
    ) {
        let request = HrsKey::new(lock.height, round, Step::Precommit);
        let bytes = sign_bytes(request, Some(value));
        prop_assert!(validate_consensus_lock(&lock, request, &bytes).is_ok());
    }

    #[test]
    fn prop_later_round_requires_locked_value(
        lock in arb_lock(),
        later in 0i64..50,
        prevote in any::<bool>(),
        value in arb_value(),
    ) {
        let step = if prevote { Step::Prevote } else { Step::Propose };
        let request = HrsKey::new(lock.height, lock.round + later, step);
        let bytes = sign_bytes(request, Some(value));
        let result = validate_consensus_lock(&lock, request, &bytes);
        prop_assert_eq!(result.is_ok(), Some(value) == lock.value);
        if let Err(err) = result {
            prop_assert!(err.is_violation());
        }
    }

    #[test]
    fn prop_locked_value_always_allowed(
        lock in arb_lock(),
        round in 0i64..100,
        step in arb_step(),
    ) {
        let request = HrsKey::new(lock.height, round, step);
        prop_assert!(validate(&lock, request, lock.value).is_ok());
    }

    #[test]
    fn prop_advance_is_idempotent(
        lock in arb_lock(),
        round in 0i64..50,
        value in proptest::option::of(arb_value()),
    ) {
        let signed = HrsKey::new(lock.height, round, Step::Precommit);
        let once = advance(&lock, signed, value);
        prop_assert_eq!(advance(&once, signed, value), once);
    }

    #[test]
    fn prop_advance_locks_signed_value(
        lock in arb_lock(),
        height in 0i64..1_000,
        round in 0i64..50,
        value in arb_value(),
    ) {
        let signed = HrsKey::new(height, round, Step::Precommit);
        let expected = ConsensusLock::locked(height, round, value);
        prop_assert_eq!(advance(&lock, signed, Some(value)), expected);
    }

    #[test]
    fn prop_clear_keeps_lock_within_height(
        lock in arb_lock(),
        round in 0i64..100,
        step in arb_step(),
    ) {
        let observed = HrsKey::new(lock.height, round, step);
        prop_assert_eq!(clear_on_height_advance(&lock, observed), lock);
    }

    #[test]
    fn prop_clear_drops_lock_across_heights(
        lock in arb_lock(),
        delta in 1i64..1_000,
        step in arb_step(),
    ) {
        let observed = HrsKey::new(lock.height + delta, 0, step);
        let cleared = clear_on_height_advance(&lock, observed);
        prop_assert!(!cleared.is_locked());
        prop_assert_eq!(clear_on_height_advance(&cleared, observed), cleared);
    }
}
