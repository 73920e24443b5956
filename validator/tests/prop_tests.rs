//! Property tests for quorum arithmetic and proposer rotation.

use hotstuff_types::Address;
use hotstuff_validator::{ProposerPolicy, ValidatorSet};
use proptest::prelude::*;

fn arb_validator_set(min: usize, max: usize) -> impl Strategy<Value = Vec<Address>> {
    prop::collection::btree_set(any::<[u8; 20]>(), min..=max)
        .prop_map(|set| set.into_iter().map(Address::new).collect())
}

proptest! {
    #[test]
    fn quorum_formulas_hold(addrs in arb_validator_set(1, 64)) {
        let n = addrs.len();
        let vs = ValidatorSet::new(addrs, ProposerPolicy::RoundRobin);
        prop_assert_eq!(vs.q(), (2 * n + 2) / 3);
        prop_assert_eq!(vs.f(), (n + 2) / 3 - 1);
        prop_assert!(vs.q() <= n);
    }

    #[test]
    fn round_robin_visits_every_validator(addrs in arb_validator_set(1, 32), pick in any::<prop::sample::Index>()) {
        let vs = ValidatorSet::new(addrs, ProposerPolicy::RoundRobin);
        let last = vs.address_list()[pick.index(vs.size())];
        let mut seen: Vec<Address> = (0..vs.size() as u64)
            .map(|round| vs.calc_proposer(last, round).unwrap().address())
            .collect();
        seen.sort();
        prop_assert_eq!(seen, vs.address_list());
    }

    #[test]
    // With one or two validators Q equals N, so no certificate can exceed it.
    fn full_membership_reaches_quorum_from_three(addrs in arb_validator_set(3, 32)) {
        let vs = ValidatorSet::new(addrs.clone(), ProposerPolicy::Sticky);
        prop_assert!(vs.check_quorum(&addrs).is_ok());
    }

    #[test]
    fn exactly_q_committers_never_reach_quorum(addrs in arb_validator_set(1, 32)) {
        let vs = ValidatorSet::new(addrs, ProposerPolicy::RoundRobin);
        let committers: Vec<Address> = vs.address_list().into_iter().take(vs.q()).collect();
        prop_assert!(vs.check_quorum(&committers).is_err());
    }
}
