use proptest::prelude::*;

use hotstuff_types::{Address, Header, HeaderExtra, View, EXTRA_VANITY};

fn arb_address() -> impl Strategy<Value = Address> {
    prop::array::uniform20(0u8..).prop_map(Address::new)
}

proptest! {
    /// Whatever the caller puts in the vanity region, filling a header keeps
    /// exactly 32 vanity bytes and yields the validator list back.
    #[test]
    fn fill_with_validators_roundtrip(
        vanity in prop::collection::vec(any::<u8>(), 0..64),
        validators in prop::collection::vec(arb_address(), 0..20),
    ) {
        let mut header = Header { extra: vanity.clone(), ..Default::default() };
        header.fill_with_validators(validators.clone());

        let keep = vanity.len().min(EXTRA_VANITY);
        prop_assert_eq!(&header.extra[..keep], &vanity[..keep]);

        let extra = header.extract_extra().unwrap();
        prop_assert_eq!(extra.validators, validators);
        prop_assert!(extra.leader_seal.is_empty());
        prop_assert!(extra.aggregated_validators_seal.is_empty());
    }

    /// The filtered view never depends on the aggregate seal contents.
    #[test]
    fn filtered_hash_independent_of_aggregate(
        seal_a in prop::collection::vec(any::<u8>(), 0..128),
        seal_b in prop::collection::vec(any::<u8>(), 0..128),
        leader in prop::collection::vec(any::<u8>(), 65..=65),
    ) {
        let mut a = Header { number: 1, ..Default::default() };
        a.set_extra(&HeaderExtra {
            leader_seal: leader.clone(),
            aggregated_validators_seal: seal_a,
            ..Default::default()
        });
        let mut b = a.clone();
        b.set_extra(&HeaderExtra {
            leader_seal: leader,
            aggregated_validators_seal: seal_b,
            ..Default::default()
        });
        prop_assert_eq!(a.filtered(true).unwrap().hash(), b.filtered(true).unwrap().hash());
        prop_assert_eq!(a.filtered(false).unwrap().hash(), b.filtered(false).unwrap().hash());
    }

    /// View ordering is lexicographic on (height, round).
    #[test]
    fn view_ordering(h1 in 0u64..1000, r1 in 0u64..1000, h2 in 0u64..1000, r2 in 0u64..1000) {
        let a = View::new(h1, r1);
        let b = View::new(h2, r2);
        prop_assert_eq!(a < b, (h1, r1) < (h2, r2));
    }
}
