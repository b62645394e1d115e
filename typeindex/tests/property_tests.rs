//! Property-based tests for the ordering and hashing contract of identities.
//!
//! Cases are drawn from 64 distinct marker types, each observed through four
//! identities:
//!
//! - `4 * n + 0`: `type_id::<&mut Marker_n>()`, reference stripped
//! - `4 * n + 1`: `type_id_with_cvr::<Marker_n>()`
//! - `4 * n + 2`: `type_id_with_cvr::<&Marker_n>()`
//! - `4 * n + 3`: `type_id_with_cvr::<&mut Marker_n>()`
//!
//! The first two denote the same type.

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;

use proptest::prelude::*;
use seq_macro::seq;
use typeindex::{type_id, type_id_with_cvr, TypeIndex};

seq!(N in 0..64 {
    #(
        #[allow(dead_code)]
        struct Marker~N;
    )*

    static CASES: [fn() -> TypeIndex; 256] = [
        #(
            type_id::<&'static mut Marker~N>,
            type_id_with_cvr::<Marker~N>,
            type_id_with_cvr::<&'static Marker~N>,
            type_id_with_cvr::<&'static mut Marker~N>,
        )*
    ];
});

fn expected_equal(a: usize, b: usize) -> bool {
    let (type_a, form_a) = (a / 4, a % 4);
    let (type_b, form_b) = (b / 4, b % 4);
    type_a == type_b && (form_a == form_b || (form_a <= 1 && form_b <= 1))
}

fn case_strategy() -> impl Strategy<Value = usize> {
    0..CASES.len()
}

proptest! {
    #[test]
    fn equality_matches_types(a in case_strategy(), b in case_strategy()) {
        prop_assert_eq!(CASES[a]() == CASES[b](), expected_equal(a, b));
    }

    #[test]
    fn equal_implies_equal_hash(a in case_strategy(), b in case_strategy()) {
        let (lhs, rhs) = (CASES[a](), CASES[b]());
        if lhs == rhs {
            prop_assert_eq!(lhs.hash_code(), rhs.hash_code());

            let state = RandomState::new();
            prop_assert_eq!(state.hash_one(lhs), state.hash_one(rhs));
        }
    }

    #[test]
    fn exactly_one_relation_holds(a in case_strategy(), b in case_strategy()) {
        let (lhs, rhs) = (CASES[a](), CASES[b]());
        let relations = [lhs < rhs, rhs < lhs, lhs == rhs];
        prop_assert_eq!(relations.iter().filter(|r| **r).count(), 1);

        prop_assert_eq!(lhs.before(&rhs), lhs < rhs);
        prop_assert_eq!(lhs.equal(&rhs), lhs == rhs);
    }

    #[test]
    fn ordering_is_transitive(
        a in case_strategy(),
        b in case_strategy(),
        c in case_strategy(),
    ) {
        let mut sorted = [CASES[a](), CASES[b](), CASES[c]()];
        sorted.sort();
        let [x, y, z] = sorted;

        prop_assert!(x <= y && y <= z);
        prop_assert!(x <= z);
        if x < y || y < z {
            prop_assert!(x < z);
        }
        if x == y && y == z {
            prop_assert!(x == z);
        }
    }
}

#[test]
fn test_all_cases_are_stable() {
    for (i, case) in CASES.iter().enumerate() {
        assert_eq!(case(), case(), "case {}", i);
        assert_eq!(case().hash_code(), case().hash_code(), "case {}", i);
    }
}
