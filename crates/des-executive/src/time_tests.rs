// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

#[test]
fn sim_time_orders_ascending() {
    let mut times = vec![SimTime::new(3.0), SimTime::new(1.0), SimTime::new(2.0)];
    times.sort();
    assert_eq!(times, vec![SimTime::new(1.0), SimTime::new(2.0), SimTime::new(3.0)]);
}

#[test]
fn sim_time_adds_duration() {
    let t = SimTime::new(10.0) + Duration::from_secs(5);
    assert_eq!(t, SimTime::new(15.0));
}

#[test]
fn priority_orders_ascending() {
    let mut priorities = vec![Priority::new(5.0), Priority::new(-1.0), Priority::new(0.0)];
    priorities.sort();
    assert_eq!(priorities, vec![Priority::new(-1.0), Priority::new(0.0), Priority::new(5.0)]);
}

#[test]
fn priority_default_is_normal() {
    assert_eq!(Priority::default(), Priority::NORMAL);
}

#[yare::parameterized(
    earlier_is_less       = { 1.0, 2.0, Ordering::Less },
    later_is_greater      = { 2.0, 1.0, Ordering::Greater },
    equal_is_equal        = { 5.0, 5.0, Ordering::Equal },
    negative_vs_positive  = { -3.0, 3.0, Ordering::Less },
    negative_zero_vs_zero = { -0.0, 0.0, Ordering::Less },
)]
fn sim_time_cmp_table(left: f64, right: f64, expected: Ordering) {
    assert_eq!(SimTime::new(left).cmp(&SimTime::new(right)), expected);
}

proptest! {
    /// `total_cmp` is a genuine total order: antisymmetric and transitive
    /// over any three finite values, not just the handful above.
    #[test]
    fn sim_time_ordering_is_transitive(a in -1e9f64..1e9, b in -1e9f64..1e9, c in -1e9f64..1e9) {
        let (ta, tb, tc) = (SimTime::new(a), SimTime::new(b), SimTime::new(c));
        if ta <= tb && tb <= tc {
            prop_assert!(ta <= tc);
        }
    }

    #[test]
    fn priority_ordering_is_transitive(a in -1e9f64..1e9, b in -1e9f64..1e9, c in -1e9f64..1e9) {
        let (pa, pb, pc) = (Priority::new(a), Priority::new(b), Priority::new(c));
        if pa <= pb && pb <= pc {
            prop_assert!(pa <= pc);
        }
    }
}
