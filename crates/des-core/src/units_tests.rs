// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

#[test]
fn celsius_round_trips_through_kelvin() {
    let c = 36.6;
    assert!((kelvin_to_celsius(celsius_to_kelvin(c)) - c).abs() < 1e-9);
}

#[test]
fn zero_celsius_is_273_15_kelvin() {
    assert!((celsius_to_kelvin(0.0) - 273.15).abs() < 1e-9);
}

#[test]
fn one_atmosphere_in_mmhg_is_about_760() {
    let atm_pa = PASCALS_PER_ATMOSPHERE;
    let mmhg = pascals_to_mmhg(atm_pa);
    assert!((mmhg - 760.0).abs() < 0.1);
}

#[test]
fn mmhg_round_trips_through_pascals() {
    let p = 123.4;
    assert!((pascals_to_mmhg(mmhg_to_pascals(p)) - p).abs() < 1e-9);
}

#[yare::parameterized(
    freezing       = { 0.0, 273.15 },
    boiling        = { 100.0, 373.15 },
    body_temp      = { 37.0, 310.15 },
    absolute_zero  = { -273.15, 0.0 },
    below_zero     = { -40.0, 233.15 },
)]
fn celsius_to_kelvin_table(celsius: f64, expected_kelvin: f64) {
    assert!((celsius_to_kelvin(celsius) - expected_kelvin).abs() < 1e-9);
}

proptest! {
    #[test]
    fn celsius_kelvin_round_trip_holds_for_any_temperature(c in -273.15..1e6_f64) {
        prop_assert!((kelvin_to_celsius(celsius_to_kelvin(c)) - c).abs() < 1e-6);
    }

    #[test]
    fn mmhg_pascal_round_trip_holds_for_any_pressure(p in 0.0..1e9_f64) {
        prop_assert!((pascals_to_mmhg(mmhg_to_pascals(p)) - p).abs() < 1e-3);
    }
}
