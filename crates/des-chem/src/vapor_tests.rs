// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::material::AntoineCoefficients;

const WATER: AntoineCoefficients = AntoineCoefficients { a: 8.07131, b: 1730.63, c: 233.426 };

#[test]
fn antoine_pressure_at_boiling_point_is_one_atmosphere() {
    let p = antoine_pressure_pa(WATER, des_core::units::celsius_to_kelvin(100.0));
    assert!((p - des_core::units::PASCALS_PER_ATMOSPHERE).abs() < 5_000.0, "got {p}");
}

#[test]
fn antoine_temperature_inverts_antoine_pressure() {
    let t_k = des_core::units::celsius_to_kelvin(80.0);
    let p = antoine_pressure_pa(WATER, t_k);
    let back = antoine_temperature_k(WATER, p);
    assert!((back - t_k).abs() < 1e-6, "got {back}, expected {t_k}");
}

#[test]
fn pressure_increases_with_temperature() {
    let low = antoine_pressure_pa(WATER, des_core::units::celsius_to_kelvin(20.0));
    let high = antoine_pressure_pa(WATER, des_core::units::celsius_to_kelvin(90.0));
    assert!(high > low);
}
