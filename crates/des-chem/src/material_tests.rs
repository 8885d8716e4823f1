// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn density_follows_specific_gravity() {
    let water = MaterialType::builder().name("water").specific_gravity(1.0).build();
    assert!((water.density_kg_per_m3() - 1000.0).abs() < 1e-9);
}

#[test]
fn vapor_pressure_is_none_without_antoine_data() {
    let salt = MaterialType::builder().name("salt").state(MaterialState::Solid).build();
    assert!(salt.vapor_pressure_pa(373.15).is_none());
}

#[test]
fn vapor_pressure_is_some_with_antoine_data() {
    let water = MaterialType::builder()
        .name("water")
        .antoine(AntoineCoefficients { a: 8.07131, b: 1730.63, c: 233.426 })
        .build();
    let p = water.vapor_pressure_pa(373.15).unwrap();
    // Water boils at ~101325 Pa at 100 C; Antoine should land close to that.
    assert!((p - 101_325.0).abs() < 5_000.0, "got {p}");
}
