// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::material::MaterialState;

const FIXTURE: &str = "\
; pure-component properties, semicolon-prefixed comment lines are ignored
name,casNumber,classification,density_g_per_L,density_lb_per_gal,molWeight,diffusivity_air,henrys,antoineA,antoineB,antoineC,calcVP_mmHg,calcVP_psi
; water is volatile and carries full Antoine data
water,7732-18-5,solvent,1000,8.345,18.015,0.282,,8.07131,1730.63,233.426,17.5,0.34
; salt has no Antoine data at all -- not volatile
sodium chloride,7647-14-5,salt,2165,18.07,58.443,,,,,,,
";

#[test]
fn load_csv_registers_one_material_per_row() {
    let mut catalog = MaterialCatalog::new();
    let ids = catalog.load_csv(FIXTURE.as_bytes(), &[]).unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn load_csv_parses_antoine_data_when_present() {
    let mut catalog = MaterialCatalog::new();
    catalog.load_csv(FIXTURE.as_bytes(), &[]).unwrap();
    let water = catalog.get_by_name("water").unwrap();
    assert!(water.antoine.is_some());
    assert!((water.molecular_weight - 18.015).abs() < 1e-9);
}

#[test]
fn blank_antoine_cells_mean_not_volatile() {
    let mut catalog = MaterialCatalog::new();
    catalog.load_csv(FIXTURE.as_bytes(), &[]).unwrap();
    let salt = catalog.get_by_name("sodium chloride").unwrap();
    assert!(salt.antoine.is_none());
    assert!(salt.vapor_pressure_pa(298.15).is_none());
}

#[test]
fn csv_overrides_apply_fields_the_csv_does_not_carry() {
    let mut catalog = MaterialCatalog::new();
    let overrides = vec![
        CsvOverride::new("water").specific_heat(4.18).ebullioscopic(0.512),
        CsvOverride::new("sodium chloride").state(MaterialState::Solid),
    ];
    catalog.load_csv(FIXTURE.as_bytes(), &overrides).unwrap();
    let water = catalog.get_by_name("water").unwrap();
    assert!((water.specific_heat - 4.18).abs() < 1e-9);
    assert!((water.ebullioscopic.unwrap() - 0.512).abs() < 1e-9);
    let salt = catalog.get_by_name("sodium chloride").unwrap();
    assert_eq!(salt.state, MaterialState::Solid);
}

#[test]
fn density_g_per_l_converts_to_specific_gravity() {
    let mut catalog = MaterialCatalog::new();
    catalog.load_csv(FIXTURE.as_bytes(), &[]).unwrap();
    let water = catalog.get_by_name("water").unwrap();
    assert!((water.specific_gravity - 1.0).abs() < 1e-9);
}

#[test]
fn unknown_material_lookup_is_none() {
    let catalog = MaterialCatalog::new();
    assert!(catalog.get_by_name("unobtainium").is_none());
}

#[test]
fn require_fails_with_unknown_material_error() {
    let catalog = MaterialCatalog::new();
    let err = catalog.require(MaterialId::new()).unwrap_err();
    assert!(matches!(err, ChemError::UnknownMaterial(_)));
}

#[test]
fn classification_becomes_an_emission_tag() {
    let mut catalog = MaterialCatalog::new();
    catalog.load_csv(FIXTURE.as_bytes(), &[]).unwrap();
    let water = catalog.get_by_name("water").unwrap();
    assert!(water.emission_tags.contains("solvent"));
}

#[yare::parameterized(
    water_is_volatile = { "water", true },
    salt_is_not_volatile = { "sodium chloride", false },
)]
fn row_volatility_matches_whether_antoine_data_is_present(name: &str, expect_volatile: bool) {
    let mut catalog = MaterialCatalog::new();
    catalog.load_csv(FIXTURE.as_bytes(), &[]).unwrap();
    let material = catalog.get_by_name(name).unwrap();
    assert_eq!(material.antoine.is_some(), expect_volatile);
}
