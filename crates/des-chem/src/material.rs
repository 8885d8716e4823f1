// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MaterialType: the immutable, catalog-registered description of one
//! material (spec.md §3).

use crate::ids::MaterialId;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialState {
    Solid,
    Liquid,
    Gas,
}

des_core::simple_display! {
    MaterialState {
        Solid => "solid",
        Liquid => "liquid",
        Gas => "gas",
    }
}

/// Antoine vapor-pressure coefficients: `log10(P_sat_mmHg) = A - B/(T_C + C)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AntoineCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// A material's fixed physical properties. Immutable once registered into
/// a [`crate::MaterialCatalog`] — there is no setter, only the builder used
/// at construction time.
#[derive(Clone, Debug)]
pub struct MaterialType {
    pub id: MaterialId,
    pub name: String,
    /// Relative to water at 1000 kg/m^3.
    pub specific_gravity: f64,
    /// kJ/(kg*K).
    pub specific_heat: f64,
    pub state: MaterialState,
    /// g/mol.
    pub molecular_weight: f64,
    pub antoine: Option<AntoineCoefficients>,
    /// Henry's law constant, when present (used by external emission
    /// models this crate does not itself implement — carried through so
    /// collaborators can consume it).
    pub henry: Option<f64>,
    /// Boiling-point-elevation-per-molality, K*kg/mol — a property of a
    /// *solvent* material (e.g. water's is 0.512), consulted by
    /// [`crate::Mixture::estimated_boiling_point`] for dissolved solutes.
    pub ebullioscopic: Option<f64>,
    pub emission_tags: HashSet<String>,
}

impl MaterialType {
    /// Density in kg/m^3.
    pub fn density_kg_per_m3(&self) -> f64 {
        self.specific_gravity * 1000.0
    }

    /// Partial-pressure estimate at `temperature_k`, in Pa, if this
    /// material carries Antoine coefficients; `None` means "not volatile"
    /// per spec.md §6.
    pub fn vapor_pressure_pa(&self, temperature_k: f64) -> Option<f64> {
        self.antoine.map(|coef| crate::vapor::antoine_pressure_pa(coef, temperature_k))
    }
}

des_core::builder! {
    pub struct MaterialTypeBuilder => MaterialType {
        into { name: String = "material" }
        set { specific_gravity: f64 = 1.0 }
        set { specific_heat: f64 = 4.18 }
        set { state: MaterialState = MaterialState::Liquid }
        set { molecular_weight: f64 = 18.015 }
        option { antoine: AntoineCoefficients = None }
        option { henry: f64 = None }
        option { ebullioscopic: f64 = None }
        set { emission_tags: HashSet<String> = HashSet::new() }
        computed { id: MaterialId = MaterialId::new() }
    }
}

/// Production builder for [`MaterialType`].
///
/// `des_core::builder!`'s generated `MaterialType::builder()` is gated
/// behind `#[cfg(any(test, feature = "test-support"))]` — fine for
/// fixtures, unusable from a non-test loader. This is the same shape
/// (`new`, chainable setters, `build`) but always available, for callers
/// like [`crate::MaterialCatalog::load_csv`] that construct materials
/// from real, non-test data.
pub struct MaterialTypeSpec {
    name: String,
    specific_gravity: f64,
    specific_heat: f64,
    state: MaterialState,
    molecular_weight: f64,
    antoine: Option<AntoineCoefficients>,
    henry: Option<f64>,
    ebullioscopic: Option<f64>,
    emission_tags: HashSet<String>,
}

impl MaterialTypeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specific_gravity: 1.0,
            specific_heat: 4.18,
            state: MaterialState::Liquid,
            molecular_weight: 18.015,
            antoine: None,
            henry: None,
            ebullioscopic: None,
            emission_tags: HashSet::new(),
        }
    }

    des_core::setters! {
        set { specific_gravity: f64 }
        set { specific_heat: f64 }
        set { state: MaterialState }
        set { molecular_weight: f64 }
        option { antoine: AntoineCoefficients }
        option { henry: f64 }
        option { ebullioscopic: f64 }
        set { emission_tags: HashSet<String> }
    }

    pub fn build(self) -> MaterialType {
        MaterialType {
            id: MaterialId::new(),
            name: self.name,
            specific_gravity: self.specific_gravity,
            specific_heat: self.specific_heat,
            state: self.state,
            molecular_weight: self.molecular_weight,
            antoine: self.antoine,
            henry: self.henry,
            ebullioscopic: self.ebullioscopic,
            emission_tags: self.emission_tags,
        }
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
