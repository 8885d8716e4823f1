// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loader for the emission-test XML fixture format (spec.md §6):
//! `EmissionTests/Test[@num]/{Stimulus,Response}`, with `Material` and
//! `Parameter` children under `Stimulus` and per-model `Material` outputs
//! nested under `Response/Model`.
//!
//! This lives under `tests/` rather than `src/` so that `quick-xml` stays
//! a dev-dependency: the loader is consumed only by this integration
//! suite, never by the core libraries (spec.md §9's "dynamic property
//! bags" design note makes the same call for the config layer this
//! fixture format would otherwise entangle with).

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EmissionTests {
    #[serde(rename = "Test", default)]
    pub tests: Vec<EmissionTest>,
}

#[derive(Debug, Deserialize)]
pub struct EmissionTest {
    #[serde(rename = "@num")]
    pub num: u32,
    #[serde(rename = "Stimulus")]
    pub stimulus: Stimulus,
    #[serde(rename = "Response")]
    pub response: Response,
}

#[derive(Debug, Deserialize)]
pub struct Stimulus {
    #[serde(rename = "Material", default)]
    pub materials: Vec<MaterialQuantity>,
    #[serde(rename = "Parameter", default)]
    pub parameters: Vec<Parameter>,
}

impl Stimulus {
    /// Looks up a parameter by name (spec.md §6's enumerated parameter
    /// list); `None` if this test doesn't supply it.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.iter().find(|p| p.name == name).map(|p| p.value)
    }
}

#[derive(Debug, Deserialize)]
pub struct MaterialQuantity {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@quantity")]
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct Parameter {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@value")]
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(rename = "Model", default)]
    pub models: Vec<ModelResponse>,
}

impl Response {
    pub fn model(&self, name: &str) -> Option<&ModelResponse> {
        self.models.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Deserialize)]
pub struct ModelResponse {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "Material", default)]
    pub materials: Vec<MaterialOutput>,
}

impl ModelResponse {
    pub fn kilograms_of(&self, material_name: &str) -> Option<f64> {
        self.materials.iter().find(|m| m.name == material_name).map(|m| m.kilograms)
    }
}

#[derive(Debug, Deserialize)]
pub struct MaterialOutput {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@kilograms")]
    pub kilograms: f64,
}

pub fn parse_emission_tests(xml: &str) -> Result<EmissionTests, quick_xml::DeError> {
    quick_xml::de::from_str(xml)
}

/// A small pure-component properties CSV (spec.md §6) shared by the
/// integration tests that need a populated [`des_chem::MaterialCatalog`].
pub const CATALOG_CSV: &str = "\
; pure-component properties, semicolon-prefixed comment lines are ignored
name,casNumber,classification,density_g_per_L,density_lb_per_gal,molWeight,diffusivity_air,henrys,antoineA,antoineB,antoineC,calcVP_mmHg,calcVP_psi
water,7732-18-5,solvent,1000,8.345,18.015,0.282,,8.07131,1730.63,233.426,17.5,0.34
sodium chloride,7647-14-5,salt,2165,18.07,58.443,,,,,,,
potassium hydroxide,1310-58-3,base,2044,17.06,56.106,,,,,,,
";
