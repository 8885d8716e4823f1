// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MaterialCatalog: the registry of immutable [`MaterialType`]s, plus the
//! pure-component-properties CSV loader named in spec.md §6.
//!
//! The CSV format is semicolon-comment-prefixed (handled by `csv`'s
//! built-in `comment` option rather than a hand-rolled pre-filter) and
//! carries only density/molecular-weight/Antoine/Henry data — it has no
//! column for specific heat, physical state, or the ebullioscopic
//! constant, all of which `MaterialType` needs. [`CsvOverride`] is the
//! loader-supplied side channel for those per-material fields, the same
//! role the teacher's `oj-storage` migration layer plays for schema gaps
//! between an on-disk format and the in-memory model it populates.

use crate::error::ChemError;
use crate::ids::MaterialId;
use crate::material::{AntoineCoefficients, MaterialState, MaterialType, MaterialTypeSpec};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::io::Read;

/// Per-material overrides supplied by the loader's caller for fields the
/// pure-component CSV (spec.md §6) does not carry.
#[derive(Clone, Debug, Default)]
pub struct CsvOverride {
    pub name: String,
    pub specific_heat: Option<f64>,
    pub state: Option<MaterialState>,
    pub ebullioscopic: Option<f64>,
}

impl CsvOverride {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn specific_heat(mut self, v: f64) -> Self {
        self.specific_heat = Some(v);
        self
    }

    pub fn state(mut self, v: MaterialState) -> Self {
        self.state = Some(v);
        self
    }

    pub fn ebullioscopic(mut self, v: f64) -> Self {
        self.ebullioscopic = Some(v);
        self
    }
}

#[derive(serde::Deserialize)]
struct CsvRecord {
    name: String,
    #[serde(rename = "casNumber")]
    #[allow(dead_code)]
    cas_number: String,
    classification: String,
    #[serde(rename = "density_g_per_L")]
    density_g_per_l: f64,
    #[allow(dead_code)]
    density_lb_per_gal: f64,
    #[serde(rename = "molWeight")]
    mol_weight: f64,
    #[allow(dead_code)]
    diffusivity_air: Option<f64>,
    henrys: Option<f64>,
    #[serde(rename = "antoineA")]
    antoine_a: Option<f64>,
    #[serde(rename = "antoineB")]
    antoine_b: Option<f64>,
    #[serde(rename = "antoineC")]
    antoine_c: Option<f64>,
    #[serde(rename = "calcVP_mmHg")]
    #[allow(dead_code)]
    calc_vp_mmhg: Option<f64>,
    #[serde(rename = "calcVP_psi")]
    #[allow(dead_code)]
    calc_vp_psi: Option<f64>,
}

/// Registry of every [`MaterialType`] known to a model, keyed by id and
/// by name.
#[derive(Default)]
pub struct MaterialCatalog {
    by_id: IndexMap<MaterialId, MaterialType>,
    by_name: HashMap<String, MaterialId>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a material, returning its id. Materials are immutable
    /// once registered (spec.md §3) — there is no update method.
    pub fn register(&mut self, material: MaterialType) -> MaterialId {
        let id = material.id;
        self.by_name.insert(material.name.clone(), id);
        self.by_id.insert(id, material);
        id
    }

    pub fn get(&self, id: MaterialId) -> Option<&MaterialType> {
        self.by_id.get(&id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&MaterialType> {
        self.by_name.get(name).and_then(|id| self.by_id.get(id))
    }

    pub fn require(&self, id: MaterialId) -> Result<&MaterialType, ChemError> {
        self.get(id).ok_or(ChemError::UnknownMaterial(id))
    }

    pub fn materials(&self) -> impl Iterator<Item = &MaterialType> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Loads the pure-component properties CSV (spec.md §6) from `reader`,
    /// registering one [`MaterialType`] per row. `overrides` supplies the
    /// fields the CSV doesn't carry, matched by material name; a material
    /// with no matching override falls back to [`MaterialType`]'s
    /// defaults (liquid, `specific_heat = 4.18`, no ebullioscopic
    /// constant). Blank Antoine cells mean "not volatile" per spec.md §6.
    /// Returns the ids registered, in CSV row order.
    pub fn load_csv(&mut self, reader: impl Read, overrides: &[CsvOverride]) -> Result<Vec<MaterialId>, ChemError> {
        let overrides_by_name: HashMap<&str, &CsvOverride> =
            overrides.iter().map(|o| (o.name.as_str(), o)).collect();

        let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).comment(Some(b';')).from_reader(reader);

        let mut ids = Vec::new();
        for result in csv_reader.deserialize() {
            let record: CsvRecord = result?;
            let antoine = match (record.antoine_a, record.antoine_b, record.antoine_c) {
                (Some(a), Some(b), Some(c)) => Some(AntoineCoefficients { a, b, c }),
                _ => None,
            };
            let ovr = overrides_by_name.get(record.name.as_str());
            let mut emission_tags = std::collections::HashSet::new();
            if !record.classification.trim().is_empty() {
                emission_tags.insert(record.classification.trim().to_string());
            }
            let mut builder = MaterialTypeSpec::new(record.name.clone())
                .specific_gravity(record.density_g_per_l / 1000.0)
                .molecular_weight(record.mol_weight)
                .emission_tags(emission_tags);
            if let Some(antoine) = antoine {
                builder = builder.antoine(antoine);
            }
            if let Some(henry) = record.henrys {
                builder = builder.henry(henry);
            }
            if let Some(cp) = ovr.and_then(|o| o.specific_heat) {
                builder = builder.specific_heat(cp);
            }
            if let Some(state) = ovr.and_then(|o| o.state) {
                builder = builder.state(state);
            }
            if let Some(kb) = ovr.and_then(|o| o.ebullioscopic) {
                builder = builder.ebullioscopic(kb);
            }
            let material = builder.build();
            let id = self.register(material);
            ids.push(id);
        }
        tracing::info!(count = ids.len(), "loaded pure-component properties CSV");
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
