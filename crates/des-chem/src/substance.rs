// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Substance: one material type at one temperature, with a scalar mass
//! and a map of named specs (spec.md §3, §4.4 "Material Specs").

use crate::error::ChemError;
use crate::ids::MaterialId;
use crate::material::MaterialType;
use indexmap::IndexMap;

/// Below this, a remaining constituent is treated as fully depleted and
/// dropped from a mixture rather than lingering as a near-zero residue.
pub(crate) const MASS_EPSILON: f64 = 1e-9;

/// One material type at one temperature (spec.md §3). `mass` is always
/// `>= 0`; `temperature` is always `>= 0` K — both are debug-asserted at
/// construction since a negative mass or sub-absolute-zero temperature is
/// a modelling bug, never a runtime condition a caller can recover from.
#[derive(Clone, Debug)]
pub struct Substance {
    material: MaterialType,
    mass: f64,
    temperature: f64,
    specs: IndexMap<String, f64>,
}

impl Substance {
    pub fn new(material: MaterialType, mass: f64, temperature: f64) -> Self {
        debug_assert!(mass >= 0.0, "Substance mass must be >= 0, got {mass}");
        debug_assert!(temperature >= 0.0, "Substance temperature must be >= 0 K, got {temperature}");
        Self { material, mass, temperature, specs: IndexMap::new() }
    }

    /// Attaches a named spec amount (e.g. `"city water"`) at construction
    /// time; chainable for fixture-building.
    pub fn with_spec(mut self, spec_id: impl Into<String>, amount_kg: f64) -> Self {
        self.specs.insert(spec_id.into(), amount_kg);
        self
    }

    pub fn material(&self) -> &MaterialType {
        &self.material
    }

    pub fn material_id(&self) -> MaterialId {
        self.material.id
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn specs(&self) -> &IndexMap<String, f64> {
        &self.specs
    }

    pub fn spec_amount(&self, spec_id: &str) -> f64 {
        self.specs.get(spec_id).copied().unwrap_or(0.0)
    }

    pub(crate) fn set_temperature(&mut self, temperature: f64) {
        debug_assert!(temperature >= 0.0, "Substance temperature must be >= 0 K, got {temperature}");
        self.temperature = temperature;
    }

    /// Merges `other` (same material) into `self`: masses sum, temperature
    /// becomes the mass-specific-heat-weighted average, and per-spec
    /// amounts sum (spec.md §4.4's `addMaterial` rule, applied once the
    /// containing [`crate::Mixture`] has already found the matching slot).
    pub(crate) fn merge(&mut self, other: Substance) {
        let cp = self.material.specific_heat;
        let thermal_mass = self.mass * cp + other.mass * cp;
        let total_mass = self.mass + other.mass;
        if thermal_mass > 0.0 {
            self.temperature =
                (self.mass * cp * self.temperature + other.mass * cp * other.temperature) / thermal_mass;
        }
        self.mass = total_mass;
        for (spec_id, amount) in other.specs {
            *self.specs.entry(spec_id).or_insert(0.0) += amount;
        }
    }

    /// Removes `requested` kg (default: all present) from `self`, returning
    /// the removed portion as its own `Substance`. Specs are removed
    /// proportionally to the fraction of mass removed (spec.md §4.4).
    pub(crate) fn remove_mass(&mut self, requested: Option<f64>) -> Result<Substance, ChemError> {
        let requested = requested.unwrap_or(self.mass);
        if requested > self.mass + MASS_EPSILON {
            return Err(ChemError::InsufficientMass {
                material: self.material.id,
                requested,
                available: self.mass,
            });
        }
        let requested = requested.min(self.mass);
        let fraction = if self.mass > MASS_EPSILON { requested / self.mass } else { 0.0 };

        let mut removed_specs = IndexMap::new();
        for (spec_id, amount) in self.specs.iter_mut() {
            let taken = *amount * fraction;
            *amount -= taken;
            removed_specs.insert(spec_id.clone(), taken);
        }
        self.specs.retain(|_, amount| *amount > MASS_EPSILON);
        self.mass -= requested;

        Ok(Substance { material: self.material.clone(), mass: requested, temperature: self.temperature, specs: removed_specs })
    }

    /// Moves all amount under `from` to `to` (spec.md §4.4
    /// `convertMaterialSpec`). A no-op if `from` carries no amount.
    pub(crate) fn convert_spec(&mut self, from: &str, to: &str) {
        if let Some(amount) = self.specs.shift_remove(from) {
            *self.specs.entry(to.to_string()).or_insert(0.0) += amount;
        }
    }
}

#[cfg(test)]
#[path = "substance_tests.rs"]
mod tests;
