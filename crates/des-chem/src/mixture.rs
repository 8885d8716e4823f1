// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mixture: an insertion-ordered bag of substances sharing thermal
//! equilibrium (spec.md §3, §4.4).
//!
//! `constituents` is an `indexmap::IndexMap` rather than a `HashMap` so
//! that `Display` and iteration order match insertion order, matching
//! spec.md §6's mixture string form ("...and M.MMMM kg of NAME") and the
//! `getVaporFor`/`estimatedBoilingPoint` solvers' need for a deterministic
//! constituent order across repeated calls.

use crate::error::ChemError;
use crate::ids::MixtureId;
use crate::material::{MaterialState, MaterialType};
use crate::substance::{Substance, MASS_EPSILON};
use crate::vapor;
use des_core::units::{kelvin_to_celsius, GAS_CONSTANT};
use indexmap::IndexMap;

/// The two kinds of change [`Mixture`] (and [`Substance`], via the owning
/// mixture) notify observers about (spec.md §4.4 "Observability").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Contents,
    Temperature,
}

des_core::simple_display! {
    ChangeKind {
        Contents => "contents",
        Temperature => "temperature",
    }
}

/// Number of bisection iterations for [`Mixture::estimated_boiling_point`].
/// Pinned per SPEC_FULL.md §10: the solve is monotonic and well-conditioned
/// over the bracket used here, so 60 halvings (sub-micro-Kelvin resolution)
/// is ample and keeps the method deterministic and boundable.
const BOILING_POINT_BISECTION_STEPS: u32 = 60;

/// An insertion-ordered bag of substances in thermal equilibrium.
pub struct Mixture {
    id: MixtureId,
    constituents: IndexMap<crate::ids::MaterialId, Substance>,
    suspended: bool,
    dirty_contents: bool,
    dirty_temperature: bool,
    observers: Vec<Box<dyn FnMut(ChangeKind)>>,
}

impl Default for Mixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixture {
    pub fn new() -> Self {
        Self {
            id: MixtureId::new(),
            constituents: IndexMap::new(),
            suspended: false,
            dirty_contents: false,
            dirty_temperature: false,
            observers: Vec::new(),
        }
    }

    pub fn id(&self) -> MixtureId {
        self.id
    }

    pub fn constituents(&self) -> impl Iterator<Item = &Substance> {
        self.constituents.values()
    }

    pub fn is_empty(&self) -> bool {
        self.constituents.is_empty()
    }

    pub fn get(&self, material_id: crate::ids::MaterialId) -> Option<&Substance> {
        self.constituents.get(&material_id)
    }

    /// Registers an observer fired on every unsuspended [`ChangeKind`]
    /// change (or once per kind, batched, on [`Mixture::resume_change_events`]).
    pub fn on_change(&mut self, cb: impl FnMut(ChangeKind) + 'static) {
        self.observers.push(Box::new(cb));
    }

    fn mark_dirty(&mut self, kind: ChangeKind) {
        match kind {
            ChangeKind::Contents => self.dirty_contents = true,
            ChangeKind::Temperature => self.dirty_temperature = true,
        }
        if !self.suspended {
            self.fire(kind);
            match kind {
                ChangeKind::Contents => self.dirty_contents = false,
                ChangeKind::Temperature => self.dirty_temperature = false,
            }
        }
    }

    fn fire(&mut self, kind: ChangeKind) {
        for obs in &mut self.observers {
            obs(kind);
        }
    }

    /// Batches change notifications; nothing fires until
    /// [`Mixture::resume_change_events`] (spec.md §4.4).
    pub fn suspend_change_events(&mut self) {
        self.suspended = true;
    }

    /// Resumes notifications. If `emit_pending`, fires one aggregate event
    /// per [`ChangeKind`] that changed while suspended.
    pub fn resume_change_events(&mut self, emit_pending: bool) {
        self.suspended = false;
        if emit_pending {
            if self.dirty_contents {
                self.fire(ChangeKind::Contents);
            }
            if self.dirty_temperature {
                self.fire(ChangeKind::Temperature);
            }
        }
        self.dirty_contents = false;
        self.dirty_temperature = false;
    }

    /// Merges `substance` by material type: if already present, sums mass
    /// and recomputes temperature as the mass-specific-heat-weighted
    /// average; otherwise inserts it (spec.md §4.4).
    pub fn add_material(&mut self, substance: Substance) {
        let material_id = substance.material_id();
        match self.constituents.get_mut(&material_id) {
            Some(existing) => {
                existing.merge(substance);
                self.mark_dirty(ChangeKind::Contents);
                self.mark_dirty(ChangeKind::Temperature);
            }
            None => {
                self.constituents.insert(material_id, substance);
                self.mark_dirty(ChangeKind::Contents);
            }
        }
    }

    /// Removes exact `mass` kg of `material_id` (default: all present).
    /// Fails with [`ChemError::InsufficientMass`] if more is requested
    /// than present, or [`ChemError::UnknownMaterial`] if the material
    /// isn't in the mixture at all.
    pub fn remove_material(&mut self, material_id: crate::ids::MaterialId, mass: Option<f64>) -> Result<Substance, ChemError> {
        let existing = self.constituents.get_mut(&material_id).ok_or(ChemError::UnknownMaterial(material_id))?;
        let removed = existing.remove_mass(mass)?;
        if existing.mass() <= MASS_EPSILON {
            self.constituents.shift_remove(&material_id);
        }
        self.mark_dirty(ChangeKind::Contents);
        Ok(removed)
    }

    /// Moves all amount under `from` to `to` on the substance for
    /// `material_id` (spec.md §4.4 `convertMaterialSpec`).
    pub fn convert_material_spec(&mut self, material_id: crate::ids::MaterialId, from: &str, to: &str) -> Result<(), ChemError> {
        let existing = self.constituents.get_mut(&material_id).ok_or(ChemError::UnknownMaterial(material_id))?;
        existing.convert_spec(from, to);
        self.mark_dirty(ChangeKind::Contents);
        Ok(())
    }

    /// Total mass, kg.
    pub fn mass(&self) -> f64 {
        self.constituents.values().map(Substance::mass).sum()
    }

    /// Mass-specific-heat-weighted average temperature, K (spec.md §3).
    pub fn temperature(&self) -> f64 {
        let mut num = 0.0;
        let mut den = 0.0;
        for s in self.constituents.values() {
            let thermal_mass = s.mass() * s.material().specific_heat;
            num += thermal_mass * s.temperature();
            den += thermal_mass;
        }
        if den > 0.0 {
            num / den
        } else {
            0.0
        }
    }

    /// Mass-weighted average specific heat, kJ/(kg*K) — the mixture's
    /// aggregate thermal capacity per unit mass, consulted by
    /// [`crate::ReactionProcessor`]'s temperature-adjustment step.
    pub fn specific_heat(&self) -> f64 {
        let mass = self.mass();
        if mass <= 0.0 {
            return 0.0;
        }
        self.constituents.values().map(|s| s.mass() * s.material().specific_heat).sum::<f64>() / mass
    }

    /// Total volume, m^3: `Σ mᵢ/ρᵢ`, with gas constituents contributing
    /// free-expansion volume only when no liquid constituent is present
    /// (spec.md §3) — a liquid fills the container and the gas above it
    /// occupies whatever headspace remains, which this model doesn't own;
    /// with no liquid present, the gases' nominal mass/density is the only
    /// volume estimate available.
    pub fn volume(&self) -> f64 {
        let has_liquid = self.constituents.values().any(|s| s.material().state == MaterialState::Liquid);
        self.constituents
            .values()
            .filter(|s| !(has_liquid && s.material().state == MaterialState::Gas))
            .map(|s| s.mass() / s.material().density_kg_per_m3())
            .sum()
    }

    /// Bulk density, kg/m^3.
    pub fn density(&self) -> f64 {
        let v = self.volume();
        if v > 0.0 {
            self.mass() / v
        } else {
            0.0
        }
    }

    /// Sets every constituent to the same temperature, preserving the
    /// thermal-equilibrium invariant. Used internally by
    /// [`crate::ReactionProcessor`] to apply a reaction's heat of
    /// reaction uniformly across the resulting mixture.
    pub(crate) fn set_uniform_temperature(&mut self, temperature: f64) {
        for s in self.constituents.values_mut() {
            s.set_temperature(temperature);
        }
        self.mark_dirty(ChangeKind::Temperature);
    }

    /// Total moles across every liquid constituent — the Raoult's-law
    /// mole-fraction denominator shared by [`Mixture::get_vapor_for`] and
    /// [`Mixture::estimated_boiling_point`].
    fn total_liquid_moles(&self) -> f64 {
        self.constituents
            .values()
            .filter(|s| s.material().state == MaterialState::Liquid)
            .map(|s| s.mass() / (s.material().molecular_weight / 1000.0))
            .sum()
    }

    /// Estimates the equilibrium vapor composition in a free headspace of
    /// `volume_m3` at `temperature_k`, using per-constituent Antoine
    /// coefficients under Raoult's law (partial pressure) plus the ideal
    /// gas law (`n = pV/RT`), bounded by what liquid is actually present
    /// (spec.md §4.4).
    pub fn get_vapor_for(&self, volume_m3: f64, temperature_k: f64) -> Mixture {
        let mut vapor = Mixture::new();
        let total_moles = self.total_liquid_moles();
        if total_moles <= 0.0 {
            return vapor;
        }
        for s in self.constituents.values() {
            if s.material().state != MaterialState::Liquid {
                continue;
            }
            let Some(coef) = s.material().antoine else { continue };
            let moles = s.mass() / (s.material().molecular_weight / 1000.0);
            let mole_fraction = moles / total_moles;
            let p_sat = vapor::antoine_pressure_pa(coef, temperature_k);
            let partial_pressure = mole_fraction * p_sat;
            let n_mol = partial_pressure * volume_m3 / (GAS_CONSTANT * temperature_k);
            let mass_kg = (n_mol * s.material().molecular_weight / 1000.0).min(s.mass()).max(0.0);
            if mass_kg > MASS_EPSILON {
                let gas_material = MaterialType { state: MaterialState::Gas, ..s.material().clone() };
                vapor.add_material(Substance::new(gas_material, mass_kg, temperature_k));
            }
        }
        vapor
    }

    /// Root-finds the temperature at which the liquid phase's aggregate
    /// vapor pressure (Raoult's law over Antoine-bearing constituents)
    /// equals `pressure_pa`, then adds boiling-point elevation from any
    /// dissolved solids via their solvent's ebullioscopic constant
    /// (spec.md §4.4). Fails with [`ChemError::Incalculable`] if no liquid
    /// constituent carries Antoine data.
    pub fn estimated_boiling_point(&self, pressure_pa: f64) -> Result<f64, ChemError> {
        let total_moles = self.total_liquid_moles();
        let volatiles: Vec<(f64, crate::material::AntoineCoefficients)> = self
            .constituents
            .values()
            .filter(|s| s.material().state == MaterialState::Liquid)
            .filter_map(|s| {
                s.material().antoine.map(|coef| {
                    let moles = s.mass() / (s.material().molecular_weight / 1000.0);
                    (moles / total_moles, coef)
                })
            })
            .collect();
        if volatiles.is_empty() {
            return Err(ChemError::Incalculable("no volatile liquid constituents carry Antoine data".to_string()));
        }

        let aggregate_pressure = |t_k: f64| -> f64 {
            volatiles.iter().map(|(x, coef)| x * vapor::antoine_pressure_pa(*coef, t_k)).sum()
        };

        let mut lo = des_core::units::celsius_to_kelvin(-50.0);
        let mut hi = des_core::units::celsius_to_kelvin(350.0);
        // aggregate_pressure is monotonically increasing in temperature.
        for _ in 0..BOILING_POINT_BISECTION_STEPS {
            let mid = (lo + hi) / 2.0;
            if aggregate_pressure(mid) < pressure_pa {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let base_t = (lo + hi) / 2.0;

        let solvent = self
            .constituents
            .values()
            .filter(|s| s.material().state == MaterialState::Liquid)
            .find(|s| s.material().ebullioscopic.is_some());
        let Some(solvent) = solvent else { return Ok(base_t) };
        let Some(kb) = solvent.material().ebullioscopic else { return Ok(base_t) };
        let solute_moles: f64 = self
            .constituents
            .values()
            .filter(|s| s.material().state == MaterialState::Solid)
            .map(|s| s.mass() / (s.material().molecular_weight / 1000.0))
            .sum();
        if solvent.mass() <= 0.0 || solute_moles <= 0.0 {
            return Ok(base_t);
        }
        let molality = solute_moles / solvent.mass();
        Ok(base_t + kb * molality)
    }
}

impl std::fmt::Display for Mixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mixture ({:.2} deg C) of ", kelvin_to_celsius(self.temperature()))?;
        let count = self.constituents.len();
        for (i, s) in self.constituents.values().enumerate() {
            if i > 0 {
                if i == count - 1 {
                    write!(f, " and ")?;
                } else {
                    write!(f, ", ")?;
                }
            }
            write!(f, "{:.4} kg of {}", s.mass(), s.material().name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "mixture_tests.rs"]
mod tests;
