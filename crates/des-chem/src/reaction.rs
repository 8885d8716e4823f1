// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reaction and ReactionProcessor: stoichiometric reaction processing over
//! a [`crate::Mixture`] (spec.md §4.5).
//!
//! A [`Reaction`] is consumed to the extent its scarcest reactant allows,
//! every time its products and reactants are all present in a watched
//! mixture; [`ReactionProcessor`] runs the full reaction set to a
//! fixpoint, applying the heat of reaction as a uniform temperature shift
//! after each step.

use crate::error::ChemError;
use crate::ids::{MixtureId, ReactionId};
use crate::material::MaterialType;
use crate::mixture::Mixture;
use crate::substance::Substance;
use std::collections::HashSet;

const FRACTION_EPSILON: f64 = 1e-6;
/// Reaction-fixpoint convergence threshold, as a fraction of total mixture
/// mass. Pinned per spec.md §9's resolved open question: "the source"
/// leaves this unspecified, so this implementation fixes it at
/// `1e-6 * totalMass` with a 100-iteration cap (spec.md §4.5).
const CONVERGENCE_EPSILON_FRACTION: f64 = 1e-6;
const MAX_ITERATIONS: usize = 100;

/// A named reaction: `reactants -> products` at fixed mass fractions, plus
/// a heat of reaction applied uniformly across the mixture's temperature
/// once the reaction fires (spec.md §4.5).
#[derive(Clone, Debug)]
pub struct Reaction {
    id: ReactionId,
    pub name: String,
    reactants: Vec<(MaterialType, f64)>,
    products: Vec<(MaterialType, f64)>,
    /// J/kg of reactant mass consumed. Positive is exothermic.
    heat_of_reaction: f64,
}

impl Reaction {
    /// Builds a reaction, validating that each side's fractions sum to
    /// `1.0` (within [`FRACTION_EPSILON`]) and that no material appears on
    /// both sides — both contract violations per spec.md §7, surfaced as
    /// [`ChemError::ReactionDefinitionError`] rather than deferred to the
    /// first time the reaction is run.
    pub fn new(
        name: impl Into<String>,
        reactants: Vec<(MaterialType, f64)>,
        products: Vec<(MaterialType, f64)>,
        heat_of_reaction: f64,
    ) -> Result<Self, ChemError> {
        let name = name.into();
        let reactant_sum: f64 = reactants.iter().map(|(_, frac)| frac).sum();
        if (reactant_sum - 1.0).abs() > FRACTION_EPSILON {
            return Err(ChemError::ReactionDefinitionError {
                name,
                reason: format!("reactant fractions sum to {reactant_sum}, not 1.0"),
            });
        }
        let product_sum: f64 = products.iter().map(|(_, frac)| frac).sum();
        if (product_sum - 1.0).abs() > FRACTION_EPSILON {
            return Err(ChemError::ReactionDefinitionError {
                name,
                reason: format!("product fractions sum to {product_sum}, not 1.0"),
            });
        }
        let reactant_ids: HashSet<_> = reactants.iter().map(|(m, _)| m.id).collect();
        if products.iter().any(|(m, _)| reactant_ids.contains(&m.id)) {
            return Err(ChemError::ReactionDefinitionError {
                name,
                reason: "a material cannot appear on both sides of a reaction".to_string(),
            });
        }
        Ok(Self { id: ReactionId::new(), name, reactants, products, heat_of_reaction })
    }

    pub fn id(&self) -> ReactionId {
        self.id
    }

    /// The extent (kg of the reaction's stoichiometric basis) this
    /// reaction can run to in `mixture` right now: the minimum, over every
    /// reactant, of mass present divided by that reactant's fraction.
    /// `None` if any reactant is entirely absent.
    fn extent(&self, mixture: &Mixture) -> Option<f64> {
        self.reactants
            .iter()
            .map(|(material, fraction)| mixture.get(material.id).map(|s| s.mass() / fraction))
            .fold(Some(f64::INFINITY), |acc, mass| match (acc, mass) {
                (Some(a), Some(m)) => Some(a.min(m)),
                _ => None,
            })
    }

    /// Consumes reactants and produces products to `extent`, then applies
    /// the heat of reaction as a uniform temperature shift across the
    /// whole mixture (spec.md §4.5).
    fn apply(&self, mixture: &mut Mixture, extent: f64) -> Result<(), ChemError> {
        let base_temperature = mixture.temperature();
        let specific_heat = mixture.specific_heat();

        for (material, fraction) in &self.reactants {
            mixture.remove_material(material.id, Some(extent * fraction))?;
        }
        for (material, fraction) in &self.products {
            mixture.add_material(Substance::new(material.clone(), extent * fraction, base_temperature));
        }

        let mass = mixture.mass();
        if mass > 0.0 && specific_heat > 0.0 {
            let delta_t = (self.heat_of_reaction * extent) / (mass * specific_heat);
            mixture.set_uniform_temperature(base_temperature + delta_t);
        }
        Ok(())
    }
}

/// One step of a reaction processing run, reported through
/// [`ReactionProcessor::on_event`] (spec.md §4.5 "Observability").
#[derive(Clone, Debug, PartialEq)]
pub enum ReactionEvent {
    GoingToHappen { reaction: String, extent: f64 },
    Happened { reaction: String, extent: f64 },
}

/// Runs a fixed set of [`Reaction`]s against whichever mixtures it has
/// been told to [`ReactionProcessor::watch`], to a fixpoint, each time
/// [`ReactionProcessor::react`] is called (spec.md §4.5).
///
/// The teacher's job pipeline wires a handler onto an event bus; this
/// crate has no event bus of its own; spec.md §9's resolved open question
/// makes the owning caller (the model facade) responsible for invoking
/// `react` immediately after any contents-mutating call to a watched
/// mixture, rather than the processor hooking the mixture's own change
/// notifications, which would alias `&mut Mixture` back into itself.
#[derive(Default)]
pub struct ReactionProcessor {
    reactions: Vec<Reaction>,
    watched: HashSet<MixtureId>,
    observers: Vec<Box<dyn FnMut(&ReactionEvent)>>,
}

impl ReactionProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reaction(&mut self, reaction: Reaction) -> ReactionId {
        let id = reaction.id();
        self.reactions.push(reaction);
        id
    }

    pub fn reactions(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.iter()
    }

    /// Marks `mixture` as one this processor should act on. A call to
    /// [`ReactionProcessor::react`] against an unwatched mixture is a no-op.
    pub fn watch(&mut self, mixture: &Mixture) {
        self.watched.insert(mixture.id());
    }

    pub fn is_watching(&self, mixture_id: MixtureId) -> bool {
        self.watched.contains(&mixture_id)
    }

    pub fn on_event(&mut self, cb: impl FnMut(&ReactionEvent) + 'static) {
        self.observers.push(Box::new(cb));
    }

    fn emit(&mut self, event: ReactionEvent) {
        for obs in &mut self.observers {
            obs(&event);
        }
    }

    /// Runs every registered reaction against `mixture` to a fixpoint: each
    /// round, every reaction whose reactants are all present applies once,
    /// at whatever extent its scarcest reactant allows; rounds repeat until
    /// none apply. A no-op, returning no events, if `mixture` isn't
    /// watched. Fails with [`ChemError::UnconvergedReaction`] if the
    /// fixpoint isn't reached within [`MAX_ITERATIONS`] rounds.
    pub fn react(&mut self, mixture: &mut Mixture) -> Result<Vec<ReactionEvent>, ChemError> {
        if !self.watched.contains(&mixture.id()) {
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        for _ in 0..MAX_ITERATIONS {
            let threshold = CONVERGENCE_EPSILON_FRACTION * mixture.mass();
            let mut any_applied = false;
            for reaction in &self.reactions {
                let Some(extent) = reaction.extent(mixture) else { continue };
                if extent < threshold {
                    continue;
                }
                tracing::debug!(reaction = %reaction.name, extent, "reaction going to happen");
                self.emit(ReactionEvent::GoingToHappen { reaction: reaction.name.clone(), extent });
                events.push(ReactionEvent::GoingToHappen { reaction: reaction.name.clone(), extent });
                reaction.apply(mixture, extent)?;
                tracing::debug!(reaction = %reaction.name, extent, "reaction happened");
                self.emit(ReactionEvent::Happened { reaction: reaction.name.clone(), extent });
                events.push(ReactionEvent::Happened { reaction: reaction.name.clone(), extent });
                any_applied = true;
            }
            if !any_applied {
                return Ok(events);
            }
        }
        tracing::warn!(max_iterations = MAX_ITERATIONS, "reaction processor failed to converge");
        Err(ChemError::UnconvergedReaction { max_iterations: MAX_ITERATIONS })
    }
}

#[cfg(test)]
#[path = "reaction_tests.rs"]
mod tests;
