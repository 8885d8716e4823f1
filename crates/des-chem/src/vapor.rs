// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Antoine-equation vapor pressure (spec.md §4.4, GLOSSARY).
//!
//! `log10(P_sat_mmHg) = A - B/(T_C + C)`. The CSV fixture format (spec.md
//! §6) reports Antoine coefficients calibrated against mmHg and Celsius;
//! everything internal to this crate is SI (Pa, Kelvin), so the conversion
//! happens once, here, rather than scattered across every caller.

use crate::material::AntoineCoefficients;
use des_core::units::{celsius_to_kelvin, kelvin_to_celsius, mmhg_to_pascals};

/// Saturation vapor pressure in Pa at `temperature_k`.
pub fn antoine_pressure_pa(coef: AntoineCoefficients, temperature_k: f64) -> f64 {
    let t_c = kelvin_to_celsius(temperature_k);
    let log10_p_mmhg = coef.a - coef.b / (t_c + coef.c);
    mmhg_to_pascals(10f64.powf(log10_p_mmhg))
}

/// Inverts the Antoine equation: the temperature (K) at which this
/// material's saturation pressure equals `pressure_pa`, found by direct
/// algebraic inversion (the Antoine equation is monotonic and invertible
/// in closed form, unlike the multi-constituent Raoult-law solve in
/// [`crate::mixture::Mixture::estimated_boiling_point`], which has no
/// closed form and is bisected instead).
pub fn antoine_temperature_k(coef: AntoineCoefficients, pressure_pa: f64) -> f64 {
    let pressure_mmhg = pressure_pa / des_core::units::PASCALS_PER_MMHG;
    let t_c = coef.b / (coef.a - pressure_mmhg.log10()) - coef.c;
    celsius_to_kelvin(t_c)
}

#[cfg(test)]
#[path = "vapor_tests.rs"]
mod tests;
