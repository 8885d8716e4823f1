// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Physical unit constants shared by the chemistry engine and its test
//! fixtures. These are the fixed conversions named in the external
//! interfaces: the pure-component properties CSV and the emission-test
//! XML fixtures both report values in the units converted here.

/// Offset from degrees Celsius to Kelvin.
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// Kilograms per pound (avoirdupois).
pub const KG_PER_POUND: f64 = 0.453592;

/// Pascals per millimeter of mercury.
pub const PASCALS_PER_MMHG: f64 = 133.322;

/// Pascals per standard atmosphere.
pub const PASCALS_PER_ATMOSPHERE: f64 = 101325.0;

/// Liters per US gallon.
pub const LITERS_PER_GALLON: f64 = 3.7854118;

/// Cubic feet per cubic meter.
pub const CUBIC_FT_PER_CUBIC_METER: f64 = 35.314667;

/// Universal gas constant, J/(mol*K).
pub const GAS_CONSTANT: f64 = 8.314;

/// Converts a Celsius temperature to Kelvin.
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + CELSIUS_TO_KELVIN
}

/// Converts a Kelvin temperature to Celsius.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - CELSIUS_TO_KELVIN
}

/// Converts a pressure in mmHg to pascals.
pub fn mmhg_to_pascals(mmhg: f64) -> f64 {
    mmhg * PASCALS_PER_MMHG
}

/// Converts a pressure in pascals to mmHg.
pub fn pascals_to_mmhg(pascals: f64) -> f64 {
    pascals / PASCALS_PER_MMHG
}

#[cfg(test)]
#[path = "units_tests.rs"]
mod tests;
