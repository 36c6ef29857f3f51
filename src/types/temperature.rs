// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-point temperature encoding.
//!
//! The thermostat reports temperatures as fixed-point integers in numeric
//! strings; the divisor depends on the firmware line.

use crate::error::ParseError;

/// The fixed-point encoding a firmware line uses for temperature fields.
///
/// Most devices report sixteenths of a degree (`"320"` is 20.0 °C); one
/// firmware line reports hundredths (`"2000"` is 20.0 °C). The payload gives
/// no hint which encoding is in use, so the scale is chosen at construction
/// time.
///
/// # Examples
///
/// ```
/// use ternor_lib::types::TemperatureScale;
///
/// let celsius = TemperatureScale::Sixteenths.decode("t.1", "320").unwrap();
/// assert!((celsius - 20.0).abs() < f32::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemperatureScale {
    /// Raw value is sixteenths of a degree Celsius.
    #[default]
    Sixteenths,
    /// Raw value is hundredths of a degree Celsius.
    Hundredths,
}

impl TemperatureScale {
    /// Returns the divisor applied to raw field values.
    #[must_use]
    pub const fn divisor(&self) -> f32 {
        match self {
            Self::Sixteenths => 16.0,
            Self::Hundredths => 100.0,
        }
    }

    /// Decodes a raw numeric string into degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if the raw value is not numeric.
    /// The field name is only used for error reporting.
    pub fn decode(&self, field: &str, raw: &str) -> Result<f32, ParseError> {
        let value: f32 = raw.trim().parse().map_err(|_| ParseError::InvalidValue {
            field: field.to_string(),
            message: format!("not a numeric string: {raw:?}"),
        })?;
        Ok(value / self.divisor())
    }

    /// Encodes a Celsius value for a setpoint parameter write.
    ///
    /// The setpoint parameter takes the plain Celsius value as a string, not
    /// the fixed-point representation the status fields use.
    #[must_use]
    pub fn encode_setpoint(value: f32) -> String {
        value.to_string()
    }
}
