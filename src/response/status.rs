// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status response (`cmd` 4).
//!
//! The device answers with a flat JSON map of dotted field keys to
//! string-encoded values, e.g. `{"t.1": "320", "m.1": "3", "f.0": "1"}`.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::types::TemperatureScale;

/// Field keys of the status map.
pub mod key {
    /// Floor temperature sensor, fixed-point Celsius.
    pub const TEMPERATURE: &str = "t.1";
    /// Current setpoint, fixed-point Celsius.
    pub const SETPOINT: &str = "t.5";
    /// Operating mode code.
    pub const MODE: &str = "m.1";
    /// Relay state flag, "1" when the heating element is energized.
    pub const RELAY: &str = "f.0";
    /// Power flag, "0" when powered on. Only present from firmware 2.4.
    pub const POWER_FLAG: &str = "f.16";
}

/// The decoded status map.
///
/// Values are kept raw; the typed accessors decode on demand. Fields the
/// firmware does not report simply stay absent; only
/// [`power_flag_on`](Self::power_flag_on) treats absence as something other
/// than an error, because its presence is what distinguishes the firmware
/// lines.
///
/// # Examples
///
/// ```
/// use ternor_lib::response::StatusResponse;
/// use ternor_lib::types::TemperatureScale;
///
/// let status: StatusResponse =
///     serde_json::from_str(r#"{"t.1": "320", "f.0": "1"}"#).unwrap();
/// let celsius = status.temperature(TemperatureScale::Sixteenths).unwrap();
/// assert!((celsius - 20.0).abs() < f32::EPSILON);
/// assert!(status.relay_closed().unwrap());
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct StatusResponse {
    fields: BTreeMap<String, Value>,
}

impl StatusResponse {
    /// Returns a raw field as a string, if present.
    ///
    /// Numeric values are tolerated and formatted back to their string form,
    /// since some firmware builds drop the quoting on individual fields.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn required_field(&self, key: &str) -> Result<String, ParseError> {
        self.field(key)
            .ok_or_else(|| ParseError::MissingField(key.to_string()))
    }

    /// Decodes the floor temperature in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns error if the field is absent or not numeric.
    pub fn temperature(&self, scale: TemperatureScale) -> Result<f32, ParseError> {
        let raw = self.required_field(key::TEMPERATURE)?;
        scale.decode(key::TEMPERATURE, &raw)
    }

    /// Decodes the current setpoint in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns error if the field is absent or not numeric.
    pub fn setpoint(&self, scale: TemperatureScale) -> Result<f32, ParseError> {
        let raw = self.required_field(key::SETPOINT)?;
        scale.decode(key::SETPOINT, &raw)
    }

    /// Decodes the raw mode code.
    ///
    /// # Errors
    ///
    /// Returns error if the field is absent or not a small integer.
    pub fn mode_code(&self) -> Result<u8, ParseError> {
        let raw = self.required_field(key::MODE)?;
        raw.trim().parse().map_err(|_| ParseError::InvalidValue {
            field: key::MODE.to_string(),
            message: format!("not a mode code: {raw:?}"),
        })
    }

    /// Whether the relay is currently energized.
    ///
    /// # Errors
    ///
    /// Returns error if the field is absent.
    pub fn relay_closed(&self) -> Result<bool, ParseError> {
        let raw = self.required_field(key::RELAY)?;
        Ok(raw.trim() == "1")
    }

    /// Whether this payload carries the firmware-2.4 power flag.
    #[must_use]
    pub fn has_power_flag(&self) -> bool {
        self.fields.contains_key(key::POWER_FLAG)
    }

    /// Decodes the power flag: `"0"` means powered on.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` on firmware that predates the
    /// flag.
    pub fn power_flag_on(&self) -> Result<bool, ParseError> {
        let raw = self.required_field(key::POWER_FLAG)?;
        Ok(raw.trim() == "0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(json: &str) -> StatusResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decodes_temperature_and_setpoint() {
        let s = status(r#"{"t.1": "320", "t.5": "288"}"#);
        let t = s.temperature(TemperatureScale::Sixteenths).unwrap();
        let sp = s.setpoint(TemperatureScale::Sixteenths).unwrap();
        assert!((t - 20.0).abs() < f32::EPSILON);
        assert!((sp - 18.0).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_temperature_is_missing_field() {
        let s = status(r#"{"t.5": "288"}"#);
        let result = s.temperature(TemperatureScale::Sixteenths);
        assert!(matches!(
            result,
            Err(ParseError::MissingField(f)) if f == "t.1"
        ));
    }

    #[test]
    fn tolerates_unquoted_numbers() {
        let s = status(r#"{"t.1": 320, "m.1": 3}"#);
        let t = s.temperature(TemperatureScale::Sixteenths).unwrap();
        assert!((t - 20.0).abs() < f32::EPSILON);
        assert_eq!(s.mode_code().unwrap(), 3);
    }

    #[test]
    fn mode_code() {
        let s = status(r#"{"m.1": "3"}"#);
        assert_eq!(s.mode_code().unwrap(), 3);
    }

    #[test]
    fn mode_code_garbage_is_invalid_value() {
        let s = status(r#"{"m.1": "auto"}"#);
        assert!(matches!(
            s.mode_code(),
            Err(ParseError::InvalidValue { field, .. }) if field == "m.1"
        ));
    }

    #[test]
    fn relay_flag() {
        assert!(status(r#"{"f.0": "1"}"#).relay_closed().unwrap());
        assert!(!status(r#"{"f.0": "0"}"#).relay_closed().unwrap());
    }

    #[test]
    fn power_flag_presence() {
        let modern = status(r#"{"f.16": "0"}"#);
        assert!(modern.has_power_flag());
        assert!(modern.power_flag_on().unwrap());

        let off = status(r#"{"f.16": "1"}"#);
        assert!(!off.power_flag_on().unwrap());

        let legacy = status(r#"{"t.1": "320"}"#);
        assert!(!legacy.has_power_flag());
        assert!(legacy.power_flag_on().is_err());
    }

    #[test]
    fn ignores_unknown_fields() {
        let s = status(r#"{"sn": "A1B2C3", "t.1": "320", "u.99": "7"}"#);
        assert!(s.temperature(TemperatureScale::Sixteenths).is_ok());
        assert_eq!(s.field("u.99").as_deref(), Some("7"));
    }
}
