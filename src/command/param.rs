// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter-table entries.
//!
//! The thermostat exposes its configuration as a table of `[id, kind, value]`
//! triples, addressed by numeric id. Reads return the whole table (`cmd=1`);
//! writes send the triples to change.

use serde::{Deserialize, Serialize};

/// Parameter id of the mode flag (0 = schedule, 1 = manual).
pub const MODE: u16 = 2;
/// Parameter id of the manual setpoint in degrees Celsius.
pub const SETPOINT: u16 = 5;
/// Parameter id of the power switch ("0" = on, "1" = off).
pub const POWER: u16 = 125;

/// Wire type tag of the mode flag parameter.
pub const MODE_KIND: u8 = 2;
/// Wire type tag of the setpoint parameter.
pub const SETPOINT_KIND: u8 = 1;
/// Wire type tag of the power parameter.
pub const POWER_KIND: u8 = 7;

/// One `[id, kind, value]` triple of the device's parameter table.
///
/// Serializes to and from the three-element JSON array the device uses on
/// the wire.
///
/// # Examples
///
/// ```
/// use ternor_lib::command::Parameter;
///
/// let p = Parameter::power(true);
/// assert_eq!(serde_json::to_string(&p).unwrap(), r#"[125,7,"0"]"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u16, u8, String)", into = "(u16, u8, String)")]
pub struct Parameter {
    id: u16,
    kind: u8,
    value: String,
}

impl Parameter {
    /// Creates a parameter triple.
    #[must_use]
    pub fn new(id: u16, kind: u8, value: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            value: value.into(),
        }
    }

    /// The power parameter. The device's encoding is inverted: `"0"` means
    /// powered on, `"1"` means off.
    #[must_use]
    pub fn power(on: bool) -> Self {
        Self::new(POWER, POWER_KIND, if on { "0" } else { "1" })
    }

    /// The mode flag parameter.
    #[must_use]
    pub fn mode(code: u8) -> Self {
        Self::new(MODE, MODE_KIND, code.to_string())
    }

    /// The manual-setpoint parameter, value in plain Celsius.
    #[must_use]
    pub fn setpoint(value: impl Into<String>) -> Self {
        Self::new(SETPOINT, SETPOINT_KIND, value)
    }

    /// Returns the parameter id.
    #[must_use]
    pub const fn id(&self) -> u16 {
        self.id
    }

    /// Returns the wire type tag.
    #[must_use]
    pub const fn kind(&self) -> u8 {
        self.kind
    }

    /// Returns the string-encoded value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<(u16, u8, String)> for Parameter {
    fn from((id, kind, value): (u16, u8, String)) -> Self {
        Self { id, kind, value }
    }
}

impl From<Parameter> for (u16, u8, String) {
    fn from(p: Parameter) -> Self {
        (p.id, p.kind, p.value)
    }
}
