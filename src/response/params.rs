// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter-table response (`cmd` 1).

use serde::Deserialize;

use crate::command::Parameter;
use crate::command::param;

/// The parameter table reported by the device.
///
/// # Examples
///
/// ```
/// use ternor_lib::response::ParamTableResponse;
///
/// let table: ParamTableResponse =
///     serde_json::from_str(r#"{"par": [[125, 7, "0"], [2, 2, "1"]]}"#).unwrap();
/// assert_eq!(table.power_on(), Some(true));
/// assert_eq!(table.value_of(2), Some("1"));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ParamTableResponse {
    #[serde(default)]
    par: Vec<Parameter>,
}

impl ParamTableResponse {
    /// Returns the value of a parameter by id, if present.
    #[must_use]
    pub fn value_of(&self, id: u16) -> Option<&str> {
        self.par
            .iter()
            .find(|p| p.id() == id)
            .map(Parameter::value)
    }

    /// Decodes the power parameter: `"0"` means powered on.
    ///
    /// Returns `None` when the table does not carry parameter 125.
    #[must_use]
    pub fn power_on(&self) -> Option<bool> {
        self.value_of(param::POWER).map(|v| v == "0")
    }

    /// Returns all parameter triples.
    #[must_use]
    pub fn params(&self) -> &[Parameter] {
        &self.par
    }
}
