// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Terneo command definitions.
//!
//! This module provides typed representations of the JSON bodies accepted by
//! the device's `api.cgi` endpoint. Every command carries the device serial
//! number.
//!
//! # Available Commands
//!
//! | Command | Wire body | Purpose |
//! |---------|-----------|---------|
//! | [`QueryCommand::Status`] | `{"cmd": 4, "sn": …}` | Read the full status map |
//! | [`QueryCommand::ParameterTable`] | `{"cmd": 1, "sn": …}` | Read the parameter table |
//! | [`WriteCommand`] | `{"sn": …, "par": [[id, kind, value], …]}` | Write parameters |
//!
//! # Examples
//!
//! ```
//! use ternor_lib::command::{Command, QueryCommand, WriteCommand};
//!
//! let body = QueryCommand::Status.body("A1B2C3");
//! assert_eq!(body["cmd"], 4);
//!
//! let body = WriteCommand::power(false).body("A1B2C3");
//! assert_eq!(body["par"][0][0], 125);
//! ```

pub mod param;

pub use param::Parameter;

use serde_json::{Value, json};

use crate::types::{TargetMode, TemperatureScale};

/// A command that can be POSTed to the device.
pub trait Command {
    /// Returns the JSON body for this command, with the serial number filled
    /// in.
    fn body(&self, serial: &str) -> Value;
}

/// Read-only commands addressed by numeric command code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCommand {
    /// Full status map (`cmd` 4).
    Status,
    /// Parameter table (`cmd` 1).
    ParameterTable,
}

impl QueryCommand {
    /// Returns the numeric command code sent on the wire.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::ParameterTable => 1,
            Self::Status => 4,
        }
    }
}

impl Command for QueryCommand {
    fn body(&self, serial: &str) -> Value {
        json!({ "cmd": self.code(), "sn": serial })
    }
}

/// A parameter write.
///
/// The constructors mirror the write recipes the device panel uses: mode and
/// setpoint writes prepend a power-on triple so a sleeping device wakes up
/// and applies the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteCommand {
    params: Vec<Parameter>,
}

impl WriteCommand {
    /// A write of arbitrary parameter triples.
    #[must_use]
    pub fn new(params: Vec<Parameter>) -> Self {
        Self { params }
    }

    /// Switches the heating element on or off.
    #[must_use]
    pub fn power(on: bool) -> Self {
        Self::new(vec![Parameter::power(on)])
    }

    /// Selects schedule or manual mode.
    #[must_use]
    pub fn mode(target: TargetMode) -> Self {
        Self::new(vec![Parameter::power(true), Parameter::mode(target.code())])
    }

    /// Sets the manual target temperature.
    ///
    /// Forces manual mode alongside the setpoint; a setpoint written in
    /// schedule mode would be overridden at the next schedule boundary.
    #[must_use]
    pub fn setpoint(value: f32) -> Self {
        Self::new(vec![
            Parameter::power(true),
            Parameter::mode(TargetMode::Manual.code()),
            Parameter::setpoint(TemperatureScale::encode_setpoint(value)),
        ])
    }

    /// Returns the parameter triples this write carries.
    #[must_use]
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }
}

impl Command for WriteCommand {
    fn body(&self, serial: &str) -> Value {
        json!({ "sn": serial, "par": &self.params })
    }
}
