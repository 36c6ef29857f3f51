// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating-mode types for Terneo thermostats.
//!
//! The device reports its mode through the `m.1` status field and a separate
//! power flag; it accepts mode writes through parameter 2. The two directions
//! use different code spaces, so they get different types: [`Mode`] for reads
//! and [`TargetMode`] for writes.

use std::fmt;

use crate::error::ValueError;

/// The operating mode a thermostat reports.
///
/// A powered-off device reads as [`Mode::Off`] regardless of what its
/// schedule flag says; the remaining variants map the `m.1` status codes.
///
/// # Examples
///
/// ```
/// use ternor_lib::types::Mode;
///
/// assert_eq!(Mode::from_status_code(3).unwrap(), Mode::Manual);
/// assert!(Mode::from_status_code(7).is_err());
/// assert_eq!(Mode::Off.to_string(), "off");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The heating element is powered off.
    Off,
    /// Following the programmed weekly schedule (code 0).
    Schedule,
    /// Holding a manually set target temperature (code 3).
    Manual,
    /// Away/vacation mode (code 4).
    Away,
}

impl Mode {
    /// Decodes a `m.1` status code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownModeCode` for codes no observed firmware
    /// reports.
    pub fn from_status_code(code: u8) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Schedule),
            3 => Ok(Self::Manual),
            4 => Ok(Self::Away),
            other => Err(ValueError::UnknownModeCode(other)),
        }
    }

    /// Returns `true` unless the mode is [`Mode::Off`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Schedule => "schedule",
            Self::Manual => "manual",
            Self::Away => "away",
        };
        write!(f, "{name}")
    }
}

/// The modes a thermostat accepts in a mode write.
///
/// Parameter 2 only takes `0` (schedule) or `1` (manual); the away mode can
/// be entered from the device panel but not over the API. Constructing a
/// `TargetMode` from any other code fails before a request is built, so an
/// invalid mode write never reaches the network.
///
/// # Examples
///
/// ```
/// use ternor_lib::types::TargetMode;
///
/// assert_eq!(TargetMode::from_code(1).unwrap(), TargetMode::Manual);
/// assert!(TargetMode::from_code(5).is_err());
/// assert_eq!(TargetMode::Schedule.code(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetMode {
    /// Follow the programmed weekly schedule.
    Schedule,
    /// Hold the manually set target temperature.
    Manual,
}

impl TargetMode {
    /// Creates a target mode from its wire code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidTargetMode` for anything but 0 or 1.
    pub fn from_code(code: u8) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Schedule),
            1 => Ok(Self::Manual),
            other => Err(ValueError::InvalidTargetMode(other)),
        }
    }

    /// Returns the wire code written to parameter 2.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Schedule => 0,
            Self::Manual => 1,
        }
    }
}

impl From<TargetMode> for Mode {
    fn from(target: TargetMode) -> Self {
        match target {
            TargetMode::Schedule => Self::Schedule,
            TargetMode::Manual => Self::Manual,
        }
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Schedule => "schedule",
            Self::Manual => "manual",
        };
        write!(f, "{name}")
    }
}
