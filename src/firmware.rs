// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware capability detection.
//!
//! The two firmware lines in the field differ in how power state is read
//! and how temperatures are encoded. Detection runs once, at construction,
//! and the selected strategy is used for every subsequent read.

use crate::response::StatusResponse;
use crate::types::TemperatureScale;

/// How a device's power state is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerFlagStrategy {
    /// Firmware 2.4 and later report the `f.16` flag in every status
    /// payload; read it directly.
    StatusFlag,
    /// Firmware 2.3 has no power flag in the status payload; power state is
    /// derived from parameter 125, costing a second round-trip.
    ParameterProbe,
}

/// Detected or configured firmware traits of a device.
///
/// # Examples
///
/// ```
/// use ternor_lib::firmware::{Firmware, PowerFlagStrategy};
///
/// let fw = Firmware::modern();
/// assert_eq!(fw.power_flag, PowerFlagStrategy::StatusFlag);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firmware {
    /// How power state is read on this firmware.
    pub power_flag: PowerFlagStrategy,
    /// Fixed-point temperature encoding.
    pub scale: TemperatureScale,
}

impl Firmware {
    /// Firmware 2.4+: power flag in the status payload.
    #[must_use]
    pub const fn modern() -> Self {
        Self {
            power_flag: PowerFlagStrategy::StatusFlag,
            scale: TemperatureScale::Sixteenths,
        }
    }

    /// Firmware 2.3: power state probed through the parameter table.
    ///
    /// Works on every firmware line at the cost of an extra round-trip per
    /// mode read, which makes it the safe default when nothing has been
    /// detected.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            power_flag: PowerFlagStrategy::ParameterProbe,
            scale: TemperatureScale::Sixteenths,
        }
    }

    /// Selects the power-flag strategy from a status payload.
    ///
    /// The temperature scale is not discoverable from the payload and stays
    /// at its default; override it with [`with_scale`](Self::with_scale).
    #[must_use]
    pub fn from_status(status: &StatusResponse) -> Self {
        let power_flag = if status.has_power_flag() {
            PowerFlagStrategy::StatusFlag
        } else {
            PowerFlagStrategy::ParameterProbe
        };

        Self {
            power_flag,
            scale: TemperatureScale::default(),
        }
    }

    /// Returns this firmware with a different temperature scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: TemperatureScale) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for Firmware {
    fn default() -> Self {
        Self::legacy()
    }
}
