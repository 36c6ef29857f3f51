// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached thermostat state.

use crate::types::Mode;

/// The last known values of a thermostat's four scalar readings.
///
/// Every field is optional: a value is `None` until a read or an
/// [`update`](crate::Thermostat::update) populates it, and cleared again only
/// by an explicit invalidation, never by a timer. A caller that keeps
/// reading without refreshing sees the same snapshot indefinitely.
///
/// # Examples
///
/// ```
/// use ternor_lib::state::ThermostatState;
/// use ternor_lib::types::Mode;
///
/// let mut state = ThermostatState::new();
/// assert!(state.is_empty());
///
/// state.set_mode(Mode::Manual);
/// assert_eq!(state.mode(), Some(Mode::Manual));
/// assert!(!state.is_complete());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThermostatState {
    temperature: Option<f32>,
    setpoint: Option<f32>,
    mode: Option<Mode>,
    relay: Option<bool>,
}

impl ThermostatState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known floor temperature in degrees Celsius.
    #[must_use]
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Caches the floor temperature.
    pub fn set_temperature(&mut self, celsius: f32) {
        self.temperature = Some(celsius);
    }

    /// Last known setpoint in degrees Celsius.
    #[must_use]
    pub fn setpoint(&self) -> Option<f32> {
        self.setpoint
    }

    /// Caches the setpoint.
    pub fn set_setpoint(&mut self, celsius: f32) {
        self.setpoint = Some(celsius);
    }

    /// Last known operating mode.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Caches the operating mode.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = Some(mode);
    }

    /// Forgets the cached operating mode.
    pub fn clear_mode(&mut self) {
        self.mode = None;
    }

    /// Last known relay state, `true` when energized.
    #[must_use]
    pub fn relay(&self) -> Option<bool> {
        self.relay
    }

    /// Caches the relay state.
    pub fn set_relay(&mut self, energized: bool) {
        self.relay = Some(energized);
    }

    /// `true` when no field has been populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.setpoint.is_none()
            && self.mode.is_none()
            && self.relay.is_none()
    }

    /// `true` when all four fields are populated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.temperature.is_some()
            && self.setpoint.is_some()
            && self.mode.is_some()
            && self.relay.is_some()
    }

    /// Clears all four fields.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
