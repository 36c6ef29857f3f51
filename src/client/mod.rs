// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level thermostat client.
//!
//! One [`Thermostat`] per physical device. Reads go through a lazy cache:
//! the first access of a property fetches a fresh status and caches the
//! decoded value; later accesses answer from the cache until
//! [`update`](Thermostat::update) or [`invalidate`](Thermostat::invalidate)
//! refreshes it. The cache never expires on its own; a caller that polls
//! without refreshing reads the same values forever.
//!
//! Every command is spaced through a shared [`Throttle`]: the device's
//! embedded web server drops requests that arrive back-to-back.

mod builder;

pub use builder::ThermostatBuilder;

use parking_lot::RwLock;

use crate::command::{Command, QueryCommand, WriteCommand, param};
use crate::error::{DeviceError, Error, Result, ValueError};
use crate::firmware::{Firmware, PowerFlagStrategy};
use crate::protocol::{DeviceResponse, HttpClient, Throttle};
use crate::response::{ParamTableResponse, StatusResponse};
use crate::state::ThermostatState;
use crate::types::{Mode, TargetMode};

/// The CGI endpoint all commands are POSTed to.
pub(crate) const API_ENDPOINT: &str = "api";

/// Client for a single Terneo thermostat.
///
/// # Creating a Thermostat
///
/// ```no_run
/// use ternor_lib::Thermostat;
///
/// # async fn example() -> ternor_lib::Result<()> {
/// let thermostat = Thermostat::builder("A1B2C3D4", "192.168.1.50")
///     .build()
///     .await?;
///
/// let celsius = thermostat.temperature().await?;
/// thermostat.set_setpoint(21.5).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Thermostat {
    serial: String,
    client: HttpClient,
    firmware: Firmware,
    throttle: Throttle,
    state: RwLock<ThermostatState>,
}

impl Thermostat {
    /// Lowest setpoint the device panel accepts, in degrees Celsius.
    pub const SETPOINT_MIN: f32 = 5.0;
    /// Highest setpoint the device panel accepts, in degrees Celsius.
    pub const SETPOINT_MAX: f32 = 45.0;

    /// Creates a builder for a thermostat.
    ///
    /// # Arguments
    ///
    /// * `serial` - The device serial number, echoed in every command body
    /// * `host` - Hostname or IP address of the device
    #[must_use]
    pub fn builder(serial: impl Into<String>, host: impl Into<String>) -> ThermostatBuilder {
        ThermostatBuilder::new(serial, host)
    }

    pub(crate) fn new(
        serial: String,
        client: HttpClient,
        firmware: Firmware,
        throttle: Throttle,
    ) -> Self {
        Self {
            serial,
            client,
            firmware,
            throttle,
            state: RwLock::new(ThermostatState::new()),
        }
    }

    /// Returns the device serial number.
    #[must_use]
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Returns the firmware traits this client was built with.
    #[must_use]
    pub fn firmware(&self) -> &Firmware {
        &self.firmware
    }

    /// Sends a command through the request throttle.
    ///
    /// The completion time is stamped whether the attempt succeeded or
    /// failed; either way the device has been hit and the next request must
    /// keep its distance.
    async fn send(&self, command: &impl Command) -> Result<DeviceResponse> {
        let body = command.body(&self.serial);
        let permit = self.throttle.acquire().await;
        let result = self.client.post(API_ENDPOINT, &body).await;
        permit.complete();
        result
    }

    // ========== Raw Queries ==========

    /// Fetches the full status map from the device.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, undecodable JSON, or when the
    /// device reports congestion.
    pub async fn status(&self) -> Result<StatusResponse> {
        let response = self.send(&QueryCommand::Status).await?;
        response.parse().map_err(Error::Parse)
    }

    /// Reads the power state from the parameter table.
    ///
    /// This is the round-trip older firmware needs for every mode read;
    /// newer firmware reports the power flag in the status payload instead.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::MissingParameter` if the table lacks the power
    /// parameter.
    pub async fn is_on(&self) -> Result<bool> {
        let response = self.send(&QueryCommand::ParameterTable).await?;
        let table: ParamTableResponse = response.parse().map_err(Error::Parse)?;
        table
            .power_on()
            .ok_or_else(|| DeviceError::MissingParameter(param::POWER).into())
    }

    /// Issues a GET against an arbitrary CGI endpoint and returns the raw
    /// response.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails at the transport level.
    pub async fn get(&self, endpoint: &str) -> Result<reqwest::Response> {
        self.client.get(endpoint).await.map_err(Error::Protocol)
    }

    // ========== Lazy Cached Readings ==========

    /// Current floor temperature in degrees Celsius.
    ///
    /// Answers from the cache when populated; otherwise fetches a fresh
    /// status and caches the decoded value.
    ///
    /// # Errors
    ///
    /// Returns error if a fetch was needed and failed. The cache is left
    /// untouched in that case.
    pub async fn temperature(&self) -> Result<f32> {
        if let Some(cached) = self.state.read().temperature() {
            return Ok(cached);
        }
        let status = self.status().await?;
        let celsius = status.temperature(self.firmware.scale)?;
        self.state.write().set_temperature(celsius);
        Ok(celsius)
    }

    /// Current setpoint in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns error if a fetch was needed and failed.
    pub async fn setpoint(&self) -> Result<f32> {
        if let Some(cached) = self.state.read().setpoint() {
            return Ok(cached);
        }
        let status = self.status().await?;
        let celsius = status.setpoint(self.firmware.scale)?;
        self.state.write().set_setpoint(celsius);
        Ok(celsius)
    }

    /// Current operating mode.
    ///
    /// A powered-off device reads as [`Mode::Off`] regardless of its
    /// schedule flag. On firmware without the status power flag this costs
    /// a second round-trip through the parameter table.
    ///
    /// # Errors
    ///
    /// Returns error if a fetch was needed and failed.
    pub async fn mode(&self) -> Result<Mode> {
        if let Some(cached) = self.state.read().mode() {
            return Ok(cached);
        }
        let status = self.status().await?;
        let mode = self.decode_mode(&status).await?;
        self.state.write().set_mode(mode);
        Ok(mode)
    }

    /// Whether the heating relay is currently energized.
    ///
    /// # Errors
    ///
    /// Returns error if a fetch was needed and failed.
    pub async fn relay_state(&self) -> Result<bool> {
        if let Some(cached) = self.state.read().relay() {
            return Ok(cached);
        }
        let status = self.status().await?;
        let energized = status.relay_closed()?;
        self.state.write().set_relay(energized);
        Ok(energized)
    }

    async fn decode_mode(&self, status: &StatusResponse) -> Result<Mode> {
        let powered_on = match self.firmware.power_flag {
            PowerFlagStrategy::StatusFlag => status.power_flag_on()?,
            PowerFlagStrategy::ParameterProbe => self.is_on().await?,
        };

        if !powered_on {
            return Ok(Mode::Off);
        }

        Mode::from_status_code(status.mode_code()?).map_err(Error::Value)
    }

    // ========== Control ==========

    /// Sets the manual target temperature.
    ///
    /// The write forces manual mode; the cached setpoint and mode are
    /// updated only after the device confirms.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::SetpointOutOfRange` for values outside the
    /// device's panel limits, without sending a request.
    pub async fn set_setpoint(&self, celsius: f32) -> Result<()> {
        if !(Self::SETPOINT_MIN..=Self::SETPOINT_MAX).contains(&celsius) {
            return Err(ValueError::SetpointOutOfRange {
                min: Self::SETPOINT_MIN,
                max: Self::SETPOINT_MAX,
                actual: celsius,
            }
            .into());
        }

        self.send(&WriteCommand::setpoint(celsius)).await?;

        let mut state = self.state.write();
        state.set_setpoint(celsius);
        state.set_mode(Mode::Manual);
        Ok(())
    }

    /// Selects schedule or manual mode.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails; the cache is updated only after
    /// the device confirms.
    pub async fn set_mode(&self, target: TargetMode) -> Result<()> {
        self.send(&WriteCommand::mode(target)).await?;
        self.state.write().set_mode(target.into());
        Ok(())
    }

    /// Powers the heating element on.
    ///
    /// The resulting mode depends on device-side configuration, so the
    /// cached mode is cleared rather than guessed.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn turn_on(&self) -> Result<()> {
        self.send(&WriteCommand::power(true)).await?;
        self.state.write().clear_mode();
        Ok(())
    }

    /// Powers the heating element off.
    ///
    /// On confirmation the cached mode is pinned to [`Mode::Off`], so a
    /// following [`mode`](Self::mode) read answers from the cache without a
    /// round-trip.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn turn_off(&self) -> Result<()> {
        self.send(&WriteCommand::power(false)).await?;
        self.state.write().set_mode(Mode::Off);
        Ok(())
    }

    // ========== Cache Management ==========

    /// Fetches a fresh status and repopulates all four cached readings
    /// atomically from it.
    ///
    /// Always issues a request, through the same throttle as every other
    /// command. The previous cache survives unchanged if any part of the
    /// refresh fails.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or if any of the four fields
    /// cannot be decoded.
    pub async fn update(&self) -> Result<ThermostatState> {
        let status = self.status().await?;

        let mut fresh = ThermostatState::new();
        fresh.set_temperature(status.temperature(self.firmware.scale)?);
        fresh.set_setpoint(status.setpoint(self.firmware.scale)?);
        fresh.set_relay(status.relay_closed()?);
        fresh.set_mode(self.decode_mode(&status).await?);

        *self.state.write() = fresh;
        Ok(fresh)
    }

    /// Returns the current cache snapshot without touching the network.
    #[must_use]
    pub fn cached(&self) -> ThermostatState {
        *self.state.read()
    }

    /// Clears all four cached readings.
    ///
    /// The next property read will fetch a fresh status.
    pub fn invalidate(&self) {
        self.state.write().clear();
    }
}
