// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat builder.

use std::time::Duration;

use crate::client::Thermostat;
use crate::command::{Command, QueryCommand};
use crate::error::{ConfigError, Error, Result};
use crate::firmware::Firmware;
use crate::protocol::{HttpConfig, Throttle};
use crate::response::StatusResponse;
use crate::types::TemperatureScale;

/// Builder for [`Thermostat`] clients.
///
/// # Examples
///
/// ```no_run
/// use ternor_lib::Thermostat;
///
/// # async fn example() -> ternor_lib::Result<()> {
/// // Fail-fast: probes the device and detects its firmware line.
/// let thermostat = Thermostat::builder("A1B2C3D4", "192.168.1.50")
///     .with_credentials("admin", "secret")
///     .build()
///     .await?;
///
/// // No network at construction; firmware must be known or defaulted.
/// let thermostat = Thermostat::builder("A1B2C3D4", "192.168.1.50")
///     .with_firmware(ternor_lib::firmware::Firmware::modern())
///     .build_without_probe()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ThermostatBuilder {
    serial: String,
    host: String,
    port: u16,
    username: Option<String>,
    password: Option<String>,
    timeout: Duration,
    min_request_interval: Duration,
    firmware: Option<Firmware>,
    scale: Option<TemperatureScale>,
}

impl ThermostatBuilder {
    pub(crate) fn new(serial: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            host: host.into(),
            port: HttpConfig::DEFAULT_PORT,
            username: None,
            password: None,
            timeout: HttpConfig::DEFAULT_TIMEOUT,
            min_request_interval: Throttle::DEFAULT_INTERVAL,
            firmware: None,
            scale: None,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets both basic-auth credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets only the username.
    ///
    /// Must be paired with [`with_password`](Self::with_password) before
    /// building; a lone username fails validation.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets only the password.
    ///
    /// Must be paired with [`with_username`](Self::with_username) before
    /// building; a lone password fails validation.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the minimum spacing between consecutive requests.
    ///
    /// Defaults to the one second the device's embedded server needs.
    #[must_use]
    pub fn with_min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }

    /// Sets the firmware traits manually, skipping detection in
    /// [`build`](Self::build).
    #[must_use]
    pub fn with_firmware(mut self, firmware: Firmware) -> Self {
        self.firmware = Some(firmware);
        self
    }

    /// Overrides the fixed-point temperature encoding.
    ///
    /// The encoding is not discoverable from the device, so firmware lines
    /// that report hundredths need this set explicitly.
    #[must_use]
    pub fn with_temperature_scale(mut self, scale: TemperatureScale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Validates the credential pairing and produces the HTTP configuration.
    fn config(&self) -> std::result::Result<HttpConfig, ConfigError> {
        let mut config = HttpConfig::new(self.host.clone())
            .with_port(self.port)
            .with_timeout(self.timeout);

        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                config = config.with_credentials(username.clone(), password.clone());
            }
            (None, None) => {}
            _ => return Err(ConfigError::PartialCredentials),
        }

        Ok(config)
    }

    fn apply_scale(&self, firmware: Firmware) -> Firmware {
        match self.scale {
            Some(scale) => firmware.with_scale(scale),
            None => firmware,
        }
    }

    /// Builds the thermostat, verifying the device is reachable.
    ///
    /// Probes the landing page first: an unreachable device is a hard
    /// construction error, not a deferred one. Unless firmware traits were
    /// supplied, one status query then detects which firmware line the
    /// device runs.
    ///
    /// # Errors
    ///
    /// - `ConfigError::PartialCredentials` if only one credential is set.
    /// - `ProtocolError::ConnectionFailed` if the probe fails.
    /// - Any transport or parse error from the detection query.
    pub async fn build(self) -> Result<Thermostat> {
        let client = self.config()?.into_client().map_err(Error::Protocol)?;

        client.probe().await.map_err(Error::Protocol)?;

        let firmware = match self.firmware {
            Some(firmware) => firmware,
            None => {
                let body = QueryCommand::Status.body(&self.serial);
                let response = client.post(super::API_ENDPOINT, &body).await?;
                let status: StatusResponse = response.parse().map_err(Error::Parse)?;
                Firmware::from_status(&status)
            }
        };
        let firmware = self.apply_scale(firmware);

        let throttle = Throttle::new(self.min_request_interval);
        // The probe (and detection query) just hit the device; the first
        // command keeps its distance from them.
        throttle.acquire().await.complete();

        Ok(Thermostat::new(self.serial, client, firmware, throttle))
    }

    /// Builds the thermostat without touching the network.
    ///
    /// Firmware traits default to [`Firmware::legacy`], which works on
    /// every firmware line at the cost of an extra round-trip per mode
    /// read. Credential validation still applies.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::PartialCredentials` if only one credential is
    /// set, or error if the HTTP client cannot be created.
    pub fn build_without_probe(self) -> Result<Thermostat> {
        let client = self.config()?.into_client().map_err(Error::Protocol)?;
        let firmware = self.apply_scale(self.firmware.unwrap_or_default());
        let throttle = Throttle::new(self.min_request_interval);

        Ok(Thermostat::new(self.serial, client, firmware, throttle))
    }
}
