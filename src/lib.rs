// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `TernoR` Lib - A Rust library to control Terneo floor-heating thermostats.
//!
//! This library talks to a thermostat's local HTTP API: a handful of CGI
//! endpoints on the device's embedded web server. It decodes the device's
//! flat status payloads into typed readings and exposes control over
//! setpoint, mode, and power.
//!
//! # Supported Features
//!
//! - **Readings**: floor temperature, setpoint, operating mode, relay state
//! - **Control**: set target temperature, switch schedule/manual mode, power
//!   on/off
//! - **Firmware detection**: the power-flag strategy and fixed-point
//!   temperature encoding differ between firmware lines; detection runs once
//!   at construction
//! - **Request throttling**: commands are spaced out so the device's
//!   limited-capacity web server is never flooded
//!
//! # Reading values
//!
//! Readings are cached: the first access fetches a fresh status from the
//! device, later accesses answer from the cache. Call
//! [`Thermostat::update`] to refresh all readings from one response, or
//! [`Thermostat::invalidate`] to force the next read to fetch.
//!
//! # Quick Start
//!
//! ```no_run
//! use ternor_lib::Thermostat;
//!
//! #[tokio::main]
//! async fn main() -> ternor_lib::Result<()> {
//!     // Probes the device and detects its firmware line.
//!     let thermostat = Thermostat::builder("A1B2C3D4", "192.168.1.50")
//!         .build()
//!         .await?;
//!
//!     let celsius = thermostat.temperature().await?;
//!     println!("floor is at {celsius} °C");
//!
//!     thermostat.set_setpoint(21.5).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # With credentials and a known firmware line
//!
//! ```no_run
//! use ternor_lib::Thermostat;
//! use ternor_lib::firmware::Firmware;
//!
//! #[tokio::main]
//! async fn main() -> ternor_lib::Result<()> {
//!     // No construction-time network access.
//!     let thermostat = Thermostat::builder("A1B2C3D4", "192.168.1.50")
//!         .with_credentials("admin", "secret")
//!         .with_firmware(Firmware::modern())
//!         .build_without_probe()?;
//!
//!     thermostat.turn_off().await?;
//!     Ok(())
//! }
//! ```

mod client;
pub mod command;
pub mod error;
pub mod firmware;
pub mod protocol;
pub mod response;
pub mod state;
pub mod types;

pub use client::{Thermostat, ThermostatBuilder};
pub use command::{Command, Parameter, QueryCommand, WriteCommand};
pub use error::{
    ConfigError, DeviceError, Error, ParseError, ProtocolError, Result, ValueError,
};
pub use firmware::{Firmware, PowerFlagStrategy};
pub use protocol::{HttpClient, HttpConfig, Throttle};
pub use response::{ParamTableResponse, StatusResponse};
pub use state::ThermostatState;
pub use types::{Mode, TargetMode, TemperatureScale};
