// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `TernoR` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! construction-time configuration, value validation, HTTP transport, JSON
//! parsing, and device-reported conditions.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when interacting
/// with a Terneo thermostat.
#[derive(Debug, Error)]
pub enum Error {
    /// Error in the client configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during HTTP communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Condition reported by the device itself.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

/// Errors raised while constructing a client.
///
/// These are fatal and surface synchronously from the builder, before any
/// request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A username was given without a password, or vice versa.
    #[error("username and password must both be specified, if either is specified")]
    PartialCredentials,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A mode write was requested with a code the device does not accept.
    #[error("target mode must be 0 (schedule) or 1 (manual), got {0}")]
    InvalidTargetMode(u8),

    /// The device reported a mode code this library does not know.
    #[error("unknown mode code: {0}")]
    UnknownModeCode(u8),

    /// A setpoint outside the device's panel limits.
    #[error("setpoint {actual} is out of range [{min}, {max}]")]
    SetpointOutOfRange {
        /// Minimum accepted setpoint in Celsius.
        min: f32,
        /// Maximum accepted setpoint in Celsius.
        max: f32,
        /// The value that was provided.
        actual: f32,
    },
}

/// Errors related to HTTP transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device did not answer the liveness probe.
    #[error("connection to thermostat failed: {0}")]
    ConnectionFailed(String),

    /// The device rejected the configured credentials.
    #[error("authentication failed")]
    Unauthorized,
}

/// Errors related to parsing device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the status payload.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Failed to decode a specific field value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to decode.
        field: String,
        /// Description of the failure.
        message: String,
    },
}

/// Conditions reported by the device rather than the transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device answered `{"status": "timeout"}`.
    ///
    /// The embedded web server sheds load this way when requests arrive
    /// faster than it can serve them. The request may be retried after the
    /// inter-request interval has passed.
    #[error("device is busy (reported timeout)")]
    Busy,

    /// The parameter table did not contain the queried parameter id.
    #[error("parameter {0} not present in parameter table")]
    MissingParameter(u16),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
