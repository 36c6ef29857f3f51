// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP plumbing for talking to the device.
//!
//! The device's embedded web server speaks plain HTTP against a fixed set of
//! CGI endpoints. [`HttpClient`] wraps the transport; [`Throttle`] enforces
//! the minimum spacing between requests that the limited-capacity server
//! needs.

mod http;
mod throttle;

pub use http::{Credentials, HttpClient, HttpConfig};
pub use throttle::{Throttle, ThrottlePermit};

/// Response from a device command.
#[derive(Debug, Clone)]
pub struct DeviceResponse {
    /// The raw JSON response body.
    body: String,
}

impl DeviceResponse {
    /// Creates a new response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw JSON response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, crate::error::ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}
