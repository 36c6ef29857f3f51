// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the device's CGI endpoints.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::{DeviceError, Error, ParseError, ProtocolError};
use crate::protocol::DeviceResponse;

/// Placeholder written over the serial number before a payload is logged.
const SERIAL_REDACTED: &str = "...filtered...";

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for a device connection.
///
/// Holds the connection parameters from which the templated base URL
/// `http://{host}:{port}` is built; endpoints append `/{endpoint}.cgi`.
/// The device only serves plain HTTP.
///
/// # Examples
///
/// ```
/// use ternor_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.50")
///     .with_port(8080)
///     .with_credentials("admin", "secret")
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.base_url(), "http://192.168.1.50:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    ///
    /// Short on purpose: the embedded server either answers quickly or not
    /// at all, and a hung request holds up the whole request pipeline.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a new configuration for the specified host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            credentials: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets basic-auth credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Creates an [`HttpClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let base_url = self.base_url();

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        let credentials = self
            .credentials
            .map(|(username, password)| Credentials { username, password });

        Ok(HttpClient {
            base_url,
            client,
            credentials,
        })
    }
}

// ============================================================================
// HttpClient - Transport over the CGI endpoints
// ============================================================================

/// HTTP client for a single device.
///
/// Stateless: each call is an independent request against
/// `{base}/{endpoint}.cgi`, with the configured basic-auth credentials
/// attached when present. No retries.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    credentials: Option<Credentials>,
}

/// HTTP basic-auth credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
}

impl HttpClient {
    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL for a CGI endpoint.
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}.cgi", self.base_url)
    }

    /// URL of the landing page used as the liveness probe target.
    ///
    /// The landing page is plain HTML, not a CGI endpoint.
    fn probe_url(&self) -> String {
        format!("{}/api.html", self.base_url)
    }

    fn attach_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        }
    }

    /// Checks that the device answers on its landing page.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ConnectionFailed` if the device is
    /// unreachable or answers with a non-success status.
    pub async fn probe(&self) -> Result<(), ProtocolError> {
        let url = self.probe_url();

        tracing::debug!(url = %url, "Probing thermostat");

        let response = self
            .attach_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ProtocolError::ConnectionFailed(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} from {url}",
                response.status().as_u16()
            )))
        }
    }

    /// Issues a GET against a CGI endpoint and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails at the transport level.
    pub async fn get(&self, endpoint: &str) -> Result<reqwest::Response, ProtocolError> {
        let url = self.endpoint_url(endpoint);

        tracing::debug!(url = %url, "Sending GET");

        self.attach_auth(self.client.get(&url))
            .send()
            .await
            .map_err(ProtocolError::Http)
    }

    /// POSTs a JSON command body to a CGI endpoint.
    ///
    /// # Errors
    ///
    /// - `ProtocolError` on transport failure or a non-success HTTP status.
    /// - `ParseError` if the response body is not JSON.
    /// - `DeviceError::Busy` if the device reports `{"status": "timeout"}`;
    ///   the serial number in the echoed command is redacted before the
    ///   congestion warning is logged.
    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<DeviceResponse, Error> {
        let url = self.endpoint_url(endpoint);

        tracing::debug!(url = %url, "Sending POST");

        let response = self
            .attach_auth(self.client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::Unauthorized.into());
        }

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            ))
            .into());
        }

        let text = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %text, "Received response");

        let decoded: Value = serde_json::from_str(&text).map_err(ParseError::Json)?;

        if decoded.get("status").and_then(Value::as_str) == Some("timeout") {
            tracing::warn!(command = %redact_serial(body), "Thermostat reported timeout");
            return Err(DeviceError::Busy.into());
        }

        Ok(DeviceResponse::new(text))
    }
}

/// Returns a copy of a command body with the serial number masked, safe for
/// logging.
fn redact_serial(body: &Value) -> Value {
    let mut copy = body.clone();
    if let Some(sn) = copy.get_mut("sn") {
        *sn = Value::String(SERIAL_REDACTED.to_string());
    }
    copy
}
