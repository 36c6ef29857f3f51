// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP client using wiremock.

use std::time::Duration;

use ternor_lib::error::{ConfigError, DeviceError, Error, ProtocolError, ValueError};
use ternor_lib::firmware::{Firmware, PowerFlagStrategy};
use ternor_lib::types::{Mode, TargetMode, TemperatureScale};
use ternor_lib::Thermostat;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERIAL: &str = "A1B2C3D4";

/// Builds a thermostat against a mock server, without the construction-time
/// probe and without request spacing.
fn offline_thermostat(server: &MockServer, firmware: Firmware) -> Thermostat {
    let addr = server.address();
    Thermostat::builder(SERIAL, addr.ip().to_string())
        .with_port(addr.port())
        .with_min_request_interval(Duration::ZERO)
        .with_firmware(firmware)
        .build_without_probe()
        .unwrap()
}

fn full_status_body() -> serde_json::Value {
    serde_json::json!({
        "sn": SERIAL,
        "t.1": "320",
        "t.5": "288",
        "m.1": "3",
        "f.0": "1",
        "f.16": "0"
    })
}

async fn mount_status(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api.cgi"))
        .and(body_partial_json(serde_json::json!({ "cmd": 4 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Construction Tests
// ============================================================================

mod construction {
    use super::*;

    #[tokio::test]
    async fn username_without_password_fails_before_any_request() {
        // Port 1 is not listening; a connection attempt would fail with a
        // transport error, so a Config error proves validation came first.
        let result = Thermostat::builder(SERIAL, "127.0.0.1")
            .with_port(1)
            .with_username("admin")
            .build()
            .await;

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::PartialCredentials))
        ));
    }

    #[tokio::test]
    async fn unreachable_host_fails_fast() {
        let result = Thermostat::builder(SERIAL, "127.0.0.1")
            .with_port(59999)
            .build()
            .await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::ConnectionFailed(_)))
        ));
    }

    #[tokio::test]
    async fn probe_failure_status_fails_construction() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api.html"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let addr = mock_server.address();
        let result = Thermostat::builder(SERIAL, addr.ip().to_string())
            .with_port(addr.port())
            .build()
            .await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::ConnectionFailed(_)))
        ));
    }

    #[tokio::test]
    async fn build_detects_modern_firmware() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;
        mount_status(&mock_server, full_status_body()).await;

        let addr = mock_server.address();
        let thermostat = Thermostat::builder(SERIAL, addr.ip().to_string())
            .with_port(addr.port())
            .build()
            .await
            .unwrap();

        assert_eq!(
            thermostat.firmware().power_flag,
            PowerFlagStrategy::StatusFlag
        );
    }

    #[tokio::test]
    async fn build_detects_legacy_firmware() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;
        // No f.16 in the payload.
        mount_status(
            &mock_server,
            serde_json::json!({ "t.1": "320", "t.5": "288", "m.1": "0", "f.0": "0" }),
        )
        .await;

        let addr = mock_server.address();
        let thermostat = Thermostat::builder(SERIAL, addr.ip().to_string())
            .with_port(addr.port())
            .build()
            .await
            .unwrap();

        assert_eq!(
            thermostat.firmware().power_flag,
            PowerFlagStrategy::ParameterProbe
        );
    }
}

// ============================================================================
// Reading Tests
// ============================================================================

mod readings {
    use super::*;

    #[tokio::test]
    async fn decodes_sixteenth_degree_fields() {
        let mock_server = MockServer::start().await;
        mount_status(&mock_server, full_status_body()).await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());

        let temperature = thermostat.temperature().await.unwrap();
        let setpoint = thermostat.setpoint().await.unwrap();
        let relay = thermostat.relay_state().await.unwrap();

        assert!((temperature - 20.0).abs() < f32::EPSILON);
        assert!((setpoint - 18.0).abs() < f32::EPSILON);
        assert!(relay);
    }

    #[tokio::test]
    async fn decodes_hundredth_degree_fields() {
        let mock_server = MockServer::start().await;
        mount_status(
            &mock_server,
            serde_json::json!({ "t.1": "2000", "t.5": "1850", "m.1": "3", "f.0": "0", "f.16": "0" }),
        )
        .await;

        let thermostat = offline_thermostat(
            &mock_server,
            Firmware::modern().with_scale(TemperatureScale::Hundredths),
        );

        let temperature = thermostat.temperature().await.unwrap();
        let setpoint = thermostat.setpoint().await.unwrap();

        assert!((temperature - 20.0).abs() < f32::EPSILON);
        assert!((setpoint - 18.5).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn second_read_answers_from_cache() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .and(body_partial_json(serde_json::json!({ "cmd": 4 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(full_status_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());

        let first = thermostat.temperature().await.unwrap();
        let second = thermostat.temperature().await.unwrap();
        assert!((first - second).abs() < f32::EPSILON);

        mock_server.verify().await;
    }

    #[tokio::test]
    async fn mode_on_modern_firmware_uses_status_flag() {
        let mock_server = MockServer::start().await;
        mount_status(&mock_server, full_status_body()).await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        assert_eq!(thermostat.mode().await.unwrap(), Mode::Manual);
    }

    #[tokio::test]
    async fn mode_on_powered_off_device_is_off() {
        let mock_server = MockServer::start().await;
        mount_status(
            &mock_server,
            serde_json::json!({ "t.1": "320", "t.5": "288", "m.1": "3", "f.0": "0", "f.16": "1" }),
        )
        .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        assert_eq!(thermostat.mode().await.unwrap(), Mode::Off);
    }

    #[tokio::test]
    async fn mode_on_legacy_firmware_probes_parameter_table() {
        let mock_server = MockServer::start().await;
        mount_status(
            &mock_server,
            serde_json::json!({ "t.1": "320", "t.5": "288", "m.1": "0", "f.0": "1" }),
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .and(body_partial_json(serde_json::json!({ "cmd": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "par": [[114, 0, "2"], [125, 7, "0"]]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::legacy());
        assert_eq!(thermostat.mode().await.unwrap(), Mode::Schedule);

        mock_server.verify().await;
    }

    #[tokio::test]
    async fn is_on_without_power_parameter_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .and(body_partial_json(serde_json::json!({ "cmd": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "par": [[114, 0, "2"]]
            })))
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::legacy());
        let result = thermostat.is_on().await;

        assert!(matches!(
            result,
            Err(Error::Device(DeviceError::MissingParameter(125)))
        ));
    }
}

// ============================================================================
// Control Tests
// ============================================================================

mod control {
    use super::*;

    #[tokio::test]
    async fn set_setpoint_sends_write_and_caches_after_confirmation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .and(body_partial_json(serde_json::json!({
                "sn": SERIAL,
                "par": [[125, 7, "0"], [2, 2, "1"], [5, 1, "21.5"]]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sn": SERIAL
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        assert_eq!(thermostat.cached().setpoint(), None);

        thermostat.set_setpoint(21.5).await.unwrap();

        assert_eq!(thermostat.cached().setpoint(), Some(21.5));
        assert_eq!(thermostat.cached().mode(), Some(Mode::Manual));

        mock_server.verify().await;
    }

    #[tokio::test]
    async fn failed_setpoint_write_leaves_cache_untouched() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        let result = thermostat.set_setpoint(21.5).await;

        assert!(result.is_err());
        assert_eq!(thermostat.cached().setpoint(), None);
    }

    #[tokio::test]
    async fn out_of_range_setpoint_is_rejected_locally() {
        let mock_server = MockServer::start().await;
        // No mocks mounted: a request would come back as an error of a
        // different kind.
        let thermostat = offline_thermostat(&mock_server, Firmware::modern());

        let result = thermostat.set_setpoint(60.0).await;

        assert!(matches!(
            result,
            Err(Error::Value(ValueError::SetpointOutOfRange { .. }))
        ));
    }

    #[tokio::test]
    async fn set_mode_sends_mode_flag_write() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .and(body_partial_json(serde_json::json!({
                "par": [[125, 7, "0"], [2, 2, "0"]]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sn": SERIAL
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        thermostat.set_mode(TargetMode::Schedule).await.unwrap();

        assert_eq!(thermostat.cached().mode(), Some(Mode::Schedule));

        mock_server.verify().await;
    }

    #[test]
    fn target_mode_rejects_invalid_codes_without_a_client() {
        assert!(matches!(
            TargetMode::from_code(5),
            Err(ValueError::InvalidTargetMode(5))
        ));
    }

    #[tokio::test]
    async fn turn_off_pins_cached_mode_without_a_new_request() {
        let mock_server = MockServer::start().await;

        // Only the power write is mocked; a status query would 404 and fail
        // the mode read below.
        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .and(body_partial_json(serde_json::json!({
                "par": [[125, 7, "1"]]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sn": SERIAL
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        thermostat.turn_off().await.unwrap();

        assert_eq!(thermostat.mode().await.unwrap(), Mode::Off);

        mock_server.verify().await;
    }

    #[tokio::test]
    async fn turn_on_clears_cached_mode() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .and(body_partial_json(serde_json::json!({
                "par": [[125, 7, "1"]]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sn": SERIAL
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .and(body_partial_json(serde_json::json!({
                "par": [[125, 7, "0"]]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sn": SERIAL
            })))
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        thermostat.turn_off().await.unwrap();
        assert_eq!(thermostat.cached().mode(), Some(Mode::Off));

        thermostat.turn_on().await.unwrap();
        assert_eq!(thermostat.cached().mode(), None);
    }
}

// ============================================================================
// Cache Refresh Tests
// ============================================================================

mod cache_refresh {
    use super::*;

    #[tokio::test]
    async fn update_populates_all_four_readings() {
        let mock_server = MockServer::start().await;
        mount_status(&mock_server, full_status_body()).await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        let state = thermostat.update().await.unwrap();

        assert!(state.is_complete());
        assert_eq!(state.mode(), Some(Mode::Manual));
        assert_eq!(state.relay(), Some(true));
    }

    #[tokio::test]
    async fn update_overwrites_previously_cached_values() {
        let mock_server = MockServer::start().await;
        mount_status(&mock_server, full_status_body()).await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        thermostat.update().await.unwrap();

        // The device has moved on; a fresh update must replace every field.
        mock_server.reset().await;
        mount_status(
            &mock_server,
            serde_json::json!({ "t.1": "352", "t.5": "304", "m.1": "0", "f.0": "0", "f.16": "0" }),
        )
        .await;

        let state = thermostat.update().await.unwrap();

        assert!((state.temperature().unwrap() - 22.0).abs() < f32::EPSILON);
        assert!((state.setpoint().unwrap() - 19.0).abs() < f32::EPSILON);
        assert_eq!(state.mode(), Some(Mode::Schedule));
        assert_eq!(state.relay(), Some(false));
    }

    #[tokio::test]
    async fn failed_update_keeps_previous_snapshot() {
        let mock_server = MockServer::start().await;
        mount_status(&mock_server, full_status_body()).await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        let before = thermostat.update().await.unwrap();

        mock_server.reset().await;
        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        assert!(thermostat.update().await.is_err());
        assert_eq!(thermostat.cached(), before);
    }

    #[tokio::test]
    async fn invalidate_forces_a_fresh_fetch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .and(body_partial_json(serde_json::json!({ "cmd": 4 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(full_status_body()))
            .expect(2)
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        thermostat.temperature().await.unwrap();
        thermostat.invalidate();
        thermostat.temperature().await.unwrap();

        mock_server.verify().await;
    }
}

// ============================================================================
// Throttling Tests
// ============================================================================

mod throttling {
    use super::*;

    #[tokio::test]
    async fn consecutive_commands_are_spaced_apart() {
        let mock_server = MockServer::start().await;
        mount_status(&mock_server, full_status_body()).await;

        let addr = mock_server.address();
        let thermostat = Thermostat::builder(SERIAL, addr.ip().to_string())
            .with_port(addr.port())
            .with_min_request_interval(Duration::from_millis(300))
            .with_firmware(Firmware::modern())
            .build_without_probe()
            .unwrap();

        let start = std::time::Instant::now();
        thermostat.status().await.unwrap();
        thermostat.status().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[tokio::test]
    async fn device_reported_timeout_is_busy() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sn": SERIAL,
                "status": "timeout"
            })))
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        let result = thermostat.status().await;

        assert!(matches!(result, Err(Error::Device(DeviceError::Busy))));
    }

    #[tokio::test]
    async fn handles_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        assert!(thermostat.status().await.is_err());
    }

    #[tokio::test]
    async fn handles_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        let result = thermostat.status().await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::Unauthorized))
        ));
    }

    #[tokio::test]
    async fn handles_invalid_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        let result = thermostat.status().await;

        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn failed_read_leaves_cache_unset() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.cgi"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let thermostat = offline_thermostat(&mock_server, Firmware::modern());
        assert!(thermostat.temperature().await.is_err());
        assert!(thermostat.cached().is_empty());
    }
}
