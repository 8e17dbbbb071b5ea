// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the controller with a recording transport.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tuya_ir_ac::error::{ProtocolError, ResolutionError, ValueError};
use tuya_ir_ac::transport::{DeviceHandle, LearnedCodePayload, SendReply, Transport};
use tuya_ir_ac::{
    AcController, ClimateEvent, CodeTable, CommandOutcome, DeviceConfig, DeviceModel, Error,
    FanSpeed, HvacMode, ModelQuirks, StateAttributes, TableRegistry, Temperature,
};

// ============================================================================
// Recording Transport
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Record {
    Start(String),
    End(String),
}

/// Transport that records every send and replays scripted outcomes.
#[derive(Debug, Clone, Default)]
struct RecordingTransport {
    log: Arc<Mutex<Vec<Record>>>,
    payloads: Arc<Mutex<Vec<String>>>,
    outcomes: Arc<Mutex<VecDeque<Result<SendReply, ProtocolError>>>>,
    delay: Option<Duration>,
}

impl RecordingTransport {
    fn new() -> Self {
        Self::default()
    }

    fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    fn push_outcome(&self, outcome: Result<SendReply, ProtocolError>) {
        self.outcomes.lock().push_back(outcome);
    }

    /// Base64 codes sent, in order.
    fn codes(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter_map(|record| match record {
                Record::End(code) => Some(code.clone()),
                Record::Start(_) => None,
            })
            .collect()
    }

    fn payloads(&self) -> Vec<String> {
        self.payloads.lock().clone()
    }

    fn log(&self) -> Vec<Record> {
        self.log.lock().clone()
    }
}

impl Transport for RecordingTransport {
    async fn send_learned_code(
        &self,
        _handle: &DeviceHandle,
        payload: &LearnedCodePayload,
    ) -> Result<SendReply, ProtocolError> {
        let code = payload.code().to_string();
        self.log.lock().push(Record::Start(code.clone()));
        self.payloads.lock().push(payload.to_json()?);

        match self.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => {
                for _ in 0..3 {
                    tokio::task::yield_now().await;
                }
            }
        }

        self.log.lock().push(Record::End(code));
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(SendReply::ok()))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Codes are chosen so their base64 forms are easy to recognise.
const TABLE: &str = r#"{
    "off": "00FF",
    "auto": {
        "medium": { "25": "A0A0" }
    },
    "cool": {
        "medium": { "21": "C021", "22": "AABBCC", "25": "C025" },
        "high": { "22": "C122" }
    },
    "heat": {
        "low": { "28": "E028" }
    },
    "dry": {
        "low": { "24": "D024" }
    },
    "fan": { "medium": "F000" }
}"#;

fn b64(hex: &str) -> String {
    tuya_ir_ac::IrCode::from_hex(hex).unwrap().to_base64()
}

fn config() -> DeviceConfig {
    DeviceConfig::new("bf0011223344556677", "a1b2c3d4e5f6a7b8", "192.168.1.40")
        .with_name("Bedroom")
}

fn table() -> Arc<CodeTable> {
    Arc::new(CodeTable::from_json(TABLE).unwrap())
}

fn controller(transport: RecordingTransport) -> AcController<RecordingTransport> {
    AcController::builder(config(), transport)
        .build_with_table(table())
        .unwrap()
}

fn cooling_at(temp: f64) -> StateAttributes {
    StateAttributes {
        is_on: Some(true),
        mode: Some("cool".to_string()),
        fan_speed: Some("medium".to_string()),
        temp: Some(temp),
        current_temperature: None,
    }
}

// ============================================================================
// Dispatch
// ============================================================================

mod dispatch {
    use super::*;

    #[tokio::test]
    async fn cool_medium_22_sends_base64_once() {
        let transport = RecordingTransport::new();
        let controller = AcController::builder(config(), transport.clone())
            .with_restored_state(cooling_at(21.0))
            .build_with_table(table())
            .unwrap();

        controller
            .set_temperature(Temperature::new(22).unwrap())
            .await
            .unwrap();

        assert_eq!(transport.codes(), vec!["qrvM".to_string()]);
        assert_eq!(
            transport.payloads(),
            vec![r#"{"1":"study_key","7":"qrvM"}"#.to_string()]
        );
    }

    #[tokio::test]
    async fn turn_off_sends_off_code() {
        let transport = RecordingTransport::new();
        let controller = AcController::builder(config(), transport.clone())
            .with_restored_state(cooling_at(22.0))
            .build_with_table(table())
            .unwrap();

        controller.turn_off().await.unwrap();

        assert_eq!(transport.codes(), vec![b64("00FF")]);
        assert!(!controller.state().is_on());
        assert_eq!(controller.state().mode(), HvacMode::Cool);
    }

    #[tokio::test]
    async fn every_command_transmits_even_without_change() {
        let transport = RecordingTransport::new();
        let controller = controller(transport.clone());

        controller.turn_off().await.unwrap();
        controller.turn_off().await.unwrap();

        assert_eq!(transport.codes(), vec![b64("00FF"), b64("00FF")]);
    }

    #[tokio::test]
    async fn off_then_on_restores_last_settings() {
        let transport = RecordingTransport::new();
        let controller = controller(transport.clone());

        controller.set_hvac_mode(HvacMode::Cool).await.unwrap();
        controller
            .set_temperature(Temperature::new(22).unwrap())
            .await
            .unwrap();
        controller.set_fan_mode(FanSpeed::High).await.unwrap();
        let before = controller.state();

        controller.turn_off().await.unwrap();
        controller.turn_on().await.unwrap();

        assert_eq!(controller.state(), before);
        assert_eq!(transport.codes().last(), Some(&b64("C122")));
    }

    #[tokio::test]
    async fn mode_off_then_on_starts_in_auto() {
        let transport = RecordingTransport::new();
        let controller = controller(transport.clone());

        controller.set_hvac_mode_value("off").await.unwrap();
        controller.turn_on().await.unwrap();

        assert_eq!(controller.state().mode(), HvacMode::Auto);
        assert_eq!(transport.codes(), vec![b64("00FF"), b64("A0A0")]);
    }

    #[tokio::test]
    async fn heat_cool_and_fan_only_aliases() {
        let transport = RecordingTransport::new();
        let controller = controller(transport.clone());

        controller.set_hvac_mode_value("heat_cool").await.unwrap();
        assert_eq!(controller.state().mode(), HvacMode::Auto);

        controller.set_hvac_mode_value("fan_only").await.unwrap();
        assert_eq!(controller.state().mode(), HvacMode::Fan);

        assert_eq!(transport.codes(), vec![b64("A0A0"), b64("F000")]);
    }

    #[tokio::test]
    async fn out_of_range_temperature_keeps_previous() {
        let transport = RecordingTransport::new();
        let controller = AcController::builder(config(), transport.clone())
            .with_restored_state(cooling_at(22.0))
            .build_with_table(table())
            .unwrap();

        let err = controller.set_temperature_value(40.0).await.unwrap_err();
        assert!(matches!(err, Error::Value(_)));
        assert!(transport.codes().is_empty());

        controller.turn_on().await.unwrap();
        assert_eq!(controller.state().temperature().value(), 22);
        assert_eq!(transport.codes(), vec!["qrvM".to_string()]);
    }

    #[tokio::test]
    async fn fractional_temperature_is_truncated() {
        let transport = RecordingTransport::new();
        let controller = AcController::builder(config(), transport.clone())
            .with_restored_state(cooling_at(25.0))
            .build_with_table(table())
            .unwrap();

        controller.set_temperature_value(22.9).await.unwrap();

        assert_eq!(controller.state().temperature().value(), 22);
        assert_eq!(transport.codes(), vec!["qrvM".to_string()]);
    }

    #[tokio::test]
    async fn fraction_above_maximum_is_rejected() {
        let transport = RecordingTransport::new();
        let controller = AcController::builder(config(), transport.clone())
            .with_restored_state(cooling_at(22.0))
            .build_with_table(table())
            .unwrap();

        let err = controller.set_temperature_value(31.5).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Value(ValueError::InvalidTemperature { max: 31, .. })
        ));
        assert_eq!(controller.state().temperature().value(), 22);
        assert!(transport.codes().is_empty());
    }
}

// ============================================================================
// Failures
// ============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn missing_code_sends_nothing_and_keeps_state() {
        let transport = RecordingTransport::new();
        let controller = AcController::builder(config(), transport.clone())
            .with_restored_state(cooling_at(22.0))
            .build_with_table(table())
            .unwrap();
        let mut events = controller.events().subscribe();

        let err = controller
            .set_temperature(Temperature::new(30).unwrap())
            .await
            .unwrap_err();

        let Error::Resolution(resolution) = err else {
            panic!("expected a resolution error");
        };
        assert!(matches!(resolution, ResolutionError::MissingTemperature(_)));
        assert_eq!(resolution.key().to_string(), "cool.medium.30");

        assert!(transport.codes().is_empty());
        assert_eq!(controller.state().temperature().value(), 30);

        match events.try_recv().unwrap() {
            ClimateEvent::StateChanged { outcome, attributes, .. } => {
                assert!(matches!(outcome, CommandOutcome::ResolutionFailed(_)));
                assert_eq!(attributes.temp, Some(30.0));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn unsupported_mode_is_reported() {
        let transport = RecordingTransport::new();
        let controller = controller(transport.clone());

        let err = controller.set_hvac_mode(HvacMode::Heat).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Resolution(ResolutionError::UnsupportedFanSpeed(_))
        ));
        assert!(controller.state().is_on());
        assert_eq!(controller.state().mode(), HvacMode::Heat);
    }

    #[tokio::test]
    async fn device_reported_error_keeps_state() {
        let transport = RecordingTransport::new();
        transport.push_outcome(Ok(SendReply::from_result(Some(serde_json::json!({
            "Error": "Network Error: Device Unreachable"
        })))));
        let controller = controller(transport.clone());

        let err = controller.set_hvac_mode(HvacMode::Cool).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Transmission(ProtocolError::DeviceReported(ref m)) if m.contains("Unreachable")
        ));
        assert_eq!(transport.codes(), vec![b64("C025")]);
        assert!(controller.state().is_on());
        assert_eq!(controller.state().mode(), HvacMode::Cool);

        let diagnostics = controller.diagnostics();
        assert_eq!(diagnostics.sent, 0);
        assert_eq!(diagnostics.failed, 1);
        assert!(diagnostics.last_error.unwrap().contains("Unreachable"));
    }

    #[tokio::test]
    async fn failure_is_not_retried() {
        let transport = RecordingTransport::new();
        transport.push_outcome(Err(ProtocolError::ConnectionFailed(
            "connection refused".to_string(),
        )));
        let controller = controller(transport.clone());

        assert!(controller.turn_off().await.is_err());
        assert_eq!(transport.codes().len(), 1);

        controller.turn_off().await.unwrap();
        assert_eq!(transport.codes().len(), 2);

        let diagnostics = controller.diagnostics();
        assert_eq!(diagnostics.sent, 1);
        assert_eq!(diagnostics.failed, 1);
        assert_eq!(diagnostics.last_target.as_deref(), Some("off"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_send_times_out() {
        let transport = RecordingTransport::with_delay(Duration::from_secs(30));
        let controller = AcController::builder(config(), transport.clone())
            .with_send_timeout(Duration::from_millis(500))
            .build_with_table(table())
            .unwrap();

        let err = controller.turn_off().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Transmission(ProtocolError::Timeout(500))
        ));
        assert_eq!(
            transport.log(),
            vec![Record::Start(b64("00FF"))],
            "send was abandoned before it finished"
        );
    }
}

// ============================================================================
// Concurrency
// ============================================================================

mod concurrency {
    use super::*;

    #[tokio::test]
    async fn concurrent_commands_never_interleave() {
        let transport = RecordingTransport::new();
        let controller = AcController::builder(config(), transport.clone())
            .with_restored_state(cooling_at(21.0))
            .build_with_table(table())
            .unwrap();

        let (a, b, c) = tokio::join!(
            controller.set_temperature(Temperature::new(22).unwrap()),
            controller.set_fan_mode(FanSpeed::High),
            controller.turn_off(),
        );
        a.unwrap();
        b.unwrap();
        c.unwrap();

        // Lock-acquisition order: 22 at medium, then high fan, then off.
        assert_eq!(
            transport.log(),
            vec![
                Record::Start("qrvM".to_string()),
                Record::End("qrvM".to_string()),
                Record::Start(b64("C122")),
                Record::End(b64("C122")),
                Record::Start(b64("00FF")),
                Record::End(b64("00FF")),
            ]
        );
        assert!(!controller.state().is_on());
    }

    #[tokio::test]
    async fn events_follow_send_order() {
        let transport = RecordingTransport::new();
        let controller = controller(transport.clone());
        let mut events = controller.events().subscribe();

        let _ = tokio::join!(
            controller.set_hvac_mode(HvacMode::Cool),
            controller.turn_off(),
        );

        let first = events.try_recv().unwrap();
        let second = events.try_recv().unwrap();
        assert_eq!(first.attributes().unwrap().is_on, Some(true));
        assert_eq!(second.attributes().unwrap().is_on, Some(false));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn shared_controller_serializes_across_threads() {
        let transport = RecordingTransport::new();
        let controller = Arc::new(controller(transport.clone()));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let controller = Arc::clone(&controller);
            handles.push(tokio::task::spawn_blocking(move || {
                tokio::runtime::Handle::current().block_on(controller.turn_off())
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let log = transport.log();
        assert_eq!(log.len(), 8);
        for pair in log.chunks(2) {
            assert!(matches!(pair, [Record::Start(a), Record::End(b)] if a == b));
        }
    }
}

// ============================================================================
// Restore And Events
// ============================================================================

mod restore {
    use super::*;

    #[tokio::test]
    async fn restore_seeds_state_without_sending() {
        let transport = RecordingTransport::new();
        let controller = controller(transport.clone());
        let mut events = controller.events().subscribe();

        let attributes = StateAttributes::from_json(
            r#"{"internal_is_on": true, "internal_hvac_mode": "dry", "internal_fan_mode": "low", "internal_temp": 24}"#,
        )
        .unwrap();
        controller.restore(&attributes).await;

        let state = controller.state();
        assert!(state.is_on());
        assert_eq!(state.mode(), HvacMode::Dry);
        assert_eq!(state.fan_speed(), FanSpeed::Low);
        assert_eq!(state.temperature().value(), 24);
        assert!(transport.codes().is_empty());
        assert!(matches!(
            events.try_recv().unwrap(),
            ClimateEvent::Restored { .. }
        ));
    }

    #[tokio::test]
    async fn invalid_restored_values_fall_back_to_defaults() {
        let controller = controller(RecordingTransport::new());

        let attributes = StateAttributes::from_json(
            r#"{"is_on": false, "mode": "turbo", "fan_speed": "max", "temp": 45}"#,
        )
        .unwrap();
        controller.restore(&attributes).await;

        let state = controller.state();
        assert_eq!(state.mode(), HvacMode::Off);
        assert_eq!(state.fan_speed(), FanSpeed::Medium);
        assert_eq!(state.temperature(), Temperature::DEFAULT);
    }

    #[tokio::test]
    async fn attributes_round_trip_through_restore() {
        let first = controller(RecordingTransport::new());
        first.set_hvac_mode(HvacMode::Cool).await.unwrap();
        first
            .set_temperature(Temperature::new(21).unwrap())
            .await
            .unwrap();
        first.set_current_temperature(Some(26.0));

        let persisted = first.attributes().to_value().unwrap();
        assert_eq!(persisted["current_temperature"], 26.0);

        let second = controller(RecordingTransport::new());
        second
            .restore(&StateAttributes::from_value(persisted).unwrap())
            .await;
        assert_eq!(second.state(), first.state());
    }

    #[tokio::test]
    async fn state_changed_carries_attributes() {
        let controller = controller(RecordingTransport::new());
        let mut events = controller.events().subscribe();

        controller.set_hvac_mode(HvacMode::Cool).await.unwrap();

        match events.try_recv().unwrap() {
            ClimateEvent::StateChanged {
                device_id,
                attributes,
                outcome,
            } => {
                assert_eq!(device_id.as_str(), "bf0011223344556677");
                assert_eq!(attributes.mode.as_deref(), Some("cool"));
                assert_eq!(attributes.fan_speed.as_deref(), Some("medium"));
                assert_eq!(attributes.temp, Some(25.0));
                assert_eq!(outcome, CommandOutcome::Sent);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}

// ============================================================================
// Tables And Models
// ============================================================================

mod tables {
    use super::*;

    fn temp_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("tuya_ir_ac-it-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn controllers_share_lazily_loaded_table() {
        let dir = temp_dir();
        std::fs::write(dir.join("MSC-GE35VB.json"), TABLE).unwrap();
        let registry = TableRegistry::with_directory(&dir);

        let config = config().with_model(DeviceModel::MscGe35vb);
        let first = AcController::builder(config.clone(), RecordingTransport::new())
            .build(&registry)
            .unwrap();
        let second = AcController::builder(config.with_name("Office"), RecordingTransport::new())
            .build(&registry)
            .unwrap();

        assert!(Arc::ptr_eq(first.table(), second.table()));
        first.set_hvac_mode(HvacMode::Cool).await.unwrap();

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn smartir_style_table() {
        let table = CodeTable::from_json(
            r#"{
                "manufacturer": "Mitsubishi",
                "minTemperature": 16,
                "maxTemperature": 31,
                "commands": {
                    "off": "00FF",
                    "cool": { "medium": { "25": "C025" } }
                }
            }"#,
        )
        .unwrap();

        let transport = RecordingTransport::new();
        let controller = AcController::builder(config(), transport.clone())
            .build_with_table(Arc::new(table))
            .unwrap();

        controller.set_hvac_mode(HvacMode::Cool).await.unwrap();
        assert_eq!(transport.codes(), vec![b64("C025")]);
    }

    #[tokio::test]
    async fn dry_quirk_uses_low_fan_codes() {
        let transport = RecordingTransport::new();
        let controller = AcController::builder(
            config()
                .with_model(DeviceModel::custom("DRY-LOW-1"))
                .with_quirks(ModelQuirks::dry_low_fan()),
            transport.clone(),
        )
        .with_restored_state(StateAttributes {
            temp: Some(24.0),
            fan_speed: Some("high".to_string()),
            ..StateAttributes::default()
        })
        .build_with_table(table())
        .unwrap();

        controller.set_hvac_mode(HvacMode::Dry).await.unwrap();

        assert_eq!(transport.codes(), vec![b64("D024")]);
        // The believed fan speed is untouched.
        assert_eq!(controller.state().fan_speed(), FanSpeed::High);
    }

    #[tokio::test]
    async fn dry_without_quirk_needs_exact_fan() {
        let transport = RecordingTransport::new();
        let controller = AcController::builder(config(), transport.clone())
            .with_restored_state(StateAttributes {
                temp: Some(24.0),
                fan_speed: Some("high".to_string()),
                ..StateAttributes::default()
            })
            .build_with_table(table())
            .unwrap();

        let err = controller.set_hvac_mode(HvacMode::Dry).await.unwrap_err();
        assert!(matches!(err, Error::Resolution(_)));
        assert!(transport.codes().is_empty());
    }

    #[test]
    fn supported_values_follow_table() {
        let controller = controller(RecordingTransport::new());

        assert_eq!(
            controller.supported_hvac_modes(),
            vec![
                HvacMode::Off,
                HvacMode::Cool,
                HvacMode::Heat,
                HvacMode::Dry,
                HvacMode::Fan,
                HvacMode::Auto,
            ]
        );
        assert_eq!(
            controller.supported_fan_modes(),
            vec![FanSpeed::Low, FanSpeed::Medium, FanSpeed::High]
        );
        assert_eq!(controller.unique_id(), "climate Bedroom");
    }
}
