//! Write dispatch and metadata introspection through the service layer.

use sensorhub::app::commands::HubCommand;
use sensorhub::app::service::HubService;
use sensorhub::device::Device;
use sensorhub::dispatch::{DispatchFailure, WriteRequest};
use sensorhub::drivers::sim::{SimActuator, SimSensor};

use crate::mock_hw::{MockTimer, RecordingSink};

/// One sensor and one actuator, registered in that order.
fn demo_pair() -> HubService {
    let mut hub = HubService::new();
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();
    let sensor = Device::new("meteo-1", vec![], None, Box::new(SimSensor::meteo()));
    let relay = Device::new("relay-1", vec![], None, Box::new(SimActuator::relay()));
    for device in [sensor, relay] {
        hub.handle_command(HubCommand::RegisterDevice(device), &mut timer, &mut sink);
    }
    hub
}

fn info_records(hub: &HubService) -> Vec<serde_json::Value> {
    let mut sink = RecordingSink::new();
    hub.publish_info(&mut sink);
    match sink.last_json() {
        serde_json::Value::Object(map) => map["records"]
            .as_array()
            .expect("records must be an array")
            .clone(),
        other => panic!("info payload must be an object, got {other}"),
    }
}

// ── Dispatch ──────────────────────────────────────────────────

#[test]
fn writes_flow_into_the_metadata_view() {
    let mut hub = demo_pair();
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();

    for request in [
        WriteRequest::new("relay-1-0", "On"),
        WriteRequest::with_args("relay-1-1", "SetOffset", &[0.25]),
    ] {
        hub.handle_command(HubCommand::Write(request), &mut timer, &mut sink);
    }

    let records = info_records(&hub);
    assert_eq!(records.len(), 2);
    let relay = &records[1];
    assert_eq!(relay["Type"], "actuator");
    assert_eq!(relay["IsChOn"], serde_json::json!([true, false]));
    assert_eq!(relay["Offsets"], serde_json::json!([0.0, 0.25]));
}

#[test]
fn writes_to_sensor_channels_are_refused() {
    let mut hub = demo_pair();
    assert_eq!(
        hub.execute_write(&WriteRequest::new("meteo-1-0", "On")),
        Err(DispatchFailure::UnknownCapability)
    );
}

#[test]
fn unknown_targets_and_capabilities_are_refused() {
    let mut hub = demo_pair();
    assert_eq!(
        hub.execute_write(&WriteRequest::new("pump-9-0", "On")),
        Err(DispatchFailure::UnknownChannel)
    );
    assert_eq!(
        hub.execute_write(&WriteRequest::new("relay-1-5", "On")),
        Err(DispatchFailure::UnknownChannel)
    );
    assert_eq!(
        hub.execute_write(&WriteRequest::new("relay-1-0", "noSuchMethod")),
        Err(DispatchFailure::UnknownCapability)
    );
}

#[test]
fn refused_writes_through_the_command_path_emit_nothing() {
    let mut hub = demo_pair();
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();

    hub.handle_command(
        HubCommand::Write(WriteRequest::new("relay-1-0", "selfDestruct")),
        &mut timer,
        &mut sink,
    );
    assert!(sink.events.is_empty(), "failure is logged, not published");

    let records = info_records(&hub);
    assert_eq!(
        records[1]["IsChOn"],
        serde_json::json!([false, false]),
        "no side effect on the channel state"
    );
}

// ── Metadata ──────────────────────────────────────────────────

#[test]
fn info_lists_devices_in_registration_order() {
    let hub = demo_pair();
    let records = info_records(&hub);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Name"], "meteo");
    assert_eq!(records[0]["Type"], "sensor");
    assert_eq!(records[1]["Name"], "relay");
    assert_eq!(records[1]["Type"], "actuator");
}

#[test]
fn sensor_and_actuator_records_carry_their_kind_fields() {
    let hub = demo_pair();
    let records = info_records(&hub);

    let sensor = records[0].as_object().unwrap();
    assert!(sensor.contains_key("IsChUsed"));
    assert!(sensor.contains_key("IsAvailable"));
    assert!(sensor.contains_key("TypeInSignal"));
    assert!(!sensor.contains_key("IsChOn"));

    let actuator = records[1].as_object().unwrap();
    assert!(actuator.contains_key("IsChOn"));
    assert!(actuator.contains_key("Offsets"));
    assert!(actuator.contains_key("TypeInSignals"));
    assert!(!actuator.contains_key("IsAvailable"));
}
