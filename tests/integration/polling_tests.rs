//! Polling sessions driven through the service layer.
//!
//! Devices are injected with the `RegisterDevice` command so each test
//! controls the exact values every tick observes.

use sensorhub::app::commands::HubCommand;
use sensorhub::app::service::HubService;
use sensorhub::device::Device;

use crate::mock_hw::{MockTimer, RecordingSink, StepSensor};

fn hub_with_sensor(scripts: Vec<Vec<Option<f32>>>) -> HubService {
    let mut hub = HubService::new();
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();
    let device = Device::new("S1", vec![], None, Box::new(StepSensor::new(scripts)));
    hub.handle_command(HubCommand::RegisterDevice(device), &mut timer, &mut sink);
    assert!(sink.events.is_empty(), "registration emits nothing");
    hub
}

#[test]
fn first_tick_reports_then_tolerance_suppresses() {
    let mut hub = hub_with_sensor(vec![
        vec![Some(10.0), Some(10.3)],
        vec![Some(20.0), Some(25.0)],
    ]);
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();

    hub.handle_command(
        HubCommand::StartPolling { freq_hz: Some(2.0) },
        &mut timer,
        &mut sink,
    );
    assert_eq!(timer.armed, Some(500));

    hub.poll_tick(&mut sink);
    assert_eq!(sink.topics(), ["sensor-data"]);
    assert_eq!(
        sink.last_json(),
        serde_json::json!({"S1-0": 10.0, "S1-1": 20.0})
    );

    // 10.3 sits inside the 5% band of 10.0; 25.0 is well outside 20.0's.
    hub.poll_tick(&mut sink);
    assert_eq!(sink.events.len(), 2);
    assert_eq!(sink.last_json(), serde_json::json!({"S1-1": 25.0}));
}

#[test]
fn quiet_ticks_emit_no_event() {
    let mut hub = hub_with_sensor(vec![vec![Some(7.0)], vec![Some(3.0)]]);
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();

    hub.handle_command(HubCommand::StartPolling { freq_hz: None }, &mut timer, &mut sink);
    hub.poll_tick(&mut sink);
    hub.poll_tick(&mut sink);
    hub.poll_tick(&mut sink);
    assert_eq!(sink.events.len(), 1, "only the first tick reports");
}

#[test]
fn stop_discards_the_cache_and_disarms() {
    let mut hub = hub_with_sensor(vec![vec![Some(7.0)]]);
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();

    hub.handle_command(HubCommand::StartPolling { freq_hz: None }, &mut timer, &mut sink);
    hub.poll_tick(&mut sink);
    assert_eq!(sink.events.len(), 1);

    hub.handle_command(HubCommand::StopPolling, &mut timer, &mut sink);
    assert_eq!(timer.disarm_calls, 1);
    assert!(!hub.is_polling());

    // No session, no package.
    hub.poll_tick(&mut sink);
    assert_eq!(sink.events.len(), 1);

    // A fresh session reports the unchanged value again.
    hub.handle_command(HubCommand::StartPolling { freq_hz: None }, &mut timer, &mut sink);
    hub.poll_tick(&mut sink);
    assert_eq!(sink.events.len(), 2);
    assert_eq!(sink.last_json(), serde_json::json!({"S1-0": 7.0}));
}

#[test]
fn start_while_running_keeps_the_session() {
    let mut hub = hub_with_sensor(vec![vec![Some(7.0)]]);
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();

    hub.handle_command(
        HubCommand::StartPolling { freq_hz: Some(2.0) },
        &mut timer,
        &mut sink,
    );
    hub.poll_tick(&mut sink);

    hub.handle_command(
        HubCommand::StartPolling { freq_hz: Some(8.0) },
        &mut timer,
        &mut sink,
    );
    assert_eq!(timer.arm_calls, 1, "timer not re-armed");
    assert_eq!(hub.poll_period_ms(), Some(500), "period unchanged");

    hub.poll_tick(&mut sink);
    assert_eq!(sink.events.len(), 1, "cache survived the second start");
}

#[test]
fn rejected_frequency_leaves_polling_stopped() {
    let mut hub = hub_with_sensor(vec![vec![Some(7.0)]]);
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();

    for bad in [0.0, -4.0, f32::NAN] {
        hub.handle_command(
            HubCommand::StartPolling { freq_hz: Some(bad) },
            &mut timer,
            &mut sink,
        );
        assert!(!hub.is_polling());
    }
    assert_eq!(timer.arm_calls, 0);
    assert!(sink.events.is_empty());
}

#[test]
fn failed_channel_reads_do_not_halt_the_sweep() {
    let mut hub = hub_with_sensor(vec![
        vec![None, Some(5.0)],
        vec![Some(20.0), Some(30.0)],
    ]);
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();

    hub.handle_command(HubCommand::StartPolling { freq_hz: None }, &mut timer, &mut sink);
    hub.poll_tick(&mut sink);
    assert_eq!(
        sink.last_json(),
        serde_json::json!({"S1-1": 20.0}),
        "healthy channel still reports"
    );

    hub.poll_tick(&mut sink);
    assert_eq!(
        sink.last_json(),
        serde_json::json!({"S1-0": 5.0, "S1-1": 30.0}),
        "failed channel recovers on the next tick"
    );
}
