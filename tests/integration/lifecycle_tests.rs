//! Bus provisioning and device creation through the service layer.
//!
//! Exercises the full bring-up path — config source → pin resolution →
//! bus provisioning → driver load → registration — with the simulation
//! adapters standing in for real hardware.

use std::collections::BTreeMap;

use sensorhub::adapters::board_pins::BoardPinMap;
use sensorhub::adapters::sim_bus::SimBusDriver;
use sensorhub::adapters::static_config::StaticConfig;
use sensorhub::app::service::HubService;
use sensorhub::config::{CreateOptions, DeviceConfig, HubConfig};
use sensorhub::drivers::sim::SimCatalog;
use sensorhub::{ConfigError, Error, ModuleLoadError, ValidationError};

fn demo_hub() -> (HubService, StaticConfig, SimBusDriver) {
    let config = StaticConfig::demo();
    let mut buses = SimBusDriver::new();
    let mut hub = HubService::new();
    hub.init_buses(&config, &BoardPinMap, &mut buses)
        .expect("demo buses must provision");
    (hub, config, buses)
}

/// Config with only bus-less relay devices, one entry per `(id, pins)` pair.
fn relay_only_config(devices: &[(&str, &[&str])]) -> StaticConfig {
    let devices: BTreeMap<String, DeviceConfig> = devices
        .iter()
        .map(|(id, pins)| {
            let cfg = DeviceConfig {
                driver: "relay".into(),
                bus: None,
                pins: pins.iter().map(|p| (*p).into()).collect(),
            };
            ((*id).into(), cfg)
        })
        .collect();
    StaticConfig::new(HubConfig {
        buses: vec![],
        devices,
    })
}

// ── Demo bring-up ─────────────────────────────────────────────

#[test]
fn demo_bring_up_provisions_buses_and_devices() {
    let (mut hub, config, buses) = demo_hub();
    assert_eq!(buses.provisioned().len(), 2, "I2C1 + UART2");

    let opts = CreateOptions::default();
    let channels = hub
        .create_device("meteo-1", &opts, &config, &BoardPinMap, &SimCatalog)
        .unwrap();
    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0].as_str(), "meteo-1-0");
    assert_eq!(channels[1].as_str(), "meteo-1-1");

    let channels = hub
        .create_device("relay-1", &opts, &config, &BoardPinMap, &SimCatalog)
        .unwrap();
    assert_eq!(channels.len(), 2);
    assert_eq!(hub.registry().len(), 2);
}

#[test]
fn second_create_of_the_same_id_is_refused() {
    let (mut hub, config, _buses) = demo_hub();
    let opts = CreateOptions::default();
    hub.create_device("meteo-1", &opts, &config, &BoardPinMap, &SimCatalog)
        .unwrap();

    let err = hub
        .create_device("meteo-1", &opts, &config, &BoardPinMap, &SimCatalog)
        .unwrap_err();
    assert_eq!(err, Error::Validation(ValidationError::DuplicateId));
    assert_eq!(hub.registry().len(), 1, "registry unchanged");
}

#[test]
fn unknown_device_id_is_refused() {
    let (mut hub, config, _buses) = demo_hub();
    let err = hub
        .create_device(
            "toaster-9",
            &CreateOptions::default(),
            &config,
            &BoardPinMap,
            &SimCatalog,
        )
        .unwrap_err();
    assert_eq!(err, Error::Config(ConfigError::DeviceNotFound));
}

// ── Factory gates through custom configs ──────────────────────

#[test]
fn devices_cannot_share_pins() {
    let config = relay_only_config(&[("valve-1", &["D2", "D3"]), ("valve-2", &["D3"])]);
    let mut hub = HubService::new();
    let opts = CreateOptions::default();

    hub.create_device("valve-1", &opts, &config, &BoardPinMap, &SimCatalog)
        .unwrap();
    let err = hub
        .create_device("valve-2", &opts, &config, &BoardPinMap, &SimCatalog)
        .unwrap_err();
    assert_eq!(err, Error::Validation(ValidationError::PinsUnavailable));
    assert_eq!(hub.registry().len(), 1);
}

#[test]
fn device_on_an_undeclared_bus_is_refused() {
    let mut devices = BTreeMap::new();
    devices.insert(
        "meteo-1".into(),
        DeviceConfig {
            driver: "meteo".into(),
            bus: Some("SPI9".into()),
            pins: vec![],
        },
    );
    let config = StaticConfig::new(HubConfig {
        buses: vec![],
        devices,
    });

    let mut hub = HubService::new();
    let err = hub
        .create_device(
            "meteo-1",
            &CreateOptions::default(),
            &config,
            &BoardPinMap,
            &SimCatalog,
        )
        .unwrap_err();
    assert_eq!(err, Error::Config(ConfigError::BusNotFound));
}

#[test]
fn unsupported_driver_variant_is_refused_before_registration() {
    let (mut hub, config, _buses) = demo_hub();
    let opts = CreateOptions {
        module_variant: Some(9),
    };
    let err = hub
        .create_device("meteo-1", &opts, &config, &BoardPinMap, &SimCatalog)
        .unwrap_err();
    assert_eq!(err, Error::ModuleLoad(ModuleLoadError::UnsupportedVariant));
    assert!(hub.registry().is_empty());

    // The same id still creates cleanly afterwards.
    hub.create_device(
        "meteo-1",
        &CreateOptions::default(),
        &config,
        &BoardPinMap,
        &SimCatalog,
    )
    .unwrap();
}

#[test]
fn failed_create_does_not_claim_pins() {
    // valve-2 trips on its second, unknown pin descriptor; its first pin
    // must stay free for valve-3.
    let config = relay_only_config(&[
        ("valve-1", &["D2"]),
        ("valve-2", &["D3", "NOT-A-PIN"]),
        ("valve-3", &["D3"]),
    ]);
    let mut hub = HubService::new();
    let opts = CreateOptions::default();

    hub.create_device("valve-1", &opts, &config, &BoardPinMap, &SimCatalog)
        .unwrap();
    assert!(
        hub.create_device("valve-2", &opts, &config, &BoardPinMap, &SimCatalog)
            .is_err()
    );
    hub.create_device("valve-3", &opts, &config, &BoardPinMap, &SimCatalog)
        .unwrap();
    assert_eq!(hub.registry().len(), 2);
}
