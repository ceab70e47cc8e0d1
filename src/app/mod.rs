//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the orchestration layer of the sensor hub: the
//! service that ties registry, polling, dispatch, and metadata together,
//! plus its inbound command and outbound event types. All interaction with
//! transports and peripherals happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real hardware.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
