//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the rules that turn sensor samples into melodies:
//! filtering, classification, pattern selection and playback orchestration.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod selector;
pub mod service;
pub mod state;
