//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter           | Implements       | Connects to              |
//! |-------------------|------------------|--------------------------|
//! | `hardware`        | SensorPort       | ESP32 ADC1 (oneshot)     |
//! |                   | TonePort         | ESP32 LEDC PWM           |
//! |                   | DelayNs          | FreeRTOS delay           |
//! | `log_sink`        | EventSink        | Serial log output        |
//! | `override_source` | PatternOverride  | None / fixed name        |
//! | `time`            | -                | ESP32 system timer       |

pub mod hardware;
pub mod log_sink;
pub mod override_source;
pub mod time;
