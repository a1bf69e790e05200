//! # Vision Engine — Device Simulation Core
//!
//! Simulates telemetry for a fixed fleet of ten smart-home devices and
//! raises time-windowed notifications from that synthetic telemetry.
//!
//! Per tick (driven externally, see [`VisionEngine::advance_tick`]):
//! - **state_updater** — one stochastic transition per shielded device
//! - **log_rotator** — one append to each of three bounded log channels
//! - **predictive** — failure probability + predicted maintenance date
//! - **scheduler** — hourly / half-hourly notification windows
//!
//! The registry is mutated under a single write lock per tick, so query
//! callers always observe a consistent post-tick snapshot.

pub mod charts;
pub mod commands;
pub mod device;
pub mod engine;
pub mod error;
pub mod log_rotator;
pub mod predictive;
pub mod recording;
pub mod registry;
pub mod report;
pub mod scheduler;
pub mod state_updater;
pub mod types;

pub use charts::ChartSeries;
pub use commands::ManualCommand;
pub use device::Device;
pub use engine::VisionEngine;
pub use error::{EngineError, EngineResult};
pub use recording::{RecordingStatus, ScreenRecorder};
pub use types::{AlertPayload, DeviceKind, DeviceStatus, NotificationRecord, VisionStatus};
