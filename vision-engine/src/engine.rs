//! Engine façade: owns the registry, the seeded RNG, the scheduler,
//! and the recording session, and exposes the tick, query, and command
//! interfaces.
//!
//! One write lock spans a whole tick, so readers only ever observe a
//! consistent post-tick snapshot. The clock is injected: every
//! time-dependent operation takes `now` from the caller, which keeps
//! window logic testable without sleeping.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::charts::{self, ChartSeries};
use crate::commands::ManualCommand;
use crate::device::Device;
use crate::error::{EngineError, EngineResult};
use crate::recording::ScreenRecorder;
use crate::registry::DeviceRegistry;
use crate::scheduler::NotificationScheduler;
use crate::types::{AlertPayload, NotificationRecord};
use crate::{log_rotator, predictive, report, state_updater};

struct SimState {
    registry: DeviceRegistry,
    rng: StdRng,
}

pub struct VisionEngine {
    sim: RwLock<SimState>,
    scheduler: Mutex<NotificationScheduler>,
    recorder: ScreenRecorder,
    ticks: AtomicU64,
}

impl VisionEngine {
    pub fn new(start: DateTime<Utc>, seed: u64, recording_path: impl Into<PathBuf>) -> Self {
        Self {
            sim: RwLock::new(SimState {
                registry: DeviceRegistry::seeded(),
                rng: StdRng::seed_from_u64(seed),
            }),
            scheduler: Mutex::new(NotificationScheduler::new(start)),
            recorder: ScreenRecorder::new(recording_path),
            ticks: AtomicU64::new(0),
        }
    }

    /// Run one simulation tick: state transition, log rotation, and
    /// prediction refresh for every device, then one scheduler pass.
    pub fn advance_tick(&self, now: DateTime<Utc>) {
        let mut sim = self.sim.write();
        let SimState { registry, rng } = &mut *sim;

        for device in registry.devices_mut() {
            state_updater::apply_transition(device, rng);
            log_rotator::rotate_logs(device, now, rng);
            predictive::refresh_prediction(device, now, rng);
        }

        self.scheduler.lock().evaluate(registry, now, rng);
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(tick, "Simulation tick complete");
    }

    // ── Query interface ─────────────────────────────────────────────

    pub fn device_names(&self) -> Vec<&'static str> {
        self.sim.read().registry.names()
    }

    /// Clone of every device in registry order.
    pub fn devices(&self) -> Vec<Device> {
        self.sim.read().registry.devices().to_vec()
    }

    pub fn device_snapshot(&self, name: &str) -> EngineResult<Device> {
        self.sim
            .read()
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::DeviceNotFound(name.into()))
    }

    /// Composite terminal report for one device. The forensic line
    /// draws from the engine RNG, hence the write lock.
    pub fn device_report(&self, name: &str, now: DateTime<Utc>) -> EngineResult<String> {
        let mut sim = self.sim.write();
        let SimState { registry, rng } = &mut *sim;
        let device = registry
            .get(name)
            .ok_or_else(|| EngineError::DeviceNotFound(name.into()))?;
        Ok(report::device_report(device, now, rng))
    }

    pub fn chart_series(&self) -> ChartSeries {
        charts::chart_series(&self.sim.read().registry)
    }

    /// The most recent unconsumed popup payload, cleared by this read.
    pub fn poll_transient_alert(&self) -> Option<AlertPayload> {
        self.scheduler.lock().take_transient()
    }

    pub fn notifications(&self) -> Vec<NotificationRecord> {
        self.scheduler.lock().notifications().to_vec()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    // ── Command interface ───────────────────────────────────────────

    pub fn execute(&self, command: ManualCommand) -> String {
        command.execute(&self.recorder)
    }

    pub fn recorder(&self) -> &ScreenRecorder {
        &self.recorder
    }

    /// Flip a device's AI shield. Shield-off devices are frozen for
    /// the state updater while their logs keep rotating.
    pub fn set_ai_shield(&self, name: &str, enabled: bool) -> EngineResult<()> {
        let mut sim = self.sim.write();
        let device = sim
            .registry
            .get_mut(name)
            .ok_or_else(|| EngineError::DeviceNotFound(name.into()))?;
        device.ai_shield = enabled;
        Ok(())
    }
}
