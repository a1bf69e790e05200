//! Per-device state: the canonical record the whole engine revolves
//! around. Mutable fields evolve tick by tick; the kind never changes.

use chrono::{DateTime, Utc};

use crate::types::{BoundedLog, DeviceKind, DeviceStatus, VisionStatus};

/// Marker written to `maintenance_alert` when the health score drops
/// below 70.
pub const MAINTENANCE_MARKER: &str = "Schedule service";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Device {
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    /// Gate for the stochastic state transition. When off, the device
    /// is frozen: the updater must not touch it (logs still rotate).
    pub ai_shield: bool,
    pub vision_status: VisionStatus,
    pub last_scan: String,
    pub ai_confidence: f64,
    pub threat_score: f64,
    pub health_score: u8,
    pub anomaly_detected: bool,
    pub maintenance_alert: Option<String>,
    pub optimization_suggestion: Option<String>,
    pub failure_probability: f64,
    pub predicted_maintenance: Option<DateTime<Utc>>,
    pub scan_log: BoundedLog,
    pub error_log: BoundedLog,
    pub ai_log: BoundedLog,
}

impl Device {
    /// A freshly registered device: online, shielded, clean scan, and
    /// one seed entry per log channel.
    pub fn seeded(kind: DeviceKind, confidence: f64, threat: f64, health: u8) -> Self {
        Self {
            kind,
            status: DeviceStatus::Online,
            ai_shield: true,
            vision_status: VisionStatus::Active,
            last_scan: "Clean".into(),
            ai_confidence: confidence,
            threat_score: threat,
            health_score: health,
            anomaly_detected: false,
            maintenance_alert: None,
            optimization_suggestion: None,
            failure_probability: 0.0,
            predicted_maintenance: None,
            scan_log: BoundedLog::seeded("Starting scan..."),
            error_log: BoundedLog::seeded("No issues"),
            ai_log: BoundedLog::seeded("AI engine initialized"),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }
}
