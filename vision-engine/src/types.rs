//! Shared types for the simulation engine.

use chrono::{DateTime, Utc};

/// Capacity of every per-device log channel. Oldest entries are evicted
/// first once a channel is full.
pub const LOG_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DeviceStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VisionStatus {
    Active,
    Degraded,
    Offline,
}

/// The closed set of monitored device kinds. The registry holds exactly
/// one device of each kind, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DeviceKind {
    Thermostat,
    Camera,
    Lock,
    Light,
    Speaker,
    Fridge,
    Tv,
    Doorbell,
    Ac,
    Washer,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 10] = [
        DeviceKind::Thermostat,
        DeviceKind::Camera,
        DeviceKind::Lock,
        DeviceKind::Light,
        DeviceKind::Speaker,
        DeviceKind::Fridge,
        DeviceKind::Tv,
        DeviceKind::Doorbell,
        DeviceKind::Ac,
        DeviceKind::Washer,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            DeviceKind::Thermostat => "Smart Thermostat",
            DeviceKind::Camera => "Security Camera",
            DeviceKind::Lock => "Smart Lock",
            DeviceKind::Light => "Smart Light",
            DeviceKind::Speaker => "Smart Speaker",
            DeviceKind::Fridge => "Smart Fridge",
            DeviceKind::Tv => "Smart TV",
            DeviceKind::Doorbell => "Smart Doorbell",
            DeviceKind::Ac => "Smart AC",
            DeviceKind::Washer => "Smart Washer",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.display_name() == name)
    }

    /// Kind-specific error-log message (the "AI auto-corrected" table).
    pub fn error_message(self) -> &'static str {
        match self {
            DeviceKind::Thermostat => "Temp anomaly detected - AI corrected",
            DeviceKind::Camera => "Vision blur detected - AI enhanced",
            DeviceKind::Lock => "Access violation - AI locked",
            DeviceKind::Light => "Light flicker - AI stabilized",
            DeviceKind::Speaker => "Audio distortion - AI fixed",
            DeviceKind::Fridge => "Door left open - AI alerted",
            DeviceKind::Tv => "Screen glitch - AI resolved",
            DeviceKind::Doorbell => "False detection - AI filtered",
            DeviceKind::Ac => "Vent blockage - AI cleared",
            DeviceKind::Washer => "Water overflow - AI stopped",
        }
    }
}

/// Ordered, bounded log channel. Push evicts the oldest entry once
/// [`LOG_CAPACITY`] is exceeded.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundedLog {
    entries: Vec<String>,
}

impl BoundedLog {
    pub fn seeded(entry: &str) -> Self {
        Self { entries: vec![entry.to_string()] }
    }

    pub fn push(&mut self, entry: String) {
        self.entries.push(entry);
        if self.entries.len() > LOG_CAPACITY {
            self.entries.remove(0);
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// One emitted notification. History is append-only and unbounded; the
/// simulation never reads it back.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NotificationRecord {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Transient popup payload staged by the scheduler, consumed once by
/// whoever polls it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AlertPayload {
    pub title: String,
    pub lines: Vec<String>,
}
