//! Device Registry — single source of truth for the monitored fleet.
//!
//! Ten devices, one per [`DeviceKind`], created once at engine start
//! and never added or removed. Iteration order is the fixed registry
//! order used by every query projection.

use crate::device::Device;
use crate::types::DeviceKind;

pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    /// Build the fixed fleet with its seed confidence/threat/health
    /// values.
    pub fn seeded() -> Self {
        let seeds: [(DeviceKind, f64, f64, u8); 10] = [
            (DeviceKind::Thermostat, 0.95, 0.10, 90),
            (DeviceKind::Camera, 0.98, 0.05, 95),
            (DeviceKind::Lock, 0.90, 0.15, 85),
            (DeviceKind::Light, 0.92, 0.12, 88),
            (DeviceKind::Speaker, 0.93, 0.08, 92),
            (DeviceKind::Fridge, 0.96, 0.07, 94),
            (DeviceKind::Tv, 0.94, 0.09, 91),
            (DeviceKind::Doorbell, 0.97, 0.06, 96),
            (DeviceKind::Ac, 0.91, 0.13, 87),
            (DeviceKind::Washer, 0.89, 0.14, 86),
        ];
        let devices = seeds
            .into_iter()
            .map(|(kind, confidence, threat, health)| {
                Device::seeded(kind, confidence, threat, health)
            })
            .collect();
        Self { devices }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.devices.iter().map(Device::name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.name() == name)
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut [Device] {
        &mut self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
