//! Chart series: pure projections of current registry state for the
//! UI layer. No side effects, fixed registry order, idempotent between
//! ticks.

use crate::registry::DeviceRegistry;
use crate::types::{VisionStatus, LOG_CAPACITY};

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct VisionCounts {
    pub active: usize,
    pub degraded: usize,
    pub offline: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChartSeries {
    /// AI confidence per device, registry order.
    pub confidence: Vec<(String, f64)>,
    pub vision_counts: VisionCounts,
    /// Fraction of the last five error entries that report a fault.
    pub error_rate: Vec<(String, f64)>,
    pub failure_probability: Vec<(String, f64)>,
}

pub fn chart_series(registry: &DeviceRegistry) -> ChartSeries {
    let mut vision_counts = VisionCounts::default();
    for device in registry.devices() {
        match device.vision_status {
            VisionStatus::Active => vision_counts.active += 1,
            VisionStatus::Degraded => vision_counts.degraded += 1,
            VisionStatus::Offline => vision_counts.offline += 1,
        }
    }

    let confidence = registry
        .devices()
        .iter()
        .map(|d| (d.name().to_string(), d.ai_confidence))
        .collect();

    let error_rate = registry
        .devices()
        .iter()
        .map(|d| {
            let faults = d
                .error_log
                .entries()
                .iter()
                .filter(|e| !e.contains("No issues"))
                .count();
            (d.name().to_string(), faults as f64 / LOG_CAPACITY as f64)
        })
        .collect();

    let failure_probability = registry
        .devices()
        .iter()
        .map(|d| (d.name().to_string(), d.failure_probability))
        .collect();

    ChartSeries {
        confidence,
        vision_counts,
        error_rate,
        failure_probability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_fleet_projects_cleanly() {
        let registry = DeviceRegistry::seeded();
        let series = chart_series(&registry);
        assert_eq!(series.confidence.len(), 10);
        assert_eq!(series.confidence[1].0, "Security Camera");
        assert!((series.confidence[1].1 - 0.98).abs() < f64::EPSILON);
        assert_eq!(series.vision_counts.active, 10);
        assert_eq!(series.vision_counts.offline, 0);
        // Seed error logs hold a single "No issues" entry.
        assert!(series.error_rate.iter().all(|(_, rate)| *rate == 0.0));
    }

    #[test]
    fn projection_is_idempotent() {
        let registry = DeviceRegistry::seeded();
        assert_eq!(chart_series(&registry), chart_series(&registry));
    }
}
