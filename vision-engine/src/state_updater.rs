//! Stochastic state transition: with probability 0.25, and only while
//! the AI shield is up, redraw a device's volatile fields. Later draws
//! depend on earlier ones within the same tick.

use rand::Rng;

use crate::device::{Device, MAINTENANCE_MARKER};
use crate::types::{DeviceStatus, VisionStatus};

/// Per-device, per-tick Bernoulli probability of a transition firing.
pub const TRANSITION_PROBABILITY: f64 = 0.25;

const SUGGESTION_PROBABILITY: f64 = 0.3;
const ANOMALY_PROBABILITY: f64 = 0.2;

pub fn apply_transition<R: Rng>(device: &mut Device, rng: &mut R) {
    if !device.ai_shield {
        return;
    }
    if !rng.gen_bool(TRANSITION_PROBABILITY) {
        return;
    }

    device.status = if rng.gen_bool(0.5) {
        DeviceStatus::Online
    } else {
        DeviceStatus::Offline
    };

    device.vision_status = match device.status {
        DeviceStatus::Offline => VisionStatus::Offline,
        DeviceStatus::Online => {
            if rng.gen_bool(0.5) {
                VisionStatus::Active
            } else {
                VisionStatus::Degraded
            }
        }
    };

    device.ai_confidence = if device.vision_status == VisionStatus::Active {
        rng.gen_range(0.7..0.99)
    } else {
        rng.gen_range(0.5..0.7)
    };

    device.threat_score = if device.vision_status == VisionStatus::Degraded {
        rng.gen_range(0.05..0.8)
    } else {
        rng.gen_range(0.05..0.3)
    };

    device.health_score = if device.vision_status == VisionStatus::Active {
        rng.gen_range(70..=95)
    } else {
        rng.gen_range(50..=80)
    };

    device.anomaly_detected = device.threat_score > 0.5 && rng.gen_bool(ANOMALY_PROBABILITY);

    device.maintenance_alert = if device.health_score < 70 {
        Some(MAINTENANCE_MARKER.into())
    } else {
        None
    };

    device.optimization_suggestion = if rng.gen_bool(SUGGESTION_PROBABILITY) {
        match rng.gen_range(0..3) {
            0 => Some("Increase scan frequency".into()),
            1 => Some("Adjust AI threshold".into()),
            _ => None,
        }
    } else {
        None
    };

    if device.vision_status == VisionStatus::Degraded {
        device.last_scan = "Threat Detected".into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn device() -> Device {
        Device::seeded(DeviceKind::Thermostat, 0.95, 0.1, 90)
    }

    #[test]
    fn shield_off_freezes_all_fields() {
        let mut dev = device();
        dev.ai_shield = false;
        let before = dev.clone();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            apply_transition(&mut dev, &mut rng);
        }
        assert_eq!(dev, before);
    }

    #[test]
    fn fields_stay_in_range() {
        let mut dev = device();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            apply_transition(&mut dev, &mut rng);
            assert!((0.0..=1.0).contains(&dev.ai_confidence));
            assert!((0.0..=1.0).contains(&dev.threat_score));
            assert!(dev.health_score <= 100);
        }
    }

    #[test]
    fn offline_status_implies_offline_vision() {
        let mut dev = device();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            apply_transition(&mut dev, &mut rng);
            assert_eq!(
                dev.vision_status == VisionStatus::Offline,
                dev.status == DeviceStatus::Offline
            );
        }
    }

    #[test]
    fn maintenance_alert_tracks_health() {
        let mut dev = device();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            apply_transition(&mut dev, &mut rng);
            assert_eq!(dev.maintenance_alert.is_some(), dev.health_score < 70);
        }
    }

    #[test]
    fn degraded_vision_marks_threat_detected() {
        let mut dev = device();
        let mut rng = StdRng::seed_from_u64(3);
        let mut saw_degraded = false;
        for _ in 0..500 {
            apply_transition(&mut dev, &mut rng);
            if dev.vision_status == VisionStatus::Degraded {
                saw_degraded = true;
                assert_eq!(dev.last_scan, "Threat Detected");
            }
        }
        assert!(saw_degraded, "500 seeded ticks should hit a degraded draw");
    }
}
