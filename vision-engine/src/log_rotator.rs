//! Log rotation: every tick, every device gets exactly one new entry
//! per channel, then each channel is truncated to the newest five.
//! Runs whether or not the state updater touched the device.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::device::Device;

/// Probability that the error channel reports a real fault instead of
/// the quiet "No issues detected" line.
pub const ERROR_PROBABILITY: f64 = 0.3;

pub fn rotate_logs<R: Rng>(device: &mut Device, now: DateTime<Utc>, rng: &mut R) {
    let ts = now.format("%H:%M:%S");
    let name = device.name();

    let scan = if rng.gen_bool(0.5) {
        format!("[{ts}] Vision scan on {name}...")
    } else {
        format!("[{ts}] AI analysis complete: {}", device.last_scan)
    };
    device.scan_log.push(scan);

    let error = if rng.gen_bool(ERROR_PROBABILITY) {
        match rng.gen_range(0..3) {
            0 => format!("[{ts}] Critical failure - AI rebooting"),
            1 => format!("[{ts}] Vision module offline - AI restoring"),
            _ => format!("[{ts}] {}", device.kind.error_message()),
        }
    } else {
        format!("[{ts}] No issues detected")
    };
    device.error_log.push(error);

    // Three of the six AI actions branch on current device state.
    let ai = match rng.gen_range(0..6) {
        0 => format!("[{ts}] AI adjusted {name} parameters"),
        1 => format!("[{ts}] Threat prediction updated for {name}"),
        2 => format!("[{ts}] Health score recalculated for {name}"),
        3 => {
            if device.anomaly_detected {
                format!("[{ts}] Anomaly detection triggered for {name}")
            } else {
                format!("[{ts}] No anomalies in {name}")
            }
        }
        4 => {
            if device.maintenance_alert.is_some() {
                format!("[{ts}] Maintenance scheduled for {name}")
            } else {
                format!("[{ts}] No maintenance needed for {name}")
            }
        }
        _ => match &device.optimization_suggestion {
            Some(suggestion) => format!("[{ts}] Optimization applied: {suggestion}"),
            None => format!("[{ts}] No optimization needed for {name}"),
        },
    };
    device.ai_log.push(ai);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeviceKind, LOG_CAPACITY};
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn channels_never_exceed_capacity() {
        let mut dev = Device::seeded(DeviceKind::Fridge, 0.96, 0.07, 94);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let before = dev.scan_log.len();
            rotate_logs(&mut dev, now(), &mut rng);
            assert!(dev.scan_log.len() <= LOG_CAPACITY);
            assert!(dev.error_log.len() <= LOG_CAPACITY);
            assert!(dev.ai_log.len() <= LOG_CAPACITY);
            // One append per tick, minus at most one eviction.
            assert!(dev.scan_log.len() >= before.min(LOG_CAPACITY));
        }
    }

    #[test]
    fn rotation_ignores_shield() {
        let mut dev = Device::seeded(DeviceKind::Tv, 0.94, 0.09, 91);
        dev.ai_shield = false;
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            rotate_logs(&mut dev, now(), &mut rng);
        }
        assert_eq!(dev.scan_log.len(), LOG_CAPACITY);
        assert_eq!(dev.ai_log.len(), LOG_CAPACITY);
    }

    #[test]
    fn entries_carry_wall_clock_stamp() {
        let mut dev = Device::seeded(DeviceKind::Doorbell, 0.97, 0.06, 96);
        let mut rng = StdRng::seed_from_u64(2);
        rotate_logs(&mut dev, now(), &mut rng);
        for log in [&dev.scan_log, &dev.error_log, &dev.ai_log] {
            assert!(log.last().is_some_and(|e| e.starts_with("[12:00:00]")));
        }
    }
}
