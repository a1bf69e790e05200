//! Notification scheduler: two independent wall-clock windows.
//!
//! The hourly window samples one device and alerts only if it looks
//! critical; the half-hour window always emits the driver-approval
//! request for the security camera. Each window resets its baseline
//! whenever it elapses, alert or not. If both elapse in the same tick
//! the half-hour payload overwrites the hourly one (last-write-wins,
//! preserved from the original design).

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{info, warn};

use crate::registry::DeviceRegistry;
use crate::types::{AlertPayload, DeviceKind, DeviceStatus, NotificationRecord};

pub const HOURLY_WINDOW_SECS: i64 = 3600;
pub const HALF_HOUR_WINDOW_SECS: i64 = 1800;

const ALERT_EMAIL: &str = "vision@quantum.io";
const ALERT_SMS: &str = "+1-555-987-6543";

pub struct NotificationScheduler {
    last_hourly_check: DateTime<Utc>,
    last_30min_check: DateTime<Utc>,
    notifications: Vec<NotificationRecord>,
    transient: Option<AlertPayload>,
}

impl NotificationScheduler {
    /// Both baselines start at engine-start time: the first windows
    /// elapse only after their full durations.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            last_hourly_check: start,
            last_30min_check: start,
            notifications: Vec::new(),
            transient: None,
        }
    }

    /// Evaluate both windows once. Called at the end of every tick.
    pub fn evaluate<R: Rng>(
        &mut self,
        registry: &DeviceRegistry,
        now: DateTime<Utc>,
        rng: &mut R,
    ) {
        if (now - self.last_hourly_check).num_seconds() >= HOURLY_WINDOW_SECS {
            // Baseline resets whether or not an alert is produced.
            self.last_hourly_check = now;

            let device = &registry.devices()[rng.gen_range(0..registry.len())];
            let last_error = device.error_log.last().unwrap_or_default();
            let critical = last_error.contains("Critical")
                || device.status == DeviceStatus::Offline
                || device.anomaly_detected;

            if critical {
                let msg = format!("Critical issue on {}: {}", device.name(), last_error);
                warn!(device = %device.name(), "Hourly window raised a critical alert");
                self.notifications.push(NotificationRecord {
                    timestamp: now,
                    message: format!("Slack: {msg}\nEmail: {ALERT_EMAIL}\nSMS: {ALERT_SMS}"),
                });
                self.transient = Some(AlertPayload {
                    title: "Critical Alert".into(),
                    lines: vec![
                        format!("Slack: {msg}"),
                        format!("Email: Sent to {ALERT_EMAIL}"),
                        format!("SMS: Sent to {ALERT_SMS}"),
                    ],
                });
            }
        }

        if (now - self.last_30min_check).num_seconds() >= HALF_HOUR_WINDOW_SECS {
            self.last_30min_check = now;

            let target = DeviceKind::Camera.display_name();
            let approval = format!("Admin approval required for update of {target} driver.");
            info!(device = %target, "Half-hour approval request emitted");
            self.notifications.push(NotificationRecord {
                timestamp: now,
                message: approval.clone(),
            });
            self.transient = Some(AlertPayload {
                title: "Update Approval Request".into(),
                lines: vec![approval],
            });
        }
    }

    /// The most recent unconsumed popup, cleared by this read.
    pub fn take_transient(&mut self) -> Option<AlertPayload> {
        self.transient.take()
    }

    pub fn notifications(&self) -> &[NotificationRecord] {
        &self.notifications
    }

    pub fn last_hourly_check(&self) -> DateTime<Utc> {
        self.last_hourly_check
    }

    pub fn last_30min_check(&self) -> DateTime<Utc> {
        self.last_30min_check
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn windows_do_not_fire_early() {
        let registry = DeviceRegistry::seeded();
        let mut sched = NotificationScheduler::new(start());
        let mut rng = StdRng::seed_from_u64(1);
        sched.evaluate(&registry, start() + Duration::seconds(1799), &mut rng);
        assert!(sched.notifications().is_empty());
        assert!(sched.take_transient().is_none());
        assert_eq!(sched.last_hourly_check(), start());
        assert_eq!(sched.last_30min_check(), start());
    }

    #[test]
    fn hourly_baseline_resets_even_without_alert() {
        // Seeded fleet: all online, no anomalies, error tails are the
        // seed "No issues" entries, so the sampled device can never
        // look critical.
        let registry = DeviceRegistry::seeded();
        let mut sched = NotificationScheduler::new(start());
        let mut rng = StdRng::seed_from_u64(4);
        let later = start() + Duration::seconds(3601);
        sched.evaluate(&registry, later, &mut rng);
        assert_eq!(sched.last_hourly_check(), later);
        // Half-hour window fired too; only its record is present.
        assert_eq!(sched.notifications().len(), 1);
        assert!(sched.notifications()[0].message.contains("Admin approval"));
    }

    #[test]
    fn hourly_alert_fires_on_offline_device() {
        let mut registry = DeviceRegistry::seeded();
        for device in registry.devices_mut() {
            device.status = DeviceStatus::Offline;
        }
        let mut sched = NotificationScheduler::new(start());
        let mut rng = StdRng::seed_from_u64(4);
        // Consume the first half-hour emission before the hourly check.
        sched.evaluate(&registry, start() + Duration::seconds(1800), &mut rng);
        let _ = sched.take_transient();
        let before = sched.notifications().len();

        let later = start() + Duration::seconds(3600);
        sched.evaluate(&registry, later, &mut rng);
        let new: Vec<_> = sched.notifications()[before..].to_vec();
        assert!(new.iter().any(|n| n.message.contains("Critical issue on")));
        assert_eq!(sched.last_hourly_check(), later);
    }

    #[test]
    fn half_hour_window_never_suppresses() {
        let registry = DeviceRegistry::seeded();
        let mut sched = NotificationScheduler::new(start());
        let mut rng = StdRng::seed_from_u64(9);
        let mut now = start();
        for _ in 0..4 {
            now += Duration::seconds(1800);
            sched.evaluate(&registry, now, &mut rng);
        }
        let approvals = sched
            .notifications()
            .iter()
            .filter(|n| n.message.contains("Admin approval"))
            .count();
        assert_eq!(approvals, 4);
    }

    #[test]
    fn emissions_respect_minimum_spacing() {
        let registry = DeviceRegistry::seeded();
        let mut sched = NotificationScheduler::new(start());
        let mut rng = StdRng::seed_from_u64(13);
        let mut now = start();
        // Tick every 10 minutes for 6 simulated hours.
        for _ in 0..36 {
            now += Duration::seconds(600);
            sched.evaluate(&registry, now, &mut rng);
        }
        let approvals: Vec<_> = sched
            .notifications()
            .iter()
            .filter(|n| n.message.contains("Admin approval"))
            .collect();
        for pair in approvals.windows(2) {
            let gap = (pair[1].timestamp - pair[0].timestamp).num_seconds();
            assert!(gap >= HALF_HOUR_WINDOW_SECS, "gap {gap}s too small");
        }
    }

    #[test]
    fn half_hour_popup_overwrites_hourly_in_same_tick() {
        let mut registry = DeviceRegistry::seeded();
        for device in registry.devices_mut() {
            device.anomaly_detected = true;
        }
        let mut sched = NotificationScheduler::new(start());
        let mut rng = StdRng::seed_from_u64(21);
        // Both windows elapse on this tick; every device is anomalous
        // so the hourly branch definitely stages a payload first.
        sched.evaluate(&registry, start() + Duration::seconds(3600), &mut rng);
        let popup = sched.take_transient().expect("popup staged");
        assert_eq!(popup.title, "Update Approval Request");
        // Both records were still appended to history.
        assert_eq!(sched.notifications().len(), 2);
    }

    #[test]
    fn transient_alert_is_read_once() {
        let registry = DeviceRegistry::seeded();
        let mut sched = NotificationScheduler::new(start());
        let mut rng = StdRng::seed_from_u64(2);
        sched.evaluate(&registry, start() + Duration::seconds(1800), &mut rng);
        assert!(sched.take_transient().is_some());
        assert!(sched.take_transient().is_none());
    }
}
