//! Predictive maintenance: failure probability and a predicted service
//! date, derived from the current health score. Recomputed for every
//! device every tick, shield or not, so the value drifts even for a
//! frozen device's stale health score (preserved behavior of the
//! original design).

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::device::Device;

/// Health scores below this trigger the high-risk branch.
pub const AT_RISK_HEALTH: u8 = 80;

pub fn refresh_prediction<R: Rng>(device: &mut Device, now: DateTime<Utc>, rng: &mut R) {
    if device.health_score < AT_RISK_HEALTH {
        device.failure_probability = rng.gen_range(0.5..0.9);
        let days_until = rng.gen_range(1..=7);
        device.predicted_maintenance = Some(now + Duration::days(days_until));
    } else {
        device.failure_probability = rng.gen_range(0.1..0.5);
        device.predicted_maintenance = None;
    }
}
