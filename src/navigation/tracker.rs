use chrono::{DateTime, Duration, Utc};
use log::{debug, trace};
use rand::Rng;

use super::models::{UserPosition, Vec3};

pub const DEFAULT_INTERVAL_SECS: i64 = 5;
/// Where simulated movement begins when nothing has been reported yet.
pub const FALLBACK_START: Vec3 = Vec3::new(5.0, 0.0, 5.0);
pub const FALLBACK_TERMINAL: &str = "Central";
/// Max absolute horizontal drift per step.
pub const JITTER_HALF_WIDTH: f64 = 0.25;

/// Holds the user's position and the single simulated-movement schedule.
#[derive(Clone, Debug)]
pub struct UserPositionTracker {
    position: Option<UserPosition>,
    tracking: bool,
    interval: Duration,
    next_due: Option<DateTime<Utc>>,
}

impl Default for UserPositionTracker {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_INTERVAL_SECS))
    }
}

impl UserPositionTracker {
    pub fn new(interval: Duration) -> Self {
        Self { position: None, tracking: false, interval, next_due: None }
    }

    pub fn position(&self) -> Option<&UserPosition> {
        self.position.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.next_due
    }

    /// Replaces the position wholesale. `last_updated_at` never moves backwards.
    pub fn set_position(&mut self, mut pos: UserPosition) {
        if let Some(prev) = &self.position {
            if pos.last_updated_at < prev.last_updated_at {
                trace!("clamping stale position timestamp {} to {}", pos.last_updated_at, prev.last_updated_at);
                pos.last_updated_at = prev.last_updated_at;
            }
        }
        self.position = Some(pos);
    }

    /// Arms the schedule. Returns false if it was already armed; the pending due time is kept.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.tracking && self.next_due.is_some() {
            return false;
        }
        self.tracking = true;
        self.next_due = Some(now + self.interval);
        debug!("tracking armed, first step due {}", now + self.interval);
        true
    }

    /// Disarms the schedule; no further steps happen until `start` is called again.
    pub fn stop(&mut self) -> bool {
        let was = self.tracking;
        self.tracking = false;
        self.next_due = None;
        was
    }

    /// Performs one jitter step if the schedule is armed and due.
    pub fn poll<R: Rng + ?Sized>(&mut self, now: DateTime<Utc>, rng: &mut R) -> Option<&UserPosition> {
        match self.next_due {
            Some(due) if self.tracking && now >= due => {}
            _ => return None,
        }
        let (base, terminal) = match &self.position {
            Some(p) => (p.position, p.terminal.clone().unwrap_or_else(|| FALLBACK_TERMINAL.to_string())),
            None => (FALLBACK_START, FALLBACK_TERMINAL.to_string()),
        };
        let moved = Vec3::new(base.x + jitter(rng), base.y, base.z + jitter(rng));
        self.set_position(UserPosition { position: moved, terminal: Some(terminal), last_updated_at: now });
        self.next_due = Some(now + self.interval);
        self.position.as_ref()
    }
}

/// Uniform offset in [-0.25, 0.25).
fn jitter<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.gen::<f64>() - 0.5) * (JITTER_HALF_WIDTH * 2.0)
}
