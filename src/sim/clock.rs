//! Logical simulation clock
//!
//! One clock advanced by a fixed frame duration per tick. The beat and wind
//! cadences and the speed-zone revert are sub-schedules keyed on logical
//! elapsed time, so they never outlive the session that owns the clock.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Fixed-period repeating schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cadence {
    period_ms: f64,
    next_at_ms: f64,
}

impl Cadence {
    /// First firing one full period after start
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            next_at_ms: period_ms,
        }
    }

    /// Number of periods that have elapsed by `now_ms` since the last call
    pub fn fired(&mut self, now_ms: f64) -> u32 {
        let mut count = 0;
        while now_ms >= self.next_at_ms {
            self.next_at_ms += self.period_ms;
            count += 1;
        }
        count
    }
}

/// Session-owned time source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    elapsed_ms: f64,
    beat: Cadence,
    wind: Cadence,
    /// One-shot: speed modifier returns to 1 at this time
    speed_revert_at: Option<f64>,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            elapsed_ms: 0.0,
            beat: Cadence::new(BEAT_PERIOD_MS),
            wind: Cadence::new(WIND_RETARGET_MS),
            speed_revert_at: None,
        }
    }
}

impl Clock {
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn advance(&mut self, dt_ms: f64) {
        self.elapsed_ms += dt_ms;
    }

    /// Beat steps due since last poll
    pub fn beat_steps(&mut self) -> u32 {
        self.beat.fired(self.elapsed_ms)
    }

    /// Whether the wind should be retargeted this frame
    pub fn wind_due(&mut self) -> bool {
        self.wind.fired(self.elapsed_ms) > 0
    }

    /// (Re)start the speed-zone window; an overlapping trigger restarts it
    pub fn start_speed_zone(&mut self, duration_ms: f64) {
        self.speed_revert_at = Some(self.elapsed_ms + duration_ms);
    }

    pub fn speed_zone_active(&self) -> bool {
        self.speed_revert_at.is_some()
    }

    /// True exactly once when the speed-zone window has run out
    pub fn take_speed_revert(&mut self) -> bool {
        match self.speed_revert_at {
            Some(at) if self.elapsed_ms >= at => {
                self.speed_revert_at = None;
                true
            }
            _ => false,
        }
    }
}
