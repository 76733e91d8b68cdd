//! Stage progression
//!
//! Each stage accumulates 0-40 progress points across won sessions. Points
//! gate the next stage (mastery at 40), levels within a stage (one per star)
//! and the star rating shown on the stage card.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Per-stage point totals, indexed by stage id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord {
    pub points: [u8; STAGE_COUNT],
}

impl ProgressRecord {
    /// All-zero record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored values; anything but ten entries is rejected and
    /// totals above the cap are clamped
    pub fn from_stored(values: &[i64]) -> Option<Self> {
        if values.len() != STAGE_COUNT {
            return None;
        }
        let mut record = Self::new();
        for (slot, &v) in record.points.iter_mut().zip(values) {
            *slot = v.clamp(0, MAX_STAGE_POINTS as i64) as u8;
        }
        Some(record)
    }

    pub fn points_for(&self, stage_id: u8) -> u8 {
        self.points.get(stage_id as usize).copied().unwrap_or(0)
    }

    /// Stars shown for a stage (0-10)
    pub fn stars_for(&self, stage_id: u8) -> u8 {
        self.points_for(stage_id) / POINTS_PER_STAR
    }

    /// Stage 0 is always open; later stages need the previous one mastered
    pub fn is_unlocked(&self, stage_id: u8) -> bool {
        if stage_id as usize >= STAGE_COUNT {
            return false;
        }
        stage_id == 0 || self.is_mastered(stage_id - 1)
    }

    pub fn is_mastered(&self, stage_id: u8) -> bool {
        self.points_for(stage_id) >= MAX_STAGE_POINTS
    }

    /// Highest playable level for a stage (0 if the stage is locked)
    pub fn max_level(&self, stage_id: u8) -> u8 {
        if !self.is_unlocked(stage_id) {
            return 0;
        }
        (self.stars_for(stage_id) + 1).min(MAX_LEVEL)
    }

    pub fn is_level_unlocked(&self, stage_id: u8, level: u8) -> bool {
        level >= MIN_LEVEL && level <= self.max_level(stage_id)
    }

    /// Points a win is worth given score / target
    pub fn award_for(percentage_of_target: f32) -> u8 {
        if percentage_of_target >= BONUS_RATIO { 2 } else { 1 }
    }

    /// Return a copy with a win recorded for `stage_id`
    ///
    /// The caller is responsible for persisting the result.
    pub fn record_win(&self, stage_id: u8, percentage_of_target: f32) -> Self {
        let mut next = *self;
        if let Some(slot) = next.points.get_mut(stage_id as usize) {
            let award = Self::award_for(percentage_of_target);
            *slot = slot.saturating_add(award).min(MAX_STAGE_POINTS);
        }
        next
    }

    /// Total stars across all stages
    pub fn total_stars(&self) -> u32 {
        (0..STAGE_COUNT as u8).map(|i| self.stars_for(i) as u32).sum()
    }
}
