//! Flappy Teddy - a ten-stage arcade flyer
//!
//! Core modules:
//! - `catalog`: Static stage tuning table
//! - `progress`: Per-stage progress points, stars and unlocks
//! - `persistence`: Key-value save/load of progress
//! - `sim`: Frame-stepped simulation (physics, obstacles, collisions, scoring)
//! - `session`: Match lifecycle and menu navigation
//! - `platform`: Per-target logger setup and save location
//! - `web`: JavaScript bindings (wasm32 only)

pub mod catalog;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod session;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use catalog::{Mechanic, StageDefinition, STAGES};
pub use persistence::{KeyValueStore, MemoryStore, ProgressStore, StorageError};
pub use progress::ProgressRecord;
pub use session::{Controller, Screen};

/// Game configuration constants
pub mod consts {
    /// Logical frame duration (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Playfield dimensions in pixels
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;
    /// Normalized character position (0-100) to pixels
    pub const POSITION_TO_PX: f32 = 4.0;

    /// Character vertical bounds (normalized units)
    pub const POSITION_MIN: f32 = 0.0;
    pub const POSITION_MAX: f32 = 100.0;
    pub const START_POSITION: f32 = 50.0;
    /// Raw position outside [CEILING_LIMIT, FLOOR_LIMIT] is a crash
    pub const CEILING_LIMIT: f32 = 2.0;
    pub const FLOOR_LIMIT: f32 = 98.0;

    /// Flap sets velocity to this (negative = up)
    pub const FLAP_IMPULSE: f32 = -7.0;
    /// Maximum downward velocity
    pub const MAX_FALL_SPEED: f32 = 10.0;
    /// Wind contribution to velocity per frame
    pub const WIND_FACTOR: f32 = 0.1;

    /// Character hitbox (fixed horizontal band)
    pub const CHARACTER_X: f32 = 80.0;
    pub const CHARACTER_HALF_WIDTH: f32 = 20.0;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const PIPE_SPACING: f32 = 200.0;
    pub const INITIAL_PIPE_X: f32 = PLAYFIELD_WIDTH;
    pub const MIN_ACTIVE_PIPES: usize = 5;
    /// Pipes/collectibles at or beyond this x are dropped
    pub const DESPAWN_X: f32 = -50.0;
    /// Pipe counts as passed once x drops below this
    pub const PASS_X: f32 = 15.0;

    /// Vertical band the primary gap is generated within
    pub const GAP_BAND_TOP: f32 = 80.0;
    pub const GAP_BAND_BOTTOM: f32 = 320.0;
    /// Double pipes: minimum spacing between the gaps, extra jitter, size ratio
    pub const SECOND_GAP_BUFFER: f32 = 50.0;
    pub const SECOND_GAP_JITTER: f32 = 30.0;
    pub const SECOND_GAP_RATIO: f32 = 0.8;
    pub const DOUBLE_PIPE_CHANCE: f64 = 0.3;

    /// Collectibles sit this far past the pipe's leading edge
    pub const COLLECTIBLE_OFFSET: f32 = 50.0;
    /// Pickup reach
    pub const PICKUP_RANGE_X: f32 = 20.0;
    pub const PICKUP_RANGE_Y: f32 = 30.0;

    /// Oscillation: (period divisor ms, amplitude px)
    pub const MOVING_PERIOD_MS: f64 = 500.0;
    pub const MOVING_AMPLITUDE: f32 = 30.0;
    pub const WAVE_PERIOD_MS: f64 = 300.0;
    pub const WAVE_AMPLITUDE: f32 = 40.0;

    /// Auxiliary timers
    pub const BEAT_PERIOD_MS: f64 = 500.0;
    pub const BEAT_STEPS: u8 = 4;
    pub const WIND_RETARGET_MS: f64 = 100.0;
    pub const WIND_PERIOD_MS: f64 = 2000.0;
    pub const WIND_STRENGTH: f32 = 2.0;
    pub const SPEED_ZONE_CHANCE: f64 = 0.01;
    pub const SPEED_ZONE_DURATION_MS: f64 = 2000.0;
    pub const SPEED_ZONE_FAST: f32 = 1.5;
    pub const SPEED_ZONE_SLOW: f32 = 0.7;

    /// Night stages only reveal this radius around the character
    pub const NIGHT_VISION_RADIUS: f32 = 150.0;

    /// Level scaling
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 10;
    pub const LEVEL_GAP_STEP: f32 = 0.08;
    pub const LEVEL_SPEED_STEP: f32 = 0.1;

    /// Progression
    pub const STAGE_COUNT: usize = 10;
    pub const MAX_STAGE_POINTS: u8 = 40;
    pub const POINTS_PER_STAR: u8 = 4;
    /// Score ratio needed for the bigger reward
    pub const BONUS_RATIO: f32 = 1.5;
}

/// Divisor applied to a stage's gap size at `level` (gaps shrink with level)
#[inline]
pub fn level_gap_mod(level: u8) -> f32 {
    1.0 + (level.max(1) - 1) as f32 * consts::LEVEL_GAP_STEP
}

/// Multiplier applied to a stage's pipe speed at `level`
#[inline]
pub fn level_speed_mod(level: u8) -> f32 {
    1.0 + (level.max(1) - 1) as f32 * consts::LEVEL_SPEED_STEP
}

/// Pipes to pass (score to reach) to win `stage_id` at `level`
#[inline]
pub fn target_pipes(stage_id: u8, level: u8) -> u32 {
    5 + level as u32 * 2 + stage_id as u32
}
