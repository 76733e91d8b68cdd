//! Session state and core simulation types
//!
//! Everything one playthrough mutates lives in `SessionState`, including its
//! RNG and timers, so dropping the session drops every pending timer with it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use crate::catalog::StageDefinition;
use crate::consts::*;
use crate::{level_speed_mod, target_pipes};

/// A passable vertical band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub y: f32,
    pub size: f32,
}

impl Gap {
    /// Half-open membership: `[y, y + size)`
    #[inline]
    pub fn contains(&self, py: f32) -> bool {
        py >= self.y && py < self.y + self.size
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.size
    }

    #[inline]
    pub fn center(&self) -> f32 {
        self.y + self.size / 2.0
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Leading (left) edge, decreasing over time
    pub x: f32,
    pub gap_y: f32,
    pub gap_size: f32,
    /// Anchor the oscillating mechanics displace from
    pub base_y: f32,
    /// Per-pipe oscillation offset (radians)
    pub phase: f32,
    pub passed: bool,
    /// Secondary gap, only on double pipes
    pub second_gap: Option<Gap>,
}

impl Pipe {
    #[inline]
    pub fn is_double(&self) -> bool {
        self.second_gap.is_some()
    }

    #[inline]
    pub fn gap(&self) -> Gap {
        Gap {
            y: self.gap_y,
            size: self.gap_size,
        }
    }

    /// Move the primary gap (and the secondary with it) to `gap_y`
    pub fn shift_gap_to(&mut self, gap_y: f32) {
        let delta = gap_y - self.gap_y;
        self.gap_y = gap_y;
        if let Some(second) = self.second_gap.as_mut() {
            second.y += delta;
        }
    }
}

/// A bonus pickup paired with a pipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    /// Id of the pipe it was generated with
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub collected: bool,
}

/// What ended a session in a loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crash {
    Ceiling,
    Floor,
    Pipe { id: u32 },
}

/// Terminal result of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost(Crash),
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Paused,
    Ended(Outcome),
}

/// Things that happened during the last tick (for sfx/visual feedback)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Flap,
    /// Flap landed on the downbeat
    BeatBonus,
    PipePassed { id: u32 },
    Collected { id: u32 },
    SpeedZone { speed_mod: f32 },
    SpeedZoneEnded,
    Ended(Outcome),
}

/// Complete state of one playthrough
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub stage: StageDefinition,
    pub level: u8,
    pub phase: GamePhase,
    /// Normalized vertical position (0 top, 100 bottom)
    pub position: f32,
    /// Positive = falling
    pub velocity: f32,
    pub score: u32,
    pub distance: f32,
    pub target_pipes: u32,
    /// Cycles 0..4 on the beat cadence
    pub beat_phase: u8,
    pub wind: f32,
    pub speed_mod: f32,
    pub pipes: Vec<Pipe>,
    pub collectibles: Vec<Collectible>,
    pub clock: Clock,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events of the most recent frame, plus input events since it ended
    pub events: Vec<GameEvent>,
    /// How many of `events` the last completed frame already reported
    pub(crate) reported_events: usize,
    next_id: u32,
}

impl SessionState {
    /// Fresh session with the initial pipes already seeded
    pub fn new(stage: StageDefinition, level: u8, seed: u64) -> Self {
        let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            stage,
            level,
            phase: GamePhase::Running,
            position: START_POSITION,
            velocity: 0.0,
            score: 0,
            distance: 0.0,
            target_pipes: target_pipes(stage.id, level),
            beat_phase: 0,
            wind: 0.0,
            speed_mod: 1.0,
            pipes: Vec::new(),
            collectibles: Vec::new(),
            clock: Clock::default(),
            time_ticks: 0,
            events: Vec::new(),
            reported_events: 0,
            next_id: 1,
        };

        super::generator::seed_pipes(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Scroll speed before speed-zone modulation
    pub fn base_speed(&self) -> f32 {
        self.stage.pipe_speed * level_speed_mod(self.level)
    }

    /// Character's vertical position in playfield pixels
    #[inline]
    pub fn character_py(&self) -> f32 {
        self.position * POSITION_TO_PX
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Score as a fraction of the target
    pub fn percentage_of_target(&self) -> f32 {
        self.score as f32 / self.target_pipes.max(1) as f32
    }
}
