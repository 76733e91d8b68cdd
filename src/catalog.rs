//! Stage catalog
//!
//! Ten opponents, ordered by difficulty. A stage's `id` is the only key the
//! unlock chain uses; everything else is tuning or presentation.

use serde::{Deserialize, Serialize};

/// Special mechanic layered on top of the base flyer rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mechanic {
    None,
    Collectibles,
    Rhythm,
    MovingPipes,
    SpeedZones,
    Night,
    Wind,
    WavePipes,
    DoublePipes,
    /// Every mechanic at once
    All,
}

impl Mechanic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mechanic::None => "none",
            Mechanic::Collectibles => "collectibles",
            Mechanic::Rhythm => "rhythm",
            Mechanic::MovingPipes => "moving_pipes",
            Mechanic::SpeedZones => "speed_zones",
            Mechanic::Night => "night",
            Mechanic::Wind => "wind",
            Mechanic::WavePipes => "wave_pipes",
            Mechanic::DoublePipes => "double_pipes",
            Mechanic::All => "all",
        }
    }

    #[inline]
    fn is(&self, m: Mechanic) -> bool {
        *self == m || *self == Mechanic::All
    }

    pub fn has_collectibles(&self) -> bool {
        self.is(Mechanic::Collectibles)
    }

    pub fn has_rhythm(&self) -> bool {
        self.is(Mechanic::Rhythm)
    }

    pub fn has_moving_pipes(&self) -> bool {
        self.is(Mechanic::MovingPipes)
    }

    pub fn has_speed_zones(&self) -> bool {
        self.is(Mechanic::SpeedZones)
    }

    pub fn has_night(&self) -> bool {
        self.is(Mechanic::Night)
    }

    pub fn has_wind(&self) -> bool {
        self.is(Mechanic::Wind)
    }

    pub fn has_wave_pipes(&self) -> bool {
        self.is(Mechanic::WavePipes)
    }

    pub fn has_double_pipes(&self) -> bool {
        self.is(Mechanic::DoublePipes)
    }
}

/// Immutable per-stage tuning record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageDefinition {
    pub id: u8,
    pub name: &'static str,
    pub title: &'static str,
    /// Short label shown on the stage card
    pub mechanic_label: &'static str,
    /// Primary gap height (px) at level 1
    pub gap_size: f32,
    /// Scroll speed (px/frame) at level 1
    pub pipe_speed: f32,
    /// Downward acceleration (normalized units/frame²)
    pub gravity: f32,
    pub mechanic: Mechanic,
    /// Background theme key for the renderer
    pub theme: &'static str,
}

pub const STAGES: [StageDefinition; 10] = [
    StageDefinition {
        id: 0,
        name: "Barnaby",
        title: "The Picnic Bear",
        mechanic_label: "Classic flight",
        gap_size: 180.0,
        pipe_speed: 2.0,
        gravity: 0.4,
        mechanic: Mechanic::None,
        theme: "meadow",
    },
    StageDefinition {
        id: 1,
        name: "Honeypot",
        title: "The Sweet Tooth",
        mechanic_label: "Grab the honey",
        gap_size: 175.0,
        pipe_speed: 2.1,
        gravity: 0.4,
        mechanic: Mechanic::Collectibles,
        theme: "orchard",
    },
    StageDefinition {
        id: 2,
        name: "Drummer",
        title: "The Marching Band",
        mechanic_label: "Flap on the beat",
        gap_size: 170.0,
        pipe_speed: 2.2,
        gravity: 0.42,
        mechanic: Mechanic::Rhythm,
        theme: "parade",
    },
    StageDefinition {
        id: 3,
        name: "Wobbles",
        title: "The Jelly Juggler",
        mechanic_label: "Moving pipes",
        gap_size: 170.0,
        pipe_speed: 2.3,
        gravity: 0.42,
        mechanic: Mechanic::MovingPipes,
        theme: "circus",
    },
    StageDefinition {
        id: 4,
        name: "Zoomer",
        title: "The Racing Cub",
        mechanic_label: "Speed zones",
        gap_size: 165.0,
        pipe_speed: 2.4,
        gravity: 0.44,
        mechanic: Mechanic::SpeedZones,
        theme: "racetrack",
    },
    StageDefinition {
        id: 5,
        name: "Moonbeam",
        title: "The Sleepy Owl",
        mechanic_label: "Night flight",
        gap_size: 165.0,
        pipe_speed: 2.4,
        gravity: 0.44,
        mechanic: Mechanic::Night,
        theme: "midnight",
    },
    StageDefinition {
        id: 6,
        name: "Gusty",
        title: "The Kite Flyer",
        mechanic_label: "Crosswinds",
        gap_size: 160.0,
        pipe_speed: 2.5,
        gravity: 0.45,
        mechanic: Mechanic::Wind,
        theme: "cliffs",
    },
    StageDefinition {
        id: 7,
        name: "Ripple",
        title: "The Seaside Surfer",
        mechanic_label: "Wave pipes",
        gap_size: 160.0,
        pipe_speed: 2.6,
        gravity: 0.46,
        mechanic: Mechanic::WavePipes,
        theme: "beach",
    },
    StageDefinition {
        id: 8,
        name: "Twinkle",
        title: "The Twin Stars",
        mechanic_label: "Double gaps",
        gap_size: 150.0,
        pipe_speed: 2.7,
        gravity: 0.48,
        mechanic: Mechanic::DoublePipes,
        theme: "observatory",
    },
    StageDefinition {
        id: 9,
        name: "Grizzle",
        title: "The Grand Champion",
        mechanic_label: "Everything at once",
        gap_size: 145.0,
        pipe_speed: 2.8,
        gravity: 0.5,
        mechanic: Mechanic::All,
        theme: "arena",
    },
];

/// Look up a stage by id
pub fn stage(id: u8) -> Option<&'static StageDefinition> {
    STAGES.get(id as usize)
}
