//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed logical timestep, timers keyed on logical time
//! - Seeded RNG per session
//! - No rendering, input or storage dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod generator;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use clock::{Cadence, Clock};
pub use collision::{evaluate, in_any_gap, overlaps_character, pipe_collision};
pub use generator::{collectible_for, generate_pipe};
pub use physics::flap;
pub use snapshot::FrameSnapshot;
pub use state::{Collectible, Crash, GameEvent, GamePhase, Gap, Outcome, Pipe, SessionState};
pub use tick::{TickInput, tick};
