//! Fixed timestep simulation tick
//!
//! Core frame loop: physics, obstacle upkeep, then collision and scoring, in
//! that order.

use super::state::{GameEvent, GamePhase, Outcome, SessionState};
use super::{autopilot, collision, generator, physics};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap (key/tap/click)
    pub flap: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the autopilot flies
    pub autopilot: bool,
}

/// Advance the session by one frame
///
/// Returns the outcome on the frame the session ends.
pub fn tick(state: &mut SessionState, input: &TickInput) -> Option<Outcome> {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return None;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                log::info!("Resumed");
            }
            GamePhase::Ended(_) => {}
        }
    }

    // Don't tick if paused or over
    if state.phase != GamePhase::Running {
        return None;
    }

    // Drop what the previous frame reported; keep flaps that arrived since
    let reported = state.reported_events.min(state.events.len());
    state.events.drain(..reported);

    if input.flap || (input.autopilot && autopilot::wants_flap(state)) {
        physics::flap(state);
    }

    state.time_ticks += 1;
    state.clock.advance(FRAME_MS);

    let bounds_crash = physics::step(state);

    collision::retire_offscreen(state);
    generator::replenish_pipes(state);

    let outcome = collision::evaluate(state, bounds_crash);
    if let Some(outcome) = outcome {
        state.phase = GamePhase::Ended(outcome);
        state.events.push(GameEvent::Ended(outcome));
        log::info!(
            "Session over: {:?} (score {}/{}, {:.0} px)",
            outcome,
            state.score,
            state.target_pipes,
            state.distance
        );
    }
    state.reported_events = state.events.len();
    outcome
}
