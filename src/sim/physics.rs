//! Physics and mechanics
//!
//! Per-frame integration of the character plus every time-varying stage
//! modifier: oscillating gaps, wind, speed zones and the beat.

use rand::Rng;

use super::state::{Crash, GameEvent, Pipe, SessionState};
use crate::catalog::Mechanic;
use crate::consts::*;

/// Flap: replace (not add to) the current velocity with the upward impulse
///
/// On rhythm stages a flap on the downbeat is worth a bonus point.
pub fn flap(state: &mut SessionState) {
    state.velocity = FLAP_IMPULSE;
    state.events.push(GameEvent::Flap);
    if state.stage.mechanic.has_rhythm() && state.beat_phase == 0 {
        state.score += 1;
        state.events.push(GameEvent::BeatBonus);
    }
}

/// Vertical displacement of a pipe's gap at `elapsed_ms`
///
/// Moving and wave contributions are independent and add up, so the "all"
/// stage keeps both.
pub fn gap_offset(mechanic: Mechanic, phase: f32, elapsed_ms: f64) -> f32 {
    let mut offset = 0.0;
    if mechanic.has_moving_pipes() {
        offset += ((elapsed_ms / MOVING_PERIOD_MS) as f32 + phase).sin() * MOVING_AMPLITUDE;
    }
    if mechanic.has_wave_pipes() {
        offset += ((elapsed_ms / WAVE_PERIOD_MS) as f32 + phase).sin() * WAVE_AMPLITUDE;
    }
    offset
}

fn reposition_gap(pipe: &mut Pipe, mechanic: Mechanic, elapsed_ms: f64) {
    let target = pipe.base_y + gap_offset(mechanic, pipe.phase, elapsed_ms);
    pipe.shift_gap_to(target);
}

/// Wind at `elapsed_ms` (slow sine drift)
pub fn wind_at(elapsed_ms: f64) -> f32 {
    ((elapsed_ms / WIND_PERIOD_MS) as f32).sin() * WIND_STRENGTH
}

/// Advance one frame. Returns a ceiling/floor crash if the unclamped
/// position left the safe band.
///
/// The clock must already have been advanced for this frame.
pub fn step(state: &mut SessionState) -> Option<Crash> {
    let mechanic = state.stage.mechanic;
    let now = state.clock.elapsed_ms();

    // Velocity
    state.velocity += state.stage.gravity;
    if mechanic.has_wind() {
        state.velocity += state.wind * WIND_FACTOR;
    }
    state.velocity = state.velocity.min(MAX_FALL_SPEED);

    // Position
    let raw = state.position + state.velocity;
    state.position = raw.clamp(POSITION_MIN, POSITION_MAX);
    let crash = if raw < CEILING_LIMIT {
        Some(Crash::Ceiling)
    } else if raw > FLOOR_LIMIT {
        Some(Crash::Floor)
    } else {
        None
    };

    // Oscillating gaps
    if mechanic.has_moving_pipes() || mechanic.has_wave_pipes() {
        for pipe in &mut state.pipes {
            reposition_gap(pipe, mechanic, now);
        }
    }

    // Wind retarget
    if state.clock.wind_due() && mechanic.has_wind() {
        state.wind = wind_at(now);
    }

    // Speed zones
    if state.clock.take_speed_revert() {
        state.speed_mod = 1.0;
        state.events.push(GameEvent::SpeedZoneEnded);
    }
    if mechanic.has_speed_zones() && state.rng.random_bool(SPEED_ZONE_CHANCE) {
        state.speed_mod = if state.rng.random_bool(0.5) {
            SPEED_ZONE_FAST
        } else {
            SPEED_ZONE_SLOW
        };
        state.clock.start_speed_zone(SPEED_ZONE_DURATION_MS);
        log::debug!("Speed zone x{} at {:.0}ms", state.speed_mod, now);
        state.events.push(GameEvent::SpeedZone {
            speed_mod: state.speed_mod,
        });
    }

    // Beat
    let steps = state.clock.beat_steps();
    state.beat_phase = ((state.beat_phase as u32 + steps) % BEAT_STEPS as u32) as u8;

    // Scroll
    let scroll = state.base_speed() * state.speed_mod;
    state.distance += scroll;
    for pipe in &mut state.pipes {
        pipe.x -= scroll;
    }
    for collectible in &mut state.collectibles {
        collectible.x -= scroll;
    }

    crash
}
