//! Obstacle generation
//!
//! One routine builds every pipe, for the initial run-up as well as for
//! replacements during play.

use rand::Rng;

use super::state::{Collectible, Gap, Pipe, SessionState};
use crate::catalog::StageDefinition;
use crate::consts::*;
use crate::level_gap_mod;

/// Build a pipe at scroll position `x`
///
/// Gaps shrink with level (stage gap divided by the level modifier) and the
/// primary gap always lies inside the `[GAP_BAND_TOP, GAP_BAND_BOTTOM]` band.
pub fn generate_pipe<R: Rng>(
    rng: &mut R,
    id: u32,
    x: f32,
    stage: &StageDefinition,
    level: u8,
) -> Pipe {
    let gap_size = stage.gap_size / level_gap_mod(level);
    let max_y = (GAP_BAND_BOTTOM - gap_size).max(GAP_BAND_TOP);
    let gap_y = rng.random_range(GAP_BAND_TOP..=max_y);
    let phase = rng.random::<f32>() * std::f32::consts::TAU;

    let second_gap = if stage.mechanic.has_double_pipes() && rng.random_bool(DOUBLE_PIPE_CHANCE) {
        Some(Gap {
            y: gap_y + gap_size + SECOND_GAP_BUFFER + rng.random::<f32>() * SECOND_GAP_JITTER,
            size: gap_size * SECOND_GAP_RATIO,
        })
    } else {
        None
    };

    Pipe {
        id,
        x,
        gap_y,
        gap_size,
        base_y: gap_y,
        phase,
        passed: false,
        second_gap,
    }
}

/// Pickup centred in the pipe's primary gap, just past its leading edge
pub fn collectible_for(pipe: &Pipe) -> Collectible {
    Collectible {
        id: pipe.id,
        x: pipe.x + COLLECTIBLE_OFFSET,
        y: pipe.gap().center(),
        collected: false,
    }
}

/// Generate a pipe (plus collectible where the stage has them) and track it
pub fn spawn_pipe(state: &mut SessionState, x: f32) {
    let id = state.next_entity_id();
    let pipe = generate_pipe(&mut state.rng, id, x, &state.stage, state.level);
    log::debug!(
        "Pipe {} at x={:.0}: gap {:.0}+{:.0}{}",
        pipe.id,
        pipe.x,
        pipe.gap_y,
        pipe.gap_size,
        if pipe.is_double() { " (double)" } else { "" }
    );
    if state.stage.mechanic.has_collectibles() {
        state.collectibles.push(collectible_for(&pipe));
    }
    state.pipes.push(pipe);
}

/// Initial run-up: pipes spaced evenly ahead of the character
pub fn seed_pipes(state: &mut SessionState) {
    for i in 0..MIN_ACTIVE_PIPES {
        spawn_pipe(state, INITIAL_PIPE_X + i as f32 * PIPE_SPACING);
    }
}

/// Top up to the minimum pipe count behind the furthest pipe
pub fn replenish_pipes(state: &mut SessionState) {
    while state.pipes.len() < MIN_ACTIVE_PIPES {
        let x = state
            .pipes
            .iter()
            .map(|p| p.x)
            .reduce(f32::max)
            .map(|furthest| furthest + PIPE_SPACING)
            .unwrap_or(INITIAL_PIPE_X);
        spawn_pipe(state, x);
    }
}
