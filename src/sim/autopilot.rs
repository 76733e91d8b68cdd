//! Demo-mode pilot
//!
//! Flaps when the character is about to sink past the gap it is heading
//! for. Good enough for an attract screen, not a perfect player.

use super::state::{Gap, SessionState};
use crate::consts::*;

/// Gap the character should aim for: the nearest pipe not yet behind it
pub fn target_gap(state: &SessionState) -> Option<Gap> {
    let pipe = state
        .pipes
        .iter()
        .filter(|p| p.x + PIPE_WIDTH > CHARACTER_X - CHARACTER_HALF_WIDTH)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))?;

    // On double pipes pick whichever gap is closer to where we are
    let py = state.character_py();
    let primary = pipe.gap();
    Some(match pipe.second_gap {
        Some(second) if (second.center() - py).abs() < (primary.center() - py).abs() => second,
        _ => primary,
    })
}

/// Whether the pilot would flap this frame
pub fn wants_flap(state: &SessionState) -> bool {
    if state.velocity < 0.0 {
        return false;
    }

    // Where we'll be next frame, in pixels
    let next_velocity = (state.velocity + state.stage.gravity).min(MAX_FALL_SPEED);
    let next_position = state.position + next_velocity;
    if next_position > FLOOR_LIMIT - 1.0 {
        return true;
    }

    let next_py = next_position * POSITION_TO_PX;
    match target_gap(state) {
        Some(gap) => next_py > gap.bottom() - gap.size * 0.2,
        None => next_position > START_POSITION,
    }
}
