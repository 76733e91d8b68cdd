//! Collision and scoring
//!
//! The character is a fixed horizontal band at `CHARACTER_X ± CHARACTER_HALF_WIDTH`
//! in a 400 px playfield; its vertical pixel position is the normalized
//! position times four. Pipes are solid except inside their gaps.

use glam::Vec2;

use super::state::{Crash, GameEvent, Outcome, Pipe, SessionState};
use crate::consts::*;

/// Whether the pipe's horizontal extent overlaps the character band
#[inline]
pub fn overlaps_character(pipe: &Pipe) -> bool {
    pipe.x < CHARACTER_X + CHARACTER_HALF_WIDTH && pipe.x + PIPE_WIDTH > CHARACTER_X - CHARACTER_HALF_WIDTH
}

/// Whether a vertical pixel position is inside one of the pipe's gaps
pub fn in_any_gap(pipe: &Pipe, py: f32) -> bool {
    pipe.gap().contains(py) || pipe.second_gap.is_some_and(|g| g.contains(py))
}

/// First pipe the character is touching, if any
pub fn pipe_collision(pipes: &[Pipe], py: f32) -> Option<Crash> {
    pipes
        .iter()
        .find(|p| overlaps_character(p) && !in_any_gap(p, py))
        .map(|p| Crash::Pipe { id: p.id })
}

/// Mark pipes that crossed the character and score them; returns points gained
pub fn score_passes(state: &mut SessionState) -> u32 {
    let mut gained = 0;
    for pipe in &mut state.pipes {
        if !pipe.passed && pipe.x < PASS_X {
            pipe.passed = true;
            gained += 1;
            state.events.push(GameEvent::PipePassed { id: pipe.id });
        }
    }
    state.score += gained;
    gained
}

/// Pick up collectibles within reach; returns points gained
pub fn collect_pickups(state: &mut SessionState) -> u32 {
    let character = Vec2::new(CHARACTER_X, state.character_py());
    let mut gained = 0;
    for c in &mut state.collectibles {
        if c.collected {
            continue;
        }
        let delta = (Vec2::new(c.x, c.y) - character).abs();
        if delta.x < PICKUP_RANGE_X && delta.y < PICKUP_RANGE_Y {
            c.collected = true;
            gained += 1;
            state.events.push(GameEvent::Collected { id: c.id });
        }
    }
    state.score += gained;
    gained
}

/// Drop pipes and collectibles that scrolled off the left edge
pub fn retire_offscreen(state: &mut SessionState) {
    state.pipes.retain(|p| p.x > DESPAWN_X);
    state.collectibles.retain(|c| c.x > DESPAWN_X);
}

/// Evaluate the frame: crashes first, then scoring, then the win check
///
/// `bounds_crash` is the ceiling/floor result from the physics step. A crash
/// ends the session before anything in the same frame is scored.
pub fn evaluate(state: &mut SessionState, bounds_crash: Option<Crash>) -> Option<Outcome> {
    if let Some(crash) = bounds_crash.or_else(|| pipe_collision(&state.pipes, state.character_py())) {
        return Some(Outcome::Lost(crash));
    }

    score_passes(state);
    if state.stage.mechanic.has_collectibles() {
        collect_pickups(state);
    }

    (state.score >= state.target_pipes).then_some(Outcome::Won)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::STAGES;
    use crate::sim::state::{Collectible, Gap};

    fn pipe(x: f32, gap_y: f32, gap_size: f32) -> Pipe {
        Pipe {
            id: 1,
            x,
            gap_y,
            gap_size,
            base_y: gap_y,
            phase: 0.0,
            passed: false,
            second_gap: None,
        }
    }

    #[test]
    fn test_horizontal_overlap() {
        assert!(overlaps_character(&pipe(60.0, 100.0, 150.0)));
        assert!(overlaps_character(&pipe(99.0, 100.0, 150.0)));
        assert!(overlaps_character(&pipe(11.0, 100.0, 150.0)));
        assert!(!overlaps_character(&pipe(100.0, 100.0, 150.0)));
        assert!(!overlaps_character(&pipe(10.0, 100.0, 150.0)));
    }

    #[test]
    fn test_gap_membership_decides_collision() {
        let pipes = [pipe(70.0, 100.0, 150.0)];
        assert_eq!(pipe_collision(&pipes, 200.0), None);
        assert_eq!(pipe_collision(&pipes, 260.0), Some(Crash::Pipe { id: 1 }));
        assert_eq!(pipe_collision(&pipes, 100.0), None);
        assert_eq!(pipe_collision(&pipes, 250.0), Some(Crash::Pipe { id: 1 }));
    }

    #[test]
    fn test_far_pipe_never_collides() {
        let pipes = [pipe(300.0, 100.0, 150.0)];
        assert_eq!(pipe_collision(&pipes, 10.0), None);
    }

    #[test]
    fn test_double_pipe_second_gap_is_safe() {
        let mut p = pipe(70.0, 100.0, 100.0);
        p.second_gap = Some(Gap { y: 260.0, size: 80.0 });
        let pipes = [p];
        assert_eq!(pipe_collision(&pipes, 150.0), None);
        assert_eq!(pipe_collision(&pipes, 300.0), None);
        assert!(pipe_collision(&pipes, 220.0).is_some());
        assert!(pipe_collision(&pipes, 340.0).is_some());
    }

    #[test]
    fn test_pass_scores_once() {
        let mut state = SessionState::new(STAGES[0], 1, 1);
        state.pipes = vec![pipe(14.0, 100.0, 150.0)];
        assert_eq!(score_passes(&mut state), 1);
        assert_eq!(score_passes(&mut state), 0);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].passed);

        state.pipes = vec![pipe(15.0, 100.0, 150.0)];
        assert_eq!(score_passes(&mut state), 0);
    }

    #[test]
    fn test_pickup_once() {
        let mut state = SessionState::new(STAGES[1], 1, 1);
        state.position = 50.0; // 200 px
        state.collectibles = vec![
            Collectible { id: 1, x: 90.0, y: 220.0, collected: false },
            Collectible { id: 2, x: 90.0, y: 240.0, collected: false },
            Collectible { id: 3, x: 101.0, y: 200.0, collected: false },
        ];
        assert_eq!(collect_pickups(&mut state), 1);
        assert_eq!(collect_pickups(&mut state), 0);
        assert!(state.collectibles[0].collected);
        assert!(!state.collectibles[1].collected);
        assert!(!state.collectibles[2].collected);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_pickups_ignored_without_collectible_mechanic() {
        let mut state = SessionState::new(STAGES[0], 1, 1);
        state.position = 50.0;
        state.collectibles = vec![Collectible { id: 1, x: 80.0, y: 200.0, collected: false }];
        assert_eq!(evaluate(&mut state, None), None);
        assert_eq!(state.score, 0);
        assert!(!state.collectibles[0].collected);
    }

    #[test]
    fn test_retire_offscreen() {
        let mut state = SessionState::new(STAGES[1], 1, 1);
        state.pipes[0].x = -50.0;
        state.collectibles[0].x = -50.0;
        state.pipes[1].x = -49.0;
        retire_offscreen(&mut state);
        assert_eq!(state.pipes.len(), 4);
        assert_eq!(state.collectibles.len(), 4);
        assert_eq!(state.pipes[0].x, -49.0);
    }

    #[test]
    fn test_crash_beats_win() {
        let mut state = SessionState::new(STAGES[0], 1, 1);
        state.score = state.target_pipes;
        assert_eq!(
            evaluate(&mut state, Some(Crash::Floor)),
            Some(Outcome::Lost(Crash::Floor))
        );
    }

    #[test]
    fn test_win_when_target_reached() {
        let mut state = SessionState::new(STAGES[0], 1, 1);
        state.score = 6;
        state.pipes = vec![pipe(10.0, 100.0, 150.0)];
        // Pipe at x=10 has just cleared the character band
        state.position = 40.0;
        assert_eq!(evaluate(&mut state, None), Some(Outcome::Won));
        assert_eq!(state.score, 7);
    }

    #[test]
    fn test_no_outcome_mid_flight() {
        let mut state = SessionState::new(STAGES[0], 1, 1);
        assert_eq!(evaluate(&mut state, None), None);
    }
}
