//! Read-only frame view for presentation

use serde::Serialize;

use super::state::{Collectible, GameEvent, GamePhase, Pipe, SessionState};
use crate::consts::NIGHT_VISION_RADIUS;

/// Everything a renderer/HUD needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot<'a> {
    pub stage_id: u8,
    pub stage_name: &'static str,
    pub theme: &'static str,
    pub mechanic: &'static str,
    pub level: u8,
    pub phase: GamePhase,
    pub position: f32,
    pub velocity: f32,
    pub pipes: &'a [Pipe],
    pub collectibles: &'a [Collectible],
    pub score: u32,
    pub target_pipes: u32,
    pub distance: f32,
    pub beat_phase: u8,
    pub wind: f32,
    pub speed_mod: f32,
    pub elapsed_ms: f64,
    pub events: &'a [GameEvent],
    /// Visible radius around the character on night stages
    pub vision_radius: Option<f32>,
}

impl SessionState {
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            stage_id: self.stage.id,
            stage_name: self.stage.name,
            theme: self.stage.theme,
            mechanic: self.stage.mechanic.as_str(),
            level: self.level,
            phase: self.phase,
            position: self.position,
            velocity: self.velocity,
            pipes: &self.pipes,
            collectibles: &self.collectibles,
            score: self.score,
            target_pipes: self.target_pipes,
            distance: self.distance,
            beat_phase: self.beat_phase,
            wind: self.wind,
            speed_mod: self.speed_mod,
            elapsed_ms: self.clock.elapsed_ms(),
            events: &self.events,
            vision_radius: self.stage.mechanic.has_night().then_some(NIGHT_VISION_RADIUS),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::STAGES;
    use crate::sim::state::SessionState;

    #[test]
    fn test_night_limits_vision() {
        let night = SessionState::new(STAGES[5], 1, 1);
        assert_eq!(night.snapshot().vision_radius, Some(150.0));
        let day = SessionState::new(STAGES[0], 1, 1);
        assert_eq!(day.snapshot().vision_radius, None);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = SessionState::new(STAGES[8], 3, 5);
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["target_pipes"], 5 + 6 + 8);
        assert_eq!(json["pipes"].as_array().unwrap().len(), 5);
        assert_eq!(json["phase"], "Running");
        assert_eq!(json["mechanic"], "double_pipes");
        assert_eq!(json["events"].as_array().unwrap().len(), 0);
    }
}
