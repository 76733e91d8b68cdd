//! Session controller
//!
//! Menu navigation and match lifecycle:
//!
//! ```text
//! Idle -> SelectingStage -> SelectingLevel -> Running -> Ended
//!                 ^               ^  |            |         |
//!                 |               |  +--- back ---+         |
//!                 |               +------ back / pick ------+
//! ```
//!
//! Progress rewards are applied and saved the moment a session is won.
//! Every start or exit bumps a generation counter; frame drivers that hold
//! an old generation are ignored.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::catalog::{self, StageDefinition};
use crate::persistence::ProgressStore;
use crate::progress::ProgressRecord;
use crate::sim::{self, FrameSnapshot, Outcome, SessionState, TickInput};

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    /// Top-level menu
    Idle,
    SelectingStage,
    SelectingLevel { stage: u8 },
    Running,
    Ended { outcome: Outcome, points_awarded: u8 },
}

/// Owns progress, the active session and navigation state
pub struct Controller {
    store: ProgressStore,
    progress: ProgressRecord,
    screen: Screen,
    session: Option<SessionState>,
    generation: u64,
    /// Source of per-session seeds
    seeder: Pcg32,
}

impl Controller {
    /// Controller with progress loaded from `store` and unpredictable seeds
    pub fn new(store: ProgressStore) -> Self {
        Self::with_seed(store, rand::random())
    }

    /// Controller whose sessions are reproducible from `seed`
    pub fn with_seed(store: ProgressStore, seed: u64) -> Self {
        let progress = store.load();
        Self {
            store,
            progress,
            screen: Screen::Idle,
            session: None,
            generation: 0,
            seeder: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn progress(&self) -> &ProgressRecord {
        &self.progress
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Handle identifying the current session
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> Option<FrameSnapshot<'_>> {
        self.session.as_ref().map(SessionState::snapshot)
    }

    /// Idle -> stage list
    pub fn open_stage_select(&mut self) {
        if self.screen == Screen::Idle {
            self.screen = Screen::SelectingStage;
        }
    }

    /// Pick a stage; no-op (false) if it is locked or we're not on the stage list
    pub fn select_stage(&mut self, stage_id: u8) -> bool {
        if self.screen != Screen::SelectingStage || !self.progress.is_unlocked(stage_id) {
            return false;
        }
        self.screen = Screen::SelectingLevel { stage: stage_id };
        true
    }

    /// Start `level` of the selected stage (from level select or the end screen)
    pub fn start(&mut self, level: u8) -> bool {
        let stage_id = match (self.screen, &self.session) {
            (Screen::SelectingLevel { stage }, _) => stage,
            (Screen::Ended { .. }, Some(session)) => session.stage.id,
            _ => return false,
        };
        self.start_session(stage_id, level)
    }

    /// Replay the current stage and level with a fresh session
    pub fn retry(&mut self) -> bool {
        let Some((stage_id, level)) = self.session.as_ref().map(|s| (s.stage.id, s.level)) else {
            return false;
        };
        if !matches!(self.screen, Screen::Running | Screen::Ended { .. }) {
            return false;
        }
        self.start_session(stage_id, level)
    }

    fn start_session(&mut self, stage_id: u8, level: u8) -> bool {
        let Some(stage) = catalog::stage(stage_id) else {
            return false;
        };
        if !self.progress.is_level_unlocked(stage_id, level) {
            log::info!("Level {} of {} is locked", level, stage.name);
            return false;
        }
        self.begin(*stage, level);
        true
    }

    fn begin(&mut self, stage: StageDefinition, level: u8) {
        let seed = self.seeder.random();
        self.generation += 1;
        let session = SessionState::new(stage, level, seed);
        log::info!(
            "Starting {} level {} (target {}, seed {})",
            stage.name,
            level,
            session.target_pipes,
            seed
        );
        self.session = Some(session);
        self.screen = Screen::Running;
    }

    /// Cancel/back: running -> level select, anything else -> top menu
    pub fn back(&mut self) {
        match self.screen {
            Screen::Running => {
                let stage = self.session.as_ref().map(|s| s.stage.id).unwrap_or(0);
                self.generation += 1;
                self.session = None;
                self.screen = Screen::SelectingLevel { stage };
            }
            _ => {
                if self.session.take().is_some() {
                    self.generation += 1;
                }
                self.screen = Screen::Idle;
            }
        }
    }

    /// Flap input; ignored unless a session is running
    pub fn flap(&mut self) -> bool {
        match (self.screen, self.session.as_mut()) {
            (Screen::Running, Some(session)) if session.is_running() => {
                sim::flap(session);
                true
            }
            _ => false,
        }
    }

    /// Advance the running session one frame
    pub fn tick(&mut self, input: &TickInput) -> Option<Outcome> {
        if self.screen != Screen::Running {
            return None;
        }
        let outcome = sim::tick(self.session.as_mut()?, input)?;
        self.on_ended(outcome);
        Some(outcome)
    }

    /// Tick on behalf of a driver started for `generation`; stale drivers are ignored
    pub fn tick_for(&mut self, generation: u64, input: &TickInput) -> Option<Outcome> {
        if generation != self.generation {
            log::debug!("Ignoring tick from stale generation {generation}");
            return None;
        }
        self.tick(input)
    }

    fn on_ended(&mut self, outcome: Outcome) {
        let mut points_awarded = 0;
        if let (Outcome::Won, Some(session)) = (outcome, &self.session) {
            let before = self.progress.points_for(session.stage.id);
            self.progress = self
                .progress
                .record_win(session.stage.id, session.percentage_of_target());
            points_awarded = self.progress.points_for(session.stage.id) - before;
            self.store.save(&self.progress);
            log::info!(
                "{} won: +{} points ({} stars)",
                session.stage.name,
                points_awarded,
                self.progress.stars_for(session.stage.id)
            );
        }
        self.screen = Screen::Ended {
            outcome,
            points_awarded,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KeyValueStore, MemoryStore, PROGRESS_KEY};
    use crate::sim::{Crash, GameEvent, GamePhase, Pipe};

    fn controller() -> Controller {
        Controller::with_seed(ProgressStore::in_memory(), 42)
    }

    fn controller_with_progress(points: [u8; 10]) -> Controller {
        let mut backend = MemoryStore::default();
        let json = serde_json::to_string(&ProgressRecord { points }).unwrap();
        backend.set(PROGRESS_KEY, &json).unwrap();
        Controller::with_seed(ProgressStore::new(Box::new(backend)), 42)
    }

    fn running(ctrl: &mut Controller, stage: u8, level: u8) {
        ctrl.open_stage_select();
        assert!(ctrl.select_stage(stage));
        assert!(ctrl.start(level));
        assert_eq!(ctrl.screen(), Screen::Running);
    }

    /// Drive the running session to a win with `score` points
    fn force_win(ctrl: &mut Controller, score: u32) -> Option<Outcome> {
        let session = ctrl.session.as_mut().unwrap();
        session.score = score - 1;
        session.position = 40.0;
        session.velocity = -0.4;
        session.pipes = vec![Pipe {
            id: 99,
            x: 15.5,
            gap_y: 80.0,
            gap_size: 240.0,
            base_y: 80.0,
            phase: 0.0,
            passed: false,
            second_gap: None,
        }];
        ctrl.tick(&TickInput::default())
    }

    #[test]
    fn test_navigation_flow() {
        let mut ctrl = controller();
        assert_eq!(ctrl.screen(), Screen::Idle);
        assert!(!ctrl.select_stage(0));
        ctrl.open_stage_select();
        assert_eq!(ctrl.screen(), Screen::SelectingStage);
        assert!(ctrl.select_stage(0));
        assert_eq!(ctrl.screen(), Screen::SelectingLevel { stage: 0 });
        assert!(ctrl.start(1));
        assert_eq!(ctrl.session().unwrap().target_pipes, 7);

        ctrl.back();
        assert_eq!(ctrl.screen(), Screen::SelectingLevel { stage: 0 });
        assert!(ctrl.session().is_none());
        ctrl.back();
        assert_eq!(ctrl.screen(), Screen::Idle);
    }

    #[test]
    fn test_locked_stage_and_level_are_noops() {
        let mut ctrl = controller();
        ctrl.open_stage_select();
        assert!(!ctrl.select_stage(1));
        assert_eq!(ctrl.screen(), Screen::SelectingStage);
        assert!(ctrl.select_stage(0));
        assert!(!ctrl.start(2));
        assert!(!ctrl.start(0));
        assert_eq!(ctrl.screen(), Screen::SelectingLevel { stage: 0 });
    }

    #[test]
    fn test_win_awards_one_point_and_persists() {
        let mut ctrl = controller();
        running(&mut ctrl, 0, 1);
        assert_eq!(force_win(&mut ctrl, 7), Some(Outcome::Won));
        assert_eq!(
            ctrl.screen(),
            Screen::Ended { outcome: Outcome::Won, points_awarded: 1 }
        );
        assert_eq!(ctrl.progress().points[0], 1);
        assert_eq!(ctrl.store.load().points[0], 1);
    }

    #[test]
    fn test_big_win_awards_two_points() {
        let mut ctrl = controller();
        running(&mut ctrl, 0, 1);
        assert_eq!(force_win(&mut ctrl, 11), Some(Outcome::Won));
        assert_eq!(ctrl.progress().points[0], 2);
    }

    #[test]
    fn test_loss_awards_nothing() {
        let mut ctrl = controller();
        running(&mut ctrl, 0, 1);
        {
            let s = ctrl.session.as_mut().unwrap();
            s.position = 95.0;
            s.velocity = 10.0;
            s.score = 50;
        }
        assert_eq!(
            ctrl.tick(&TickInput::default()),
            Some(Outcome::Lost(Crash::Floor))
        );
        assert_eq!(ctrl.progress().points[0], 0);
        assert!(matches!(ctrl.screen(), Screen::Ended { points_awarded: 0, .. }));
        assert!(!ctrl.flap());
        assert_eq!(ctrl.tick(&TickInput::default()), None);
    }

    #[test]
    fn test_retry_starts_fresh_session() {
        let mut ctrl = controller();
        running(&mut ctrl, 0, 1);
        for _ in 0..5 {
            ctrl.tick(&TickInput::default());
        }
        let first_gen = ctrl.generation();
        let first_seed = ctrl.session().unwrap().seed;
        assert!(ctrl.retry());
        let session = ctrl.session().unwrap();
        assert_eq!(session.time_ticks, 0);
        assert_eq!(session.stage.id, 0);
        assert_eq!(session.level, 1);
        assert_ne!(session.seed, first_seed);
        assert!(ctrl.generation() > first_gen);
    }

    #[test]
    fn test_stale_generation_ignored() {
        let mut ctrl = controller();
        running(&mut ctrl, 0, 1);
        let old = ctrl.generation();
        ctrl.retry();
        assert_eq!(ctrl.tick_for(old, &TickInput::default()), None);
        assert_eq!(ctrl.session().unwrap().time_ticks, 0);

        let current = ctrl.generation();
        ctrl.tick_for(current, &TickInput::default());
        assert_eq!(ctrl.session().unwrap().time_ticks, 1);
    }

    #[test]
    fn test_flap_only_while_running() {
        let mut ctrl = controller();
        assert!(!ctrl.flap());
        running(&mut ctrl, 0, 1);
        assert!(ctrl.flap());
        assert_eq!(ctrl.session().unwrap().velocity, -7.0);

        ctrl.tick(&TickInput { pause: true, ..Default::default() });
        assert_eq!(ctrl.session().unwrap().phase, GamePhase::Paused);
        assert!(!ctrl.flap());
    }

    #[test]
    fn test_flap_event_survives_into_next_frame() {
        let mut ctrl = controller();
        running(&mut ctrl, 0, 1);
        assert!(ctrl.flap());
        ctrl.tick(&TickInput::default());
        assert!(ctrl.session().unwrap().events.contains(&GameEvent::Flap));
        assert_eq!(ctrl.snapshot().unwrap().events, &[GameEvent::Flap]);

        ctrl.tick(&TickInput::default());
        assert!(ctrl.session().unwrap().events.is_empty());
    }

    #[test]
    fn test_unlocked_progress_allows_next_stage() {
        let mut ctrl = controller_with_progress([40, 4, 0, 0, 0, 0, 0, 0, 0, 0]);
        ctrl.open_stage_select();
        assert!(ctrl.select_stage(1));
        assert!(ctrl.start(2));
        assert_eq!(ctrl.session().unwrap().target_pipes, 5 + 4 + 1);
    }

    #[test]
    fn test_start_from_end_screen() {
        let mut ctrl = controller_with_progress([8, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        running(&mut ctrl, 0, 1);
        force_win(&mut ctrl, 7);
        assert!(ctrl.start(3));
        assert_eq!(ctrl.session().unwrap().level, 3);
        ctrl.back();
        assert_eq!(ctrl.screen(), Screen::SelectingLevel { stage: 0 });
    }

    #[test]
    fn test_screen_serializes_for_host() {
        let mut ctrl = controller();
        running(&mut ctrl, 0, 1);
        force_win(&mut ctrl, 7);
        let json = serde_json::to_value(ctrl.screen()).unwrap();
        assert_eq!(json["Ended"]["outcome"], "Won");
        assert_eq!(json["Ended"]["points_awarded"], 1);
    }

    #[test]
    fn test_back_from_end_screen_goes_home() {
        let mut ctrl = controller();
        running(&mut ctrl, 0, 1);
        force_win(&mut ctrl, 7);
        let before = ctrl.generation();
        ctrl.back();
        assert_eq!(ctrl.screen(), Screen::Idle);
        assert!(ctrl.session().is_none());
        assert!(ctrl.generation() > before);
    }
}
