//! Browser bindings
//!
//! The host page owns the frame loop (`requestAnimationFrame`) and rendering.
//! It drives a [`WebGame`] and reads frames back as JSON. Progress lives in
//! LocalStorage.

use wasm_bindgen::prelude::*;

use crate::persistence::ProgressStore;
use crate::session::Controller;
use crate::sim::TickInput;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    crate::platform::init_logging();
    log::info!("Flappy Teddy (web) loaded");
}

fn to_json<T: serde::Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value)
        .map_err(|e| log::error!("Failed to serialize frame data: {e}"))
        .ok()
}

/// Controller handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    ctrl: Controller,
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        WebGame {
            ctrl: Controller::new(ProgressStore::platform_default()),
        }
    }

    pub fn open_stage_select(&mut self) {
        self.ctrl.open_stage_select();
    }

    pub fn select_stage(&mut self, stage: u8) -> bool {
        self.ctrl.select_stage(stage)
    }

    pub fn start(&mut self, level: u8) -> bool {
        self.ctrl.start(level)
    }

    pub fn retry(&mut self) -> bool {
        self.ctrl.retry()
    }

    pub fn back(&mut self) {
        self.ctrl.back();
    }

    pub fn flap(&mut self) -> bool {
        self.ctrl.flap()
    }

    /// Handle to pass back into `tick`; changes on every start/exit
    pub fn generation(&self) -> u64 {
        self.ctrl.generation()
    }

    /// Advance one frame; returns the outcome as JSON on the ending frame
    pub fn tick(&mut self, generation: u64, pause: bool, autopilot: bool) -> Option<String> {
        let input = TickInput {
            flap: false,
            pause,
            autopilot,
        };
        self.ctrl.tick_for(generation, &input).and_then(|o| to_json(&o))
    }

    /// Current frame as JSON, or nothing outside a session
    pub fn snapshot(&self) -> Option<String> {
        self.ctrl.snapshot().and_then(|s| to_json(&s))
    }

    pub fn screen(&self) -> Option<String> {
        to_json(&self.ctrl.screen())
    }

    /// Per-stage progress points as a JSON array
    pub fn progress(&self) -> Option<String> {
        to_json(self.ctrl.progress())
    }

    pub fn total_stars(&self) -> u32 {
        self.ctrl.progress().total_stars()
    }

    pub fn max_level(&self, stage: u8) -> u8 {
        self.ctrl.progress().max_level(stage)
    }
}
