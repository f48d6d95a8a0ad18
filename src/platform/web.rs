//! Browser bindings
//!
//! The page owns the canvas, images and audio elements; it drives a
//! `WebSession` from `requestAnimationFrame` and renders the JSON frame
//! each call returns.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::MonotonicClock;
use crate::audio::{AudioSink, SoundEffect};
use crate::renderer::Renderer;
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::{SpriteKind, TickInput};
use crate::snapshot::RenderSnapshot;

#[wasm_bindgen(start)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialised on hot reload
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Side Blaster starting...");
}

/// Collects one frame's output for the page
#[derive(Default)]
struct FrameCapture {
    snapshot: Option<RenderSnapshot>,
    sounds: Vec<SoundEffect>,
}

impl Renderer for FrameCapture {
    fn present(&mut self, frame: &RenderSnapshot) {
        self.snapshot = Some(frame.clone());
    }
}

impl AudioSink for FrameCapture {
    fn play(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    snapshot: &'a RenderSnapshot,
    sounds: &'a [SoundEffect],
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
}

#[wasm_bindgen]
impl WebSession {
    /// `settings_json` may be omitted; invalid settings fall back to defaults
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>, seed: f64) -> WebSession {
        let settings = match settings_json.as_deref().map(Settings::from_json) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("Bad settings, using defaults: {}", e);
                Settings::default()
            }
            None => Settings::default(),
        };
        WebSession {
            session: Session::new(settings, Box::new(MonotonicClock::new()), seed as u64),
        }
    }

    /// Tag the page must pass back with each sprite load
    pub fn generation(&self) -> f64 {
        self.session.generation() as f64
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    pub fn restart(&mut self, seed: f64) {
        self.session.restart(seed as u64);
    }

    pub fn teardown(&mut self) {
        self.session.teardown();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    /// `kind`: 0 = player, 1 = enemy, 2 = boss
    pub fn sprite_loaded(&mut self, generation: f64, kind: u8, width: f32, height: f32) -> bool {
        let kind = match kind {
            0 => SpriteKind::Player,
            1 => SpriteKind::Enemy,
            2 => SpriteKind::Boss,
            other => {
                log::warn!("Unknown sprite kind {}", other);
                return false;
            }
        };
        self.session
            .sprite_loaded(generation as u64, kind, width, height)
    }

    /// Keyboard state since the last frame. `jump`, `fire` and `reload`
    /// are key-down edges.
    pub fn set_intents(&mut self, left: bool, right: bool, jump: bool, fire: bool, reload: bool) {
        self.session.queue_input(&TickInput {
            move_left: left,
            move_right: right,
            jump,
            fire,
            reload,
        });
    }

    /// Advance one frame; returns `{ snapshot, sounds }` as JSON, or null
    /// after teardown
    pub fn frame(&mut self) -> Result<Option<String>, JsValue> {
        let mut capture = FrameCapture::default();
        let mut audio = FrameCapture::default();
        if !self.session.frame(&mut capture, &mut audio) {
            return Ok(None);
        }
        let Some(snapshot) = capture.snapshot.as_ref() else {
            return Ok(None);
        };
        let output = FrameOutput {
            snapshot,
            sounds: &audio.sounds,
        };
        serde_json::to_string(&output)
            .map(Some)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
