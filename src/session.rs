//! Session lifecycle
//!
//! A `Session` wraps one `GameState` with everything the host loop needs:
//! input latching between frames, the wall clock, asset-load callbacks and
//! restart/teardown. Restart and teardown bump a generation counter; any
//! callback carrying an older generation is dropped, so nothing queued by a
//! previous session can reach the new one.

use glam::Vec2;

use crate::audio::{AudioSink, SoundEffect};
use crate::platform::Clock;
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, SpriteKind, SpriteSizes, TickInput, tick};
use crate::snapshot::RenderSnapshot;

pub struct Session {
    settings: Settings,
    state: GameState,
    clock: Box<dyn Clock>,
    /// Sprite sizes already reported; kept across restarts
    sprites: SpriteSizes,
    generation: u64,
    running: bool,
    /// Latched input for the next tick
    input: TickInput,
}

impl Session {
    pub fn new(settings: Settings, clock: Box<dyn Clock>, seed: u64) -> Self {
        log::info!("Session created with seed {}", seed);
        Self {
            state: GameState::new(&settings, seed),
            settings,
            clock,
            sprites: SpriteSizes::default(),
            generation: 1,
            running: true,
            input: TickInput::default(),
        }
    }

    /// Tag for asset callbacks issued now
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Leave the start screen
    pub fn start(&mut self) {
        if !self.running {
            return;
        }
        self.state.start();
        log::info!("Game started");
    }

    /// Throw away all game state and begin again from the start screen
    pub fn restart(&mut self, seed: u64) {
        self.generation += 1;
        self.running = true;
        self.input = TickInput::default();
        self.state = GameState::with_sprites(&self.settings, seed, self.sprites);
        log::info!(
            "Session restarted (generation {}, seed {})",
            self.generation,
            seed
        );
    }

    /// Stop for good: later frames and callbacks are ignored
    pub fn teardown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.generation += 1;
        self.input = TickInput::default();
        log::info!("Session torn down");
    }

    /// Asset loader reports a sprite's pixel size.
    ///
    /// Returns false when the callback is stale (issued before a restart or
    /// teardown) or the size is unusable.
    pub fn sprite_loaded(&mut self, generation: u64, kind: SpriteKind, width: f32, height: f32) -> bool {
        if !self.running || generation != self.generation {
            log::debug!(
                "Dropping stale {:?} sprite callback (generation {}, current {})",
                kind,
                generation,
                self.generation
            );
            return false;
        }
        if !(width > 0.0 && height > 0.0) {
            log::warn!("Ignoring {:?} sprite with size {}x{}", kind, width, height);
            return false;
        }
        let size = Vec2::new(width, height);
        match kind {
            SpriteKind::Player => self.sprites.player = Some(size),
            SpriteKind::Enemy => self.sprites.enemy = Some(size),
            SpriteKind::Boss => self.sprites.boss = Some(size),
        }
        self.state.install_sprite(kind, size);
        true
    }

    /// Host canvas changed size. Remembered so a restart builds the new
    /// arena at the same size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !self.running || !(width > 0.0 && height > 0.0) {
            return;
        }
        self.settings.canvas_width = width;
        self.settings.canvas_height = height;
        self.state.resize(width, height);
    }

    /// Merge host input into the latch. Held keys take the latest value;
    /// presses stay set until a tick consumes them.
    pub fn queue_input(&mut self, input: &TickInput) {
        self.input.move_left = input.move_left;
        self.input.move_right = input.move_right;
        self.input.jump |= input.jump;
        self.input.fire |= input.fire;
        self.input.reload |= input.reload;
    }

    /// Run one tick and return the events it produced
    pub fn step(&mut self) -> Vec<GameEvent> {
        if !self.running {
            return Vec::new();
        }
        let now = self.clock.now_ms();
        tick(&mut self.state, &self.input, now);

        // Clear one-shot inputs after processing
        self.input.jump = false;
        self.input.fire = false;
        self.input.reload = false;

        self.state.drain_events()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Full frame: tick, play sounds, hand the snapshot to the renderer.
    /// Returns false once the session is torn down.
    pub fn frame(&mut self, renderer: &mut dyn Renderer, audio: &mut dyn AudioSink) -> bool {
        if !self.running {
            return false;
        }
        for event in self.step() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                audio.play(effect);
            }
        }
        renderer.present(&self.snapshot());
        true
    }
}
