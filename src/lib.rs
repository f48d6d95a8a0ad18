//! Side Blaster - a side-scrolling platform shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, combat, wave/boss progression)
//! - `session`: Session lifecycle, input latching, per-frame drive
//! - `snapshot`: Read-only view of the simulation handed to the renderer
//! - `renderer` / `audio`: Adapter seams for drawing and sound
//! - `platform`: Clock and browser bindings
//! - `settings`: Gameplay configuration

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use session::Session;
pub use settings::{Settings, SettingsError};
pub use snapshot::{HudData, RenderSnapshot};

/// Game tuning constants
pub mod consts {
    /// Nominal display refresh the tick is aligned to
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Gravity added to vertical velocity every tick (px/tick²)
    pub const GRAVITY: f32 = 0.8;
    /// Vertical velocity applied by a jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -18.0;
    /// Horizontal acceleration while a direction is held (px/tick²)
    pub const PLAYER_ACCEL: f32 = 1.0;
    /// Horizontal deceleration with no direction held
    pub const PLAYER_FRICTION: f32 = 1.0;
    /// Horizontal speed cap (px/tick)
    pub const PLAYER_MAX_SPEED: f32 = 6.0;
    /// Player and enemy hitboxes are inset by width/6 and height/6 per side
    pub const ACTOR_HITBOX_INSET: f32 = 6.0;

    /// Enemies are scaled so they all display at this width
    pub const ENEMY_TARGET_WIDTH: f32 = 24.0;
    pub const ENEMY_MIN_SCALE: f32 = 0.25;
    pub const ENEMY_MAX_SCALE: f32 = 2.0;
    /// Pursuit speed (px/tick)
    pub const ENEMY_SPEED: f32 = 1.0;
    /// Speed of a freshly spawned enemy before it has a target
    pub const ENEMY_WANDER_SPEED: f32 = 2.0;
    /// Horizontal gap under which an enemy stops chasing
    pub const ENEMY_CHASE_DEADZONE: f32 = 5.0;
    /// Margin from the right edge for the first enemy of a wave
    pub const WAVE_EDGE_MARGIN: f32 = 48.0;
    /// Enemies in a fresh wave
    pub const WAVE_START_ENEMIES: usize = 2;
    pub const DEFAULT_ENEMY_SPRITE: (f32, f32) = (32.0, 32.0);

    pub const BOSS_SCALE: f32 = 0.15;
    pub const BOSS_HEALTH: i32 = 2;
    /// Boss hitbox is inset by width/12 and height/12 per side
    pub const BOSS_HITBOX_INSET: f32 = 12.0;
    /// Distance of the boss from the canvas edge it spawns on
    pub const BOSS_EDGE_MARGIN: f32 = 80.0;
    pub const DEFAULT_BOSS_SPRITE: (f32, f32) = (64.0, 64.0);

    pub const BULLET_SPRITE: f32 = 16.0;
    pub const BULLET_SCALE: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 6.0;
    /// Muzzle height as a fraction of player height
    pub const BULLET_MUZZLE_HEIGHT: f32 = 0.4;
    /// Bullets are culled this far past either horizontal edge
    pub const BULLET_CULL_MARGIN: f32 = 50.0;

    pub const FIREBALL_SPRITE: f32 = 16.0;
    pub const FIREBALL_SCALE: f32 = 1.5;
    pub const FIREBALL_SPEED: f32 = 4.0;
    pub const FIREBALL_CULL_MIN: f32 = -50.0;
    pub const FIREBALL_CULL_MAX: f32 = 9999.0;

    /// Score for a regular enemy
    pub const ENEMY_SCORE: u64 = 10;
    /// Score for defeating the boss
    pub const BOSS_SCORE: u64 = 100;

    /// Invulnerability flicker period (ticks per on/off half-cycle)
    pub const FLICKER_PERIOD: u32 = 10;
}

/// Displayed length of a sprite edge: source length times scale, whole pixels
#[inline]
pub fn displayed(len: f32, scale: f32) -> f32 {
    (len * scale).round()
}
