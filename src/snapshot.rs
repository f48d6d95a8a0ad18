//! Read-only frame data for the renderer
//!
//! Built once per tick after the simulation has advanced. The renderer
//! gets positions, sizes and flags; it never touches `GameState`.

use serde::{Deserialize, Serialize};

use crate::consts::BOSS_HEALTH;
use crate::sim::{AmmoStatus, Arena, Bullet, Facing, Fireball, GamePhase, GameState, Rect};

/// One sprite to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub hitbox: Rect,
    /// Touching the player this tick (hitbox overlay colouring)
    pub colliding: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub sprite: SpriteView,
    /// False on invulnerability flicker frames
    pub visible: bool,
    pub on_ground: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub sprite: SpriteView,
    pub health: i32,
    pub max_health: i32,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudData {
    pub score: u64,
    pub lives_remaining: u8,
    pub max_lives: u8,
    pub ammo: AmmoStatus,
    pub enemies_killed: u32,
    pub kills_for_boss: u32,
    pub boss_active: bool,
    pub boss_health: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub arena: Arena,
    pub player: Option<PlayerView>,
    pub enemies: Vec<SpriteView>,
    pub boss: Option<BossView>,
    pub bullets: Vec<SpriteView>,
    pub fireballs: Vec<SpriteView>,
    pub hud: HudData,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = state.player.as_ref().map(|p| PlayerView {
            sprite: SpriteView {
                x: p.pos.x,
                y: p.pos.y,
                width: p.size().x,
                height: p.size().y,
                facing: p.facing,
                hitbox: p.collision_box(),
                colliding: false,
            },
            visible: !state.health.should_flicker(),
            on_ground: p.on_ground,
        });

        let enemies = state
            .enemies
            .iter()
            .map(|e| SpriteView {
                x: e.pos.x,
                y: e.pos.y,
                width: e.size().x,
                height: e.size().y,
                facing: e.facing,
                hitbox: e.collision_box(),
                colliding: e.colliding,
            })
            .collect();

        let boss = state.boss.as_ref().map(|b| BossView {
            sprite: SpriteView {
                x: b.pos.x,
                y: b.pos.y,
                width: b.size().x,
                height: b.size().y,
                facing: b.facing,
                hitbox: b.collision_box(),
                colliding: b.colliding,
            },
            health: b.health,
            max_health: BOSS_HEALTH,
        });

        let bullets = state.bullets.iter().map(bullet_view).collect();
        let fireballs = state.fireballs.iter().map(fireball_view).collect();

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            arena: state.arena,
            player,
            enemies,
            boss,
            bullets,
            fireballs,
            hud: HudData::capture(state),
        }
    }
}

fn bullet_view(b: &Bullet) -> SpriteView {
    let size = Bullet::size();
    SpriteView {
        x: b.pos.x,
        y: b.pos.y,
        width: size.x,
        height: size.y,
        facing: b.facing,
        hitbox: b.collision_box(),
        colliding: false,
    }
}

fn fireball_view(f: &Fireball) -> SpriteView {
    let size = Fireball::size();
    SpriteView {
        x: f.pos.x,
        y: f.pos.y,
        width: size.x,
        height: size.y,
        facing: if f.vel.x < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        },
        hitbox: f.collision_box(),
        colliding: false,
    }
}

impl HudData {
    pub fn capture(state: &GameState) -> Self {
        Self {
            score: state.score,
            lives_remaining: state.health.lives(),
            max_lives: state.settings.initial_lives,
            ammo: state.ammo.status(),
            enemies_killed: state.enemies_killed,
            kills_for_boss: state.settings.kills_for_boss,
            boss_active: state.boss_active(),
            boss_health: state.boss.as_ref().map(|b| b.health),
        }
    }

    /// Boss health bar fill, 0.0-1.0
    pub fn boss_health_ratio(&self) -> f32 {
        self.boss_health
            .map(|h| h.max(0) as f32 / BOSS_HEALTH as f32)
            .unwrap_or(0.0)
    }
}
