//! Player bullets and boss fireballs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actors::{Boss, Facing, Player};
use super::collision::Rect;
use crate::consts::*;
use crate::displayed;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
}

impl Bullet {
    /// Fire from the player's muzzle in the direction they face
    pub fn from_player(player: &Player) -> Self {
        let player_size = player.size();
        let width = Self::size().x;
        let x = match player.facing {
            Facing::Right => player.pos.x + player_size.x,
            Facing::Left => player.pos.x - width,
        };
        let y = player.pos.y + (player_size.y * BULLET_MUZZLE_HEIGHT).round();
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(player.facing.sign() * BULLET_SPEED, 0.0),
            facing: player.facing,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::splat(displayed(BULLET_SPRITE, BULLET_SCALE))
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn collision_box(&self) -> Rect {
        Rect::from_pos_size(self.pos, Self::size())
    }

    pub fn is_off_screen(&self, arena_width: f32) -> bool {
        self.pos.x < -BULLET_CULL_MARGIN || self.pos.x > arena_width + BULLET_CULL_MARGIN
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fireball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Fireball {
    /// Launch from the boss center toward the player's current column.
    ///
    /// The aim is fixed at launch; the fireball never re-targets.
    pub fn launch(boss: &Boss, target_x: f32) -> Self {
        let origin = boss.center();
        let aim = Vec2::new(target_x - origin.x, 0.0).normalize_or_zero();
        let dir = if aim == Vec2::ZERO {
            Vec2::new(boss.facing.sign(), 0.0)
        } else {
            aim
        };
        Self {
            pos: origin,
            vel: dir * FIREBALL_SPEED,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::splat(displayed(FIREBALL_SPRITE, FIREBALL_SCALE))
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn collision_box(&self) -> Rect {
        Rect::from_pos_size(self.pos, Self::size())
    }

    /// Loose bound: the boss arena keeps fireballs on a known path
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < FIREBALL_CULL_MIN
            || self.pos.x > FIREBALL_CULL_MAX
            || self.pos.y < FIREBALL_CULL_MIN
            || self.pos.y > FIREBALL_CULL_MAX
    }
}
