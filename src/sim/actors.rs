//! Player, enemy and boss kinematics
//!
//! Positions are the top-left corner of the displayed sprite in screen
//! pixels. Displayed size is the source sprite size times the actor's scale.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::displayed;

/// Left/right orientation (sprite mirroring, muzzle side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 right, -1 left
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Canvas and ground platform geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub platform_height: f32,
    pub platform_offset: f32,
}

impl Arena {
    /// Top y at which a sprite of `displayed_height` stands on the platform
    pub fn floor_for(&self, displayed_height: f32) -> f32 {
        (self.height - self.platform_height - displayed_height - self.platform_offset)
            .round()
            .max(0.0)
    }
}

/// Movement limits, established from the arena once the sprite size is known
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBounds {
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Source sprite size
    pub sprite: Vec2,
    pub scale: f32,
    pub facing: Facing,
    pub on_ground: bool,
    pub max_speed: f32,
    /// `None` until [`Player::set_bounds`] runs; an unbounded player is not simulated
    bounds: Option<PlayerBounds>,
}

impl Player {
    pub fn new(x: f32, sprite: Vec2, scale: f32) -> Self {
        Self {
            pos: Vec2::new(x.round(), 0.0),
            vel: Vec2::ZERO,
            sprite,
            scale,
            facing: Facing::Right,
            on_ground: false,
            max_speed: PLAYER_MAX_SPEED,
            bounds: None,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(
            displayed(self.sprite.x, self.scale),
            displayed(self.sprite.y, self.scale),
        )
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size().x / 2.0
    }

    pub fn bounds(&self) -> Option<PlayerBounds> {
        self.bounds
    }

    pub fn set_bounds(&mut self, arena: &Arena) {
        self.bounds = Some(PlayerBounds {
            max_x: arena.width,
            min_y: 0.0,
            max_y: arena.floor_for(self.size().y),
        });
    }

    /// Put the player at its start column, `foot_offset` above the floor
    pub fn place_at_start(&mut self, start_x: f32, foot_offset: f32) {
        if let Some(bounds) = self.bounds {
            self.pos.x = start_x.round();
            self.pos.y = (bounds.max_y - foot_offset).round().max(bounds.min_y);
        }
    }

    /// Start a jump; only allowed while standing on the floor
    pub fn jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel.y = JUMP_VELOCITY;
        self.on_ground = false;
        true
    }

    /// One tick of gravity, floor clamp, horizontal acceleration/friction
    pub fn update(&mut self, move_left: bool, move_right: bool) {
        let Some(bounds) = self.bounds else {
            return;
        };

        self.vel.y += GRAVITY;
        self.pos.y += self.vel.y;
        if self.pos.y >= bounds.max_y {
            self.pos.y = bounds.max_y;
            self.vel.y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        if move_right {
            self.vel.x += PLAYER_ACCEL;
            self.facing = Facing::Right;
        } else if move_left {
            self.vel.x -= PLAYER_ACCEL;
            self.facing = Facing::Left;
        } else if self.vel.x > 0.0 {
            self.vel.x = (self.vel.x - PLAYER_FRICTION).max(0.0);
        } else if self.vel.x < 0.0 {
            self.vel.x = (self.vel.x + PLAYER_FRICTION).min(0.0);
        }
        self.vel.x = self.vel.x.clamp(-self.max_speed, self.max_speed);

        self.pos.x += self.vel.x;
        let right_limit = bounds.max_x - self.size().x;
        self.pos.x = self.pos.x.min(right_limit).max(0.0);
    }

    pub fn collision_box(&self) -> Rect {
        Rect::inset_from(self.pos, self.size(), ACTOR_HITBOX_INSET)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub sprite: Vec2,
    pub scale: f32,
    pub facing: Facing,
    /// Touching the player this tick
    pub colliding: bool,
}

impl Enemy {
    /// Scale that makes a sprite of `sprite_width` display at the target width
    pub fn scale_for(sprite_width: f32) -> f32 {
        (ENEMY_TARGET_WIDTH / sprite_width.max(1.0)).clamp(ENEMY_MIN_SCALE, ENEMY_MAX_SCALE)
    }

    /// New enemy standing on the platform at column `x`
    pub fn spawn(x: f32, sprite: Vec2, arena: &Arena, wander: Facing) -> Self {
        let scale = Self::scale_for(sprite.x);
        let height = displayed(sprite.y, scale);
        Self {
            pos: Vec2::new(x, arena.floor_for(height)),
            vel: Vec2::new(wander.sign() * ENEMY_WANDER_SPEED, 0.0),
            sprite,
            scale,
            facing: Facing::Right,
            colliding: false,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(
            displayed(self.sprite.x, self.scale),
            displayed(self.sprite.y, self.scale),
        )
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size().x / 2.0
    }

    /// Chase `target_x` horizontally; keep the current velocity without a target
    pub fn update(&mut self, target_x: Option<f32>, arena_width: f32) {
        if let Some(target_x) = target_x {
            let gap = target_x - self.center_x();
            if gap.abs() > ENEMY_CHASE_DEADZONE {
                self.facing = if gap > 0.0 { Facing::Right } else { Facing::Left };
                self.vel.x = self.facing.sign() * ENEMY_SPEED;
            } else {
                self.vel.x = 0.0;
            }
        }

        self.pos.x += self.vel.x;
        let right_limit = arena_width - self.size().x;
        self.pos.x = self.pos.x.min(right_limit).max(0.0);
    }

    pub fn collision_box(&self) -> Rect {
        Rect::inset_from(self.pos, self.size(), ACTOR_HITBOX_INSET)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub sprite: Vec2,
    pub scale: f32,
    pub facing: Facing,
    pub health: i32,
    pub colliding: bool,
    pub shoot_timer: u32,
    pub shoot_interval: u32,
}

impl Boss {
    /// Spawn at the far side from the player, facing them, with its top on
    /// the player's floor line so a grounded player can touch it
    pub fn spawn(player: &Player, sprite: Vec2, arena: &Arena, shoot_interval: u32) -> Self {
        let size = Vec2::new(
            displayed(sprite.x, BOSS_SCALE),
            displayed(sprite.y, BOSS_SCALE),
        );
        let player_on_left = player.center_x() < arena.width / 2.0;
        let (x, facing) = if player_on_left {
            (arena.width - size.x - BOSS_EDGE_MARGIN, Facing::Left)
        } else {
            (BOSS_EDGE_MARGIN, Facing::Right)
        };
        let y = player
            .bounds()
            .map_or_else(|| arena.floor_for(size.y), |b| b.max_y);
        Self {
            pos: Vec2::new(x, y),
            sprite,
            scale: BOSS_SCALE,
            facing,
            health: BOSS_HEALTH,
            colliding: false,
            shoot_timer: 0,
            shoot_interval,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(
            displayed(self.sprite.x, self.scale),
            displayed(self.sprite.y, self.scale),
        )
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() / 2.0
    }

    pub fn update(&mut self) {
        self.shoot_timer += 1;
    }

    pub fn ready_to_fire(&self) -> bool {
        self.shoot_timer >= self.shoot_interval
    }

    pub fn reset_shoot_timer(&mut self) {
        self.shoot_timer = 0;
    }

    /// Take one hit; returns true when this hit kills the boss
    pub fn hit(&mut self) -> bool {
        self.health -= 1;
        self.health <= 0
    }

    pub fn collision_box(&self) -> Rect {
        Rect::inset_from(self.pos, self.size(), BOSS_HITBOX_INSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::overlaps;

    fn arena() -> Arena {
        Arena {
            width: 800.0,
            height: 600.0,
            platform_height: 56.0,
            platform_offset: 18.0,
        }
    }

    fn bounded_player() -> Player {
        let mut player = Player::new(48.0, Vec2::new(100.0, 120.0), 0.8);
        player.set_bounds(&arena());
        player
    }

    #[test]
    fn test_player_floor_from_platform() {
        let player = bounded_player();
        // 600 - 56 - 96 - 18
        assert_eq!(player.bounds().unwrap().max_y, 430.0);
        assert_eq!(player.pos.x, 48.0);
    }

    #[test]
    fn test_floor_never_negative() {
        let tiny = Arena {
            height: 50.0,
            ..arena()
        };
        assert_eq!(tiny.floor_for(96.0), 0.0);
    }

    #[test]
    fn test_unbounded_player_is_not_simulated() {
        let mut player = Player::new(48.0, Vec2::new(100.0, 120.0), 0.8);
        player.update(false, true);
        assert_eq!(player.pos, Vec2::new(48.0, 0.0));
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_player_falls_onto_floor() {
        let mut player = bounded_player();
        player.pos.y = 0.0;
        let max_y = player.bounds().unwrap().max_y;
        let mut landed_at = None;
        for tick in 0..100 {
            player.update(false, false);
            if player.on_ground {
                landed_at = Some(tick);
                break;
            }
        }
        // 430 px under 0.8 px/tick² gravity lands in ~33 ticks
        assert!(landed_at.unwrap() < 40);
        assert_eq!(player.pos.y, max_y);
        assert_eq!(player.vel.y, 0.0);

        player.update(false, false);
        assert!(player.on_ground);
        assert_eq!(player.pos.y, max_y);
    }

    #[test]
    fn test_player_acceleration_and_cap() {
        let mut player = bounded_player();
        player.pos.x = 300.0;
        for _ in 0..3 {
            player.update(false, true);
        }
        assert_eq!(player.vel.x, 3.0);
        for _ in 0..10 {
            player.update(false, true);
        }
        assert_eq!(player.vel.x, PLAYER_MAX_SPEED);
        assert_eq!(player.facing, Facing::Right);

        // Friction brings it to rest without reversing
        for _ in 0..10 {
            player.update(false, false);
        }
        assert_eq!(player.vel.x, 0.0);
        assert_eq!(player.facing, Facing::Right);

        player.update(true, false);
        assert_eq!(player.vel.x, -1.0);
        assert_eq!(player.facing, Facing::Left);
    }

    #[test]
    fn test_player_clamped_to_canvas() {
        let mut player = bounded_player();
        player.pos.x = 2.0;
        player.vel.x = -6.0;
        player.update(true, false);
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = 800.0 - 80.0 - 1.0;
        player.vel.x = 6.0;
        player.update(false, true);
        assert_eq!(player.pos.x, 720.0);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut player = bounded_player();
        player.pos.y = player.bounds().unwrap().max_y;
        player.update(false, false);
        assert!(player.on_ground);

        assert!(player.jump());
        assert_eq!(player.vel.y, JUMP_VELOCITY);
        assert!(!player.jump());

        player.update(false, false);
        assert!(!player.on_ground);
        assert!(player.vel.y < 0.0);
    }

    #[test]
    fn test_player_hitbox_inset_sixth() {
        let mut player = bounded_player();
        player.pos = Vec2::new(100.0, 200.0);
        // displayed 80x96 -> inset 13 x 16
        let hitbox = player.collision_box();
        assert_eq!(hitbox, Rect::new(113.0, 216.0, 167.0, 280.0));
    }

    #[test]
    fn test_enemy_scale_normalised() {
        assert_eq!(Enemy::scale_for(48.0), 0.5);
        assert_eq!(Enemy::scale_for(1000.0), ENEMY_MIN_SCALE);
        assert_eq!(Enemy::scale_for(4.0), ENEMY_MAX_SCALE);

        let enemy = Enemy::spawn(100.0, Vec2::new(48.0, 64.0), &arena(), Facing::Left);
        assert_eq!(enemy.size(), Vec2::new(24.0, 32.0));
        assert_eq!(enemy.pos.y, 600.0 - 56.0 - 32.0 - 18.0);
        assert_eq!(enemy.vel.x, -ENEMY_WANDER_SPEED);
    }

    #[test]
    fn test_enemy_pursues_horizontally() {
        let mut enemy = Enemy::spawn(100.0, Vec2::new(48.0, 48.0), &arena(), Facing::Left);
        let y = enemy.pos.y;
        enemy.update(Some(400.0), 800.0);
        assert_eq!(enemy.pos.x, 101.0);
        assert_eq!(enemy.facing, Facing::Right);
        assert_eq!(enemy.pos.y, y);

        enemy.update(Some(0.0), 800.0);
        assert_eq!(enemy.pos.x, 100.0);
        assert_eq!(enemy.facing, Facing::Left);

        // Within the deadzone it holds position
        enemy.update(Some(enemy.center_x() + 5.0), 800.0);
        assert_eq!(enemy.vel.x, 0.0);
        assert_eq!(enemy.pos.x, 100.0);
    }

    #[test]
    fn test_enemy_without_target_keeps_wandering() {
        let mut enemy = Enemy::spawn(0.0, Vec2::new(48.0, 48.0), &arena(), Facing::Left);
        enemy.update(None, 800.0);
        assert_eq!(enemy.pos.x, 0.0);
        let mut enemy = Enemy::spawn(10.0, Vec2::new(48.0, 48.0), &arena(), Facing::Right);
        enemy.update(None, 800.0);
        assert_eq!(enemy.pos.x, 12.0);
    }

    #[test]
    fn test_boss_spawns_opposite_player() {
        let player = bounded_player();
        let boss = Boss::spawn(&player, Vec2::new(800.0, 800.0), &arena(), 150);
        assert_eq!(boss.size(), Vec2::new(120.0, 120.0));
        assert_eq!(boss.pos.x, 800.0 - 120.0 - BOSS_EDGE_MARGIN);
        assert_eq!(boss.facing, Facing::Left);
        assert_eq!(boss.health, BOSS_HEALTH);

        let mut right_player = bounded_player();
        right_player.pos.x = 600.0;
        let boss = Boss::spawn(&right_player, Vec2::new(800.0, 800.0), &arena(), 150);
        assert_eq!(boss.pos.x, BOSS_EDGE_MARGIN);
        assert_eq!(boss.facing, Facing::Right);
    }

    #[test]
    fn test_boss_stands_on_player_floor_line() {
        let mut player = bounded_player();
        player.pos.y = player.bounds().unwrap().max_y;

        // Fallback sprite before the image size is known
        let boss = Boss::spawn(&player, Vec2::new(64.0, 64.0), &arena(), 150);
        assert_eq!(boss.pos.y, 430.0);

        let mut boss = Boss::spawn(&player, Vec2::new(800.0, 800.0), &arena(), 150);
        assert_eq!(boss.pos.y, 430.0);
        boss.pos.x = player.pos.x;
        assert!(overlaps(&boss.collision_box(), &player.collision_box()));
    }

    #[test]
    fn test_boss_without_player_bounds_uses_platform() {
        let player = Player::new(48.0, Vec2::new(100.0, 120.0), 0.8);
        let boss = Boss::spawn(&player, Vec2::new(800.0, 800.0), &arena(), 150);
        // 600 - 56 - 120 - 18
        assert_eq!(boss.pos.y, 406.0);
    }

    #[test]
    fn test_boss_timer_and_hits() {
        let player = bounded_player();
        let mut boss = Boss::spawn(&player, Vec2::new(800.0, 800.0), &arena(), 3);
        boss.update();
        boss.update();
        assert!(!boss.ready_to_fire());
        boss.update();
        assert!(boss.ready_to_fire());
        boss.reset_shoot_timer();
        assert!(!boss.ready_to_fire());

        assert!(!boss.hit());
        assert!(boss.hit());
    }

    #[test]
    fn test_boss_hitbox_inset_twelfth() {
        let player = bounded_player();
        let mut boss = Boss::spawn(&player, Vec2::new(800.0, 800.0), &arena(), 150);
        boss.pos = Vec2::ZERO;
        assert_eq!(boss.collision_box(), Rect::new(10.0, 10.0, 110.0, 110.0));
    }
}
