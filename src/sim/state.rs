//! Session and progression state
//!
//! One `GameState` per session. It owns every entity, both state machines
//! and the RNG; `tick` mutates it in place.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actors::{Arena, Boss, Enemy, Facing, Player};
use super::ammo::AmmoSystem;
use super::health::HealthSystem;
use super::projectile::{Bullet, Fireball};
use crate::consts::*;
use crate::displayed;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created, waiting for the host to start play
    Waiting,
    /// Active gameplay
    Playing,
    /// Out of lives; frozen until restart
    GameOver,
}

/// Something that happened during a tick (drained by the adapters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    ReloadStarted,
    ReloadFinished,
    EnemyKilled { kills: u32 },
    PlayerHit { lives_left: u8 },
    BossSpawned,
    BossHit { health_left: i32 },
    BossDefeated,
    FireballLaunched,
    GameOver,
}

/// Sprites whose pixel size feeds the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Enemy,
    Boss,
}

/// Source sizes reported by the asset loader; `None` until loaded
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpriteSizes {
    pub player: Option<Vec2>,
    pub enemy: Option<Vec2>,
    pub boss: Option<Vec2>,
}

impl SpriteSizes {
    pub fn enemy_or_default(&self) -> Vec2 {
        self.enemy.unwrap_or(Vec2::from(DEFAULT_ENEMY_SPRITE))
    }

    pub fn boss_or_default(&self) -> Vec2 {
        self.boss.unwrap_or(Vec2::from(DEFAULT_BOSS_SPRITE))
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for spawn placement
    pub seed: u64,
    rng: Pcg32,
    pub settings: Settings,
    pub arena: Arena,
    pub phase: GamePhase,
    /// Simulation ticks played
    pub time_ticks: u64,
    pub score: u64,
    /// Kills since the last boss
    pub enemies_killed: u32,
    /// Absent until the player sprite size is known
    pub player: Option<Player>,
    /// Spawn order; only affects draw order
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub fireballs: Vec<Fireball>,
    /// Present exactly while a boss fight is on; enemies are empty meanwhile
    pub boss: Option<Boss>,
    pub health: HealthSystem,
    pub ammo: AmmoSystem,
    pub sprites: SpriteSizes,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session state with nothing loaded yet
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings: settings.clone(),
            arena: Arena {
                width: settings.canvas_width,
                height: settings.canvas_height,
                platform_height: settings.platform_height,
                platform_offset: settings.platform_offset,
            },
            phase: GamePhase::Waiting,
            time_ticks: 0,
            score: 0,
            enemies_killed: 0,
            player: None,
            enemies: Vec::new(),
            bullets: Vec::new(),
            fireballs: Vec::new(),
            boss: None,
            health: HealthSystem::new(settings.initial_lives, settings.invulnerability_ticks),
            ammo: AmmoSystem::new(
                settings.max_ammo,
                settings.reload_ticks,
                settings.fire_cooldown_ms,
            ),
            sprites: SpriteSizes::default(),
            events: Vec::new(),
        }
    }

    /// Fresh state that already knows some sprite sizes (used on restart)
    pub fn with_sprites(settings: &Settings, seed: u64, sprites: SpriteSizes) -> Self {
        let mut state = Self::new(settings, seed);
        if let Some(size) = sprites.player {
            state.install_sprite(SpriteKind::Player, size);
        }
        if let Some(size) = sprites.enemy {
            state.install_sprite(SpriteKind::Enemy, size);
        }
        if let Some(size) = sprites.boss {
            state.install_sprite(SpriteKind::Boss, size);
        }
        state
    }

    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::Waiting
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn boss_active(&self) -> bool {
        self.boss.is_some()
    }

    pub fn start(&mut self) {
        if self.phase == GamePhase::Waiting {
            self.phase = GamePhase::Playing;
        }
    }

    /// Record a loaded sprite size and create whatever was waiting on it
    pub fn install_sprite(&mut self, kind: SpriteKind, size: Vec2) {
        match kind {
            SpriteKind::Player => {
                self.sprites.player = Some(size);
                let mut player =
                    Player::new(self.settings.player_start_x, size, self.settings.player_scale);
                player.set_bounds(&self.arena);
                player.place_at_start(self.settings.player_start_x, self.settings.foot_offset);
                self.player = Some(player);
            }
            SpriteKind::Enemy => {
                self.sprites.enemy = Some(size);
                if self.enemies.is_empty() && self.boss.is_none() {
                    self.spawn_wave();
                }
            }
            SpriteKind::Boss => {
                self.sprites.boss = Some(size);
            }
        }
    }

    /// Canvas size changed: re-derive the player's bounds and re-place it
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena.width = width;
        self.arena.height = height;
        let (start_x, foot_offset) = (self.settings.player_start_x, self.settings.foot_offset);
        if let Some(player) = self.player.as_mut() {
            player.set_bounds(&self.arena);
            player.place_at_start(start_x, foot_offset);
        }
    }

    pub fn spawn_enemy(&mut self, x: f32) {
        let wander = if self.rng.random_bool(0.5) {
            Facing::Right
        } else {
            Facing::Left
        };
        let enemy = Enemy::spawn(x, self.sprites.enemy_or_default(), &self.arena, wander);
        self.enemies.push(enemy);
    }

    /// Start a wave: one enemy near the right edge, one mid-screen
    pub fn spawn_wave(&mut self) {
        let sprite = self.sprites.enemy_or_default();
        let width = displayed(sprite.x, Enemy::scale_for(sprite.x));
        let positions = [
            self.arena.width - width - WAVE_EDGE_MARGIN,
            (self.arena.width / 2.0).round(),
        ];
        for x in positions.into_iter().take(WAVE_START_ENEMIES) {
            self.spawn_enemy(x);
        }
    }

    /// Clear the wave and bring in the boss. Needs a player to position against.
    pub fn spawn_boss(&mut self) -> bool {
        if self.boss.is_some() {
            return false;
        }
        let Some(player) = self.player.as_ref() else {
            log::debug!("Boss spawn skipped: no player");
            return false;
        };
        let boss = Boss::spawn(
            player,
            self.sprites.boss_or_default(),
            &self.arena,
            self.settings.boss_shoot_interval,
        );
        self.enemies.clear();
        self.boss = Some(boss);
        self.emit(GameEvent::BossSpawned);
        log::info!("Boss spawned at tick {}", self.time_ticks);
        true
    }

    /// Column for a replacement enemy, biased away from the player's third
    pub fn enemy_spawn_x(&mut self) -> f32 {
        let width = self.arena.width;
        let Some(player) = self.player.as_ref() else {
            return width / 2.0;
        };
        let center = player.center_x();
        let roll: f32 = self.rng.random();
        if center < width / 3.0 {
            width * 0.7 + roll * width * 0.25
        } else if center > width * 2.0 / 3.0 {
            roll * width * 0.25
        } else if self.rng.random_bool(0.5) {
            roll * width * 0.2
        } else {
            width * 0.8 + roll * width * 0.2
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_state(seed: u64) -> GameState {
        let sprites = SpriteSizes {
            player: Some(Vec2::new(100.0, 120.0)),
            enemy: Some(Vec2::new(48.0, 48.0)),
            boss: Some(Vec2::new(800.0, 800.0)),
        };
        GameState::with_sprites(&Settings::default(), seed, sprites)
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = GameState::new(&Settings::default(), 1);
        assert_eq!(state.phase, GamePhase::Waiting);
        assert!(state.player.is_none());
        assert!(state.enemies.is_empty());
        assert!(!state.boss_active());
        assert_eq!(state.health.lives(), 3);
        assert_eq!(state.ammo.current(), 10);
    }

    #[test]
    fn test_player_placed_above_floor() {
        let state = loaded_state(1);
        let player = state.player.as_ref().unwrap();
        let bounds = player.bounds().unwrap();
        // 600 - 56 - 96 - 18
        assert_eq!(bounds.max_y, 430.0);
        assert_eq!(player.pos, Vec2::new(48.0, 430.0 - 36.0));
    }

    #[test]
    fn test_enemy_sprite_spawns_wave() {
        let state = loaded_state(1);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.enemies[0].pos.x, 800.0 - 24.0 - WAVE_EDGE_MARGIN);
        assert_eq!(state.enemies[1].pos.x, 400.0);
        assert!(state.enemies.iter().all(|e| e.pos.y == 600.0 - 56.0 - 24.0 - 18.0));
    }

    #[test]
    fn test_spawn_bias_away_from_player() {
        let mut state = loaded_state(7);
        for _ in 0..50 {
            let x = state.enemy_spawn_x();
            assert!((560.0..=760.0).contains(&x), "left player, spawned at {x}");
        }

        state.player.as_mut().unwrap().pos.x = 700.0;
        for _ in 0..50 {
            let x = state.enemy_spawn_x();
            assert!((0.0..=200.0).contains(&x), "right player, spawned at {x}");
        }

        state.player.as_mut().unwrap().pos.x = 360.0;
        for _ in 0..50 {
            let x = state.enemy_spawn_x();
            assert!(x <= 160.0 || x >= 640.0, "centered player, spawned at {x}");
        }
    }

    #[test]
    fn test_spawn_position_without_player() {
        let mut state = GameState::new(&Settings::default(), 1);
        assert_eq!(state.enemy_spawn_x(), 400.0);
    }

    #[test]
    fn test_boss_requires_player_and_clears_wave() {
        let mut state = GameState::new(&Settings::default(), 1);
        state.install_sprite(SpriteKind::Enemy, Vec2::new(48.0, 48.0));
        assert!(!state.spawn_boss());
        assert_eq!(state.enemies.len(), 2);

        state.install_sprite(SpriteKind::Player, Vec2::new(100.0, 120.0));
        assert!(state.spawn_boss());
        assert!(state.enemies.is_empty());
        assert!(!state.spawn_boss());
        assert_eq!(state.drain_events(), vec![GameEvent::BossSpawned]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_resize_rebounds_player() {
        let mut state = loaded_state(1);
        state.resize(1024.0, 768.0);
        let player = state.player.as_ref().unwrap();
        let bounds = player.bounds().unwrap();
        assert_eq!(bounds.max_x, 1024.0);
        assert_eq!(bounds.max_y, 768.0 - 56.0 - 96.0 - 18.0);
        assert_eq!(player.pos.y, bounds.max_y - 36.0);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = loaded_state(99);
        let mut b = loaded_state(99);
        for _ in 0..10 {
            assert_eq!(a.enemy_spawn_x(), b.enemy_spawn_x());
        }
    }
}
