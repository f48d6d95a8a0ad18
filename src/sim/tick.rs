//! Per-tick simulation
//!
//! Core game loop: one call advances every entity and state machine,
//! resolves contacts and updates score, lives and wave/boss progression.
//! The update order decides which tick a hit lands on, so keep it stable.

use super::actors::Player;
use super::collision::{Rect, overlaps};
use super::health::DamageOutcome;
use super::projectile::{Bullet, Fireball};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Player intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Edge-triggered: set only on the tick the key went down
    pub jump: bool,
    pub fire: bool,
    pub reload: bool,
}

/// Advance the game state by one tick.
///
/// `now_ms` is the monotonic wall-clock time, used only by the fire-rate gate.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    // Frozen until started, and after game over until restart
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    apply_intents(state, input, now_ms);

    // Player, invulnerability and reload timers
    if let Some(player) = state.player.as_mut() {
        player.update(input.move_left, input.move_right);
    }
    state.health.tick();
    if state.ammo.tick() {
        state.emit(GameEvent::ReloadFinished);
    }

    boss_fire(state);
    update_bullets(state);
    update_boss(state);
    update_fireballs(state);

    if state.boss.is_some() {
        resolve_boss_hits(state);
    }
    // Re-checked: a boss defeated above hands this same tick to the new wave
    if state.boss.is_none() {
        update_enemies(state);
        resolve_enemy_hits(state);
    }
}

/// Jump / fire / reload requests arrive between ticks
fn apply_intents(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if input.reload && state.ammo.reload() {
        state.emit(GameEvent::ReloadStarted);
    }
    let Some(player) = state.player.as_mut() else {
        return;
    };
    if input.jump {
        player.jump();
    }
    if input.fire && state.ammo.shoot(now_ms) {
        let bullet = Bullet::from_player(player);
        state.bullets.push(bullet);
        state.emit(GameEvent::ShotFired);
    }
}

fn player_box(state: &GameState) -> Option<Rect> {
    state.player.as_ref().map(Player::collision_box)
}

/// Contact damage, honouring the invulnerability window
fn damage_player(state: &mut GameState) {
    match state.health.take_damage() {
        DamageOutcome::Ignored => {}
        DamageOutcome::Wounded => {
            let lives_left = state.health.lives();
            state.emit(GameEvent::PlayerHit { lives_left });
        }
        DamageOutcome::Fatal => {
            state.emit(GameEvent::PlayerHit { lives_left: 0 });
            state.emit(GameEvent::GameOver);
            state.phase = GamePhase::GameOver;
            log::info!(
                "Game over at tick {} with score {}",
                state.time_ticks,
                state.score
            );
        }
    }
}

/// Apply `contacts` touches in order; only the first can land while the
/// window it opens is active
fn apply_contacts(state: &mut GameState, contacts: usize) {
    for _ in 0..contacts {
        if !state.health.is_invulnerable() {
            damage_player(state);
        }
    }
}

/// Drop entries whose index is flagged. Single pass, order preserved.
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !removed[index];
        index += 1;
        keep
    });
}

fn boss_fire(state: &mut GameState) {
    let target_x = state.player.as_ref().map(Player::center_x);
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    if !boss.ready_to_fire() {
        return;
    }
    boss.reset_shoot_timer();
    if let Some(target_x) = target_x {
        let fireball = Fireball::launch(boss, target_x);
        state.fireballs.push(fireball);
        state.emit(GameEvent::FireballLaunched);
    }
}

fn update_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.update();
    }
    let width = state.arena.width;
    state.bullets.retain(|b| !b.is_off_screen(width));
}

fn update_boss(state: &mut GameState) {
    let player_box = player_box(state);
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    boss.update();
    boss.colliding = player_box.is_some_and(|pbox| overlaps(&pbox, &boss.collision_box()));
    if boss.colliding {
        apply_contacts(state, 1);
    }
}

fn update_fireballs(state: &mut GameState) {
    for fireball in &mut state.fireballs {
        fireball.update();
    }

    // A fireball that reaches the player is spent
    let mut contacts = 0;
    if let Some(pbox) = player_box(state) {
        state.fireballs.retain(|fb| {
            let hit = overlaps(&pbox, &fb.collision_box());
            contacts += usize::from(hit);
            !hit
        });
    }
    apply_contacts(state, contacts);

    state.fireballs.retain(|fb| !fb.is_off_screen());
}

fn resolve_boss_hits(state: &mut GameState) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let boss_box = boss.collision_box();
    let mut spent = vec![false; state.bullets.len()];
    let mut hits = Vec::new();
    let mut defeated = false;

    for i in (0..state.bullets.len()).rev() {
        if !overlaps(&state.bullets[i].collision_box(), &boss_box) {
            continue;
        }
        spent[i] = true;
        defeated = boss.hit();
        hits.push(boss.health.max(0));
        if defeated {
            break;
        }
    }

    compact(&mut state.bullets, &spent);
    for health_left in hits {
        state.emit(GameEvent::BossHit { health_left });
    }
    if defeated {
        defeat_boss(state);
    }
}

fn defeat_boss(state: &mut GameState) {
    state.score += BOSS_SCORE;
    state.boss = None;
    state.enemies_killed = 0;
    state.fireballs.clear();
    state.spawn_wave();
    state.emit(GameEvent::BossDefeated);
    log::info!("Boss defeated, score {}", state.score);
}

fn update_enemies(state: &mut GameState) {
    let target_x = state.player.as_ref().map(Player::center_x);
    let width = state.arena.width;
    for enemy in &mut state.enemies {
        enemy.update(target_x, width);
    }

    let mut contacts = 0;
    let pbox = player_box(state);
    for enemy in &mut state.enemies {
        enemy.colliding = pbox.is_some_and(|pbox| overlaps(&pbox, &enemy.collision_box()));
        contacts += usize::from(enemy.colliding);
    }
    apply_contacts(state, contacts);
}

/// Bullets against enemies: each bullet takes at most one enemy, scanning
/// newest-first on both sides. A replacement joins the scan as soon as it
/// spawns, so a bullet later in the scan can still hit it.
fn resolve_enemy_hits(state: &mut GameState) {
    if state.bullets.is_empty() || state.enemies.is_empty() {
        return;
    }

    let mut enemy_boxes: Vec<Rect> = state.enemies.iter().map(|e| e.collision_box()).collect();
    let mut spent = vec![false; state.bullets.len()];
    let mut dead = vec![false; state.enemies.len()];
    let mut boss_due = false;

    for i in (0..state.bullets.len()).rev() {
        let bullet_box = state.bullets[i].collision_box();
        let Some(j) = (0..enemy_boxes.len())
            .rev()
            .find(|&j| !dead[j] && overlaps(&bullet_box, &enemy_boxes[j]))
        else {
            continue;
        };

        spent[i] = true;
        dead[j] = true;
        state.score += ENEMY_SCORE;
        state.enemies_killed += 1;
        let kills = state.enemies_killed;
        state.emit(GameEvent::EnemyKilled { kills });

        if state.enemies_killed >= state.settings.kills_for_boss {
            boss_due = true;
            break;
        }
        let x = state.enemy_spawn_x();
        state.spawn_enemy(x);
        if let Some(fresh) = state.enemies.last() {
            enemy_boxes.push(fresh.collision_box());
            dead.push(false);
        }
    }

    compact(&mut state.bullets, &spent);
    compact(&mut state.enemies, &dead);

    // Without a player the boss cannot be placed; keep the wave going instead
    if boss_due && !state.spawn_boss() {
        let x = state.enemy_spawn_x();
        state.spawn_enemy(x);
    }
}
