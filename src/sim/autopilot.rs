//! Demo mode - derives player intent from the current state
//!
//! Used by the headless runner and attract screens. Plays like a cautious
//! human: keep some distance, turn to face the target, shoot when the gun is
//! ready, reload on empty, hop over incoming fireballs.

use super::actors::Facing;
use super::state::GameState;
use super::tick::TickInput;

/// Preferred horizontal distance to the target
const ENGAGE_DISTANCE: f32 = 220.0;
/// Jump when a fireball closing in is nearer than this
const DODGE_DISTANCE: f32 = 90.0;

pub fn autopilot(state: &GameState, now_ms: f64) -> TickInput {
    let mut input = TickInput::default();
    let Some(player) = state.player.as_ref() else {
        return input;
    };
    let px = player.center_x();

    let target_x = match state.boss.as_ref() {
        Some(boss) => Some(boss.center().x),
        None => state
            .enemies
            .iter()
            .map(|e| e.center_x())
            .min_by(|a, b| {
                (a - px)
                    .abs()
                    .partial_cmp(&(b - px).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
    };

    if let Some(target_x) = target_x {
        let toward = if target_x >= px {
            Facing::Right
        } else {
            Facing::Left
        };
        let distance = (target_x - px).abs();
        // Close the gap, or tap toward the target just long enough to turn
        if distance > ENGAGE_DISTANCE || player.facing != toward {
            input.move_left = toward == Facing::Left;
            input.move_right = toward == Facing::Right;
        }
        input.fire = player.facing == toward && state.ammo.can_shoot(now_ms);
    }

    input.reload = state.ammo.current() == 0;

    input.jump = player.on_ground
        && state.fireballs.iter().any(|fb| {
            let gap = px - fb.pos.x;
            gap.abs() < DODGE_DISTANCE && gap.signum() == fb.vel.x.signum()
        });

    input
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::settings::Settings;
    use crate::sim::projectile::Fireball;
    use crate::sim::state::SpriteSizes;

    fn demo_state() -> GameState {
        let sprites = SpriteSizes {
            player: Some(Vec2::new(100.0, 120.0)),
            enemy: Some(Vec2::new(48.0, 48.0)),
            boss: None,
        };
        let mut state = GameState::with_sprites(&Settings::default(), 3, sprites);
        state.start();
        let player = state.player.as_mut().unwrap();
        player.pos.y = player.bounds().unwrap().max_y;
        player.on_ground = true;
        state
    }

    #[test]
    fn test_no_player_no_input() {
        let state = GameState::new(&Settings::default(), 1);
        assert_eq!(autopilot(&state, 0.0), TickInput::default());
    }

    #[test]
    fn test_approaches_and_fires_at_nearest_enemy() {
        let state = demo_state();
        // Nearest enemy is mid-screen, to the right and out of range
        let input = autopilot(&state, 0.0);
        assert!(input.move_right);
        assert!(!input.move_left);
        assert!(input.fire);
        assert!(!input.reload);
    }

    #[test]
    fn test_turns_before_firing() {
        let mut state = demo_state();
        state.player.as_mut().unwrap().facing = Facing::Left;
        let input = autopilot(&state, 0.0);
        assert!(input.move_right);
        assert!(!input.fire);
    }

    #[test]
    fn test_reloads_when_empty() {
        let mut state = demo_state();
        let mut now = 0.0;
        while state.ammo.shoot(now) {
            now += 1000.0;
        }
        let input = autopilot(&state, now);
        assert!(input.reload);
        assert!(!input.fire);
    }

    #[test]
    fn test_jumps_incoming_fireball() {
        let mut state = demo_state();
        let px = state.player.as_ref().unwrap().center_x();
        state.fireballs.push(Fireball {
            pos: Vec2::new(px + 60.0, 450.0),
            vel: Vec2::new(-4.0, 0.0),
        });
        assert!(autopilot(&state, 0.0).jump);

        // Moving away: no need to jump
        state.fireballs[0].vel.x = 4.0;
        assert!(!autopilot(&state, 0.0).jump);
    }
}
