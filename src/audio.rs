//! Sound cues
//!
//! The simulation only reports `GameEvent`s; this maps them to sound effects
//! and hands those to whatever plays audio on the host.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player fires a bullet
    Shot,
    /// Reload started
    Reload,
    /// Magazine refilled
    Reloaded,
    /// Enemy destroyed
    EnemyDown,
    /// Player loses a life
    PlayerHurt,
    /// Boss enters
    BossRoar,
    /// Bullet lands on the boss
    BossHit,
    /// Boss destroyed
    BossDown,
    /// Boss throws a fireball
    Fireball,
    /// Game over
    GameOver,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        Some(match event {
            GameEvent::ShotFired => SoundEffect::Shot,
            GameEvent::ReloadStarted => SoundEffect::Reload,
            GameEvent::ReloadFinished => SoundEffect::Reloaded,
            GameEvent::EnemyKilled { .. } => SoundEffect::EnemyDown,
            // The fatal hit is voiced by the game-over cue
            GameEvent::PlayerHit { lives_left: 0 } => return None,
            GameEvent::PlayerHit { .. } => SoundEffect::PlayerHurt,
            GameEvent::BossSpawned => SoundEffect::BossRoar,
            // The killing blow is voiced by BossDown
            GameEvent::BossHit { health_left: 0 } => return None,
            GameEvent::BossHit { .. } => SoundEffect::BossHit,
            GameEvent::BossDefeated => SoundEffect::BossDown,
            GameEvent::FireballLaunched => SoundEffect::Fireball,
            GameEvent::GameOver => SoundEffect::GameOver,
        })
    }
}

/// Host audio output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio sink that only logs; used headless
#[derive(Debug, Default)]
pub struct LogAudio {
    pub muted: bool,
    played: u64,
}

impl LogAudio {
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::debug!("sfx {:?}", effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ShotFired),
            Some(SoundEffect::Shot)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PlayerHit { lives_left: 2 }),
            Some(SoundEffect::PlayerHurt)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PlayerHit { lives_left: 0 }),
            None
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BossHit { health_left: 1 }),
            Some(SoundEffect::BossHit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BossHit { health_left: 0 }),
            None
        );
    }

    #[test]
    fn test_muted_sink_drops_effects() {
        let mut audio = LogAudio {
            muted: true,
            ..Default::default()
        };
        audio.play(SoundEffect::Shot);
        assert_eq!(audio.played(), 0);
        audio.muted = false;
        audio.play(SoundEffect::Shot);
        assert_eq!(audio.played(), 1);
    }
}
