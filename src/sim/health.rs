//! Lives and post-hit invulnerability

use serde::{Deserialize, Serialize};

use crate::consts::FLICKER_PERIOD;

/// Damage window state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vulnerability {
    Vulnerable,
    Invulnerable { ticks_remaining: u32 },
}

/// What a call to [`HealthSystem::take_damage`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable (or already dead); nothing changed
    Ignored,
    /// Lost a life, invulnerability window started
    Wounded,
    /// Last life lost
    Fatal,
}

impl DamageOutcome {
    pub fn is_game_over(self) -> bool {
        self == DamageOutcome::Fatal
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSystem {
    lives: u8,
    state: Vulnerability,
    invulnerability_ticks: u32,
}

impl HealthSystem {
    pub fn new(lives: u8, invulnerability_ticks: u32) -> Self {
        Self {
            lives,
            state: Vulnerability::Vulnerable,
            invulnerability_ticks,
        }
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn state(&self) -> Vulnerability {
        self.state
    }

    pub fn is_invulnerable(&self) -> bool {
        matches!(self.state, Vulnerability::Invulnerable { .. })
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    pub fn take_damage(&mut self) -> DamageOutcome {
        if self.is_invulnerable() || self.is_dead() {
            return DamageOutcome::Ignored;
        }
        if self.lives > 1 {
            self.lives -= 1;
            // A zero-length window means no window at all
            if self.invulnerability_ticks > 0 {
                self.state = Vulnerability::Invulnerable {
                    ticks_remaining: self.invulnerability_ticks,
                };
            }
            DamageOutcome::Wounded
        } else {
            self.lives = 0;
            DamageOutcome::Fatal
        }
    }

    /// Count down the invulnerability window
    pub fn tick(&mut self) {
        if let Vulnerability::Invulnerable { ticks_remaining } = self.state {
            let left = ticks_remaining.saturating_sub(1);
            self.state = if left == 0 {
                Vulnerability::Vulnerable
            } else {
                Vulnerability::Invulnerable {
                    ticks_remaining: left,
                }
            };
        }
    }

    /// Rendering hint: hide the player sprite on alternating 10-tick spans.
    /// Has no bearing on hit detection.
    pub fn should_flicker(&self) -> bool {
        match self.state {
            Vulnerability::Invulnerable { ticks_remaining } => {
                (ticks_remaining / FLICKER_PERIOD) % 2 == 0
            }
            Vulnerability::Vulnerable => false,
        }
    }

    /// Drop any active invulnerability window
    pub fn clear_invulnerability(&mut self) {
        self.state = Vulnerability::Vulnerable;
    }
}
