//! Magazine, fire-rate gate and reload timer
//!
//! Two separate timing domains live here: the fire-rate gate runs on a
//! monotonic wall clock (milliseconds, supplied by the caller) so it is
//! independent of the tick rate, while the reload counts simulation ticks.

use serde::{Deserialize, Serialize};

/// Observable weapon state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmoState {
    Ready,
    /// Shot fired recently; firing re-enables once the deadline passes
    Cooldown,
    Reloading { ticks_remaining: u32 },
}

/// HUD view of the magazine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoStatus {
    pub current: u32,
    pub max: u32,
    pub is_reloading: bool,
    /// 0-100, always 0 when not reloading
    pub reload_progress_percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoSystem {
    current: u32,
    max: u32,
    reload_ticks: u32,
    reload_remaining: Option<u32>,
    cooldown_ms: f64,
    /// Monotonic time at which firing re-enables
    ready_at_ms: Option<f64>,
}

impl AmmoSystem {
    pub fn new(max: u32, reload_ticks: u32, cooldown_ms: f64) -> Self {
        Self {
            current: max,
            max,
            reload_ticks,
            reload_remaining: None,
            cooldown_ms,
            ready_at_ms: None,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_remaining.is_some()
    }

    fn cooling_down(&self, now_ms: f64) -> bool {
        self.ready_at_ms.is_some_and(|ready_at| now_ms < ready_at)
    }

    pub fn state(&self, now_ms: f64) -> AmmoState {
        if let Some(ticks_remaining) = self.reload_remaining {
            AmmoState::Reloading { ticks_remaining }
        } else if self.cooling_down(now_ms) {
            AmmoState::Cooldown
        } else {
            AmmoState::Ready
        }
    }

    /// True when a shot would be accepted at `now_ms`
    pub fn can_shoot(&self, now_ms: f64) -> bool {
        !self.cooling_down(now_ms) && !self.is_reloading() && self.current > 0
    }

    /// Spend one round. Returns false (and changes nothing) while cooling
    /// down, reloading or empty.
    pub fn shoot(&mut self, now_ms: f64) -> bool {
        if !self.can_shoot(now_ms) {
            return false;
        }
        self.current -= 1;
        self.ready_at_ms = Some(now_ms + self.cooldown_ms);
        true
    }

    /// Start a reload. Returns false if already reloading or full.
    pub fn reload(&mut self) -> bool {
        if self.is_reloading() || self.current == self.max {
            return false;
        }
        self.reload_remaining = Some(self.reload_ticks);
        true
    }

    /// Advance the reload timer; returns true on the tick the magazine refills
    pub fn tick(&mut self) -> bool {
        let Some(remaining) = self.reload_remaining else {
            return false;
        };
        let left = remaining.saturating_sub(1);
        if left == 0 {
            self.reload_remaining = None;
            self.current = self.max;
            true
        } else {
            self.reload_remaining = Some(left);
            false
        }
    }

    pub fn status(&self) -> AmmoStatus {
        let reload_progress_percent = match self.reload_remaining {
            Some(remaining) if self.reload_ticks > 0 => {
                ((1.0 - remaining as f64 / self.reload_ticks as f64) * 100.0).floor() as u32
            }
            _ => 0,
        };
        AmmoStatus {
            current: self.current,
            max: self.max,
            is_reloading: self.is_reloading(),
            reload_progress_percent,
        }
    }
}
