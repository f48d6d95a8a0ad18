//! Rendering seam
//!
//! The host draws; the core only hands over a `RenderSnapshot` per frame.
//! `LogRenderer` is the headless stand-in: it reports HUD changes as text.

use crate::snapshot::{HudData, RenderSnapshot};

/// Host renderer. Receives a snapshot once per frame and must not keep
/// references into the simulation.
pub trait Renderer {
    fn present(&mut self, frame: &RenderSnapshot);
}

/// One-line HUD readout, e.g. `score 40 | lives 2/3 | ammo 7/10 | kills 4/10`
pub fn hud_line(hud: &HudData) -> String {
    let mut line = format!(
        "score {} | lives {}/{} | ammo {}/{}",
        hud.score, hud.lives_remaining, hud.max_lives, hud.ammo.current, hud.ammo.max
    );
    if hud.ammo.is_reloading {
        line.push_str(&format!(" (reloading {}%)", hud.ammo.reload_progress_percent));
    }
    line.push_str(&format!(" | kills {}/{}", hud.enemies_killed, hud.kills_for_boss));
    if let Some(health) = hud.boss_health {
        line.push_str(&format!(" | BOSS {}hp", health));
    }
    line
}

/// Logs the HUD whenever it changes
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_hud: Option<HudData>,
    frames: u64,
}

impl LogRenderer {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn present(&mut self, frame: &RenderSnapshot) {
        self.frames += 1;
        if self.last_hud.as_ref() != Some(&frame.hud) {
            log::info!("[tick {:>5}] {}", frame.tick, hud_line(&frame.hud));
            self.last_hud = Some(frame.hud.clone());
        }
    }
}
