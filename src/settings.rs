//! Gameplay configuration
//!
//! Every field is optional in JSON; missing fields take the classic values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a configuration could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Session configuration, fixed at session start (canvas size may change later)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Player ===
    pub initial_lives: u8,
    /// Ticks of invulnerability after losing a life
    pub invulnerability_ticks: u32,
    pub player_scale: f32,
    pub player_start_x: f32,
    /// Player starts this far above the floor and drops onto it
    pub foot_offset: f32,

    // === Weapon ===
    pub max_ammo: u32,
    pub reload_ticks: u32,
    /// Wall-clock delay between shots
    pub fire_cooldown_ms: f64,

    // === Progression ===
    pub kills_for_boss: u32,
    /// Ticks between boss fireballs
    pub boss_shoot_interval: u32,

    // === Arena ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub platform_height: f32,
    pub platform_offset: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            invulnerability_ticks: 120,
            player_scale: 0.8,
            player_start_x: 48.0,
            foot_offset: 36.0,

            max_ammo: 10,
            reload_ticks: 120,
            fire_cooldown_ms: 200.0,

            kills_for_boss: 10,
            boss_shoot_interval: 150,

            canvas_width: 800.0,
            canvas_height: 600.0,
            platform_height: 56.0,
            platform_offset: 18.0,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(1..=3).contains(&self.initial_lives) {
            return Err(invalid("initial_lives", "must be between 1 and 3"));
        }
        if self.max_ammo == 0 {
            return Err(invalid("max_ammo", "must be at least 1"));
        }
        if self.reload_ticks == 0 {
            return Err(invalid("reload_ticks", "must be at least 1"));
        }
        if self.invulnerability_ticks == 0 {
            return Err(invalid("invulnerability_ticks", "must be at least 1"));
        }
        if self.kills_for_boss == 0 {
            return Err(invalid("kills_for_boss", "must be at least 1"));
        }
        if self.boss_shoot_interval == 0 {
            return Err(invalid("boss_shoot_interval", "must be at least 1"));
        }
        if !(self.fire_cooldown_ms >= 0.0) {
            return Err(invalid("fire_cooldown_ms", "must not be negative"));
        }
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(invalid("canvas", "width and height must be positive"));
        }
        if !(self.player_scale > 0.0) {
            return Err(invalid("player_scale", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.initial_lives, 3);
        assert_eq!(settings.max_ammo, 10);
        assert_eq!(settings.reload_ticks, 120);
        assert_eq!(settings.invulnerability_ticks, 120);
        assert_eq!(settings.boss_shoot_interval, 150);
        assert_eq!(settings.kills_for_boss, 10);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "max_ammo": 5, "canvas_width": 1024 }"#).unwrap();
        assert_eq!(settings.max_ammo, 5);
        assert_eq!(settings.canvas_width, 1024.0);
        assert_eq!(settings.canvas_height, 600.0);
        assert_eq!(settings.kills_for_boss, 10);
    }

    #[test]
    fn test_round_trips_through_json() {
        let settings = Settings {
            kills_for_boss: 4,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "initial_lives": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "initial_lives",
                ..
            }
        ));
        assert!(Settings::from_json(r#"{ "max_ammo": 0 }"#).is_err());
        assert!(Settings::from_json(r#"{ "canvas_height": -5 }"#).is_err());
        let err = Settings::from_json(r#"{ "invulnerability_ticks": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "invulnerability_ticks",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ max_ammo: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
