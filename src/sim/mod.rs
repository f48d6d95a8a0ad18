//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed step per tick, no frame-time scaling
//! - Seeded RNG only
//! - Wall-clock time only enters through the fire-rate gate, passed in by the caller
//! - No rendering or platform dependencies

pub mod actors;
pub mod ammo;
pub mod autopilot;
pub mod collision;
pub mod health;
pub mod projectile;
pub mod state;
pub mod tick;

pub use actors::{Arena, Boss, Enemy, Facing, Player, PlayerBounds};
pub use ammo::{AmmoState, AmmoStatus, AmmoSystem};
pub use autopilot::autopilot;
pub use collision::{Rect, overlaps};
pub use health::{DamageOutcome, HealthSystem, Vulnerability};
pub use projectile::{Bullet, Fireball};
pub use state::{GameEvent, GamePhase, GameState, SpriteKind, SpriteSizes};
pub use tick::{TickInput, tick};
