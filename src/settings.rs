//! Tuning knobs for a match.
//!
//! Every value here has a default that reproduces the classic game. A JSON file
//! can override any subset of them; missing sections and fields fall back to
//! the defaults.
//!
//! ```json
//! {
//!   "physics": { "gravity": 0.8 },
//!   "effects": { "freeze_duration": 120 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Fixed constants ──────────────────────────────────────────────────────────

/// Length of a melee swing, in frames.
pub const ATTACK_ANIM_FRAMES: u32 = 15;
/// The only swing frame on which melee hits are evaluated.
pub const ACTIVE_HIT_FRAME: u32 = 5;
pub const ATTACK_BOX_WIDTH: f32 = 80.0;
pub const ATTACK_BOX_HEIGHT: f32 = 60.0;

pub const KNOCKBACK_MAGNITUDE: f32 = 15.0;
pub const KNOCKBACK_DECAY: f32 = 0.8;
/// Knockback below this magnitude snaps to zero.
pub const KNOCKBACK_EPSILON: f32 = 0.1;

pub const SUPER_SCALE: f32 = 2.0;
/// Frames a super-form combatant waits between contact hits.
pub const SUPER_CONTACT_COOLDOWN: u32 = 30;

/// Horizontal separation applied to overlapping combatants each tick.
pub const PUSH_APART: f32 = 2.0;

pub const BUBBLE_RADIUS: f32 = 32.0;
pub const BUBBLE_FALL_SPEED: f32 = 2.5;
pub const BUBBLE_SPAWN_Y: f32 = -50.0;
/// Bubbles never spawn closer than this to either arena edge.
pub const BUBBLE_SPAWN_MARGIN: f32 = 100.0;

pub const PROJECTILE_BOX_WIDTH: f32 = 60.0;
pub const PROJECTILE_BOX_HEIGHT: f32 = 30.0;
/// How far past the arena edge a projectile travels before it is dropped.
pub const PROJECTILE_OFFSCREEN_MARGIN: f32 = 50.0;

// ── Sections ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    /// Added to vertical velocity every tick (positive = down).
    pub gravity: f32,
    /// Vertical velocity set on jump (negative = up).
    pub jump_power: f32,
    pub move_speed: f32,
    pub combatant_width: f32,
    pub combatant_height: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            jump_power: -18.0,
            move_speed: 6.0,
            combatant_width: 40.0,
            combatant_height: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Combat {
    pub max_health: i32,
    pub attack_cooldown: u32,
    pub pow_damage: i32,
    pub print_damage: i32,
    /// Chip damage dealt by Ctrl+C and TypeError pickups.
    pub pickup_damage: i32,
    pub super_contact_damage: i32,
    pub projectile_speed: f32,
}

impl Default for Combat {
    fn default() -> Self {
        Self {
            max_health: 100,
            attack_cooldown: 30,
            pow_damage: 8,
            print_damage: 2,
            pickup_damage: 3,
            super_contact_damage: 5,
            projectile_speed: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effects {
    pub freeze_duration: u32,
    pub reversed_duration: u32,
    pub super_duration: u32,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            freeze_duration: 180,
            reversed_duration: 600,
            super_duration: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleTuning {
    /// Frames between bubble spawns.
    pub spawn_interval: u32,
}

impl Default for BubbleTuning {
    fn default() -> Self {
        Self { spawn_interval: 150 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformTuning {
    /// A breakable platform breaks once its stand counter exceeds this.
    pub break_threshold: u32,
    /// Frames a broken platform stays gone.
    pub respawn_frames: u32,
    /// How far (px) a combatant's feet may sit from a platform top and still count as standing.
    pub stand_tolerance: f32,
    pub debris_gravity: f32,
    /// Alpha lost by each debris piece per frame (alpha starts at 255).
    pub debris_fade: f32,
}

impl Default for PlatformTuning {
    fn default() -> Self {
        Self {
            break_threshold: 0,
            respawn_frames: 180,
            stand_tolerance: 10.0,
            debris_gravity: 0.5,
            debris_fade: 6.0,
        }
    }
}

// ── Settings ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fps: u32,
    pub arena: Arena,
    pub physics: Physics,
    pub combat: Combat,
    pub effects: Effects,
    pub bubbles: BubbleTuning,
    pub platforms: PlatformTuning,
}

impl Settings {
    /// Load settings from a JSON file and validate them.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.fps == 0 {
            return invalid("fps must be positive");
        }
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            return invalid("arena dimensions must be positive");
        }
        if self.arena.width <= 2.0 * BUBBLE_SPAWN_MARGIN {
            return Err(ConfigError::Invalid(format!(
                "arena width {} leaves no room to spawn bubbles (must exceed {})",
                self.arena.width,
                2.0 * BUBBLE_SPAWN_MARGIN
            )));
        }
        if self.physics.gravity <= 0.0 {
            return invalid("gravity must be positive");
        }
        if self.physics.jump_power >= 0.0 {
            return invalid("jump_power must be negative (upward)");
        }
        if self.physics.move_speed <= 0.0 {
            return invalid("move_speed must be positive");
        }
        if self.physics.combatant_width <= 0.0 || self.physics.combatant_height <= 0.0 {
            return invalid("combatant dimensions must be positive");
        }
        if self.combat.max_health <= 0 {
            return invalid("max_health must be positive");
        }
        if self.bubbles.spawn_interval == 0 {
            return invalid("bubble spawn_interval must be positive");
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 60,
            arena: Arena::default(),
            physics: Physics::default(),
            combat: Combat::default(),
            effects: Effects::default(),
            bubbles: BubbleTuning::default(),
            platforms: PlatformTuning::default(),
        }
    }
}
