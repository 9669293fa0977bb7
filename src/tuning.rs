//! Data-driven game balance
//!
//! Values the level designer may adjust. Behaviour the simulation depends on
//! for correctness (shell speed, damage, wave cadence) lives in [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_BAND_HEIGHT;
use crate::error::{Error, Result};

/// Adjustable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Hostiles ===
    /// Hostile hull speed (units/s)
    pub hostile_speed: f32,
    /// Hostile hull size (width, height)
    pub hostile_size: Vec2,
    /// Distance ahead of a hostile its shells aim at
    pub hostile_shot_range: f32,

    // === Player ===
    /// Player hull speed (units/s)
    pub player_speed: f32,
    /// Player hull size (width, height)
    pub player_size: Vec2,
    /// Hull rotation rate toward the pressed direction (degrees/s)
    pub player_turn_rate: f32,
    pub player_health: i32,
    /// Distance from hull centre to the turret muzzle
    pub muzzle_length: f32,

    // === Shells ===
    /// Side of the square shell hit box
    pub projectile_size: f32,

    // === Waves ===
    /// Height of one level band
    pub level_band_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hostile_speed: 100.0,
            hostile_size: Vec2::new(40.0, 40.0),
            hostile_shot_range: 600.0,

            player_speed: 385.0,
            player_size: Vec2::new(50.0, 53.0),
            player_turn_rate: 1200.0,
            player_health: 100,
            muzzle_length: 40.0,

            projectile_size: 6.0,

            level_band_height: LEVEL_BAND_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("hostile_speed", self.hostile_speed),
            ("hostile_size.x", self.hostile_size.x),
            ("hostile_size.y", self.hostile_size.y),
            ("hostile_shot_range", self.hostile_shot_range),
            ("player_speed", self.player_speed),
            ("player_size.x", self.player_size.x),
            ("player_size.y", self.player_size.y),
            ("player_turn_rate", self.player_turn_rate),
            ("projectile_size", self.projectile_size),
            ("level_band_height", self.level_band_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.player_health <= 0 {
            return Err(Error::InvalidTuning(format!(
                "player_health must be positive, got {}",
                self.player_health
            )));
        }
        if self.muzzle_length < 0.0 {
            return Err(Error::InvalidTuning(format!(
                "muzzle_length must not be negative, got {}",
                self.muzzle_length
            )));
        }
        Ok(())
    }
}
