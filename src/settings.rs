//! Physics configuration
//!
//! Loaded from JSON alongside a level, or built from a game mode preset.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Game mode presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Gravity, jumping and bouncing tiles
    #[default]
    Platformer,
    /// Free movement on both axes, no gravity
    TopDown,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Platformer => "platformer",
            GameMode::TopDown => "top-down",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "platformer" | "platform" => Some(GameMode::Platformer),
            "top-down" | "topdown" | "top_down" => Some(GameMode::TopDown),
            _ => None,
        }
    }
}

/// Tunable physics parameters, all in pixels and ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per tick (0 disables gravity and jumping)
    pub gravity: f32,
    /// Upward speed applied by a jump
    pub jump_force: f32,
    /// Terminal fall speed
    pub max_fall_speed: f32,
    /// Horizontal (and top-down vertical) speed while a direction is held
    pub move_speed: f32,
    /// Length of an interactive tile bounce
    pub bounce_duration: u32,
    /// Initial bounce lift of a struck tile
    pub bounce_peak_height: f32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Height of the strike probe above the body's head
    pub strike_probe_height: i32,
    /// Actor bounding box size
    pub body_size: IVec2,
    /// Camera viewport size
    pub viewport: IVec2,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            max_fall_speed: MAX_FALL_SPEED,
            move_speed: WALK_SPEED,
            bounce_duration: BOUNCE_DURATION_TICKS,
            bounce_peak_height: BOUNCE_PEAK_HEIGHT,
            tick_rate: TICK_RATE,
            strike_probe_height: STRIKE_PROBE_HEIGHT,
            body_size: IVec2::splat(TILE_SIZE),
            viewport: IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }
}

impl PhysicsConfig {
    /// Gravity-free preset with the larger top-down actor
    pub fn top_down() -> Self {
        Self {
            gravity: 0.0,
            move_speed: TOP_DOWN_SPEED,
            body_size: IVec2::splat(TOP_DOWN_BODY_SIZE),
            ..Self::default()
        }
    }

    pub fn from_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Platformer => Self::default(),
            GameMode::TopDown => Self::top_down(),
        }
    }

    /// Whether gravity, jumping and tile strikes are active
    #[inline]
    pub fn gravity_enabled(&self) -> bool {
        self.gravity > 0.0
    }

    /// The preset this configuration behaves like
    pub fn mode(&self) -> GameMode {
        if self.gravity_enabled() {
            GameMode::Platformer
        } else {
            GameMode::TopDown
        }
    }

    /// Seconds per tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|source| Error::Parse {
            what: "physics config",
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded physics config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate == 0 {
            return Err(Error::InvalidConfig("tick_rate must be positive".into()));
        }
        if self.bounce_duration == 0 {
            return Err(Error::InvalidConfig(
                "bounce_duration must be positive".into(),
            ));
        }
        if self.body_size.min_element() <= 0 {
            return Err(Error::InvalidConfig(format!(
                "body_size must be positive, got {}x{}",
                self.body_size.x, self.body_size.y
            )));
        }
        if self.viewport.min_element() <= 0 {
            return Err(Error::InvalidConfig(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.x, self.viewport.y
            )));
        }
        if self.strike_probe_height <= 0 {
            return Err(Error::InvalidConfig(
                "strike_probe_height must be positive".into(),
            ));
        }
        let speeds = [
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
            ("max_fall_speed", self.max_fall_speed),
            ("move_speed", self.move_speed),
            ("bounce_peak_height", self.bounce_peak_height),
        ];
        for (name, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip_names() {
        assert_eq!(GameMode::from_str("Top-Down"), Some(GameMode::TopDown));
        assert_eq!(GameMode::from_str("platformer"), Some(GameMode::Platformer));
        assert_eq!(GameMode::from_str("racing"), None);
        assert_eq!(GameMode::TopDown.as_str(), "top-down");
    }

    #[test]
    fn test_presets() {
        let platformer = PhysicsConfig::from_mode(GameMode::Platformer);
        assert!(platformer.gravity_enabled());
        assert_eq!(platformer.body_size, IVec2::new(16, 16));

        let top_down = PhysicsConfig::from_mode(GameMode::TopDown);
        assert!(!top_down.gravity_enabled());
        assert_eq!(top_down.move_speed, 5.0);
        assert_eq!(top_down.body_size, IVec2::new(32, 32));
    }

    #[test]
    fn test_mode_follows_gravity() {
        assert_eq!(PhysicsConfig::default().mode(), GameMode::Platformer);
        assert_eq!(PhysicsConfig::top_down().mode(), GameMode::TopDown);
        let config = PhysicsConfig::from_json(r#"{ "gravity": 0.0 }"#).unwrap();
        assert_eq!(config.mode(), GameMode::TopDown);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            PhysicsConfig::from_json(r#"{ "gravity": 0.25, "jump_force": 6.0 }"#).unwrap();
        assert_eq!(config.gravity, 0.25);
        assert_eq!(config.jump_force, 6.0);
        assert_eq!(config.max_fall_speed, MAX_FALL_SPEED);
        assert_eq!(config.viewport, IVec2::new(480, 320));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = PhysicsConfig::from_json("{ gravity: }").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = PhysicsConfig::from_json(r#"{ "tick_rate": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let config = PhysicsConfig {
            gravity: -1.0,
            ..PhysicsConfig::default()
        };
        assert!(config.validate().is_err());

        let config = PhysicsConfig {
            body_size: IVec2::new(0, 16),
            ..PhysicsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_dt() {
        let config = PhysicsConfig::default();
        assert!((config.tick_dt() - 1.0 / 60.0).abs() < 1e-6);
    }
}
