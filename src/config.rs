//! Game configuration
//!
//! One record drives every tunable: field size, speeds, entity sizes and the
//! HUD layout. Two presets cover the shipped layouts.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Built-in layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// 800x600 field, square player
    #[default]
    Classic,
    /// 2000x1700 field, wide flat paddle
    Wide,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Wide => "Wide",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "default" => Some(Preset::Classic),
            "wide" | "large" => Some(Preset::Wide),
            _ => None,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    /// Pixels per frame
    pub player_speed: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the player and the bottom edge of the field
    pub player_bottom_margin: f32,

    // === Blocks ===
    /// Pixels per frame
    pub block_speed: f32,
    pub block_size: f32,
    pub spawn_interval_ms: u32,

    // === HUD ===
    pub score_font_size: f32,
    pub game_over_font_size: f32,
    /// Offset of the score label from the top-left corner
    pub hud_margin: f32,

    // === Surface ===
    /// 0xRRGGBB
    pub background_color: u32,
    /// Canvas scaling factor. `None` uses the device pixel ratio.
    pub resolution: Option<f32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_width: BLOCK_SIZE,
            player_height: BLOCK_SIZE,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,

            block_speed: BLOCK_SPEED,
            block_size: BLOCK_SIZE,
            spawn_interval_ms: BLOCK_SPAWN_INTERVAL_MS,

            score_font_size: SCORE_FONT_SIZE,
            game_over_font_size: GAME_OVER_FONT_SIZE,
            hud_margin: HUD_MARGIN,

            background_color: BACKGROUND_COLOR,
            resolution: None,
        }
    }
}

impl GameConfig {
    /// Create a config from a preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Classic => Self::default(),
            Preset::Wide => Self {
                field_width: 2000.0,
                field_height: 1700.0,
                player_speed: 8.0,
                player_width: 120.0,
                player_height: 20.0,
                player_bottom_margin: 20.0,
                score_font_size: 32.0,
                game_over_font_size: 64.0,
                hud_margin: 20.0,
                resolution: Some(1.0),
                ..Self::default()
            },
        }
    }

    /// Parse a JSON config. Missing fields fall back to the classic values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the simulation can't honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.field_width) || !positive(self.field_height) {
            return Err(ConfigError::EmptyField {
                width: self.field_width,
                height: self.field_height,
            });
        }

        for (what, value) in [
            ("player width", self.player_width),
            ("player height", self.player_height),
            ("block size", self.block_size),
        ] {
            if !positive(value) {
                return Err(ConfigError::NonPositive { what, value });
            }
        }

        for (what, size) in [("player", self.player_width), ("block", self.block_size)] {
            if size > self.field_width {
                return Err(ConfigError::TooWide {
                    what,
                    size,
                    field: self.field_width,
                });
            }
        }

        if !self.player_bottom_margin.is_finite() || self.player_bottom_margin < 0.0 {
            return Err(ConfigError::Negative {
                what: "player bottom margin",
                value: self.player_bottom_margin,
            });
        }
        if self.player_height + self.player_bottom_margin > self.field_height {
            return Err(ConfigError::TooTall {
                size: self.player_height + self.player_bottom_margin,
                field: self.field_height,
            });
        }

        for (what, value) in [
            ("player speed", self.player_speed),
            ("block speed", self.block_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::BadSpeed { what, value });
            }
        }

        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }

        if let Some(resolution) = self.resolution {
            if !positive(resolution) {
                return Err(ConfigError::NonPositive {
                    what: "resolution",
                    value: resolution,
                });
            }
        }

        Ok(())
    }

    /// Player start position: horizontally centered, resting near the bottom
    pub fn player_start(&self) -> (f32, f32) {
        (
            self.field_width / 2.0 - self.player_width / 2.0,
            self.field_height - self.player_height - self.player_bottom_margin,
        )
    }

    /// Rightmost x the player may occupy
    pub fn player_max_x(&self) -> f32 {
        self.field_width - self.player_width
    }

    /// Rightmost x a block may spawn at
    pub fn block_max_x(&self) -> f32 {
        self.field_width - self.block_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic_and_valid() {
        let config = GameConfig::default();
        assert_eq!(config, GameConfig::from_preset(Preset::Classic));
        assert!(config.validate().is_ok());
        assert_eq!(config.player_start(), (385.0, 560.0));
        assert_eq!(config.player_max_x(), 770.0);
    }

    #[test]
    fn test_wide_preset() {
        let config = GameConfig::from_preset(Preset::Wide);
        assert!(config.validate().is_ok());
        assert_eq!(config.player_start(), (940.0, 1660.0));
        assert_eq!(config.block_speed, 3.0);
        assert_eq!(config.spawn_interval_ms, 2000);
        assert_eq!(config.resolution, Some(1.0));
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(Preset::from_str("WIDE"), Some(Preset::Wide));
        assert_eq!(Preset::from_str("classic"), Some(Preset::Classic));
        assert_eq!(Preset::from_str("huge"), None);
        assert_eq!(Preset::from_str(Preset::Wide.as_str()), Some(Preset::Wide));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = GameConfig {
            field_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyField { .. })));

        let config = GameConfig {
            player_width: 900.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooWide { what: "player", .. })
        ));

        let config = GameConfig {
            block_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadSpeed { what: "block speed", .. })
        ));

        let config = GameConfig {
            spawn_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpawnInterval));
    }

    #[test]
    fn test_validate_keeps_player_on_field() {
        let config = GameConfig {
            player_bottom_margin: -5.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { what: "player bottom margin", .. })
        ));

        let config = GameConfig {
            player_height: 500.0,
            player_bottom_margin: 150.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooTall { size: 650.0, field: 600.0 })
        );

        // Flush with the top edge is still on the field
        let config = GameConfig {
            player_height: 590.0,
            player_bottom_margin: 10.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.player_start().1, 0.0);

        assert!(matches!(
            GameConfig::from_json(r#"{ "field_height": 30 }"#),
            Err(ConfigError::TooTall { .. })
        ));
    }

    #[test]
    fn test_from_json_partial_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "field_width": 400, "block_speed": 6 }"#)
            .expect("valid config");
        assert_eq!(config.field_width, 400.0);
        assert_eq!(config.block_speed, 6.0);
        assert_eq!(config.field_height, FIELD_HEIGHT);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "block_size": 1000 }"#),
            Err(ConfigError::TooWide { what: "block", .. })
        ));
    }
}
