//! Block Dodge - A falling-block dodging arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (movement, spawning, collisions, scoring)
//! - `hud`: Score and game-over labels
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Headless driver for native runs
//! - `config`: Field dimensions, speeds and presets

pub mod config;
pub mod error;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, Preset};
pub use error::{ConfigError, GameError};

/// Default game configuration constants (the `Classic` preset)
pub mod consts {
    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player moves this many pixels per frame while a key is held
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Gap between the player's bottom edge and the field bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Blocks fall this many pixels per frame
    pub const BLOCK_SPEED: f32 = 3.0;
    /// Side of the square falling block (also the classic player size)
    pub const BLOCK_SIZE: f32 = 30.0;
    /// Wall-clock spawn interval
    pub const BLOCK_SPAWN_INTERVAL_MS: u32 = 2000;

    /// HUD
    pub const SCORE_FONT_SIZE: f32 = 24.0;
    pub const GAME_OVER_FONT_SIZE: f32 = 48.0;
    pub const HUD_MARGIN: f32 = 10.0;

    /// Light blue field background
    pub const BACKGROUND_COLOR: u32 = 0x1099bb;

    /// Movement keys (`KeyboardEvent.key` values)
    pub const KEY_LEFT: &str = "ArrowLeft";
    pub const KEY_RIGHT: &str = "ArrowRight";

    /// Id of the host element the canvas is mounted into
    pub const CONTAINER_ID: &str = "game-container";
}
