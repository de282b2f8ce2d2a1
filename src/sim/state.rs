//! Game state and core simulation types
//!
//! Everything one run needs lives in `GameState`; there are no globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::input::KeyState;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended on a collision. Nothing moves after this.
    GameOver,
}

/// The player-controlled rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame
    pub speed: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let (x, y) = config.player_start();
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(config.player_width, config.player_height),
            speed: config.player_speed,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A square obstacle falling from the top of the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingBlock {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per frame
    pub speed: f32,
}

impl FallingBlock {
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(self.size),
        }
    }
}

/// Things that happened during a tick or spawn, for the HUD and logs
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A block was appended just above the field
    BlockSpawned { id: u32, x: f32 },
    /// A block left the bottom of the field; `score` is the new total
    BlockScored { id: u32, score: u64 },
    /// The player was hit
    GameOver { block_id: u32, score: u64 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn position RNG
    rng: Pcg32,
    pub player: Player,
    /// Active blocks in spawn order
    pub blocks: Vec<FallingBlock>,
    pub keys: KeyState,
    pub score: u64,
    pub phase: GamePhase,
    /// Frames simulated while playing
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given config and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            player: Player::new(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            blocks: Vec::new(),
            keys: KeyState::new(),
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            next_id: 1,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform spawn column in [0, field width - block size]
    pub fn random_block_x(&mut self) -> f32 {
        let max_x = self.config.block_max_x().max(0.0);
        self.rng.random_range(0.0..=max_x)
    }

    /// Append a block at `x`, just above the visible field
    pub fn push_block(&mut self, x: f32) -> u32 {
        let id = self.next_entity_id();
        let size = self.config.block_size;
        self.blocks.push(FallingBlock {
            id,
            pos: Vec2::new(x, -size),
            size,
            speed: self.config.block_speed,
        });
        id
    }
}
