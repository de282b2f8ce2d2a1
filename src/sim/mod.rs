//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per rendered frame, no elapsed-time scaling
//! - Seeded RNG only
//! - Blocks kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod schedule;
pub mod state;
pub mod tick;

pub use autopilot::{Autopilot, Steer};
pub use collision::Rect;
pub use input::KeyState;
pub use schedule::{GameLoop, LoopEvent, SpawnTimer};
pub use state::{FallingBlock, GameEvent, GamePhase, GameState, Player};
pub use tick::{spawn_block, tick};
