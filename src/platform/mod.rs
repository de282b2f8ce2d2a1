//! Platform abstraction layer
//!
//! The browser drives the game from `requestAnimationFrame` and
//! `setInterval` (see `main.rs`). Native builds have no window, so
//! `headless` replays the same two event sources on a simulated clock.

pub mod headless;

pub use headless::{HeadlessRun, RunSummary};
