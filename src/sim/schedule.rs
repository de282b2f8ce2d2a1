//! Event sources feeding the simulation
//!
//! Frame ticks, spawn timer firings and key events are independent sources.
//! They all funnel into one queue on one thread and are applied in arrival
//! order, so a spawn that lands after a collision sees the game-over flag
//! and does nothing.

use std::collections::VecDeque;

use super::state::{GameEvent, GameState};
use super::tick::{spawn_block, tick};

/// One unit of work for the game loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    KeyDown(String),
    KeyUp(String),
    /// Spawn timer fired
    Spawn,
    /// A frame is about to render
    Frame,
}

/// Fixed-interval wall-clock timer, `setInterval` style
///
/// The first firing is one interval after the start time.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval_ms: f64,
    next_fire_ms: f64,
}

impl SpawnTimer {
    pub fn new(interval_ms: u32, start_ms: f64) -> Self {
        let interval_ms = f64::from(interval_ms.max(1));
        Self {
            interval_ms,
            next_fire_ms: start_ms + interval_ms,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// When the timer fires next
    pub fn next_fire_ms(&self) -> f64 {
        self.next_fire_ms
    }

    /// Number of firings due at `now_ms`, advancing past them
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let mut fired = 0;
        while self.next_fire_ms <= now_ms {
            self.next_fire_ms += self.interval_ms;
            fired += 1;
        }
        fired
    }
}

/// Owns one run and the queue of pending loop events
#[derive(Debug)]
pub struct GameLoop {
    state: GameState,
    queue: VecDeque<LoopEvent>,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            queue: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Replace the run (restart). Pending events belonged to the old run.
    pub fn reset(&mut self, state: GameState) {
        self.state = state;
        self.queue.clear();
    }

    /// Queue an event for the next `pump`
    pub fn push(&mut self, event: LoopEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply every queued event in arrival order
    pub fn pump(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.queue.pop_front() {
            events.extend(self.dispatch(event));
        }
        events
    }

    /// Apply a single event right away
    pub fn dispatch(&mut self, event: LoopEvent) -> Vec<GameEvent> {
        match event {
            LoopEvent::KeyDown(key) => {
                self.state.keys.key_down(&key);
                Vec::new()
            }
            LoopEvent::KeyUp(key) => {
                self.state.keys.key_up(&key);
                Vec::new()
            }
            LoopEvent::Spawn => spawn_block(&mut self.state).into_iter().collect(),
            LoopEvent::Frame => tick(&mut self.state),
        }
    }
}
