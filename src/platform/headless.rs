//! Simulated-clock driver
//!
//! Frames arrive every `1000 / fps` ms and the spawn timer fires on its own
//! interval. Whichever is due first is queued first; on a tie the spawn goes
//! ahead of the frame.

use std::collections::BTreeMap;

use crate::hud::{EstimatedMetrics, Hud};
use crate::sim::{Autopilot, GameEvent, GameLoop, GameState, LoopEvent, SpawnTimer};

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames delivered (including frames after game over)
    pub frames: u64,
    pub elapsed_ms: f64,
    pub spawned: u64,
    pub score: u64,
    pub game_over: bool,
}

/// Drives a `GameLoop` without a browser
pub struct HeadlessRun {
    game: GameLoop,
    spawn_timer: SpawnTimer,
    frame_interval_ms: f64,
    now_ms: f64,
    frames: u64,
    spawned: u64,
    /// Key events injected just before the given frame number (1-based)
    script: BTreeMap<u64, Vec<LoopEvent>>,
    autopilot: Option<Autopilot>,
    hud: Hud,
    metrics: EstimatedMetrics,
}

impl HeadlessRun {
    pub fn new(state: GameState, fps: u32) -> Self {
        let metrics = EstimatedMetrics::default();
        let hud = Hud::new(&state.config, &metrics);
        let spawn_timer = SpawnTimer::new(state.config.spawn_interval_ms, 0.0);
        Self {
            game: GameLoop::new(state),
            spawn_timer,
            frame_interval_ms: 1000.0 / f64::from(fps.max(1)),
            now_ms: 0.0,
            frames: 0,
            spawned: 0,
            script: BTreeMap::new(),
            autopilot: None,
            hud,
            metrics,
        }
    }

    /// Let the autopilot hold the movement keys
    pub fn with_autopilot(mut self) -> Self {
        self.autopilot = Some(Autopilot::new());
        self
    }

    /// Inject an input event right before frame `frame` (1-based) is ticked
    pub fn script(&mut self, frame: u64, event: LoopEvent) {
        self.script.entry(frame).or_default().push(event);
    }

    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Advance the clock to the next due event and process it
    pub fn step(&mut self) -> Vec<GameEvent> {
        let next_frame_ms = (self.frames + 1) as f64 * self.frame_interval_ms;
        let next_spawn_ms = self.spawn_timer.next_fire_ms();

        if next_spawn_ms <= next_frame_ms {
            self.now_ms = next_spawn_ms;
            for _ in 0..self.spawn_timer.poll(self.now_ms) {
                self.game.push(LoopEvent::Spawn);
            }
        } else {
            self.now_ms = next_frame_ms;
            self.frames += 1;
            if let Some(events) = self.script.remove(&self.frames) {
                for event in events {
                    self.game.push(event);
                }
            }
            if let Some(pilot) = self.autopilot.as_mut() {
                if !self.game.state().is_game_over() {
                    for event in pilot.update(self.game.state()) {
                        self.game.push(event);
                    }
                }
            }
            self.game.push(LoopEvent::Frame);
        }

        let events = self.game.pump();
        for event in &events {
            if matches!(event, GameEvent::BlockSpawned { .. }) {
                self.spawned += 1;
            }
            self.hud.apply(event, &self.metrics);
        }
        events
    }

    /// Deliver `frames` more frames (and every spawn due meanwhile)
    pub fn run_frames(&mut self, frames: u64) -> RunSummary {
        let target = self.frames + frames;
        while self.frames < target {
            self.step();
        }
        self.summary()
    }

    /// Run until the player is hit or `max_frames` frames have been delivered
    pub fn run_until_game_over(&mut self, max_frames: u64) -> RunSummary {
        while self.frames < max_frames && !self.game.state().is_game_over() {
            self.step();
        }
        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        let state = self.game.state();
        RunSummary {
            frames: self.frames,
            elapsed_ms: self.now_ms,
            spawned: self.spawned,
            score: state.score,
            game_over: state.is_game_over(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::KEY_RIGHT;

    /// Field so tall nothing reaches the player within a short run
    fn tall_config() -> GameConfig {
        GameConfig {
            field_height: 100_000.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_spawns_follow_wall_clock() {
        let mut run = HeadlessRun::new(GameState::new(tall_config(), 5), 50);
        // 500 frames at 50 fps = 10 s = 5 spawn firings
        let summary = run.run_frames(500);
        assert_eq!(summary.frames, 500);
        assert_eq!(summary.spawned, 5);
        assert_eq!(run.state().blocks.len(), 5);
        assert!((summary.elapsed_ms - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_rate_independent_of_fps() {
        let mut slow = HeadlessRun::new(GameState::new(tall_config(), 5), 25);
        let mut fast = HeadlessRun::new(GameState::new(tall_config(), 5), 100);
        assert_eq!(slow.run_frames(250).spawned, 5);
        assert_eq!(fast.run_frames(1000).spawned, 5);
        // Same wall time, four times the frames: blocks fall four times further
        let slow_y = slow.state().blocks[0].pos.y;
        let fast_y = fast.state().blocks[0].pos.y;
        assert!(fast_y > slow_y * 3.0);
    }

    #[test]
    fn test_scripted_input() {
        let mut run = HeadlessRun::new(GameState::new(tall_config(), 5), 60);
        run.script(1, LoopEvent::KeyDown(KEY_RIGHT.to_string()));
        run.script(11, LoopEvent::KeyUp(KEY_RIGHT.to_string()));
        run.run_frames(20);
        // Held for frames 1..=10
        assert_eq!(run.state().player.pos.x, 385.0 + 50.0);
    }

    #[test]
    fn test_score_matches_hud() {
        let mut run = HeadlessRun::new(GameState::new(GameConfig::default(), 11), 60);
        let summary = run.run_until_game_over(20_000);
        assert_eq!(run.hud().score.text, format!("Score: {}", summary.score));
        assert_eq!(summary.game_over, run.hud().game_over.is_some());
        // Every spawned block is either still falling or was scored
        assert_eq!(
            summary.score + run.state().blocks.len() as u64,
            summary.spawned
        );
    }

    #[test]
    fn test_autopilot_keeps_player_in_field() {
        let mut run =
            HeadlessRun::new(GameState::new(GameConfig::default(), 3), 60).with_autopilot();
        run.run_until_game_over(3_000);
        let x = run.state().player.pos.x;
        assert!(x >= 0.0 && x <= run.state().config.player_max_x());
    }
}
