//! Demo autopilot
//!
//! Plays by pressing and releasing the movement keys, the same way a person
//! would, so it goes through the normal input path.

use super::schedule::LoopEvent;
use super::state::{FallingBlock, GameState};
use crate::consts::{KEY_LEFT, KEY_RIGHT};

/// Which way the autopilot wants to go this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
    Stay,
}

impl Steer {
    fn key(self) -> Option<&'static str> {
        match self {
            Steer::Left => Some(KEY_LEFT),
            Steer::Right => Some(KEY_RIGHT),
            Steer::Stay => None,
        }
    }
}

/// Dodges the block that will reach the player's row first
#[derive(Debug, Clone)]
pub struct Autopilot {
    held: Steer,
    /// How far above the player (in player heights) a block counts as a threat
    lookahead: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            held: Steer::Stay,
            lookahead: 8.0,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a direction for the current state
    pub fn decide(&self, state: &GameState) -> Steer {
        let player = state.player.bounds();
        let window_top = player.top() - state.player.size.y * self.lookahead;
        // Keep a frame's worth of travel between the player and a block's side
        let margin = state.player.speed;

        let threat = state
            .blocks
            .iter()
            .filter(|b| {
                let r = b.bounds();
                r.bottom() > window_top
                    && r.top() < player.bottom()
                    && r.left() < player.right() + margin
                    && r.right() > player.left() - margin
            })
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        match threat {
            Some(block) => dodge(state, block, margin),
            None => Steer::Stay,
        }
    }

    /// Key transitions needed to hold the chosen direction
    pub fn update(&mut self, state: &GameState) -> Vec<LoopEvent> {
        let want = self.decide(state);
        if want == self.held {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(key) = self.held.key() {
            events.push(LoopEvent::KeyUp(key.to_string()));
        }
        if let Some(key) = want.key() {
            events.push(LoopEvent::KeyDown(key.to_string()));
        }
        self.held = want;
        events
    }

    /// Release whatever is held (autopilot switched off)
    pub fn release(&mut self) -> Vec<LoopEvent> {
        let events = self
            .held
            .key()
            .map(|key| vec![LoopEvent::KeyUp(key.to_string())])
            .unwrap_or_default();
        self.held = Steer::Stay;
        events
    }
}

/// Step toward whichever side clears the block with less travel
fn dodge(state: &GameState, block: &FallingBlock, margin: f32) -> Steer {
    let player = state.player.bounds();
    let block = block.bounds();
    let max_x = state.config.player_max_x();

    let left_target = block.left() - player.size.x - margin;
    let right_target = block.right() + margin;

    let left_cost = (player.left() - left_target).max(0.0);
    let right_cost = (right_target - player.left()).max(0.0);

    let can_left = left_target >= 0.0;
    let can_right = right_target <= max_x;

    match (can_left, can_right) {
        (true, true) if left_cost <= right_cost => Steer::Left,
        (true, true) => Steer::Right,
        (true, false) => Steer::Left,
        (false, true) => Steer::Right,
        // Cornered: run for the wider gap
        (false, false) => {
            if block.left() > state.config.field_width - block.right() {
                Steer::Left
            } else {
                Steer::Right
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::schedule::GameLoop;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default(), 1)
    }

    #[test]
    fn test_stays_when_clear() {
        let mut state = new_state();
        state.push_block(0.0);
        state.push_block(700.0);
        assert_eq!(Autopilot::new().decide(&state), Steer::Stay);
    }

    #[test]
    fn test_dodges_toward_shorter_side() {
        let mut state = new_state();
        // Block overlapping the player's right half
        state.push_block(395.0);
        state.blocks[0].pos.y = 400.0;
        assert_eq!(Autopilot::new().decide(&state), Steer::Left);

        state.blocks[0].pos.x = 375.0;
        assert_eq!(Autopilot::new().decide(&state), Steer::Right);
    }

    #[test]
    fn test_dodges_away_from_wall() {
        let mut state = new_state();
        state.player.pos.x = 0.0;
        state.push_block(10.0);
        state.blocks[0].pos.y = 400.0;
        assert_eq!(Autopilot::new().decide(&state), Steer::Right);
    }

    #[test]
    fn test_ignores_far_blocks() {
        let mut state = new_state();
        state.push_block(385.0);
        state.blocks[0].pos.y = 0.0;
        assert_eq!(Autopilot::new().decide(&state), Steer::Stay);
    }

    #[test]
    fn test_update_emits_key_transitions() {
        let mut state = new_state();
        state.push_block(395.0);
        state.blocks[0].pos.y = 400.0;

        let mut pilot = Autopilot::new();
        assert_eq!(
            pilot.update(&state),
            vec![LoopEvent::KeyDown(KEY_LEFT.to_string())]
        );
        // Holding already
        assert!(pilot.update(&state).is_empty());

        state.blocks[0].pos.x = 375.0;
        assert_eq!(
            pilot.update(&state),
            vec![
                LoopEvent::KeyUp(KEY_LEFT.to_string()),
                LoopEvent::KeyDown(KEY_RIGHT.to_string()),
            ]
        );

        assert_eq!(
            pilot.release(),
            vec![LoopEvent::KeyUp(KEY_RIGHT.to_string())]
        );
        assert!(pilot.release().is_empty());
    }

    #[test]
    fn test_autopilot_escapes_single_block() {
        let mut game = GameLoop::new(new_state());
        game.state_mut().push_block(385.0);
        game.state_mut().blocks[0].pos.y = 300.0;

        let mut pilot = Autopilot::new();
        for _ in 0..200 {
            for event in pilot.update(game.state()) {
                game.push(event);
            }
            game.push(LoopEvent::Frame);
            game.pump();
        }

        assert!(!game.state().is_game_over());
        assert_eq!(game.state().score, 1);
    }
}
