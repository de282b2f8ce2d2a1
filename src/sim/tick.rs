//! Per-frame simulation step and block spawning
//!
//! Movement is per call: one `tick` is one rendered frame, whatever its
//! duration.

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{KEY_LEFT, KEY_RIGHT};

/// Advance the game by one frame
///
/// Order: player movement, block fall, then the collision/score pass.
/// Returns what happened so the caller can update labels.
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Don't tick once the run has ended
    if state.is_game_over() {
        return events;
    }

    state.time_ticks += 1;

    move_player(state);
    move_blocks(state);
    judge_blocks(state, &mut events);

    events
}

/// Spawn timer callback. Checks the flag before acting.
pub fn spawn_block(state: &mut GameState) -> Option<GameEvent> {
    if state.is_game_over() {
        return None;
    }

    let x = state.random_block_x();
    let id = state.push_block(x);
    log::debug!("Spawned block {} at x={:.1}", id, x);
    Some(GameEvent::BlockSpawned { id, x })
}

/// Apply held movement keys, left then right
///
/// Both checks run every frame, so holding both keys cancels out. A step
/// that would cross a wall stops at it, so the player rests exactly at 0 or
/// `player_max_x` even when the speed doesn't divide the distance.
fn move_player(state: &mut GameState) {
    let max_x = state.config.player_max_x();
    let player = &mut state.player;

    if state.keys.is_held(KEY_LEFT) && player.pos.x > 0.0 {
        player.pos.x = (player.pos.x - player.speed).max(0.0);
    }
    if state.keys.is_held(KEY_RIGHT) && player.pos.x < max_x {
        player.pos.x = (player.pos.x + player.speed).min(max_x);
    }
}

/// Drop every block by its fall speed, in spawn order
fn move_blocks(state: &mut GameState) {
    for block in &mut state.blocks {
        block.pos.y += block.speed;
    }
}

/// Collision and scoring pass
///
/// Walks newest to oldest so removing by index never skips a block.
/// A hit ends the pass immediately.
fn judge_blocks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = state.player.bounds();
    let field_height = state.config.field_height;

    for i in (0..state.blocks.len()).rev() {
        let block = &state.blocks[i];

        if player.overlaps(&block.bounds()) {
            let block_id = block.id;
            state.phase = GamePhase::GameOver;
            log::info!("Game over! Final score: {}", state.score);
            events.push(GameEvent::GameOver {
                block_id,
                score: state.score,
            });
            return;
        }

        // Top edge below the field bottom: fully off-screen
        if block.pos.y > field_height {
            let block = state.blocks.remove(i);
            state.score += 1;
            log::debug!("Block {} cleared, score {}", block.id, state.score);
            events.push(GameEvent::BlockScored {
                id: block.id,
                score: state.score,
            });
        }
    }
}
