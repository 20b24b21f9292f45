//! Fixed timestep simulation tick
//!
//! Core game loop that advances the table deterministically. Each tick runs,
//! in order: input (restart, placement or shot gesture), cosmetic recoil,
//! physics (integrate, ball collisions, pockets), and settle detection.

use glam::Vec2;

use super::collision::resolve_ball_collisions;
use super::integrate::integrate_balls;
use super::rules::{PocketOutcome, advance_turn_if_settled, check_pockets};
use super::shot::{begin_drag, place_cue_ball, release, update_drag};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in table space
    pub pointer: Vec2,
    /// Action button went down this tick
    pub pressed: bool,
    /// Action button is down
    pub held: bool,
    /// Action button went up this tick
    pub released: bool,
    /// Re-rack and start over
    pub restart: bool,
}

impl TickInput {
    /// Pointer idle at `pointer`
    pub fn hover(pointer: Vec2) -> Self {
        Self {
            pointer,
            ..Default::default()
        }
    }

    pub fn press(pointer: Vec2) -> Self {
        Self {
            pointer,
            pressed: true,
            held: true,
            ..Default::default()
        }
    }

    pub fn drag(pointer: Vec2) -> Self {
        Self {
            pointer,
            held: true,
            ..Default::default()
        }
    }

    pub fn release(pointer: Vec2) -> Self {
        Self {
            pointer,
            released: true,
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }
}

/// Apply one tick of input. A restart or a ball-in-hand click consumes the
/// whole input pass; otherwise the press/hold/release gesture is processed.
fn handle_input(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
        state.events.push(GameEvent::Restarted);
        log::info!("Rack restarted");
        return;
    }

    if state.phase == GamePhase::Scratch {
        if input.pressed {
            // Rejection is reported through the status line
            let _ = place_cue_ball(state, input.pointer);
        }
        return;
    }

    if state.balls_moving {
        return;
    }

    if input.pressed {
        begin_drag(state, input.pointer);
    }
    if input.held {
        update_drag(state, input.pointer);
    }
    if input.released {
        release(state, input.pointer);
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    handle_input(state, input);
    state.charge.decay_recoil(SIM_DT);

    match state.phase {
        GamePhase::Playing | GamePhase::Scratch => {
            step_physics(state);
            advance_turn_if_settled(state);
        }
        GamePhase::Start | GamePhase::Won | GamePhase::Lost => {}
    }
}

/// One physics pass: every ball moves independently, then pairs are
/// separated, then pockets are checked against the corrected positions.
pub fn step_physics(state: &mut GameState) -> PocketOutcome {
    integrate_balls(&mut state.balls);
    resolve_ball_collisions(&mut state.balls);
    check_pockets(state)
}
