//! Shot controller: drag-to-charge aiming and ball-in-hand placement
//!
//! A shot is a press on the cue ball, a drag that sets the power, and a
//! release that fires the cue ball toward the release point.

use std::fmt;

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState};
use super::table;
use crate::consts::*;
use crate::distance;

/// Why a ball-in-hand placement was refused
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementError {
    /// The cue ball is not in hand (phase is not `Scratch`)
    NotInHand,
    /// Balls from the last shot are still rolling
    BallsMoving,
    /// The point is outside the rails or too close to a cushion
    OutOfBounds { pos: Vec2 },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::NotInHand => write!(f, "cue ball is not in hand"),
            PlacementError::BallsMoving => write!(f, "balls are still rolling"),
            PlacementError::OutOfBounds { pos } => {
                write!(f, "placement ({:.1}, {:.1}) is outside the rails", pos.x, pos.y)
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Whether the current player may start a drag this tick
pub fn can_aim(state: &GameState) -> bool {
    state.phase.accepts_shot() && !state.balls_moving
}

/// Start a drag if the press lands on the cue ball. Returns true if aiming began.
pub fn begin_drag(state: &mut GameState, pointer: Vec2) -> bool {
    if !can_aim(state) {
        return false;
    }
    let anchor = state.cue_anchor();
    if distance(pointer, anchor) > BALL_RADIUS * GRAB_RADIUS_FACTOR {
        return false;
    }
    let charge = &mut state.charge;
    charge.aiming = true;
    charge.drag_start = pointer;
    charge.pull = 0.0;
    charge.power = 0.0;
    true
}

/// Update pull distance and power while the button is held
pub fn update_drag(state: &mut GameState, pointer: Vec2) {
    if !state.charge.aiming {
        return;
    }
    let pull = distance(pointer, state.cue_anchor()).min(MAX_POWER_PIXELS);
    state.charge.pull = pull;
    state.charge.power = pull / MAX_POWER_PIXELS;
}

/// Finish a drag. Fires the cue ball toward `pointer` and returns its new
/// velocity, or `None` if no drag was active or the release was on the ball.
pub fn release(state: &mut GameState, pointer: Vec2) -> Option<Vec2> {
    if !state.charge.aiming {
        return None;
    }
    state.charge.aiming = false;

    let delta = pointer - state.cue_anchor();
    let len = delta.length();
    if len < MIN_RELEASE_DISTANCE {
        state.charge.pull = 0.0;
        state.charge.power = 0.0;
        log::debug!("Release on the cue ball, shot discarded");
        return None;
    }

    let speed = (state.charge.pull / MAX_POWER_PIXELS * MAX_SHOT_SPEED).min(MAX_SHOT_SPEED);
    let vel = delta / len * speed;
    state.cue_ball_mut().vel = vel;

    state.phase = GamePhase::Playing;
    state.shooter = state.current_player;
    state.charge.recoiling = true;
    state.charge.recoil_timer = RECOIL_SECONDS;
    state.charge.power = 0.0;
    state.events.push(GameEvent::ShotFired { speed });
    log::info!("{} shoots at {:.1} px/tick", state.current().name, speed);

    Some(vel)
}

/// Put the cue ball down during a scratch.
///
/// A legal point moves the cue ball there at rest and resumes play with the
/// current (ball-in-hand) player. Anything else keeps the scratch and sets an
/// error status. Placement waits for the table to settle, otherwise the
/// settle would pass the turn before the ball-in-hand player could shoot.
pub fn place_cue_ball(state: &mut GameState, pos: Vec2) -> Result<(), PlacementError> {
    if state.phase != GamePhase::Scratch {
        return Err(PlacementError::NotInHand);
    }
    if state.balls_moving {
        state.status = "Wait for balls to stop".to_string();
        state.events.push(GameEvent::PlacementRejected);
        return Err(PlacementError::BallsMoving);
    }
    if !table::is_legal_placement(pos) {
        state.status = "Invalid position! Place inside rails away from pockets".to_string();
        state.events.push(GameEvent::PlacementRejected);
        log::debug!("Rejected cue placement at {:?}", pos);
        return Err(PlacementError::OutOfBounds { pos });
    }

    state.cue_respawn = pos;
    let cue = state.cue_ball_mut();
    cue.pos = pos;
    cue.vel = Vec2::ZERO;
    cue.pocketed = false;

    state.phase = GamePhase::Playing;
    state.status = format!("Cue placed. {}'s turn", state.current().name);
    state.events.push(GameEvent::CuePlaced { pos });
    log::info!("{} placed the cue ball at {:?}", state.current().name, pos);
    Ok(())
}
