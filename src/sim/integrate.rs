//! Per-ball motion integration
//!
//! Velocities are in table pixels per tick. Each tick a ball is advanced with
//! a single explicit Euler step followed, in order, by friction, the rest
//! snap, rail bounces, and the speed ceiling.

use super::collision::rail_bounce;
use super::state::Ball;
use crate::clamp_speed;
use crate::consts::*;

/// Zero any velocity axis whose magnitude is below the rest threshold
#[inline]
fn snap_to_rest(ball: &mut Ball) {
    if ball.vel.x.abs() < MIN_VELOCITY {
        ball.vel.x = 0.0;
    }
    if ball.vel.y.abs() < MIN_VELOCITY {
        ball.vel.y = 0.0;
    }
}

/// Advance one ball by one tick. Pocketed balls are left untouched.
pub fn integrate_ball(ball: &mut Ball) {
    if !ball.in_play() {
        return;
    }

    ball.pos += ball.vel;
    ball.vel *= FRICTION;
    snap_to_rest(ball);
    rail_bounce(ball);
    ball.vel = clamp_speed(ball.vel, MAX_BALL_SPEED);
}

/// Advance every ball by one tick, independently of the others
pub fn integrate_balls(balls: &mut [Ball]) {
    for ball in balls.iter_mut() {
        integrate_ball(ball);
    }
}
