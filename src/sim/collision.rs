//! Collision detection and response
//!
//! Two kinds of contact exist on a pool table: a ball against a straight rail
//! cushion, and a ball against another ball. Both are resolved discretely once
//! per tick with no sub-stepping; a fast ball can tunnel through a narrow gap.

use glam::Vec2;

use super::state::Ball;
use super::table::{MAX_CENTER_X, MAX_CENTER_Y, MIN_CENTER};
use crate::clamp_speed;
use crate::consts::*;

/// Overlap between two balls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first ball's center toward the second's
    pub normal: Vec2,
    /// How far the balls interpenetrate
    pub penetration: f32,
}

/// Check two ball centers for overlap.
///
/// Returns `None` when the balls are apart or when the centers coincide,
/// since a zero-length separation has no defined normal.
pub fn ball_ball_contact(a: Vec2, b: Vec2, radius_sum: f32) -> Option<Contact> {
    let delta = b - a;
    let dist = delta.length();
    if dist >= radius_sum || dist <= COLLISION_EPSILON {
        return None;
    }
    Some(Contact {
        normal: delta / dist,
        penetration: radius_sum - dist,
    })
}

/// Elastic collision between two equal masses along `normal`.
///
/// Each velocity is split into a normal and a tangential part; the normal
/// parts are exchanged and the tangential parts are kept.
pub fn exchange_normal_velocity(va: Vec2, vb: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let tangent = normal.perp();

    let va_n = va.dot(normal);
    let va_t = va.dot(tangent);
    let vb_n = vb.dot(normal);
    let vb_t = vb.dot(tangent);

    (
        normal * vb_n + tangent * va_t,
        normal * va_n + tangent * vb_t,
    )
}

/// Push an overlapping pair apart and exchange their normal velocities
pub fn resolve_pair(a: &mut Ball, b: &mut Ball, contact: Contact) {
    // Each ball moves half the overlap, leaving them just past tangent
    let push = contact.normal * (0.5 * (contact.penetration + SEPARATION_SLOP));
    a.pos -= push;
    b.pos += push;

    let (va, vb) = exchange_normal_velocity(a.vel, b.vel, contact.normal);
    a.vel = clamp_speed(va, MAX_BALL_SPEED);
    b.vel = clamp_speed(vb, MAX_BALL_SPEED);
}

/// Resolve every overlapping pair of balls still in play.
///
/// Pairs are visited once each in index order `(i, j)` with `i < j`; a pair
/// moved by an earlier correction is re-measured when its turn comes.
/// Returns the number of contacts resolved.
pub fn resolve_ball_collisions(balls: &mut [Ball]) -> usize {
    let mut contacts = 0;
    for i in 0..balls.len() {
        let (head, tail) = balls.split_at_mut(i + 1);
        let a = &mut head[i];
        if !a.in_play() {
            continue;
        }
        for b in tail.iter_mut().filter(|b| b.in_play()) {
            if let Some(contact) = ball_ball_contact(a.pos, b.pos, BALL_RADIUS * 2.0) {
                resolve_pair(a, b, contact);
                contacts += 1;
            }
        }
    }
    contacts
}

/// Keep a ball inside the cushions.
///
/// A ball whose edge crosses a rail is clamped back onto the boundary and the
/// offending velocity component is reflected with `RAIL_RESTITUTION` loss.
/// Returns true if any rail was hit.
pub fn rail_bounce(ball: &mut Ball) -> bool {
    let mut hit = false;
    if ball.pos.x < MIN_CENTER {
        ball.pos.x = MIN_CENTER;
        ball.vel.x = -ball.vel.x * RAIL_RESTITUTION;
        hit = true;
    }
    if ball.pos.x > MAX_CENTER_X {
        ball.pos.x = MAX_CENTER_X;
        ball.vel.x = -ball.vel.x * RAIL_RESTITUTION;
        hit = true;
    }
    if ball.pos.y < MIN_CENTER {
        ball.pos.y = MIN_CENTER;
        ball.vel.y = -ball.vel.y * RAIL_RESTITUTION;
        hit = true;
    }
    if ball.pos.y > MAX_CENTER_Y {
        ball.pos.y = MAX_CENTER_Y;
        ball.vel.y = -ball.vel.y * RAIL_RESTITUTION;
        hit = true;
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BallKind;
    use proptest::prelude::*;

    fn ball_at(number: u8, pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(number, BallKind::Solid, pos);
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_contact_miss_and_degenerate() {
        let r2 = BALL_RADIUS * 2.0;
        assert!(ball_ball_contact(Vec2::ZERO, Vec2::new(r2 + 1.0, 0.0), r2).is_none());
        // Exactly touching is not an overlap
        assert!(ball_ball_contact(Vec2::ZERO, Vec2::new(r2, 0.0), r2).is_none());
        // Coincident centers have no normal
        assert!(ball_ball_contact(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), r2).is_none());
    }

    #[test]
    fn test_head_on_swap() {
        let mut a = ball_at(1, Vec2::new(100.0, 100.0), Vec2::new(4.0, 0.0));
        let mut b = ball_at(2, Vec2::new(128.0, 100.0), Vec2::new(-4.0, 0.0));
        let contact = ball_ball_contact(a.pos, b.pos, BALL_RADIUS * 2.0).unwrap();
        resolve_pair(&mut a, &mut b, contact);

        assert!((a.vel.x + 4.0).abs() < 1e-5);
        assert!((b.vel.x - 4.0).abs() < 1e-5);
        // Pushed apart to just past tangent
        let gap = a.pos.distance(b.pos);
        assert!(gap >= BALL_RADIUS * 2.0);
        assert!(gap < BALL_RADIUS * 2.0 + 0.01);
    }

    #[test]
    fn test_stationary_target_takes_all_normal_velocity() {
        let mut balls = [
            ball_at(0, Vec2::new(200.0, 200.0), Vec2::new(10.0, 0.0)),
            ball_at(1, Vec2::new(229.0, 200.0), Vec2::ZERO),
        ];
        assert_eq!(resolve_ball_collisions(&mut balls), 1);
        assert!(balls[0].vel.length() < 1e-5);
        assert!((balls[1].vel.x - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_pocketed_balls_ignored() {
        let mut balls = [
            ball_at(0, Vec2::new(200.0, 200.0), Vec2::new(10.0, 0.0)),
            ball_at(1, Vec2::new(210.0, 200.0), Vec2::ZERO),
        ];
        balls[1].sink();
        assert_eq!(resolve_ball_collisions(&mut balls), 0);
        assert_eq!(balls[0].vel, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_coincident_balls_skipped() {
        let mut balls = [
            ball_at(0, Vec2::new(200.0, 200.0), Vec2::new(1.0, 0.0)),
            ball_at(1, Vec2::new(200.0, 200.0), Vec2::new(-1.0, 0.0)),
        ];
        assert_eq!(resolve_ball_collisions(&mut balls), 0);
        assert_eq!(balls[0].pos, balls[1].pos);
    }

    #[test]
    fn test_rail_bounce_left() {
        let mut ball = ball_at(3, Vec2::new(50.0, 200.0), Vec2::new(-10.0, 1.0));
        assert!(rail_bounce(&mut ball));
        assert_eq!(ball.pos.x, MIN_CENTER);
        assert!((ball.vel.x - 8.6).abs() < 1e-5);
        assert_eq!(ball.vel.y, 1.0);
    }

    #[test]
    fn test_rail_bounce_corner() {
        let mut ball = ball_at(3, Vec2::new(790.0, 395.0), Vec2::new(5.0, 5.0));
        assert!(rail_bounce(&mut ball));
        assert_eq!(ball.pos, Vec2::new(MAX_CENTER_X, MAX_CENTER_Y));
        assert!(ball.vel.x < 0.0 && ball.vel.y < 0.0);
    }

    proptest! {
        #[test]
        fn prop_normal_components_swap(
            ax in -20.0f32..20.0, ay in -20.0f32..20.0,
            bx in -20.0f32..20.0, by in -20.0f32..20.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let normal = Vec2::new(angle.cos(), angle.sin());
            let tangent = normal.perp();
            let va = Vec2::new(ax, ay);
            let vb = Vec2::new(bx, by);
            let (va2, vb2) = exchange_normal_velocity(va, vb, normal);

            prop_assert!((va2.dot(normal) - vb.dot(normal)).abs() < 1e-3);
            prop_assert!((vb2.dot(normal) - va.dot(normal)).abs() < 1e-3);
            prop_assert!((va2.dot(tangent) - va.dot(tangent)).abs() < 1e-3);
            prop_assert!((vb2.dot(tangent) - vb.dot(tangent)).abs() < 1e-3);
        }

        #[test]
        fn prop_pair_resolution_respects_ceiling(
            ax in -40.0f32..40.0, ay in -40.0f32..40.0,
            bx in -40.0f32..40.0, by in -40.0f32..40.0,
            gap in 1.0f32..29.0,
        ) {
            let mut balls = [
                ball_at(1, Vec2::new(300.0, 200.0), Vec2::new(ax, ay)),
                ball_at(2, Vec2::new(300.0 + gap, 200.0), Vec2::new(bx, by)),
            ];
            resolve_ball_collisions(&mut balls);
            prop_assert!(balls[0].vel.length() <= MAX_BALL_SPEED + 1e-3);
            prop_assert!(balls[1].vel.length() <= MAX_BALL_SPEED + 1e-3);
            prop_assert!(balls[0].pos.distance(balls[1].pos) >= BALL_RADIUS * 2.0 - 1e-3);
        }
    }
}
