//! Table geometry: playing surface bounds, pockets, and the opening rack
//!
//! All coordinates are table pixels with the origin at the top-left corner of
//! the outer rail. The cloth spans `RAIL_WIDTH..TABLE_WIDTH - RAIL_WIDTH` on x
//! and `RAIL_WIDTH..TABLE_HEIGHT - RAIL_WIDTH` on y.

use glam::Vec2;

use super::state::{Ball, BallKind};
use crate::consts::*;

/// Pocket centers: top-left, top-center, top-right, bottom-left, bottom-center, bottom-right
pub const POCKETS: [Vec2; 6] = [
    Vec2::new(RAIL_WIDTH, RAIL_WIDTH),
    Vec2::new(TABLE_WIDTH * 0.5, RAIL_WIDTH),
    Vec2::new(TABLE_WIDTH - RAIL_WIDTH, RAIL_WIDTH),
    Vec2::new(RAIL_WIDTH, TABLE_HEIGHT - RAIL_WIDTH),
    Vec2::new(TABLE_WIDTH * 0.5, TABLE_HEIGHT - RAIL_WIDTH),
    Vec2::new(TABLE_WIDTH - RAIL_WIDTH, TABLE_HEIGHT - RAIL_WIDTH),
];

/// Smallest legal ball-center coordinate on either axis
pub const MIN_CENTER: f32 = RAIL_WIDTH + BALL_RADIUS;
/// Largest legal ball-center x
pub const MAX_CENTER_X: f32 = TABLE_WIDTH - RAIL_WIDTH - BALL_RADIUS;
/// Largest legal ball-center y
pub const MAX_CENTER_Y: f32 = TABLE_HEIGHT - RAIL_WIDTH - BALL_RADIUS;

/// Index of the first pocket whose mouth contains `pos`, if any
pub fn pocket_at(pos: Vec2) -> Option<usize> {
    POCKETS
        .iter()
        .position(|&pocket| crate::distance(pos, pocket) < POCKET_RADIUS)
}

/// Whether a ball-in-hand placement at `pos` is legal.
///
/// The legal region is the open rectangle inside the rails, inset by one ball
/// radius so the placed ball never overlaps a cushion.
pub fn is_legal_placement(pos: Vec2) -> bool {
    pos.x > MIN_CENTER && pos.x < MAX_CENTER_X && pos.y > MIN_CENTER && pos.y < MAX_CENTER_Y
}

/// Rack position for object ball `number` (1..=15).
///
/// Balls fill the triangle row by row in numeric order: row `r` holds `r + 1`
/// balls, rows march away from the cue ball along +x, and each row is centered
/// on the apex line.
pub fn rack_position(number: u8) -> Vec2 {
    debug_assert!((1..=15).contains(&number));
    let mut remaining = (number - 1) as u32;
    let mut row = 0u32;
    while remaining > row {
        remaining -= row + 1;
        row += 1;
    }
    let col = remaining;
    let offset_x = row as f32 * (BALL_RADIUS * 2.0 * RACK_ROW_FACTOR);
    let offset_y = col as f32 * (BALL_RADIUS * 2.0) - row as f32 * BALL_RADIUS;
    RACK_APEX + Vec2::new(offset_x, offset_y)
}

/// Category of a ball by its conventional number
pub fn kind_for_number(number: u8) -> BallKind {
    match number {
        0 => BallKind::Cue,
        8 => BallKind::Eight,
        1..=7 => BallKind::Solid,
        _ => BallKind::Stripe,
    }
}

/// Build a fresh rack: cue ball on its spot, object balls in the triangle,
/// everything at rest and on the table.
pub fn rack() -> [Ball; BALL_COUNT] {
    std::array::from_fn(|i| {
        let number = i as u8;
        let pos = if i == CUE_INDEX {
            CUE_START
        } else {
            rack_position(number)
        };
        Ball::new(number, kind_for_number(number), pos)
    })
}
