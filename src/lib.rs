//! Eight Ball - A two-player 8-ball pool engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, pockets, rules, game state)
//! - `view`: Read-only frame snapshot for an external renderer
//! - `settings`: Player-facing preferences (names, aim guide)

pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz, one physics pass per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Table dimensions (pixels)
    pub const TABLE_WIDTH: f32 = 800.0;
    pub const TABLE_HEIGHT: f32 = 400.0;
    pub const RAIL_WIDTH: f32 = 40.0;

    /// Ball and pocket sizes
    pub const BALL_RADIUS: f32 = 15.0;
    pub const POCKET_RADIUS: f32 = 28.0;

    /// Total balls on the table (cue + 15 object balls)
    pub const BALL_COUNT: usize = 16;
    /// Index of the cue ball in the ball array
    pub const CUE_INDEX: usize = 0;
    /// Index of the eight ball in the ball array
    pub const EIGHT_INDEX: usize = 8;
    /// Object balls per group (solids 1-7, stripes 9-15)
    pub const BALLS_PER_GROUP: u8 = 7;

    /// Per-tick velocity retention (felt friction)
    pub const FRICTION: f32 = 0.985;
    /// Velocity axes below this magnitude snap to zero
    pub const MIN_VELOCITY: f32 = 0.06;
    /// Fraction of velocity kept after a rail bounce
    pub const RAIL_RESTITUTION: f32 = 0.86;
    /// Absolute speed ceiling (pixels per tick)
    pub const MAX_BALL_SPEED: f32 = 26.0;

    /// Shot tuning
    pub const MAX_POWER_PIXELS: f32 = 160.0;
    pub const MAX_SHOT_SPEED: f32 = 22.0;
    /// A press must land within this many radii of the cue ball to start a drag
    pub const GRAB_RADIUS_FACTOR: f32 = 1.6;
    /// Releases closer than this to the cue ball are discarded
    pub const MIN_RELEASE_DISTANCE: f32 = 0.001;

    /// Ball pairs closer than this have no usable normal
    pub const COLLISION_EPSILON: f32 = 0.0001;
    /// Extra separation added when pushing overlapping balls apart
    pub const SEPARATION_SLOP: f32 = 0.001;

    /// Cosmetic cue stick recoil after a shot
    pub const RECOIL_SECONDS: f32 = 0.12;
    pub const RECOIL_DECAY: f32 = 0.92;
    pub const STICK_LENGTH: f32 = 120.0;
    pub const AIM_GUIDE_LENGTH: f32 = 420.0;

    /// Cue ball start spot, also the default scratch respawn point
    pub const CUE_START: Vec2 = Vec2::new(TABLE_WIDTH * 0.25, TABLE_HEIGHT * 0.5);
    /// Apex of the object ball triangle
    pub const RACK_APEX: Vec2 = Vec2::new(TABLE_WIDTH * 0.72, TABLE_HEIGHT * 0.5);
    /// Horizontal row spacing factor for the rack (slightly tighter than 2R)
    pub const RACK_ROW_FACTOR: f32 = 0.88;
}

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Scale a velocity down to `max_speed` if it exceeds it, keeping direction
#[inline]
pub fn clamp_speed(vel: Vec2, max_speed: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max_speed {
        vel / speed * max_speed
    } else {
        vel
    }
}

/// True when neither velocity axis exceeds the rest threshold
#[inline]
pub fn is_resting(vel: Vec2) -> bool {
    vel.x.abs() <= consts::MIN_VELOCITY && vel.y.abs() <= consts::MIN_VELOCITY
}
