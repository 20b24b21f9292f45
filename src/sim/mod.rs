//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, one physics pass per tick
//! - Stable iteration order (by ball number)
//! - No rendering or platform dependencies

pub mod collision;
pub mod integrate;
pub mod rules;
pub mod shot;
pub mod state;
pub mod table;
pub mod tick;

pub use collision::{Contact, ball_ball_contact, exchange_normal_velocity, rail_bounce, resolve_ball_collisions};
pub use integrate::{integrate_ball, integrate_balls};
pub use rules::{PocketOutcome, advance_turn_if_settled, check_pockets};
pub use shot::{PlacementError, begin_drag, can_aim, place_cue_ball, release, update_drag};
pub use state::{Ball, BallKind, GameEvent, GamePhase, GameState, Group, Player, Rgba, ShotCharge};
pub use table::{POCKETS, is_legal_placement, pocket_at};
pub use tick::{TickInput, step_physics, tick};
