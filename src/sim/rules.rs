//! 8-ball rules: pocketing, group assignment, scratches, and turn order
//!
//! Rules are deliberately simple: no called pockets and no fouls besides the
//! scratch. Sinking the eight ends the rack immediately, as a win only if the
//! shooter has already cleared their own group.

use super::state::{BallKind, GameEvent, GamePhase, GameState, Group};
use super::table;
use crate::consts::*;

/// What the pocket pass did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PocketOutcome {
    /// No ball dropped
    Nothing,
    /// Object balls dropped, play continues
    Pocketed,
    /// The cue ball dropped; the opponent has ball-in-hand
    Scratch,
    /// The eight ball dropped and the rack is decided
    GameOver,
}

/// Drop every ball sitting over a pocket and apply the consequences.
///
/// Balls are processed in index order. The cue ball (index 0) is always seen
/// first, but its scratch is applied only after the whole pass; if the eight
/// ball drops in the same pass, its win/loss decision for the shooter ends
/// the pass and the pending scratch is discarded.
pub fn check_pockets(state: &mut GameState) -> PocketOutcome {
    let mut scratched = false;
    let mut any_pocketed = false;
    let mut assigned = false;

    for i in 0..state.balls.len() {
        let ball = &mut state.balls[i];
        if !ball.in_play() {
            continue;
        }
        let Some(pocket) = table::pocket_at(ball.pos) else {
            continue;
        };

        ball.sink();
        let (number, kind) = (ball.number, ball.kind);
        any_pocketed = true;
        state.events.push(GameEvent::BallPocketed { number, pocket });
        log::debug!("Ball {} dropped in pocket {}", number, pocket);

        match kind {
            BallKind::Cue => {
                scratched = true;
                state.cue_respawn = CUE_START;
            }
            BallKind::Eight => {
                decide_on_eight(state);
                return PocketOutcome::GameOver;
            }
            BallKind::Solid | BallKind::Stripe => {
                if !state.groups_assigned && state.first_shot {
                    if let Some(group) = Group::for_kind(kind) {
                        assign_groups(state, group);
                        assigned = true;
                    }
                }
                credit_ball(state, kind);
            }
        }
    }

    if scratched {
        apply_scratch(state);
        PocketOutcome::Scratch
    } else if any_pocketed {
        if !assigned {
            state.status = format!("{} pocketed a ball!", state.current().name);
        }
        PocketOutcome::Pocketed
    } else {
        PocketOutcome::Nothing
    }
}

/// Give the shooter `group` and the other player the opposite one.
/// Permanent for the rack.
///
/// The shooter is whoever fired the breaking shot, even if a scratch has
/// already handed the table to the opponent.
pub fn assign_groups(state: &mut GameState, group: Group) {
    let shooter = state.shooter;
    let other = 1 - shooter;
    state.players[shooter].group = group;
    state.players[other].group = group.opposite();
    state.groups_assigned = true;

    state.status = format!(
        "{} = {}, {} = {}",
        state.players[shooter].name,
        group.as_str(),
        state.players[other].name,
        group.opposite().as_str(),
    );
    state.events.push(GameEvent::GroupsAssigned {
        player: shooter,
        group,
    });
    log::info!(
        "{} takes {}",
        state.players[shooter].name,
        group.as_str()
    );
}

/// Count a pocketed object ball against whichever player owns its group
fn credit_ball(state: &mut GameState, kind: BallKind) {
    let owner = Group::for_kind(kind).and_then(|group| state.owner_of(group));
    if let Some(owner) = owner {
        state.players[owner].take_ball();
    }
}

/// Eight ball is down: the shooter wins only with an empty group
fn decide_on_eight(state: &mut GameState) {
    state.phase = if state.current().cleared_group() {
        GamePhase::Won
    } else {
        GamePhase::Lost
    };

    if let Some(winner) = state.winner() {
        state.status = format!("{} wins!", state.players[winner].name);
        state.events.push(GameEvent::GameOver { winner });
        log::info!(
            "Eight ball down: {} ({:?})",
            state.players[winner].name,
            state.phase
        );
    }
}

/// Cue ball is down: opponent gets ball-in-hand
pub fn apply_scratch(state: &mut GameState) {
    state.phase = GamePhase::Scratch;
    state.status = "Scratch! Place cue ball".to_string();
    state.current_player = state.opponent();
    state.events.push(GameEvent::Scratch {
        next_player: state.current_player,
    });
    log::info!("Scratch, ball in hand for {}", state.current().name);
}

/// Hint the shooter toward the eight once their group is cleared.
/// Runs after the turn has passed, so it checks the incoming shooter.
pub fn check_win_condition(state: &mut GameState) {
    if state.current().cleared_group() {
        state.status = format!("{}: Shoot the 8-ball!", state.current().name);
    }
}

/// Hand the table to the other player
pub fn next_turn(state: &mut GameState) {
    state.pass_turn();
    state.status = format!("{}'s turn", state.current().name);
    log::debug!("Turn -> {}", state.current().name);
}

/// Track motion and advance the turn when a shot has fully settled.
///
/// Returns true on the tick the table comes to rest. The turn only passes if
/// the rack is in ordinary `Playing`; settling during a scratch leaves the
/// ball-in-hand player in place. The eight-ball hint is for the incoming
/// shooter, so it is checked after the turn passes.
pub fn advance_turn_if_settled(state: &mut GameState) -> bool {
    let moving = state.any_ball_moving();
    if !state.balls_moving {
        state.balls_moving = moving;
        return false;
    }
    if moving {
        return false;
    }

    state.balls_moving = false;
    state.first_shot = false;

    if state.phase == GamePhase::Playing {
        next_turn(state);
        check_win_condition(state);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::table::POCKETS;
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new();
        state.phase = GamePhase::Playing;
        state
    }

    fn drop_ball(state: &mut GameState, number: usize, pocket: usize) {
        state.balls[number].pos = POCKETS[pocket];
    }

    #[test]
    fn test_nothing_pocketed() {
        let mut state = playing_state();
        assert_eq!(check_pockets(&mut state), PocketOutcome::Nothing);
        assert!(state.balls.iter().all(|b| !b.pocketed));
    }

    #[test]
    fn test_pocketed_ball_stops() {
        let mut state = playing_state();
        state.balls[4].pos = POCKETS[2] + Vec2::new(-10.0, 12.0);
        state.balls[4].vel = Vec2::new(7.0, -3.0);
        assert_eq!(check_pockets(&mut state), PocketOutcome::Pocketed);
        assert!(state.balls[4].pocketed);
        assert_eq!(state.balls[4].vel, Vec2::ZERO);
        assert!(state
            .events
            .contains(&GameEvent::BallPocketed { number: 4, pocket: 2 }));
    }

    #[test]
    fn test_break_assigns_groups_once() {
        let mut state = playing_state();
        drop_ball(&mut state, 3, 0);
        check_pockets(&mut state);

        assert!(state.groups_assigned);
        assert_eq!(state.players[0].group, Group::Solids);
        assert_eq!(state.players[1].group, Group::Stripes);
        assert_eq!(state.players[0].remaining, 6);
        assert_eq!(state.status, "Player 1 = Solids, Player 2 = Stripes");

        // A stripe later in the same break does not re-assign
        drop_ball(&mut state, 12, 5);
        check_pockets(&mut state);
        assert_eq!(state.players[0].group, Group::Solids);
        assert_eq!(state.players[1].remaining, 6);
    }

    #[test]
    fn test_assignment_follows_breaker_after_scratch() {
        let mut state = playing_state();
        drop_ball(&mut state, CUE_INDEX, 4);
        check_pockets(&mut state);
        assert_eq!(state.current_player, 1);

        // A solid drops later in the same break while the opponent has the cue
        drop_ball(&mut state, 3, 0);
        check_pockets(&mut state);
        assert_eq!(state.players[0].group, Group::Solids);
        assert_eq!(state.players[1].group, Group::Stripes);
        assert_eq!(state.players[0].remaining, 6);
        assert!(state.events.contains(&GameEvent::GroupsAssigned {
            player: 0,
            group: Group::Solids,
        }));
    }

    #[test]
    fn test_no_assignment_after_break() {
        let mut state = playing_state();
        state.first_shot = false;
        drop_ball(&mut state, 10, 1);
        check_pockets(&mut state);
        assert!(!state.groups_assigned);
        assert_eq!(state.players[0].group, Group::Unassigned);
        assert_eq!(state.players[0].remaining, BALLS_PER_GROUP);
        assert_eq!(state.players[1].remaining, BALLS_PER_GROUP);
    }

    #[test]
    fn test_opponent_ball_credits_opponent() {
        let mut state = playing_state();
        state.first_shot = false;
        state.groups_assigned = true;
        state.players[0].group = Group::Solids;
        state.players[1].group = Group::Stripes;
        drop_ball(&mut state, 14, 3);
        check_pockets(&mut state);
        assert_eq!(state.players[0].remaining, 7);
        assert_eq!(state.players[1].remaining, 6);
        assert_eq!(state.status, "Player 1 pocketed a ball!");
    }

    #[test]
    fn test_scratch_flips_shooter() {
        let mut state = playing_state();
        state.current_player = 1;
        drop_ball(&mut state, CUE_INDEX, 4);
        assert_eq!(check_pockets(&mut state), PocketOutcome::Scratch);
        assert_eq!(state.phase, GamePhase::Scratch);
        assert_eq!(state.current_player, 0);
        assert_eq!(state.cue_respawn, CUE_START);
        assert_eq!(state.status, "Scratch! Place cue ball");
    }

    #[test]
    fn test_eight_wins_with_cleared_group() {
        let mut state = playing_state();
        state.players[0].group = Group::Stripes;
        state.players[0].remaining = 0;
        drop_ball(&mut state, EIGHT_INDEX, 1);
        assert_eq!(check_pockets(&mut state), PocketOutcome::GameOver);
        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.events.contains(&GameEvent::GameOver { winner: 0 }));
    }

    #[test]
    fn test_early_eight_loses() {
        let mut state = playing_state();
        state.players[0].group = Group::Solids;
        state.players[0].remaining = 1;
        drop_ball(&mut state, EIGHT_INDEX, 1);
        check_pockets(&mut state);
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.winner(), Some(1));
    }

    #[test]
    fn test_eight_short_circuits_later_balls() {
        let mut state = playing_state();
        drop_ball(&mut state, EIGHT_INDEX, 0);
        drop_ball(&mut state, 9, 5);
        check_pockets(&mut state);
        assert!(state.balls[EIGHT_INDEX].pocketed);
        assert!(!state.balls[9].pocketed);
    }

    #[test]
    fn test_cue_and_eight_same_tick() {
        let mut state = playing_state();
        state.players[0].group = Group::Solids;
        state.players[0].remaining = 0;
        drop_ball(&mut state, CUE_INDEX, 0);
        drop_ball(&mut state, EIGHT_INDEX, 5);
        assert_eq!(check_pockets(&mut state), PocketOutcome::GameOver);
        // Eight-ball decision is made for the shooter; the scratch never lands
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.current_player, 0);
        assert!(state.balls[CUE_INDEX].pocketed);
    }

    #[test]
    fn test_settle_advances_once() {
        let mut state = playing_state();
        state.balls[5].vel = Vec2::new(1.0, 0.0);
        assert!(!advance_turn_if_settled(&mut state));
        assert!(state.balls_moving);

        state.balls[5].vel = Vec2::ZERO;
        assert!(advance_turn_if_settled(&mut state));
        assert_eq!(state.current_player, 1);
        assert!(!state.first_shot);
        assert_eq!(state.status, "Player 2's turn");

        // Already at rest: no further flip
        assert!(!advance_turn_if_settled(&mut state));
        assert_eq!(state.current_player, 1);
    }

    #[test]
    fn test_settle_in_scratch_keeps_player() {
        let mut state = playing_state();
        state.phase = GamePhase::Scratch;
        state.balls_moving = true;
        assert!(advance_turn_if_settled(&mut state));
        assert_eq!(state.current_player, 0);
        assert_eq!(state.phase, GamePhase::Scratch);
    }

    #[test]
    fn test_settle_hint_for_eight() {
        let mut state = playing_state();
        state.players[1].group = Group::Solids;
        state.players[1].remaining = 0;
        state.balls_moving = true;
        advance_turn_if_settled(&mut state);
        assert_eq!(state.current_player, 1);
        assert_eq!(state.status, "Player 2: Shoot the 8-ball!");
    }

    #[test]
    fn test_no_settle_in_terminal_phase() {
        let mut state = playing_state();
        state.phase = GamePhase::Won;
        state.balls_moving = true;
        assert!(advance_turn_if_settled(&mut state));
        assert_eq!(state.current_player, 0);
    }

    proptest! {
        #[test]
        fn prop_inside_pocket_always_drops(
            pocket in 0usize..6,
            r in 0.0f32..(POCKET_RADIUS - 0.01),
            angle in 0.0f32..std::f32::consts::TAU,
            vx in -26.0f32..26.0, vy in -26.0f32..26.0,
        ) {
            let mut state = playing_state();
            let ball = &mut state.balls[6];
            ball.pos = POCKETS[pocket] + Vec2::new(angle.cos(), angle.sin()) * r;
            ball.vel = Vec2::new(vx, vy);
            check_pockets(&mut state);
            prop_assert!(state.balls[6].pocketed);
            prop_assert_eq!(state.balls[6].vel, Vec2::ZERO);
        }
    }
}
