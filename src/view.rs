//! Read-only frame snapshot for an external renderer
//!
//! The engine draws nothing. Once per tick a renderer asks for a `FrameView`
//! and paints the table, balls, cue stick, HUD and overlays from it.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::{BallKind, GamePhase, GameState, Group, Rgba};

/// One ball as the renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub number: u8,
    pub kind: BallKind,
    pub pos: Vec2,
    pub color: Rgba,
    pub striped: bool,
    pub pocketed: bool,
}

/// One player's HUD entry
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub group: Group,
    pub remaining: u8,
    /// "Player 1: 7 balls remaining"
    pub score_line: String,
}

/// Cue stick and aim preview geometry
#[derive(Debug, Clone, Serialize)]
pub struct CueView {
    /// Aim origin (cue ball or its respawn spot)
    pub origin: Vec2,
    /// Unit direction from the cue ball toward the pointer
    pub dir: Vec2,
    /// Stick end touching the cue ball side
    pub stick_front: Vec2,
    /// Far end of the stick, pushed back by the pull distance
    pub stick_back: Vec2,
    /// Guide line end while a drag is active
    pub guide_end: Option<Vec2>,
}

/// Full-screen overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Overlay {
    /// Ball-in-hand prompt
    Scratch { text: String },
    /// Rack decided
    GameOver { text: String, hint: String },
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub balls: Vec<BallView>,
    pub players: [PlayerView; 2],
    pub current_player: usize,
    /// "Current: Player 1 (Solids)"
    pub current_label: String,
    pub status: String,
    /// Shot power 0..1
    pub power: f32,
    /// Pull distance behind the cue ball (pixels)
    pub pull: f32,
    /// Power bar percentage, derived from the pull so it follows the recoil
    pub power_percent: u32,
    pub cue: Option<CueView>,
    pub overlay: Option<Overlay>,
}

impl FrameView {
    /// Build the frame view for the current state and pointer position
    pub fn build(state: &GameState, pointer: Vec2, show_aim_guide: bool) -> Self {
        let balls = state
            .balls
            .iter()
            .map(|b| BallView {
                number: b.number,
                kind: b.kind,
                pos: b.pos,
                color: b.color(),
                striped: b.striped,
                pocketed: b.pocketed,
            })
            .collect();

        let players = std::array::from_fn(|i| {
            let p = &state.players[i];
            PlayerView {
                name: p.name.clone(),
                group: p.group,
                remaining: p.remaining,
                score_line: format!("{}: {} balls remaining", p.name, p.remaining),
            }
        });

        let current = state.current();
        let pull_fraction = (state.charge.pull / MAX_POWER_PIXELS).clamp(0.0, 1.0);

        Self {
            phase: state.phase,
            balls,
            players,
            current_player: state.current_player,
            current_label: format!("Current: {} ({})", current.name, current.group.as_str()),
            status: state.status.clone(),
            power: state.charge.power,
            pull: state.charge.pull,
            power_percent: (pull_fraction * 100.0) as u32,
            cue: cue_view(state, pointer, show_aim_guide),
            overlay: overlay(state),
        }
    }

    /// Serialize for a renderer on the other side of a bridge
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Stick geometry, shown only while the shooter can aim
fn cue_view(state: &GameState, pointer: Vec2, show_aim_guide: bool) -> Option<CueView> {
    if !state.phase.accepts_shot() || state.balls_moving {
        return None;
    }
    let origin = state.cue_anchor();
    let dir = (pointer - origin).normalize_or_zero();

    let reach = BALL_RADIUS + STICK_LENGTH + state.charge.pull;
    let guide_end = (show_aim_guide && state.charge.aiming).then(|| origin + dir * AIM_GUIDE_LENGTH);

    Some(CueView {
        origin,
        dir,
        stick_front: origin - dir * (BALL_RADIUS + 4.0),
        stick_back: origin - dir * reach,
        guide_end,
    })
}

fn overlay(state: &GameState) -> Option<Overlay> {
    match state.phase {
        GamePhase::Scratch => Some(Overlay::Scratch {
            text: "SCRATCH! Click to place cue ball (inside rails)".to_string(),
        }),
        GamePhase::Won | GamePhase::Lost => {
            let winner = state.winner()?;
            Some(Overlay::GameOver {
                text: format!("{} WINS!", state.players[winner].name),
                hint: "Press R to Restart".to_string(),
            })
        }
        GamePhase::Start | GamePhase::Playing => None,
    }
}
