//! Game state and core simulation types
//!
//! Everything the tick mutates lives in one owned `GameState`; every engine
//! pass takes it by `&mut`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::table;
use crate::consts::*;

/// Current phase of a rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh rack, waiting for the break
    Start,
    /// Normal shot/turn cycle
    Playing,
    /// Cue ball was pocketed; waiting for a ball-in-hand placement
    Scratch,
    /// Current player sank the eight after clearing their group
    Won,
    /// Current player sank the eight early
    Lost,
}

impl GamePhase {
    /// Terminal phases are only left through a restart
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }

    /// Phases in which the current player may aim and shoot
    pub fn accepts_shot(self) -> bool {
        matches!(self, GamePhase::Start | GamePhase::Playing)
    }
}

/// Ball category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallKind {
    Cue,
    Solid,
    Stripe,
    Eight,
}

/// A player's ball group for the rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Group {
    #[default]
    Unassigned,
    Solids,
    Stripes,
}

impl Group {
    /// Group that owns balls of `kind` (cue and eight belong to nobody)
    pub fn for_kind(kind: BallKind) -> Option<Group> {
        match kind {
            BallKind::Solid => Some(Group::Solids),
            BallKind::Stripe => Some(Group::Stripes),
            BallKind::Cue | BallKind::Eight => None,
        }
    }

    /// The other group
    pub fn opposite(self) -> Group {
        match self {
            Group::Solids => Group::Stripes,
            Group::Stripes => Group::Solids,
            Group::Unassigned => Group::Unassigned,
        }
    }

    pub fn is_assigned(self) -> bool {
        self != Group::Unassigned
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Unassigned => "Unassigned",
            Group::Solids => "Solids",
            Group::Stripes => "Stripes",
        }
    }
}

/// RGBA color handed to the renderer
pub type Rgba = [u8; 4];

pub const WHITE: Rgba = [255, 255, 255, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];

/// Colors for balls 1-7; stripes 9-15 reuse the same order
const GROUP_COLORS: [Rgba; 7] = [
    [253, 249, 0, 255],  // Yellow
    [0, 121, 241, 255],  // Blue
    [230, 41, 55, 255],  // Red
    [200, 122, 255, 255], // Purple
    [255, 161, 0, 255],  // Orange
    [0, 228, 48, 255],   // Green
    [190, 33, 55, 255],  // Maroon
];

/// A ball on the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Conventional number: 0 = cue, 1-7 solids, 8 = eight, 9-15 stripes
    pub number: u8,
    pub kind: BallKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Pocketed balls are at rest and skipped by physics until the next rack
    pub pocketed: bool,
    /// Render with a white band
    pub striped: bool,
}

impl Ball {
    pub fn new(number: u8, kind: BallKind, pos: Vec2) -> Self {
        Self {
            number,
            kind,
            pos,
            vel: Vec2::ZERO,
            pocketed: false,
            striped: kind == BallKind::Stripe,
        }
    }

    /// Whether the ball takes part in physics this tick
    #[inline]
    pub fn in_play(&self) -> bool {
        !self.pocketed
    }

    /// Moving means some velocity axis is above the rest threshold
    pub fn is_moving(&self) -> bool {
        self.in_play() && !crate::is_resting(self.vel)
    }

    /// Drop the ball into a pocket
    pub fn sink(&mut self) {
        self.pocketed = true;
        self.vel = Vec2::ZERO;
    }

    pub fn color(&self) -> Rgba {
        match self.kind {
            BallKind::Cue => WHITE,
            BallKind::Eight => BLACK,
            BallKind::Solid => GROUP_COLORS[(self.number as usize).saturating_sub(1) % 7],
            BallKind::Stripe => GROUP_COLORS[(self.number as usize).saturating_sub(9) % 7],
        }
    }
}

/// One of the two players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub group: Group,
    /// Balls of the player's group still on the table (floor 0)
    pub remaining: u8,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: Group::Unassigned,
            remaining: BALLS_PER_GROUP,
        }
    }

    /// Player has an assigned group and has pocketed all of it
    pub fn cleared_group(&self) -> bool {
        self.group.is_assigned() && self.remaining == 0
    }

    /// Count one of the player's balls as pocketed
    pub fn take_ball(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Drag-to-charge shot state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotCharge {
    /// A drag started on the cue ball and has not been released
    pub aiming: bool,
    /// Where the drag started (kept for the renderer)
    pub drag_start: Vec2,
    /// Distance from cue ball to pointer, clamped to `MAX_POWER_PIXELS`
    pub pull: f32,
    /// `pull` as a fraction of `MAX_POWER_PIXELS`
    pub power: f32,
    /// Cosmetic stick return after a shot
    pub recoiling: bool,
    pub recoil_timer: f32,
}

impl ShotCharge {
    /// Decay the stick recoil by one tick
    pub fn decay_recoil(&mut self, dt: f32) {
        if !self.recoiling {
            return;
        }
        self.recoil_timer -= dt;
        if self.recoil_timer <= 0.0 {
            self.recoiling = false;
            self.pull = 0.0;
        } else {
            self.pull *= RECOIL_DECAY;
            self.power = (self.pull / MAX_POWER_PIXELS).max(0.0);
        }
    }
}

/// Things that happened during a tick, for audio/render collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { speed: f32 },
    BallPocketed { number: u8, pocket: usize },
    GroupsAssigned { player: usize, group: Group },
    Scratch { next_player: usize },
    CuePlaced { pos: Vec2 },
    PlacementRejected,
    TurnChanged { player: usize },
    GameOver { winner: usize },
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Fixed ball population, indexed by ball number
    pub balls: [Ball; BALL_COUNT],
    pub players: [Player; 2],
    /// Index of the player to shoot (0 or 1)
    pub current_player: usize,
    /// Player who fired the shot still in progress
    pub shooter: usize,
    pub phase: GamePhase,
    /// Where the cue ball comes back after a scratch
    pub cue_respawn: Vec2,
    pub charge: ShotCharge,
    /// Set once any ball moves after a shot; cleared when the table settles
    pub balls_moving: bool,
    /// True until the breaking shot has come to rest
    pub first_shot: bool,
    /// Groups are assigned at most once per rack
    pub groups_assigned: bool,
    /// Human-readable status line
    pub status: String,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a fresh game with default player names
    pub fn new() -> Self {
        Self::with_names(["Player 1", "Player 2"])
    }

    /// Create a fresh game with the given player names
    pub fn with_names<S: Into<String>>(names: [S; 2]) -> Self {
        let [a, b] = names;
        let mut state = Self {
            balls: table::rack(),
            players: [Player::new(a), Player::new(b)],
            current_player: 0,
            shooter: 0,
            phase: GamePhase::Start,
            cue_respawn: CUE_START,
            charge: ShotCharge::default(),
            balls_moving: false,
            first_shot: true,
            groups_assigned: false,
            status: String::new(),
            time_ticks: 0,
            events: Vec::new(),
        };
        state.restart();
        state
    }

    /// Re-enter `Start`: fresh rack, players reset (names kept)
    pub fn restart(&mut self) {
        for player in &mut self.players {
            player.group = Group::Unassigned;
            player.remaining = BALLS_PER_GROUP;
        }
        self.current_player = 0;
        self.shooter = 0;
        self.phase = GamePhase::Start;
        self.charge = ShotCharge::default();
        self.balls_moving = false;
        self.first_shot = true;
        self.groups_assigned = false;
        self.status = "Break shot: click on cue, drag back, release to shoot".to_string();
        self.reset_balls();
    }

    /// Rack all sixteen balls and remember the cue spot for respawns
    pub fn reset_balls(&mut self) {
        self.balls = table::rack();
        self.cue_respawn = self.balls[CUE_INDEX].pos;
    }

    pub fn cue_ball(&self) -> &Ball {
        &self.balls[CUE_INDEX]
    }

    pub fn cue_ball_mut(&mut self) -> &mut Ball {
        &mut self.balls[CUE_INDEX]
    }

    /// Where the shooter aims from: the cue ball, or its respawn spot while pocketed
    pub fn cue_anchor(&self) -> Vec2 {
        let cue = self.cue_ball();
        if cue.pocketed { self.cue_respawn } else { cue.pos }
    }

    /// Index of the player not currently shooting
    #[inline]
    pub fn opponent(&self) -> usize {
        1 - self.current_player
    }

    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Player index holding `group`, if groups are assigned
    pub fn owner_of(&self, group: Group) -> Option<usize> {
        if !group.is_assigned() {
            return None;
        }
        self.players.iter().position(|p| p.group == group)
    }

    /// Whether any ball on the table is above the rest threshold
    pub fn any_ball_moving(&self) -> bool {
        self.balls.iter().any(Ball::is_moving)
    }

    /// Winner of a finished rack
    pub fn winner(&self) -> Option<usize> {
        match self.phase {
            GamePhase::Won => Some(self.current_player),
            GamePhase::Lost => Some(self.opponent()),
            _ => None,
        }
    }

    /// Switch the shooter and record it
    pub fn pass_turn(&mut self) {
        self.current_player = self.opponent();
        self.events.push(GameEvent::TurnChanged {
            player: self.current_player,
        });
    }
}
