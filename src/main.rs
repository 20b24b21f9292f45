//! Eight Ball entry point
//!
//! Headless driver: there is no window here. It plays a scripted break shot
//! through the simulation and logs how the rack came to rest. A graphical
//! front end feeds `TickInput`s and reads `FrameView`s the same way.

use glam::Vec2;

use eight_ball::Settings;
use eight_ball::consts::*;
use eight_ball::sim::{GameState, TickInput, tick};
use eight_ball::view::FrameView;

/// Give up on a shot that has not settled after this many ticks
const MAX_SHOT_TICKS: u32 = 60 * 60;

/// Game instance holding all state
struct Game {
    state: GameState,
    input: TickInput,
    show_aim_guide: bool,
}

impl Game {
    fn new(settings: &Settings) -> Self {
        Self {
            state: settings.new_game(),
            input: TickInput::default(),
            show_aim_guide: settings.show_aim_guide,
        }
    }

    /// Run one simulation tick and clear one-shot inputs
    fn step(&mut self) {
        tick(&mut self.state, &self.input);
        for event in &self.state.events {
            log::debug!("tick {}: {:?}", self.state.time_ticks, event);
        }
        self.input.pressed = false;
        self.input.released = false;
        self.input.restart = false;
    }

    /// Drag from the cue ball to `target` over a few ticks and let go
    fn shoot(&mut self, target: Vec2) {
        let cue = self.state.cue_anchor();
        self.input = TickInput::press(cue);
        self.step();
        self.input = TickInput::drag(target);
        self.step();
        self.input = TickInput::release(target);
        self.step();
    }

    /// Tick until the table is still or the rack is decided
    fn settle(&mut self) -> u32 {
        let mut ticks = 0;
        while self.state.balls_moving && !self.state.phase.is_over() && ticks < MAX_SHOT_TICKS {
            self.step();
            ticks += 1;
        }
        ticks
    }

    fn frame(&self) -> FrameView {
        FrameView::build(&self.state, self.input.pointer, self.show_aim_guide)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    env_logger::init();
    log::info!("Eight Ball (headless) starting...");

    let settings = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .map(|path| Settings::load_or_default(&path))
        .unwrap_or_default();

    let mut game = Game::new(&settings);

    // Full-power break straight at the apex ball
    let target = CUE_START + (RACK_APEX - CUE_START).normalize() * MAX_POWER_PIXELS;
    game.shoot(target);
    let ticks = game.settle();
    log::info!("Break settled after {} ticks", ticks);

    let pocketed: Vec<u8> = game
        .state
        .balls
        .iter()
        .filter(|b| b.pocketed)
        .map(|b| b.number)
        .collect();

    let frame = game.frame();
    println!("Phase:     {:?}", frame.phase);
    println!("Pocketed:  {:?}", pocketed);
    println!("{}", frame.players[0].score_line);
    println!("{}", frame.players[1].score_line);
    println!("{}", frame.current_label);
    println!("Status:    {}", frame.status);

    if let Some(winner) = game.state.winner() {
        log::info!("Rack decided on the break: {} wins", game.state.players[winner].name);
    }

    match frame.to_json() {
        Ok(json) => log::debug!("Final frame: {}", json),
        Err(e) => log::warn!("Could not serialize frame: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end ships with this crate
}
