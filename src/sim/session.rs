//! Fixed timestep session driver
//!
//! One session owns one game, its input state and the tick accumulator.
//! Whole ticks only run while the game reports `Running`; once the phase
//! leaves `Running` the session stops consuming wall time, so dropping the
//! session (or just not calling `advance`) releases the cadence cleanly.

use serde::{Deserialize, Serialize};

use super::input::InputState;
use crate::consts::{MAX_SUBSTEPS, TICK_DT};
use crate::feedback::FeedbackSink;

/// Lifecycle phase shared by all three games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the start overlay
    #[default]
    Menu,
    /// Active gameplay
    Running,
    /// Run ended in failure
    GameOver,
    /// Run ended in victory (platformer only)
    Won,
}

/// Per-game update rules plugged into a [`Session`]
pub trait GameSim {
    /// Reset all entity collections and counters, then enter `Running`
    fn start(&mut self);
    /// Advance one fixed step. Called only while `Running`.
    fn tick(&mut self, input: &InputState, feedback: &mut dyn FeedbackSink);
    fn phase(&self) -> GamePhase;
}

/// Fixed-step driver owning a game and its input
pub struct Session<G> {
    pub game: G,
    input: InputState,
    accumulator: f32,
    ticks: u64,
}

impl<G: GameSim> Session<G> {
    pub fn new(game: G) -> Self {
        Self {
            game,
            input: InputState::default(),
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Reset the game and begin ticking
    pub fn start(&mut self) {
        self.accumulator = 0.0;
        self.ticks = 0;
        self.input = InputState::default();
        self.game.start();
    }

    /// Entry point for the input adapter
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn is_running(&self) -> bool {
        self.game.phase() == GamePhase::Running
    }

    /// Ticks executed since the last start
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Feed elapsed wall time; runs whole fixed ticks while the game is
    /// running. A terminal transition mid-batch stops further ticks without
    /// reopening the run.
    pub fn advance(&mut self, elapsed_secs: f32, feedback: &mut dyn FeedbackSink) {
        if !self.is_running() {
            // Stopped sessions do not bank time toward a future restart
            self.accumulator = 0.0;
            return;
        }

        self.accumulator += elapsed_secs.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
            if self.game.phase() != GamePhase::Running {
                break;
            }
            self.game.tick(&self.input, feedback);
            self.input.clear_one_shots();
            self.accumulator -= TICK_DT;
            self.ticks += 1;
            substeps += 1;
        }
    }

    /// Run exactly one fixed tick if the game is running
    pub fn step(&mut self, feedback: &mut dyn FeedbackSink) {
        if self.is_running() {
            self.game.tick(&self.input, feedback);
            self.input.clear_one_shots();
            self.ticks += 1;
        }
    }
}
