//! Runner rules
//!
//! The player holds a fixed column and only moves vertically: gravity pulls
//! every tick, a jump is only accepted from the ground. Obstacles spawn at
//! the right edge and scroll left a little faster as the score grows. Any
//! overlap ends the run on the spot.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::input::InputState;
use super::rect::{Rect, intersects};
use super::session::{GamePhase, GameSim};
use crate::config::RunnerConfig;
use crate::consts::TICK_MS;
use crate::feedback::{FeedbackKind, FeedbackSink};

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Set once, the first time the trailing edge clears the player
    pub passed: bool,
}

/// Read-only view published for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnerSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub player: Rect,
    pub obstacles: Vec<Rect>,
    pub ground_y: f32,
}

/// Side-scrolling runner session state
pub struct RunnerGame {
    config: RunnerConfig,
    seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    score: u32,
    player_y: f32,
    velocity_y: f32,
    obstacles: Vec<Obstacle>,
    spawn_timer_ms: f32,
}

impl RunnerGame {
    pub fn new(config: RunnerConfig, seed: u64) -> Self {
        let player_y = config.play_height - config.ground_height - config.player_size;
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            player_y,
            velocity_y: 0.0,
            obstacles: Vec::new(),
            spawn_timer_ms: 0.0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Resting height of the player's top edge
    fn ground_y(&self) -> f32 {
        self.config.play_height - self.config.ground_height - self.config.player_size
    }

    pub fn player_rect(&self) -> Rect {
        Rect::new(
            self.config.player_x,
            self.player_y,
            self.config.player_size,
            self.config.player_size,
        )
    }

    pub fn snapshot(&self) -> RunnerSnapshot {
        RunnerSnapshot {
            phase: self.phase,
            score: self.score,
            player: self.player_rect(),
            obstacles: self.obstacles.iter().map(|o| o.rect).collect(),
            ground_y: self.config.play_height - self.config.ground_height,
        }
    }

    fn spawn_obstacle(&mut self) {
        let height = self.config.obstacle_min_height
            + self.rng.random_range(0.0..self.config.obstacle_height_jitter);
        let top = self.config.play_height - self.config.ground_height - height;
        self.obstacles.push(Obstacle {
            rect: Rect::new(
                self.config.play_width,
                top,
                self.config.obstacle_width,
                height,
            ),
            passed: false,
        });
    }
}

impl GameSim for RunnerGame {
    fn start(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.score = 0;
        self.player_y = self.ground_y();
        self.velocity_y = 0.0;
        self.obstacles.clear();
        self.spawn_timer_ms = 0.0;
        self.phase = GamePhase::Running;
        log::info!("runner: session started");
    }

    fn tick(&mut self, input: &InputState, feedback: &mut dyn FeedbackSink) {
        if self.phase != GamePhase::Running {
            return;
        }

        // Jump only from rest at ground level. Tap and the jump button are
        // the same action here.
        if (input.tapped || input.jump) && self.player_y >= self.ground_y() {
            self.velocity_y = self.config.jump_impulse;
            feedback.notify(FeedbackKind::LightImpact);
        }

        // Gravity integration; landing zeroes velocity and clamps to ground
        self.velocity_y += self.config.gravity;
        self.player_y += self.velocity_y;
        if self.player_y >= self.ground_y() {
            self.player_y = self.ground_y();
            self.velocity_y = 0.0;
        }

        // Spawn interval shrinks with score, floored at the minimum
        self.spawn_timer_ms += TICK_MS;
        let interval = (self.config.base_spawn_ms
            - self.score as f32 * self.config.spawn_accel_per_point)
            .max(self.config.min_spawn_ms);
        if self.spawn_timer_ms >= interval {
            self.spawn_timer_ms = 0.0;
            self.spawn_obstacle();
        }

        let player = self.player_rect();
        let scroll =
            self.config.base_scroll_speed + self.score as f32 * self.config.scroll_speed_per_point;
        let mut hit = false;

        // Reverse index order so pruning never skips a neighbor
        for i in (0..self.obstacles.len()).rev() {
            self.obstacles[i].rect.pos.x -= scroll;

            if intersects(&player, &self.obstacles[i].rect) {
                hit = true;
            }

            // The pass transition scores exactly once per obstacle
            if !self.obstacles[i].passed && self.obstacles[i].rect.right() < player.left() {
                self.obstacles[i].passed = true;
                self.score += self.config.pass_score;
                feedback.notify(FeedbackKind::LightImpact);
            }

            if self.obstacles[i].rect.right() < 0.0 {
                self.obstacles.remove(i);
            }
        }

        if hit {
            self.phase = GamePhase::GameOver;
            feedback.notify(FeedbackKind::Error);
            log::info!("runner: crashed at score {}", self.score);
        }
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{NullFeedback, RecordingFeedback};

    fn quiet_config() -> RunnerConfig {
        RunnerConfig {
            base_spawn_ms: 1e12,
            ..RunnerConfig::default()
        }
    }

    fn started(config: RunnerConfig) -> RunnerGame {
        let mut game = RunnerGame::new(config, 42);
        game.start();
        game
    }

    #[test]
    fn no_tick_while_not_running() {
        let mut game = RunnerGame::new(RunnerConfig::default(), 1);
        let before = game.snapshot();
        game.tick(&InputState::default(), &mut NullFeedback);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn jump_only_from_ground() {
        let mut game = started(quiet_config());
        let mut input = InputState::default();
        let mut sink = NullFeedback;

        input.tap();
        game.tick(&input, &mut sink);
        assert!(game.velocity_y < 0.0);
        assert!(game.player_y < game.ground_y());

        // Airborne taps are ignored
        let mid_air_vy = game.velocity_y;
        input.tap();
        game.tick(&input, &mut sink);
        assert_eq!(game.velocity_y, mid_air_vy + game.config.gravity);
    }

    #[test]
    fn landing_clamps_to_ground_and_zeroes_velocity() {
        let mut game = started(quiet_config());
        let mut input = InputState::default();
        let mut sink = NullFeedback;

        input.tap();
        game.tick(&input, &mut sink);
        input.clear_one_shots();

        // -15 impulse under 0.8 gravity is back down within ~40 ticks
        for _ in 0..60 {
            game.tick(&input, &mut sink);
        }
        assert_eq!(game.player_y, game.ground_y());
        assert_eq!(game.velocity_y, 0.0);
    }

    #[test]
    fn pass_scores_exactly_once_per_obstacle() {
        let mut game = started(quiet_config());
        let mut sink = RecordingFeedback::default();

        // Obstacle about to clear the player's leading edge
        game.obstacles.push(Obstacle {
            rect: Rect::new(10.0, 600.0, 30.0, 40.0),
            passed: false,
        });

        game.tick(&InputState::default(), &mut sink);
        assert_eq!(game.score, game.config.pass_score);

        // Subsequent ticks never re-score the same obstacle
        for _ in 0..5 {
            game.tick(&InputState::default(), &mut sink);
        }
        assert_eq!(game.score, game.config.pass_score);
    }

    #[test]
    fn offscreen_obstacle_is_pruned_for_good() {
        let mut game = started(quiet_config());
        let mut sink = NullFeedback;

        game.obstacles.push(Obstacle {
            rect: Rect::new(5.0, 600.0, 30.0, 40.0),
            passed: true,
        });
        for _ in 0..10 {
            game.tick(&InputState::default(), &mut sink);
        }
        assert!(game.obstacles.is_empty());

        for _ in 0..10 {
            game.tick(&InputState::default(), &mut sink);
        }
        assert!(game.obstacles.is_empty());
    }

    #[test]
    fn overlap_is_immediately_terminal() {
        let mut game = started(quiet_config());
        let mut sink = RecordingFeedback::default();

        let player = game.player_rect();
        game.obstacles.push(Obstacle {
            rect: Rect::new(player.right() + 2.0, player.top(), 30.0, 40.0),
            passed: false,
        });
        game.tick(&InputState::default(), &mut sink);

        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(sink.count(FeedbackKind::Error), 1);

        let frozen = game.snapshot();
        game.tick(&InputState::default(), &mut sink);
        assert_eq!(game.snapshot(), frozen);
    }

    #[test]
    fn spawned_obstacle_rests_on_the_ground() {
        let config = RunnerConfig {
            base_spawn_ms: 32.0,
            min_spawn_ms: 32.0,
            ..RunnerConfig::default()
        };
        let mut game = started(config);
        let mut sink = NullFeedback;

        game.tick(&InputState::default(), &mut sink);
        game.tick(&InputState::default(), &mut sink);
        assert_eq!(game.obstacles.len(), 1);
        let obs = &game.obstacles[0].rect;
        assert_eq!(obs.bottom(), game.config.play_height - game.config.ground_height);
        assert!(obs.size.y >= game.config.obstacle_min_height);
        assert!(obs.size.y < game.config.obstacle_min_height + game.config.obstacle_height_jitter);
    }
}
