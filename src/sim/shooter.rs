//! Space-shooter rules
//!
//! The ship is dragged directly along the bottom of the play area, lasers
//! auto-fire on a fixed cadence and hazards rain down faster as the score
//! climbs. Each hazard can be destroyed by at most one cause per tick, and
//! the player always gets checked before the lasers do.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::input::InputState;
use super::rect::{Rect, intersects};
use super::session::{GamePhase, GameSim};
use crate::config::ShooterConfig;
use crate::consts::TICK_MS;
use crate::feedback::{FeedbackKind, FeedbackSink};

/// A falling hazard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hazard {
    pub rect: Rect,
    /// Fall speed in units per tick, fixed at spawn
    pub speed: f32,
}

/// An upward laser bolt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Laser {
    pub rect: Rect,
}

/// Read-only view published for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShooterSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub player: Rect,
    pub hazards: Vec<Rect>,
    pub lasers: Vec<Rect>,
}

/// Vertical space shooter session state
pub struct ShooterGame {
    config: ShooterConfig,
    seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    score: u32,
    lives: u32,
    player_x: f32,
    /// Player x captured when the current drag began
    drag_anchor: Option<f32>,
    hazards: Vec<Hazard>,
    lasers: Vec<Laser>,
    fire_timer_ms: f32,
    spawn_timer_ms: f32,
}

impl ShooterGame {
    pub fn new(config: ShooterConfig, seed: u64) -> Self {
        let starting_lives = config.starting_lives;
        let player_x = (config.play_width - config.player_size) / 2.0;
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            lives: starting_lives,
            player_x,
            drag_anchor: None,
            hazards: Vec::new(),
            lasers: Vec::new(),
            fire_timer_ms: 0.0,
            spawn_timer_ms: 0.0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Player hitbox, anchored just above the bottom edge
    pub fn player_rect(&self) -> Rect {
        let size = self.config.player_size;
        Rect::new(
            self.player_x,
            self.config.play_height - size - 10.0,
            size,
            size,
        )
    }

    pub fn snapshot(&self) -> ShooterSnapshot {
        ShooterSnapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            player: self.player_rect(),
            hazards: self.hazards.iter().map(|h| h.rect).collect(),
            lasers: self.lasers.iter().map(|l| l.rect).collect(),
        }
    }

    fn spawn_hazard(&mut self) {
        let size = self.config.hazard_size;
        let max_x = self.config.play_width - size - 10.0;
        let x = self.rng.random_range(10.0..max_x);
        let speed = self.config.base_hazard_speed
            + self.rng.random_range(0.0..self.config.hazard_speed_jitter)
            + self.score as f32 * self.config.hazard_speed_per_point;
        self.hazards.push(Hazard {
            rect: Rect::new(x, -size, size, size),
            speed,
        });
    }
}

impl GameSim for ShooterGame {
    fn start(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.player_x = (self.config.play_width - self.config.player_size) / 2.0;
        self.drag_anchor = None;
        self.hazards.clear();
        self.lasers.clear();
        self.fire_timer_ms = 0.0;
        self.spawn_timer_ms = 0.0;
        self.phase = GamePhase::Running;
        log::info!("shooter: session started");
    }

    fn tick(&mut self, input: &InputState, feedback: &mut dyn FeedbackSink) {
        if self.phase != GamePhase::Running {
            return;
        }

        // Absolute drag offset from the drag-start anchor, clamped to the
        // horizontal play area
        if input.dragging {
            let anchor = *self.drag_anchor.get_or_insert(self.player_x);
            let max_x = self.config.play_width - self.config.player_size;
            self.player_x = (anchor + input.drag_delta).clamp(0.0, max_x);
        } else {
            self.drag_anchor = None;
        }

        // Auto-fire cadence
        self.fire_timer_ms += TICK_MS;
        while self.fire_timer_ms >= self.config.fire_cooldown_ms {
            self.fire_timer_ms -= self.config.fire_cooldown_ms;
            let x = self.player_x + self.config.player_size / 2.0 - self.config.laser_width / 2.0;
            let y = self.config.play_height - self.config.player_size - 20.0;
            self.lasers.push(Laser {
                rect: Rect::new(x, y, self.config.laser_width, self.config.laser_height),
            });
            feedback.notify(FeedbackKind::LightImpact);
        }

        // Spawn interval tightens with score, floored at the minimum
        self.spawn_timer_ms += TICK_MS;
        let interval = (self.config.base_spawn_ms
            - self.score as f32 * self.config.spawn_accel_per_point)
            .max(self.config.min_spawn_ms);
        if self.spawn_timer_ms >= interval {
            self.spawn_timer_ms = 0.0;
            self.spawn_hazard();
        }

        // Advance lasers, prune above the top bound
        for laser in &mut self.lasers {
            laser.rect.pos.y -= self.config.laser_speed;
        }
        let cull_y = -self.config.laser_height;
        self.lasers.retain(|l| l.rect.pos.y > cull_y);

        // Advance hazards
        for hazard in &mut self.hazards {
            hazard.rect.pos.y += hazard.speed;
        }

        let player = self.player_rect();

        // Resolve hazards in reverse index order so removal never skips a
        // neighbor. Player overlap wins over laser hits.
        for i in (0..self.hazards.len()).rev() {
            let mut destroyed = false;

            if intersects(&self.hazards[i].rect, &player) {
                self.lives = self.lives.saturating_sub(1);
                destroyed = true;
                feedback.notify(FeedbackKind::Warning);
            }

            if !destroyed {
                for j in (0..self.lasers.len()).rev() {
                    if intersects(&self.lasers[j].rect, &self.hazards[i].rect) {
                        self.lasers.remove(j);
                        self.score += self.config.kill_score;
                        destroyed = true;
                        feedback.notify(FeedbackKind::LightImpact);
                        break;
                    }
                }
            }

            if destroyed || self.hazards[i].rect.top() > self.config.play_height {
                self.hazards.remove(i);
            }
        }

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            feedback.notify(FeedbackKind::Error);
            log::info!("shooter: game over at score {}", self.score);
        }
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }
}
