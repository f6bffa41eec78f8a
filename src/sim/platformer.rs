//! Platformer rules
//!
//! Held directions drive constant horizontal speed, gravity pulls every
//! tick and collisions resolve per axis against the platform list. Falling
//! out of the world or touching a patroller costs a life and respawns the
//! player above and behind the death point with a short invincibility
//! window. Stars grant invincibility plus a ranged attack. Reaching the
//! goal advances the level; clearing the final level wins the run.
//!
//! The X pass resolves against the full platform list before the Y pass
//! runs, so a platform the Y pass would have separated anyway can still
//! snap X (corner snagging). Level balance grew around that behavior, so it
//! stays.

use glam::Vec2;
use serde::Serialize;

use super::input::{Direction, InputState};
use super::level::{LevelPlan, PatrolEnemy, Powerup, generate_level};
use super::rect::{Rect, intersects};
use super::session::{GamePhase, GameSim};
use crate::config::PlatformerConfig;
use crate::consts::TICK_MS;
use crate::feedback::{FeedbackKind, FeedbackSink};
use crate::persistence::Progress;

/// Player spawn point at level start
const SPAWN_X: f32 = 50.0;
const SPAWN_Y: f32 = 100.0;

/// The player avatar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub facing: Direction,
}

/// A ranged-attack bolt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projectile {
    pub rect: Rect,
    pub vx: f32,
}

/// Read-only view published for rendering. Inactive entities are filtered
/// out here so the presentation layer never second-guesses liveness flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformerSnapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub lives: u32,
    pub invincible: bool,
    pub has_ranged_attack: bool,
    pub camera_x: f32,
    pub player: Rect,
    pub facing: Direction,
    pub platforms: Vec<Rect>,
    pub enemies: Vec<Rect>,
    pub powerups: Vec<Rect>,
    pub projectiles: Vec<Rect>,
    pub goal: Rect,
}

/// Multi-level platformer session state
pub struct PlatformerGame {
    config: PlatformerConfig,
    phase: GamePhase,
    level: u32,
    lives: u32,
    player: Player,
    platforms: Vec<Rect>,
    enemies: Vec<PatrolEnemy>,
    powerups: Vec<Powerup>,
    projectiles: Vec<Projectile>,
    goal: Rect,
    level_length: f32,
    camera_x: f32,
    invincible_ms: f32,
    ranged_ms: f32,
}

impl PlatformerGame {
    pub fn new(config: PlatformerConfig) -> Self {
        let lives = config.starting_lives;
        let size = config.player_size;
        Self {
            config,
            phase: GamePhase::Menu,
            level: 1,
            lives,
            player: Player {
                rect: Rect::new(SPAWN_X, SPAWN_Y, size, size),
                vel: Vec2::ZERO,
                facing: Direction::Right,
            },
            platforms: Vec::new(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            projectiles: Vec::new(),
            goal: Rect::new(0.0, 0.0, 0.0, 0.0),
            level_length: 0.0,
            camera_x: 0.0,
            invincible_ms: 0.0,
            ranged_ms: 0.0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn invincible(&self) -> bool {
        self.invincible_ms > 0.0
    }

    pub fn has_ranged_attack(&self) -> bool {
        self.ranged_ms > 0.0
    }

    /// Counters that survive an app restart
    pub fn progress(&self) -> Progress {
        Progress {
            level: self.level,
            lives: self.lives,
        }
    }

    /// Start from saved counters instead of level 1. Out-of-range values
    /// are clamped rather than rejected.
    pub fn resume(&mut self, progress: Progress) {
        let level = progress.level.clamp(1, self.config.final_level);
        self.lives = progress.lives.clamp(1, self.config.starting_lives);
        self.load_level(level);
        self.phase = GamePhase::Running;
        log::info!(
            "platformer: resumed at level {} with {} lives",
            self.level,
            self.lives
        );
    }

    pub fn snapshot(&self) -> PlatformerSnapshot {
        PlatformerSnapshot {
            phase: self.phase,
            level: self.level,
            lives: self.lives,
            invincible: self.invincible(),
            has_ranged_attack: self.has_ranged_attack(),
            camera_x: self.camera_x,
            player: self.player.rect,
            facing: self.player.facing,
            platforms: self.platforms.clone(),
            enemies: self
                .enemies
                .iter()
                .filter(|e| e.active)
                .map(|e| e.rect)
                .collect(),
            powerups: self
                .powerups
                .iter()
                .filter(|p| p.active)
                .map(|p| p.rect)
                .collect(),
            projectiles: self.projectiles.iter().map(|p| p.rect).collect(),
            goal: self.goal,
        }
    }

    /// Replace the world with a freshly generated level. Lives and phase
    /// are deliberately untouched.
    fn load_level(&mut self, level: u32) {
        let LevelPlan {
            platforms,
            enemies,
            powerups,
            goal,
            length,
        } = generate_level(level, &self.config);

        self.level = level;
        self.platforms = platforms;
        self.enemies = enemies;
        self.powerups = powerups;
        self.goal = goal;
        self.level_length = length;
        self.projectiles.clear();

        let size = self.config.player_size;
        self.player = Player {
            rect: Rect::new(SPAWN_X, SPAWN_Y, size, size),
            vel: Vec2::ZERO,
            facing: Direction::Right,
        };
        self.camera_x = 0.0;
        self.invincible_ms = 0.0;
        self.ranged_ms = 0.0;
    }

    /// Feet within the tolerance band of some platform's top edge
    fn on_ground(&self) -> bool {
        let p = &self.player.rect;
        self.platforms.iter().any(|plat| {
            p.left() < plat.right()
                && p.right() > plat.left()
                && p.bottom() >= plat.top()
                && p.bottom() <= plat.top() + self.config.ground_probe
        })
    }

    /// One death: spend a life, then either end the run or respawn above
    /// and behind the death point with a grace window.
    fn kill_player(&mut self, feedback: &mut dyn FeedbackSink) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            feedback.notify(FeedbackKind::Error);
            log::info!("platformer: out of lives on level {}", self.level);
        } else {
            let x = (self.player.rect.pos.x - self.config.respawn_setback).max(0.0);
            self.player.rect.pos = Vec2::new(x, 0.0);
            self.player.vel = Vec2::ZERO;
            self.invincible_ms = self.config.respawn_invincibility_ms;
            feedback.notify(FeedbackKind::Warning);
            log::info!(
                "platformer: life lost on level {}, {} remaining",
                self.level,
                self.lives
            );
        }
    }
}

impl GameSim for PlatformerGame {
    fn start(&mut self) {
        self.lives = self.config.starting_lives;
        self.load_level(1);
        self.phase = GamePhase::Running;
        log::info!("platformer: session started");
    }

    fn tick(&mut self, input: &InputState, feedback: &mut dyn FeedbackSink) {
        if self.phase != GamePhase::Running {
            return;
        }

        // Held direction drives constant horizontal speed, no easing
        let held = input.held_direction();
        self.player.vel.x = match held {
            Some(Direction::Left) => -self.config.move_speed,
            Some(Direction::Right) => self.config.move_speed,
            None => 0.0,
        };
        if let Some(dir) = held {
            self.player.facing = dir;
        }

        // X pass: move, clamp at the left wall, snap out of any overlap in
        // the direction of travel
        self.player.rect.pos.x += self.player.vel.x;
        if self.player.rect.pos.x < 0.0 {
            self.player.rect.pos.x = 0.0;
        }
        for plat in &self.platforms {
            if intersects(&self.player.rect, plat) {
                if self.player.vel.x > 0.0 {
                    self.player.rect.pos.x = plat.left() - self.player.rect.size.x;
                } else if self.player.vel.x < 0.0 {
                    self.player.rect.pos.x = plat.right();
                }
            }
        }

        // Jump is gated on the ground probe, before gravity pulls the feet
        // out of the tolerance band
        if input.jump && self.on_ground() {
            self.player.vel.y = self.config.jump_impulse;
            feedback.notify(FeedbackKind::LightImpact);
        }

        // Y pass: integrate gravity, snap to the crossed edge and stop
        self.player.vel.y += self.config.gravity;
        self.player.rect.pos.y += self.player.vel.y;
        for plat in &self.platforms {
            if intersects(&self.player.rect, plat) {
                if self.player.vel.y > 0.0 {
                    self.player.rect.pos.y = plat.top() - self.player.rect.size.y;
                    self.player.vel.y = 0.0;
                } else if self.player.vel.y < 0.0 {
                    self.player.rect.pos.y = plat.bottom();
                    self.player.vel.y = 0.0;
                }
            }
        }

        // Falling out of the world is a death event
        if self.player.rect.top() > self.config.play_height {
            self.kill_player(feedback);
        }

        // Camera trails the player, never going negative
        self.camera_x = (self.player.rect.pos.x - self.config.view_width / 3.0).max(0.0);

        // Timed effects count down in wall milliseconds
        self.invincible_ms = (self.invincible_ms - TICK_MS).max(0.0);
        self.ranged_ms = (self.ranged_ms - TICK_MS).max(0.0);

        // Patrol movement: reverse at each bound
        for enemy in self.enemies.iter_mut() {
            if !enemy.active {
                continue;
            }
            enemy.rect.pos.x += enemy.vx;
            if enemy.rect.pos.x > enemy.start_x + enemy.range || enemy.rect.pos.x < enemy.start_x {
                enemy.vx = -enemy.vx;
            }
        }

        // Enemy contact: invincible players trample, vulnerable ones die.
        // At most one death event per tick.
        if self.phase == GamePhase::Running {
            let invincible = self.invincible();
            let player_rect = self.player.rect;
            let mut died = false;
            for enemy in self.enemies.iter_mut() {
                if !enemy.active || !intersects(&player_rect, &enemy.rect) {
                    continue;
                }
                if invincible {
                    enemy.active = false;
                    feedback.notify(FeedbackKind::Success);
                } else {
                    died = true;
                    break;
                }
            }
            if died {
                self.kill_player(feedback);
            }
        }

        // Pickups: one star buys both effects for the same window
        let player_rect = self.player.rect;
        for powerup in self.powerups.iter_mut() {
            if powerup.active && intersects(&player_rect, &powerup.rect) {
                powerup.active = false;
                self.invincible_ms = self.config.powerup_duration_ms;
                self.ranged_ms = self.config.powerup_duration_ms;
                feedback.notify(FeedbackKind::Success);
            }
        }

        // Ranged attack while the pickup window is open
        if input.shoot && self.has_ranged_attack() {
            let w = self.config.projectile_width;
            let h = self.config.projectile_height;
            let y = self.player.rect.top() + self.player.rect.size.y / 2.0 - h / 2.0;
            let (x, vx) = match self.player.facing {
                Direction::Right => (self.player.rect.right(), self.config.projectile_speed),
                Direction::Left => (self.player.rect.left() - w, -self.config.projectile_speed),
            };
            self.projectiles.push(Projectile {
                rect: Rect::new(x, y, w, h),
                vx,
            });
            feedback.notify(FeedbackKind::LightImpact);
        }

        // Advance bolts; first live enemy hit consumes both. Reverse index
        // order keeps removal safe mid-iteration.
        let cull_left = self.camera_x - self.config.projectile_cull_margin;
        let cull_right =
            self.camera_x + self.config.view_width + self.config.projectile_cull_margin;
        for i in (0..self.projectiles.len()).rev() {
            self.projectiles[i].rect.pos.x += self.projectiles[i].vx;
            let bolt = self.projectiles[i].rect;

            let mut spent = false;
            for enemy in self.enemies.iter_mut() {
                if enemy.active && intersects(&bolt, &enemy.rect) {
                    enemy.active = false;
                    spent = true;
                    feedback.notify(FeedbackKind::Success);
                    break;
                }
            }

            if spent || bolt.right() < cull_left || bolt.left() > cull_right {
                self.projectiles.remove(i);
            }
        }

        // Goal: win on the final level, otherwise roll the next one in
        if self.phase == GamePhase::Running && intersects(&self.player.rect, &self.goal) {
            if self.level >= self.config.final_level {
                self.phase = GamePhase::Won;
                feedback.notify(FeedbackKind::Success);
                log::info!("platformer: all {} levels cleared", self.config.final_level);
            } else {
                let next = self.level + 1;
                log::info!("platformer: level {} cleared", self.level);
                self.load_level(next);
                feedback.notify(FeedbackKind::Success);
            }
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

    fn started() -> PlatformerGame {
        let mut game = PlatformerGame::new(PlatformerConfig::default());
        game.start();
        game
    }

    /// Tick with no input held
    fn idle_tick(game: &mut PlatformerGame) {
        game.tick(&InputState::default(), &mut NullFeedback);
    }

    #[test]
    fn no_tick_while_not_running() {
        let mut game = PlatformerGame::new(PlatformerConfig::default());
        let before = game.snapshot();
        idle_tick(&mut game);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn landing_snaps_to_platform_top_and_zeroes_vy() {
        let mut game = started();
        // Spawn is above the first ground slab; fall until contact
        for _ in 0..120 {
            idle_tick(&mut game);
            if game.player.vel.y == 0.0 && game.player.rect.top() > SPAWN_Y {
                break;
            }
        }
        let ground_top = game.config.play_height - 60.0;
        assert_eq!(game.player.vel.y, 0.0);
        assert_eq!(
            game.player.rect.top(),
            ground_top - game.config.player_size
        );
    }

    #[test]
    fn horizontal_snap_stops_at_platform_edge() {
        let mut game = started();
        // Drop onto the ground first
        for _ in 0..60 {
            idle_tick(&mut game);
        }
        // Wall the player in with a pillar just ahead
        let x = game.player.rect.right() + 4.0;
        game.platforms.push(Rect::new(x, 0.0, 40.0, game.config.play_height));

        let mut input = InputState::default();
        input.hold_direction(Direction::Right, true);
        game.tick(&input, &mut NullFeedback);
        assert_eq!(game.player.rect.right(), x);

        // Pushing further changes nothing
        game.tick(&input, &mut NullFeedback);
        assert_eq!(game.player.rect.right(), x);
    }

    #[test]
    fn jump_requires_ground_contact() {
        let mut game = started();
        let mut input = InputState::default();
        input.action_jump();

        // Mid-air at spawn: jump is refused
        game.tick(&input, &mut NullFeedback);
        assert!(game.player.vel.y > 0.0);

        // Grounded: jump is accepted
        for _ in 0..60 {
            idle_tick(&mut game);
        }
        input.action_jump();
        game.tick(&input, &mut NullFeedback);
        assert!(game.player.vel.y < 0.0);
    }

    #[test]
    fn vulnerable_enemy_contact_respawns_with_grace_window() {
        let mut game = started();
        let mut sink = RecordingFeedback::default();

        // Stand in the first patroller's band: enemy starts at x=600
        game.player.rect.pos = Vec2::new(600.0, game.config.play_height - 90.0);
        game.player.vel = Vec2::ZERO;
        game.tick(&InputState::default(), &mut sink);

        assert_eq!(game.lives, 2);
        assert_eq!(game.player.rect.pos.x, 450.0);
        assert_eq!(game.player.rect.pos.y, 0.0);
        assert!(game.invincible());
        assert_eq!(game.invincible_ms, 3000.0);
        assert_eq!(sink.count(FeedbackKind::Warning), 1);
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn invincible_contact_tramples_the_enemy() {
        let mut game = started();
        let mut sink = RecordingFeedback::default();

        game.player.rect.pos = Vec2::new(600.0, game.config.play_height - 90.0);
        game.player.vel = Vec2::ZERO;
        game.invincible_ms = 1000.0;
        game.tick(&InputState::default(), &mut sink);

        assert_eq!(game.lives, 3);
        assert!(!game.enemies[0].active);
        assert_eq!(sink.count(FeedbackKind::Success), 1);
    }

    #[test]
    fn falling_out_of_the_world_costs_a_life() {
        let mut game = started();
        game.player.rect.pos = Vec2::new(900.0, game.config.play_height + 1.0);
        let death_x = game.player.rect.pos.x;
        idle_tick(&mut game);

        assert_eq!(game.lives, 2);
        assert_eq!(
            game.player.rect.pos.x,
            death_x - game.config.respawn_setback
        );
        assert_eq!(game.player.rect.pos.y, 0.0);
        assert!(game.invincible());
    }

    #[test]
    fn exhausting_lives_ends_the_run() {
        let mut game = started();
        game.lives = 1;
        game.player.rect.pos = Vec2::new(900.0, game.config.play_height + 1.0);
        let mut sink = RecordingFeedback::default();
        game.tick(&InputState::default(), &mut sink);

        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.lives, 0);
        assert_eq!(sink.count(FeedbackKind::Error), 1);

        let frozen = game.snapshot();
        game.tick(&InputState::default(), &mut sink);
        assert_eq!(game.snapshot(), frozen);
    }

    #[test]
    fn pickup_grants_both_effects_then_expires() {
        let mut game = started();
        // Settle on the ground, then drop a star onto the player
        for _ in 0..60 {
            idle_tick(&mut game);
        }
        game.powerups[0].rect = Rect::new(game.player.rect.left(), 600.0, 20.0, 20.0);

        idle_tick(&mut game);
        assert!(game.invincible());
        assert!(game.has_ranged_attack());
        assert!(!game.powerups[0].active);

        // 5000 ms at 16 ms per tick
        for _ in 0..313 {
            idle_tick(&mut game);
        }
        assert!(!game.invincible());
        assert!(!game.has_ranged_attack());
    }

    #[test]
    fn projectile_downs_the_first_live_enemy() {
        let mut game = started();
        let mut sink = RecordingFeedback::default();

        // Park the player on the ground short of the first patroller,
        // facing right, with the attack window open
        for _ in 0..60 {
            idle_tick(&mut game);
        }
        game.player.rect.pos.x = 400.0;
        game.ranged_ms = 5000.0;

        let mut input = InputState::default();
        input.action_shoot();
        game.tick(&input, &mut sink);
        assert_eq!(game.projectiles.len(), 1);
        assert!(game.projectiles[0].vx > 0.0);

        // Bolt covers the 400..700 band within ~30 ticks
        for _ in 0..40 {
            idle_tick(&mut game);
            if !game.enemies[0].active {
                break;
            }
        }
        assert!(!game.enemies[0].active);
        assert!(game.projectiles.is_empty());
    }

    #[test]
    fn projectiles_are_culled_outside_the_camera_span() {
        let mut game = started();
        for _ in 0..60 {
            idle_tick(&mut game);
        }
        // Fire away from every enemy
        game.player.facing = Direction::Left;
        game.ranged_ms = 5000.0;
        let mut input = InputState::default();
        input.action_shoot();
        game.tick(&input, &mut NullFeedback);
        assert_eq!(game.projectiles.len(), 1);

        for _ in 0..40 {
            idle_tick(&mut game);
        }
        assert!(game.projectiles.is_empty());
    }

    #[test]
    fn goal_contact_advances_and_preserves_lives() {
        let mut game = started();
        game.lives = 2;
        game.player.rect.pos = game.goal.pos;
        game.player.vel = Vec2::ZERO;
        idle_tick(&mut game);

        assert_eq!(game.level, 2);
        assert_eq!(game.lives, 2);
        assert_eq!(game.phase(), GamePhase::Running);
        // Fresh level resets position, camera and effects
        assert_eq!(game.player.rect.pos, Vec2::new(SPAWN_X, SPAWN_Y));
        assert_eq!(game.camera_x, 0.0);
        assert!(!game.invincible());
        assert!(game.projectiles.is_empty());
    }

    #[test]
    fn goal_on_final_level_wins() {
        let mut game = started();
        game.load_level(game.config.final_level);
        game.phase = GamePhase::Running;
        game.player.rect.pos = game.goal.pos;
        game.player.vel = Vec2::ZERO;

        let mut sink = RecordingFeedback::default();
        game.tick(&InputState::default(), &mut sink);
        assert_eq!(game.phase(), GamePhase::Won);
        assert!(sink.count(FeedbackKind::Success) >= 1);
    }

    #[test]
    fn camera_tracks_with_lead_and_never_goes_negative() {
        let mut game = started();
        for _ in 0..60 {
            idle_tick(&mut game);
        }
        assert_eq!(game.camera_x, 0.0);

        game.player.rect.pos.x = 500.0;
        idle_tick(&mut game);
        assert_eq!(
            game.camera_x,
            500.0 - game.config.view_width / 3.0
        );
    }

    #[test]
    fn resume_clamps_saved_counters() {
        let mut game = PlatformerGame::new(PlatformerConfig::default());
        game.resume(Progress {
            level: 99,
            lives: 0,
        });
        assert_eq!(game.level(), game.config.final_level);
        assert_eq!(game.lives(), 1);
        assert_eq!(game.phase(), GamePhase::Running);
    }
}
