//! Data-driven game tuning
//!
//! Each game reads its numbers from a config struct instead of scattered
//! literals. Defaults carry the shipped balance; tests bend individual
//! fields to isolate behavior.

use serde::{Deserialize, Serialize};

use crate::consts::{PLAY_HEIGHT, PLAY_WIDTH};

/// Space-shooter tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShooterConfig {
    pub play_width: f32,
    pub play_height: f32,
    pub player_size: f32,
    pub hazard_size: f32,
    pub laser_width: f32,
    pub laser_height: f32,
    /// Laser rise per tick
    pub laser_speed: f32,
    /// Auto-fire cadence
    pub fire_cooldown_ms: f32,
    /// Hazard spawn interval at score 0
    pub base_spawn_ms: f32,
    /// Spawn interval floor
    pub min_spawn_ms: f32,
    /// Interval shrink per score point
    pub spawn_accel_per_point: f32,
    pub base_hazard_speed: f32,
    /// Uniform random speed bonus added at spawn
    pub hazard_speed_jitter: f32,
    /// Speed bonus per score point
    pub hazard_speed_per_point: f32,
    pub starting_lives: u32,
    pub kill_score: u32,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,
            player_size: 50.0,
            hazard_size: 40.0,
            laser_width: 6.0,
            laser_height: 20.0,
            laser_speed: 12.0,
            fire_cooldown_ms: 250.0,
            base_spawn_ms: 1200.0,
            min_spawn_ms: 300.0,
            spawn_accel_per_point: 15.0,
            base_hazard_speed: 2.0,
            hazard_speed_jitter: 3.0,
            hazard_speed_per_point: 0.01,
            starting_lives: 3,
            kill_score: 10,
        }
    }
}

/// Runner tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub play_width: f32,
    pub play_height: f32,
    pub player_size: f32,
    /// Fixed horizontal player position
    pub player_x: f32,
    pub ground_height: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Upward velocity set on jump (negative = up)
    pub jump_impulse: f32,
    pub obstacle_width: f32,
    pub obstacle_min_height: f32,
    /// Uniform random height added on top of the minimum
    pub obstacle_height_jitter: f32,
    pub base_spawn_ms: f32,
    pub min_spawn_ms: f32,
    pub spawn_accel_per_point: f32,
    /// Leftward obstacle speed at score 0
    pub base_scroll_speed: f32,
    pub scroll_speed_per_point: f32,
    pub pass_score: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,
            player_size: 40.0,
            player_x: 50.0,
            ground_height: 60.0,
            gravity: 0.8,
            jump_impulse: -15.0,
            obstacle_width: 30.0,
            obstacle_min_height: 30.0,
            obstacle_height_jitter: 50.0,
            base_spawn_ms: 2000.0,
            min_spawn_ms: 800.0,
            spawn_accel_per_point: 20.0,
            base_scroll_speed: 6.0,
            scroll_speed_per_point: 0.01,
            pass_score: 10,
        }
    }
}

/// Platformer tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformerConfig {
    /// Visible horizontal span the camera exposes
    pub view_width: f32,
    pub play_height: f32,
    pub player_size: f32,
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Feet-to-platform tolerance for the ground probe
    pub ground_probe: f32,
    pub starting_lives: u32,
    /// Reaching the goal on this level wins the run
    pub final_level: u32,
    /// How far behind the death point the player respawns
    pub respawn_setback: f32,
    pub respawn_invincibility_ms: f32,
    /// Invincibility + ranged attack window granted by a pickup
    pub powerup_duration_ms: f32,
    /// Projectile advance per tick
    pub projectile_speed: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,
    /// How far beyond the camera span projectiles survive
    pub projectile_cull_margin: f32,
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            view_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,
            player_size: 30.0,
            move_speed: 7.0,
            gravity: 1.2,
            jump_impulse: -18.0,
            ground_probe: 10.0,
            starting_lives: 3,
            final_level: 10,
            respawn_setback: 150.0,
            respawn_invincibility_ms: 3000.0,
            powerup_duration_ms: 5000.0,
            projectile_speed: 10.0,
            projectile_width: 12.0,
            projectile_height: 6.0,
            projectile_cull_margin: 100.0,
        }
    }
}
