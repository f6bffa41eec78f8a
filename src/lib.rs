//! Arcade Hub - simulation core for a three-game mobile arcade
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fixed tick, AABB collisions, game rules)
//! - `config`: Data-driven game tuning
//! - `persistence`: Save/load of session progress
//! - `feedback`: Fire-and-forget haptic/audio notifications
//!
//! Rendering, touch capture and the host storage live outside this crate;
//! they talk to the core through snapshots, the input adapter and the
//! storage/feedback traits.

pub mod config;
pub mod feedback;
pub mod persistence;
pub mod sim;

pub use config::{PlatformerConfig, RunnerConfig, ShooterConfig};
pub use feedback::{FeedbackKind, FeedbackSink};

/// Shared simulation constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (the mobile 16 ms timer)
    pub const TICK_MS: f32 = 16.0;
    /// Fixed timestep in seconds
    pub const TICK_DT: f32 = TICK_MS / 1000.0;
    /// Maximum substeps per advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions (portrait phone layout)
    pub const PLAY_WIDTH: f32 = 400.0;
    pub const PLAY_HEIGHT: f32 = 700.0;
}
