//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod input;
pub mod level;
pub mod platformer;
pub mod rect;
pub mod runner;
pub mod session;
pub mod shooter;

pub use input::{Direction, InputState};
pub use level::{LevelPlan, PatrolEnemy, Powerup, generate_level};
pub use platformer::{PlatformerGame, PlatformerSnapshot};
pub use rect::{Rect, intersects};
pub use runner::{RunnerGame, RunnerSnapshot};
pub use session::{GamePhase, GameSim, Session};
pub use shooter::{ShooterGame, ShooterSnapshot};
