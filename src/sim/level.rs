//! Platformer level model and generation
//!
//! Level 1 is hand-authored. Levels 2 and up are assembled from fixed chunk
//! templates picked by an arithmetic hash of the level number, so the same
//! level always produces the same layout. Template availability widens with
//! the level number to mix in the nastier shapes later.

use serde::Serialize;

use super::rect::Rect;
use crate::config::PlatformerConfig;

pub const ENEMY_SIZE: f32 = 30.0;
pub const POWERUP_SIZE: f32 = 20.0;
const GROUND_THICKNESS: f32 = 60.0;
const PLATFORM_THICKNESS: f32 = 20.0;
const STARTER_WIDTH: f32 = 300.0;
const FINAL_WIDTH: f32 = 400.0;
/// Goal offset into the final flat segment
const GOAL_OFFSET: f32 = 200.0;
/// Widest horizontal gap the player can clear (speed 7, jump -18, gravity
/// 1.2 gives ~210 units of air range)
const MAX_JUMP_SPAN: f32 = 180.0;

/// An enemy placement patrolling `[start_x, start_x + range]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatrolEnemy {
    pub rect: Rect,
    /// Horizontal speed per tick; sign flips at each patrol bound
    pub vx: f32,
    pub start_x: f32,
    pub range: f32,
    pub active: bool,
}

impl PatrolEnemy {
    fn new(x: f32, y: f32, vx: f32, start_x: f32, range: f32) -> Self {
        Self {
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            vx,
            start_x,
            range,
            active: true,
        }
    }
}

/// A pickup granting invincibility plus the ranged attack
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Powerup {
    pub rect: Rect,
    pub active: bool,
}

impl Powerup {
    fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, POWERUP_SIZE, POWERUP_SIZE),
            active: true,
        }
    }
}

/// Everything a level places in the world
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelPlan {
    pub platforms: Vec<Rect>,
    pub enemies: Vec<PatrolEnemy>,
    pub powerups: Vec<Powerup>,
    pub goal: Rect,
    /// Total horizontal length
    pub length: f32,
}

/// Chunk templates the generator can draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkTemplate {
    Flat,
    Pit,
    Staircase,
    EnemyPatrol,
    HighPlatform,
    MovingPlatforms,
    DangerZone,
}

impl ChunkTemplate {
    const ALL: [ChunkTemplate; 7] = [
        ChunkTemplate::Flat,
        ChunkTemplate::Pit,
        ChunkTemplate::Staircase,
        ChunkTemplate::EnemyPatrol,
        ChunkTemplate::HighPlatform,
        ChunkTemplate::MovingPlatforms,
        ChunkTemplate::DangerZone,
    ];

    /// First level this template may appear on
    fn min_level(self) -> u32 {
        match self {
            ChunkTemplate::Flat | ChunkTemplate::Pit | ChunkTemplate::Staircase => 2,
            ChunkTemplate::EnemyPatrol => 3,
            ChunkTemplate::HighPlatform => 4,
            ChunkTemplate::MovingPlatforms => 5,
            ChunkTemplate::DangerZone => 6,
        }
    }

    fn width(self) -> f32 {
        match self {
            ChunkTemplate::Flat => 300.0,
            ChunkTemplate::Pit => 360.0,
            ChunkTemplate::Staircase => 420.0,
            ChunkTemplate::EnemyPatrol => 360.0,
            ChunkTemplate::HighPlatform => 360.0,
            ChunkTemplate::MovingPlatforms => 480.0,
            ChunkTemplate::DangerZone => 420.0,
        }
    }
}

/// Build the layout for a level. Same level number, same layout.
pub fn generate_level(level: u32, config: &PlatformerConfig) -> LevelPlan {
    let plan = if level <= 1 {
        hand_authored(config)
    } else {
        assemble_chunks(level, config)
    };

    // Traversability check: every gap must be jumpable. A violation is a
    // content bug worth surfacing, not a reason to crash mid-session.
    let gap = widest_horizontal_gap(&plan);
    if gap > MAX_JUMP_SPAN {
        log::warn!(
            "level {}: widest gap {:.0} exceeds the jumpable span {:.0}",
            level,
            gap,
            MAX_JUMP_SPAN
        );
    }

    plan
}

/// The fixed opening level: two pits, three floating platforms, three
/// patrollers and one star
fn hand_authored(config: &PlatformerConfig) -> LevelPlan {
    let h = config.play_height;
    let length = 2500.0;

    let platforms = vec![
        // Ground slabs with two gaps
        Rect::new(0.0, h - 60.0, 800.0, 60.0),
        Rect::new(950.0, h - 60.0, 400.0, 60.0),
        Rect::new(1500.0, h - 60.0, 1000.0, 60.0),
        // Floating platforms
        Rect::new(400.0, h - 160.0, 120.0, 20.0),
        Rect::new(600.0, h - 240.0, 120.0, 20.0),
        Rect::new(1100.0, h - 180.0, 150.0, 20.0),
    ];

    let enemies = vec![
        PatrolEnemy::new(600.0, h - 90.0, 2.0, 500.0, 200.0),
        PatrolEnemy::new(1150.0, h - 210.0, 1.5, 1100.0, 100.0),
        PatrolEnemy::new(1700.0, h - 90.0, 2.5, 1600.0, 200.0),
    ];

    let powerups = vec![Powerup::new(650.0, h - 280.0)];

    LevelPlan {
        platforms,
        enemies,
        powerups,
        goal: Rect::new(length - 100.0, h - 200.0, 60.0, 140.0),
        length,
    }
}

fn assemble_chunks(level: u32, config: &PlatformerConfig) -> LevelPlan {
    let h = config.play_height;
    let mut plan = LevelPlan {
        platforms: Vec::new(),
        enemies: Vec::new(),
        powerups: Vec::new(),
        goal: Rect::new(0.0, 0.0, 0.0, 0.0),
        length: 0.0,
    };

    let available: Vec<ChunkTemplate> = ChunkTemplate::ALL
        .iter()
        .copied()
        .filter(|t| t.min_level() <= level)
        .collect();

    // Safe flat runway under the spawn point
    let mut cursor = 0.0;
    plan.platforms.push(Rect::new(
        cursor,
        h - GROUND_THICKNESS,
        STARTER_WIDTH,
        GROUND_THICKNESS,
    ));
    cursor += STARTER_WIDTH;

    let chunk_count = 3 + (level as f32 * 1.5).floor() as usize;
    for i in 0..chunk_count {
        let idx = (level as usize + i * 7 + i * i) % available.len();
        let template = available[idx];
        emit_chunk(template, cursor, level, h, &mut plan);
        cursor += template.width();
    }

    // Flat landing strip carrying the goal pillar
    plan.platforms.push(Rect::new(
        cursor,
        h - GROUND_THICKNESS,
        FINAL_WIDTH,
        GROUND_THICKNESS,
    ));
    plan.goal = Rect::new(cursor + GOAL_OFFSET, h - 200.0, 60.0, 140.0);
    plan.length = cursor + FINAL_WIDTH;

    plan
}

/// Append one template's geometry at the cursor. All placements are fixed
/// relative to `x0`.
fn emit_chunk(template: ChunkTemplate, x0: f32, level: u32, h: f32, plan: &mut LevelPlan) {
    let ground = h - GROUND_THICKNESS;
    let enemy_speed = 2.0 + level as f32 * 0.3;

    match template {
        ChunkTemplate::Flat => {
            plan.platforms
                .push(Rect::new(x0, ground, 300.0, GROUND_THICKNESS));
        }
        ChunkTemplate::Pit => {
            // 120-unit gap between two ledges
            plan.platforms
                .push(Rect::new(x0, ground, 120.0, GROUND_THICKNESS));
            plan.platforms
                .push(Rect::new(x0 + 240.0, ground, 120.0, GROUND_THICKNESS));
        }
        ChunkTemplate::Staircase => {
            plan.platforms
                .push(Rect::new(x0, ground, 420.0, GROUND_THICKNESS));
            plan.platforms
                .push(Rect::new(x0 + 60.0, h - 120.0, 90.0, PLATFORM_THICKNESS));
            plan.platforms
                .push(Rect::new(x0 + 180.0, h - 180.0, 90.0, PLATFORM_THICKNESS));
            plan.platforms
                .push(Rect::new(x0 + 300.0, h - 240.0, 90.0, PLATFORM_THICKNESS));
        }
        ChunkTemplate::EnemyPatrol => {
            plan.platforms
                .push(Rect::new(x0, ground, 360.0, GROUND_THICKNESS));
            plan.enemies.push(PatrolEnemy::new(
                x0 + 40.0,
                ground - ENEMY_SIZE,
                enemy_speed,
                x0 + 40.0,
                240.0,
            ));
        }
        ChunkTemplate::HighPlatform => {
            plan.platforms
                .push(Rect::new(x0, ground, 360.0, GROUND_THICKNESS));
            plan.platforms
                .push(Rect::new(x0 + 120.0, h - 220.0, 140.0, PLATFORM_THICKNESS));
            plan.powerups.push(Powerup::new(x0 + 170.0, h - 260.0));
        }
        ChunkTemplate::MovingPlatforms => {
            // Staggered hops over a long drop
            plan.platforms
                .push(Rect::new(x0, ground, 100.0, GROUND_THICKNESS));
            plan.platforms
                .push(Rect::new(x0 + 140.0, h - 140.0, 90.0, PLATFORM_THICKNESS));
            plan.platforms
                .push(Rect::new(x0 + 290.0, h - 200.0, 90.0, PLATFORM_THICKNESS));
            plan.platforms
                .push(Rect::new(x0 + 420.0, ground, 60.0, GROUND_THICKNESS));
        }
        ChunkTemplate::DangerZone => {
            plan.platforms
                .push(Rect::new(x0, ground, 420.0, GROUND_THICKNESS));
            plan.platforms
                .push(Rect::new(x0 + 180.0, h - 140.0, 80.0, PLATFORM_THICKNESS));
            plan.enemies.push(PatrolEnemy::new(
                x0 + 30.0,
                ground - ENEMY_SIZE,
                enemy_speed + 0.5,
                x0 + 30.0,
                150.0,
            ));
            plan.enemies.push(PatrolEnemy::new(
                x0 + 240.0,
                ground - ENEMY_SIZE,
                enemy_speed + 0.5,
                x0 + 240.0,
                140.0,
            ));
            plan.powerups.push(Powerup::new(x0 + 210.0, h - 190.0));
        }
    }
}

/// Widest horizontal stretch with nothing to stand on
fn widest_horizontal_gap(plan: &LevelPlan) -> f32 {
    let mut spans: Vec<(f32, f32)> = plan
        .platforms
        .iter()
        .map(|p| (p.left(), p.right()))
        .collect();
    spans.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut widest: f32 = 0.0;
    let mut covered: f32 = 0.0;
    for (left, right) in spans {
        if left > covered {
            widest = widest.max(left - covered);
        }
        covered = covered.max(right);
    }
    widest
}
