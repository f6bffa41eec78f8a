//! Arcade Hub headless demo
//!
//! Drives a short scripted run of each game through the session driver and
//! round-trips platformer progress through the file store. The real app
//! wires the same API to touch input and a renderer.

use arcade_hub::config::{PlatformerConfig, RunnerConfig, ShooterConfig};
use arcade_hub::feedback::LogFeedback;
use arcade_hub::persistence::{FileStore, ProgressStore};
use arcade_hub::sim::{Direction, PlatformerGame, RunnerGame, Session, ShooterGame};

fn main() {
    env_logger::init();
    log::info!("arcade hub demo starting");

    let mut feedback = LogFeedback;

    // Shooter: hold the ship in place and let the auto-fire work
    let mut shooter = Session::new(ShooterGame::new(ShooterConfig::default(), 7));
    shooter.start();
    for _ in 0..600 {
        shooter.step(&mut feedback);
    }
    let snap = shooter.game.snapshot();
    log::info!(
        "shooter after {} ticks: score {}, lives {}, {} hazards on screen",
        shooter.ticks(),
        snap.score,
        snap.lives,
        snap.hazards.len()
    );

    // Runner: hop on a fixed cadence
    let mut runner = Session::new(RunnerGame::new(RunnerConfig::default(), 7));
    runner.start();
    for i in 0..600 {
        if i % 45 == 0 {
            runner.input_mut().tap();
        }
        runner.step(&mut feedback);
    }
    let snap = runner.game.snapshot();
    log::info!(
        "runner after {} ticks: score {}, phase {:?}",
        runner.ticks(),
        snap.score,
        snap.phase
    );

    // Platformer: run right with periodic jumps, then persist progress
    let mut platformer = Session::new(PlatformerGame::new(PlatformerConfig::default()));
    platformer.start();
    platformer.input_mut().hold_direction(Direction::Right, true);
    for i in 0..900 {
        if i % 40 == 0 {
            platformer.input_mut().action_jump();
        }
        platformer.step(&mut feedback);
    }
    let snap = platformer.game.snapshot();
    log::info!(
        "platformer after {} ticks: level {}, lives {}, phase {:?}",
        platformer.ticks(),
        snap.level,
        snap.lives,
        snap.phase
    );

    let mut store = ProgressStore::new(FileStore::new(std::env::temp_dir().join("arcade-hub")));
    if let Err(err) = store.save("platformer", platformer.game.progress()) {
        log::warn!("could not save progress: {err}");
    }
    match store.load("platformer") {
        Ok(Some(progress)) => log::info!(
            "saved progress reads back: level {}, {} lives",
            progress.level,
            progress.lives
        ),
        Ok(None) => log::info!("no saved progress found"),
        Err(err) => log::warn!("could not load progress: {err}"),
    }
}
