//! Main entry point for the headless demo.
//!
//! Builds the demo level, wraps it in a game session actor, and plays it with random player
//! input while ghosts roam on their own schedules. Each step prints a JSON snapshot of the level.

use std::time::{Duration, Instant};

use actix::Actor;
use log::{info, warn};
use rand::Rng;

use pellet_chase::config::game::{DEMO_DURATION_SECS, DEMO_PLAYER_MOVE_MS};
use pellet_chase::error::GameError;
use pellet_chase::game::demo::build_demo_level;
use pellet_chase::game::types::Direction;
use pellet_chase::session::GameSession;
use pellet_chase::session::messages::{GetSnapshot, JoinPlayer, MovePlayer, StartGame, StopGame};

#[actix::main]
async fn main() -> Result<(), GameError> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    let session = GameSession::new(build_demo_level()).start();
    let player = session.send(JoinPlayer).await?;

    if !session.send(StartGame).await? {
        warn!("[Demo] Level could not be started");
        return Ok(());
    }

    let deadline = Instant::now() + Duration::from_secs(DEMO_DURATION_SECS);
    let mut ticker = tokio::time::interval(Duration::from_millis(DEMO_PLAYER_MOVE_MS));

    loop {
        ticker.tick().await;

        let direction = Direction::ALL[rand::rng().random_range(0..Direction::ALL.len())];
        if let Err(err) = session.send(MovePlayer { player, direction }).await? {
            warn!("[Demo] Move rejected: {}", err);
        }

        let snapshot = session.send(GetSnapshot).await?;
        match serde_json::to_string(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(err) => warn!("[Demo] Failed to serialize snapshot: {}", err),
        }

        if let Some(outcome) = snapshot.outcome {
            info!("[Demo] Level finished: {:?}", outcome);
            break;
        }
        if Instant::now() >= deadline {
            info!("[Demo] Time is up after {}s", DEMO_DURATION_SECS);
            session.send(StopGame).await?;
            break;
        }
    }

    Ok(())
}
