//! Game session actor.
//!
//! Owns one level, relays player moves into it, and is the level's observer: the first win or
//! loss stops the level and is broadcast to subscribers. Repeated notifications from the level
//! are absorbed here.

use std::sync::Arc;

use actix::prelude::*;
use log::{debug, info};
use uuid::Uuid;

use crate::error::GameError;
use crate::game::entities::Unit;
use crate::game::level::{Level, LevelObserver};
use crate::session::messages::{
    GetSnapshot, JoinPlayer, LevelOutcome, LevelSnapshot, MovePlayer, Outcome, PlayerSnapshot,
    SessionUpdate, StartGame, StopGame, Subscribe,
};
use crate::session::observer::ActorObserver;

pub struct GameSession {
    pub game_id: Uuid,
    level: Arc<Level>,
    subscribers: Vec<Recipient<SessionUpdate>>,
    outcome: Option<Outcome>,
    observer: Option<Arc<dyn LevelObserver>>,
}

impl GameSession {
    pub fn new(level: Level) -> Self {
        Self {
            game_id: Uuid::new_v4(),
            level: Arc::new(level),
            subscribers: Vec::new(),
            outcome: None,
            observer: None,
        }
    }

    pub fn level(&self) -> &Arc<Level> {
        &self.level
    }

    pub fn subscribe(&mut self, subscriber: Recipient<SessionUpdate>) {
        self.subscribers.push(subscriber);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Sends `update` to every subscriber and forgets those whose actor has stopped.
    pub(crate) fn broadcast(&mut self, update: SessionUpdate) {
        debug!(
            "[GameSession] Broadcast {:?}: game_id={} subscribers={}",
            update,
            self.game_id,
            self.subscribers.len()
        );
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| match subscriber.try_send(update.clone()) {
            Ok(()) => true,
            Err(SendError::Full(update)) => {
                subscriber.do_send(update);
                true
            }
            Err(SendError::Closed(_)) => false,
        });
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            debug!("[GameSession] Dropped {} closed subscribers", dropped);
        }
    }

    fn snapshot(&self) -> LevelSnapshot {
        let remaining_pellets = self.level.remaining_pellets();
        let board = self.level.board().read().expect("board lock poisoned");
        let players = self
            .level
            .players()
            .into_iter()
            .map(|id| {
                let unit = board.unit(id);
                PlayerSnapshot {
                    id,
                    position: board.position_of(id),
                    alive: unit.is_some_and(Unit::is_alive_player),
                    score: unit.and_then(Unit::player_state).map_or(0, |state| state.score),
                }
            })
            .collect();

        LevelSnapshot {
            running: self.level.is_running(),
            remaining_pellets,
            players,
            outcome: self.outcome,
        }
    }
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let observer: Arc<dyn LevelObserver> = Arc::new(ActorObserver::new(&ctx.address()));
        self.level.add_observer(observer.clone());
        self.observer = Some(observer);
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        self.level.stop();
        if let Some(observer) = self.observer.take() {
            self.level.remove_observer(&observer);
        }
    }
}

impl Handler<JoinPlayer> for GameSession {
    type Result = MessageResult<JoinPlayer>;

    fn handle(&mut self, _: JoinPlayer, _: &mut Context<Self>) -> Self::Result {
        let player = self.level.create_player();
        self.level.register_player(player);
        info!("[GameSession] Player {} joined game {}", player, self.game_id);
        MessageResult(player)
    }
}

impl Handler<StartGame> for GameSession {
    type Result = MessageResult<StartGame>;

    fn handle(&mut self, _: StartGame, _: &mut Context<Self>) -> Self::Result {
        if self.level.is_running() {
            return MessageResult(true);
        }
        if !self.level.is_any_player_alive() || self.level.remaining_pellets() == 0 {
            info!("[GameSession] Game {} is already over, not starting", self.game_id);
            return MessageResult(false);
        }

        self.level.start();
        self.broadcast(SessionUpdate::Started);
        MessageResult(true)
    }
}

impl Handler<StopGame> for GameSession {
    type Result = ();

    fn handle(&mut self, _: StopGame, _: &mut Context<Self>) -> Self::Result {
        if !self.level.is_running() {
            return;
        }
        self.level.stop();
        self.broadcast(SessionUpdate::Stopped);
    }
}

impl Handler<MovePlayer> for GameSession {
    type Result = Result<(), GameError>;

    fn handle(&mut self, msg: MovePlayer, _: &mut Context<Self>) -> Self::Result {
        if !self.level.players().contains(&msg.player) {
            return Err(GameError::UnknownPlayer(msg.player));
        }
        self.level.move_unit(msg.player, msg.direction);
        Ok(())
    }
}

impl Handler<Subscribe> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: Subscribe, _: &mut Context<Self>) -> Self::Result {
        self.subscribe(msg.0);
    }
}

impl Handler<GetSnapshot> for GameSession {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.snapshot())
    }
}

impl Handler<LevelOutcome> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: LevelOutcome, _: &mut Context<Self>) -> Self::Result {
        self.level.stop();
        if self.outcome.is_some() {
            debug!("[GameSession] Repeated outcome {:?} ignored", msg.0);
            return;
        }
        info!("[GameSession] Game {} finished: {:?}", self.game_id, msg.0);
        self.outcome = Some(msg.0);
        self.broadcast(SessionUpdate::Finished(msg.0));
    }
}
