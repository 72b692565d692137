use std::sync::Arc;
use std::time::Duration;

use actix::prelude::*;

use crate::error::GameError;
use crate::game::entities::Unit;
use crate::game::grid::Board;
use crate::game::level::Level;
use crate::game::systems::PlayerCollisions;
use crate::game::types::{Direction, Position, UnitId};
use crate::session::GameSession;
use crate::session::messages::*;

#[derive(Default)]
struct Collector {
    updates: Vec<SessionUpdate>,
}

impl Actor for Collector {
    type Context = Context<Self>;
}

impl Handler<SessionUpdate> for Collector {
    type Result = ();

    fn handle(&mut self, msg: SessionUpdate, _: &mut Context<Self>) -> Self::Result {
        self.updates.push(msg);
    }
}

#[derive(Message)]
#[rtype(result = "Vec<SessionUpdate>")]
struct TakeUpdates;

impl Handler<TakeUpdates> for Collector {
    type Result = MessageResult<TakeUpdates>;

    fn handle(&mut self, _: TakeUpdates, _: &mut Context<Self>) -> Self::Result {
        MessageResult(std::mem::take(&mut self.updates))
    }
}

#[derive(Message)]
#[rtype(result = "()")]
struct Leave;

impl Handler<Leave> for Collector {
    type Result = ();

    fn handle(&mut self, _: Leave, ctx: &mut Context<Self>) -> Self::Result {
        ctx.stop();
    }
}

/// Row of three squares: player starts left, one pellet in the middle.
fn corridor_level() -> Level {
    let mut board = Board::new(3, 1);
    board.spawn(Unit::pellet(10), Position::new(1, 0));
    Level::new(
        board,
        Vec::new(),
        vec![Position::new(0, 0)],
        Arc::new(PlayerCollisions),
    )
}

fn corridor_session() -> Addr<GameSession> {
    GameSession::new(corridor_level()).start()
}

async fn subscribe(session: &Addr<GameSession>) -> Addr<Collector> {
    let collector = Collector::default().start();
    session
        .send(Subscribe(collector.clone().recipient()))
        .await
        .unwrap();
    collector
}

#[actix::test]
async fn test_join_places_player_on_start_square() {
    let session = corridor_session();
    let player = session.send(JoinPlayer).await.unwrap();

    let snapshot = session.send(GetSnapshot).await.unwrap();
    assert!(!snapshot.running);
    assert_eq!(snapshot.remaining_pellets, 1);
    assert_eq!(
        snapshot.players,
        vec![PlayerSnapshot {
            id: player,
            position: Some(Position::new(0, 0)),
            alive: true,
            score: 0,
        }]
    );
}

#[actix::test]
async fn test_unknown_player_rejected() {
    let session = corridor_session();
    session.send(JoinPlayer).await.unwrap();
    assert!(session.send(StartGame).await.unwrap());

    let stranger = UnitId::new();
    let result = session
        .send(MovePlayer { player: stranger, direction: Direction::Right })
        .await
        .unwrap();

    assert!(matches!(result, Err(GameError::UnknownPlayer(id)) if id == stranger));
}

#[actix::test]
async fn test_move_on_stopped_game_is_ignored() {
    let session = corridor_session();
    let player = session.send(JoinPlayer).await.unwrap();

    session
        .send(MovePlayer { player, direction: Direction::Right })
        .await
        .unwrap()
        .unwrap();

    let snapshot = session.send(GetSnapshot).await.unwrap();
    assert_eq!(snapshot.players[0].position, Some(Position::new(0, 0)));
    assert_eq!(snapshot.remaining_pellets, 1);
}

#[actix::test]
async fn test_winning_stops_level_and_broadcasts_once() {
    let session = corridor_session();
    let collector = subscribe(&session).await;
    let player = session.send(JoinPlayer).await.unwrap();
    assert!(session.send(StartGame).await.unwrap());

    session
        .send(MovePlayer { player, direction: Direction::Right })
        .await
        .unwrap()
        .unwrap();

    // The outcome message from the level is queued ahead of this request.
    let snapshot = session.send(GetSnapshot).await.unwrap();
    assert!(!snapshot.running);
    assert_eq!(snapshot.outcome, Some(Outcome::Won));
    assert_eq!(snapshot.remaining_pellets, 0);
    assert_eq!(snapshot.players[0].score, 10);

    // A repeated notification is absorbed.
    session.send(LevelOutcome(Outcome::Won)).await.unwrap();

    let updates = collector.send(TakeUpdates).await.unwrap();
    assert_eq!(
        updates,
        vec![SessionUpdate::Started, SessionUpdate::Finished(Outcome::Won)]
    );
}

#[actix::test]
async fn test_ghost_collision_loses_game() {
    let mut board = Board::new(3, 1);
    board.spawn(Unit::pellet(10), Position::new(2, 0));
    board.spawn(Unit::ghost(), Position::new(1, 0));
    let level = Level::new(
        board,
        Vec::new(),
        vec![Position::new(0, 0)],
        Arc::new(PlayerCollisions),
    );
    let session = GameSession::new(level).start();
    let player = session.send(JoinPlayer).await.unwrap();
    assert!(session.send(StartGame).await.unwrap());

    session
        .send(MovePlayer { player, direction: Direction::Right })
        .await
        .unwrap()
        .unwrap();

    let snapshot = session.send(GetSnapshot).await.unwrap();
    assert_eq!(snapshot.outcome, Some(Outcome::Lost));
    assert!(!snapshot.running);
    assert!(!snapshot.players[0].alive);
}

#[actix::test]
async fn test_finished_level_does_not_start() {
    let level = Level::new(
        Board::new(2, 2),
        Vec::new(),
        vec![Position::new(0, 0)],
        Arc::new(PlayerCollisions),
    );
    let session = GameSession::new(level).start();
    session.send(JoinPlayer).await.unwrap();

    assert!(!session.send(StartGame).await.unwrap());
    assert!(!session.send(GetSnapshot).await.unwrap().running);
}

#[actix::test]
async fn test_start_and_stop_broadcast() {
    let session = corridor_session();
    let collector = subscribe(&session).await;
    session.send(JoinPlayer).await.unwrap();

    assert!(session.send(StartGame).await.unwrap());
    assert!(session.send(StartGame).await.unwrap());
    session.send(StopGame).await.unwrap();
    session.send(StopGame).await.unwrap();

    let updates = collector.send(TakeUpdates).await.unwrap();
    assert_eq!(updates, vec![SessionUpdate::Started, SessionUpdate::Stopped]);
}

#[actix::test]
async fn test_broadcast_forgets_stopped_subscribers() {
    let mut session = GameSession::new(corridor_level());
    let staying = Collector::default().start();
    let leaving = Collector::default().start();
    session.subscribe(staying.clone().recipient());
    session.subscribe(leaving.clone().recipient());

    leaving.send(Leave).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    session.broadcast(SessionUpdate::Started);
    assert_eq!(session.subscriber_count(), 1);

    session.broadcast(SessionUpdate::Stopped);
    let updates = staying.send(TakeUpdates).await.unwrap();
    assert_eq!(updates, vec![SessionUpdate::Started, SessionUpdate::Stopped]);
}
