//! Service integration tests.
//!
//! Exercise `GameService` the way a controller would: per-user games,
//! ownership checks, prize crediting and the clock-driven time limit.

mod common;

use chrono::{Duration, Utc};
use money_ladder::core::{GameConfig, GameError, GameId, ManualClock, UserId};
use money_ladder::game::{Game, GameFactory, GameStatus, HelpKind, Letter};
use money_ladder::questions::InMemoryQuestionBank;
use money_ladder::service::{Accounts, GameService, InMemoryAccounts};

use common::generate_questions;

type TestService = GameService<InMemoryQuestionBank, InMemoryAccounts, ManualClock>;

fn service() -> TestService {
    let factory = GameFactory::new(GameConfig::default(), 2024).unwrap();
    GameService::new(
        factory,
        generate_questions(15, 3),
        InMemoryAccounts::new(),
        ManualClock::new(Utc::now()),
    )
}

fn correct(service: &TestService, user: UserId, id: GameId) -> Letter {
    service
        .game(user, id)
        .unwrap()
        .current_game_question()
        .unwrap()
        .correct_answer_key()
}

fn wrong(service: &TestService, user: UserId, id: GameId) -> Letter {
    let right = correct(service, user, id);
    Letter::ALL.into_iter().find(|&l| l != right).unwrap()
}

fn climb(service: &mut TestService, user: UserId, id: GameId, levels: u32) {
    for _ in 0..levels {
        let letter = correct(service, user, id);
        let outcome = service.answer(user, id, letter).unwrap();
        assert!(outcome.correct);
    }
}

// =============================================================================
// Creating Games
// =============================================================================

#[test]
fn test_create_game() {
    let mut service = service();
    let user = UserId::new(1);

    let game = service.create_game(user).unwrap();
    let id = game.id();
    assert_eq!(game.user(), user);
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.current_level(), 0);

    assert_eq!(service.current_game(user).map(Game::id), Some(id));
}

/// A user can only have one unfinished game.
#[test]
fn test_second_game_refused() {
    let mut service = service();
    let user = UserId::new(1);
    let first = service.create_game(user).unwrap().id();

    let err = service.create_game(user).unwrap_err();
    assert!(matches!(err, GameError::GameInProgress(id) if id == first));
    assert_eq!(service.games_for(user).len(), 1);

    // Other users are unaffected.
    assert!(service.create_game(UserId::new(2)).is_ok());
}

/// After a game ends a new one can start.
#[test]
fn test_new_game_after_finish() {
    let mut service = service();
    let user = UserId::new(1);
    let first = service.create_game(user).unwrap().id();
    let letter = wrong(&service, user, first);
    service.answer(user, first, letter).unwrap();

    let second = service.create_game(user).unwrap().id();
    assert_ne!(first, second);

    let ids: Vec<GameId> = service.games_for(user).iter().map(|g| g.id()).collect();
    assert_eq!(ids, vec![second, first]);
}

// =============================================================================
// Ownership
// =============================================================================

#[test]
fn test_other_users_game_refused() {
    let mut service = service();
    let owner = UserId::new(1);
    let intruder = UserId::new(2);
    let id = service.create_game(owner).unwrap().id();

    assert!(matches!(service.game(intruder, id), Err(GameError::NotOwner(_))));
    assert!(matches!(service.snapshot(intruder, id), Err(GameError::NotOwner(_))));
    assert!(matches!(
        service.answer(intruder, id, Letter::A),
        Err(GameError::NotOwner(_))
    ));
    assert!(matches!(
        service.use_help(intruder, id, HelpKind::FiftyFifty),
        Err(GameError::NotOwner(_))
    ));
    assert!(matches!(service.take_money(intruder, id), Err(GameError::NotOwner(_))));

    // The owner's game is untouched.
    let game = service.game(owner, id).unwrap();
    assert_eq!(game.status(), GameStatus::InProgress);
    assert!(!game.fifty_fifty_used());
}

#[test]
fn test_unknown_game() {
    let service = service();
    let err = service.game(UserId::new(1), GameId::new(404)).unwrap_err();
    assert!(matches!(err, GameError::GameNotFound(id) if id == GameId::new(404)));
}

// =============================================================================
// Prizes
// =============================================================================

/// Taking the money at level 2 credits 200.
#[test]
fn test_take_money_credits_balance() {
    let mut service = service();
    let user = UserId::new(1);
    let id = service.create_game(user).unwrap().id();
    climb(&mut service, user, id, 2);

    let outcome = service.take_money(user, id).unwrap();

    assert_eq!(outcome.status, GameStatus::Money);
    assert_eq!(outcome.prize, 200);
    assert_eq!(service.accounts().balance(user), 200);

    // A second take is refused and credits nothing.
    assert!(matches!(service.take_money(user, id), Err(GameError::GameFinished)));
    assert_eq!(service.accounts().balance(user), 200);
}

#[test]
fn test_take_money_at_start_refused() {
    let mut service = service();
    let user = UserId::new(1);
    let id = service.create_game(user).unwrap().id();

    assert!(matches!(service.take_money(user, id), Err(GameError::NothingToTake)));
    assert_eq!(service.accounts().balance(user), 0);
    assert!(service.current_game(user).is_some());
}

/// A wrong answer past the first checkpoint credits the checkpoint prize.
#[test]
fn test_wrong_answer_credits_fireproof() {
    let mut service = service();
    let user = UserId::new(1);
    let id = service.create_game(user).unwrap().id();
    climb(&mut service, user, id, 7);

    let letter = wrong(&service, user, id);
    let outcome = service.answer(user, id, letter).unwrap();

    assert!(!outcome.correct);
    assert!(!outcome.continues);
    assert_eq!(outcome.status, GameStatus::Fail);
    assert_eq!(outcome.prize, 1_000);
    assert_eq!(service.accounts().balance(user), 1_000);
}

/// Winning the game credits the top prize once.
#[test]
fn test_win_credits_top_prize() {
    let mut service = service();
    let user = UserId::new(1);
    let id = service.create_game(user).unwrap().id();
    climb(&mut service, user, id, 15);

    let snapshot = service.snapshot(user, id).unwrap();
    assert_eq!(snapshot.status, GameStatus::Won);
    assert!(snapshot.current_question.is_none());
    assert_eq!(service.accounts().balance(user), 1_000_000);

    let outcome = service.answer(user, id, Letter::A).unwrap();
    assert!(!outcome.correct);
    assert_eq!(service.accounts().balance(user), 1_000_000);
}

/// An early wrong answer ends the game without touching the balance.
#[test]
fn test_early_fail_credits_nothing() {
    let mut service = service();
    let user = UserId::new(1);
    let id = service.create_game(user).unwrap().id();

    let letter = wrong(&service, user, id);
    let outcome = service.answer(user, id, letter).unwrap();

    assert_eq!(outcome.status, GameStatus::Fail);
    assert_eq!(outcome.prize, 0);
    assert_eq!(service.accounts().balance(user), 0);
}

// =============================================================================
// Time Limit
// =============================================================================

/// Acting after 35 minutes ends the game as a timeout.
#[test]
fn test_answer_after_time_limit() {
    let mut service = service();
    let user = UserId::new(1);
    let id = service.create_game(user).unwrap().id();
    climb(&mut service, user, id, 10);

    service.clock().advance(Duration::minutes(36));
    let letter = correct(&service, user, id);
    let outcome = service.answer(user, id, letter).unwrap();

    assert!(!outcome.correct);
    assert_eq!(outcome.status, GameStatus::Timeout);
    assert_eq!(outcome.prize, 32_000);
    assert_eq!(service.accounts().balance(user), 32_000);
}

/// A help past the limit is still granted; the next answer times out.
#[test]
fn test_help_after_time_limit() {
    let mut service = service();
    let user = UserId::new(1);
    let id = service.create_game(user).unwrap().id();
    climb(&mut service, user, id, 5);

    service.clock().advance(Duration::minutes(40));
    let outcome = service.use_help(user, id, HelpKind::FriendCall).unwrap();

    assert_eq!(outcome.status, GameStatus::InProgress);
    assert!(outcome.payload.as_friend_call().is_some());
    assert_eq!(service.current_game(user).map(Game::id), Some(id));
    assert_eq!(service.accounts().balance(user), 0);

    let letter = correct(&service, user, id);
    let answer = service.answer(user, id, letter).unwrap();
    assert_eq!(answer.status, GameStatus::Timeout);
    assert_eq!(answer.current_level, 5);
    assert_eq!(service.accounts().balance(user), 1_000);
}

/// Just under the limit the game carries on.
#[test]
fn test_answer_just_before_time_limit() {
    let mut service = service();
    let user = UserId::new(1);
    let id = service.create_game(user).unwrap().id();

    service.clock().advance(Duration::minutes(35) - Duration::seconds(1));
    let letter = correct(&service, user, id);
    let outcome = service.answer(user, id, letter).unwrap();

    assert!(outcome.correct);
    assert!(outcome.continues);
    assert_eq!(outcome.current_level, 1);
}

// =============================================================================
// Helps and Persistence
// =============================================================================

#[test]
fn test_use_help_through_service() {
    let mut service = service();
    let user = UserId::new(1);
    let id = service.create_game(user).unwrap().id();

    let outcome = service.use_help(user, id, HelpKind::AudienceHelp).unwrap();
    assert_eq!(outcome.status, GameStatus::InProgress);
    assert_eq!(outcome.payload.as_audience().unwrap().len(), 4);

    let err = service.use_help(user, id, HelpKind::AudienceHelp).unwrap_err();
    assert!(matches!(err, GameError::HelpAlreadyUsed(HelpKind::AudienceHelp)));

    let snapshot = service.snapshot(user, id).unwrap();
    assert!(snapshot.helps.audience_help);
    assert!(!snapshot.helps.fifty_fifty);
}

/// A persisted game can be loaded into a fresh service and played on.
#[test]
fn test_restore_game() {
    let mut original = service();
    let user = UserId::new(1);
    let id = original.create_game(user).unwrap().id();
    climb(&mut original, user, id, 3);
    let bytes = original.game(user, id).unwrap().to_bytes().unwrap();

    let mut restored = service();
    restored.restore_game(Game::from_bytes(&bytes).unwrap());

    assert_eq!(
        restored.snapshot(user, id).unwrap(),
        original.snapshot(user, id).unwrap()
    );
    assert!(matches!(restored.create_game(user), Err(GameError::GameInProgress(_))));

    let outcome = restored.take_money(user, id).unwrap();
    assert_eq!(outcome.prize, 300);
    assert_eq!(restored.accounts().balance(user), 300);

    // New ids do not collide with the restored one.
    let next = restored.create_game(user).unwrap().id();
    assert!(next > id);
}
