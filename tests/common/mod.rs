//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use money_ladder::core::{GameConfig, QuestionId, UserId};
use money_ladder::game::{Game, GameFactory, Letter};
use money_ladder::questions::{InMemoryQuestionBank, Question};

/// Bank with `per_level` questions on each of `levels` levels.
pub fn generate_questions(levels: u32, per_level: u32) -> InMemoryQuestionBank {
    let mut bank = InMemoryQuestionBank::new();
    for level in 0..levels {
        for n in 0..per_level {
            let id = QuestionId::new(level * per_level + n);
            let question = Question::new(
                id,
                level,
                format!("Level {} question {}", level, n),
                format!("right {}", id.raw()),
                ["wrong one", "wrong two", "wrong three"],
            );
            bank.add(question).expect("fixture questions are valid");
        }
    }
    bank
}

/// A fresh default-ladder game created at `created_at`.
pub fn game_with_questions(user: UserId, created_at: DateTime<Utc>) -> Game {
    let bank = generate_questions(15, 2);
    let mut factory = GameFactory::new(GameConfig::default(), 42).expect("default config is valid");
    factory.create(user, &bank, created_at).expect("bank covers the ladder")
}

/// Correct letter of the current question.
pub fn correct_letter(game: &Game) -> Letter {
    game.current_game_question()
        .expect("game has a current question")
        .correct_answer_key()
}

/// Some letter other than the correct one.
pub fn wrong_letter(game: &Game) -> Letter {
    let correct = correct_letter(game);
    Letter::ALL
        .into_iter()
        .find(|&l| l != correct)
        .expect("three letters are wrong")
}

/// Answer correctly until `level` is the current level.
pub fn climb_to(game: &mut Game, level: u32, now: DateTime<Utc>) {
    while game.current_level() < level {
        let letter = correct_letter(game);
        assert!(game.answer_current_question(letter, now));
    }
}
