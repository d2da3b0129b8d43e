//! Question supply.
//!
//! The engine only ever asks a bank for "every question at level N". Where
//! the questions come from (database, file, seed data) is the host's
//! business; `InMemoryQuestionBank` covers tests and small deployments.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::question::Question;
use crate::core::{GameError, QuestionId, Result};

/// Read-only source of questions grouped by difficulty level.
pub trait QuestionBank {
    /// All questions at `level`. Empty if the bank has none.
    fn questions_at_level(&self, level: u32) -> Vec<Arc<Question>>;
}

impl<B: QuestionBank + ?Sized> QuestionBank for &B {
    fn questions_at_level(&self, level: u32) -> Vec<Arc<Question>> {
        (**self).questions_at_level(level)
    }
}

impl<B: QuestionBank + ?Sized> QuestionBank for Arc<B> {
    fn questions_at_level(&self, level: u32) -> Vec<Arc<Question>> {
        (**self).questions_at_level(level)
    }
}

/// Question bank held in memory.
///
/// ## Example
///
/// ```
/// use money_ladder::core::QuestionId;
/// use money_ladder::questions::{InMemoryQuestionBank, Question, QuestionBank};
///
/// let mut bank = InMemoryQuestionBank::new();
/// bank.add(Question::new(QuestionId::new(1), 0, "1 + 1?", "2", ["1", "3", "11"]))
///     .unwrap();
///
/// assert_eq!(bank.questions_at_level(0).len(), 1);
/// assert!(bank.questions_at_level(1).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryQuestionBank {
    by_level: FxHashMap<u32, Vec<Arc<Question>>>,
    ids: FxHashSet<QuestionId>,
}

impl InMemoryQuestionBank {
    /// Create a new empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bank from a list of questions.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid or duplicate question.
    pub fn from_questions(questions: impl IntoIterator<Item = Question>) -> Result<Self> {
        let mut bank = Self::new();
        for question in questions {
            bank.add(question)?;
        }
        Ok(bank)
    }

    /// Add a question.
    ///
    /// # Errors
    ///
    /// Returns `GameError::DuplicateQuestion` if the id is taken, or
    /// `GameError::InvalidQuestion` if the question is malformed.
    pub fn add(&mut self, question: Question) -> Result<()> {
        question.validate()?;
        if !self.ids.insert(question.id) {
            return Err(GameError::DuplicateQuestion(question.id));
        }
        self.by_level
            .entry(question.level)
            .or_default()
            .push(Arc::new(question));
        Ok(())
    }

    /// Total number of questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the bank is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Check if a question id is present.
    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of questions at `level`.
    #[must_use]
    pub fn count_at_level(&self, level: u32) -> usize {
        self.by_level.get(&level).map_or(0, Vec::len)
    }

    /// Whether every level in `0..ladder_len` has at least one question.
    #[must_use]
    pub fn covers(&self, ladder_len: usize) -> bool {
        (0..ladder_len as u32).all(|level| self.count_at_level(level) > 0)
    }
}

impl QuestionBank for InMemoryQuestionBank {
    fn questions_at_level(&self, level: u32) -> Vec<Arc<Question>> {
        self.by_level.get(&level).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, level: u32) -> Question {
        Question::new(QuestionId::new(id), level, format!("Q{}", id), "yes", ["no", "maybe", "never"])
    }

    #[test]
    fn test_add_and_query() {
        let mut bank = InMemoryQuestionBank::new();
        bank.add(question(1, 0)).unwrap();
        bank.add(question(2, 0)).unwrap();
        bank.add(question(3, 1)).unwrap();

        assert_eq!(bank.len(), 3);
        assert_eq!(bank.count_at_level(0), 2);
        assert_eq!(bank.questions_at_level(1)[0].id, QuestionId::new(3));
        assert!(bank.questions_at_level(2).is_empty());
        assert!(bank.contains(QuestionId::new(2)));
        assert!(!bank.contains(QuestionId::new(9)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut bank = InMemoryQuestionBank::new();
        bank.add(question(1, 0)).unwrap();

        let err = bank.add(question(1, 5)).unwrap_err();
        assert!(matches!(err, GameError::DuplicateQuestion(id) if id == QuestionId::new(1)));
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.count_at_level(5), 0);
    }

    #[test]
    fn test_invalid_question_rejected() {
        let mut bank = InMemoryQuestionBank::new();
        let mut bad = question(1, 0);
        bad.correct_slot = 7;

        assert!(matches!(bank.add(bad), Err(GameError::InvalidQuestion(_))));
        assert!(bank.is_empty());
    }

    #[test]
    fn test_covers() {
        let bank = InMemoryQuestionBank::from_questions((0..3).map(|l| question(l, l))).unwrap();
        assert!(bank.covers(3));
        assert!(!bank.covers(4));
    }

    #[test]
    fn test_bank_through_reference_and_arc() {
        let bank = InMemoryQuestionBank::from_questions(vec![question(1, 0)]).unwrap();

        fn count<B: QuestionBank>(bank: B) -> usize {
            bank.questions_at_level(0).len()
        }

        assert_eq!(count(&bank), 1);
        assert_eq!(count(Arc::new(bank)), 1);
    }
}
