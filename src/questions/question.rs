//! Question definitions - static quiz data.
//!
//! A `Question` is what the bank stores: prompt, four answers and the
//! intrinsic slot of the correct one. How the answers are lettered in a
//! particular game lives in `GameQuestion`, not here.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, QuestionId, Result};

/// Number of answer options every question carries.
pub const ANSWER_COUNT: usize = 4;

/// Static question definition.
///
/// ## Example
///
/// ```
/// use money_ladder::core::QuestionId;
/// use money_ladder::questions::Question;
///
/// let q = Question::new(
///     QuestionId::new(1),
///     0,
///     "Which planet is known as the red planet?",
///     "Mars",
///     ["Venus", "Jupiter", "Mercury"],
/// );
///
/// assert_eq!(q.correct_answer(), Some("Mars"));
/// assert_eq!(q.correct_slot, 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier inside a bank.
    pub id: QuestionId,

    /// Difficulty rank; games use one question per level.
    pub level: u32,

    /// Prompt shown to the player.
    pub text: String,

    /// The four answers in intrinsic (unshuffled) order.
    pub answers: [String; ANSWER_COUNT],

    /// Index into `answers` of the correct answer.
    pub correct_slot: u8,
}

impl Question {
    /// Create a question whose correct answer sits in slot 0.
    pub fn new<S: Into<String>>(
        id: QuestionId,
        level: u32,
        text: impl Into<String>,
        correct: impl Into<String>,
        wrong: [S; 3],
    ) -> Self {
        let [w1, w2, w3] = wrong;
        Self {
            id,
            level,
            text: text.into(),
            answers: [correct.into(), w1.into(), w2.into(), w3.into()],
            correct_slot: 0,
        }
    }

    /// Create a question with the correct answer at an explicit slot.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidQuestion` if `correct_slot` is not 0-3.
    pub fn with_correct_slot(
        id: QuestionId,
        level: u32,
        text: impl Into<String>,
        answers: [String; ANSWER_COUNT],
        correct_slot: u8,
    ) -> Result<Self> {
        let question = Self {
            id,
            level,
            text: text.into(),
            answers,
            correct_slot,
        };
        question.validate()?;
        Ok(question)
    }

    /// Check the question is well formed.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidQuestion` for an out-of-range correct
    /// slot or a blank prompt.
    pub fn validate(&self) -> Result<()> {
        if self.correct_slot as usize >= ANSWER_COUNT {
            return Err(GameError::InvalidQuestion(format!(
                "{}: correct slot {} out of range",
                self.id, self.correct_slot
            )));
        }
        if self.text.trim().is_empty() {
            return Err(GameError::InvalidQuestion(format!("{}: empty text", self.id)));
        }
        Ok(())
    }

    /// The correct answer's text, `None` if `correct_slot` is out of range.
    #[must_use]
    pub fn correct_answer(&self) -> Option<&str> {
        self.answers.get(self.correct_slot as usize).map(String::as_str)
    }

    /// Whether `slot` holds the correct answer.
    #[must_use]
    pub fn is_correct_slot(&self, slot: u8) -> bool {
        slot == self.correct_slot
    }
}
