//! Questions and the banks that supply them.

pub mod question;
pub mod bank;

pub use question::{Question, ANSWER_COUNT};
pub use bank::{InMemoryQuestionBank, QuestionBank};
