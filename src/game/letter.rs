//! Presentation letters and the letter → answer slot permutation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameRng, Result};
use crate::questions::ANSWER_COUNT;

/// Letter an answer is shown under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    /// All letters in presentation order.
    pub const ALL: [Letter; ANSWER_COUNT] = [Letter::A, Letter::B, Letter::C, Letter::D];

    /// Position in presentation order (a = 0).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Letter at a presentation position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lowercase character, as submitted by players.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Letter::A => 'a',
            Letter::B => 'b',
            Letter::C => 'c',
            Letter::D => 'd',
        }
    }

    /// Uppercase character, as spoken in help texts.
    #[must_use]
    pub const fn upper(self) -> char {
        self.as_char().to_ascii_uppercase()
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Letter {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Letter::A),
            "b" => Ok(Letter::B),
            "c" => Ok(Letter::C),
            "d" => Ok(Letter::D),
            _ => Err(GameError::InvalidLetter(s.to_string())),
        }
    }
}

/// Fixed bijection from letters to intrinsic answer slots.
///
/// `slots[letter.index()]` is the slot shown under `letter`. Chosen once
/// when a `GameQuestion` is built and never recomputed, so what the player
/// saw is exactly what gets graded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; ANSWER_COUNT]", into = "[u8; ANSWER_COUNT]")]
pub struct AnswerKeyMap {
    slots: [u8; ANSWER_COUNT],
}

impl AnswerKeyMap {
    /// The unshuffled map: a → slot 0, b → slot 1, ...
    #[must_use]
    pub const fn identity() -> Self {
        Self { slots: [0, 1, 2, 3] }
    }

    /// A uniformly random permutation.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut slots = [0, 1, 2, 3];
        rng.shuffle(&mut slots);
        Self { slots }
    }

    /// Build from explicit slots.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidAnswerKeyMap` unless `slots` is a
    /// permutation of `0..4`.
    pub fn from_slots(slots: [u8; ANSWER_COUNT]) -> Result<Self> {
        let mut seen = [false; ANSWER_COUNT];
        for &slot in &slots {
            let slot = slot as usize;
            if slot >= ANSWER_COUNT || seen[slot] {
                return Err(GameError::InvalidAnswerKeyMap);
            }
            seen[slot] = true;
        }
        Ok(Self { slots })
    }

    /// Slot shown under `letter`.
    #[must_use]
    pub fn slot_for(&self, letter: Letter) -> u8 {
        self.slots[letter.index()]
    }

    /// Letter showing `slot`, `None` if the slot is out of range.
    #[must_use]
    pub fn letter_for_slot(&self, slot: u8) -> Option<Letter> {
        self.slots
            .iter()
            .position(|&s| s == slot)
            .and_then(Letter::from_index)
    }

    /// Raw slots in letter order.
    #[must_use]
    pub fn slots(&self) -> [u8; ANSWER_COUNT] {
        self.slots
    }
}

impl TryFrom<[u8; ANSWER_COUNT]> for AnswerKeyMap {
    type Error = GameError;

    fn try_from(slots: [u8; ANSWER_COUNT]) -> Result<Self> {
        Self::from_slots(slots)
    }
}

impl From<AnswerKeyMap> for [u8; ANSWER_COUNT] {
    fn from(map: AnswerKeyMap) -> Self {
        map.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_parse() {
        assert_eq!("a".parse::<Letter>().unwrap(), Letter::A);
        assert_eq!(" D ".parse::<Letter>().unwrap(), Letter::D);
        assert!(matches!("e".parse::<Letter>(), Err(GameError::InvalidLetter(s)) if s == "e"));
        assert!("".parse::<Letter>().is_err());
        assert!("ab".parse::<Letter>().is_err());
    }

    #[test]
    fn test_letter_chars() {
        assert_eq!(Letter::C.as_char(), 'c');
        assert_eq!(Letter::C.upper(), 'C');
        assert_eq!(format!("{}", Letter::B), "b");
        assert_eq!(Letter::from_index(3), Some(Letter::D));
        assert_eq!(Letter::from_index(4), None);
    }

    #[test]
    fn test_from_slots_validates() {
        assert!(AnswerKeyMap::from_slots([1, 0, 3, 2]).is_ok());
        assert!(AnswerKeyMap::from_slots([0, 0, 1, 2]).is_err());
        assert!(AnswerKeyMap::from_slots([0, 1, 2, 4]).is_err());
    }

    #[test]
    fn test_lookup_both_ways() {
        let map = AnswerKeyMap::from_slots([1, 0, 3, 2]).unwrap();
        assert_eq!(map.slot_for(Letter::A), 1);
        assert_eq!(map.letter_for_slot(0), Some(Letter::B));
        assert_eq!(map.letter_for_slot(3), Some(Letter::C));
        assert_eq!(map.letter_for_slot(9), None);
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let mut rng = GameRng::new(42);
        for _ in 0..50 {
            let map = AnswerKeyMap::shuffled(&mut rng);
            assert!(AnswerKeyMap::from_slots(map.slots()).is_ok());
        }
    }

    #[test]
    fn test_deserialize_rejects_non_permutation() {
        let ok: AnswerKeyMap = serde_json::from_str("[3, 2, 1, 0]").unwrap();
        assert_eq!(ok.slot_for(Letter::A), 3);

        assert!(serde_json::from_str::<AnswerKeyMap>("[1, 1, 1, 1]").is_err());
    }
}
