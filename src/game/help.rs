//! Helps: one-time actions that reveal information about the current
//! question without changing its answer.
//!
//! ## Kinds
//!
//! - `FiftyFifty`: two letters remain, the correct one and one decoy
//! - `AudienceHelp`: a simulated vote share for every letter
//! - `FriendCall`: a friend's (usually right) guess, as free text
//!
//! `HelpEngine` produces payloads; `HelpHash` stores them per question and
//! refuses to store a kind twice.

use std::collections::BTreeMap;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::letter::Letter;
use crate::core::{GameError, GameRng, HelpConfig, Result};

/// Help kinds a player can spend once per game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpKind {
    FiftyFifty,
    AudienceHelp,
    FriendCall,
}

impl HelpKind {
    /// All help kinds.
    pub const ALL: [HelpKind; 3] = [HelpKind::FiftyFifty, HelpKind::AudienceHelp, HelpKind::FriendCall];

    /// Wire name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HelpKind::FiftyFifty => "fifty_fifty",
            HelpKind::AudienceHelp => "audience_help",
            HelpKind::FriendCall => "friend_call",
        }
    }
}

impl std::fmt::Display for HelpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HelpKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        HelpKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| GameError::UnknownHelpKind(s.to_string()))
    }
}

/// Result of a help, as shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HelpPayload {
    /// The two letters left on the board, in presentation order.
    FiftyFifty(SmallVec<[Letter; 2]>),
    /// Vote percentage per letter, summing to 100.
    AudienceHelp(BTreeMap<Letter, u32>),
    /// What the friend said.
    FriendCall(String),
}

impl HelpPayload {
    /// The kind this payload belongs to.
    #[must_use]
    pub fn kind(&self) -> HelpKind {
        match self {
            HelpPayload::FiftyFifty(_) => HelpKind::FiftyFifty,
            HelpPayload::AudienceHelp(_) => HelpKind::AudienceHelp,
            HelpPayload::FriendCall(_) => HelpKind::FriendCall,
        }
    }

    /// Remaining letters, if this is a fifty-fifty payload.
    #[must_use]
    pub fn as_fifty_fifty(&self) -> Option<&[Letter]> {
        match self {
            HelpPayload::FiftyFifty(letters) => Some(letters),
            _ => None,
        }
    }

    /// Vote distribution, if this is an audience payload.
    #[must_use]
    pub fn as_audience(&self) -> Option<&BTreeMap<Letter, u32>> {
        match self {
            HelpPayload::AudienceHelp(votes) => Some(votes),
            _ => None,
        }
    }

    /// Friend's message, if this is a friend-call payload.
    #[must_use]
    pub fn as_friend_call(&self) -> Option<&str> {
        match self {
            HelpPayload::FriendCall(text) => Some(text),
            _ => None,
        }
    }
}

/// Help payloads used on one game question, at most one per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HelpHash {
    entries: FxHashMap<HelpKind, HelpPayload>,
}

impl HelpHash {
    /// Create an empty help hash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a payload under its kind.
    ///
    /// # Errors
    ///
    /// Returns `GameError::HelpAlreadyUsed` if the kind is already present;
    /// the stored payload is left as it was.
    pub fn insert(&mut self, payload: HelpPayload) -> Result<&HelpPayload> {
        use std::collections::hash_map::Entry;

        match self.entries.entry(payload.kind()) {
            Entry::Occupied(entry) => Err(GameError::HelpAlreadyUsed(*entry.key())),
            Entry::Vacant(entry) => Ok(&*entry.insert(payload)),
        }
    }

    /// Payload for a kind.
    #[must_use]
    pub fn get(&self, kind: HelpKind) -> Option<&HelpPayload> {
        self.entries.get(&kind)
    }

    /// Check if a kind has been used.
    #[must_use]
    pub fn contains(&self, kind: HelpKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Number of helps used on this question.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no help has been used.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kinds used, in `HelpKind::ALL` order.
    pub fn kinds(&self) -> impl Iterator<Item = HelpKind> + '_ {
        HelpKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }

    /// Letters still on the board after fifty-fifty, if it was used.
    #[must_use]
    pub fn fifty_fifty(&self) -> Option<&[Letter]> {
        self.get(HelpKind::FiftyFifty).and_then(HelpPayload::as_fifty_fifty)
    }

    /// Audience votes, if the audience was asked.
    #[must_use]
    pub fn audience_help(&self) -> Option<&BTreeMap<Letter, u32>> {
        self.get(HelpKind::AudienceHelp).and_then(HelpPayload::as_audience)
    }

    /// The friend's message, if the friend was called.
    #[must_use]
    pub fn friend_call(&self) -> Option<&str> {
        self.get(HelpKind::FriendCall).and_then(HelpPayload::as_friend_call)
    }
}

/// Generates help payloads from the correct letter and a random source.
#[derive(Clone, Copy, Debug)]
pub struct HelpEngine<'a> {
    config: &'a HelpConfig,
}

impl<'a> HelpEngine<'a> {
    /// Create an engine using the given tuning.
    #[must_use]
    pub fn new(config: &'a HelpConfig) -> Self {
        Self { config }
    }

    /// Generate the payload for `kind`.
    pub fn generate(&self, kind: HelpKind, correct: Letter, rng: &mut GameRng) -> HelpPayload {
        match kind {
            HelpKind::FiftyFifty => self.fifty_fifty(correct, rng),
            HelpKind::AudienceHelp => self.audience_help(correct, rng),
            HelpKind::FriendCall => self.friend_call(correct, rng),
        }
    }

    /// Keep the correct letter and one uniformly chosen wrong letter.
    pub fn fifty_fifty(&self, correct: Letter, rng: &mut GameRng) -> HelpPayload {
        let wrong = wrong_letters(correct);
        let decoy = wrong[rng.gen_range_usize(0..wrong.len())];

        let mut kept: SmallVec<[Letter; 2]> = SmallVec::new();
        kept.push(correct);
        kept.push(decoy);
        kept.sort();
        HelpPayload::FiftyFifty(kept)
    }

    /// Simulated audience vote.
    ///
    /// Every letter draws a base weight from `audience_base`; the correct
    /// letter gets an extra `audience_bonus`. Weights are turned into whole
    /// percentages with the largest-remainder method so they sum to 100.
    pub fn audience_help(&self, correct: Letter, rng: &mut GameRng) -> HelpPayload {
        let (base_lo, base_hi) = self.config.audience_base;
        let (bonus_lo, bonus_hi) = self.config.audience_bonus;

        let mut weights = [0u32; 4];
        for letter in Letter::ALL {
            weights[letter.index()] = rng.gen_range(base_lo..=base_hi);
        }
        let bonus = rng.gen_range(bonus_lo..=bonus_hi);
        weights[correct.index()] = weights[correct.index()].saturating_add(bonus);

        let shares = to_percentages(&weights);
        HelpPayload::AudienceHelp(Letter::ALL.into_iter().zip(shares).collect())
    }

    /// A friend names a letter: the correct one with `friend_accuracy`
    /// probability, otherwise a random wrong one.
    pub fn friend_call(&self, correct: Letter, rng: &mut GameRng) -> HelpPayload {
        let guess = if rng.gen_bool(self.config.friend_accuracy) {
            correct
        } else {
            let wrong = wrong_letters(correct);
            wrong[rng.gen_range_usize(0..wrong.len())]
        };
        let name = rng
            .choose(&self.config.friend_names)
            .map_or("A friend", String::as_str);

        HelpPayload::FriendCall(format!("{} thinks it is option {}", name, guess.upper()))
    }
}

fn wrong_letters(correct: Letter) -> SmallVec<[Letter; 3]> {
    Letter::ALL.into_iter().filter(|&l| l != correct).collect()
}

fn to_percentages(weights: &[u32; 4]) -> [u32; 4] {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return [25; 4];
    }

    let mut shares = [0u32; 4];
    let mut remainders = [(0u64, 0usize); 4];
    for (i, &w) in weights.iter().enumerate() {
        let scaled = u64::from(w) * 100;
        shares[i] = (scaled / total) as u32;
        remainders[i] = (scaled % total, i);
    }

    let missing = 100 - shares.iter().sum::<u32>();
    // Largest remainder first; ties go to the earlier letter.
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in remainders.iter().take(missing as usize) {
        shares[i] += 1;
    }
    shares
}
