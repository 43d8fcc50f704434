//! Receive module.
//!
//! This module contains the selection of the next letter a reader
//! receives: a root letter written by someone else, picked at random
//! among the letters the reader has not seen yet.

use log::debug;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::Letter;

/// Represents what identifies a letter as already seen.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeenKey {
    /// Letters are recognized by their body. Two different letters
    /// sharing the same text count as one.
    Body,
    /// Letters are recognized by their identifier.
    Id,
}

impl Default for SeenKey {
    fn default() -> Self {
        Self::Body
    }
}

/// Represents the letters already surfaced to the reader during the
/// session.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SeenLetters {
    key: SeenKey,
    keys: HashSet<String>,
}

impl SeenLetters {
    pub fn new(key: SeenKey) -> Self {
        Self {
            key,
            keys: HashSet::new(),
        }
    }

    fn key_of<'a>(&self, letter: &'a Letter) -> &'a str {
        match self.key {
            SeenKey::Body => &letter.body,
            SeenKey::Id => &letter.id,
        }
    }

    /// Marks the letter as seen. Returns `false` if it was already.
    pub fn insert(&mut self, letter: &Letter) -> bool {
        let key = self.key_of(letter).to_owned();
        self.keys.insert(key)
    }

    pub fn contains(&self, letter: &Letter) -> bool {
        self.keys.contains(self.key_of(letter))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Selects uniformly at random a root letter with a body and a hue,
/// written by someone other than `self_id`, and not seen yet.
/// Returns `None` when no letter qualifies.
pub fn select_unseen<'a, R>(
    letters: &'a [Letter],
    self_id: &str,
    seen: &SeenLetters,
    rng: &mut R,
) -> Option<&'a Letter>
where
    R: Rng + ?Sized,
{
    let candidates: Vec<&Letter> = letters
        .iter()
        .filter(|letter| {
            letter.is_root()
                && letter.has_body()
                && letter.has_hue()
                && !letter.is_from(self_id)
                && !seen.contains(letter)
        })
        .collect();

    debug!("unseen letters: {}", candidates.len());

    candidates.choose(rng).copied()
}
