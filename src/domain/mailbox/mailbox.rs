//! Mailbox module.
//!
//! This module contains the projection of the flat list of letters
//! fetched from the remote collection into the mailbox of a reader:
//! the letters they wrote, the letters they answered and the answers
//! they received, plus the grouping of those letters into threads.

use log::{debug, trace};
use serde::Serialize;
use std::{
    collections::{HashMap, HashSet},
    ops,
};

use crate::{Letter, Letters, Threads};

/// Represents the mailbox of a reader.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Mailbox {
    /// Represents the letters of the mailbox, most recent first.
    pub letters: Letters,
    /// Represents the replies grouped by root letter.
    pub threads: Threads,
}

impl Mailbox {
    /// Iterates over the root letters of the mailbox along with their
    /// replies, most recent root first. This is the order the inbox
    /// is displayed in.
    pub fn threads_in_order(&self) -> impl Iterator<Item = (&Letter, &Letters)> {
        self.letters.iter().filter_map(move |letter| {
            self.threads
                .get(&letter.id)
                .filter(|_| letter.is_root())
                .map(|replies| (letter, replies))
        })
    }

    /// Gets the whole conversation started by the given root letter:
    /// the root first, then its replies oldest first.
    pub fn thread(&self, root_id: &str) -> Option<Letters> {
        let replies = self.threads.replies(root_id)?;
        let root = self
            .letters
            .iter()
            .find(|letter| letter.id == root_id && letter.is_root())?;

        Some(
            std::iter::once(root)
                .chain(replies.iter())
                .cloned()
                .collect(),
        )
    }
}

impl ops::Deref for Mailbox {
    type Target = Letters;

    fn deref(&self) -> &Self::Target {
        &self.letters
    }
}

/// Projects the given letters into the mailbox of `self_id`.
///
/// Letters without identifier or sender, and letters whose
/// identifier belongs to `excluded_ids`, are discarded first. A
/// remaining letter with a non-empty body belongs to the mailbox if
/// it was written by `self_id`, if it answers a root letter written
/// by `self_id`, or if it is the letter a reply of `self_id` answers.
/// Membership is not transitive: only letters directly connected to
/// a letter of `self_id` get in.
pub fn project(letters: &[Letter], self_id: &str, excluded_ids: &HashSet<String>) -> Mailbox {
    debug!("projecting {} letters for {}", letters.len(), self_id);
    debug!("excluded letters: {:?}", excluded_ids);

    let letters: Vec<&Letter> = letters
        .iter()
        .filter(|letter| letter.is_identified() && !excluded_ids.contains(&letter.id))
        .collect();

    let mut my_root_ids: HashSet<&str> = HashSet::new();
    let mut my_reply_parents: HashSet<&str> = HashSet::new();

    for letter in letters.iter().filter(|letter| letter.is_from(self_id)) {
        match letter.parent() {
            None => my_root_ids.insert(letter.id.as_str()),
            Some(parent) => my_reply_parents.insert(parent),
        };
    }

    trace!("own root letters: {:?}", my_root_ids);
    trace!("answered letters: {:?}", my_reply_parents);

    let mut mailbox: Letters = letters
        .into_iter()
        .filter(|letter| {
            let is_mine = letter.is_from(self_id);
            let answers_mine = letter
                .parent()
                .map(|parent| my_root_ids.contains(parent))
                .unwrap_or(false);
            let is_answered = my_reply_parents.contains(letter.id.as_str());
            (is_mine || answers_mine || is_answered) && letter.has_body()
        })
        .cloned()
        .collect();

    mailbox.sort_newest_first();
    debug!("mailbox len: {}", mailbox.len());

    let threads = group(&mailbox);
    debug!("threads len: {}", threads.len());

    Mailbox {
        letters: mailbox,
        threads,
    }
}

/// Groups the replies of the mailbox under their root letter. Replies
/// answering a letter that is not a root of the mailbox stay out of
/// the threads.
fn group(mailbox: &Letters) -> Threads {
    let mut threads: HashMap<String, Letters> = mailbox
        .iter()
        .filter(|letter| letter.is_root())
        .map(|letter| (letter.id.clone(), Letters::default()))
        .collect();

    for letter in mailbox.iter() {
        if let Some(parent) = letter.parent() {
            match threads.get_mut(parent) {
                Some(replies) => replies.push(letter.clone()),
                None => trace!("orphan reply {} to {}", letter.id, parent),
            }
        }
    }

    for replies in threads.values_mut() {
        replies.sort_oldest_first();
    }

    Threads(threads)
}
