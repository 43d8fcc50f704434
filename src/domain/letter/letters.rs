use serde::Serialize;
use std::ops;

use crate::Letter;

/// Represents the list of letters.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Letters {
    pub letters: Vec<Letter>,
}

impl Letters {
    /// Finds a letter by its identifier.
    pub fn find(&self, id: &str) -> Option<&Letter> {
        self.iter().find(|letter| letter.id == id)
    }

    /// Sorts the letters by timestamp, most recent first. Letters
    /// sharing the same timestamp keep their relative order.
    pub fn sort_newest_first(&mut self) {
        self.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }

    /// Sorts the letters by timestamp, oldest first. Letters sharing
    /// the same timestamp keep their relative order.
    pub fn sort_oldest_first(&mut self) {
        self.sort_by_key(|letter| letter.timestamp);
    }
}

impl ops::Deref for Letters {
    type Target = Vec<Letter>;

    fn deref(&self) -> &Self::Target {
        &self.letters
    }
}

impl ops::DerefMut for Letters {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.letters
    }
}

impl From<Vec<Letter>> for Letters {
    fn from(letters: Vec<Letter>) -> Self {
        Self { letters }
    }
}

impl FromIterator<Letter> for Letters {
    fn from_iter<T: IntoIterator<Item = Letter>>(iter: T) -> Self {
        Self {
            letters: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Letters {
    type Item = Letter;
    type IntoIter = std::vec::IntoIter<Letter>;

    fn into_iter(self) -> Self::IntoIter {
        self.letters.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Letter, Letters};

    fn letter(id: &str, timestamp: i64) -> Letter {
        Letter {
            id: id.into(),
            timestamp,
            ..Letter::default()
        }
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let mut letters = Letters::from(vec![
            letter("a", 100),
            letter("b", 200),
            letter("c", 100),
            letter("d", 200),
        ]);

        letters.sort_newest_first();
        let ids: Vec<_> = letters.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(vec!["b", "d", "a", "c"], ids);

        letters.sort_oldest_first();
        let ids: Vec<_> = letters.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(vec!["a", "c", "b", "d"], ids);
    }
}
