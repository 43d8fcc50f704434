use serde::Serialize;
use std::{collections::HashMap, ops};

use crate::Letters;

/// Represents the replies of the mailbox, grouped by the identifier
/// of the root letter they answer. Every root letter of the mailbox
/// has an entry, even without replies. Replies are sorted oldest
/// first, for chronological reading.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Threads(pub HashMap<String, Letters>);

impl Threads {
    pub fn replies(&self, root_id: &str) -> Option<&Letters> {
        self.get(root_id)
    }
}

impl ops::Deref for Threads {
    type Target = HashMap<String, Letters>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ops::DerefMut for Threads {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
