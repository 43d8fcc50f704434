use serde::Serialize;

use crate::Letter;

/// Represents a letter flagged for moderation by a reader.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Represents the identifier of the reported letter.
    pub letter_id: String,
    /// Represents the identity of the reader who reported it.
    pub reporter_id: String,
    /// Represents the complaint. The reported body is reused as is.
    pub explanation: String,
}

impl Report {
    /// Builds the report of the given letter, using its body as
    /// explanation.
    pub fn new<R: ToString>(letter: &Letter, reporter_id: R) -> Self {
        Self {
            letter_id: letter.id.clone(),
            reporter_id: reporter_id.to_string(),
            explanation: letter.body.clone(),
        }
    }

    pub fn is_from(&self, reporter_id: &str) -> bool {
        self.reporter_id == reporter_id
    }
}
