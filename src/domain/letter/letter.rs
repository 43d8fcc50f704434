//! Letter module.
//!
//! This module contains the representation of a letter, the unit of
//! exchange between strangers. A letter is either a root (an
//! unsolicited letter) or a reply to exactly one other letter.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

/// Represents a letter fetched from the remote letters collection.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Letter {
    /// Represents the server-assigned identifier.
    pub id: String,
    /// Represents the identity of the installation that wrote the
    /// letter.
    pub sender_id: String,
    /// Represents the text of the letter.
    pub body: String,
    /// Represents the mood color chosen by the sender.
    pub hue: Option<String>,
    /// Represents the creation time, in milliseconds since epoch.
    pub timestamp: i64,
    /// Represents the identifier of the letter this one answers.
    pub in_response_to: Option<String>,
}

impl Letter {
    /// Gets the identifier of the parent letter, if any. An empty
    /// reference is treated as no reference at all.
    pub fn parent(&self) -> Option<&str> {
        self.in_response_to
            .as_deref()
            .filter(|parent| !parent.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    pub fn is_reply(&self) -> bool {
        !self.is_root()
    }

    pub fn is_from(&self, sender_id: &str) -> bool {
        self.sender_id == sender_id
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    pub fn has_hue(&self) -> bool {
        self.hue.as_deref().map(|hue| !hue.is_empty()).unwrap_or(false)
    }

    /// Checks that the letter carries both an identifier and a
    /// sender identity.
    pub fn is_identified(&self) -> bool {
        !self.id.is_empty() && !self.sender_id.is_empty()
    }

    /// Converts the timestamp to a local date. Returns `None` when
    /// the timestamp is out of the representable range.
    pub fn date(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }
}
