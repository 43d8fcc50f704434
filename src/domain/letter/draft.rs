//! Draft module.
//!
//! This module contains the representation of a letter being written,
//! before it is posted to the remote letters collection.

use std::result;
use thiserror::Error;

use crate::{AccountConfig, Letter};

/// Represents the hue used when the writer did not pick any.
pub const DEFAULT_HUE: &str = "#ffffff";

#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error("cannot send an empty letter")]
    EmptyBody,
    #[error("cannot send a letter shorter than {1} characters (got {0})")]
    BodyTooShort(usize, usize),
    #[error("cannot send a letter longer than {1} characters (got {0})")]
    BodyTooLong(usize, usize),
    #[error("cannot send a letter without hue")]
    EmptyHue,
}

pub type Result<T> = result::Result<T, Error>;

/// Represents a letter being written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    pub body: String,
    pub hue: String,
    /// Represents the identifier of the letter being answered. A
    /// draft without it is an unsolicited letter.
    pub in_response_to: Option<String>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            body: String::new(),
            hue: DEFAULT_HUE.to_owned(),
            in_response_to: None,
        }
    }
}

impl Draft {
    pub fn new<B: ToString>(body: B) -> Self {
        Self {
            body: body.to_string(),
            ..Self::default()
        }
    }

    /// Builds a draft answering the given letter.
    pub fn reply_to<B: ToString>(letter: &Letter, body: B) -> Self {
        Self {
            body: body.to_string(),
            in_response_to: Some(letter.id.clone()),
            ..Self::default()
        }
    }

    pub fn hue<H: ToString>(mut self, hue: H) -> Self {
        self.hue = hue.to_string();
        self
    }

    pub fn is_reply(&self) -> bool {
        self.in_response_to
            .as_deref()
            .map(|parent| !parent.is_empty())
            .unwrap_or(false)
    }

    /// Checks the draft against the body bounds of the account.
    /// Lengths are counted in characters, not bytes.
    pub fn validate(&self, config: &AccountConfig) -> Result<()> {
        let len = self.body.chars().count();

        if self.body.trim().is_empty() {
            return Err(Error::EmptyBody);
        }

        let min = config.min_body_len();
        if len < min {
            return Err(Error::BodyTooShort(len, min));
        }

        let max = config.max_body_len();
        if len > max {
            return Err(Error::BodyTooLong(len, max));
        }

        if self.hue.trim().is_empty() {
            return Err(Error::EmptyHue);
        }

        Ok(())
    }

    /// Turns the draft into a letter, once the store assigned it an
    /// identifier.
    pub fn to_letter<I, S>(&self, id: I, sender_id: S, timestamp: i64) -> Letter
    where
        I: ToString,
        S: ToString,
    {
        Letter {
            id: id.to_string(),
            sender_id: sender_id.to_string(),
            body: self.body.clone(),
            hue: Some(self.hue.clone()),
            timestamp,
            in_response_to: self.in_response_to.clone().filter(|id| !id.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{AccountConfig, Draft, Letter};

    use super::Error;

    #[test]
    fn validate_body_bounds() {
        let config = AccountConfig {
            min_body_len: Some(5),
            max_body_len: Some(10),
            ..AccountConfig::default()
        };

        assert_eq!(Err(Error::EmptyBody), Draft::new("").validate(&config));
        assert_eq!(Err(Error::EmptyBody), Draft::new(" \n ").validate(&config));
        assert_eq!(
            Err(Error::BodyTooShort(4, 5)),
            Draft::new("dear").validate(&config)
        );
        assert_eq!(Ok(()), Draft::new("dear!").validate(&config));
        assert_eq!(Ok(()), Draft::new("éééééééééé").validate(&config));
        assert_eq!(
            Err(Error::BodyTooLong(11, 10)),
            Draft::new("dear friend").validate(&config)
        );
        assert_eq!(
            Err(Error::EmptyHue),
            Draft::new("dear!").hue(" ").validate(&config)
        );
    }

    #[test]
    fn default_bounds() {
        let config = AccountConfig::default();
        assert!(Draft::new("a".repeat(50)).validate(&config).is_err());
        assert!(Draft::new("a".repeat(51)).validate(&config).is_ok());
        assert!(Draft::new("a".repeat(1000)).validate(&config).is_ok());
        assert!(Draft::new("a".repeat(1001)).validate(&config).is_err());
    }

    #[test]
    fn reply_draft() {
        let letter = Letter {
            id: "root".into(),
            ..Letter::default()
        };
        let draft = Draft::reply_to(&letter, "hello");
        assert!(draft.is_reply());
        assert!(!Draft::new("hello").is_reply());

        let reply = draft.to_letter("id", "me", 42);
        assert_eq!(Some("root"), reply.parent());
        assert_eq!(Some("#ffffff"), reply.hue.as_deref());
    }
}
