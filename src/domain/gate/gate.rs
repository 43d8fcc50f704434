//! Send gate module.
//!
//! This module contains the local rules deciding whether a reader may
//! send an unsolicited letter: a cooldown between two sends, and a
//! backlog forcing the reader to answer someone else before writing
//! again. Replies are never gated.

use log::debug;
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

/// Represents the default minimum interval between two sends.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(300);

/// Represents the reason why a send was denied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Denial {
    /// The cooldown since the last send has not elapsed yet.
    RateLimited,
    /// The previous unsolicited letter has not been compensated by a
    /// reply yet.
    MustReplyFirst,
}

impl Denial {
    /// Gets the advisory title shown to the reader.
    pub fn title(&self) -> &'static str {
        match self {
            Self::RateLimited => "Too many messages at once",
            Self::MustReplyFirst => "Let's help others first",
        }
    }

    /// Gets the advisory message shown to the reader.
    pub fn message(&self) -> &'static str {
        match self {
            Self::RateLimited => "Come back and send your message sometime later",
            Self::MustReplyFirst => {
                "You will have to respond to someone else's message before sending another"
            }
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate limited"),
            Self::MustReplyFirst => write!(f, "must reply first"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Allowed,
    Denied(Denial),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Represents which sends refresh the last send time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LastSendPolicy {
    /// Only unsolicited letters refresh the last send time; replies
    /// leave it untouched.
    UnsolicitedOnly,
    /// Every successful send refreshes the last send time.
    EverySend,
}

impl Default for LastSendPolicy {
    fn default() -> Self {
        Self::UnsolicitedOnly
    }
}

/// Represents the kind of letter being sent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SendKind {
    Unsolicited,
    Reply,
}

/// Decides whether an unsolicited letter may be sent at `now`.
///
/// Times are milliseconds since epoch. The cooldown is checked
/// first, then the backlog.
pub fn can_send(now: i64, last_send_time: i64, backlog: u32, cooldown: Duration) -> Verdict {
    let elapsed = now.saturating_sub(last_send_time);
    let cooldown = i64::try_from(cooldown.as_millis()).unwrap_or(i64::MAX);

    if elapsed < cooldown {
        Verdict::Denied(Denial::RateLimited)
    } else if backlog >= 1 {
        Verdict::Denied(Denial::MustReplyFirst)
    } else {
        Verdict::Allowed
    }
}

/// Represents the send-rate state of a reader. It lives in memory
/// only and is lost on restart.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GateState {
    /// Represents the time of the last counted send, in milliseconds
    /// since epoch.
    pub last_send_time: i64,
    /// Represents the number of unsolicited letters not compensated
    /// by a reply yet.
    pub backlog: u32,
}

impl GateState {
    /// Decides whether a letter of the given kind may be sent.
    pub fn check(&self, kind: SendKind, now: i64, cooldown: Duration) -> Verdict {
        match kind {
            SendKind::Reply => Verdict::Allowed,
            SendKind::Unsolicited => can_send(now, self.last_send_time, self.backlog, cooldown),
        }
    }

    /// Builds the state following a successful send.
    pub fn record(self, kind: SendKind, now: i64, policy: LastSendPolicy) -> Self {
        let next = match (kind, policy) {
            (SendKind::Unsolicited, _) => Self {
                last_send_time: now,
                backlog: self.backlog.saturating_add(1),
            },
            (SendKind::Reply, LastSendPolicy::UnsolicitedOnly) => Self {
                last_send_time: self.last_send_time,
                backlog: 0,
            },
            (SendKind::Reply, LastSendPolicy::EverySend) => Self {
                last_send_time: now,
                backlog: 0,
            },
        };

        debug!("gate state after {:?} send: {:?}", kind, next);
        next
    }
}
