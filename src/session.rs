//! Session module.
//!
//! This module contains the state a client keeps between two user
//! actions, and the orchestration of the collaborators around the
//! stateless mailbox, receive and gate functions. The session owns
//! every piece of mutable state; the functions it calls own none.

use chrono::Utc;
use log::{debug, info, warn};
use rand::Rng;
use std::{collections::HashSet, result};
use thiserror::Error;

use crate::{
    backend, letter, mailbox, sender, AccountConfig, Backend, BackendBuilder, Denial, Draft,
    GateState, Identity, Letter, Letters, Mailbox, Report, Reports, SeenLetters, SendKind, Sender,
    SenderBuilder, Verdict,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot build session backend")]
    BuildBackendError(#[source] backend::Error),
    #[error("cannot build session sender")]
    BuildSenderError(#[source] sender::Error),
    #[error("cannot refresh mailbox")]
    RefreshMailboxError(#[source] backend::Error),
    #[error("cannot receive letter")]
    ReceiveLetterError(#[source] backend::Error),
    #[error("cannot send letter")]
    SendLetterError(#[source] sender::Error),
    #[error("cannot report letter {1}")]
    ReportLetterError(#[source] sender::Error, String),
    #[error("cannot reply: no letter received")]
    ReplyWithoutLetterError,

    #[error(transparent)]
    DraftError(#[from] letter::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Identifies a refresh. Only the results of the most recent refresh
/// are applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RefreshToken(u64);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SendOutcome {
    Sent,
    /// The letter was not sent. The denial carries the advice to show
    /// to the user.
    Denied(Denial),
}

/// Represents the mutable state of a session.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Represents the letters of the last applied refresh.
    pub letters: Letters,
    pub mailbox: Mailbox,
    /// Represents the letters reported by the user, either fetched
    /// or reported during the session.
    pub excluded: HashSet<String>,
    pub gate: GateState,
    pub seen: SeenLetters,
    /// Represents the letter received last, the one a reply answers.
    pub received: Option<Letter>,
    generation: u64,
}

pub struct Session {
    config: AccountConfig,
    identity: Identity,
    backend: Box<dyn Backend>,
    sender: Box<dyn Sender>,
    state: SessionState,
}

impl Session {
    pub fn new(
        config: AccountConfig,
        identity: Identity,
        backend: Box<dyn Backend>,
        sender: Box<dyn Sender>,
    ) -> Self {
        let state = SessionState {
            seen: SeenLetters::new(config.seen_key()),
            ..SessionState::default()
        };

        Self {
            config,
            identity,
            backend,
            sender,
            state,
        }
    }

    /// Builds a session from the account configuration: loads (or
    /// creates) the local identity and builds the collaborators.
    pub fn from_config(config: AccountConfig) -> Result<Self> {
        let identity = config.identity_store().load_or_create();
        let backend_config = config.backend_config();
        let backend = BackendBuilder::build(&backend_config).map_err(Error::BuildBackendError)?;
        let sender = SenderBuilder::build(&backend_config).map_err(Error::BuildSenderError)?;
        Ok(Self::new(config, identity, backend, sender))
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.state.mailbox
    }

    pub fn received(&self) -> Option<&Letter> {
        self.state.received.as_ref()
    }

    /// Starts a refresh. Any refresh started before is now stale.
    pub fn begin_refresh(&mut self) -> RefreshToken {
        self.state.generation += 1;
        RefreshToken(self.state.generation)
    }

    /// Applies the collections fetched by a refresh, unless a more
    /// recent refresh was started meanwhile. Returns whether the
    /// results were applied.
    pub fn complete_refresh(&mut self, token: RefreshToken, reports: Reports, letters: Letters) -> bool {
        if token.0 != self.state.generation {
            debug!("discarding stale refresh {:?}", token);
            return false;
        }

        self.state
            .excluded
            .extend(reports.excluded_for(&self.identity));
        self.state.letters = letters;
        self.project();
        true
    }

    /// Fetches both collections and rebuilds the mailbox. On failure
    /// the previous mailbox stays untouched.
    pub fn refresh(&mut self) -> Result<&Mailbox> {
        let token = self.begin_refresh();
        let reports = self
            .backend
            .list_reports()
            .map_err(Error::RefreshMailboxError)?;
        let letters = self
            .backend
            .list_letters()
            .map_err(Error::RefreshMailboxError)?;

        self.complete_refresh(token, reports, letters);
        Ok(&self.state.mailbox)
    }

    fn project(&mut self) {
        self.state.mailbox =
            mailbox::project(&self.state.letters, &self.identity, &self.state.excluded);
    }

    /// Fetches the letters and picks one the user has not seen nor
    /// reported yet. The picked letter becomes the one a reply answers. When
    /// nothing is left to receive, the previously received letter is
    /// kept and `None` is returned.
    pub fn receive<R>(&mut self, rng: &mut R) -> Result<Option<&Letter>>
    where
        R: Rng + ?Sized,
    {
        let letters = self
            .backend
            .list_letters()
            .map_err(Error::ReceiveLetterError)?;

        let letters: Vec<Letter> = letters
            .iter()
            .filter(|letter| !self.state.excluded.contains(&letter.id))
            .cloned()
            .collect();

        let letter =
            match mailbox::select_unseen(&letters, &self.identity, &self.state.seen, rng) {
                Some(letter) => letter.clone(),
                None => {
                    info!("no letter left to receive");
                    return Ok(None);
                }
            };

        debug!("received letter {}", letter.id);
        self.state.seen.insert(&letter);
        self.state.received = Some(letter);
        Ok(self.state.received.as_ref())
    }

    /// Forgets the received letter, without replying to it.
    pub fn dismiss_received(&mut self) {
        self.state.received = None;
    }

    /// Sends the draft now.
    pub fn send(&mut self, draft: &Draft) -> Result<SendOutcome> {
        self.send_at(draft, Utc::now().timestamp_millis())
    }

    /// Sends the draft as if it was `now` (milliseconds since epoch).
    /// The draft is validated first. Letters not answering a stranger
    /// then go through the send gate.
    pub fn send_at(&mut self, draft: &Draft, now: i64) -> Result<SendOutcome> {
        draft.validate(&self.config)?;

        let kind = if self.answers_stranger(draft) {
            SendKind::Reply
        } else {
            SendKind::Unsolicited
        };

        if let Verdict::Denied(denial) = self.state.gate.check(kind, now, self.config.cooldown()) {
            info!("letter not sent: {}", denial);
            return Ok(SendOutcome::Denied(denial));
        }

        self.sender
            .send_letter(&self.identity, draft, now)
            .map_err(Error::SendLetterError)?;

        self.state.gate = self
            .state
            .gate
            .record(kind, now, self.config.last_send_policy());

        let answered = self
            .state
            .received
            .as_ref()
            .map(|letter| draft.in_response_to.as_deref() == Some(letter.id.as_str()))
            .unwrap_or(false);
        if answered {
            self.state.received = None;
        }

        Ok(SendOutcome::Sent)
    }

    /// Checks whether the draft answers a letter written by someone
    /// else: the received letter, or a known letter of another sender.
    /// Any other reply goes through the gate like an unsolicited
    /// letter and does not pay back the backlog.
    fn answers_stranger(&self, draft: &Draft) -> bool {
        let parent = match draft.in_response_to.as_deref() {
            Some(parent) if !parent.is_empty() => parent,
            _ => return false,
        };

        let answered = self
            .state
            .received
            .as_ref()
            .filter(|letter| letter.id == parent)
            .or_else(|| self.state.letters.find(parent));

        match answered {
            Some(letter) if !letter.is_from(&self.identity) => true,
            Some(_) => {
                debug!("draft answers own letter {}", parent);
                false
            }
            None => {
                debug!("draft answers unknown letter {}", parent);
                false
            }
        }
    }

    /// Replies to the received letter.
    pub fn reply<B, H>(&mut self, body: B, hue: H) -> Result<SendOutcome>
    where
        B: ToString,
        H: ToString,
    {
        let draft = self
            .state
            .received
            .as_ref()
            .map(|letter| Draft::reply_to(letter, body).hue(hue))
            .ok_or(Error::ReplyWithoutLetterError)?;
        self.send(&draft)
    }

    /// Reports the letter. It disappears from the mailbox right away,
    /// and from every later refresh.
    pub fn report(&mut self, letter: &Letter) -> Result<()> {
        let report = Report::new(letter, &self.identity);
        self.sender
            .send_report(&report)
            .map_err(|err| Error::ReportLetterError(err, letter.id.clone()))?;

        self.state.excluded.insert(letter.id.clone());
        if self.state.received.as_ref().map(|l| &l.id) == Some(&letter.id) {
            warn!("reported the received letter {}", letter.id);
            self.state.received = None;
        }

        self.project();
        Ok(())
    }
}
