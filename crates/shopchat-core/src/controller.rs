// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::ops::Range;

use shopchat_model::ChatRequest;
use tracing::{debug, warn};

use crate::carousel::{Direction, ProductCarousel};
use crate::client::{ChatFailure, ReplyFragment};
use crate::feed::{Clock, FeedEntry, Message, MessageFeed, Sender};
use crate::indicator::TypingIndicator;
use crate::session::SessionManager;

/// Which of the two top-level views is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Landing,
    Chatting,
}

/// The two text inputs of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Search box on the landing view.
    Search,
    /// Message input in the chat view.
    Chat,
}

/// Input events, independent of any UI toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Submit { form: Form, text: String },
    /// The close button of the chat view.
    Close,
    Escape,
}

/// Identifies one outbound request: the session it was sent under and its
/// position in the sequence of sends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub session: String,
    pub seq: u64,
}

/// A request the frontend must hand to the chat client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub ticket: Ticket,
    pub request: ChatRequest,
}

/// Result of one outbound request, ready for [`ViewController::complete`].
#[derive(Debug, Clone)]
pub struct Completion {
    pub ticket: Ticket,
    pub result: Result<Vec<ReplyFragment>, ChatFailure>,
}

/// Something the frontend has to do after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Show(ViewState),
    Focus(Form),
    ClearInput(Form),
    Dispatch(Outbound),
}

/// Owns all widget state and decides how each input event changes it.
///
/// Nothing here performs I/O.  Outbound requests are returned as
/// [`Effect::Dispatch`] and their results come back through
/// [`ViewController::complete`].
#[derive(Debug)]
pub struct ViewController {
    state: ViewState,
    session: SessionManager,
    feed: MessageFeed,
    typing: TypingIndicator,
    clock: Clock,
    next_seq: u64,
}

impl ViewController {
    pub fn new(clock: Clock) -> Self {
        Self {
            state: ViewState::Landing,
            session: SessionManager::new(),
            feed: MessageFeed::new(),
            typing: TypingIndicator::default(),
            clock,
            next_seq: 0,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn session_id(&self) -> &str {
        self.session.current()
    }

    pub fn feed(&self) -> &MessageFeed {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut MessageFeed {
        &mut self.feed
    }

    pub fn typing(&self) -> &TypingIndicator {
        &self.typing
    }

    pub fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
        match (self.state, event) {
            (ViewState::Landing, UiEvent::Submit { form: Form::Search, text }) => {
                let seed = text.trim();
                if seed.is_empty() {
                    return Vec::new();
                }
                let mut effects = vec![Effect::ClearInput(Form::Search)];
                effects.extend(self.open_chat(Some(seed)));
                effects
            }
            (ViewState::Chatting, UiEvent::Submit { form: Form::Chat, text }) => {
                let text = text.trim();
                if text.is_empty() {
                    return Vec::new();
                }
                let mut effects = vec![Effect::ClearInput(Form::Chat)];
                effects.push(self.submit(text));
                effects
            }
            (ViewState::Chatting, UiEvent::Close | UiEvent::Escape) => self.close_chat(),
            (state, event) => {
                debug!(?state, ?event, "event ignored in this view");
                Vec::new()
            }
        }
    }

    /// Switch to the chat view.  A non-blank `seed` becomes the first user
    /// message and is sent right away.
    pub fn open_chat(&mut self, seed: Option<&str>) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.state != ViewState::Chatting {
            self.state = ViewState::Chatting;
            effects.push(Effect::Show(ViewState::Chatting));
        }
        effects.push(Effect::Focus(Form::Chat));
        if let Some(seed) = seed.map(str::trim).filter(|s| !s.is_empty()) {
            effects.push(self.submit(seed));
        }
        effects
    }

    /// Back to the landing view with an empty feed and a new session.
    pub fn close_chat(&mut self) -> Vec<Effect> {
        self.state = ViewState::Landing;
        self.feed.clear();
        // Replies still in flight belong to the old session and get dropped,
        // so nothing would ever hide the indicator.
        self.typing.hide();
        self.session.new_session();
        vec![Effect::Show(ViewState::Landing), Effect::Focus(Form::Search)]
    }

    fn submit(&mut self, text: &str) -> Effect {
        self.push_text(text, Sender::User);
        self.typing.show();
        self.next_seq += 1;
        let session = self.session.current().to_string();
        debug!(session = %session, seq = self.next_seq, "dispatching message");
        Effect::Dispatch(Outbound {
            ticket: Ticket { session: session.clone(), seq: self.next_seq },
            request: ChatRequest::new(text, session),
        })
    }

    /// Apply the result of an earlier dispatch.
    ///
    /// Results are applied in the order they arrive.  A result whose session
    /// has been closed since is dropped and `None` is returned; otherwise the
    /// range of feed entries it appended is returned.
    pub fn complete(&mut self, done: Completion) -> Option<Range<usize>> {
        if done.ticket.session != self.session.current() {
            debug!(seq = done.ticket.seq, "dropping reply for a closed session");
            return None;
        }
        self.typing.hide();
        let start = self.feed.len();
        match done.result {
            Ok(fragments) => {
                for fragment in fragments {
                    self.push_fragment(fragment);
                }
            }
            Err(failure) => {
                warn!(seq = done.ticket.seq, "{failure}");
                self.push_text(failure.notice(), Sender::Bot);
            }
        }
        Some(start..self.feed.len())
    }

    /// Scroll the newest carousel in the feed.  Returns `false` when there
    /// is none or it is already at that edge.
    pub fn scroll_carousel(&mut self, dir: Direction, step: u32, max_offset: u32) -> bool {
        self.feed
            .latest_carousel_mut()
            .is_some_and(|c| c.scroll(dir, step, max_offset))
    }

    fn push_fragment(&mut self, fragment: ReplyFragment) {
        match fragment {
            ReplyFragment::Text(text) => self.push_text(&text, Sender::Bot),
            ReplyFragment::Carousel(products) => {
                self.feed.push(FeedEntry::Carousel(ProductCarousel::new(products)))
            }
            ReplyFragment::Store(store) => self.feed.push(FeedEntry::Store(store)),
            ReplyFragment::Details(product) => self.feed.push(FeedEntry::Details(product)),
        }
    }

    fn push_text(&mut self, content: &str, sender: Sender) {
        self.feed.push(FeedEntry::Text(Message {
            content: content.to_string(),
            sender,
            timestamp: self.clock.stamp(),
        }));
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
