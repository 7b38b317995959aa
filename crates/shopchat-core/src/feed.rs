// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use chrono::{Local, NaiveTime};
use serde::Serialize;
use shopchat_model::{Product, Store};

use crate::carousel::ProductCarousel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One text bubble.  Immutable once appended to the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub content: String,
    pub sender: Sender,
    /// Local hour:minute at the time the message was created.
    pub timestamp: String,
}

/// Anything the feed can show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedEntry {
    Text(Message),
    Carousel(ProductCarousel),
    Store(Store),
    Details(Product),
}

impl FeedEntry {
    pub fn sender(&self) -> Sender {
        match self {
            FeedEntry::Text(m) => m.sender,
            _ => Sender::Bot,
        }
    }
}

/// Append-only ordered list of feed entries.
///
/// The only removal is [`MessageFeed::clear`], which empties the feed when
/// the conversation is closed.
#[derive(Debug, Clone, Default)]
pub struct MessageFeed {
    entries: Vec<FeedEntry>,
    /// Whether views should keep the newest entry in sight.  Set again by
    /// every append.
    follow_newest: bool,
}

impl MessageFeed {
    pub fn new() -> Self {
        Self { entries: Vec::new(), follow_newest: true }
    }

    pub fn push(&mut self, entry: FeedEntry) {
        self.entries.push(entry);
        self.follow_newest = true;
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.follow_newest = true;
    }

    pub fn follows_newest(&self) -> bool {
        self.follow_newest
    }

    /// Called by a view when the user scrolls away from (or back to) the
    /// bottom of the feed.
    pub fn set_follow_newest(&mut self, follow: bool) {
        self.follow_newest = follow;
    }

    /// The most recently appended carousel, if any.
    pub fn latest_carousel_mut(&mut self) -> Option<&mut ProductCarousel> {
        self.entries.iter_mut().rev().find_map(|e| match e {
            FeedEntry::Carousel(c) => Some(c),
            _ => None,
        })
    }
}

// ── Timestamps ────────────────────────────────────────────────────────────────

/// Produces message timestamps.  Tests pin the time with [`Clock::fixed`].
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    h24: bool,
    fixed: Option<NaiveTime>,
}

impl Clock {
    pub fn local(h24: bool) -> Self {
        Self { h24, fixed: None }
    }

    pub fn fixed(time: NaiveTime, h24: bool) -> Self {
        Self { h24, fixed: Some(time) }
    }

    pub fn stamp(&self) -> String {
        let now = self.fixed.unwrap_or_else(|| Local::now().time());
        format_time(now, self.h24)
    }
}

/// `14:05` in 24-hour mode, `02:05 PM` otherwise.
pub fn format_time(t: NaiveTime, h24: bool) -> String {
    if h24 {
        t.format("%H:%M").to_string()
    } else {
        t.format("%I:%M %p").to_string()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
