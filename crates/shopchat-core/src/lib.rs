// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod carousel;
mod client;
mod controller;
mod feed;
mod indicator;
pub mod render;
mod session;

pub use carousel::{max_offset, Direction, ProductCarousel};
pub use client::{
    plan_reply, ChatClient, ChatFailure, ReplyFragment, CONNECTION_ERROR_NOTICE,
    GENERIC_FAILURE_NOTICE,
};
pub use controller::{Completion, Effect, Form, Outbound, Ticket, UiEvent, ViewController, ViewState};
pub use feed::{format_time, Clock, FeedEntry, Message, MessageFeed, Sender};
pub use indicator::TypingIndicator;
pub use session::{random_uuid, SessionManager};
