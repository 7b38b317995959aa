// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Full-screen terminal frontend for the shopping chat widget.
mod app;
mod feed_view;
mod input;
mod keys;
mod layout;
mod widgets;

pub use app::{App, AppOptions};
