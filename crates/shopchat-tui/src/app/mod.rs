// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Top-level TUI application state and event loop.

pub(crate) mod dispatch;
pub(crate) mod term_events;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::{DefaultTerminal, Frame};
use shopchat_config::Config;
use shopchat_core::render::DirectionsLink;
use shopchat_core::{ChatClient, Clock, Completion, Form, UiEvent, ViewController, ViewState};
use tokio::sync::mpsc;
use tracing::debug;

use crate::{
    feed_view::feed_lines,
    input::InputLine,
    layout::{AppLayout, LandingLayout},
    widgets::{draw_feed, draw_help, draw_input, draw_landing, draw_status},
};

// ── Public types ──────────────────────────────────────────────────────────────

/// Options passed when constructing the TUI app.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Submitted from the landing search box as soon as the UI starts.
    pub initial_prompt: Option<String>,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// The top-level TUI application state.
pub struct App {
    pub(crate) config: Arc<Config>,
    /// All widget state: view, session, feed, typing indicator.
    pub(crate) controller: ViewController,
    pub(crate) client: ChatClient,
    pub(crate) links: DirectionsLink,
    pub(crate) search_input: InputLine,
    pub(crate) chat_input: InputLine,
    pub(crate) focus: Form,
    /// Feed rendered to styled lines at `feed_width`.
    pub(crate) feed_lines: Vec<Line<'static>>,
    /// Set whenever the feed or a carousel offset changes.
    pub(crate) feed_dirty: bool,
    pub(crate) scroll_offset: u16,
    /// Last known inner size of the feed pane, populated each frame.
    pub(crate) feed_width: u16,
    pub(crate) feed_height: u16,
    pub(crate) show_help: bool,
    /// Spinner frame counter for the typing indicator.
    pub(crate) tick: usize,
    pub(crate) initial_prompt: Option<String>,
    /// Finished requests are delivered here by their send tasks.
    pub(crate) reply_tx: mpsc::Sender<Completion>,
    pub(crate) reply_rx: mpsc::Receiver<Completion>,
}

impl App {
    pub fn new(config: Arc<Config>, client: ChatClient, opts: AppOptions) -> Self {
        let (reply_tx, reply_rx) = mpsc::channel(64);
        let links = DirectionsLink::new(&config.widget);
        let clock = Clock::local(config.widget.clock_24h);
        Self {
            config,
            controller: ViewController::new(clock),
            client,
            links,
            search_input: InputLine::default(),
            chat_input: InputLine::default(),
            focus: Form::Search,
            feed_lines: Vec::new(),
            feed_dirty: true,
            scroll_offset: 0,
            // Reasonable defaults before the first frame is drawn.
            feed_width: 78,
            feed_height: 20,
            show_help: false,
            tick: 0,
            initial_prompt: opts.initial_prompt,
            reply_tx,
            reply_rx,
        }
    }

    /// Run the TUI event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> anyhow::Result<()> {
        if let Some(prompt) = self.initial_prompt.take() {
            let effects = self.controller.handle(UiEvent::Submit { form: Form::Search, text: prompt });
            self.apply_effects(effects);
        }

        let mut crossterm_events = EventStream::new();
        let mut spinner = tokio::time::interval(Duration::from_millis(120));

        loop {
            if let Ok(size) = terminal.size() {
                let layout = AppLayout::compute(Rect::new(0, 0, size.width, size.height));
                self.resize_feed(layout.feed_inner_width(), layout.feed_inner_height());
            }
            if self.feed_dirty {
                self.rebuild_feed();
            }

            let ascii = self.ascii();
            terminal.draw(|frame| self.draw(frame, ascii))?;

            let typing = self.controller.typing().is_visible();
            tokio::select! {
                Some(done) = self.reply_rx.recv() => {
                    self.handle_completion(done);
                }
                Some(Ok(term_event)) = crossterm_events.next() => {
                    if self.handle_term_event(term_event) { break; }
                }
                _ = spinner.tick(), if typing => {
                    self.tick = self.tick.wrapping_add(1);
                }
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame, ascii: bool) {
        match self.controller.state() {
            ViewState::Landing => {
                let layout = LandingLayout::compute(frame.area());
                draw_landing(frame, &layout, &self.config.widget.business_name, &self.search_input, ascii);
            }
            ViewState::Chatting => {
                let layout = AppLayout::compute(frame.area());
                draw_status(
                    frame, layout.status_bar, self.controller.session_id(),
                    self.client.backend().endpoint(),
                    self.controller.typing().is_visible(), self.tick, ascii,
                );
                draw_feed(frame, layout.feed_pane, &self.feed_lines, self.scroll_offset, ascii);
                draw_input(
                    frame, layout.input_pane, "Message", &self.chat_input,
                    "Ask about products, prices or stores", self.focus == Form::Chat, ascii,
                );
            }
        }
        if self.show_help {
            draw_help(frame, ascii);
        }
    }

    pub(crate) fn ascii(&self) -> bool {
        if std::env::var("SHOPCHAT_ASCII").as_deref() == Ok("1") {
            return true;
        }
        self.config.tui.ascii
    }

    // ── Feed helpers ──────────────────────────────────────────────────────────

    fn resize_feed(&mut self, width: u16, height: u16) {
        if width != self.feed_width {
            self.feed_width = width;
            self.feed_dirty = true;
        }
        if height != self.feed_height {
            self.feed_height = height.max(1);
            self.feed_dirty = true;
        }
    }

    pub(crate) fn rebuild_feed(&mut self) {
        self.feed_lines = feed_lines(self.controller.feed(), self.feed_width, &self.links, self.ascii());
        self.feed_dirty = false;
        if self.controller.feed().follows_newest() {
            self.scroll_to_bottom();
        } else {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        }
    }

    fn max_scroll(&self) -> u16 {
        u16::try_from(self.feed_lines.len())
            .unwrap_or(u16::MAX)
            .saturating_sub(self.feed_height)
    }

    pub(crate) fn scroll_up(&mut self, n: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
        if self.scroll_offset < self.max_scroll() {
            self.controller.feed_mut().set_follow_newest(false);
        }
    }

    pub(crate) fn scroll_down(&mut self, n: u16) {
        let max = self.max_scroll();
        self.scroll_offset = self.scroll_offset.saturating_add(n).min(max);
        if self.scroll_offset >= max {
            self.controller.feed_mut().set_follow_newest(true);
        }
    }

    pub(crate) fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Apply the result of a finished send task.
    pub(crate) fn handle_completion(&mut self, done: Completion) {
        match self.controller.complete(done) {
            Some(added) => {
                debug!(entries = added.len(), "reply applied");
                self.feed_dirty = true;
            }
            None => debug!("stale reply dropped"),
        }
    }
}

// ── Test helpers ──────────────────────────────────────────────────────────────

#[cfg(test)]
impl App {
    /// Construct an `App` backed by a scripted chat service.
    pub(crate) fn for_testing(backend: shopchat_model::ScriptedMockBackend) -> Self {
        let config = Arc::new(Config::default());
        let client = ChatClient::new(Arc::new(backend));
        Self::new(config, client, AppOptions::default())
    }

    /// Type `text` into the focused input.
    pub(crate) fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.dispatch(crate::keys::Action::InputChar(c));
        }
    }

    /// Wait for the next send task to finish and apply its result.
    pub(crate) async fn apply_next_reply(&mut self) {
        let done = self.reply_rx.recv().await.expect("reply channel open");
        self.handle_completion(done);
        self.rebuild_feed();
    }

    pub(crate) fn feed_text(&self) -> String {
        self.feed_lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
