// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Action dispatch and controller effect handling.

use shopchat_core::{Direction, Effect, Form, UiEvent, ViewState};
use tracing::debug;

use crate::{feed_view::carousel_max_offset, input::InputLine, keys::Action};

use super::App;

impl App {
    /// Handle one action.  Returns `true` when the app should quit.
    pub(crate) fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::Help => self.show_help = !self.show_help,

            Action::Submit => {
                let text = self.focused_input().as_str().to_string();
                let effects = self.controller.handle(UiEvent::Submit { form: self.focus, text });
                self.apply_effects(effects);
            }
            Action::Close => {
                let effects = self.controller.handle(UiEvent::Close);
                self.apply_effects(effects);
            }
            Action::Escape => {
                let effects = self.controller.handle(UiEvent::Escape);
                self.apply_effects(effects);
            }

            Action::ScrollUp => self.scroll_up(1),
            Action::ScrollDown => self.scroll_down(1),
            Action::ScrollPageUp => self.scroll_up(self.feed_height.saturating_sub(1).max(1)),
            Action::ScrollPageDown => self.scroll_down(self.feed_height.saturating_sub(1).max(1)),
            Action::ScrollBottom => {
                self.controller.feed_mut().set_follow_newest(true);
                self.scroll_to_bottom();
            }

            Action::CarouselPrev => self.scroll_carousel(Direction::Prev),
            Action::CarouselNext => self.scroll_carousel(Direction::Next),

            Action::InputChar(c) => self.focused_input_mut().insert(c),
            Action::InputBackspace => self.focused_input_mut().backspace(),
            Action::InputDelete => self.focused_input_mut().delete(),
            Action::InputMoveCursorLeft => self.focused_input_mut().left(),
            Action::InputMoveCursorRight => self.focused_input_mut().right(),
            Action::InputMoveWordLeft => self.focused_input_mut().word_left(),
            Action::InputMoveWordRight => self.focused_input_mut().word_right(),
            Action::InputMoveLineStart => self.focused_input_mut().home(),
            Action::InputMoveLineEnd => self.focused_input_mut().end(),
            Action::InputDeleteToEnd => self.focused_input_mut().delete_to_end(),
            Action::InputDeleteToStart => self.focused_input_mut().delete_to_start(),
        }
        false
    }

    /// Carry out what the controller asked for.
    pub(crate) fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Show(view) => {
                    debug!(?view, "switching view");
                    if view == ViewState::Landing {
                        self.chat_input.clear();
                        self.scroll_offset = 0;
                    }
                    self.feed_dirty = true;
                }
                Effect::Focus(form) => self.focus = form,
                Effect::ClearInput(form) => self.input_mut(form).clear(),
                Effect::Dispatch(outbound) => {
                    // Feed changed: the user's message was appended.
                    self.feed_dirty = true;
                    let client = self.client.clone();
                    let tx = self.reply_tx.clone();
                    tokio::spawn(async move {
                        let done = client.deliver(outbound).await;
                        let _ = tx.send(done).await;
                    });
                }
            }
        }
    }

    fn scroll_carousel(&mut self, dir: Direction) {
        let step = self.config.widget.carousel_step;
        let cards = match self.controller.feed_mut().latest_carousel_mut() {
            Some(c) => c.products.len(),
            None => return,
        };
        let max = carousel_max_offset(cards, self.feed_width);
        if self.controller.scroll_carousel(dir, step, max) {
            self.feed_dirty = true;
        }
    }

    pub(crate) fn focused_input(&self) -> &InputLine {
        match self.focus {
            Form::Search => &self.search_input,
            Form::Chat => &self.chat_input,
        }
    }

    fn focused_input_mut(&mut self) -> &mut InputLine {
        self.input_mut(self.focus)
    }

    fn input_mut(&mut self, form: Form) -> &mut InputLine {
        match form {
            Form::Search => &mut self.search_input,
            Form::Chat => &mut self.chat_input,
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shopchat_core::{ViewState, CONNECTION_ERROR_NOTICE};
    use shopchat_model::ScriptedMockBackend;

    use crate::app::App;
    use crate::keys::Action;

    fn products(n: usize) -> serde_json::Value {
        let list: Vec<_> = (0..n)
            .map(|i| json!({"product_name": format!("Phone {i}"), "product_mrp": "₹9,999"}))
            .collect();
        json!(list)
    }

    #[tokio::test]
    async fn search_submit_opens_chat_and_sends_seed() {
        let backend = ScriptedMockBackend::success(json!({"answer": "Here you go"}));
        let mut app = App::for_testing(backend.clone());

        app.type_text("  washing machine ");
        assert!(!app.dispatch(Action::Submit));

        assert_eq!(app.controller.state(), ViewState::Chatting);
        assert_eq!(app.focus, shopchat_core::Form::Chat);
        assert!(app.search_input.is_empty());
        assert!(app.controller.typing().is_visible());

        app.apply_next_reply().await;
        let sent = backend.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "washing machine");
        assert_eq!(sent[0].session_id, app.controller.session_id());
        assert!(!app.controller.typing().is_visible());
        assert!(app.feed_text().contains("Here you go"));
    }

    #[tokio::test]
    async fn blank_search_stays_on_landing() {
        let backend = ScriptedMockBackend::new(vec![]);
        let mut app = App::for_testing(backend.clone());

        app.type_text("   ");
        app.dispatch(Action::Submit);

        assert_eq!(app.controller.state(), ViewState::Landing);
        assert!(app.reply_rx.try_recv().is_err());
        assert!(backend.sent().is_empty());
    }

    #[tokio::test]
    async fn escape_on_landing_is_ignored() {
        let mut app = App::for_testing(ScriptedMockBackend::new(vec![]));
        app.type_text("tv");
        app.dispatch(Action::Escape);
        assert_eq!(app.controller.state(), ViewState::Landing);
        assert_eq!(app.search_input.as_str(), "tv");
    }

    #[tokio::test]
    async fn escape_in_chat_resets_session_and_feed() {
        let backend = ScriptedMockBackend::success(json!({"answer": "hi"}));
        let mut app = App::for_testing(backend);
        app.type_text("hello");
        app.dispatch(Action::Submit);
        app.apply_next_reply().await;
        let first_session = app.controller.session_id().to_string();
        app.type_text("half typed");

        app.dispatch(Action::Escape);

        assert_eq!(app.controller.state(), ViewState::Landing);
        assert_eq!(app.focus, shopchat_core::Form::Search);
        assert!(app.controller.feed().is_empty());
        assert!(app.chat_input.is_empty());
        assert_ne!(app.controller.session_id(), first_session);
    }

    #[tokio::test]
    async fn reply_after_close_is_dropped() {
        let backend = ScriptedMockBackend::success(json!({"answer": "late"}));
        let mut app = App::for_testing(backend);
        app.type_text("hello");
        app.dispatch(Action::Submit);
        app.dispatch(Action::Close);

        app.apply_next_reply().await;
        assert!(app.controller.feed().is_empty());
        assert!(!app.feed_text().contains("late"));
    }

    #[tokio::test]
    async fn transport_failure_shows_connection_notice() {
        let mut app = App::for_testing(ScriptedMockBackend::unreachable());
        app.type_text("hello");
        app.dispatch(Action::Submit);
        app.apply_next_reply().await;
        assert!(app.feed_text().contains(CONNECTION_ERROR_NOTICE));
    }

    #[tokio::test]
    async fn carousel_keys_move_newest_carousel_by_one_card() {
        let backend = ScriptedMockBackend::success(json!({"products": products(8)}));
        let mut app = App::for_testing(backend);
        app.feed_width = 60;
        app.type_text("phones");
        app.dispatch(Action::Submit);
        app.apply_next_reply().await;

        app.dispatch(Action::CarouselNext);
        let offset = app.controller.feed_mut().latest_carousel_mut().map(|c| c.offset());
        assert_eq!(offset, Some(250));
        assert!(app.feed_dirty);

        app.dispatch(Action::CarouselPrev);
        app.dispatch(Action::CarouselPrev);
        let offset = app.controller.feed_mut().latest_carousel_mut().map(|c| c.offset());
        assert_eq!(offset, Some(0));
    }

    #[tokio::test]
    async fn carousel_keys_without_carousel_do_nothing() {
        let mut app = App::for_testing(ScriptedMockBackend::new(vec![]));
        app.feed_dirty = false;
        app.dispatch(Action::CarouselNext);
        assert!(!app.feed_dirty);
    }

    #[tokio::test]
    async fn scrolling_up_stops_following_and_bottom_resumes() {
        let long: String = (0..60).map(|i| format!("line {i}\n")).collect();
        let backend = ScriptedMockBackend::success(json!({"answer": long}));
        let mut app = App::for_testing(backend);
        app.feed_height = 10;
        app.type_text("tell me everything");
        app.dispatch(Action::Submit);
        app.apply_next_reply().await;

        let bottom = app.scroll_offset;
        assert!(bottom > 0);
        app.dispatch(Action::ScrollPageUp);
        assert!(app.scroll_offset < bottom);
        assert!(!app.controller.feed().follows_newest());

        app.dispatch(Action::ScrollBottom);
        assert_eq!(app.scroll_offset, bottom);
        assert!(app.controller.feed().follows_newest());
    }

    #[test]
    fn scrolling_very_long_feed_saturates() {
        let mut app = App::for_testing(ScriptedMockBackend::new(vec![]));
        app.feed_lines = vec![ratatui::text::Line::default(); usize::from(u16::MAX) + 10];
        app.feed_height = 10;
        app.scroll_offset = u16::MAX - 20;
        app.scroll_down(u16::MAX);
        assert_eq!(app.scroll_offset, u16::MAX - 10);
        assert!(app.controller.feed().follows_newest());
    }

    #[test]
    fn quit_and_help() {
        let mut app = App::for_testing(ScriptedMockBackend::new(vec![]));
        assert!(app.dispatch(Action::Quit));
        assert!(!app.dispatch(Action::Help));
        assert!(app.show_help);
    }

    #[test]
    fn editing_keys_act_on_focused_input() {
        let mut app = App::for_testing(ScriptedMockBackend::new(vec![]));
        app.type_text("hello world");
        app.dispatch(Action::InputMoveWordLeft);
        app.dispatch(Action::InputDeleteToEnd);
        assert_eq!(app.search_input.as_str(), "hello ");
        app.dispatch(Action::InputDeleteToStart);
        assert!(app.search_input.is_empty());
        assert!(app.chat_input.is_empty());
    }
}
